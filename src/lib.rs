pub mod config;
pub mod error;
pub mod logging;
pub mod merger;
pub mod report;
pub mod shard;
pub mod stats;

pub use config::{MalformedPolicy, MergeConfig, OutputOrder};
pub use error::*;
pub use logging::init_tracing;
pub use merger::{merge, ShardSummary, StatsMerger};
pub use report::{render_report, write_report};
pub use stats::TermStats;
