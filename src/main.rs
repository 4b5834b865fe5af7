use clap::Parser;
use ctf_merge::{MergeConfig, MergeError, StatsMerger, init_tracing, write_report};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "merge_stats")]
#[command(about = "Merge per-shard term statistics into one collection-wide report", long_about = None)]
struct Cli {
    /// Shard statistics files, merged in the order given
    paths: Vec<PathBuf>,

    /// Emit term lines sorted by term (default order is unspecified)
    #[arg(long)]
    sorted: bool,

    /// Warn about and skip unparseable term lines instead of aborting
    #[arg(long)]
    skip_malformed: bool,
}

impl Cli {
    fn config(&self) -> MergeConfig {
        let mut config = MergeConfig::from_env();
        if self.sorted {
            config = config.sorted();
        }
        if self.skip_malformed {
            config = config.skip_malformed();
        }
        config
    }
}

fn run(cli: &Cli) -> Result<(), MergeError> {
    let config = cli.config();
    let stats = StatsMerger::new(config).merge(&cli.paths)?;

    // Nothing reaches stdout until every shard has been merged.
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&stats, config.order, &mut out)?;
    Ok(())
}

fn main() -> ExitCode {
    init_tracing("merge_stats");
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "merge failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
