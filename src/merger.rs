use crate::config::{MalformedPolicy, MergeConfig};
use crate::error::MergeError;
use crate::shard::ShardReader;
use crate::stats::TermStats;
use std::path::Path;
use tracing::{debug, info, warn};

/// Merge shard statistics files with the default policy (fail fast).
pub fn merge<P: AsRef<Path>>(paths: &[P]) -> Result<TermStats, MergeError> {
    StatsMerger::new(MergeConfig::default()).merge(paths)
}

/// Sums shard headers and per-term counts over a sequence of shard files.
///
/// Files are processed strictly in the given order, one at a time. Each
/// file is closed before the next one is opened, and before any error
/// from it is returned.
pub struct StatsMerger {
    config: MergeConfig,
}

/// What a single shard contributed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShardSummary {
    pub header: u64,
    pub records: usize,
    pub skipped: usize,
}

impl StatsMerger {
    pub fn new(config: MergeConfig) -> Self {
        StatsMerger { config }
    }

    pub fn merge<P: AsRef<Path>>(&self, paths: &[P]) -> Result<TermStats, MergeError> {
        let mut stats = TermStats::new();
        let mut skipped = 0;
        for path in paths {
            let summary = self.merge_shard(path.as_ref(), &mut stats)?;
            skipped += summary.skipped;
        }
        info!(
            shards = paths.len(),
            total_terms = stats.total_terms(),
            distinct_terms = stats.len(),
            skipped_lines = skipped,
            "merge complete"
        );
        Ok(stats)
    }

    /// Fold one shard file into `stats`. The reader is dropped when this returns.
    pub fn merge_shard(&self, path: &Path, stats: &mut TermStats) -> Result<ShardSummary, MergeError> {
        let mut reader = ShardReader::open(path)?;
        let summary = self.consume(&mut reader, stats)?;
        debug!(
            path = %path.display(),
            header = summary.header,
            records = summary.records,
            skipped = summary.skipped,
            "merged shard"
        );
        Ok(summary)
    }

    fn consume<R: std::io::BufRead>(
        &self,
        reader: &mut ShardReader<R>,
        stats: &mut TermStats,
    ) -> Result<ShardSummary, MergeError> {
        let path = reader.path().to_path_buf();
        let header = reader.read_header()?;
        stats
            .add_shard_total(header)
            .map_err(|_| overflow(&path, 1))?;

        let mut summary = ShardSummary {
            header,
            ..ShardSummary::default()
        };
        for record in reader {
            let record = match record {
                Ok(record) => record,
                Err(MergeError::Parse { line, content, issue, .. })
                    if self.config.on_malformed == MalformedPolicy::Skip =>
                {
                    warn!(path = %path.display(), line, content = %content, "skipping malformed line: {}", issue);
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            stats
                .add_term(&record.term, record.count)
                .map_err(|_| overflow(&path, record.line))?;
            summary.records += 1;
        }
        if summary.skipped > 0 {
            info!(path = %path.display(), skipped = summary.skipped, "shard had malformed lines");
        }
        Ok(summary)
    }
}

fn overflow(path: &Path, line: usize) -> MergeError {
    MergeError::Overflow {
        path: path.to_path_buf(),
        line,
    }
}
