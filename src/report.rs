use crate::config::OutputOrder;
use crate::stats::TermStats;
use std::io::{self, Write};

/// Write the merged report: the grand total, then one `term<TAB>count` line
/// per distinct term.
///
/// The output has the same shape as a shard statistics file, so a report can
/// be fed back in as a single shard.
pub fn write_report<W: Write>(stats: &TermStats, order: OutputOrder, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", stats.total_terms())?;
    match order {
        OutputOrder::Unordered => {
            for (term, count) in stats.iter() {
                writeln!(out, "{}\t{}", term, count)?;
            }
        }
        OutputOrder::Sorted => {
            for (term, count) in stats.sorted_entries() {
                writeln!(out, "{}\t{}", term, count)?;
            }
        }
    }
    out.flush()
}

/// Render the report into a `String`.
pub fn render_report(stats: &TermStats, order: OutputOrder) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_report(stats, order, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
