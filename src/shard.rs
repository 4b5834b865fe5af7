use crate::error::{MergeError, ParseIssue};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One `term<TAB>count` line of a shard statistics file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRecord {
    pub term: String,
    pub count: u64,
    pub line: usize,
}

/// Parse the header line: the shard's total term count.
pub fn parse_header(line: &str) -> Result<u64, ParseIssue> {
    Ok(line.trim().parse::<u64>()?)
}

/// Drop a trailing `\n` or `\r\n`, nothing else.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse a record line. Empty lines carry no record and yield `None`;
/// whitespace-only lines are malformed.
pub fn parse_term_line(line: &str) -> Result<Option<(&str, u64)>, ParseIssue> {
    let line = strip_line_ending(line);
    if line.is_empty() {
        return Ok(None);
    }
    let (term, count_text) = line.split_once('\t').ok_or(ParseIssue::MissingTab)?;
    let count = count_text.trim().parse::<u64>()?;
    Ok(Some((term, count)))
}

/// Sequential reader over a single shard file.
///
/// The header must be read first with [`ShardReader::read_header`]; the
/// reader then iterates the term records. Dropping the reader closes the file.
pub struct ShardReader<R> {
    path: PathBuf,
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl ShardReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, MergeError> {
        let file = File::open(path).map_err(|source| MergeError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(path, BufReader::new(file)))
    }
}

impl<R: BufRead> ShardReader<R> {
    pub fn from_reader(path: &Path, reader: R) -> Self {
        ShardReader {
            path: path.to_path_buf(),
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next raw line without its line ending. Bytes that are not UTF-8 are a
    /// parse error on that line; the line is still consumed so reading can go on.
    fn next_line(&mut self) -> Option<Result<String, MergeError>> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(source) => {
                return Some(Err(MergeError::FileAccess {
                    path: self.path.clone(),
                    source,
                }));
            }
        }
        self.line_no += 1;
        let line = match std::str::from_utf8(&self.buf) {
            Ok(text) => strip_line_ending(text).to_string(),
            Err(_) => {
                let lossy = String::from_utf8_lossy(&self.buf);
                return Some(Err(self.parse_error(strip_line_ending(&lossy), ParseIssue::InvalidUtf8)));
            }
        };
        Some(Ok(line))
    }

    fn parse_error(&self, content: &str, issue: ParseIssue) -> MergeError {
        MergeError::Parse {
            path: self.path.clone(),
            line: self.line_no,
            content: content.to_string(),
            issue,
        }
    }

    pub fn read_header(&mut self) -> Result<u64, MergeError> {
        let line = match self.next_line() {
            Some(line) => line?,
            None => return Err(self.parse_error("", ParseIssue::MissingHeader)),
        };
        parse_header(&line).map_err(|issue| self.parse_error(&line, issue))
    }
}

impl<R: BufRead> Iterator for ShardReader<R> {
    type Item = Result<TermRecord, MergeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.next_line()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            match parse_term_line(&line) {
                Ok(None) => continue,
                Ok(Some((term, count))) => {
                    return Some(Ok(TermRecord {
                        term: term.to_string(),
                        count,
                        line: self.line_no,
                    }));
                }
                Err(issue) => return Some(Err(self.parse_error(&line, issue))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> ShardReader<Cursor<Vec<u8>>> {
        ShardReader::from_reader(Path::new("mem"), Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_header_tolerates_surrounding_whitespace() {
        assert_eq!(parse_header("  42 \r"), Ok(42));
        assert_eq!(parse_header("\t7"), Ok(7));
    }

    #[test]
    fn test_header_rejects_non_numeric() {
        assert!(matches!(parse_header("abc"), Err(ParseIssue::InvalidInteger(_))));
        assert!(matches!(parse_header(""), Err(ParseIssue::InvalidInteger(_))));
        assert!(matches!(parse_header("-3"), Err(ParseIssue::InvalidInteger(_))));
    }

    #[test]
    fn test_term_line_splits_on_first_tab() {
        assert_eq!(parse_term_line("cat\t3\n"), Ok(Some(("cat", 3))));
        assert_eq!(parse_term_line("new york\t12"), Ok(Some(("new york", 12))));
        assert_eq!(parse_term_line("\t5"), Ok(Some(("", 5))));
    }

    #[test]
    fn test_term_line_blank_is_skipped() {
        assert_eq!(parse_term_line(""), Ok(None));
        assert_eq!(parse_term_line("\n"), Ok(None));
        assert_eq!(parse_term_line("\r\n"), Ok(None));
    }

    #[test]
    fn test_term_line_errors() {
        assert_eq!(parse_term_line("cat 3"), Err(ParseIssue::MissingTab));
        assert!(matches!(parse_term_line("cat\t"), Err(ParseIssue::InvalidInteger(_))));
        assert!(matches!(parse_term_line("cat\t\r\n"), Err(ParseIssue::InvalidInteger(_))));
        assert!(matches!(parse_term_line("cat\tmany"), Err(ParseIssue::InvalidInteger(_))));
        assert!(matches!(parse_term_line("cat\t3\t4"), Err(ParseIssue::InvalidInteger(_))));
    }

    #[test]
    fn test_whitespace_only_lines_are_malformed() {
        assert!(matches!(parse_term_line("\t"), Err(ParseIssue::InvalidInteger(_))));
        assert_eq!(parse_term_line("   "), Err(ParseIssue::MissingTab));
        assert_eq!(parse_term_line("   \r\n"), Err(ParseIssue::MissingTab));
    }

    #[test]
    fn test_reader_rejects_tab_only_line() {
        let mut r = reader("5\ncat\t1\n\t\n");
        r.read_header().unwrap();
        assert!(r.next().unwrap().is_ok());
        match r.next().unwrap() {
            Err(MergeError::Parse { line, issue, .. }) => {
                assert_eq!(line, 3);
                assert!(matches!(issue, ParseIssue::InvalidInteger(_)));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_reader_invalid_utf8_is_parse_error_on_its_line() {
        let bytes = b"5\ncat\t1\ncaf\xe9\t2\ndog\t3\n".to_vec();
        let mut r = ShardReader::from_reader(Path::new("mem"), Cursor::new(bytes));
        r.read_header().unwrap();
        assert!(r.next().unwrap().is_ok());
        match r.next().unwrap() {
            Err(MergeError::Parse { line, issue, content, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(issue, ParseIssue::InvalidUtf8);
                assert!(content.starts_with("caf"), "{}", content);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        let rest = r.next().unwrap().unwrap();
        assert_eq!(rest, TermRecord { term: "dog".into(), count: 3, line: 4 });
        assert!(r.next().is_none());
    }

    #[test]
    fn test_reader_crlf_line_endings() {
        let mut r = reader("7\r\ncat\t3\r\n");
        assert_eq!(r.read_header().unwrap(), 7);
        let rec = r.next().unwrap().unwrap();
        assert_eq!(rec, TermRecord { term: "cat".into(), count: 3, line: 2 });
    }

    #[test]
    fn test_reader_yields_records_with_line_numbers() {
        let mut r = reader("10\ncat\t3\n\ndog\t2\n");
        assert_eq!(r.read_header().unwrap(), 10);
        let records: Vec<TermRecord> = r.map(|rec| rec.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], TermRecord { term: "cat".into(), count: 3, line: 2 });
        assert_eq!(records[1], TermRecord { term: "dog".into(), count: 2, line: 4 });
    }

    #[test]
    fn test_reader_empty_file_is_missing_header() {
        let mut r = reader("");
        match r.read_header() {
            Err(MergeError::Parse { issue, line, .. }) => {
                assert_eq!(issue, ParseIssue::MissingHeader);
                assert_eq!(line, 0);
            }
            other => panic!("expected missing header, got {:?}", other),
        }
    }

    #[test]
    fn test_reader_reports_bad_record_line() {
        let mut r = reader("5\nok\t1\nbroken\n");
        r.read_header().unwrap();
        assert!(r.next().unwrap().is_ok());
        match r.next().unwrap() {
            Err(MergeError::Parse { line, content, issue, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "broken");
                assert_eq!(issue, ParseIssue::MissingTab);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(r.next().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let result = ShardReader::open(Path::new("/nonexistent/shard/termStats"));
        assert!(matches!(result, Err(MergeError::FileAccess { .. })));
    }
}
