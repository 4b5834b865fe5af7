use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

/// What was wrong with a line that should have carried a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    MissingHeader,
    MissingTab,
    InvalidUtf8,
    InvalidInteger(ParseIntError),
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseIssue::MissingHeader => write!(f, "missing header line"),
            ParseIssue::MissingTab => write!(f, "expected term<TAB>count"),
            ParseIssue::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
            ParseIssue::InvalidInteger(e) => write!(f, "invalid integer ({})", e),
        }
    }
}

impl From<ParseIntError> for ParseIssue {
    fn from(err: ParseIntError) -> Self {
        ParseIssue::InvalidInteger(err)
    }
}

#[derive(Debug)]
pub enum MergeError {
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
        issue: ParseIssue,
    },
    Overflow {
        path: PathBuf,
        line: usize,
    },
    Io(std::io::Error),
}

impl MergeError {
    /// Path of the shard the error came from, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            MergeError::FileAccess { path, .. }
            | MergeError::Parse { path, .. }
            | MergeError::Overflow { path, .. } => Some(path),
            MergeError::Io(_) => None,
        }
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::FileAccess { path, source } => {
                write!(f, "Cannot read {}: {}", path.display(), source)
            }
            MergeError::Parse { path, line, content, issue } => write!(
                f,
                "Parse error in {} at line {}: {} in {:?}",
                path.display(),
                line,
                issue,
                content
            ),
            MergeError::Overflow { path, line } => write!(
                f,
                "Count overflow in {} at line {}",
                path.display(),
                line
            ),
            MergeError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MergeError::FileAccess { source, .. } => Some(source),
            MergeError::Parse {
                issue: ParseIssue::InvalidInteger(e),
                ..
            } => Some(e),
            MergeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        MergeError::Io(err)
    }
}
