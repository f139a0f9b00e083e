use thiserror::Error;

/// Errors that may rise in the grid parsing process.
/// Record related variants carry the offending line,
/// any of them terminates the current stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    /// Wrong record tag, missing label or wrong number of fields
    #[error("malformed record \"{0}\"")]
    MalformedRecord(String),
    /// A token that should be a float is not
    #[error("failed to parse float from \"{0}\"")]
    NumericParse(String),
    /// Stream ended while reading the PCV values of an antenna
    #[error("unexpected end of stream: expected {expected} pcv values, got {found}")]
    UnexpectedEndOfStream { expected: usize, found: usize },
    /// Stream ended before the grid definition of an antenna was complete
    #[error("\"{label}\": missing {record} record")]
    MissingRecord { label: String, record: String },
    /// End of antenna marker encountered before the block was complete
    #[error("premature end of antenna: expected {expected} pcv values, got {found}")]
    PrematureEndOfAntenna { expected: usize, found: usize },
    /// Axis definition that does not describe a single grid point
    #[error("invalid axis definition \"{0}\"")]
    InvalidAxis(String),
    /// Too many consecutive lines skipped while searching for the next antenna
    #[error("no antenna record found within {0} consecutive lines")]
    TooManySkippedLines(usize),
}

/// Crate level errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),
    #[error("file i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pcv grid expects {expected} values, got {found}")]
    ValueCount { expected: usize, found: usize },
    #[error("antenna grids do not share the same axes")]
    GridMismatch,
}
