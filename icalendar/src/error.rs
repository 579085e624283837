use thiserror::Error;

/// Couldn't parse the input as an iCalendar document.
// This error is only built if the parse failed (unrecoverable error)
// so we are less bothered about the size of the variants
#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParserError {
    line: usize,
    kind: ParserErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserErrorKind {
    #[error("malformed content line `{0}`: no `:` before the value")]
    MissingColon(String),
    #[error("`{0}` is not a valid name")]
    InvalidName(String),
    #[error("invalid parameter `{0}`: no `=`")]
    MissingParamValue(String),
    #[error("quoted parameter value must start and end with `\"`")]
    UnterminatedQuote,
    #[error("`{0:?}` is not allowed in a parameter value")]
    UnsafeChar(char),
    #[error("expected `END:{expected}`, found `END:{found}`")]
    MismatchedEnd { expected: String, found: String },
    #[error("input ended inside `{0}`")]
    UnexpectedEof(String),
}

impl ParserError {
    pub(crate) fn new(line: usize, kind: ParserErrorKind) -> Self {
        Self { line, kind }
    }

    /// Physical line (1-based) where the problem was found.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> &ParserErrorKind {
        &self.kind
    }
}
