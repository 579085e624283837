use crate::{
    error::{ParserError, ParserErrorKind},
    line::Line,
    line_iter::LineIter,
};

/// this is kinda like a lexer so call it that, even though it's not exactly
pub(crate) struct Lexer<'src> {
    input: LineIter<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            input: LineIter::new(input),
        }
    }

    pub fn take_next(&mut self) -> Result<Option<Line<'src>>, ParserError> {
        self.input
            .next()
            .map(|(number, line)| Line::parse(number, line))
            .transpose()
    }

    /// Physical line number of the last line read.
    pub fn line_number(&self) -> usize {
        self.input.consumed()
    }

    /// Assume we just read `begin`. Skip past the matching end.
    pub fn skip_current(&mut self, begin: &Line<'_>) -> Result<(), ParserError> {
        let mut depth = 1;
        while let Some(line) = self.take_next()? {
            if line.name.matches("BEGIN") {
                depth += 1;
            } else if line.name.matches("END") {
                depth -= 1;
            }
            if depth == 0 {
                return Ok(());
            }
        }
        Err(ParserError::new(
            self.line_number(),
            ParserErrorKind::UnexpectedEof(begin.value.to_string()),
        ))
    }
}
