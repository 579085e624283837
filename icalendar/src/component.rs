use std::borrow::Cow;

use crate::{
    error::{ParserError, ParserErrorKind},
    lexer::Lexer,
    line::Line,
};

/// A `BEGIN:<name>` .. `END:<name>` block with the properties directly inside it.
///
/// Nested components are not kept.
#[derive(Debug, PartialEq)]
pub struct Component<'src> {
    name: Cow<'src, str>,
    line: usize,
    properties: Vec<Line<'src>>,
}

impl<'src> Component<'src> {
    /// Parse the body of the component opened by `begin`, up to and including its `END` line.
    pub(crate) fn parse(begin: Line<'src>, lexer: &mut Lexer<'src>) -> Result<Self, ParserError> {
        let mut properties = vec![];
        loop {
            let Some(line) = lexer.take_next()? else {
                return Err(ParserError::new(
                    lexer.line_number(),
                    ParserErrorKind::UnexpectedEof(begin.value.into_owned()),
                ));
            };
            if line.name.matches("BEGIN") {
                tracing::trace!(component = %line.value, "skipping nested component");
                lexer.skip_current(&line)?;
            } else if line.name.matches("END") {
                if !line.value.eq_ignore_ascii_case(&begin.value) {
                    return Err(ParserError::new(
                        line.number,
                        ParserErrorKind::MismatchedEnd {
                            expected: begin.value.into_owned(),
                            found: line.value.into_owned(),
                        },
                    ));
                }
                break;
            } else {
                properties.push(line);
            }
        }
        Ok(Component {
            name: begin.value,
            line: begin.number,
            properties,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical line of the `BEGIN`
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn properties(&self) -> &[Line<'src>] {
        &self.properties
    }

    /// First property called `name`, if any.
    pub fn property(&self, name: &str) -> Option<&Line<'src>> {
        self.properties.iter().find(|line| line.name.matches(name))
    }
}
