//! Splits unfolded lines into name, parameters and value

use std::{borrow::Cow, fmt};

use crate::error::{ParserError, ParserErrorKind};

type Result<T, E = ParserErrorKind> = std::result::Result<T, E>;

/// Parsed content line
///
/// Intermediate stage in calendar parsing. The value is kept raw: escapes are not decoded.
#[derive(Debug, PartialEq)]
pub struct Line<'src> {
    pub number: usize,
    pub name: Name<'src>,
    pub params: Vec<Param<'src>>,
    pub value: Cow<'src, str>,
}

impl<'src> Line<'src> {
    pub(crate) fn parse(number: usize, input: Cow<'src, str>) -> Result<Self, ParserError> {
        Self::parse_inner(number, input).map_err(|kind| ParserError::new(number, kind))
    }

    fn parse_inner(number: usize, input: Cow<'src, str>) -> Result<Self> {
        // names never contain ':' and param values can only contain it between quotes
        let (prefix, value) = match try_split_once_outside_quotes(input, ':') {
            Ok(v) => v,
            Err(input) => return Err(ParserErrorKind::MissingColon(input.into_owned())),
        };
        let (name, mut rest) = split_once_outside_quotes(prefix, ';');
        let name = Name::parse(name)?;

        let mut params = vec![];
        while !rest.is_empty() {
            let (param, tail) = split_once_outside_quotes(rest, ';');
            params.push(Param::parse(param)?);
            rest = tail;
        }
        Ok(Line {
            number,
            name,
            params,
            value,
        })
    }

    /// Whether this is `BEGIN:<component>`
    pub fn is_begin(&self, component: &str) -> bool {
        self.name.matches("BEGIN") && self.value.eq_ignore_ascii_case(component)
    }

    /// First parameter called `name`, if any.
    pub fn param(&self, name: &str) -> Option<&Param<'src>> {
        self.params.iter().find(|param| param.name.matches(name))
    }
}

/// Property or parameter name. Names are case-insensitive.
#[derive(Debug, PartialEq)]
pub enum Name<'src> {
    /// Extension name, starting `X-`
    XName(Cow<'src, str>),
    Iana(Cow<'src, str>),
}

impl<'src> Name<'src> {
    fn parse(input: Cow<'src, str>) -> Result<Self> {
        // we accept anything matching the `iana-token` BNF, not just registered names
        if input.is_empty() || !input.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-') {
            return Err(ParserErrorKind::InvalidName(input.into_owned()));
        }
        if matches!(input.get(0..2), Some(prefix) if prefix.eq_ignore_ascii_case("X-")) {
            Ok(Name::XName(input))
        } else {
            Ok(Name::Iana(input))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Name::XName(name) | Name::Iana(name) => name,
        }
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, Name::XName(_))
    }

    pub fn matches(&self, other: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub struct Param<'src> {
    pub name: Name<'src>,
    /// Comma-separated values, at least one. Quotes are removed.
    pub values: Vec<Cow<'src, str>>,
}

impl<'src> Param<'src> {
    fn parse(input: Cow<'src, str>) -> Result<Self> {
        let (name, mut rest) = match try_split_once_outside_quotes(input, '=') {
            Ok(v) => v,
            Err(input) => return Err(ParserErrorKind::MissingParamValue(input.into_owned())),
        };
        let name = Name::parse(name)?;

        let mut values = vec![];
        loop {
            let (value, tail) = split_once_outside_quotes(rest, ',');
            values.push(param_value(value)?);
            if tail.is_empty() {
                break;
            }
            rest = tail;
        }
        Ok(Param { name, values })
    }

    pub fn first_value(&self) -> &str {
        // Panic: parsing always produces at least one value
        &self.values[0]
    }
}

fn param_value(input: Cow<'_, str>) -> Result<Cow<'_, str>> {
    if input.starts_with('"') {
        quoted_string(input)
    } else {
        match input.chars().find(|ch| !is_safe_char(*ch)) {
            Some(ch) => Err(ParserErrorKind::UnsafeChar(ch)),
            None => Ok(input),
        }
    }
}

/// Returns `input` without the start and end quotes
fn quoted_string(input: Cow<'_, str>) -> Result<Cow<'_, str>> {
    if input.len() < 2 || !input.ends_with('"') {
        return Err(ParserErrorKind::UnterminatedQuote);
    }
    let end = input.len() - 1;
    if let Some(ch) = input[1..end].chars().find(|ch| !is_safe_char(*ch)) {
        return Err(ParserErrorKind::UnsafeChar(ch));
    }
    Ok(split_around(input, end, 1, 1).0)
}

/// `,`, `;` and `:` are handled by the splitting, so only need to be quoted to be accepted
fn is_safe_char(ch: char) -> bool {
    !ch.is_control() && ch != '"'
}

/// Byte index of the first `delim` that is not between double quotes.
fn find_outside_quotes(input: &str, delim: char) -> Option<usize> {
    let mut quoted = false;
    for (idx, ch) in input.char_indices() {
        if ch == '"' {
            quoted = !quoted;
        } else if ch == delim && !quoted {
            return Some(idx);
        }
    }
    None
}

/// Split `input` into `input[..at]` and `input[at + skip..]`, owned -> owned.
///
/// When `input` is owned, the first part reuses its allocation.
fn split_around<'a>(
    input: Cow<'a, str>,
    at: usize,
    skip: usize,
    // bytes to drop from the front of the first part (used to strip quotes)
    front: usize,
) -> (Cow<'a, str>, Cow<'a, str>) {
    match input {
        Cow::Borrowed(s) => (Cow::Borrowed(&s[front..at]), Cow::Borrowed(&s[at + skip..])),
        Cow::Owned(mut s) => {
            let after = s.split_off(at + skip);
            s.truncate(at);
            s.drain(..front);
            (Cow::Owned(s), Cow::Owned(after))
        }
    }
}

/// Like `str::split_once`, but only splits outside quoted strings.
///
/// Returns the original string if the split was not possible
fn try_split_once_outside_quotes(
    input: Cow<'_, str>,
    delim: char,
) -> Result<(Cow<'_, str>, Cow<'_, str>), Cow<'_, str>> {
    match find_outside_quotes(&input, delim) {
        Some(idx) => Ok(split_around(input, idx, delim.len_utf8(), 0)),
        None => Err(input),
    }
}

/// Split outside quoted strings, or return everything in `.0` if `delim` isn't found.
fn split_once_outside_quotes(input: Cow<'_, str>, delim: char) -> (Cow<'_, str>, Cow<'_, str>) {
    match try_split_once_outside_quotes(input, delim) {
        Ok(v) => v,
        Err(input) => (input, Cow::Borrowed("")),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{Line, Name, Param};
    use crate::error::ParserErrorKind;

    #[test]
    fn parse_line() {
        let input = "DTSTART;TZID=Europe/Stockholm;X-opt=\"a:b\",c:20240304T090000";
        let expected = Line {
            number: 3,
            name: Name::Iana(Cow::Borrowed("DTSTART")),
            params: vec![
                Param {
                    name: Name::Iana(Cow::Borrowed("TZID")),
                    values: vec![Cow::Borrowed("Europe/Stockholm")],
                },
                Param {
                    name: Name::XName(Cow::Borrowed("X-opt")),
                    values: vec![Cow::Borrowed("a:b"), Cow::Borrowed("c")],
                },
            ],
            value: Cow::Borrowed("20240304T090000"),
        };

        // borrowed
        let output = Line::parse(3, Cow::Borrowed(input)).unwrap();
        assert_eq!(output, expected);

        // owned
        let output = Line::parse(3, Cow::Owned(input.to_string())).unwrap();
        assert_eq!(output, expected);
    }

    #[test]
    fn value_keeps_colons_and_backslashes() {
        let output = Line::parse(1, Cow::Borrowed("SUMMARY:CS101\\Lab: part 1")).unwrap();
        assert!(output.name.matches("summary"));
        assert!(output.params.is_empty());
        assert_eq!(output.value, "CS101\\Lab: part 1");
    }

    #[test]
    fn begin_is_case_insensitive() {
        let output = Line::parse(1, Cow::Borrowed("begin:vevent")).unwrap();
        assert!(output.is_begin("VEVENT"));
        assert!(!output.is_begin("VALARM"));
    }

    #[test]
    fn param_lookup() {
        let output = Line::parse(1, Cow::Borrowed("DTEND;VALUE=DATE:20240304")).unwrap();
        assert_eq!(output.param("value").map(Param::first_value), Some("DATE"));
        assert!(output.param("TZID").is_none());
    }

    #[test]
    fn extension_name() {
        let output = Line::parse(1, Cow::Borrowed("X-WR-CALNAME:Timetable")).unwrap();
        assert!(output.name.is_extension());
        assert_eq!(output.name.to_string(), "X-WR-CALNAME");
    }

    #[test]
    fn missing_colon() {
        let err = Line::parse(7, Cow::Borrowed("not a content line")).unwrap_err();
        assert_eq!(err.line(), 7);
        assert_eq!(
            err.kind(),
            &ParserErrorKind::MissingColon("not a content line".into())
        );
    }

    #[test]
    fn invalid_name() {
        let err = Line::parse(1, Cow::Borrowed("BAD NAME:value")).unwrap_err();
        assert_eq!(err.kind(), &ParserErrorKind::InvalidName("BAD NAME".into()));
    }

    #[test]
    fn unterminated_quote() {
        let err = Line::parse(1, Cow::Borrowed("A;B=\"open:value\"")).unwrap_err();
        // the only ':' is quoted so there is nothing to split on
        assert!(matches!(err.kind(), ParserErrorKind::MissingColon(_)));

        let err = Line::parse(1, Cow::Borrowed("A;B=\"x\"y:value")).unwrap_err();
        assert_eq!(err.kind(), &ParserErrorKind::UnterminatedQuote);
    }
}
