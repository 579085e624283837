use std::borrow::Cow;

/// Lines end in `\r\n` (or a bare `\n`), but a single logical line can be folded over several
/// physical lines by starting each continuation with a space or tab.
///
/// This iterator returns 'unfolded' lines, together with the (1-based) physical line number
/// each of them started on. Blank lines are skipped.
pub struct LineIter<'src> {
    input: &'src str,
    /// Physical line number of the start of `input`
    line_no: usize,
}

impl<'src> LineIter<'src> {
    pub fn new(input: &'src str) -> Self {
        Self { input, line_no: 1 }
    }

    /// Number of physical lines consumed so far.
    pub fn consumed(&self) -> usize {
        self.line_no - 1
    }

    fn advance(&mut self, rest: &'src str) {
        self.input = rest;
        self.line_no += 1;
    }
}

impl<'src> Iterator for LineIter<'src> {
    type Item = (usize, Cow<'src, str>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.input.is_empty() {
                return None;
            }
            let start = self.line_no;
            let (first, rest) = split_physical(self.input);
            self.advance(rest);
            if first.is_empty() {
                continue;
            }

            // only allocate if there is at least 1 continuation line
            let mut output = Cow::Borrowed(first);
            loop {
                let (next, rest) = split_physical(self.input);
                if !next.starts_with([' ', '\t']) {
                    break;
                }
                // first char is ascii whitespace, we are on a char boundary
                output.to_mut().push_str(&next[1..]);
                self.advance(rest);
            }
            return Some((start, output));
        }
    }
}

/// Split off the next physical line (without its terminator) from the rest of the input.
fn split_physical(input: &str) -> (&str, &str) {
    match input.split_once('\n') {
        Some((line, rest)) => (line.strip_suffix('\r').unwrap_or(line), rest),
        None => (input, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::LineIter;

    macro_rules! gen_test {
        ($name:ident : $input:expr => $output:expr) => {
            #[test]
            fn $name() {
                let input = $input;
                let output: Vec<_> = LineIter::new(input).map(|(_, line)| line).collect();
                assert_eq!(output, $output)
            }
        };
    }
    gen_test!(single_line: "SIMPLE:A simple line" => ["SIMPLE:A simple line"]);
    gen_test!(two_lines: "Two\r\nlines" => ["Two", "lines"]);
    gen_test!(bare_newlines: "Two\nlines\n" => ["Two", "lines"]);
    gen_test!(blank_lines: "\r\nOne\r\n\r\n\r\nTwo\r\n" => ["One", "Two"]);
    gen_test!(continue_line: "Line with\r\n  continuation" => ["Line with continuation"]);
    gen_test!(continue_with_tab: "Line with\n\t continuation" => ["Line with continuation"]);
    gen_test!(
        mult_continue_line:
        "First line\r\n  with continuation\r\nSecond line \r\nThird line wi\r\n th continuation" =>
        [
            "First line with continuation",
            "Second line ",
            "Third line with continuation"
        ]
    );

    #[test]
    fn line_numbers() {
        let input = "BEGIN:VEVENT\r\nSUMMARY:A\r\n  B\r\n\r\nEND:VEVENT\r\n";
        let numbers: Vec<_> = LineIter::new(input).map(|(no, _)| no).collect();
        assert_eq!(numbers, [1, 2, 5]);
    }

    #[test]
    fn consumed_counts_folds_and_blanks() {
        let mut iter = LineIter::new("A:1\n B\n\nC:2");
        iter.next();
        assert_eq!(iter.consumed(), 2);
        iter.next();
        assert_eq!(iter.consumed(), 4);
        assert!(iter.next().is_none());
    }
}
