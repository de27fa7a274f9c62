use std::io::{self, BufRead, Write};

/// Line-based question/answer over any reader and writer, stdin and stdout in the binary.
pub(crate) struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `question` and reads one trimmed line, end of input is an `UnexpectedEof` error.
    pub(crate) fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        Ok(line.trim().to_owned())
    }

    /// Asks until the answer is an integer within `min..=max`.
    pub(crate) fn request_number(&mut self, question: &str, min: u32, max: u32) -> io::Result<u32> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<u32>() {
                Ok(number) if number < min => {
                    writeln!(self.output, "The smallest number allowed is {min}")?;
                }
                Ok(number) if number > max => {
                    writeln!(self.output, "The largest number allowed is {max}")?;
                }
                Ok(number) => return Ok(number),
                Err(_) => {
                    writeln!(
                        self.output,
                        "Please enter an integer between {min} and {max}"
                    )?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reprompts_until_in_range() {
        let mut prompt = Prompt::new(Cursor::new("abc\n2\n31\n 12 \n"), Vec::new());

        let number = prompt.request_number("Minefield width: ", 3, 30).unwrap();

        assert_eq!(number, 12);
        let output = String::from_utf8(prompt.output).unwrap();
        assert!(output.contains("Please enter an integer between 3 and 30"));
        assert!(output.contains("The smallest number allowed is 3"));
        assert!(output.contains("The largest number allowed is 30"));
        assert_eq!(output.matches("Minefield width: ").count(), 4);
    }

    #[test]
    fn negative_numbers_are_not_integers_in_range() {
        let mut prompt = Prompt::new(Cursor::new("-4\n5\n"), Vec::new());

        assert_eq!(prompt.request_number("Mines: ", 1, 9).unwrap(), 5);
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut prompt = Prompt::new(Cursor::new("abc\n"), Vec::new());

        let err = prompt.request_number("Mines: ", 1, 9).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
