//! Interactive start letter prompt

use std::io::{self, BufRead, Write};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("IO error while prompting: {0}")]
    IoError(io::Error),
    #[error("no drive letter given before end of input")]
    EndOfInput,
}

impl From<io::Error> for PromptError {
    fn from(error: io::Error) -> Self {
        PromptError::IoError(error)
    }
}

/// Parse one line of operator input.
///
/// Empty input selects `default`; a single ASCII letter (either case) selects
/// that letter in lowercase. Anything else is `None`.
pub fn parse_letter(line: &str, default: char) -> Option<char> {
    let line = line.trim_end_matches(['\n', '\r']).to_lowercase();
    let mut chars = line.chars();

    match (chars.next(), chars.next()) {
        (None, _) => Some(default),
        (Some(letter), None) if letter.is_ascii_lowercase() => Some(letter),
        _ => None,
    }
}

/// Ask for the first drive letter until a valid answer is given
pub fn ask_for_letter<R, W>(
    input: &mut R,
    output: &mut W,
    default: char,
) -> Result<char, PromptError>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(
            output,
            "Automounting from /dev/sdX onwards, starting from letter [default: {}]: ",
            default
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }

        match parse_letter(&line, default) {
            Some(letter) => {
                writeln!(output, "Starting from /dev/sd{}", letter)?;
                return Ok(letter);
            }
            None => log::debug!("rejected drive letter input {:?}", line.trim_end()),
        }
    }
}
