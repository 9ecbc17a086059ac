//! Interactive prompts shown before connecting.

use std::io::{self, BufRead, Write};

/// Print `label [default]: ` and read one line. Blank input or end of input
/// selects the default.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: &str,
) -> io::Result<String> {
    write!(output, "{} [{}]: ", label, default)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// [`ask`] on the process's stdin and stdout.
pub fn ask_stdin(label: &str, default: &str) -> io::Result<String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    ask(&mut input, &mut io::stdout(), label, default)
}
