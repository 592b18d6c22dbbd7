//! Yes/no prompts for `agentready align`.

use anyhow::Context;
use std::io::{BufRead, Write};

/// Ask `question` and read one answer line. Only `y`/`yes` accept; EOF declines.
pub fn confirm(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<bool> {
    write!(output, "{question} [y/N] ").context("write prompt")?;
    output.flush().context("flush prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("read answer")?;
    if read == 0 {
        writeln!(output).context("write prompt")?;
        return Ok(false);
    }
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(answer: &str) -> bool {
        let mut out = Vec::new();
        confirm("Apply?", &mut Cursor::new(answer.as_bytes()), &mut out).expect("confirm")
    }

    #[test]
    fn accepts_yes_variants() {
        assert!(ask("y\n"));
        assert!(ask("YES\n"));
        assert!(ask("  yes  \n"));
    }

    #[test]
    fn declines_everything_else() {
        assert!(!ask("n\n"));
        assert!(!ask("\n"));
        assert!(!ask("sure\n"));
        assert!(!ask(""));
    }

    #[test]
    fn writes_question() {
        let mut out = Vec::new();
        confirm("Apply 2 fixes?", &mut Cursor::new(&b"n\n"[..]), &mut out).expect("confirm");
        assert_eq!(String::from_utf8(out).expect("utf8"), "Apply 2 fixes? [y/N] ");
    }
}
