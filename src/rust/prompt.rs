//! Line-oriented interactive classification.

use std::io::{self, BufRead, Write};

use crate::classifier::Classifier;

/// The line that ends the interactive loop. Matched exactly, case-sensitive.
pub const EXIT_COMMAND: &str = "exit";

/// Reads titles from `input` and writes their classification to `output`.
///
/// Each line has its trailing line terminator stripped and is decoded leniently,
/// invalid UTF-8 becoming `U+FFFD`. The loop stops on the
/// exact line `exit` or at end of input. Titles the classifier cannot label
/// are reported with an empty label.
///
/// Returns the number of titles classified.
pub fn run<R: BufRead, W: Write>(classifier: &Classifier, mut input: R, mut output: W) -> io::Result<usize> {
    let mut line = Vec::new();
    let mut classified = 0usize;

    loop {
        write!(output, "Enter a title: ")?;
        output.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let title = line.strip_suffix(b"\n").unwrap_or(&line);
        let title = title.strip_suffix(b"\r").unwrap_or(title);
        let title = String::from_utf8_lossy(title);
        if title == EXIT_COMMAND {
            writeln!(output, "Exiting program...")?;
            break;
        }

        let label = classifier.classify_text(&title).unwrap_or_default();
        writeln!(output, "Classification: {}", label)?;
        classified += 1;
    }

    Ok(classified)
}
