//! ASCII conversation helpers.
//!
//! Many programs talk in text: they read commands as character codes
//! terminated by a newline and print their replies the same way, usually
//! finishing with one large non-ASCII value (the answer).

use crate::machine::Machine;

const NEWLINE: i64 = b'\n' as i64;

/// Encode one line of text as input words, newline terminated.
pub fn encode_line(line: &str) -> Vec<i64> {
    let mut words: Vec<i64> = line.chars().map(|c| c as i64).collect();
    words.push(NEWLINE);
    words
}

/// Encode several lines, each newline terminated.
pub fn encode_lines<I, S>(lines: I) -> Vec<i64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .flat_map(|line| encode_line(line.as_ref()))
        .collect()
}

/// Output split into its text and its non-ASCII values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoded {
    pub text: String,
    /// Values outside `0..=127`, in emission order.
    pub values: Vec<i64>,
}

/// Split raw output into text and non-ASCII values.
pub fn decode(output: &[i64]) -> Decoded {
    let mut decoded = Decoded::default();
    for &value in output {
        match u8::try_from(value) {
            Ok(byte) if byte.is_ascii() => decoded.text.push(char::from(byte)),
            _ => decoded.values.push(value),
        }
    }
    decoded
}

impl Machine {
    /// Queue one line of text as input.
    pub fn append_ascii(&mut self, line: &str) {
        self.append_input(&encode_line(line));
    }

    /// Drain the output and decode it.
    pub fn take_ascii(&mut self) -> Decoded {
        decode(&self.take_output())
    }
}
