//! Program representation and text loading.
//!
//! A program is a memory image: one line of comma-separated, optionally
//! signed decimal integers.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// An Intcode program: the initial memory image of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// The memory words, starting at address 0.
    pub words: Vec<i64>,
}

impl Program {
    /// Create a program from its memory words.
    pub fn new(words: Vec<i64>) -> Self {
        Self { words }
    }

    /// Parse one line of comma-separated integers.
    ///
    /// Whitespace around each token is ignored, and so is a single trailing
    /// comma.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let line = line.strip_suffix(',').unwrap_or(line);
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        let words = line
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| ParseError::InvalidInteger {
                    index,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { words })
    }

    /// Parse every non-empty line of `text` as a separate program.
    pub fn parse_all(text: &str) -> Result<Vec<Self>, ParseError> {
        let programs = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if programs.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(programs)
    }

    /// Number of words in the image.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the image has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{word}")?;
        }
        Ok(())
    }
}

impl From<Vec<i64>> for Program {
    fn from(words: Vec<i64>) -> Self {
        Self::new(words)
    }
}
