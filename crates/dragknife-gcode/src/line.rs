//! Line classification and tokenizing
//!
//! A raw line is split into its canonical form (trailing whitespace removed)
//! and the code that takes part in command matching: parenthesized comments
//! are blanked out and everything from a `;` on is dropped. The code is then
//! tokenized into a [`Block`].

use regex::Regex;
use std::sync::OnceLock;

use dragknife_core::GcodeError;

use super::{Block, GWord};

/// A raw input line and the part of it that carries commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Line with trailing whitespace stripped, echoed verbatim on pass-through
    pub raw: String,
    /// Line without its comments
    pub code: String,
}

/// `(...)` comment; an unclosed one runs to the end of the line
fn paren_comment_regex() -> &'static Regex {
    static PAREN_COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    PAREN_COMMENT_REGEX
        .get_or_init(|| Regex::new(r"\([^)]*\)?").expect("invalid regex pattern"))
}

/// Split a raw line into its canonical form and its command code
pub fn classify(line: &str) -> ClassifiedLine {
    let raw = line.trim_end().to_string();
    let stripped = paren_comment_regex().replace_all(&raw, " ");
    let code = match stripped.find(';') {
        Some(start) => stripped[..start].to_string(),
        None => stripped.into_owned(),
    };
    ClassifiedLine { raw, code }
}

/// Tokenize command code into a structured block
///
/// Words are a letter followed by a signed decimal number, case-insensitive,
/// with optional whitespace around them. Only the words the post-processor
/// cares about are recorded; `%` tape markers are ignored.
pub fn parse_block(code: &str) -> Result<Block, GcodeError> {
    let mut block = Block::default();
    let mut chars = code.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() || c == '%' {
            continue;
        }
        if !c.is_ascii_alphabetic() {
            return Err(GcodeError::MalformedWord {
                word: c.to_string(),
                reason: "expected a word letter".to_string(),
            });
        }
        let letter = c.to_ascii_uppercase();

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let mut text = String::new();
        while let Some(&d) = chars.peek() {
            if d.is_ascii_digit() || d == '.' || d == '-' || d == '+' {
                text.push(d);
                chars.next();
            } else {
                break;
            }
        }
        if text.is_empty() {
            return Err(GcodeError::MalformedWord {
                word: letter.to_string(),
                reason: "missing value".to_string(),
            });
        }
        let value = text
            .parse::<f64>()
            .map_err(|e| GcodeError::MalformedWord {
                word: format!("{}{}", letter, text),
                reason: e.to_string(),
            })?;

        match letter {
            'G' => match GWord::classify(value, &text) {
                GWord::Motion(motion) => block.motion = Some(motion),
                GWord::Units(units) => block.units = Some(units),
                GWord::CancelMotion => block.cancel_motion = true,
                GWord::NonMotion => block.non_motion = true,
                GWord::Other => {}
            },
            'X' => block.x = Some(value),
            'Y' => block.y = Some(value),
            'Z' => block.z = Some(value),
            'F' | 'S' => block.has_feed_or_speed = true,
            _ => {}
        }
    }

    Ok(block)
}
