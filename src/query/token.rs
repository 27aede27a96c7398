//! Lexical analysis for query strings.
//!
//! The tokenizer is a forward-only cursor over one line of input. Each call to
//! [`Tokenizer::next_token`] consumes the next lexical unit; once the input is
//! exhausted every further call returns [`Token::End`]. There is no peek or
//! pushback — a grammar that needs lookahead buffers one token itself.
//!
//! The tokenizer never fails: any character that is not whitespace and cannot
//! extend an identifier comes back as a one-character [`Token::Symbol`], and
//! it is the parser's job to decide what to do with it.

use std::iter::Peekable;
use std::str::Chars;

/// Keywords recognized by the query grammar, matched case-insensitively.
const KEYWORDS: [&str; 3] = ["SELECT", "FROM", "WHERE"];

/// Represents different types of query tokens
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// Keywords in the grammar (SELECT, FROM, WHERE)
    Keyword(String),
    /// Identifiers like bucket names, object names, column names
    Identifier(String),
    /// Special characters and operators
    Symbol(char),
    /// End of input; repeats forever once reached
    End,
}

impl Token {
    /// The raw text of the token. `End` has no text.
    pub fn text(&self) -> String {
        match self {
            Token::Keyword(word) | Token::Identifier(word) => word.clone(),
            Token::Symbol(c) => c.to_string(),
            Token::End => String::new(),
        }
    }
}

/// Returns true for characters that may appear in an identifier.
///
/// Object names are path-like, so `.`, `-` and `_` count; `/` does not — the
/// parser reassembles paths from identifier and slash tokens.
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '.' || c == '-' || c == '_'
}

/// A pull-based scanner over one query line.
///
/// Holds no state beyond the cursor, so each parse owns its own instance and
/// independent parses never coordinate.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Scans and returns the next token, advancing the cursor past it.
    pub fn next_token(&mut self) -> Token {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
                continue;
            }

            if is_identifier_char(c) {
                return self.scan_word();
            }

            // Anything else is a single-character symbol, recognized or not.
            self.chars.next();
            return Token::Symbol(c);
        }

        Token::End
    }

    /// Consumes the longest run of identifier characters and classifies it.
    fn scan_word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(&c) = self.chars.peek() {
            if is_identifier_char(c) {
                word.push(c);
                self.chars.next();
            } else {
                break;
            }
        }

        if KEYWORDS.contains(&word.to_uppercase().as_str()) {
            Token::Keyword(word)
        } else {
            Token::Identifier(word)
        }
    }
}
