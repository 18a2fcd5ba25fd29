//! Character-level cursor over game-record text.
//!
//! The scanner tracks line and column for error reporting and knows how to
//! lex the small pieces of the format: tag names, quoted tag values, and
//! movetext words with their comments, NAGs and variations skipped.

use std::fmt;
use thiserror::Error;

/// A 1-based line and column in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    pub const START: TextPosition = TextPosition { line: 1, column: 1 };

    /// Returns the position `n` characters further along the same line.
    pub const fn advanced(self, n: usize) -> Self {
        TextPosition {
            line: self.line,
            column: self.column + n,
        }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while reading game records.
///
/// Each lexical variant carries the position where the problem starts.
#[derive(Debug, Error)]
pub enum PgnError {
    #[error("{at}: unterminated tag value")]
    UnterminatedTagValue { at: TextPosition },

    #[error("{at}: malformed tag: {reason}")]
    MalformedTag {
        at: TextPosition,
        reason: &'static str,
    },

    #[error("{at}: unterminated comment")]
    UnterminatedComment { at: TextPosition },

    #[error("{at}: unexpected end of input")]
    UnexpectedEof { at: TextPosition },

    #[error("{at}: unexpected token '{token}'")]
    UnexpectedToken { at: TextPosition, token: String },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl PgnError {
    /// Returns where in the text the error occurred, if it came from the text.
    pub fn position(&self) -> Option<TextPosition> {
        match self {
            PgnError::UnterminatedTagValue { at }
            | PgnError::MalformedTag { at, .. }
            | PgnError::UnterminatedComment { at }
            | PgnError::UnexpectedEof { at }
            | PgnError::UnexpectedToken { at, .. } => Some(*at),
            PgnError::Io(_) => None,
        }
    }
}

/// A whitespace-delimited movetext word and where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub at: TextPosition,
}

/// Cursor over the characters of a game record.
#[derive(Debug, Clone)]
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    at: TextPosition,
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        Scanner {
            chars: text.chars().collect(),
            pos: 0,
            at: TextPosition::START,
        }
    }

    /// Returns the next character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Returns the position of the next character.
    #[inline]
    pub fn position(&self) -> TextPosition {
        self.at
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Consumes and returns the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.at.line += 1;
            self.at.column = 1;
        } else {
            self.at.column += 1;
        }
        Some(c)
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consumes everything up to and including the next newline.
    pub fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Reads an unquoted tag name, stopping before whitespace, a quote or `]`.
    pub fn read_tag_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '"' | '\'' | ']') {
                break;
            }
            name.push(c);
            self.bump();
        }
        name
    }

    /// Reads a quoted tag value. `\"` and `\\` escape the quote and the
    /// backslash; any other escaped character is taken literally.
    pub fn read_quoted(&mut self, allow_single_quotes: bool) -> Result<String, PgnError> {
        let at = self.position();
        let quote = match self.bump() {
            Some('"') => '"',
            Some('\'') if allow_single_quotes => '\'',
            Some(_) => {
                return Err(PgnError::MalformedTag {
                    at,
                    reason: "tag value must be quoted",
                })
            }
            None => return Err(PgnError::UnexpectedEof { at }),
        };

        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(PgnError::UnterminatedTagValue { at }),
                Some('\\') => match self.bump() {
                    Some(c) => value.push(c),
                    None => return Err(PgnError::UnterminatedTagValue { at }),
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
            }
        }
    }

    /// Returns the next movetext word, or `None` at end of input.
    ///
    /// Brace comments, `;` comments and `$n` annotation glyphs are skipped.
    /// Parenthesised variations are skipped when `skip_variations` is set
    /// and rejected otherwise.
    pub fn movetext_token(&mut self, skip_variations: bool) -> Result<Option<Token>, PgnError> {
        loop {
            self.skip_whitespace();
            let at = self.position();
            match self.peek() {
                None => return Ok(None),
                Some('{') => self.skip_brace_comment()?,
                Some(';') => self.skip_line(),
                Some('(') if skip_variations => self.skip_variation()?,
                Some(c @ ('(' | ')')) => {
                    self.bump();
                    return Err(PgnError::UnexpectedToken {
                        at,
                        token: c.to_string(),
                    });
                }
                Some('$') => {
                    self.read_word();
                }
                Some(_) => {
                    let text = self.read_word();
                    return Ok(Some(Token { text, at }));
                }
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '{' | '(' | ')' | ';') {
                break;
            }
            word.push(c);
            self.bump();
        }
        word
    }

    fn skip_brace_comment(&mut self) -> Result<(), PgnError> {
        let at = self.position();
        self.bump();
        loop {
            match self.bump() {
                Some('}') => return Ok(()),
                Some(_) => {}
                None => return Err(PgnError::UnterminatedComment { at }),
            }
        }
    }

    fn skip_variation(&mut self) -> Result<(), PgnError> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => {
                    return Err(PgnError::UnexpectedEof {
                        at: self.position(),
                    })
                }
                Some('{') => self.skip_brace_comment()?,
                Some(';') => self.skip_line(),
                Some(c) => {
                    self.bump();
                    if c == '(' {
                        depth += 1;
                    } else if c == ')' {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}
