use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// Location of a token in the schema source (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Equals,     // =
    Pipe,       // |
    OpenParen,  // (
    CloseParen, // )
    OpenBrace,  // {
    CloseBrace, // }
    Comma,      // ,
    Star,       // *
    Question,   // ?
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Equals => f.write_str("'='"),
            TokenKind::Pipe => f.write_str("'|'"),
            TokenKind::OpenParen => f.write_str("'('"),
            TokenKind::CloseParen => f.write_str("')'"),
            TokenKind::OpenBrace => f.write_str("'{'"),
            TokenKind::CloseBrace => f.write_str("'}'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Star => f.write_str("'*'"),
            TokenKind::Question => f.write_str("'?'"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character {ch:?} at {position}")]
    UnexpectedChar { ch: char, position: Position },
}

/// Tokenizer for the ASDL notation. `--` starts a comment that runs to the
/// end of the line.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /* Collect every token up to and including Eof */
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }

    fn current_position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('-') if self.rest().starts_with("--") => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn rest(&mut self) -> &'a str {
        let source = self.source;
        let offset = self.offset();
        &source[offset..]
    }

    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.source.len())
    }

    fn lex_ident(&mut self) -> String {
        let start = self.offset();
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let end = self.offset();
        self.source[start..end].to_string()
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();
        let position = self.current_position();

        let c = match self.peek_char() {
            Some(c) => c,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    position,
                })
            }
        };

        if c.is_ascii_alphabetic() || c == '_' {
            let name = self.lex_ident();
            return Ok(Token {
                kind: TokenKind::Ident(name),
                position,
            });
        }

        let kind = match c {
            '=' => TokenKind::Equals,
            '|' => TokenKind::Pipe,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ',' => TokenKind::Comma,
            '*' => TokenKind::Star,
            '?' => TokenKind::Question,
            other => {
                return Err(LexError::UnexpectedChar {
                    ch: other,
                    position,
                })
            }
        };
        self.bump();
        Ok(Token { kind, position })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        match &token {
            Ok(Token {
                kind: TokenKind::Eof,
                ..
            })
            | Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .expect("source should lex")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn lexes_field_with_sequence_marker() {
        assert_eq!(
            kinds("(word* parts, int? n)"),
            vec![
                TokenKind::OpenParen,
                TokenKind::Ident("word".into()),
                TokenKind::Star,
                TokenKind::Ident("parts".into()),
                TokenKind::Comma,
                TokenKind::Ident("int".into()),
                TokenKind::Question,
                TokenKind::Ident("n".into()),
                TokenKind::CloseParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            kinds("a -- ignored = | (\nb"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = Lexer::new("module m\n  {").tokenize().unwrap();
        assert_eq!(tokens[0].position, Position { line: 1, column: 1 });
        assert_eq!(tokens[1].position, Position { line: 1, column: 8 });
        assert_eq!(tokens[2].position, Position { line: 2, column: 3 });
    }

    #[test]
    fn punctuation_carries_its_own_position() {
        let tokens = Lexer::new("p = (int* xs)").tokenize().unwrap();
        let columns: Vec<usize> = tokens.iter().map(|t| t.position.column).collect();
        assert_eq!(columns, vec![1, 3, 5, 6, 9, 11, 13, 14]);
    }

    #[test]
    fn lexer_is_a_plain_token_iterator() {
        let index = Lexer::new("a = b").position(|token| {
            matches!(token, Ok(Token { kind: TokenKind::Equals, .. }))
        });
        assert_eq!(index, Some(1));
    }

    #[test]
    fn rejects_unknown_characters() {
        let err = Lexer::new("a = $").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedChar {
                ch: '$',
                position: Position { line: 1, column: 5 },
            }
        );
    }

    #[test]
    fn single_dash_is_not_a_comment() {
        assert!(Lexer::new("a - b").tokenize().is_err());
    }
}
