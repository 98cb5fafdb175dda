use crate::lexer::{LexError, Lexer, Position, Token, TokenKind};
use asdl_types::{Constructor, Field, Module, Product, Sum, TypeBody, TypeDef};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at {position}")]
    Unexpected {
        expected: &'static str,
        found: TokenKind,
        position: Position,
    },

    #[error("type '{name}' is defined more than once (second definition at {position})")]
    DuplicateType { name: String, position: Position },

    #[error("field '{field}' is declared more than once in '{owner}' (at {position})")]
    DuplicateField {
        owner: String,
        field: String,
        position: Position,
    },
}

/// Parse ASDL source text into a schema module.
pub fn parse_asdl(source: &str) -> Result<Module, ParseError> {
    Parser::new(source)?.parse_module()
}

/// Recursive-descent parser for the ASDL notation:
///
/// ```text
/// module      := "module" Ident "{" definition* "}"
/// definition  := Ident "=" ( product | sum )
/// product     := fields [ "attributes" fields ]
/// sum         := constructor ( "|" constructor )* [ "attributes" fields ]
/// constructor := Ident [ fields ]
/// fields      := "(" field ( "," field )* ")"
/// field       := Ident [ "*" | "?" ] Ident
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }

    fn current(&self) -> &Token {
        /* tokenize() always ends with Eof, so the last token is a safe fallback */
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        ParseError::Unexpected {
            expected,
            found: token.kind.clone(),
            position: token.position,
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Position, ParseError> {
        if self.current().kind == kind {
            Ok(self.advance().position)
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<(String, Position), ParseError> {
        match &self.current().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let position = self.advance().position;
                Ok((name, position))
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(&self.current().kind, TokenKind::Ident(name) if name == keyword)
    }

    pub fn parse_module(mut self) -> Result<Module, ParseError> {
        if !self.at_keyword("module") {
            return Err(self.unexpected("'module'"));
        }
        self.advance();
        let (name, _) = self.expect_ident("module name")?;
        self.expect(TokenKind::OpenBrace, "'{'")?;

        let mut seen = HashSet::new();
        let mut types = Vec::new();
        while self.current().kind != TokenKind::CloseBrace {
            let position = self.current().position;
            let typedef = self.parse_definition()?;
            if !seen.insert(typedef.name.clone()) {
                return Err(ParseError::DuplicateType {
                    name: typedef.name,
                    position,
                });
            }
            types.push(typedef);
        }
        self.expect(TokenKind::CloseBrace, "'}'")?;
        self.expect(TokenKind::Eof, "end of input")?;

        Ok(Module { name, types })
    }

    fn parse_definition(&mut self) -> Result<TypeDef, ParseError> {
        let (name, _) = self.expect_ident("type name or '}'")?;
        self.expect(TokenKind::Equals, "'='")?;

        let body = if self.current().kind == TokenKind::OpenParen {
            let fields = self.parse_fields(&name)?;
            let attributes = self.parse_attributes(&name)?;
            TypeBody::Product(Product { fields, attributes })
        } else {
            let mut variants = vec![self.parse_constructor()?];
            while self.current().kind == TokenKind::Pipe {
                self.advance();
                variants.push(self.parse_constructor()?);
            }
            let attributes = self.parse_attributes(&name)?;
            TypeBody::Sum(Sum {
                variants,
                attributes,
            })
        };

        Ok(TypeDef { name, body })
    }

    fn parse_constructor(&mut self) -> Result<Constructor, ParseError> {
        let (name, _) = self.expect_ident("constructor name")?;
        let fields = if self.current().kind == TokenKind::OpenParen {
            self.parse_fields(&name)?
        } else {
            Vec::new()
        };
        Ok(Constructor { name, fields })
    }

    fn parse_attributes(&mut self, owner: &str) -> Result<Vec<Field>, ParseError> {
        /* `attributes` is only a keyword when a field list follows */
        let followed_by_fields = self
            .tokens
            .get(self.pos + 1)
            .map(|token| token.kind == TokenKind::OpenParen)
            .unwrap_or(false);
        if self.at_keyword("attributes") && followed_by_fields {
            self.advance();
            self.parse_fields(owner)
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_fields(&mut self, owner: &str) -> Result<Vec<Field>, ParseError> {
        self.expect(TokenKind::OpenParen, "'('")?;
        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        loop {
            let (field, position) = self.parse_field()?;
            if !seen.insert(field.name.clone()) {
                return Err(ParseError::DuplicateField {
                    owner: owner.to_string(),
                    field: field.name,
                    position,
                });
            }
            fields.push(field);

            match self.current().kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::CloseParen => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected("',' or ')'")),
            }
        }
        Ok(fields)
    }

    fn parse_field(&mut self) -> Result<(Field, Position), ParseError> {
        let (type_name, _) = self.expect_ident("field type")?;
        let mut field = Field::new(String::new(), type_name);
        match self.current().kind {
            TokenKind::Star => {
                self.advance();
                field.is_sequence = true;
            }
            TokenKind::Question => {
                self.advance();
                field.is_optional = true;
            }
            _ => {}
        }
        let (name, position) = self.expect_ident("field name")?;
        field.name = name;
        Ok((field, position))
    }
}
