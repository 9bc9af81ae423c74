//! Go type expression parser.
//!
//! Manifests spell field types the way Go source does. Only the shape the
//! generator cares about is parsed; `func` and `chan` types, and interface
//! bodies, are kept verbatim as opaque spellings. A `func` or `chan` spelling
//! runs to the first closing bracket it does not open itself, so it can sit
//! inside a map key (`map[chan int]bool`), or to the end of input.
//!
//! ```text
//! type  := '*' type
//!        | '[' ']' type
//!        | '[' INT ']' type
//!        | 'map' '[' type ']' type
//!        | 'interface' '{' ... '}' | 'any'
//!        | 'func' OPAQUE | 'chan' OPAQUE | '<-chan' OPAQUE
//!        | IDENT ('.' IDENT)?
//! ```

use copygen_ir::OpaqueKind;

/// Parsed type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Name` or `pkg.Name`.
    Named {
        qualifier: Option<String>,
        ident: String,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array(u64, Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Opaque(OpaqueKind, String),
}

/// Syntax error with the byte offset where parsing stopped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

/// Parse a complete type expression.
pub fn parse(src: &str) -> Result<TypeExpr, ParseError> {
    let mut parser = Parser { src, pos: 0 };
    let expr = parser.ty()?;
    parser.skip_ws();
    if parser.pos != src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError {
            message: message.to_string(),
            offset: self.pos,
        }
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), ParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{token}`")))
        }
    }

    /// Whether `keyword` starts here and is not a prefix of a longer
    /// identifier.
    fn at_keyword(&mut self, keyword: &str) -> bool {
        self.skip_ws();
        let rest = self.rest();
        rest.starts_with(keyword)
            && !rest[keyword.len()..]
                .chars()
                .next()
                .is_some_and(is_ident_char)
    }

    fn ident(&mut self) -> Result<String, ParseError> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(i, c)| !(is_ident_char(c) && (i > 0 || !c.is_ascii_digit())))
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return Err(self.error("expected type name"));
        }
        let ident = rest[..len].to_string();
        self.pos += len;
        Ok(ident)
    }

    /// Consume an opaque spelling, stopping before an unbalanced `)`, `]`
    /// or `}`.
    fn opaque_rest(&mut self, kind: OpaqueKind) -> TypeExpr {
        let src = self.src;
        let rest = &src[self.pos..];
        let mut depth = 0usize;
        let end = rest
            .char_indices()
            .find_map(|(i, c)| match c {
                '(' | '[' | '{' => {
                    depth += 1;
                    None
                }
                ')' | ']' | '}' if depth == 0 => Some(i),
                ')' | ']' | '}' => {
                    depth -= 1;
                    None
                }
                _ => None,
            })
            .unwrap_or(rest.len());
        let spelling = rest[..end].trim_end().to_string();
        self.pos += end;
        TypeExpr::Opaque(kind, spelling)
    }

    fn ty(&mut self) -> Result<TypeExpr, ParseError> {
        self.skip_ws();
        if self.rest().is_empty() {
            return Err(self.error("expected type"));
        }

        if self.eat("*") {
            return Ok(TypeExpr::Pointer(Box::new(self.ty()?)));
        }
        if self.eat("[") {
            if self.eat("]") {
                return Ok(TypeExpr::Slice(Box::new(self.ty()?)));
            }
            let len = self.array_len()?;
            self.expect("]")?;
            return Ok(TypeExpr::Array(len, Box::new(self.ty()?)));
        }
        if self.rest().starts_with("<-chan") || self.at_keyword("chan") {
            return Ok(self.opaque_rest(OpaqueKind::Chan));
        }
        if self.at_keyword("func") {
            return Ok(self.opaque_rest(OpaqueKind::Func));
        }
        if self.at_keyword("map") {
            self.pos += "map".len();
            self.expect("[")?;
            let key = self.ty()?;
            self.expect("]")?;
            let value = self.ty()?;
            return Ok(TypeExpr::Map(Box::new(key), Box::new(value)));
        }
        if self.at_keyword("interface") {
            return self.interface();
        }
        if self.at_keyword("any") {
            self.pos += "any".len();
            return Ok(TypeExpr::Opaque(OpaqueKind::Interface, "any".to_string()));
        }

        let first = self.ident()?;
        if self.rest().starts_with('.') {
            self.pos += 1;
            let ident = self.ident()?;
            return Ok(TypeExpr::Named {
                qualifier: Some(first),
                ident,
            });
        }
        Ok(TypeExpr::Named {
            qualifier: None,
            ident: first,
        })
    }

    fn array_len(&mut self) -> Result<u64, ParseError> {
        self.skip_ws();
        let rest = self.rest();
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let len = rest[..digits]
            .parse()
            .map_err(|_| self.error("expected array length"))?;
        self.pos += digits;
        Ok(len)
    }

    /// `interface{...}` with balanced braces, kept verbatim.
    fn interface(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.pos;
        self.pos += "interface".len();
        self.expect("{")?;
        let src = self.src;
        let mut depth = 1usize;
        for (i, c) in src[self.pos..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += i + 1;
                        let spelling = src[start..self.pos].to_string();
                        return Ok(TypeExpr::Opaque(OpaqueKind::Interface, spelling));
                    }
                }
                _ => {}
            }
        }
        self.pos = self.src.len();
        Err(self.error("unterminated interface body"))
    }
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
