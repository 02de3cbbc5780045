//! Turtle statements to triples.
//!
//! Runs over the lexer's token stream. Prefixed names are expanded to full
//! IRIs, `a` becomes `rdf:type`, and bare numbers and booleans become typed
//! literals.

use std::collections::HashMap;

use chumsky::span::SimpleSpan;

use crate::convert::{ConversionError, ConversionResult};

use super::lexer::{lex, Token};
use super::vocab;

/// The object of a triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Iri(String),
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl Term {
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal { .. } => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Literal { value, .. } => Some(value),
            Term::Iri(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

/// Parse a Turtle document into triples, in document order.
///
/// # Errors
/// [`ConversionError::Syntax`] with the byte offset of the first problem.
pub fn parse_turtle(input: &str) -> ConversionResult<Vec<Triple>> {
    let tokens = lex(input).map_err(|errs| {
        let first = errs.first();
        ConversionError::Syntax {
            offset: first.map(|e| e.span().start).unwrap_or(0),
            message: first.map(|e| e.to_string()).unwrap_or_else(|| "invalid input".to_string()),
        }
    })?;

    let mut parser = TripleParser {
        tokens: &tokens,
        pos: 0,
        end: input.len(),
        prefixes: HashMap::new(),
        base: None,
        triples: Vec::new(),
    };
    parser.document()?;
    Ok(parser.triples)
}

struct TripleParser<'t, 'src> {
    tokens: &'t [(Token<'src>, SimpleSpan)],
    pos: usize,
    end: usize,
    prefixes: HashMap<String, String>,
    base: Option<String>,
    triples: Vec<Triple>,
}

impl<'t, 'src> TripleParser<'t, 'src> {
    fn document(&mut self) -> ConversionResult<()> {
        while let Some(token) = self.peek() {
            match token {
                Token::PrefixDirective => self.prefix_directive()?,
                Token::BaseDirective => self.base_directive()?,
                _ => self.statement()?,
            }
        }
        Ok(())
    }

    fn prefix_directive(&mut self) -> ConversionResult<()> {
        self.advance();
        let prefix = match self.next() {
            Some(Token::PrefixedName(prefix, "")) => prefix.to_string(),
            _ => return Err(self.error_at_previous("expected a prefix name like 'owl:'")),
        };
        let iri = match self.next() {
            Some(Token::Iri(iri)) => self.resolve_relative(iri),
            _ => return Err(self.error_at_previous("expected an IRI after the prefix name")),
        };
        self.expect_dot()?;
        self.prefixes.insert(prefix, iri);
        Ok(())
    }

    fn base_directive(&mut self) -> ConversionResult<()> {
        self.advance();
        let iri = match self.next() {
            Some(Token::Iri(iri)) => iri.to_string(),
            _ => return Err(self.error_at_previous("expected an IRI after @base")),
        };
        self.expect_dot()?;
        self.base = Some(iri);
        Ok(())
    }

    /// subject verb objects (; verb objects)* .
    fn statement(&mut self) -> ConversionResult<()> {
        let subject = self.iri("subject")?;
        loop {
            let predicate = self.verb()?;
            loop {
                let object = self.object()?;
                self.triples.push(Triple {
                    subject: subject.clone(),
                    predicate: predicate.clone(),
                    object,
                });
                if matches!(self.peek(), Some(Token::Comma)) {
                    self.advance();
                } else {
                    break;
                }
            }

            if matches!(self.peek(), Some(Token::Semicolon)) {
                // Repeated and trailing semicolons are allowed.
                while matches!(self.peek(), Some(Token::Semicolon)) {
                    self.advance();
                }
                if matches!(self.peek(), Some(Token::Dot)) {
                    break;
                }
            } else {
                break;
            }
        }
        self.expect_dot()
    }

    fn verb(&mut self) -> ConversionResult<String> {
        if matches!(self.peek(), Some(Token::A)) {
            self.advance();
            return Ok(vocab::RDF_TYPE.to_string());
        }
        self.iri("predicate")
    }

    fn object(&mut self) -> ConversionResult<Term> {
        match self.peek() {
            Some(Token::Iri(_)) | Some(Token::PrefixedName(..)) => Ok(Term::Iri(self.iri("object")?)),
            Some(Token::Str(_)) => {
                let Some(Token::Str(value)) = self.next() else {
                    return Err(self.error_at_current("expected a string"));
                };
                let value = value.clone();
                match self.peek() {
                    Some(Token::LangTag(tag)) => {
                        let language = Some(tag.to_string());
                        self.advance();
                        Ok(Term::Literal {
                            value,
                            datatype: None,
                            language,
                        })
                    }
                    Some(Token::DatatypeMarker) => {
                        self.advance();
                        let datatype = Some(self.iri("datatype")?);
                        Ok(Term::Literal {
                            value,
                            datatype,
                            language: None,
                        })
                    }
                    _ => Ok(Term::Literal {
                        value,
                        datatype: None,
                        language: None,
                    }),
                }
            }
            Some(Token::Number(n)) => {
                let datatype = if n.contains('.') { vocab::XSD_DECIMAL } else { vocab::XSD_INTEGER };
                let value = n.to_string();
                self.advance();
                Ok(Term::Literal {
                    value,
                    datatype: Some(datatype.to_string()),
                    language: None,
                })
            }
            Some(Token::Bool(b)) => {
                let value = b.to_string();
                self.advance();
                Ok(Term::Literal {
                    value,
                    datatype: Some(vocab::XSD_BOOLEAN.to_string()),
                    language: None,
                })
            }
            _ => Err(self.error_at_current("expected an object (IRI or literal)")),
        }
    }

    fn iri(&mut self, role: &str) -> ConversionResult<String> {
        match self.peek() {
            Some(Token::Iri(iri)) => {
                let resolved = self.resolve_relative(iri);
                self.advance();
                Ok(resolved)
            }
            Some(Token::PrefixedName(prefix, local)) => {
                let Some(ns) = self.prefixes.get(*prefix) else {
                    return Err(self.error_at_current(&format!("undeclared prefix '{}:'", prefix)));
                };
                let expanded = format!("{}{}", ns, local);
                self.advance();
                Ok(expanded)
            }
            _ => Err(self.error_at_current(&format!("expected {} IRI", role))),
        }
    }

    fn resolve_relative(&self, iri: &str) -> String {
        match &self.base {
            Some(base) if !iri.contains(':') => format!("{}{}", base, iri),
            _ => iri.to_string(),
        }
    }

    fn expect_dot(&mut self) -> ConversionResult<()> {
        match self.peek() {
            Some(Token::Dot) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error_at_current("expected '.'")),
        }
    }

    fn peek(&self) -> Option<&'t Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<&'t Token<'src>> {
        let token = self.peek();
        self.advance();
        token
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn offset(&self, pos: usize) -> usize {
        self.tokens.get(pos).map(|(_, span)| span.start).unwrap_or(self.end)
    }

    fn error_at_current(&self, message: &str) -> ConversionError {
        ConversionError::Syntax {
            offset: self.offset(self.pos),
            message: message.to_string(),
        }
    }

    fn error_at_previous(&self, message: &str) -> ConversionError {
        ConversionError::Syntax {
            offset: self.offset(self.pos.saturating_sub(1)),
            message: message.to_string(),
        }
    }
}
