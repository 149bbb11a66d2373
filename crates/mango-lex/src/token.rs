//! Token type definitions.
//!
//! This module defines the closed set of token kinds the classifier can
//! produce, the `Token` record itself, and the append-only `TokenStream`
//! that one analysis pass fills in source order.

use mango_util::{Diagnostic, Handler, Span};
use std::fmt;
use std::ops::Index;

/// The kind assigned to one classified lexeme.
///
/// This is a closed enumeration: every lexeme yields exactly one of these
/// (the scanner drops empty candidates before classification). The error
/// kinds are ordinary outcomes carried in the stream, never exceptions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A line comment (`#` to end of line) that is not literal-shaped.
    Comment,
    /// One `"` quote character, opening or closing.
    Quotes,
    /// The body of a quoted literal, or a well-formed `&…&` literal.
    Str,
    /// A `&…&`-shaped literal with exactly one of its two markers.
    ErrorStr,
    /// A single printable character matched by no other rule.
    Char,
    /// A well-formed `#…#` integer literal, or a bare digit run.
    Integer,
    /// A `#…#`-shaped integer literal with exactly one delimiter.
    ErrorInteger,
    /// A well-formed `#…@…#` decimal literal.
    Decimal,
    /// A `#…@…#`-shaped decimal literal with exactly one delimiter.
    ErrorDecimal,
    /// A bare number containing exactly one decimal point.
    Real,
    /// An exact operator-table match; carries the entry's declared name.
    Operator(String),
    /// A prefix-rule identifier; carries the rule's declared role name.
    PrefixIdent(String),
    /// An exact reserved-word match.
    ReservedWord,
    /// A plain alphanumeric identifier.
    Ident,
    /// The lexeme continues the previous identifier's name.
    NamePart,
    /// A `%` following a valid identifier: trailing-% variable reference.
    HashVariable,
    /// A `%` in any other context.
    Modulo,
    /// A lexeme matched by no rule.
    Unrecognized,
}

impl TokenKind {
    /// Whether this kind flags a malformed or unknown lexeme.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            TokenKind::ErrorStr
                | TokenKind::ErrorInteger
                | TokenKind::ErrorDecimal
                | TokenKind::Unrecognized
        )
    }

    /// Whether this kind names an identifier (used by the one-token
    /// lookback rules).
    pub fn is_identifier(&self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::PrefixIdent(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Comment => write!(f, "COMMENT"),
            TokenKind::Quotes => write!(f, "QUOTES"),
            TokenKind::Str => write!(f, "STRING"),
            TokenKind::ErrorStr => write!(f, "ERROR STRING"),
            TokenKind::Char => write!(f, "CHAR"),
            TokenKind::Integer => write!(f, "INTEGER"),
            TokenKind::ErrorInteger => write!(f, "ERROR INTEGER"),
            TokenKind::Decimal => write!(f, "DECIMAL"),
            TokenKind::ErrorDecimal => write!(f, "ERROR DECIMAL"),
            TokenKind::Real => write!(f, "REAL"),
            TokenKind::Operator(name) => write!(f, "{name}"),
            TokenKind::PrefixIdent(role) => write!(f, "{role}"),
            TokenKind::ReservedWord => write!(f, "RESERVED WORD"),
            TokenKind::Ident => write!(f, "IDENTIFIER"),
            TokenKind::NamePart => write!(f, "name of the previous identifier"),
            TokenKind::HashVariable => write!(f, "hash variable"),
            TokenKind::Modulo => write!(f, "modulo"),
            TokenKind::Unrecognized => write!(f, "UNRECOGNIZED"),
        }
    }
}

/// One classified lexeme with its source position.
///
/// Immutable once created; owned by the [`TokenStream`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The assigned kind.
    pub kind: TokenKind,
    /// The raw lexeme text.
    pub lexeme: String,
    /// Byte offsets and line/column of the lexeme's first character.
    pub span: Span,
}

impl Token {
    /// Creates a token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Line number of the lexeme's first character (1-based).
    pub fn line(&self) -> u32 {
        self.span.line
    }

    /// Column number of the lexeme's first character (1-based).
    pub fn column(&self) -> u32 {
        self.span.column
    }
}

impl fmt::Display for Token {
    /// Renders the listing line consumed by the display layer:
    /// `<lexeme> = <kind> (line <L>, column <C>)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} (line {}, column {})",
            self.lexeme,
            self.kind,
            self.line(),
            self.column()
        )
    }
}

/// The ordered output of one analysis pass.
///
/// Append-only while the pass runs; insertion order is source order. A
/// new analysis produces a new stream, never an incremental update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a token. Scanner-internal; streams are read-only outside
    /// the analysis pass.
    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Number of tokens in the stream.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The most recently emitted token, if any.
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Iterates the tokens in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Whether any token carries an error kind.
    pub fn has_errors(&self) -> bool {
        self.tokens.iter().any(|t| t.kind.is_error())
    }

    /// Number of tokens carrying an error kind.
    pub fn error_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.kind.is_error()).count()
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl fmt::Display for TokenStream {
    /// One listing line per token, in emission order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            writeln!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Emits one diagnostic per error-kind token in the stream.
///
/// The engine itself never fails; this bridge is how callers (the driver,
/// embedders) summarize a finished run through the shared [`Handler`].
pub fn report_errors(tokens: &TokenStream, handler: &Handler) {
    for token in tokens {
        let diagnostic = match &token.kind {
            TokenKind::ErrorInteger => {
                Diagnostic::error(format!("malformed integer literal `{}`", token.lexeme), token.span)
                    .with_note("expected matching `#` delimiters")
            }
            TokenKind::ErrorDecimal => {
                Diagnostic::error(format!("malformed decimal literal `{}`", token.lexeme), token.span)
                    .with_note("expected matching `#` delimiters")
            }
            TokenKind::ErrorStr => {
                Diagnostic::error(format!("malformed string literal `{}`", token.lexeme), token.span)
                    .with_note("expected matching `&` markers")
            }
            TokenKind::Unrecognized => {
                Diagnostic::error(format!("unrecognized lexeme `{}`", token.lexeme), token.span)
            }
            _ => continue,
        };
        handler.emit_diagnostic(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_at(line: u32, column: u32) -> Span {
        Span::new(0, 1, line, column)
    }

    #[test]
    fn test_token_display_format() {
        let token = Token::new(TokenKind::Integer, "#42#", Span::new(0, 4, 1, 1));
        assert_eq!(token.to_string(), "#42# = INTEGER (line 1, column 1)");
    }

    #[test]
    fn test_operator_kind_displays_declared_name() {
        let token = Token::new(
            TokenKind::Operator("addition".to_owned()),
            "sumi",
            span_at(2, 5),
        );
        assert_eq!(token.to_string(), "sumi = addition (line 2, column 5)");
    }

    #[test]
    fn test_error_kinds() {
        assert!(TokenKind::ErrorInteger.is_error());
        assert!(TokenKind::ErrorDecimal.is_error());
        assert!(TokenKind::ErrorStr.is_error());
        assert!(TokenKind::Unrecognized.is_error());
        assert!(!TokenKind::Integer.is_error());
        assert!(!TokenKind::Comment.is_error());
    }

    #[test]
    fn test_identifier_kinds() {
        assert!(TokenKind::Ident.is_identifier());
        assert!(TokenKind::PrefixIdent("variable identifier".to_owned()).is_identifier());
        assert!(!TokenKind::ReservedWord.is_identifier());
        assert!(!TokenKind::HashVariable.is_identifier());
    }

    #[test]
    fn test_stream_order_and_queries() {
        let mut stream = TokenStream::new();
        assert!(stream.is_empty());

        stream.push(Token::new(TokenKind::Ident, "abc", span_at(1, 1)));
        stream.push(Token::new(TokenKind::Unrecognized, "@@@", span_at(1, 5)));

        assert_eq!(stream.len(), 2);
        assert_eq!(stream[0].lexeme, "abc");
        assert_eq!(stream.last().unwrap().lexeme, "@@@");
        assert!(stream.has_errors());
        assert_eq!(stream.error_count(), 1);
    }

    #[test]
    fn test_stream_display_is_one_line_per_token() {
        let mut stream = TokenStream::new();
        stream.push(Token::new(TokenKind::Ident, "abc", span_at(1, 1)));
        stream.push(Token::new(TokenKind::Modulo, "%", span_at(1, 5)));

        let rendered = stream.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "abc = IDENTIFIER (line 1, column 1)");
        assert_eq!(lines[1], "% = modulo (line 1, column 5)");
    }

    #[test]
    fn test_report_errors_emits_one_diagnostic_per_error_token() {
        let mut stream = TokenStream::new();
        stream.push(Token::new(TokenKind::Ident, "abc", span_at(1, 1)));
        stream.push(Token::new(TokenKind::ErrorInteger, "#42", span_at(1, 5)));
        stream.push(Token::new(TokenKind::Unrecognized, "@@@", span_at(2, 1)));

        let handler = Handler::new();
        report_errors(&stream, &handler);

        assert_eq!(handler.error_count(), 2);
        let diags = handler.diagnostics();
        assert!(diags[0].message.contains("#42"));
        assert_eq!(diags[0].span.line, 1);
        assert!(diags[1].message.contains("@@@"));
    }
}
