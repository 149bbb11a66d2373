//! Character scanning.
//!
//! This module partitions raw source text into lexeme candidates and feeds
//! them through the classifier, tracking the (line, column, byte span) of
//! each candidate's first character. Two escape regions are handled at the
//! character level: line comments introduced by `#`, and quoted literals
//! between `"` marks.

use crate::classify::classify;
use crate::cursor::Cursor;
use crate::grammar::GrammarTable;
use crate::token::{Token, TokenKind, TokenStream};
use mango_util::Span;

/// The scanner's region state.
///
/// Exactly one state is active at any instant. Comment state exits only at
/// end-of-line (or end of input); quoted-literal state exits only at a
/// matching closing quote (or end of input).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScannerState {
    /// Between lexemes or inside an ordinary lexeme.
    #[default]
    Normal,
    /// Between `#` and the end of the line.
    InComment,
    /// Between an opening `"` and its closing mate.
    InQuotedLiteral,
}

/// A single-pass scanner over one source text.
///
/// The scanner owns its accumulation buffer, its position bookkeeping, and
/// the token stream it fills; nothing is shared across analysis passes.
/// Consume it with [`Scanner::run`].
///
/// # Example
///
/// ```
/// use mango_lex::{GrammarTable, Scanner};
///
/// let tokens = Scanner::new(GrammarTable::mango(), "sumi 2").run();
/// assert_eq!(tokens.len(), 2);
/// ```
pub struct Scanner<'a> {
    /// Character cursor over the source.
    cursor: Cursor<'a>,

    /// The fixed lexical vocabulary.
    table: &'a GrammarTable,

    /// Active region state.
    state: ScannerState,

    /// Accumulation buffer for the current lexeme candidate.
    buf: String,

    /// Byte offset of the buffered lexeme's first character.
    buf_start: usize,

    /// Line of the buffered lexeme's first character (1-based).
    buf_line: u32,

    /// Column of the buffered lexeme's first character (1-based).
    buf_column: u32,

    /// Tokens emitted so far, in source order.
    tokens: TokenStream,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over the given source.
    pub fn new(table: &'a GrammarTable, source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            table,
            state: ScannerState::Normal,
            buf: String::new(),
            buf_start: 0,
            buf_line: 1,
            buf_column: 1,
            tokens: TokenStream::new(),
        }
    }

    /// Consumes the whole input and returns the token stream.
    ///
    /// Total: terminates for any input. Unterminated comment and quote
    /// regions are closed by end of input; the residual buffer is flushed
    /// through the classifier exactly once.
    pub fn run(mut self) -> TokenStream {
        while !self.cursor.is_at_end() {
            let c = self.cursor.current_char();
            match self.state {
                ScannerState::Normal => self.scan_normal(c),
                ScannerState::InComment => self.scan_comment(c),
                ScannerState::InQuotedLiteral => self.scan_quoted(c),
            }
        }
        self.flush();
        self.tokens
    }

    fn scan_normal(&mut self, c: char) {
        if c == GrammarTable::COMMENT_MARKER {
            // `#` opens comment accumulation; the classifier later decides
            // between the numeral conventions and a plain comment.
            self.flush();
            self.begin_lexeme();
            self.buf.push(c);
            self.cursor.advance();
            self.state = ScannerState::InComment;
        } else if c == '"' {
            self.flush();
            self.emit_quote();
            self.cursor.advance();
            self.begin_lexeme();
            self.state = ScannerState::InQuotedLiteral;
        } else if c.is_whitespace() {
            self.flush();
            self.cursor.advance();
        } else if self.table.is_lexeme_char(c) {
            if self.buf.is_empty() {
                self.begin_lexeme();
            }
            self.buf.push(c);
            self.cursor.advance();
        } else if c.is_ascii_punctuation() {
            // Punctuation separates, and is itself a one-character
            // candidate lexeme.
            self.flush();
            self.begin_lexeme();
            self.buf.push(c);
            self.cursor.advance();
            self.flush();
        } else {
            // Anything else separates and is discarded.
            self.flush();
            self.cursor.advance();
        }
    }

    fn scan_comment(&mut self, c: char) {
        if c == '\n' {
            self.flush();
            self.state = ScannerState::Normal;
            self.cursor.advance();
        } else {
            self.buf.push(c);
            self.cursor.advance();
        }
    }

    fn scan_quoted(&mut self, c: char) {
        if c == '"' {
            self.emit_string();
            self.emit_quote();
            self.cursor.advance();
            self.state = ScannerState::Normal;
        } else {
            // Verbatim, newlines included; no escaping.
            self.buf.push(c);
            self.cursor.advance();
        }
    }

    /// Records the current cursor position as the start of a lexeme.
    fn begin_lexeme(&mut self) {
        self.buf_start = self.cursor.position();
        self.buf_line = self.cursor.line();
        self.buf_column = self.cursor.column();
    }

    /// Sends the buffered lexeme through the classifier, if any.
    fn flush(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        // A lone `.` only has meaning inside a lexeme; standalone it is
        // dropped without becoming a token.
        if self.buf == "." {
            self.buf.clear();
            return;
        }
        let lexeme = std::mem::take(&mut self.buf);
        if let Some(kind) = classify(self.table, &lexeme, self.tokens.last()) {
            let span = Span::new(
                self.buf_start,
                self.buf_start + lexeme.len(),
                self.buf_line,
                self.buf_column,
            );
            self.tokens.push(Token::new(kind, lexeme, span));
        }
    }

    /// Emits the quote the cursor currently sits on.
    fn emit_quote(&mut self) {
        let start = self.cursor.position();
        let span = Span::new(start, start + 1, self.cursor.line(), self.cursor.column());
        self.tokens.push(Token::new(TokenKind::Quotes, "\"", span));
    }

    /// Emits the buffered quoted-literal body, empty bodies included.
    fn emit_string(&mut self) {
        let lexeme = std::mem::take(&mut self.buf);
        let span = Span::new(
            self.buf_start,
            self.buf_start + lexeme.len(),
            self.buf_line,
            self.buf_column,
        );
        self.tokens.push(Token::new(TokenKind::Str, lexeme, span));
    }
}
