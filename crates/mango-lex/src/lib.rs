//! mango-lex - Lexical Analyzer for the Mango Teaching Language
//!
//! This crate provides the complete lexical analysis engine for Mango, a
//! small instructional toy language. It transforms raw source text into an
//! ordered stream of classified tokens annotated with source positions,
//! flagging malformed literals as distinct error-token kinds instead of
//! raising errors.
//!
//! # Overview
//!
//! Analysis is one synchronous left-to-right pass with two cooperating
//! layers:
//!
//! - the **character scanner** partitions the input into lexeme
//!   candidates, tracking line/column and the comment and quoted-literal
//!   regions;
//! - the **word classifier** maps each candidate (plus the previously
//!   emitted token) to a kind through a priority-ordered predicate chain.
//!
//! The engine is total: `analyze` always returns a stream, for any input,
//! including empty text and unterminated comment or quote regions.
//!
//! # Example Usage
//!
//! ```
//! use mango_lex::analyze;
//!
//! let tokens = analyze("# total de mangos\nenterito64 variavelTotal");
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(
//!     tokens[0].to_string(),
//!     "# total de mangos = COMMENT (line 1, column 1)"
//! );
//! ```
//!
//! # Module Structure
//!
//! - [`grammar`] - The fixed lexical vocabulary and its validating builder
//! - [`cursor`] - Character cursor for source traversal
//! - [`scanner`] - The character-level scanner state machine
//! - [`classify`] - The word classifier
//! - [`token`] - Token, kind, and stream definitions
//!
//! # Token Categories
//!
//! - **Operators and delimiters**: word operators (`sumi`, `resti`, …),
//!   relational/logical/assignment symbols (`%%?`, `YY`, `%=`, …),
//!   brackets and separators (`[`, `]`, `ñ`, `^`, `$`, `|`), and
//!   type-declaration keywords (`enterito64`, `MANGO`, …), each carrying
//!   its declared name from the grammar table.
//! - **Reserved words**: `si`, `siNo`, `mientras`, `por`, `porCada`,
//!   `hacerMientras`, `entonces`, `habilidade`, `abstrato`, `especies`.
//! - **Identifiers**: prefix-based roles (`variavel…`, `novoMetodo…`,
//!   `novoClasse…`), plain alphanumeric identifiers, and the
//!   name-continuation token that follows an identifier.
//! - **Literals**: `#…#` integers, `#…@…#` decimals, `&…&` strings,
//!   quoted strings, single characters, and bare numbers.
//! - **Diagnostics in the stream**: `ERROR INTEGER`, `ERROR DECIMAL`,
//!   `ERROR STRING` for one-sided delimiters, and `UNRECOGNIZED` for
//!   lexemes matching no rule. These are ordinary tokens; analysis never
//!   aborts.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classify;
pub mod cursor;
pub mod grammar;
pub mod scanner;
pub mod token;

mod edge_cases;

// Re-export main types for convenience
pub use classify::{classify, is_alphanumeric_identifier};
pub use cursor::Cursor;
pub use grammar::{GrammarError, GrammarTable, GrammarTableBuilder, OperatorDef, PrefixRule};
pub use scanner::{Scanner, ScannerState};
pub use token::{report_errors, Token, TokenKind, TokenStream};

/// Analyzes source text against the fixed Mango grammar table.
///
/// The single entry point of the engine: a total function that returns
/// the ordered token stream for any input.
///
/// # Example
///
/// ```
/// use mango_lex::{analyze, TokenKind};
///
/// let tokens = analyze("#3@5#");
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens[0].kind, TokenKind::Decimal);
/// ```
pub fn analyze(source: &str) -> TokenStream {
    analyze_with(GrammarTable::mango(), source)
}

/// Analyzes source text against a caller-supplied grammar table.
///
/// Useful for tests and embedders that swap vocabularies; the fixed table
/// must be fully built before the first call.
pub fn analyze_with(table: &GrammarTable, source: &str) -> TokenStream {
    Scanner::new(table, source).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper collecting just the kinds of a source's tokens.
    fn kinds(source: &str) -> Vec<TokenKind> {
        analyze(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_stream() {
        assert!(analyze("").is_empty());
    }

    #[test]
    fn test_determinism() {
        let source = "MANGO [ enterito64 variavelX ]\n# fin\n\"hola\" @@@";
        assert_eq!(analyze(source), analyze(source));
    }

    #[test]
    fn test_delimiter_asymmetry() {
        assert_eq!(kinds("#123"), vec![TokenKind::ErrorInteger]);
        assert_eq!(kinds("#123#"), vec![TokenKind::Integer]);
    }

    #[test]
    fn test_decimal_shape() {
        assert_eq!(kinds("#3@5#"), vec![TokenKind::Decimal]);
        assert_eq!(kinds("#3@5"), vec![TokenKind::ErrorDecimal]);
    }

    #[test]
    fn test_contextual_modulo() {
        assert_eq!(
            kinds("variavelX %"),
            vec![
                TokenKind::PrefixIdent("variable identifier".to_owned()),
                TokenKind::HashVariable,
            ]
        );
        assert_eq!(kinds("5 %"), vec![TokenKind::Integer, TokenKind::Modulo]);
    }

    #[test]
    fn test_comment_capture() {
        let tokens = analyze("# a comment\nvariavelY");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].lexeme, "# a comment");
        assert_eq!(tokens[0].line(), 1);
        assert_eq!(
            tokens[1].kind,
            TokenKind::PrefixIdent("variable identifier".to_owned())
        );
        assert_eq!(tokens[1].line(), 2);
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(kinds("@@@"), vec![TokenKind::Unrecognized]);
    }

    #[test]
    fn test_sample_program() {
        let source = "# calculo de mangos\n\
                      MANGO [\n\
                      enterito64 variavelTotal\n\
                      variavelTotal sumi #3#\n\
                      $ ]";
        let tokens = analyze(source);
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Comment,
                TokenKind::Operator("MANGO".to_owned()),
                TokenKind::Operator("opening bracket".to_owned()),
                TokenKind::Operator("integer variable".to_owned()),
                TokenKind::PrefixIdent("variable identifier".to_owned()),
                // The word after an identifier continues its name; the
                // operator after that classifies on its own merits again.
                TokenKind::NamePart,
                TokenKind::Operator("addition".to_owned()),
                TokenKind::Integer,
                TokenKind::Operator("terminal".to_owned()),
                TokenKind::Operator("closing bracket".to_owned()),
            ]
        );
        assert!(!tokens.has_errors());
    }

    #[test]
    fn test_quoted_literal_stream() {
        assert_eq!(
            kinds("\"hola\""),
            vec![TokenKind::Quotes, TokenKind::Str, TokenKind::Quotes]
        );
    }

    #[test]
    fn test_error_tokens_surface_through_handler() {
        use mango_util::Handler;

        let tokens = analyze("#1\n@@@\n&abc");
        assert_eq!(tokens.error_count(), 3);

        let handler = Handler::new();
        report_errors(&tokens, &handler);
        assert_eq!(handler.error_count(), 3);
    }

    #[test]
    fn test_custom_table_via_analyze_with() {
        let table = GrammarTable::builder()
            .operator("plus", "addition")
            .unwrap()
            .build();
        let tokens = analyze_with(&table, "plus sumi");
        assert_eq!(tokens[0].kind, TokenKind::Operator("addition".to_owned()));
        // `sumi` means nothing to this table; it is a plain identifier.
        assert_eq!(tokens[1].kind, TokenKind::Ident);
    }

    #[test]
    fn test_rendering_format() {
        let rendered = analyze("sumi #42#").to_string();
        assert_eq!(
            rendered,
            "sumi = addition (line 1, column 1)\n#42# = INTEGER (line 1, column 6)\n"
        );
    }
}
