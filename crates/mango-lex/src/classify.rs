//! Word classification.
//!
//! This module assigns a token kind to one raw lexeme. Classification is a
//! pure function of the grammar table, the lexeme, and the previously
//! emitted token (the one-token lookback that disambiguates `%` and the
//! name-continuation case); there is no hidden scan state.
//!
//! The predicate chain is priority-ordered and the order is part of the
//! contract. Delimiter-shape literal rules run before any semantic lookup,
//! so a digit-shaped `#`-lexeme is a (possibly malformed) numeral rather
//! than a comment, and a one-sided `&…&` body is a malformed string rather
//! than an unrecognized blob.

use crate::grammar::GrammarTable;
use crate::token::{Token, TokenKind};

/// Classifies one raw lexeme.
///
/// Returns `None` only for the empty lexeme; every other input yields
/// exactly one kind. Malformed literals classify as their error kinds —
/// ordinary outcomes, never failures.
///
/// # Example
///
/// ```
/// use mango_lex::{classify, GrammarTable, TokenKind};
///
/// let table = GrammarTable::mango();
/// assert_eq!(classify(table, "#42#", None), Some(TokenKind::Integer));
/// assert_eq!(classify(table, "#42", None), Some(TokenKind::ErrorInteger));
/// assert_eq!(classify(table, "", None), None);
/// ```
pub fn classify(table: &GrammarTable, lexeme: &str, previous: Option<&Token>) -> Option<TokenKind> {
    if lexeme.is_empty() {
        return None;
    }

    // Delimiter-wrapped literal conventions, well-formed or one-sided.
    if let Some(kind) = classify_numeral(lexeme) {
        return Some(kind);
    }
    if let Some(kind) = classify_string_literal(lexeme) {
        return Some(kind);
    }

    // A `#`-lexeme that is not literal-shaped is a line comment.
    if lexeme.starts_with(GrammarTable::COMMENT_MARKER) {
        return Some(TokenKind::Comment);
    }

    // Contextual `%`: hash-variable suffix after a valid identifier,
    // modulo otherwise. Checked before the continuation rule so the
    // lookback never swallows it.
    if lexeme == "%" {
        let after_identifier =
            previous.is_some_and(|t| is_alphanumeric_identifier(&t.lexeme));
        return Some(if after_identifier {
            TokenKind::HashVariable
        } else {
            TokenKind::Modulo
        });
    }

    // One-token lookback: the word after an identifier continues its name.
    if previous.is_some_and(|t| t.kind.is_identifier()) {
        return Some(TokenKind::NamePart);
    }

    // Prefix rules precede the operator table.
    if let Some(role) = table.identifier_role(lexeme) {
        return Some(TokenKind::PrefixIdent(role.to_owned()));
    }

    if let Some(def) = table.operator(lexeme) {
        return Some(TokenKind::Operator(def.token_name()));
    }

    if table.is_reserved(lexeme) {
        return Some(TokenKind::ReservedWord);
    }

    // Bare numbers with no wrapping markers fall through to plain
    // integer/real literals.
    if let Some(kind) = classify_plain_number(lexeme) {
        return Some(kind);
    }

    if is_alphanumeric_identifier(lexeme) {
        return Some(TokenKind::Ident);
    }

    if is_char_literal(lexeme) {
        return Some(TokenKind::Char);
    }

    Some(TokenKind::Unrecognized)
}

/// The `#…#` numeral conventions: integer and decimal bodies, with the
/// one-sided forms yielding the error kinds.
fn classify_numeral(lexeme: &str) -> Option<TokenKind> {
    let (body, starts) = match lexeme.strip_prefix(GrammarTable::NUMERAL_DELIMITER) {
        Some(rest) => (rest, true),
        None => (lexeme, false),
    };
    let (body, ends) = match body.strip_suffix(GrammarTable::NUMERAL_DELIMITER) {
        Some(rest) => (rest, true),
        None => (body, false),
    };
    if !starts && !ends {
        return None;
    }
    let well_formed = starts && ends;

    if is_digits(body) {
        return Some(if well_formed {
            TokenKind::Integer
        } else {
            TokenKind::ErrorInteger
        });
    }

    // Exactly one interior separator between two digit groups.
    if let Some((whole, frac)) = body.split_once(GrammarTable::DECIMAL_SEPARATOR) {
        if is_digits(whole) && is_digits(frac) {
            return Some(if well_formed {
                TokenKind::Decimal
            } else {
                TokenKind::ErrorDecimal
            });
        }
    }

    None
}

/// The `&…&` string convention: length ≥ 4, second and second-to-last
/// characters alphabetic; one-sided markers yield the error kind.
fn classify_string_literal(lexeme: &str) -> Option<TokenKind> {
    let chars: Vec<char> = lexeme.chars().collect();
    if chars.len() < 4 {
        return None;
    }
    let starts = chars[0] == GrammarTable::STRING_DELIMITER;
    let ends = chars[chars.len() - 1] == GrammarTable::STRING_DELIMITER;
    if !chars[1].is_alphabetic() || !chars[chars.len() - 2].is_alphabetic() {
        return None;
    }
    match (starts, ends) {
        (true, true) => Some(TokenKind::Str),
        (true, false) | (false, true) => Some(TokenKind::ErrorStr),
        (false, false) => None,
    }
}

/// Bare numbers: anything `f64` accepts, with exactly one decimal point
/// making it a real.
fn classify_plain_number(lexeme: &str) -> Option<TokenKind> {
    if lexeme.parse::<f64>().is_err() {
        return None;
    }
    Some(if lexeme.matches('.').count() == 1 {
        TokenKind::Real
    } else {
        TokenKind::Integer
    })
}

/// A valid plain identifier: first character not a digit, every character
/// ASCII alphanumeric or underscore.
pub fn is_alphanumeric_identifier(lexeme: &str) -> bool {
    let Some(first) = lexeme.chars().next() else {
        return false;
    };
    !first.is_ascii_digit()
        && lexeme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A non-empty run of ASCII digits.
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// A single printable-ASCII character that is not the numeral delimiter.
fn is_char_literal(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => (' '..='~').contains(&c) && c != GrammarTable::NUMERAL_DELIMITER,
        _ => false,
    }
}
