//! Lexical grammar table.
//!
//! This module holds the fixed vocabulary of the Mango teaching language:
//! the operator lexeme→name map, the reserved-word set, and the ordered
//! identifier-prefix rules. The table is built once through a validating
//! builder and is read-only for the life of the process.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors rejected at table-construction time.
///
/// A grammar table with two roles behind one lexeme key cannot be
/// constructed; the builder surfaces the conflict instead of silently
/// collapsing entries.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    /// The same operator lexeme was declared twice.
    #[error("operator lexeme `{0}` is declared twice")]
    DuplicateLexeme(String),

    /// The same reserved word was declared twice.
    #[error("reserved word `{0}` is declared twice")]
    DuplicateReservedWord(String),

    /// The same identifier prefix appears in more than one rule.
    #[error("identifier prefix `{0}` is declared twice")]
    DuplicatePrefix(String),

    /// An empty string was used where a lexeme or prefix is required.
    #[error("empty lexeme in grammar table")]
    EmptyLexeme,
}

/// One entry of the operator table.
///
/// Most entries are a lexeme with a single declared name. A symbol that
/// serves as both the opening and the closing half of a pair (`ñ`, `^`)
/// is a single `PairedDelimiter` entry carrying both roles, never two map
/// entries sharing a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperatorDef {
    /// A plain operator, delimiter, or type keyword with one name.
    Simple(String),
    /// One symbol carrying both an opening and a closing role.
    PairedDelimiter {
        /// Declared name of the opening role.
        open: String,
        /// Declared name of the closing role.
        close: String,
    },
}

impl OperatorDef {
    /// The name this entry contributes to a token kind.
    ///
    /// Paired delimiters render both roles; without bracket matching the
    /// classifier cannot tell which half a given occurrence is.
    pub fn token_name(&self) -> String {
        match self {
            OperatorDef::Simple(name) => name.clone(),
            OperatorDef::PairedDelimiter { open, close } => format!("{open} / {close}"),
        }
    }
}

/// An identifier-prefix rule: a role name plus the prefixes that select it.
///
/// Rules are checked in declared order; the first prefix match wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixRule {
    /// Declared role name, e.g. "variable identifier".
    pub role: String,
    /// Leading substrings that select this role.
    pub prefixes: Vec<String>,
}

/// The immutable lexical vocabulary of the analyzed language.
///
/// Built once via [`GrammarTable::builder`] (or the fixed Mango table via
/// [`GrammarTable::mango`]); never mutated afterwards. Lookup order across
/// the three sections is owned by the classifier, not the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrammarTable {
    operators: IndexMap<String, OperatorDef>,
    reserved_words: FxHashSet<String>,
    prefix_rules: Vec<PrefixRule>,
}

impl GrammarTable {
    /// The line-comment marker. Doubles as the numeral-literal delimiter:
    /// the classifier decides between the two readings by lexeme shape.
    pub const COMMENT_MARKER: char = '#';

    /// The delimiter wrapping integer and decimal literals (`#…#`).
    pub const NUMERAL_DELIMITER: char = '#';

    /// The interior separator of decimal literals (`#3@5#`).
    pub const DECIMAL_SEPARATOR: char = '@';

    /// The marker wrapping string literals of the `&…&` convention.
    pub const STRING_DELIMITER: char = '&';

    /// Creates an empty builder.
    pub fn builder() -> GrammarTableBuilder {
        GrammarTableBuilder::default()
    }

    /// The fixed grammar table of the Mango teaching language.
    ///
    /// Built on first use and shared process-wide; the vocabulary is part
    /// of the language definition and never changes at runtime.
    pub fn mango() -> &'static GrammarTable {
        static TABLE: OnceLock<GrammarTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            Self::build_mango().expect("built-in Mango grammar table is well formed")
        })
    }

    fn build_mango() -> Result<GrammarTable, GrammarError> {
        let builder = Self::builder()
            // Arithmetic words
            .operator("sumi", "addition")?
            .operator("resti", "subtraction")?
            .operator("multi", "multiplication")?
            .operator("divi", "division")?
            .operator("elevi", "exponentiation")?
            .operator("rai", "root")?
            // Relational operators. `%` itself is deliberately absent: the
            // classifier's contextual rule decides between modulo and the
            // trailing-% variable reference.
            .operator("%%?", "relational operator equal")?
            .operator("!%?", "relational operator not equal")?
            .operator(">?", "relational operator greater")?
            .operator("<?", "relational operator less")?
            .operator(">%?", "relational operator greater or equal")?
            .operator("<%?", "relational operator less or equal")?
            // Logical operators
            .operator("YY", "logical AND")?
            .operator("OO", "logical OR")?
            .operator("NO", "logical NOT")?
            // Assignment operators
            .operator("%=", "simple assignment operator")?
            .operator("+%", "assignment with addition")?
            .operator("-%", "assignment with subtraction")?
            .operator("*%", "assignment with multiplication")?
            .operator("/%", "assignment with division")?
            .operator("%%=", "assignment with modulo")?
            // Delimiters
            .operator("[", "opening bracket")?
            .operator("]", "closing bracket")?
            .paired_delimiter("ñ", "opening ñ", "closing ñ")?
            .paired_delimiter("^", "opening circumflex", "closing circumflex")?
            .operator("$", "terminal")?
            .operator("|", "statement separator")?
            // Type-declaration keywords
            .operator("enterito64", "integer variable")?
            .operator("realsote64", "real variable")?
            .operator("textil", "array variable")?
            .operator("caractersito", "character variable")?
            .operator("MANGO", "MANGO")?
            // Reserved words
            .reserved_words(&[
                "si",
                "siNo",
                "mientras",
                "por",
                "porCada",
                "hacerMientras",
                "entonces",
                "habilidade",
                "abstrato",
                "especies",
            ])?
            // Identifier-prefix rules, in declared order
            .prefix_rule("variable identifier", &["variavel"])?
            .prefix_rule("method identifier", &["novoMetodo"])?
            .prefix_rule("class identifier", &["novoClasse"])?;

        Ok(builder.build())
    }

    /// Looks up an exact operator-table entry.
    pub fn operator(&self, lexeme: &str) -> Option<&OperatorDef> {
        self.operators.get(lexeme)
    }

    /// Whether the lexeme is a reserved word.
    pub fn is_reserved(&self, lexeme: &str) -> bool {
        self.reserved_words.contains(lexeme)
    }

    /// The identifier role selected by the first matching prefix rule, in
    /// declared rule order.
    pub fn identifier_role(&self, lexeme: &str) -> Option<&str> {
        for rule in &self.prefix_rules {
            if rule.prefixes.iter().any(|p| lexeme.starts_with(p.as_str())) {
                return Some(rule.role.as_str());
            }
        }
        None
    }

    /// Whether a character accumulates into the current lexeme rather than
    /// acting as a separator.
    ///
    /// Alphanumerics, `_`, and `.` accumulate, plus the literal-delimiter
    /// characters `@` and `&` so the delimiter-shape predicates ever see a
    /// whole `&…&` or `@@@` candidate. The numeral delimiter `#` is not
    /// here: it is routed through comment accumulation.
    pub fn is_lexeme_char(&self, c: char) -> bool {
        c.is_alphanumeric()
            || c == '_'
            || c == '.'
            || c == Self::DECIMAL_SEPARATOR
            || c == Self::STRING_DELIMITER
    }

    /// Iterates the operator entries in declared order.
    pub fn operators(&self) -> impl Iterator<Item = (&str, &OperatorDef)> {
        self.operators.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The identifier-prefix rules in declared order.
    pub fn prefix_rules(&self) -> &[PrefixRule] {
        &self.prefix_rules
    }
}

/// Validating builder for [`GrammarTable`].
///
/// Every insertion checks for conflicts; the analyzed configuration's
/// silent duplicate-key collapse is impossible to reproduce here.
#[derive(Debug, Default)]
pub struct GrammarTableBuilder {
    operators: IndexMap<String, OperatorDef>,
    reserved_words: FxHashSet<String>,
    prefix_rules: Vec<PrefixRule>,
}

impl GrammarTableBuilder {
    /// Declares a simple operator entry.
    pub fn operator(self, lexeme: &str, name: &str) -> Result<Self, GrammarError> {
        self.insert(lexeme, OperatorDef::Simple(name.to_owned()))
    }

    /// Declares a paired-delimiter entry: one lexeme, both roles.
    pub fn paired_delimiter(
        self,
        lexeme: &str,
        open: &str,
        close: &str,
    ) -> Result<Self, GrammarError> {
        self.insert(
            lexeme,
            OperatorDef::PairedDelimiter {
                open: open.to_owned(),
                close: close.to_owned(),
            },
        )
    }

    fn insert(mut self, lexeme: &str, def: OperatorDef) -> Result<Self, GrammarError> {
        if lexeme.is_empty() {
            return Err(GrammarError::EmptyLexeme);
        }
        if self.operators.contains_key(lexeme) {
            return Err(GrammarError::DuplicateLexeme(lexeme.to_owned()));
        }
        self.operators.insert(lexeme.to_owned(), def);
        Ok(self)
    }

    /// Declares a reserved word.
    pub fn reserved_word(mut self, word: &str) -> Result<Self, GrammarError> {
        if word.is_empty() {
            return Err(GrammarError::EmptyLexeme);
        }
        if !self.reserved_words.insert(word.to_owned()) {
            return Err(GrammarError::DuplicateReservedWord(word.to_owned()));
        }
        Ok(self)
    }

    /// Declares several reserved words at once.
    pub fn reserved_words(mut self, words: &[&str]) -> Result<Self, GrammarError> {
        for word in words {
            self = self.reserved_word(word)?;
        }
        Ok(self)
    }

    /// Appends an identifier-prefix rule; rule order is declaration order.
    pub fn prefix_rule(mut self, role: &str, prefixes: &[&str]) -> Result<Self, GrammarError> {
        if prefixes.is_empty() {
            return Err(GrammarError::EmptyLexeme);
        }
        for prefix in prefixes {
            if prefix.is_empty() {
                return Err(GrammarError::EmptyLexeme);
            }
            let seen = self
                .prefix_rules
                .iter()
                .flat_map(|r| r.prefixes.iter())
                .any(|p| p == prefix);
            if seen {
                return Err(GrammarError::DuplicatePrefix((*prefix).to_owned()));
            }
        }
        self.prefix_rules.push(PrefixRule {
            role: role.to_owned(),
            prefixes: prefixes.iter().map(|p| (*p).to_owned()).collect(),
        });
        Ok(self)
    }

    /// Finishes the table.
    pub fn build(self) -> GrammarTable {
        GrammarTable {
            operators: self.operators,
            reserved_words: self.reserved_words,
            prefix_rules: self.prefix_rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mango_table_builds() {
        let table = GrammarTable::mango();
        assert!(table.operator("sumi").is_some());
        assert!(table.is_reserved("mientras"));
        assert_eq!(
            table.identifier_role("variavelX"),
            Some("variable identifier")
        );
    }

    #[test]
    fn test_duplicate_operator_rejected() {
        let result = GrammarTable::builder()
            .operator("sumi", "addition")
            .and_then(|b| b.operator("sumi", "something else"));
        assert_eq!(
            result.err(),
            Some(GrammarError::DuplicateLexeme("sumi".to_owned()))
        );
    }

    #[test]
    fn test_paired_delimiter_conflicts_with_simple() {
        let result = GrammarTable::builder()
            .paired_delimiter("ñ", "opening ñ", "closing ñ")
            .and_then(|b| b.operator("ñ", "closing ñ"));
        assert_eq!(
            result.err(),
            Some(GrammarError::DuplicateLexeme("ñ".to_owned()))
        );
    }

    #[test]
    fn test_duplicate_reserved_word_rejected() {
        let result = GrammarTable::builder()
            .reserved_word("si")
            .and_then(|b| b.reserved_word("si"));
        assert_eq!(
            result.err(),
            Some(GrammarError::DuplicateReservedWord("si".to_owned()))
        );
    }

    #[test]
    fn test_duplicate_prefix_rejected() {
        let result = GrammarTable::builder()
            .prefix_rule("variable identifier", &["variavel"])
            .and_then(|b| b.prefix_rule("other role", &["variavel"]));
        assert_eq!(
            result.err(),
            Some(GrammarError::DuplicatePrefix("variavel".to_owned()))
        );
    }

    #[test]
    fn test_empty_lexeme_rejected() {
        assert_eq!(
            GrammarTable::builder().operator("", "nothing").err(),
            Some(GrammarError::EmptyLexeme)
        );
    }

    #[test]
    fn test_prefix_rules_checked_in_declared_order() {
        let table = GrammarTable::builder()
            .prefix_rule("first role", &["nov"])
            .and_then(|b| b.prefix_rule("second role", &["novo"]))
            .unwrap()
            .build();
        // "novo..." matches both rules; the first declared wins.
        assert_eq!(table.identifier_role("novoX"), Some("first role"));
    }

    #[test]
    fn test_percent_not_in_operator_table() {
        // `%` belongs to the classifier's contextual rule.
        assert!(GrammarTable::mango().operator("%").is_none());
    }

    #[test]
    fn test_paired_delimiter_token_name() {
        let table = GrammarTable::mango();
        let def = table.operator("^").unwrap();
        assert_eq!(
            def.token_name(),
            "opening circumflex / closing circumflex"
        );
    }

    #[test]
    fn test_lexeme_chars() {
        let table = GrammarTable::mango();
        assert!(table.is_lexeme_char('a'));
        assert!(table.is_lexeme_char('7'));
        assert!(table.is_lexeme_char('_'));
        assert!(table.is_lexeme_char('.'));
        assert!(table.is_lexeme_char('@'));
        assert!(table.is_lexeme_char('&'));
        assert!(table.is_lexeme_char('ñ'));
        assert!(!table.is_lexeme_char('#'));
        assert!(!table.is_lexeme_char('%'));
        assert!(!table.is_lexeme_char(' '));
        assert!(!table.is_lexeme_char('['));
    }
}
