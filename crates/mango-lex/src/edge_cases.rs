//! Edge case and property tests for mango-lex
