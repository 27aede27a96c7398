//! Query Parser
//!
//! Translates one line of SQL-flavored input into a [`Query`] describing which
//! attributes to return, which bucket to list, and an optional filter. Parsing
//! is a single forward pass pulling tokens from the [`Tokenizer`]: dispatch is
//! keyword-driven, each clause runs its own sub-loop, and no backtracking is
//! ever needed.
//!
//! The grammar, informally:
//!
//! ```text
//! query       := "SELECT" column_list "FROM" source [ "WHERE" filter ]
//! column_list := identifier { [","] identifier }
//! source      := identifier
//! filter      := identifier "=" value
//! value       := identifier { ("/" | identifier) } ["%"]
//! ```
//!
//! Keywords are case-insensitive, identifiers are case-sensitive. A trailing
//! `%` on the filter value selects prefix matching instead of equality.
//!
//! Two strictness levels share the same pass. The lenient default never fails:
//! malformed input degrades to a `Query` with partial or empty fields, which
//! downstream code treats as "list everything" or "list nothing". Strict mode
//! surfaces the same situations as typed [`ParseError`]s.

use thiserror::Error;

use super::token::{Token, Tokenizer};

/// Symbols the grammar gives meaning to. Anything else is only tolerated in
/// lenient mode.
const KNOWN_SYMBOLS: [char; 5] = ['=', '/', '%', ',', '*'];

/// Ways a query can be malformed. Only strict parsing reports these; the
/// lenient baseline degrades silently instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{0}' in query")]
    UnexpectedCharacter(char),
    #[error("SELECT is not followed by any column names")]
    MissingSelectList,
    #[error("no source bucket: FROM clause is missing or incomplete")]
    MissingSource,
    #[error("WHERE clause is missing a key or a value")]
    MalformedFilter,
}

/// One comparison extracted from a WHERE clause.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub key: String,
    pub value: String,
}

impl FilterClause {
    fn new(key: String, value: String) -> Self {
        Self { key, value }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

/// The result of parsing one input line.
///
/// At most one of `prefix_filter`/`exact_filter` is populated, decided solely
/// by whether the WHERE value ended with `%`. Both stay empty when there is no
/// WHERE clause. `exact_filter` is carried for compatibility with the grammar
/// but no current caller reads it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    /// Selected attribute names, in order; duplicates allowed.
    pub columns: Vec<String>,
    /// Bucket to list. Empty if the input never reached a FROM clause.
    pub source: String,
    /// Populated when the WHERE value had a trailing `%` (marker stripped).
    pub prefix_filter: FilterClause,
    /// Populated when the WHERE value had no trailing `%`.
    pub exact_filter: FilterClause,
}

/// Single-pass parser over one input line.
///
/// Owns its own [`Tokenizer`]; a fresh parser is built per line, so concurrent
/// callers parsing different inputs share nothing.
pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
    strict: bool,
}

impl<'a> Parser<'a> {
    /// Lenient parser: [`parse`](Self::parse) always returns `Ok`.
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(input),
            strict: false,
        }
    }

    /// Strict parser: malformed input yields a [`ParseError`] instead of a
    /// degraded query.
    pub fn strict(input: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(input),
            strict: true,
        }
    }

    /// Parses the input into a [`Query`].
    ///
    /// In lenient mode this never fails; incomplete clauses leave the
    /// corresponding fields empty.
    pub fn parse(mut self) -> Result<Query, ParseError> {
        let mut query = Query::default();

        loop {
            let token = self.pull()?;
            match token {
                Token::End => break,
                Token::Keyword(word) => match word.to_uppercase().as_str() {
                    "SELECT" => {
                        self.select_list(&mut query)?;
                        // The grammar has no standalone SELECT statement: the
                        // column list runs straight into the FROM clause, so
                        // the token after the list's terminator is the source.
                        self.from_clause(&mut query)?;
                    }
                    "FROM" => self.from_clause(&mut query)?,
                    "WHERE" => self.where_clause(&mut query)?,
                    _ => {}
                },
                // Stray identifiers and symbols between clauses are ignored.
                _ => {}
            }
        }

        if self.strict && query.source.is_empty() {
            return Err(ParseError::MissingSource);
        }

        Ok(query)
    }

    /// Pulls the next token, rejecting symbols outside the grammar when
    /// strict.
    fn pull(&mut self) -> Result<Token, ParseError> {
        let token = self.tokens.next_token();
        if self.strict {
            if let Token::Symbol(c) = &token {
                if !KNOWN_SYMBOLS.contains(c) {
                    return Err(ParseError::UnexpectedCharacter(*c));
                }
            }
        }
        Ok(token)
    }

    /// Pulls tokens until something other than a symbol turns up and returns
    /// its text. Commas and equals signs before an identifier are noise; a
    /// keyword or end-of-input yields its text as-is (empty for `End`),
    /// leaving the caller's field degraded rather than failing.
    fn next_identifier(&mut self) -> Result<String, ParseError> {
        loop {
            let token = self.pull()?;
            if matches!(token, Token::Symbol(_)) {
                continue;
            }
            return Ok(token.text());
        }
    }

    /// Collects the SELECT column list: identifiers append in order, symbols
    /// (commas) are skipped, and the first token that is neither terminates
    /// the list and is discarded.
    fn select_list(&mut self, query: &mut Query) -> Result<(), ParseError> {
        loop {
            match self.pull()? {
                Token::Identifier(name) => query.columns.push(name),
                Token::Symbol(_) => continue,
                _ => break,
            }
        }

        if self.strict && query.columns.is_empty() {
            return Err(ParseError::MissingSelectList);
        }
        Ok(())
    }

    /// The very next token names the source, taken literally.
    fn from_clause(&mut self, query: &mut Query) -> Result<(), ParseError> {
        let token = self.pull()?;
        if self.strict && !matches!(token, Token::Identifier(_)) {
            return Err(ParseError::MissingSource);
        }
        query.source = token.text();
        Ok(())
    }

    /// Parses the single supported filter clause: a key, a value, and an
    /// accumulation loop that reassembles path-like values split across
    /// identifier and slash tokens. The `=` between key and value is implied
    /// by the structure and consumed wherever it shows up.
    fn where_clause(&mut self, query: &mut Query) -> Result<(), ParseError> {
        let key = self.next_identifier()?;
        let mut value = self.next_identifier()?;

        loop {
            match self.pull()? {
                Token::Identifier(word) => value.push_str(&word),
                Token::Symbol('/') => value.push('/'),
                // The wildcard marker has to reach the classification below.
                Token::Symbol('%') => value.push('%'),
                Token::Symbol('=') => continue,
                // Any other symbol, keyword, or end terminates the clause;
                // the terminator is discarded, not pushed back.
                _ => break,
            }
        }

        if self.strict && (key.is_empty() || value.is_empty()) {
            return Err(ParseError::MalformedFilter);
        }

        // Classification depends on the trailing character alone.
        match value.strip_suffix('%') {
            Some(prefix) => query.prefix_filter = FilterClause::new(key, prefix.to_string()),
            None => query.exact_filter = FilterClause::new(key, value),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn parse(input: &str) -> Query {
        Parser::new(input)
            .parse()
            .expect("lenient parse cannot fail")
    }

    #[test]
    fn test_parse_simple_query() {
        let query = parse("SELECT name FROM bucket1");
        assert_eq!(query.columns, vec!["name"]);
        assert_eq!(query.source, "bucket1");
        assert!(query.prefix_filter.is_empty());
        assert!(query.exact_filter.is_empty());
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        for input in [
            "select name from b",
            "SELECT name FROM b",
            "SeLeCt name FrOm b",
        ] {
            let query = parse(input);
            assert_eq!(query.source, "b", "input: {input}");
            assert_eq!(query.columns, vec!["name"], "input: {input}");
        }
    }

    #[test]
    fn test_identifiers_keep_their_case() {
        let query = parse("Select Name From b");
        assert_eq!(query.columns, vec!["Name"]);
        assert_eq!(query.source, "b");
    }

    #[test]
    fn test_column_list_with_commas_and_prefix_filter() {
        let query = parse("SELECT name, size FROM bucket1 WHERE prefix = foo%");
        assert_eq!(query.columns, vec!["name", "size"]);
        assert_eq!(query.source, "bucket1");
        assert_eq!(
            query.prefix_filter,
            FilterClause {
                key: "prefix".into(),
                value: "foo".into(),
            }
        );
        assert!(query.exact_filter.is_empty());
    }

    #[test]
    fn test_path_value_reassembles_across_tokens() {
        let query = parse("SELECT name FROM bucket1 WHERE prefix = a/b/c");
        assert_eq!(
            query.exact_filter,
            FilterClause {
                key: "prefix".into(),
                value: "a/b/c".into(),
            }
        );
        assert!(query.prefix_filter.is_empty());
    }

    #[test]
    fn test_empty_input_yields_zero_value_query() {
        let query = parse("");
        assert_eq!(query, Query::default());
    }

    #[test]
    fn test_unknown_columns_pass_through_unvalidated() {
        let query = parse("SELECT nosuchattr FROM bucket1");
        assert_eq!(query.columns, vec!["nosuchattr"]);
    }

    #[test]
    fn test_filter_classification_tracks_trailing_percent_only() {
        let exact = parse("SELECT name FROM b WHERE prefix = foo");
        assert_eq!(exact.exact_filter.value, "foo");
        assert!(exact.prefix_filter.is_empty());

        let prefixed = parse("SELECT name FROM b WHERE prefix = foo%");
        assert_eq!(prefixed.prefix_filter.value, "foo");
        assert!(prefixed.exact_filter.is_empty());

        // Re-appending the marker to an already-stripped value routes back to
        // the prefix side: classification is a function of the last character.
        let again = parse("SELECT name FROM b WHERE prefix = foo%");
        assert_eq!(again.prefix_filter, prefixed.prefix_filter);
    }

    #[test]
    fn test_duplicate_columns_are_kept_in_order() {
        let query = parse("SELECT name, size, name FROM b");
        assert_eq!(query.columns, vec!["name", "size", "name"]);
    }

    #[test]
    fn test_select_without_from_leaves_source_empty() {
        let query = parse("SELECT name");
        assert_eq!(query.columns, vec!["name"]);
        assert_eq!(query.source, "");
    }

    #[test]
    fn test_select_list_falls_through_to_source() {
        // The grammar assumes FROM always follows the column list, so the
        // token after the list's terminator becomes the source even when the
        // terminator was some other keyword.
        let query = parse("SELECT name WHERE x = y");
        assert_eq!(query.columns, vec!["name"]);
        assert_eq!(query.source, "x");
    }

    #[test]
    fn test_from_alone_sets_source() {
        let query = parse("FROM bucket2");
        assert_eq!(query.source, "bucket2");
        assert!(query.columns.is_empty());
    }

    #[test]
    fn test_strict_reports_missing_source_on_empty_input() {
        assert_eq!(
            Parser::strict("").parse().unwrap_err(),
            ParseError::MissingSource
        );
    }

    #[test]
    fn test_strict_reports_missing_select_list() {
        assert_eq!(
            Parser::strict("SELECT FROM bucket1").parse().unwrap_err(),
            ParseError::MissingSelectList
        );
    }

    #[test]
    fn test_strict_reports_malformed_filter() {
        assert_eq!(
            Parser::strict("SELECT name FROM bucket1 WHERE prefix")
                .parse()
                .unwrap_err(),
            ParseError::MalformedFilter
        );
    }

    #[test]
    fn test_strict_reports_unexpected_character() {
        assert_eq!(
            Parser::strict("SELECT name FROM b !").parse().unwrap_err(),
            ParseError::UnexpectedCharacter('!')
        );
    }

    #[test]
    fn test_strict_accepts_well_formed_query() -> Result<()> {
        let query = Parser::strict("SELECT name, size FROM bucket1 WHERE prefix = logs/2024%")
            .parse()?;
        assert_eq!(query.source, "bucket1");
        assert_eq!(query.prefix_filter.value, "logs/2024");
        Ok(())
    }

    #[test]
    fn test_lenient_ignores_unknown_symbols() {
        let query = parse("SELECT name FROM b !");
        assert_eq!(query.columns, vec!["name"]);
        assert_eq!(query.source, "b");
    }
}
