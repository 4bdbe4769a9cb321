//! Parser chain for the report query language.
//!
//! Each clause of the grammar has its own [`ClauseParser`]. Parsers receive
//! the remaining tokens as a slice, write what they recognize into a
//! [`QueryDraft`] and hand back the slice that follows their clause.
//!
//! ```text
//! query     := type interval clause*
//! type      := SUMMARY | LIST
//! interval  := TODAY | WEEK | MONTH
//!            | PAST <n> (DAYS | WEEKS | MONTHS)
//!            | FROM <date> TO (<date> | TODAY)
//! clause    := selection | sort | group | title
//! selection := (INCLUDE | EXCLUDE) (PROJECTS | CLIENTS | TAGS) <value>+
//! sort      := SORT (ASC | DESC)
//! group     := GROUP BY (DATE | PROJECT | CLIENT)
//! title     := TITLE "<text>"
//! ```

use chrono::NaiveDate;

use super::descriptor::{Query, QueryDraft};
use super::error::ParseError;
use super::group_by::GroupByParser;
use super::interval::IntervalParser;
use super::query_type::QueryTypeParser;
use super::selection::SelectionParser;
use super::sort::SortParser;
use super::title::TitleParser;
use super::token::{describe, Keyword, Token};
use super::tokenize::tokenize;

/// One clause of the query grammar.
pub trait ClauseParser {
    /// Keywords this parser accepts at the head of the token stream.
    fn accepted_tokens(&self) -> Vec<Keyword>;

    /// Consume one clause from the head of `tokens`, recording it in `query`.
    ///
    /// Returns the tokens following the clause.
    fn parse<'t>(
        &self,
        tokens: &'t [Token],
        query: &mut QueryDraft,
    ) -> Result<&'t [Token], ParseError>;

    /// True when the head token is one this parser accepts. Never mutates.
    fn test(&self, tokens: &[Token]) -> bool {
        tokens
            .first()
            .and_then(Token::keyword)
            .map_or(false, |head| self.accepted_tokens().contains(&head))
    }

    /// Like [`ClauseParser::test`] but reports the accepted set on failure.
    fn expect(&self, tokens: &[Token]) -> Result<(), ParseError> {
        if self.test(tokens) {
            Ok(())
        } else {
            Err(ParseError::invalid_token(
                describe(tokens.first()),
                &self.accepted_tokens(),
            ))
        }
    }
}

/// Delegates to the first member parser that accepts the head token.
pub struct CombinedParser {
    parsers: Vec<Box<dyn ClauseParser>>,
}

impl CombinedParser {
    pub fn new(parsers: Vec<Box<dyn ClauseParser>>) -> Self {
        Self { parsers }
    }
}

impl ClauseParser for CombinedParser {
    fn accepted_tokens(&self) -> Vec<Keyword> {
        self.parsers
            .iter()
            .flat_map(|parser| parser.accepted_tokens())
            .collect()
    }

    fn parse<'t>(
        &self,
        tokens: &'t [Token],
        query: &mut QueryDraft,
    ) -> Result<&'t [Token], ParseError> {
        match self.parsers.iter().find(|parser| parser.test(tokens)) {
            Some(parser) => parser.parse(tokens, query),
            None => Err(ParseError::invalid_token(
                describe(tokens.first()),
                &self.accepted_tokens(),
            )),
        }
    }
}

/// Parse a query string relative to today's local date.
pub fn parse(input: &str) -> Result<Query, ParseError> {
    parse_at(input, chrono::Local::now().date_naive())
}

/// Parse a query string relative to the given date.
pub fn parse_at(input: &str, today: NaiveDate) -> Result<Query, ParseError> {
    let tokens = tokenize(input)?;
    parse_tokens(&tokens, today)
}

/// Parse an already tokenized query relative to the given date.
pub fn parse_tokens(tokens: &[Token], today: NaiveDate) -> Result<Query, ParseError> {
    let mut draft = QueryDraft::new();

    let mut rest = QueryTypeParser.parse(tokens, &mut draft)?;
    rest = IntervalParser::new(today).parse(rest, &mut draft)?;

    let clauses = CombinedParser::new(vec![
        Box::new(SelectionParser),
        Box::new(SortParser),
        Box::new(GroupByParser),
        Box::new(TitleParser),
    ]);
    while clauses.test(rest) {
        rest = clauses.parse(rest, &mut draft)?;
    }

    if let Some(leftover) = rest.first() {
        return Err(ParseError::TooManyTokens {
            token: describe(Some(leftover)),
        });
    }

    let query = draft.finish()?;
    tracing::debug!(
        query_type = ?query.query_type,
        from = %query.from,
        to = %query.to,
        "Parsed report query"
    );
    Ok(query)
}
