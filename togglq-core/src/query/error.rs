//! Query tokenization and parse errors
//!
//! Every variant renders a message that names the offending token or value
//! and, where there is a fixed set, the alternatives accepted at that
//! position. Callers display these messages verbatim.

use thiserror::Error;

use super::descriptor::SelectionMode;
use super::token::Keyword;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Lexical: the piece is no keyword, date, number, string or tag
    #[error(
        "\"{token}\" is not a keyword, ISO-formatted date, decimal number, tag or string. \
         Hint: strings must be wrapped in quotation marks, dates must be formatted as \
         YYYY-MM-DD and tags must start with #."
    )]
    UnknownKeyword { token: String },

    /// Syntactic: head token is not accepted by the clause at this position
    #[error("Invalid token: \"{token}\". Accepted at this position: {}", .accepted.join(", "))]
    InvalidToken { token: String, accepted: Vec<String> },

    /// Syntactic: tokens remain after every clause was consumed
    #[error("Invalid token at end of query: \"{token}\"")]
    TooManyTokens { token: String },

    #[error(
        "Cannot convert to valid date: \"{value}\". Keyword \"{keyword}\" must be followed by \
         an ISO-formatted date. Example use: \"FROM 2021-01-01 TO 2021-01-31\""
    )]
    InvalidDateFormat { keyword: Keyword, value: String },

    #[error("The FROM date ({from}) must be before or the same as the TO date ({to}).")]
    InvalidInterval { from: String, to: String },

    #[error(
        "Reports are limited to time spans of at most {max} days; this query spans {days} days."
    )]
    IntervalTooLarge { days: i64, max: i64 },

    #[error(
        "Query must include a time interval expression. Available expressions: \
         \"TODAY\", \"WEEK\", \"MONTH\", \"PAST ... DAYS/WEEKS/MONTHS\", \"FROM ... TO ...\""
    )]
    NoTimeInterval,

    #[error("A query can only contain a single selection expression for keyword \"{qualifier}\"")]
    DuplicateSelection { qualifier: String },

    #[error(
        "\"{mode} {qualifier}\" must be followed by at least one item. \
         For example: '{mode} {qualifier} {example}'"
    )]
    NoUserInputTokens {
        mode: SelectionMode,
        qualifier: Keyword,
        example: &'static str,
    },

    #[error(
        "Clients can only be selected by name, found numeric id {id}. \
         For example: 'INCLUDE CLIENTS \"Client A\"'"
    )]
    NumericClientId { id: u64 },

    #[error("A query can only contain a single \"SORT\" expression.")]
    DuplicateSort,

    #[error("A query can only contain a single \"GROUP BY\" expression.")]
    DuplicateGroupBy,

    #[error("\"GROUP BY\" can only be used on \"LIST\" queries.")]
    GroupByRequiresList,

    #[error("Cannot define two titles for the same report! Title is already set: \"{title}\"")]
    DuplicateTitle { title: String },

    #[error(
        "\"TITLE\" must be followed by a string wrapped in double quotes. \
         For example: 'TITLE \"Work Projects\"'"
    )]
    MissingTitle,
}

impl ParseError {
    /// Builds an [`ParseError::InvalidToken`] from the head token and accepted keywords.
    pub(crate) fn invalid_token(token: String, accepted: &[Keyword]) -> Self {
        ParseError::InvalidToken {
            token,
            accepted: accepted.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_token_lists_alternatives() {
        let err = ParseError::invalid_token("WEEK".into(), &[Keyword::Asc, Keyword::Desc]);
        assert_eq!(
            err.to_string(),
            "Invalid token: \"WEEK\". Accepted at this position: ASC, DESC"
        );
    }

    #[test]
    fn test_no_user_input_message_names_clause() {
        let err = ParseError::NoUserInputTokens {
            mode: SelectionMode::Include,
            qualifier: Keyword::Projects,
            example: "\"Project A\", 12345678",
        };
        assert!(err
            .to_string()
            .starts_with("\"INCLUDE PROJECTS\" must be followed by at least one item"));
    }
}
