//! Report type clause: `SUMMARY` or `LIST`.

use super::descriptor::{QueryDraft, QueryType};
use super::error::ParseError;
use super::parser::ClauseParser;
use super::token::{Keyword, Token};

pub struct QueryTypeParser;

impl ClauseParser for QueryTypeParser {
    fn accepted_tokens(&self) -> Vec<Keyword> {
        vec![Keyword::Summary, Keyword::List]
    }

    fn parse<'t>(
        &self,
        tokens: &'t [Token],
        query: &mut QueryDraft,
    ) -> Result<&'t [Token], ParseError> {
        self.expect(tokens)?;

        query.query_type = match tokens[0].keyword() {
            Some(Keyword::List) => Some(QueryType::List),
            _ => Some(QueryType::Summary),
        };

        Ok(&tokens[1..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_type() {
        let tokens = [Token::Keyword(Keyword::List), Token::Number(1)];
        let mut draft = QueryDraft::new();
        let rest = QueryTypeParser.parse(&tokens, &mut draft).unwrap();
        assert_eq!(draft.query_type, Some(QueryType::List));
        assert_eq!(rest, &[Token::Number(1)]);
    }

    #[test]
    fn test_rejects_other_head() {
        let tokens = [Token::Keyword(Keyword::Week)];
        let mut draft = QueryDraft::new();
        let err = QueryTypeParser.parse(&tokens, &mut draft).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid token: \"WEEK\". Accepted at this position: SUMMARY, LIST"
        );
        assert_eq!(draft, QueryDraft::new());
    }
}
