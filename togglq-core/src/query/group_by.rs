//! Grouping clause: `GROUP BY DATE|PROJECT|CLIENT`, valid on `LIST` queries only.

use super::descriptor::{GroupBy, QueryDraft, QueryType};
use super::error::ParseError;
use super::parser::ClauseParser;
use super::token::{describe, Keyword, Token};

const GROUPINGS: [Keyword; 3] = [Keyword::Date, Keyword::Project, Keyword::Client];

pub struct GroupByParser;

impl ClauseParser for GroupByParser {
    fn accepted_tokens(&self) -> Vec<Keyword> {
        vec![Keyword::Group]
    }

    fn parse<'t>(
        &self,
        tokens: &'t [Token],
        query: &mut QueryDraft,
    ) -> Result<&'t [Token], ParseError> {
        self.expect(tokens)?;
        if !tokens.get(1).map_or(false, |t| t.is_keyword(Keyword::By)) {
            return Err(ParseError::invalid_token(
                describe(tokens.get(1)),
                &[Keyword::By],
            ));
        }
        if query.group_by.is_some() {
            return Err(ParseError::DuplicateGroupBy);
        }
        if query.query_type != Some(QueryType::List) {
            return Err(ParseError::GroupByRequiresList);
        }

        query.group_by = match tokens.get(2).and_then(Token::keyword) {
            Some(Keyword::Date) => Some(GroupBy::Date),
            Some(Keyword::Project) => Some(GroupBy::Project),
            Some(Keyword::Client) => Some(GroupBy::Client),
            _ => {
                return Err(ParseError::invalid_token(
                    describe(tokens.get(2)),
                    &GROUPINGS,
                ))
            }
        };

        Ok(&tokens[3..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(keyword: Keyword) -> Token {
        Token::Keyword(keyword)
    }

    fn list_draft() -> QueryDraft {
        QueryDraft {
            query_type: Some(QueryType::List),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_by_each_dimension() {
        for (keyword, expected) in [
            (Keyword::Date, GroupBy::Date),
            (Keyword::Project, GroupBy::Project),
            (Keyword::Client, GroupBy::Client),
        ] {
            let tokens = [
                kw(Keyword::Group),
                kw(Keyword::By),
                kw(keyword),
                Token::Text("extra token".into()),
            ];
            let mut draft = list_draft();
            let rest = GroupByParser.parse(&tokens, &mut draft).unwrap();
            assert_eq!(draft.group_by, Some(expected));
            assert_eq!(rest, &[Token::Text("extra token".into())]);
        }
    }

    #[test]
    fn test_unknown_grouping() {
        let tokens = [kw(Keyword::Group), kw(Keyword::By), kw(Keyword::Week)];
        let mut draft = list_draft();
        let err = GroupByParser.parse(&tokens, &mut draft).unwrap_err();
        assert!(err.to_string().starts_with("Invalid token: \"WEEK\""));
    }

    #[test]
    fn test_requires_by() {
        let tokens = [kw(Keyword::Group), kw(Keyword::Date)];
        let mut draft = list_draft();
        assert_eq!(
            GroupByParser.parse(&tokens, &mut draft),
            Err(ParseError::InvalidToken {
                token: "DATE".into(),
                accepted: vec!["BY".into()],
            })
        );
    }

    #[test]
    fn test_duplicate_group_by() {
        let tokens = [kw(Keyword::Group), kw(Keyword::By), kw(Keyword::Project)];
        let mut draft = list_draft();
        draft.group_by = Some(GroupBy::Date);
        assert_eq!(
            GroupByParser.parse(&tokens, &mut draft),
            Err(ParseError::DuplicateGroupBy)
        );
    }

    #[test]
    fn test_incompatible_query_type() {
        let tokens = [kw(Keyword::Group), kw(Keyword::By), kw(Keyword::Project)];
        let mut draft = QueryDraft {
            query_type: Some(QueryType::Summary),
            ..Default::default()
        };
        let err = GroupByParser.parse(&tokens, &mut draft).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"GROUP BY\" can only be used on \"LIST\" queries."
        );
    }
}
