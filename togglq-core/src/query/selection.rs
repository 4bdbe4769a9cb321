//! Selection clauses: `INCLUDE|EXCLUDE PROJECTS|CLIENTS|TAGS <values>`.
//!
//! Projects accept names and numeric ids. Clients accept names only. Tags
//! accept `#tag` tokens or quoted names, both stored lowercased.

use super::descriptor::{QueryDraft, Selection, SelectionItem, SelectionMode};
use super::error::ParseError;
use super::list::parse_list;
use super::parser::ClauseParser;
use super::token::{describe, Keyword, Token};

const QUALIFIERS: [Keyword; 3] = [Keyword::Projects, Keyword::Clients, Keyword::Tags];

pub struct SelectionParser;

impl ClauseParser for SelectionParser {
    fn accepted_tokens(&self) -> Vec<Keyword> {
        vec![Keyword::Include, Keyword::Exclude]
    }

    fn parse<'t>(
        &self,
        tokens: &'t [Token],
        query: &mut QueryDraft,
    ) -> Result<&'t [Token], ParseError> {
        self.expect(tokens)?;

        let mode = match tokens[0].keyword() {
            Some(Keyword::Exclude) => SelectionMode::Exclude,
            _ => SelectionMode::Include,
        };

        let qualifier = match tokens.get(1).and_then(Token::keyword) {
            Some(q) if QUALIFIERS.contains(&q) => q,
            _ => {
                return Err(ParseError::invalid_token(
                    describe(tokens.get(1)),
                    &QUALIFIERS,
                ))
            }
        };

        let already_set = match (qualifier, mode) {
            (Keyword::Projects, _) => query.project_selection.is_some(),
            (Keyword::Clients, _) => query.client_selection.is_some(),
            (_, SelectionMode::Include) => query.included_tags.is_some(),
            (_, SelectionMode::Exclude) => query.excluded_tags.is_some(),
        };
        if already_set {
            return Err(ParseError::DuplicateSelection {
                qualifier: qualifier.to_string(),
            });
        }

        let (values, rest) = parse_list(&tokens[2..], None);
        if values.is_empty() {
            return Err(ParseError::NoUserInputTokens {
                mode,
                qualifier,
                example: example_for(qualifier),
            });
        }

        match qualifier {
            Keyword::Projects => {
                let list = values.iter().map(project_item).collect::<Result<_, _>>()?;
                query.project_selection = Some(Selection { mode, list });
            }
            Keyword::Clients => {
                let list = values.iter().map(client_item).collect::<Result<_, _>>()?;
                query.client_selection = Some(Selection { mode, list });
            }
            _ => {
                let tags = values.iter().map(tag_item).collect::<Result<_, _>>()?;
                match mode {
                    SelectionMode::Include => query.included_tags = Some(tags),
                    SelectionMode::Exclude => query.excluded_tags = Some(tags),
                }
            }
        }

        Ok(rest)
    }
}

fn example_for(qualifier: Keyword) -> &'static str {
    match qualifier {
        Keyword::Projects => "\"Project A\", 12345678, \"Project C\"",
        Keyword::Clients => "\"Client A\", \"Client B\"",
        _ => "#billable, #meetings",
    }
}

fn project_item(token: &Token) -> Result<SelectionItem, ParseError> {
    match token {
        Token::Number(id) => Ok(SelectionItem::Id(*id)),
        Token::Text(name) | Token::Date(name) => Ok(SelectionItem::Name(name.clone())),
        other => Err(ParseError::InvalidToken {
            token: other.to_string(),
            accepted: vec!["project name".to_string(), "project id".to_string()],
        }),
    }
}

fn client_item(token: &Token) -> Result<SelectionItem, ParseError> {
    match token {
        Token::Number(id) => Err(ParseError::NumericClientId { id: *id }),
        Token::Text(name) | Token::Date(name) => Ok(SelectionItem::Name(name.clone())),
        other => Err(ParseError::InvalidToken {
            token: other.to_string(),
            accepted: vec!["client name".to_string()],
        }),
    }
}

fn tag_item(token: &Token) -> Result<String, ParseError> {
    match token {
        Token::Tag(tag) => Ok(tag.clone()),
        Token::Text(name) => Ok(name.to_lowercase()),
        other => Err(ParseError::InvalidToken {
            token: other.to_string(),
            accepted: vec!["#tag".to_string(), "tag name".to_string()],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(keyword: Keyword) -> Token {
        Token::Keyword(keyword)
    }

    fn text(s: &str) -> Token {
        Token::Text(s.into())
    }

    #[test]
    fn test_include_projects_stops_at_keyword() {
        let tokens = [
            kw(Keyword::Include),
            kw(Keyword::Projects),
            text("project A"),
            Token::Number(1234),
            kw(Keyword::Sort),
        ];
        let mut draft = QueryDraft::new();
        let rest = SelectionParser.parse(&tokens, &mut draft).unwrap();

        assert_eq!(rest, &[kw(Keyword::Sort)]);
        assert_eq!(
            draft.project_selection,
            Some(Selection {
                mode: SelectionMode::Include,
                list: vec![
                    SelectionItem::Name("project A".into()),
                    SelectionItem::Id(1234)
                ],
            })
        );
    }

    #[test]
    fn test_empty_list_names_expected_syntax() {
        let tokens = [kw(Keyword::Exclude), kw(Keyword::Clients), kw(Keyword::Sort)];
        let mut draft = QueryDraft::new();
        let err = SelectionParser.parse(&tokens, &mut draft).unwrap_err();
        assert!(matches!(err, ParseError::NoUserInputTokens { .. }));
        assert!(err.to_string().contains("EXCLUDE CLIENTS \"Client A\""));
    }

    #[test]
    fn test_numeric_client_ids_are_rejected() {
        let tokens = [
            kw(Keyword::Include),
            kw(Keyword::Clients),
            text("Acme"),
            Token::Number(42),
        ];
        let mut draft = QueryDraft::new();
        assert_eq!(
            SelectionParser.parse(&tokens, &mut draft),
            Err(ParseError::NumericClientId { id: 42 })
        );
    }

    #[test]
    fn test_tags_accept_hash_and_quoted_names() {
        let tokens = [
            kw(Keyword::Include),
            kw(Keyword::Tags),
            Token::Tag("billed".into()),
            text("Deep Work"),
        ];
        let mut draft = QueryDraft::new();
        SelectionParser.parse(&tokens, &mut draft).unwrap();
        assert_eq!(
            draft.included_tags,
            Some(vec!["billed".to_string(), "deep work".to_string()])
        );
    }

    #[test]
    fn test_tags_reject_numbers() {
        let tokens = [kw(Keyword::Exclude), kw(Keyword::Tags), Token::Number(7)];
        let mut draft = QueryDraft::new();
        assert!(matches!(
            SelectionParser.parse(&tokens, &mut draft),
            Err(ParseError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_include_and_exclude_tags_are_independent() {
        let mut draft = QueryDraft::new();
        let exclude = [kw(Keyword::Exclude), kw(Keyword::Tags), Token::Tag("a".into())];
        let include = [kw(Keyword::Include), kw(Keyword::Tags), Token::Tag("b".into())];
        SelectionParser.parse(&exclude, &mut draft).unwrap();
        SelectionParser.parse(&include, &mut draft).unwrap();

        assert_eq!(
            SelectionParser.parse(&include, &mut draft),
            Err(ParseError::DuplicateSelection {
                qualifier: "TAGS".into()
            })
        );
    }

    #[test]
    fn test_unknown_qualifier() {
        let tokens = [kw(Keyword::Include), kw(Keyword::Weeks), text("x")];
        let mut draft = QueryDraft::new();
        let err = SelectionParser.parse(&tokens, &mut draft).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid token: \"WEEKS\". Accepted at this position: PROJECTS, CLIENTS, TAGS"
        );
    }
}
