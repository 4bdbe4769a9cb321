//! Custom title clause: `TITLE "<text>"`.

use super::descriptor::QueryDraft;
use super::error::ParseError;
use super::list::parse_list;
use super::parser::ClauseParser;
use super::token::{Keyword, Token};

pub struct TitleParser;

impl ClauseParser for TitleParser {
    fn accepted_tokens(&self) -> Vec<Keyword> {
        vec![Keyword::Title]
    }

    fn parse<'t>(
        &self,
        tokens: &'t [Token],
        query: &mut QueryDraft,
    ) -> Result<&'t [Token], ParseError> {
        self.expect(tokens)?;
        if let Some(title) = &query.custom_title {
            return Err(ParseError::DuplicateTitle {
                title: title.clone(),
            });
        }

        let (values, rest) = parse_list(&tokens[1..], Some(1));
        match values.first() {
            Some(Token::Text(title)) => {
                query.custom_title = Some(title.clone());
                Ok(rest)
            }
            _ => Err(ParseError::MissingTitle),
        }
    }
}
