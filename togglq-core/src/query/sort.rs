//! Sort clause: `SORT ASC|DESC`.

use super::descriptor::{QueryDraft, SortOrder};
use super::error::ParseError;
use super::parser::ClauseParser;
use super::token::{describe, Keyword, Token};

pub struct SortParser;

impl ClauseParser for SortParser {
    fn accepted_tokens(&self) -> Vec<Keyword> {
        vec![Keyword::Sort]
    }

    fn parse<'t>(
        &self,
        tokens: &'t [Token],
        query: &mut QueryDraft,
    ) -> Result<&'t [Token], ParseError> {
        self.expect(tokens)?;
        if query.sort.is_some() {
            return Err(ParseError::DuplicateSort);
        }

        query.sort = match tokens.get(1).and_then(Token::keyword) {
            Some(Keyword::Asc) => Some(SortOrder::Asc),
            Some(Keyword::Desc) => Some(SortOrder::Desc),
            _ => {
                return Err(ParseError::invalid_token(
                    describe(tokens.get(1)),
                    &[Keyword::Asc, Keyword::Desc],
                ))
            }
        };

        Ok(&tokens[2..])
    }
}
