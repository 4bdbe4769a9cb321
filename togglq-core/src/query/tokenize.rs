//! Tokenizer for the report query language.
//!
//! The input is split on whitespace and commas. A single- or double-quoted
//! run is kept whole, so quoted strings may contain either separator.

use super::error::ParseError;
use super::token::{Keyword, Token};

/// Split a query string into tokens.
///
/// Returns [`ParseError::UnknownKeyword`] for the first piece that is not a
/// keyword, quoted string, `YYYY-MM-DD` date, `#tag` or decimal number.
pub fn tokenize(query: &str) -> Result<Vec<Token>, ParseError> {
    split(query).into_iter().map(classify).collect()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Break the input into raw pieces, keeping quoted runs intact.
fn split(query: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut chars = query.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if is_separator(c) {
            chars.next();
            continue;
        }

        let mut end = query.len();
        while let Some(&(i, c)) = chars.peek() {
            if is_separator(c) {
                end = i;
                break;
            }
            chars.next();
            if c == '"' || c == '\'' {
                // An unterminated quote swallows the rest of the input.
                for (_, inner) in chars.by_ref() {
                    if inner == c {
                        break;
                    }
                }
            }
        }
        pieces.push(&query[start..end]);
    }

    pieces
}

fn classify(piece: &str) -> Result<Token, ParseError> {
    if let Some(text) = quoted(piece) {
        return Ok(Token::Text(text.to_string()));
    }
    if let Some(keyword) = Keyword::lookup(piece) {
        return Ok(Token::Keyword(keyword));
    }
    if is_iso_date_shape(piece) {
        return Ok(Token::Date(piece.to_string()));
    }
    if let Some(tag) = piece.strip_prefix('#') {
        if !tag.is_empty() && !tag.contains(['"', '\'', '#']) {
            return Ok(Token::Tag(tag.to_lowercase()));
        }
    }
    if !piece.is_empty() && piece.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = piece.parse::<u64>() {
            return Ok(Token::Number(n));
        }
    }

    Err(ParseError::UnknownKeyword {
        token: piece.to_string(),
    })
}

/// Returns the inner text when the whole piece is one quoted string.
fn quoted(piece: &str) -> Option<&str> {
    let quote = piece.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let inner = piece.get(1..piece.len().checked_sub(1)?)?;
    if piece.len() >= 2 && piece.ends_with(quote) && !inner.contains(quote) {
        Some(inner)
    } else {
        None
    }
}

/// `YYYY-MM-DD` shape check; calendar validity is left to the parser.
fn is_iso_date_shape(piece: &str) -> bool {
    let bytes = piece.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
