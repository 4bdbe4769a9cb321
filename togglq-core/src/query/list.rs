//! Runs of user input values.

use super::token::Token;

/// Split off the user-input tokens at the head of `tokens`.
///
/// Stops at the first keyword, at the end of the stream or after `max`
/// values. Returns `(values, remaining)`; `values` may be empty, callers
/// decide whether that is an error.
pub fn parse_list(tokens: &[Token], max: Option<usize>) -> (&[Token], &[Token]) {
    let run = tokens
        .iter()
        .take_while(|token| token.is_user_input())
        .count();
    let len = max.map_or(run, |max| run.min(max));
    tokens.split_at(len)
}
