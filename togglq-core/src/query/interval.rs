//! Time interval clause.
//!
//! Accepted forms, all resolved against the date the parser was built with:
//! `TODAY`, `WEEK` (ISO week), `MONTH`, `PAST <n> DAYS|WEEKS|MONTHS` and
//! `FROM <date> TO <date|TODAY>`. Relative windows include the current
//! day, week or month, so `PAST 3 WEEKS` starts two weeks before this one.

use chrono::{Datelike, Days, Months, NaiveDate};

use super::descriptor::{check_interval, QueryDraft};
use super::error::ParseError;
use super::parser::ClauseParser;
use super::token::{describe, Keyword, Token};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub struct IntervalParser {
    today: NaiveDate,
}

impl IntervalParser {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    fn past(&self, tokens: &[Token]) -> Result<(NaiveDate, NaiveDate), ParseError> {
        let count = match tokens.get(1) {
            Some(Token::Number(n)) => *n,
            other => {
                return Err(ParseError::InvalidToken {
                    token: describe(other),
                    accepted: vec!["decimal number".to_string()],
                })
            }
        };

        let units = [Keyword::Days, Keyword::Weeks, Keyword::Months];
        let unit = match tokens.get(2).and_then(Token::keyword) {
            Some(unit) if units.contains(&unit) => unit,
            _ => return Err(ParseError::invalid_token(describe(tokens.get(2)), &units)),
        };

        // `back` is how many whole units precede the current one; PAST 0
        // starts one unit ahead and fails the ordering check.
        let back = count.checked_sub(1);
        let (from, to) = match unit {
            Keyword::Days => {
                let from = match back {
                    Some(b) => self.today.checked_sub_days(Days::new(b)),
                    None => self.today.checked_add_days(Days::new(1)),
                };
                (from, self.today)
            }
            Keyword::Weeks => {
                let (start, end) = week_bounds(self.today);
                let from = match back {
                    Some(b) => b
                        .checked_mul(7)
                        .and_then(|days| start.checked_sub_days(Days::new(days))),
                    None => start.checked_add_days(Days::new(7)),
                };
                (from, end)
            }
            _ => {
                let (start, end) = month_bounds(self.today);
                let from = match back {
                    Some(b) => u32::try_from(b)
                        .ok()
                        .and_then(|months| start.checked_sub_months(Months::new(months))),
                    None => start.checked_add_months(Months::new(1)),
                };
                (from, end)
            }
        };

        Ok((from.unwrap_or(NaiveDate::MIN), to))
    }

    fn absolute(&self, tokens: &[Token]) -> Result<(NaiveDate, NaiveDate), ParseError> {
        let from = strict_date(Keyword::From, tokens.get(1))?;

        if !tokens.get(2).map_or(false, |t| t.is_keyword(Keyword::To)) {
            return Err(ParseError::invalid_token(
                describe(tokens.get(2)),
                &[Keyword::To],
            ));
        }

        let to = match tokens.get(3) {
            Some(Token::Keyword(Keyword::Today)) => self.today,
            other => strict_date(Keyword::To, other)?,
        };

        Ok((from, to))
    }
}

impl ClauseParser for IntervalParser {
    fn accepted_tokens(&self) -> Vec<Keyword> {
        vec![
            Keyword::Today,
            Keyword::Week,
            Keyword::Month,
            Keyword::From,
            Keyword::Past,
        ]
    }

    fn parse<'t>(
        &self,
        tokens: &'t [Token],
        query: &mut QueryDraft,
    ) -> Result<&'t [Token], ParseError> {
        let ((from, to), consumed) = match tokens.first().and_then(Token::keyword) {
            Some(Keyword::Today) => ((self.today, self.today), 1),
            Some(Keyword::Week) => (week_bounds(self.today), 1),
            Some(Keyword::Month) => (month_bounds(self.today), 1),
            Some(Keyword::Past) => (self.past(tokens)?, 3),
            Some(Keyword::From) => (self.absolute(tokens)?, 4),
            _ => return Err(ParseError::NoTimeInterval),
        };

        check_interval(from, to)?;

        query.from = Some(from);
        query.to = Some(to);

        Ok(&tokens[consumed..])
    }
}

fn strict_date(keyword: Keyword, token: Option<&Token>) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidDateFormat {
        keyword,
        value: describe(token),
    };
    match token {
        Some(Token::Date(value)) => {
            NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|_| invalid())
        }
        _ => Err(invalid()),
    }
}

/// Monday and Sunday of the ISO week containing `date`.
///
/// Weeks cut off by the calendar's ends are clamped to `NaiveDate::MIN`
/// and `NaiveDate::MAX`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let start = date
        .checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN);
    let end = start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Days::new(u64::from(date.day0()));
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).unwrap()
    }

    fn kw(keyword: Keyword) -> Token {
        Token::Keyword(keyword)
    }

    fn extra() -> Token {
        Token::Text("extra_token".into())
    }

    /// Parse `input` on `today` and return (from, to, remaining).
    fn run(today: &str, input: &[Token]) -> (NaiveDate, NaiveDate, Vec<Token>) {
        let mut draft = QueryDraft::new();
        let rest = IntervalParser::new(date(today))
            .parse(input, &mut draft)
            .unwrap();
        (draft.from.unwrap(), draft.to.unwrap(), rest.to_vec())
    }

    fn run_err(today: &str, input: &[Token]) -> ParseError {
        let mut draft = QueryDraft::new();
        IntervalParser::new(date(today))
            .parse(input, &mut draft)
            .unwrap_err()
    }

    #[test]
    fn test_today() {
        let (from, to, rest) = run("2020-01-31", &[kw(Keyword::Today), extra()]);
        assert_eq!((from, to), (date("2020-01-31"), date("2020-01-31")));
        assert_eq!(rest, vec![extra()]);
    }

    #[test]
    fn test_week() {
        let (from, to, rest) = run("2020-01-31", &[kw(Keyword::Week), extra()]);
        assert_eq!((from, to), (date("2020-01-27"), date("2020-02-02")));
        assert_eq!(rest, vec![extra()]);
    }

    #[test]
    fn test_month_january_and_leap_february() {
        let (from, to, _) = run("2020-01-31", &[kw(Keyword::Month)]);
        assert_eq!((from, to), (date("2020-01-01"), date("2020-01-31")));

        let (from, to, _) = run("2020-02-04", &[kw(Keyword::Month)]);
        assert_eq!((from, to), (date("2020-02-01"), date("2020-02-29")));
    }

    #[test]
    fn test_past_days_includes_today() {
        let input = [kw(Keyword::Past), Token::Number(10), kw(Keyword::Days), extra()];
        let (from, to, rest) = run("2020-01-10", &input);
        assert_eq!((from, to), (date("2020-01-01"), date("2020-01-10")));
        assert_eq!(rest, vec![extra()]);
    }

    #[test]
    fn test_past_weeks_includes_current_week() {
        let input = [kw(Keyword::Past), Token::Number(3), kw(Keyword::Weeks)];
        let (from, to, _) = run("2020-02-01", &input);
        assert_eq!((from, to), (date("2020-01-13"), date("2020-02-02")));
    }

    #[test]
    fn test_past_months_includes_current_month() {
        let input = [kw(Keyword::Past), Token::Number(3), kw(Keyword::Months)];
        let (from, to, _) = run("2020-01-28", &input);
        assert_eq!((from, to), (date("2019-11-01"), date("2020-01-31")));
    }

    #[test]
    fn test_past_requires_number_and_unit() {
        let err = run_err("2020-01-31", &[kw(Keyword::Past), kw(Keyword::Days)]);
        assert_eq!(
            err,
            ParseError::InvalidToken {
                token: "DAYS".into(),
                accepted: vec!["decimal number".into()],
            }
        );

        let err = run_err("2020-01-31", &[kw(Keyword::Past), Token::Number(3)]);
        assert_eq!(
            err,
            ParseError::InvalidToken {
                token: "end of query".into(),
                accepted: vec!["DAYS".into(), "WEEKS".into(), "MONTHS".into()],
            }
        );
    }

    #[test]
    fn test_past_zero_is_an_empty_window() {
        let input = [kw(Keyword::Past), Token::Number(0), kw(Keyword::Days)];
        assert!(matches!(
            run_err("2020-01-31", &input),
            ParseError::InvalidInterval { .. }
        ));
    }

    #[test]
    fn test_huge_past_count_is_too_large() {
        let input = [kw(Keyword::Past), Token::Number(u64::MAX), kw(Keyword::Months)];
        assert!(matches!(
            run_err("2020-01-31", &input),
            ParseError::IntervalTooLarge { .. }
        ));
    }

    #[test]
    fn test_from_to_dates() {
        let input = [
            kw(Keyword::From),
            Token::Date("2020-01-01".into()),
            kw(Keyword::To),
            Token::Date("2020-03-01".into()),
            extra(),
        ];
        let (from, to, rest) = run("2020-01-31", &input);
        assert_eq!((from, to), (date("2020-01-01"), date("2020-03-01")));
        assert_eq!(rest, vec![extra()]);
    }

    #[test]
    fn test_from_to_today() {
        let input = [
            kw(Keyword::From),
            Token::Date("2020-01-15".into()),
            kw(Keyword::To),
            kw(Keyword::Today),
        ];
        let (from, to, _) = run("2020-01-31", &input);
        assert_eq!((from, to), (date("2020-01-15"), date("2020-01-31")));
    }

    #[test]
    fn test_from_requires_calendar_date() {
        let input = [
            kw(Keyword::From),
            Token::Date("2020-02-30".into()),
            kw(Keyword::To),
            kw(Keyword::Today),
        ];
        assert_eq!(
            run_err("2020-03-31", &input),
            ParseError::InvalidDateFormat {
                keyword: Keyword::From,
                value: "2020-02-30".into(),
            }
        );
    }

    #[test]
    fn test_to_requires_date() {
        let input = [
            kw(Keyword::From),
            Token::Date("2020-01-01".into()),
            kw(Keyword::To),
            Token::Number(5),
        ];
        assert_eq!(
            run_err("2020-01-31", &input),
            ParseError::InvalidDateFormat {
                keyword: Keyword::To,
                value: "5".into(),
            }
        );
    }

    #[test]
    fn test_from_requires_to_keyword() {
        let input = [
            kw(Keyword::From),
            Token::Date("2020-01-01".into()),
            Token::Date("2020-01-05".into()),
        ];
        assert!(matches!(
            run_err("2020-01-31", &input),
            ParseError::InvalidToken { .. }
        ));
    }

    #[test]
    fn test_year_ceiling_is_inclusive() {
        // 2020 is a leap year: Jan 1 through Dec 31 is exactly 366 days.
        let accepted = [
            kw(Keyword::From),
            Token::Date("2020-01-01".into()),
            kw(Keyword::To),
            Token::Date("2020-12-31".into()),
        ];
        run("2021-01-01", &accepted);

        let rejected = [
            kw(Keyword::From),
            Token::Date("2019-12-31".into()),
            kw(Keyword::To),
            Token::Date("2020-12-31".into()),
        ];
        assert_eq!(
            run_err("2021-01-01", &rejected),
            ParseError::IntervalTooLarge { days: 367, max: 366 }
        );
    }

    #[test]
    fn test_other_head_has_no_interval() {
        assert_eq!(
            run_err("2020-01-31", &[kw(Keyword::Sort)]),
            ParseError::NoTimeInterval
        );
        assert_eq!(run_err("2020-01-31", &[]), ParseError::NoTimeInterval);
    }

    #[test]
    fn test_bounds_helpers() {
        assert_eq!(
            week_bounds(date("2020-02-02")),
            (date("2020-01-27"), date("2020-02-02"))
        );
        assert_eq!(
            month_bounds(date("2019-12-15")),
            (date("2019-12-01"), date("2019-12-31"))
        );
    }

    #[test]
    fn test_week_at_calendar_ends_is_clamped() {
        for today in [NaiveDate::MIN, NaiveDate::MAX] {
            for head in [Keyword::Week, Keyword::Month] {
                let mut draft = QueryDraft::new();
                IntervalParser::new(today)
                    .parse(&[kw(head)], &mut draft)
                    .unwrap();
                let (from, to) = (draft.from.unwrap(), draft.to.unwrap());
                assert!(from <= today && today <= to, "{head} at {today}");
                assert!((to - from).num_days() < 31);
            }
        }

        let past = [kw(Keyword::Past), Token::Number(3), kw(Keyword::Weeks)];
        let mut draft = QueryDraft::new();
        IntervalParser::new(NaiveDate::MIN)
            .parse(&past, &mut draft)
            .unwrap();
        assert_eq!(draft.from, Some(NaiveDate::MIN));
    }
}
