//! Report query language.
//!
//! A query such as `LIST PAST 2 WEEKS INCLUDE PROJECTS "Website" SORT DESC`
//! is tokenized ([`tokenize`]) and then parsed clause by clause into a
//! [`Query`] descriptor ([`parse`], [`parse_at`]).

mod descriptor;
mod error;
mod group_by;
mod interval;
mod list;
mod parser;
mod query_type;
mod render;
mod selection;
mod sort;
mod title;
mod token;
mod tokenize;

pub use descriptor::{
    GroupBy, Query, QueryDraft, QueryType, Selection, SelectionItem, SelectionMode, SortOrder,
    MAX_INTERVAL_DAYS,
};
pub use error::ParseError;
pub use interval::{month_bounds, week_bounds};
pub use parser::{parse, parse_at, parse_tokens, ClauseParser, CombinedParser};
pub use token::{Keyword, Token};
pub use tokenize::tokenize;
