//! Query language vocabulary: keywords and tokens.

use std::fmt;

/// A reserved, case-insensitive word of the query language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // query type
    Summary,
    List,

    // time interval
    Today,
    Week,
    Month,
    Past,
    Days,
    Weeks,
    Months,
    From,
    To,

    // selection
    Include,
    Exclude,
    Projects,
    Clients,
    Tags,

    // grouping
    Group,
    By,
    Date,
    Project,
    Client,

    // sorting
    Sort,
    Asc,
    Desc,

    // presentation
    Title,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: [Keyword; 25] = [
        Keyword::Summary,
        Keyword::List,
        Keyword::Today,
        Keyword::Week,
        Keyword::Month,
        Keyword::Past,
        Keyword::Days,
        Keyword::Weeks,
        Keyword::Months,
        Keyword::From,
        Keyword::To,
        Keyword::Include,
        Keyword::Exclude,
        Keyword::Projects,
        Keyword::Clients,
        Keyword::Tags,
        Keyword::Group,
        Keyword::By,
        Keyword::Date,
        Keyword::Project,
        Keyword::Client,
        Keyword::Sort,
        Keyword::Asc,
        Keyword::Desc,
        Keyword::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Summary => "SUMMARY",
            Keyword::List => "LIST",
            Keyword::Today => "TODAY",
            Keyword::Week => "WEEK",
            Keyword::Month => "MONTH",
            Keyword::Past => "PAST",
            Keyword::Days => "DAYS",
            Keyword::Weeks => "WEEKS",
            Keyword::Months => "MONTHS",
            Keyword::From => "FROM",
            Keyword::To => "TO",
            Keyword::Include => "INCLUDE",
            Keyword::Exclude => "EXCLUDE",
            Keyword::Projects => "PROJECTS",
            Keyword::Clients => "CLIENTS",
            Keyword::Tags => "TAGS",
            Keyword::Group => "GROUP",
            Keyword::By => "BY",
            Keyword::Date => "DATE",
            Keyword::Project => "PROJECT",
            Keyword::Client => "CLIENT",
            Keyword::Sort => "SORT",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Title => "TITLE",
        }
    }

    /// Case-insensitive keyword lookup.
    pub fn lookup(word: &str) -> Option<Keyword> {
        Keyword::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexical unit of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    /// Non-negative decimal literal
    Number(u64),
    /// `YYYY-MM-DD`-shaped literal; not yet validated as a calendar date
    Date(String),
    /// Quoted string, quotes stripped
    Text(String),
    /// `#tag`, lowercased with the marker stripped
    Tag(String),
}

impl Token {
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    /// True for anything the user typed as a value rather than a keyword.
    pub fn is_user_input(&self) -> bool {
        !matches!(self, Token::Keyword(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(k) => write!(f, "{}", k),
            Token::Number(n) => write!(f, "{}", n),
            Token::Date(d) => f.write_str(d),
            Token::Text(s) => write!(f, "\"{}\"", s),
            Token::Tag(t) => write!(f, "#{}", t),
        }
    }
}

/// Renders an optional head token for diagnostics.
///
/// Error messages quote the result themselves, so text is given bare.
pub(crate) fn describe(token: Option<&Token>) -> String {
    match token {
        Some(Token::Text(text)) => text.clone(),
        Some(token) => token.to_string(),
        None => "end of query".to_string(),
    }
}
