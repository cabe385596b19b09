use std::fmt;

/// Built-in functions recognised by the lexer.
///
/// A name in this list is always lexed as a function, so a field called
/// `year` or `length` cannot be referenced as a bare property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Cast,
    Ceiling,
    Concat,
    Contains,
    Date,
    Day,
    EndsWith,
    FractionalSeconds,
    Floor,
    HasSubsequence,
    HasSubset,
    Hour,
    IndexOf,
    IsOf,
    Length,
    MatchesPattern,
    MaxDateTime,
    MinDateTime,
    Minute,
    Month,
    Now,
    Replace,
    Round,
    Second,
    StartsWith,
    Substring,
    SubstringOf,
    Time,
    ToLower,
    TotalOffsetMinutes,
    TotalSeconds,
    ToUpper,
    Trim,
    Year,
}

impl Function {
    /// Every function, in declaration order. The lexer builds its
    /// alternation from this order.
    pub const ALL: [Function; 34] = [
        Function::Cast,
        Function::Ceiling,
        Function::Concat,
        Function::Contains,
        Function::Date,
        Function::Day,
        Function::EndsWith,
        Function::FractionalSeconds,
        Function::Floor,
        Function::HasSubsequence,
        Function::HasSubset,
        Function::Hour,
        Function::IndexOf,
        Function::IsOf,
        Function::Length,
        Function::MatchesPattern,
        Function::MaxDateTime,
        Function::MinDateTime,
        Function::Minute,
        Function::Month,
        Function::Now,
        Function::Replace,
        Function::Round,
        Function::Second,
        Function::StartsWith,
        Function::Substring,
        Function::SubstringOf,
        Function::Time,
        Function::ToLower,
        Function::TotalOffsetMinutes,
        Function::TotalSeconds,
        Function::ToUpper,
        Function::Trim,
        Function::Year,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Cast => "cast",
            Function::Ceiling => "ceiling",
            Function::Concat => "concat",
            Function::Contains => "contains",
            Function::Date => "date",
            Function::Day => "day",
            Function::EndsWith => "endswith",
            Function::FractionalSeconds => "fractionalseconds",
            Function::Floor => "floor",
            Function::HasSubsequence => "hassubsequence",
            Function::HasSubset => "hassubset",
            Function::Hour => "hour",
            Function::IndexOf => "indexof",
            Function::IsOf => "isof",
            Function::Length => "length",
            Function::MatchesPattern => "matchesPattern",
            Function::MaxDateTime => "maxdatetime",
            Function::MinDateTime => "mindatetime",
            Function::Minute => "minute",
            Function::Month => "month",
            Function::Now => "now",
            Function::Replace => "replace",
            Function::Round => "round",
            Function::Second => "second",
            Function::StartsWith => "startswith",
            Function::Substring => "substring",
            Function::SubstringOf => "substringof",
            Function::Time => "time",
            Function::ToLower => "tolower",
            Function::TotalOffsetMinutes => "totaloffsetminutes",
            Function::TotalSeconds => "totalseconds",
            Function::ToUpper => "toupper",
            Function::Trim => "trim",
            Function::Year => "year",
        }
    }

    /// Case-insensitive lookup, returning the declared spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|function| function.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
