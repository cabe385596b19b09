//! Documentation content for the odata-filter CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Functions,
    Aliases,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "functions" | "function" | "fns" => Some(Self::Functions),
            "aliases" | "alias" | "captures" => Some(Self::Aliases),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"ODATA-FILTER DOCUMENTATION

odata-filter reads OData $filter expressions, prints their canonical tree,
matches condition templates against filters, and writes filters back as text.

DOCUMENTATION CATEGORIES

  syntax            Literals, properties, navigation paths, groups and lambdas
  operators         Comparison, logical and arithmetic operators with precedence
  functions         Built-in function names
  aliases           @placeholders, capturing values and rewriting filters

QUICK REFERENCE

  Price gt 100                       Comparison
  Title eq 'Dune' and Pages gt 300   Logical combination
  contains(Name, 'corp')             Function call
  Orders/any(o: o/Total gt 100)      Lambda over a collection
  Title eq @title                    Alias placeholder

Run 'odata-filter doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Functions) => Ok(FUNCTIONS_DOC),
        Some(DocCategory::Aliases) => Ok(ALIASES_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Filter Expressions

LITERALS
  'text'                 String. Write '' for a quote inside: 'O''Neil'
  42  -7  3.5  1e-3      Number
  true  false            Boolean
  null                   Null
  NaN  INF               Special numbers
  2022-03-09             Date
  2022-03-09T23:00:00Z   Date-time, UTC
  01234567-89ab-...      GUID (8-4-4-4-12 digits)

    Keywords are case-sensitive: 'True' is a property name, not a boolean.

PROPERTIES
  Title
    A field of the current item. Names are letters, digits and underscores
    and start with a letter.

NAVIGATION
  ShipTo/City eq 'Madrid'
    Segments joined with '/' reach into nested fields.

  Country/City/$count gt 3
    Segments starting with '$' are path literals.

GROUPS
  (Price gt 5)
    Parentheses group an expression.

  Id in (1, 2, 3)
  Id in [1, 2, 3]
    A group with several elements is a collection.

NEGATION
  not IsActive
  -Price
    Both forms produce the same tree.

LAMBDAS
  Orders/any(o: o/Total gt 100)
  Orders/all(o: o/Articles/any(a: a/Price lt 5))
    'any' and 'all' quantify over a collection. The name before ':' is the
    variable bound to each member.

CANONICAL FORM
    Chains of one associative operator collapse into a single node:

      a and b and c      =>  {"and": [a, b, c]}

    An explicitly parenthesised operand keeps its own node:

      a and (b and c)    =>  {"and": [a, {"and": [b, c]}]}
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

Operator names are case-insensitive and print in lower case.

COMPARISON
  eq   Equal                 Title eq 'Dune'
  ne   Not equal             Status ne 'closed'
  gt   Greater than          Price gt 100
  ge   Greater or equal      Price ge 100
  lt   Less than             Price lt 100
  le   Less or equal         Price le 100
  has  Has flags             Style has 'Sales.Pattern''Yellow'''
  in   Member of             Id in (1, 2, 3)

LOGICAL
  and  Both                  Price gt 5 and Price lt 10
  or   Either                Color eq 'red' or Color eq 'blue'
  not  Negation (prefix)     not IsActive

ARITHMETIC
  add  Addition              Price add 5 gt 10
  sub  Subtraction           Price sub 5 gt 10
  mul  Multiplication        Price mul 2 gt 10
  div  Division              Price div 2 gt 10
  mod  Modulo                Id mod 2 eq 0

PRECEDENCE (higher binds tighter)
  has 150   in 140   mul 130   div 120   mod 110
  add 100   sub 90   lt 80     gt 70     le 60
  ge 50     eq 40    ne 30     and 20    or 10

    Operators of equal precedence group left to right:

      a sub b sub c      =>  (a sub b) sub c

ASSOCIATIVE OPERATORS
  and  or  add  sub  mul  div
    Chains of these flatten into one node with every operand.
    All other operators always have exactly two operands.
"#;

const FUNCTIONS_DOC: &str = r#"FUNCTIONS

Function names are case-insensitive. Parameters are single values, property
paths, nested calls or parenthesised expressions.

STRING
  contains(Name, 'corp')           substringof('corp', Name)
  startswith(Name, 'A')            endswith(Name, 'z')
  indexof(Name, 'x') eq 2          length(Name) gt 5
  tolower(Name) eq 'abc'           toupper(Name) eq 'ABC'
  trim(Name) eq 'abc'              concat(First, Last) eq 'AB'
  substring(Name, 1, 2) eq 'bc'    replace(Name, ' ', '')
  matchesPattern(Name, '^A.*e$')

DATE AND TIME
  year  month  day  hour  minute  second  fractionalseconds
  date  time  now  maxdatetime  mindatetime  totaloffsetminutes
  totalseconds

    Example: year(BirthDate) eq 1990
    Example: Created lt now()

ARITHMETIC
  round(Price) eq 32   floor(Price) eq 32   ceiling(Price) eq 33

TYPES
  cast(Price, 'Edm.Int32')   isof('Model.Book')

COLLECTIONS
  hassubset(Ids, [1, 2])   hassubsequence(Ids, [1, 2])
"#;

const ALIASES_DOC: &str = r#"ALIASES

An alias is a placeholder written '@' followed by at least two letters, digits
or underscores. It stands for any value.

CAPTURING
  odata-filter compare "Title eq @title" "Title eq 'A book'"
  => {"bindings":[["title","A book"]],"matches":true}

    The condition matches when every node agrees with the filter; each alias
    records the part of the filter it lined up with. When the match fails
    nothing is recorded.

REWRITING
  odata-filter rewrite "Value eq @limit" --bindings '[["limit", 5]]'
  => (Value eq 5)

    Bindings are [[name, value], ...] or {"name": value}, with names written
    without '@'. Aliases without a value are kept as they are.

READING WITH TEMPLATES
  odata-filter read "Color eq 'red' and Size eq 3" -c "Color eq @color" -c "Size eq @size"
  => [["color","red"],["size",3]]

    Each template is matched against the whole filter and against every
    operand of its top-level 'and' ('--aggregation or' for 'or'). With
    --deep every node of the filter is tried.

ENCODING A TREE
  echo '{"eq":[{"property":"Value"},{"alias":"@limit"}]}' | odata-filter encode
  => (Value eq @limit)

    Special values use wrapper objects in JSON:

      {"datetime": "2022-03-09T23:00:00.000Z"}
      {"constant": "NaN"}   {"constant": "INF"}   {"constant": "-INF"}
"#;
