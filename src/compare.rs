use crate::filter::Filter;

/// A value captured by an alias during [`compare`].
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Alias name without the `@` sigil
    pub name: String,
    pub value: Filter,
}

impl Binding {
    pub fn new(name: impl Into<String>, value: impl Into<Filter>) -> Self {
        Binding {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Structural match of `data` against `condition`.
///
/// Aliases in `condition` match any value and are recorded in `captures`.
/// Every other node must agree in shape and content with its counterpart in
/// `data`. Dates compare by instant; numbers compare by value, so `NaN` never
/// matches.
///
/// On a `false` result `captures` is left exactly as it was. On success the
/// new bindings are appended in encounter order; an alias that occurs more
/// than once keeps the value of its first occurrence.
///
/// # Examples
///
/// ```
/// use odata_filter::{compare, parse, Binding};
///
/// let condition = parse("Title eq @title").unwrap();
/// let data = parse("Title eq 'A book'").unwrap();
///
/// let mut captures = vec![];
/// assert!(compare(&condition, &data, Some(&mut captures)));
/// assert_eq!(captures, vec![Binding::new("title", "A book")]);
/// ```
pub fn compare(condition: &Filter, data: &Filter, captures: Option<&mut Vec<Binding>>) -> bool {
    let mut scratch = vec![];
    if !matches(condition, data, &mut scratch) {
        return false;
    }

    if let Some(captures) = captures {
        let start = captures.len();
        for binding in scratch {
            if !captures[start..].iter().any(|b| b.name == binding.name) {
                captures.push(binding);
            }
        }
    }
    true
}

/// Matches one node. `captures` only ever grows when the result is `true`.
fn matches(condition: &Filter, data: &Filter, captures: &mut Vec<Binding>) -> bool {
    if let Some(name) = condition.alias_name() {
        captures.push(Binding {
            name: name.to_string(),
            value: data.clone(),
        });
        return true;
    }

    match (condition, data) {
        (Filter::Collection(expected), Filter::Collection(actual)) => {
            matches_all(expected, actual, captures)
        }
        (
            Filter::Operation { op, operands },
            Filter::Operation {
                op: data_op,
                operands: data_operands,
            },
        ) => op == data_op && matches_all(operands, data_operands, captures),
        (
            Filter::Function { name, args },
            Filter::Function {
                name: data_name,
                args: data_args,
            },
        ) => name == data_name && matches_all(args, data_args, captures),
        (Filter::Not(operand), Filter::Not(data_operand)) => {
            let mut buffer = vec![];
            let matched = matches(operand, data_operand, &mut buffer);
            if matched {
                captures.append(&mut buffer);
            }
            matched
        }
        (
            Filter::Lambda {
                op,
                path,
                name,
                expression,
            },
            Filter::Lambda {
                op: data_op,
                path: data_path,
                name: data_name,
                expression: data_expression,
            },
        ) => {
            if op != data_op || path != data_path || name != data_name {
                return false;
            }
            let mut buffer = vec![];
            let matched = matches(expression, data_expression, &mut buffer);
            if matched {
                captures.append(&mut buffer);
            }
            matched
        }
        // Leaves, and any pair of different shapes
        (condition, data) => condition == data,
    }
}

/// Element-wise match at equal length. Captures are buffered and only
/// merged once every element matched; the first failure stops the walk.
fn matches_all(expected: &[Filter], actual: &[Filter], captures: &mut Vec<Binding>) -> bool {
    if expected.len() != actual.len() {
        return false;
    }

    let mut buffer = vec![];
    for (condition, data) in expected.iter().zip(actual) {
        if !matches(condition, data, &mut buffer) {
            return false;
        }
    }

    captures.append(&mut buffer);
    true
}
