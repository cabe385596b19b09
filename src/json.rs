//! JSON <-> [`Filter`] conversion
//!
//! Each node is an object keyed by what it is:
//!
//! ```text
//! {"eq": [{"property": "Title"}, {"alias": "@title"}]}
//! {"contains": [{"property": "Name"}, "corp"]}
//! {"lambda": "any", "path": "Orders", "name": "o", "expression": {...}}
//! ```
//!
//! Scalars map to JSON scalars and collections to arrays. Values JSON cannot
//! hold are wrapped: `{"datetime": "2022-03-09T23:00:00.000Z"}` and
//! `{"constant": "NaN" | "INF" | "-INF"}`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value, json};

use crate::{
    ast::{Function, LambdaOp, Operator},
    compare::Binding,
    encode::{EncodeError, encode},
    filter::Filter,
};

/// Convert Filter to serde_json::Value
pub fn to_json(filter: &Filter) -> Value {
    match filter {
        Filter::Null => Value::Null,
        Filter::Boolean(b) => Value::Bool(*b),
        Filter::Number(n) => number_to_json(*n),
        Filter::String(s) => Value::String(s.clone()),
        Filter::Date(date) => json!({ "datetime": date.to_rfc3339_opts(SecondsFormat::Millis, true) }),
        Filter::Collection(elements) => Value::Array(elements.iter().map(to_json).collect()),
        Filter::Guid(guid) => json!({ "guid": guid }),
        Filter::Alias(alias) => json!({ "alias": alias }),
        Filter::Property(property) => json!({ "property": property }),
        Filter::Literal(literal) => json!({ "literal": literal }),
        Filter::Not(operand) => json!({ "not": to_json(operand) }),
        Filter::Operation { op, operands } => {
            tagged(op.name(), Value::Array(operands.iter().map(to_json).collect()))
        }
        Filter::Function { name, args } => {
            let args = match args.as_slice() {
                [single] if !matches!(single, Filter::Collection(_)) => to_json(single),
                args => Value::Array(args.iter().map(to_json).collect()),
            };
            tagged(name.name(), args)
        }
        Filter::Lambda {
            op,
            path,
            name,
            expression,
        } => json!({
            "lambda": op.name(),
            "path": path,
            "name": name,
            "expression": to_json(expression),
        }),
    }
}

fn tagged(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn number_to_json(n: f64) -> Value {
    if n.is_nan() {
        return json!({ "constant": "NaN" });
    }
    if n.is_infinite() {
        let constant = if n > 0.0 { "INF" } else { "-INF" };
        return json!({ "constant": constant });
    }
    // Whole numbers stay integers in the output
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// Convert serde_json::Value to Filter
pub fn from_json(value: &Value) -> Result<Filter, EncodeError> {
    match value {
        Value::Null => Ok(Filter::Null),
        Value::Bool(b) => Ok(Filter::Boolean(*b)),
        Value::Number(n) => n
            .as_f64()
            .map(Filter::Number)
            .ok_or_else(|| unrecognized(value)),
        Value::String(s) => Ok(Filter::String(s.clone())),
        Value::Array(elements) => Ok(Filter::Collection(from_json_all(elements)?)),
        Value::Object(map) => object_from_json(map, value),
    }
}

fn from_json_all(values: &[Value]) -> Result<Vec<Filter>, EncodeError> {
    values.iter().map(from_json).collect()
}

fn object_from_json(map: &Map<String, Value>, value: &Value) -> Result<Filter, EncodeError> {
    if let Some(op) = map.get("lambda") {
        let op = op
            .as_str()
            .and_then(LambdaOp::from_name)
            .ok_or_else(|| unrecognized(value))?;
        let path = match map.get("path") {
            None | Some(Value::Null) => None,
            Some(Value::String(path)) => Some(path.clone()),
            Some(_) => return Err(unrecognized(value)),
        };
        let name = map
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| unrecognized(value))?;
        let expression = map.get("expression").ok_or_else(|| unrecognized(value))?;
        return Ok(Filter::Lambda {
            op,
            path,
            name: name.to_string(),
            expression: Box::new(from_json(expression)?),
        });
    }

    let mut entries = map.iter();
    let (Some((key, inner)), None) = (entries.next(), entries.next()) else {
        return Err(unrecognized(value));
    };

    let text = || {
        inner
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| unrecognized(value))
    };

    match key.as_str() {
        "guid" => Ok(Filter::Guid(text()?)),
        "alias" => Ok(Filter::Alias(text()?)),
        "property" => Ok(Filter::Property(text()?)),
        "literal" => Ok(Filter::Literal(text()?)),
        "not" => Ok(Filter::not(from_json(inner)?)),
        "datetime" => DateTime::parse_from_rfc3339(&text()?)
            .map(|date| Filter::Date(date.with_timezone(&Utc)))
            .map_err(|_| unrecognized(value)),
        "constant" => match inner.as_str() {
            Some("NaN") => Ok(Filter::Number(f64::NAN)),
            Some("INF") => Ok(Filter::Number(f64::INFINITY)),
            Some("-INF") => Ok(Filter::Number(f64::NEG_INFINITY)),
            _ => Err(unrecognized(value)),
        },
        key => {
            if let Some(op) = Operator::ALL.iter().find(|op| op.name() == key) {
                let Value::Array(operands) = inner else {
                    return Err(unrecognized(value));
                };
                return Ok(Filter::operation(*op, from_json_all(operands)?));
            }
            if let Some(function) = Function::ALL.iter().find(|f| f.name() == key) {
                let args = match inner {
                    Value::Array(args) => from_json_all(args)?,
                    arg => vec![from_json(arg)?],
                };
                return Ok(Filter::function(*function, args));
            }
            Err(unrecognized(value))
        }
    }
}

fn unrecognized(value: &Value) -> EncodeError {
    EncodeError::UnrecognizedFilter(value.to_string())
}

/// Encodes a filter given in its JSON form.
pub fn encode_json(value: &Value, bindings: Option<&[Binding]>) -> Result<String, EncodeError> {
    encode(&from_json(value)?, bindings)
}

/// `[[name, value], ...]`
pub fn bindings_to_json(bindings: &[Binding]) -> Value {
    Value::Array(
        bindings
            .iter()
            .map(|binding| json!([binding.name, to_json(&binding.value)]))
            .collect(),
    )
}

/// Accepts `[[name, value], ...]` or `{"name": value, ...}`.
pub fn bindings_from_json(value: &Value) -> Result<Vec<Binding>, EncodeError> {
    match value {
        Value::Array(pairs) => pairs
            .iter()
            .map(|pair| match pair.as_array().map(Vec::as_slice) {
                Some([Value::String(name), value]) => Ok(Binding {
                    name: name.clone(),
                    value: from_json(value)?,
                }),
                _ => Err(unrecognized(pair)),
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| {
                Ok(Binding {
                    name: name.clone(),
                    value: from_json(value)?,
                })
            })
            .collect(),
        _ => Err(unrecognized(value)),
    }
}
