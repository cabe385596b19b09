//! Raw syntax tree to canonical [`Filter`].
//!
//! Two positions are distinguished. In expression position (operands of a
//! binary operator, lambda bodies, group elements, the root) a one-element
//! group only collapses when it wraps another operation or group, so
//! `(Price gt 5)` loses its parentheses while `in (2)` keeps its list. In atom
//! position (negation operands and function parameters) every one-element
//! group collapses.

use crate::{
    ast::{Expr, Keyword, Operator},
    filter::Filter,
};

pub(crate) fn canonicalize(expr: Expr) -> Filter {
    visit_expression(expr)
}

fn visit_expression(expr: Expr) -> Filter {
    match expr {
        Expr::Collection(mut elements) => {
            if elements.len() == 1
                && matches!(elements[0], Expr::BinaryOp { .. } | Expr::Collection(_))
            {
                visit_expression(elements.remove(0))
            } else {
                Filter::Collection(elements.into_iter().map(visit_expression).collect())
            }
        }
        Expr::BinaryOp { op, left, right } => visit_binary_op(op, *left, *right),
        atom => visit_atom(atom),
    }
}

fn visit_atom(expr: Expr) -> Filter {
    match expr {
        Expr::Collection(mut elements) => {
            if elements.len() == 1 {
                visit_expression(elements.remove(0))
            } else {
                Filter::Collection(elements.into_iter().map(visit_expression).collect())
            }
        }
        Expr::Boolean(b) => Filter::Boolean(b),
        Expr::Constant(keyword) => match keyword {
            Keyword::NaN => Filter::Number(f64::NAN),
            Keyword::Inf => Filter::Number(f64::INFINITY),
            _ => Filter::Null,
        },
        Expr::Number(n) => Filter::Number(n),
        Expr::String(s) => Filter::String(s),
        Expr::Date(date) => Filter::Date(date),
        Expr::Guid(guid) => Filter::Guid(guid),
        Expr::Alias(alias) => Filter::Alias(alias),
        Expr::Negative(operand) => Filter::Not(Box::new(visit_atom(*operand))),
        Expr::FunctionCall { name, parameters } => Filter::Function {
            name,
            args: parameters.into_iter().map(visit_atom).collect(),
        },
        Expr::Lambda {
            navigation,
            operation,
            name,
            expression,
        } => Filter::Lambda {
            op: operation,
            path: (!navigation.is_empty()).then(|| navigation.join("/")),
            name,
            expression: Box::new(visit_expression(*expression)),
        },
        Expr::Property { navigation, name } => Filter::Property(join_path(navigation, name)),
        Expr::Literal { navigation, value } => Filter::Literal(join_path(navigation, value)),
        Expr::BinaryOp { op, left, right } => visit_binary_op(op, *left, *right),
    }
}

fn join_path(mut navigation: Vec<String>, last: String) -> String {
    if navigation.is_empty() {
        return last;
    }
    navigation.push(last);
    navigation.join("/")
}

fn visit_binary_op(op: Operator, left: Expr, right: Expr) -> Filter {
    if !op.is_associative() {
        return Filter::Operation {
            op,
            operands: vec![visit_expression(left), visit_expression(right)],
        };
    }

    let mut operands = Vec::new();
    flatten_into(op, left, &mut operands);
    flatten_into(op, right, &mut operands);
    Filter::Operation { op, operands }
}

/// Pushes the operands of a directly nested `op` chain, depth first.
fn flatten_into(op: Operator, expr: Expr, operands: &mut Vec<Filter>) {
    match expr {
        Expr::BinaryOp {
            op: inner,
            left,
            right,
        } if inner == op => {
            flatten_into(op, *left, operands);
            flatten_into(op, *right, operands);
        }
        other => operands.push(visit_expression(other)),
    }
}
