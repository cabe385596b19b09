//! Depth-first walk over a [`Filter`].
//!
//! Each node is handed to the visitor together with the path that leads to
//! it from the root. Returning [`ControlFlow::Break`] stops the walk at once
//! and the break value is returned to the caller.
//!
//! # Examples
//!
//! ```
//! use std::ops::ControlFlow;
//! use odata_filter::{parse, traverse, Filter, Order};
//!
//! let filter = parse("Title eq @title and Published gt @published").unwrap();
//!
//! let mut aliases = vec![];
//! let _ = traverse(&filter, Order::Post, &mut |node, _path| {
//!     if let Filter::Alias(alias) = node {
//!         aliases.push(alias.clone());
//!     }
//!     ControlFlow::<()>::Continue(())
//! });
//! assert_eq!(aliases, ["@title", "@published"]);
//! ```

use std::{fmt, ops::ControlFlow};

use crate::filter::Filter;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Operator name, function name, `not`, or `<path>/<any|all>` for a
    /// lambda body
    Key(String),

    /// Position within an operand, argument or collection list
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// When a node is visited relative to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Parent first
    Pre,
    /// Children first
    #[default]
    Post,
}

/// Visits every node of `filter` exactly once, collections included.
pub fn traverse<B, F>(filter: &Filter, order: Order, visit: &mut F) -> ControlFlow<B>
where
    F: FnMut(&Filter, &[PathSegment]) -> ControlFlow<B>,
{
    let mut path = vec![];
    walk(filter, order, visit, &mut path)
}

fn walk<B, F>(
    node: &Filter,
    order: Order,
    visit: &mut F,
    path: &mut Vec<PathSegment>,
) -> ControlFlow<B>
where
    F: FnMut(&Filter, &[PathSegment]) -> ControlFlow<B>,
{
    if order == Order::Pre {
        visit(node, path.as_slice())?;
    }

    match node {
        Filter::Collection(elements) => walk_list(elements, order, visit, path)?,
        Filter::Operation { op, operands } => {
            path.push(PathSegment::Key(op.name().to_string()));
            let flow = walk_list(operands, order, visit, path);
            path.pop();
            flow?
        }
        Filter::Function { name, args } => {
            path.push(PathSegment::Key(name.name().to_string()));
            let flow = walk_list(args, order, visit, path);
            path.pop();
            flow?
        }
        Filter::Not(operand) => {
            path.push(PathSegment::from("not"));
            let flow = walk(operand, order, visit, path);
            path.pop();
            flow?
        }
        Filter::Lambda {
            op,
            path: navigation,
            expression,
            ..
        } => {
            let key = match navigation {
                Some(navigation) => format!("{}/{}", navigation, op),
                None => op.name().to_string(),
            };
            path.push(PathSegment::Key(key));
            let flow = walk(expression, order, visit, path);
            path.pop();
            flow?
        }
        _ => {}
    }

    if order == Order::Post {
        visit(node, path.as_slice())?;
    }
    ControlFlow::Continue(())
}

fn walk_list<B, F>(
    nodes: &[Filter],
    order: Order,
    visit: &mut F,
    path: &mut Vec<PathSegment>,
) -> ControlFlow<B>
where
    F: FnMut(&Filter, &[PathSegment]) -> ControlFlow<B>,
{
    for (index, node) in nodes.iter().enumerate() {
        path.push(PathSegment::Index(index));
        let flow = walk(node, order, visit, path);
        path.pop();
        flow?;
    }
    ControlFlow::Continue(())
}
