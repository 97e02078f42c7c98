//! Filtered child queries and the cardinality-checked helpers built on them.
//!
//! The helpers encode the grammar's shape expectations, e.g. "a head group
//! contains exactly one headword span". A violation is a
//! [`AppleDictError::ParseAssumption`], never a default value.

use std::fmt;

use crate::appledict::types::error::{AppleDictError, Result};

use super::tree::Node;

/// How far below the queried node matches are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Direct children only.
    Direct,
    /// The whole subtree, in document order.
    Subtree,
}

/// A tag/class filter over a node's children or subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query<'q> {
    pub tag: Option<&'q str>,
    pub class: Option<&'q str>,
    pub depth: Depth,
    /// Subtree searches do not enter elements carrying this class.
    pub barrier: Option<&'q str>,
}

impl<'q> Query<'q> {
    /// Elements with the given tag anywhere below the node.
    pub const fn tag(tag: &'q str) -> Self {
        Query {
            tag: Some(tag),
            class: None,
            depth: Depth::Subtree,
            barrier: None,
        }
    }

    /// `<span>` elements carrying `class` anywhere below the node.
    pub const fn span(class: &'q str) -> Self {
        Query {
            tag: Some("span"),
            class: Some(class),
            depth: Depth::Subtree,
            barrier: None,
        }
    }

    /// Restricts the query to direct children.
    pub const fn direct(mut self) -> Self {
        self.depth = Depth::Direct;
        self
    }

    /// Skips any subtree rooted at an element carrying `class`.
    pub const fn outside(mut self, class: &'q str) -> Self {
        self.barrier = Some(class);
        self
    }

    pub fn matches(&self, node: &Node) -> bool {
        let Some(tag) = node.tag() else {
            return false;
        };
        if let Some(want) = self.tag
            && want != tag
        {
            return false;
        }
        match self.class {
            Some(class) => node.has_class(class),
            None => true,
        }
    }
}

impl fmt::Display for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag.unwrap_or("*"))?;
        if let Some(class) = self.class {
            write!(f, ".{}", class)?;
        }
        if self.depth == Depth::Direct {
            write!(f, " (direct)")?;
        }
        if let Some(barrier) = self.barrier {
            write!(f, " outside .{}", barrier)?;
        }
        Ok(())
    }
}

/// Zero or one match; more than one is a violation.
pub fn find_at_most_one<'a>(node: Node<'a>, query: &Query) -> Result<Option<Node<'a>>> {
    let mut found = node.find_all(query);
    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        n => Err(AppleDictError::assumption(format!(
            "expected at most one {} under {:?}, found {}",
            query, node, n
        ))),
    }
}

/// Exactly one match; zero or several is a violation.
pub fn find_exactly_one<'a>(node: Node<'a>, query: &Query) -> Result<Node<'a>> {
    let mut found = node.find_all(query);
    match (found.len(), found.pop()) {
        (1, Some(only)) => Ok(only),
        (n, _) => Err(AppleDictError::assumption(format!(
            "expected exactly one {} under {:?}, found {}",
            query, node, n
        ))),
    }
}

/// One or more matches, in document order; none is a violation.
pub fn find_at_least_one<'a>(node: Node<'a>, query: &Query) -> Result<Vec<Node<'a>>> {
    let found = node.find_all(query);
    if found.is_empty() {
        return Err(AppleDictError::assumption(format!(
            "expected at least one {} under {:?}, found none",
            query, node
        )));
    }
    Ok(found)
}
