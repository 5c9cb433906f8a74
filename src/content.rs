//! Content repository contract: the node store the inspector walks.
//! The store owns the nodes; the inspector only reads them.

use crate::error::InspectorResult;

/// Read-only view of one node in the content tree.
pub trait ContentNode {
    /// Opaque, unique node identifier.
    fn identifier(&self) -> &str;
    /// Slash-delimited ancestry path, e.g. `/sites/acme/about`.
    fn path(&self) -> &str;
    fn label(&self) -> &str;
    fn node_type(&self) -> &str;
    /// Distance from the repository root as recorded by the store.
    fn depth(&self) -> u32;
}

/// Child enumeration filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter<'a> {
    /// No filter sentinel: every child regardless of its type.
    Any,
    /// Children of the given type (the store decides whether subtypes count).
    Only(&'a str),
    /// Children whose type is exactly the given name; subtypes do not match.
    Exact(&'a str),
}

pub trait NodeStore {
    type Node: ContentNode;

    /// Ordered children of `node`. Stores should return an empty Vec when there are none.
    fn child_nodes(&self, node: &Self::Node, filter: TypeFilter<'_>) -> InspectorResult<Vec<Self::Node>>;

    fn has_child_nodes(&self, node: &Self::Node, filter: TypeFilter<'_>) -> InspectorResult<bool>;

    /// True when the node's type is `type_name` or inherits from it.
    fn is_of_type(&self, node: &Self::Node, type_name: &str) -> bool;

    /// Entry node of the default site (site/workspace resolution is the store's business).
    fn default_entry_node(&self) -> InspectorResult<Self::Node>;
}
