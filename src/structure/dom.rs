//! Query interface onto a viewer's structure-tree DOM.
//!
//! PDF viewers expose the logical structure tree as a pair of interfaces: a
//! generic node (children, value, scrolling) and an element view of that
//! node (tag name, attributes, identifier). Every call may fail because the
//! underlying document can change between calls, so each one returns a
//! [`Result`] and callers treat a failure as "absent" for that one node or
//! attribute.

use crate::error::Result;

/// A node in the structure tree.
pub trait DomNode: Sized {
    /// Element view of this node type.
    type Element: DomElement;

    /// Number of direct children.
    fn child_count(&self) -> Result<usize>;

    /// Child at `index` (0-based, in document order).
    fn child(&self, index: usize) -> Result<Self>;

    /// Narrow this node to its element view. Fails for content nodes.
    fn as_element(&self) -> Result<Self::Element>;

    /// Raw value of the node, if any.
    fn value(&self) -> Result<Option<String>>;

    /// Scroll the viewer so the node is visible.
    fn scroll_to(&self) -> Result<()>;
}

/// Element view of a [`DomNode`].
pub trait DomElement: Sized {
    /// Node type this element was narrowed from.
    type Node: DomNode<Element = Self>;

    /// The node interface of this element.
    fn node(&self) -> &Self::Node;

    /// Tag name as written in the document (e.g. `math`, `mi`, `Formula`).
    fn tag_name(&self) -> Result<String>;

    /// Standard structure type after role mapping (e.g. `H2`, `P`).
    fn std_name(&self) -> Result<String>;

    /// Attribute `name` owned by `namespace`, if present.
    fn attribute(&self, name: &str, namespace: &str) -> Result<Option<String>>;

    /// Element identifier, if present.
    fn id(&self) -> Result<Option<String>>;
}
