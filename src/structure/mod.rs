//! PDF Logical Structure (Tagged PDF) accessibility support.
//!
//! This module exposes a tagged PDF's structure tree, as reached through a
//! viewer's DOM interfaces, to screen readers according to
//! ISO 32000-1:2008 Section 14.7-14.8.
//!
//! ## Overview
//!
//! - **Roles**: standard structure types (`P`, `H1`..`H6`, `L`, `Formula`, ...)
//!   are mapped onto a small set of accessibility roles by [`classify`].
//! - **MathML**: `Formula` elements are turned into a MathML string by
//!   [`MathReconstructor`], from a vendor attribute, a tagged MathML subtree,
//!   or the element's value.
//! - **DOM**: both work over the [`DomNode`]/[`DomElement`] traits; the
//!   in-memory [`StructElem`] tree implements them.
//!
//! ## Example
//!
//! ```ignore
//! use pdf_a11y::structure::{MathReconstructor, StructElem, StructNode, StructType};
//!
//! let formula = StructElem::new(StructType::Formula).with_value("x squared");
//! let node = StructNode::new(Some(formula.as_element()));
//! let math = node.math_ml(&MathReconstructor::default())?;
//! assert_eq!(math, "<math><mtext>x squared</mtext></math>");
//! ```

pub mod dom;
pub mod mathml;
mod node;
pub mod roles;
mod types;

pub use dom::{DomElement, DomNode};
pub use mathml::{build_element_markup, MathReconstructor, MathStrategy};
pub use node::StructNode;
pub use roles::{classify, Classification, HeadingLevel, SemanticRole};
pub use types::{ElemRef, NodeRef, StructChild, StructElem, StructType};
