//! Types for PDF logical structure trees.
//!
//! Implements structure element types according to ISO 32000-1:2008 Section 14.7.2,
//! as an owned tree that can be loaded from JSON and queried through the
//! [`DomNode`]/[`DomElement`] interfaces like a live viewer DOM.

use super::dom::{DomElement, DomNode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A structure element (StructElem) in the structure tree.
///
/// According to PDF spec Section 14.7.2, each StructElem has:
/// - `/S` - Structure type (e.g., /Document, /P, /H1, /Sect, or a MathML tag)
/// - `/K` - Children (structure elements or marked content references)
/// - `/ID` - Element identifier (optional)
/// - `/A` - Attributes, grouped by owner (optional)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructElem {
    /// Structure type as tagged (e.g. "Formula", "math", "mi")
    pub struct_type: StructType,

    /// Standard type from the RoleMap, when `struct_type` is custom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_type: Option<StructType>,

    /// Element identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Element value (content text, alt text or embedded MathML)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Attributes by owner, then name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, HashMap<String, String>>,

    /// Child elements (structure elements or content references)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StructChild>,
}

impl StructElem {
    /// Create a new structure element
    pub fn new(struct_type: StructType) -> Self {
        Self {
            struct_type,
            standard_type: None,
            id: None,
            value: None,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element from a tag name
    pub fn tagged(tag: &str) -> Self {
        Self::new(StructType::from_str(tag))
    }

    /// Load an element tree from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an element tree from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set the element identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the element value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the RoleMap standard type
    pub fn with_standard_type(mut self, standard_type: StructType) -> Self {
        self.standard_type = Some(standard_type);
        self
    }

    /// Set an attribute under `owner`
    pub fn with_attribute(
        mut self,
        owner: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes
            .entry(owner.into())
            .or_default()
            .insert(name.into(), value.into());
        self
    }

    /// Append a child element (builder form of [`StructElem::add_child`])
    pub fn with_child(mut self, child: StructElem) -> Self {
        self.add_child(StructChild::StructElem(Box::new(child)));
        self
    }

    /// Add a child to this structure element
    pub fn add_child(&mut self, child: StructChild) {
        self.children.push(child);
    }

    /// Node handle for DOM-style queries
    pub fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Elem(self)
    }

    /// Element handle for DOM-style queries
    pub fn as_element(&self) -> ElemRef<'_> {
        ElemRef { node: NodeRef::Elem(self), elem: self }
    }

    /// Pre-order walk over this element and its structure-element descendants.
    ///
    /// `visit` receives the nesting depth (0 for `self`) and the element.
    /// Marked content and unresolved references are not visited.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(usize, &'a StructElem),
    {
        self.walk_at(0, visit);
    }

    fn walk_at<'a, F>(&'a self, depth: usize, visit: &mut F)
    where
        F: FnMut(usize, &'a StructElem),
    {
        visit(depth, self);
        for child in &self.children {
            if let StructChild::StructElem(child_elem) = child {
                child_elem.walk_at(depth + 1, visit);
            }
        }
    }
}

/// Child of a structure element (either another struct elem or marked content reference)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StructChild {
    /// Another structure element (recursive hierarchy)
    StructElem(Box<StructElem>),

    /// Reference to marked content by MCID (Marked Content ID)
    MarkedContentRef {
        /// Marked Content ID
        mcid: u32,
        /// Page number containing this marked content
        page: u32,
    },

    /// Object reference that was not resolved when the tree was built
    ObjectRef(u32, u16), // (object_num, generation)
}

/// Standard structure types from PDF spec Section 14.8.4.
///
/// These are the standard structure types defined by the PDF specification.
/// Custom types (including MathML element names) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StructType {
    // Document-level structure types
    /// Document root
    Document,
    /// Part (major division)
    Part,
    /// Article
    Art,
    /// Section
    Sect,
    /// Division
    Div,
    /// Block quotation
    BlockQuote,
    /// Caption
    Caption,

    // Paragraph-level structure types
    /// Paragraph
    P,
    /// Heading (unnumbered)
    H,
    /// Heading level 1
    H1,
    /// Heading level 2
    H2,
    /// Heading level 3
    H3,
    /// Heading level 4
    H4,
    /// Heading level 5
    H5,
    /// Heading level 6
    H6,

    // List structure types
    /// List
    L,
    /// List item
    LI,
    /// Label (list item marker)
    Lbl,
    /// List body (list item content)
    LBody,

    // Table structure types
    /// Table
    Table,
    /// Table row
    TR,
    /// Table header cell
    TH,
    /// Table data cell
    TD,

    // Inline structure types
    /// Span (inline generic)
    Span,
    /// Link
    Link,

    // Illustration structure types
    /// Figure
    Figure,
    /// Formula
    Formula,
    /// Form (input field)
    Form,

    /// Custom structure type not defined in the PDF specification
    Custom(String),
}

impl StructType {
    /// Parse structure type from string (e.g., "P" -> StructType::P)
    pub fn from_str(s: &str) -> Self {
        match s {
            "Document" => Self::Document,
            "Part" => Self::Part,
            "Art" => Self::Art,
            "Sect" => Self::Sect,
            "Div" => Self::Div,
            "BlockQuote" => Self::BlockQuote,
            "Caption" => Self::Caption,
            "P" => Self::P,
            "H" => Self::H,
            "H1" => Self::H1,
            "H2" => Self::H2,
            "H3" => Self::H3,
            "H4" => Self::H4,
            "H5" => Self::H5,
            "H6" => Self::H6,
            "L" => Self::L,
            "LI" => Self::LI,
            "Lbl" => Self::Lbl,
            "LBody" => Self::LBody,
            "Table" => Self::Table,
            "TR" => Self::TR,
            "TH" => Self::TH,
            "TD" => Self::TD,
            "Span" => Self::Span,
            "Link" => Self::Link,
            "Figure" => Self::Figure,
            "Formula" => Self::Formula,
            "Form" => Self::Form,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// Name of the structure type as written in the document
    pub fn as_str(&self) -> &str {
        match self {
            Self::Document => "Document",
            Self::Part => "Part",
            Self::Art => "Art",
            Self::Sect => "Sect",
            Self::Div => "Div",
            Self::BlockQuote => "BlockQuote",
            Self::Caption => "Caption",
            Self::P => "P",
            Self::H => "H",
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
            Self::H5 => "H5",
            Self::H6 => "H6",
            Self::L => "L",
            Self::LI => "LI",
            Self::Lbl => "Lbl",
            Self::LBody => "LBody",
            Self::Table => "Table",
            Self::TR => "TR",
            Self::TH => "TH",
            Self::TD => "TD",
            Self::Span => "Span",
            Self::Link => "Link",
            Self::Figure => "Figure",
            Self::Formula => "Formula",
            Self::Form => "Form",
            Self::Custom(s) => s,
        }
    }
}

impl From<String> for StructType {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<StructType> for String {
    fn from(t: StructType) -> Self {
        match t {
            StructType::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// Node handle into a [`StructElem`] tree.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// A structure element
    Elem(&'a StructElem),
    /// Marked content; has no element view
    Content {
        /// Marked Content ID
        mcid: u32,
        /// Page number
        page: u32,
    },
    /// Dangling object reference; every query fails
    Unresolved(u32, u16),
}

impl<'a> From<&'a StructChild> for NodeRef<'a> {
    fn from(child: &'a StructChild) -> Self {
        match child {
            StructChild::StructElem(elem) => NodeRef::Elem(elem),
            StructChild::MarkedContentRef { mcid, page } => NodeRef::Content {
                mcid: *mcid,
                page: *page,
            },
            StructChild::ObjectRef(num, gen) => NodeRef::Unresolved(*num, *gen),
        }
    }
}

impl<'a> DomNode for NodeRef<'a> {
    type Element = ElemRef<'a>;

    fn child_count(&self) -> Result<usize> {
        match self {
            NodeRef::Elem(elem) => Ok(elem.children.len()),
            NodeRef::Content { .. } => Ok(0),
            NodeRef::Unresolved(num, gen) => Err(Error::ObjectNotFound(*num, *gen)),
        }
    }

    fn child(&self, index: usize) -> Result<Self> {
        match *self {
            NodeRef::Elem(elem) => elem
                .children
                .get(index)
                .map(NodeRef::from)
                .ok_or_else(|| Error::accessor("GetChild", format!("index {} out of range", index))),
            NodeRef::Content { .. } => {
                Err(Error::accessor("GetChild", "marked content has no children"))
            },
            NodeRef::Unresolved(num, gen) => Err(Error::ObjectNotFound(num, gen)),
        }
    }

    fn as_element(&self) -> Result<ElemRef<'a>> {
        match *self {
            NodeRef::Elem(elem) => Ok(ElemRef { node: *self, elem }),
            NodeRef::Content { .. } => Err(Error::InvalidObjectType {
                expected: "StructElem".to_string(),
                found: "marked content".to_string(),
            }),
            NodeRef::Unresolved(num, gen) => Err(Error::ObjectNotFound(num, gen)),
        }
    }

    fn value(&self) -> Result<Option<String>> {
        match self {
            NodeRef::Elem(elem) => Ok(elem.value.clone()),
            NodeRef::Content { .. } => Ok(None),
            NodeRef::Unresolved(num, gen) => Err(Error::ObjectNotFound(*num, *gen)),
        }
    }

    fn scroll_to(&self) -> Result<()> {
        match self {
            NodeRef::Unresolved(num, gen) => Err(Error::ObjectNotFound(*num, *gen)),
            // An in-memory tree has no viewport
            _ => Ok(()),
        }
    }
}

/// Element view of a [`NodeRef`].
#[derive(Debug, Clone, Copy)]
pub struct ElemRef<'a> {
    node: NodeRef<'a>,
    elem: &'a StructElem,
}

impl<'a> DomElement for ElemRef<'a> {
    type Node = NodeRef<'a>;

    fn node(&self) -> &NodeRef<'a> {
        &self.node
    }

    fn tag_name(&self) -> Result<String> {
        Ok(self.elem.struct_type.as_str().to_string())
    }

    fn std_name(&self) -> Result<String> {
        let std_type = self.elem.standard_type.as_ref().unwrap_or(&self.elem.struct_type);
        Ok(std_type.as_str().to_string())
    }

    fn attribute(&self, name: &str, namespace: &str) -> Result<Option<String>> {
        Ok(self
            .elem
            .attributes
            .get(namespace)
            .and_then(|attrs| attrs.get(name))
            .cloned())
    }

    fn id(&self) -> Result<Option<String>> {
        Ok(self.elem.id.clone())
    }
}
