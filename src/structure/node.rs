//! Accessibility view of one structure element.

use super::dom::{DomElement, DomNode};
use super::mathml::MathReconstructor;
use super::roles::{classify, Classification, SemanticRole};
use crate::error::Result;

/// A structure element as presented to a screen reader.
///
/// The viewer may not hand out a DOM element for every accessible object,
/// so the element is optional and every query degrades when it is missing.
#[derive(Debug, Clone)]
pub struct StructNode<E> {
    element: Option<E>,
}

impl<E: DomElement> StructNode<E> {
    /// Wrap a resolved element, or `None` if the viewer gave none.
    pub fn new(element: Option<E>) -> Self {
        Self { element }
    }

    /// Wrap a node, narrowing it to its element view when possible.
    pub fn from_node(node: Option<E::Node>) -> Self {
        let element = node.and_then(|node| match node.as_element() {
            Ok(element) => Some(element),
            Err(e) => {
                log::debug!("Structure node has no element view: {}", e);
                None
            },
        });
        Self { element }
    }

    /// The wrapped element.
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    /// Classification of the element's standard structure type.
    pub fn classification(&self) -> Option<Classification> {
        let element = self.element.as_ref()?;
        match element.std_name() {
            Ok(std_name) => classify(Some(&std_name)),
            Err(e) => {
                log::debug!("GetStdName failed: {}", e);
                None
            },
        }
    }

    /// Role from the structure type, or `fallback` when it has none.
    pub fn role_or_else<R, F>(&self, fallback: F) -> R
    where
        R: From<SemanticRole>,
        F: FnOnce() -> R,
    {
        match self.classification() {
            Some(classification) => R::from(classification.role),
            None => fallback(),
        }
    }

    /// MathML for this element when it is a formula.
    pub fn math_ml(&self, reconstructor: &MathReconstructor) -> Result<String> {
        reconstructor.reconstruct(self.element.as_ref())
    }

    /// Scroll the viewer to this element. Failures are logged and ignored.
    pub fn scroll_into_view(&self) {
        let Some(element) = &self.element else {
            log::warn!("scroll_into_view: no structure element");
            return;
        };
        if let Err(e) = element.node().scroll_to() {
            log::warn!("ScrollTo failed: {}", e);
        }
    }
}
