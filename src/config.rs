//! Configuration for MathML reconstruction.

use crate::error::{Error, Result};

/// Attribute carrying a complete MathML string, written by Microsoft Office.
pub const MSFT_MATHML_ATTRIBUTE: &str = "MSFT_MathML";

/// Owner namespace of [`MSFT_MATHML_ATTRIBUTE`].
pub const MSFT_OFFICE_NAMESPACE: &str = "MSFT_Office";

/// Attribute owner used for MathML attributes on tagged elements ("NSO" comes
/// from the PDF 2.0 namespace attribute owner).
pub const NSO_NAMESPACE: &str = "NSO";

/// MathML reconstruction configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathMlConfig {
    /// Name of the vendor attribute holding pre-built MathML.
    pub vendor_attribute: String,

    /// Namespace the vendor attribute is looked up in.
    pub vendor_namespace: String,

    /// Namespace MathML element attributes are looked up in.
    pub attribute_namespace: String,

    /// Maximum element nesting below the `math` root; `None` is unbounded.
    pub max_depth: Option<u32>,
}

impl Default for MathMlConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MathMlConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            vendor_attribute: MSFT_MATHML_ATTRIBUTE.to_string(),
            vendor_namespace: MSFT_OFFICE_NAMESPACE.to_string(),
            attribute_namespace: NSO_NAMESPACE.to_string(),
            max_depth: None,
        }
    }

    /// Set the vendor attribute name.
    pub fn with_vendor_attribute(mut self, name: impl Into<String>) -> Self {
        self.vendor_attribute = name.into();
        self
    }

    /// Set the vendor attribute namespace.
    pub fn with_vendor_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.vendor_namespace = namespace.into();
        self
    }

    /// Set the namespace used for element attributes.
    pub fn with_attribute_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.attribute_namespace = namespace.into();
        self
    }

    /// Limit how deep the tagged subtree walk descends.
    pub fn with_max_depth(mut self, depth: Option<u32>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Check the configuration for values that cannot match anything.
    pub fn validate(&self) -> Result<()> {
        if self.vendor_attribute.is_empty() {
            return Err(Error::InvalidConfig("vendor attribute name is empty".into()));
        }
        if self.vendor_namespace.is_empty() {
            return Err(Error::InvalidConfig("vendor namespace is empty".into()));
        }
        if self.attribute_namespace.is_empty() {
            return Err(Error::InvalidConfig("attribute namespace is empty".into()));
        }
        if self.max_depth == Some(0) {
            return Err(Error::InvalidConfig("max depth must be at least 1".into()));
        }
        Ok(())
    }
}
