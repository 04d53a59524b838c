//! Mapping from standard structure types to accessibility roles.
//!
//! Structure types follow ISO 32000-1:2008 Section 14.8.4. Only the types
//! with a sensible document-reading role are mapped; tables, links and form
//! fields are left to the viewer's own accessibility roles, so callers fall
//! back to those whenever [`classify`] returns `None`.

use phf::phf_map;
use std::fmt;

use super::types::StructType;

/// Accessibility role of a structure element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticRole {
    /// Sect, Div
    Section,
    /// BlockQuote
    BlockQuote,
    /// Caption
    Caption,
    /// L
    List,
    /// LI
    ListItem,
    /// Lbl
    Label,
    /// P
    Paragraph,
    /// H, H1-H6
    Heading,
    /// Formula
    Math,
}

// Part, Art, Toc, TOCI, Index, NonStruct, Private, LBody, Span, Quote, Note,
// Reference, BibEntry, Code, Figure and Form are intentionally absent.
static STD_NAMES_TO_ROLES: phf::Map<&'static str, SemanticRole> = phf_map! {
    "Sect" => SemanticRole::Section,
    "Div" => SemanticRole::Section,
    "BlockQuote" => SemanticRole::BlockQuote,
    "Caption" => SemanticRole::Caption,
    "L" => SemanticRole::List,
    "LI" => SemanticRole::ListItem,
    "Lbl" => SemanticRole::Label,
    "P" => SemanticRole::Paragraph,
    "H" => SemanticRole::Heading,
    "Formula" => SemanticRole::Math,
};

/// Heading level 1-6 taken from an `H1`..`H6` structure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    const DIGITS: [&'static str; 6] = ["1", "2", "3", "4", "5", "6"];

    /// Create a level, `None` outside 1-6.
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    /// Numeric level.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Level as the single digit string (e.g. `"5"` for `H5`).
    pub fn as_str(self) -> &'static str {
        Self::DIGITS[usize::from(self.0 - 1)]
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a structure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Accessibility role
    pub role: SemanticRole,
    /// Heading level, only for `H1`..`H6`
    pub level: Option<HeadingLevel>,
}

impl Classification {
    fn role(role: SemanticRole) -> Self {
        Self { role, level: None }
    }
}

/// Classify a standard structure type name.
///
/// Names in the range `"H1"..="H6"` are headings with the level taken from
/// the second character. The range is compared lexicographically before the
/// table lookup so the plain `H` entry never shadows numbered headings.
///
/// Returns `None` for empty, absent or unknown names.
pub fn classify(std_name: Option<&str>) -> Option<Classification> {
    let name = std_name.filter(|name| !name.is_empty())?;

    if ("H1"..="H6").contains(&name) {
        // Every string in the range starts with 'H' followed by '1'..='6'.
        let level = HeadingLevel::new(name.as_bytes()[1] - b'0')?;
        return Some(Classification {
            role: SemanticRole::Heading,
            level: Some(level),
        });
    }

    STD_NAMES_TO_ROLES.get(name).copied().map(Classification::role)
}

impl SemanticRole {
    /// Role of a parsed structure type, if it has one.
    pub fn from_struct_type(struct_type: &StructType) -> Option<Classification> {
        classify(Some(struct_type.as_str()))
    }
}
