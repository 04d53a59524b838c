//! Structure type to role classification tests.
//!
//! Covers the standard structure types from ISO 32000-1:2008 Section 14.8.4
//! that carry a reading role, the H1-H6 heading range, and the fallback
//! behavior for everything else.

use pdf_a11y::structure::{classify, DomElement, SemanticRole, StructElem, StructNode, StructType};
use proptest::prelude::*;

// =============================================================================
// TABLE
// =============================================================================

mod table_tests {
    use super::*;

    #[test]
    fn test_heading_range_yields_levels() {
        for level in 1..=6u8 {
            let name = format!("H{}", level);
            let c = classify(Some(&name)).expect("heading");
            assert_eq!(c.role, SemanticRole::Heading);
            assert_eq!(c.level.unwrap().get(), level);
            assert_eq!(c.level.unwrap().as_str(), &name[1..]);
        }
    }

    #[test]
    fn test_plain_heading_and_formula() {
        let h = classify(Some("H")).unwrap();
        assert_eq!((h.role, h.level), (SemanticRole::Heading, None));

        let formula = classify(Some("Formula")).unwrap();
        assert_eq!((formula.role, formula.level), (SemanticRole::Math, None));
    }

    #[test]
    fn test_unmapped_types_are_not_found() {
        for name in ["unknown-tag", "Document", "Part", "Art", "Span", "Figure", "Table", "TD", "Link", "Form"] {
            assert_eq!(classify(Some(name)), None, "{} should not be classified", name);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(classify(Some("")), None);
        assert_eq!(classify(None), None);
    }
}

// =============================================================================
// STRUCTURE NODES
// =============================================================================

mod node_tests {
    use super::*;

    #[test]
    fn test_every_struct_type_matches_its_name() {
        let types = [
            StructType::Sect,
            StructType::Div,
            StructType::BlockQuote,
            StructType::Caption,
            StructType::L,
            StructType::LI,
            StructType::Lbl,
            StructType::P,
            StructType::H,
            StructType::H1,
            StructType::H6,
            StructType::Formula,
            StructType::LBody,
            StructType::Figure,
        ];
        for struct_type in types {
            let elem = StructElem::new(struct_type.clone());
            let node = StructNode::new(Some(elem.as_element()));
            assert_eq!(node.classification(), classify(Some(struct_type.as_str())));
        }
    }

    #[test]
    fn test_standard_type_takes_precedence_over_tag() {
        let elem = StructElem::tagged("ChapterTitle").with_standard_type(StructType::H1);
        assert_eq!(elem.as_element().tag_name().unwrap(), "ChapterTitle");

        let node = StructNode::new(Some(elem.as_element()));
        let c = node.classification().unwrap();
        assert_eq!(c.role, SemanticRole::Heading);
        assert_eq!(c.level.unwrap().get(), 1);
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_classify_is_deterministic(name in "\\PC{0,8}") {
        prop_assert_eq!(classify(Some(&name)), classify(Some(&name)));
    }

    #[test]
    fn prop_headings_always_carry_a_level_in_range(name in "H[0-9A-Za-z]{0,3}") {
        if let Some(c) = classify(Some(&name)) {
            prop_assert_eq!(c.role, SemanticRole::Heading);
            match c.level {
                Some(level) => {
                    prop_assert!((1..=6).contains(&level.get()));
                    prop_assert_eq!(level.as_str(), &name[1..2]);
                },
                None => prop_assert_eq!(name.as_str(), "H"),
            }
        }
    }

    #[test]
    fn prop_lowercase_names_are_unclassified(name in "[a-z]{1,10}") {
        prop_assert_eq!(classify(Some(&name)), None);
    }
}
