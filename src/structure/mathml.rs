//! MathML reconstruction for `Formula` structure elements.
//!
//! A tagged PDF can carry the MathML of a formula in three ways:
//!
//! 1. As a vendor attribute on the `Formula` element holding the complete
//!    MathML string (Microsoft Office writes `MSFT_MathML`).
//! 2. As a tagged subtree: a `math` child whose descendants are structure
//!    elements named after MathML elements, with text in their values.
//! 3. As the `Formula` element's value, either MathML from an associated
//!    file or plain alternate text.
//!
//! [`MathReconstructor`] tries them in that order through [`MathStrategy`]
//! and always produces a single `math` root when given an element.
//!
//! The DOM offers no way to enumerate attributes, so only the attributes in
//! [`allowed_attributes`] (plus `id`, `intent` and `arg`) are copied.

use phf::phf_map;
use quick_xml::escape::escape;
use std::fmt::Write as _;

use super::dom::{DomElement, DomNode};
use crate::config::MathMlConfig;
use crate::error::{Error, Result};

/// Attributes copied for every MathML element; they carry author intent for
/// speech.
pub const UNIVERSAL_ATTRIBUTES: &[&str] = &["intent", "arg"];

/// Redundant namespace declaration found in MathML stored as a value.
pub const MML_NAMESPACE_DECLARATION: &str = r#"xmlns:mml="http://www.w3.org/1998/Math/MathML""#;

const TOKEN: &[&str] = &["mathvariant"];
const MFENCED: &[&str] = &["open", "close", "separators"];
const MENCLOSE: &[&str] = &["notation", "notationtype"];
const ANNOTATION: &[&str] = &["encoding"];
const MS: &[&str] = &["open", "close"];
const MSPACE: &[&str] = &["width"];
const MSGROUP: &[&str] = &["position", "shift"];
const MSROW: &[&str] = &["position"];
const MSLINE: &[&str] = &["position", "length"];
const MSCARRIES: &[&str] = &["position", "crossout"];
const MSCARRY: &[&str] = &["crossout"];
const MSTACK: &[&str] = &["align", "stackalign"];
const MLONGDIV: &[&str] = &["longdivstyle"];

/// Tag-specific attributes that affect how math is spoken or navigated.
static ATTRIBUTE_WHITELIST: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "mi" => TOKEN,
    "mn" => TOKEN,
    "mo" => TOKEN,
    "mtext" => TOKEN,
    "mfenced" => MFENCED,
    "menclose" => MENCLOSE,
    "annotation-xml" => ANNOTATION,
    "annotation" => ANNOTATION,
    "ms" => MS,
    "mspace" => MSPACE,
    "msgroup" => MSGROUP,
    "msrow" => MSROW,
    "msline" => MSLINE,
    "mscarries" => MSCARRIES,
    "mscarry" => MSCARRY,
    "mstack" => MSTACK,
    "mlongdiv" => MLONGDIV,
};

/// Tag-specific attributes copied for `tag`, in emission order.
///
/// Empty for tags without an entry.
pub fn allowed_attributes(tag: &str) -> &'static [&'static str] {
    ATTRIBUTE_WHITELIST.get(tag).copied().unwrap_or(&[])
}

/// Whether `attribute` may be emitted on an element named `tag`.
pub fn is_allowed_attribute(tag: &str, attribute: &str) -> bool {
    attribute == "id"
        || UNIVERSAL_ATTRIBUTES.contains(&attribute)
        || allowed_attributes(tag).contains(&attribute)
}

/// Serialize a tagged MathML element and its descendants.
///
/// Element values are treated as leaf content and copied verbatim; otherwise
/// children are visited in order. Children that cannot be resolved as
/// elements are left out. Returns `None` only if the element's own tag name
/// cannot be read.
///
/// The walk keeps its own stack, so nesting depth is bounded by memory
/// rather than by the thread's call stack.
pub fn build_element_markup<E: DomElement>(element: &E, config: &MathMlConfig) -> Option<String> {
    match element.tag_name() {
        Ok(tag) => {
            let mut out = String::new();
            write_tree(element, tag, config, &mut out);
            Some(out)
        },
        Err(e) => {
            log::debug!("Skipping MathML element without a tag name: {}", e);
            None
        },
    }
}

/// The subtree root is borrowed from the caller; descendants are owned.
enum Held<'a, E> {
    Borrowed(&'a E),
    Owned(E),
}

impl<E> Held<'_, E> {
    fn get(&self) -> &E {
        match self {
            Held::Borrowed(element) => element,
            Held::Owned(element) => element,
        }
    }
}

/// An open element whose children are still being written.
struct Frame<'a, E> {
    element: Held<'a, E>,
    tag: String,
    depth: usize,
    next: usize,
    count: usize,
}

fn write_tree<E: DomElement>(root: &E, tag: String, config: &MathMlConfig, out: &mut String) {
    let mut stack: Vec<Frame<'_, E>> = Vec::new();
    if let Some(frame) = open_element(Held::Borrowed(root), tag, 0, config, out) {
        stack.push(frame);
    }

    while let Some(frame) = stack.last_mut() {
        if frame.next >= frame.count {
            if let Some(done) = stack.pop() {
                close_element(&done.tag, out);
            }
            continue;
        }

        let index = frame.next;
        frame.next += 1;
        let depth = frame.depth + 1;
        let child = match frame.element.get().node().child(index).and_then(|child| child.as_element()) {
            Ok(child) => child,
            Err(e) => {
                log::debug!("Skipping child {} of <{}>: {}", index, frame.tag, e);
                continue;
            },
        };
        let tag = match child.tag_name() {
            Ok(tag) => tag,
            Err(e) => {
                log::debug!("Skipping MathML element without a tag name: {}", e);
                continue;
            },
        };
        if let Some(opened) = open_element(Held::Owned(child), tag, depth, config, out) {
            stack.push(opened);
        }
    }
}

/// Write the start tag and either the leaf value or nothing yet.
///
/// Returns a frame when children remain to be written; otherwise the element
/// is already closed.
fn open_element<'a, E: DomElement>(
    element: Held<'a, E>,
    tag: String,
    depth: usize,
    config: &MathMlConfig,
    out: &mut String,
) -> Option<Frame<'a, E>> {
    let current = element.get();
    out.push('<');
    out.push_str(&tag);

    match current.id() {
        Ok(Some(id)) if !id.is_empty() => push_attribute(out, "id", &id),
        Ok(_) => {},
        Err(e) => log::trace!("GetID failed on <{}>: {}", tag, e),
    }
    push_attributes(current, &tag, UNIVERSAL_ATTRIBUTES, config, out);
    push_attributes(current, &tag, allowed_attributes(&tag), config, out);
    out.push('>');

    let node = current.node();
    match node.value() {
        Ok(Some(value)) if !value.is_empty() => {
            out.push_str(&value);
            close_element(&tag, out);
            return None;
        },
        Ok(_) => {},
        Err(e) => log::trace!("GetValue failed on <{}>: {}", tag, e),
    }

    let count = match node.child_count() {
        Ok(count) => count,
        Err(e) => {
            log::debug!("GetChildCount failed on <{}>: {}", tag, e);
            0
        },
    };
    if count == 0 {
        close_element(&tag, out);
        return None;
    }
    if let Some(max_depth) = config.max_depth {
        if depth >= max_depth as usize {
            log::warn!("MathML nesting limit {} reached at <{}>, omitting {} children", max_depth, tag, count);
            close_element(&tag, out);
            return None;
        }
    }

    Some(Frame {
        element,
        tag,
        depth,
        next: 0,
        count,
    })
}

fn close_element(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_attributes<E: DomElement>(
    element: &E,
    tag: &str,
    names: &[&str],
    config: &MathMlConfig,
    out: &mut String,
) {
    for name in names {
        match element.attribute(name, &config.attribute_namespace) {
            Ok(Some(value)) if !value.is_empty() => push_attribute(out, name, &value),
            Ok(_) => {},
            Err(e) => log::trace!("GetAttribute({}) failed on <{}>: {}", name, tag, e),
        }
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {}=\"{}\"", name, escape(value));
}

/// One way of obtaining MathML for a `Formula` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathStrategy {
    /// Complete MathML in a vendor attribute, returned verbatim
    VendorAttribute,
    /// First `math` child rebuilt with [`build_element_markup`]
    TaggedSubtree,
    /// Element value: MathML with the `mml` declaration removed, or alt text
    /// wrapped in `<mtext>`
    AltText,
}

impl MathStrategy {
    /// Strategies in priority order.
    pub const ORDER: [MathStrategy; 3] =
        [MathStrategy::VendorAttribute, MathStrategy::TaggedSubtree, MathStrategy::AltText];

    /// Run this strategy alone. `AltText` always produces markup.
    pub fn apply<E: DomElement>(self, element: &E, config: &MathMlConfig) -> Option<String> {
        match self {
            MathStrategy::VendorAttribute => vendor_attribute(element, config),
            MathStrategy::TaggedSubtree => tagged_subtree(element, config),
            MathStrategy::AltText => Some(alt_text(element)),
        }
    }
}

fn vendor_attribute<E: DomElement>(element: &E, config: &MathMlConfig) -> Option<String> {
    match element.attribute(&config.vendor_attribute, &config.vendor_namespace) {
        Ok(Some(math)) if !math.is_empty() => Some(math),
        Ok(_) => None,
        Err(e) => {
            log::debug!("GetAttribute({}) failed: {}", config.vendor_attribute, e);
            None
        },
    }
}

fn tagged_subtree<E: DomElement>(element: &E, config: &MathMlConfig) -> Option<String> {
    let node = element.node();
    let count = node
        .child_count()
        .map_err(|e| log::debug!("GetChildCount failed on Formula: {}", e))
        .ok()?;

    for index in 0..count {
        let child = match node.child(index).and_then(|child| child.as_element()) {
            Ok(child) => child,
            Err(e) => {
                log::warn!("Could not get Formula child {}: {}", index, e);
                continue;
            },
        };
        let tag = match child.tag_name() {
            Ok(tag) => tag,
            Err(e) => {
                log::warn!("Could not get tag of Formula child {}: {}", index, e);
                continue;
            },
        };
        log::trace!("Formula child {}: tag={}", index, tag);
        if tag == "math" {
            let mut out = String::new();
            write_tree(&child, tag, config, &mut out);
            return Some(out);
        }
    }
    None
}

fn alt_text<E: DomElement>(element: &E) -> String {
    let value = match element.node().value() {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            log::debug!("GetValue failed on Formula: {}", e);
            String::new()
        },
    };

    // Only the exact declaration is removed; other prefixes or quoting stay.
    if value.starts_with("<math") {
        return value.replace(MML_NAMESPACE_DECLARATION, "");
    }

    format!("<math><mtext>{}</mtext></math>", escape(&value))
}

/// Produces MathML for `Formula` structure elements.
#[derive(Debug, Clone, Default)]
pub struct MathReconstructor {
    config: MathMlConfig,
}

impl MathReconstructor {
    /// Create a reconstructor with the given configuration.
    pub fn new(config: MathMlConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &MathMlConfig {
        &self.config
    }

    /// MathML for a `Formula` element.
    ///
    /// Returns [`Error::NotFound`] when there is no element; otherwise the
    /// first strategy in [`MathStrategy::ORDER`] that yields markup wins.
    pub fn reconstruct<E: DomElement>(&self, element: Option<&E>) -> Result<String> {
        let Some(element) = element else {
            log::warn!("No structure element to take MathML from");
            return Err(Error::NotFound);
        };

        for strategy in MathStrategy::ORDER {
            if let Some(markup) = strategy.apply(element, &self.config) {
                log::debug!("MathML from {:?}: {}", strategy, markup);
                return Ok(markup);
            }
        }
        Err(Error::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::types::{StructChild, StructElem, StructType};

    fn mi(text: &str) -> StructElem {
        StructElem::tagged("mi").with_value(text)
    }

    fn reconstruct(elem: &StructElem) -> String {
        MathReconstructor::default()
            .reconstruct(Some(&elem.as_element()))
            .unwrap()
    }

    #[test]
    fn test_whitelist_table() {
        assert_eq!(allowed_attributes("mi"), &["mathvariant"]);
        assert_eq!(allowed_attributes("mtext"), &["mathvariant"]);
        assert_eq!(allowed_attributes("mfenced"), &["open", "close", "separators"]);
        assert_eq!(allowed_attributes("menclose"), &["notation", "notationtype"]);
        assert_eq!(allowed_attributes("annotation-xml"), &["encoding"]);
        assert_eq!(allowed_attributes("ms"), &["open", "close"]);
        assert_eq!(allowed_attributes("mspace"), &["width"]);
        assert_eq!(allowed_attributes("msgroup"), &["position", "shift"]);
        assert_eq!(allowed_attributes("msrow"), &["position"]);
        assert_eq!(allowed_attributes("msline"), &["position", "length"]);
        assert_eq!(allowed_attributes("mscarries"), &["position", "crossout"]);
        assert_eq!(allowed_attributes("mscarry"), &["crossout"]);
        assert_eq!(allowed_attributes("mstack"), &["align", "stackalign"]);
        assert_eq!(allowed_attributes("mlongdiv"), &["longdivstyle"]);
        assert!(allowed_attributes("mfrac").is_empty());
        assert!(allowed_attributes("math").is_empty());
    }

    #[test]
    fn test_is_allowed_attribute() {
        assert!(is_allowed_attribute("mfrac", "intent"));
        assert!(is_allowed_attribute("mfrac", "arg"));
        assert!(is_allowed_attribute("mfrac", "id"));
        assert!(is_allowed_attribute("mo", "mathvariant"));
        assert!(!is_allowed_attribute("mfrac", "mathvariant"));
        assert!(!is_allowed_attribute("mi", "width"));
    }

    #[test]
    fn test_build_leaf_and_attributes() {
        let elem = StructElem::tagged("mi")
            .with_id("v1")
            .with_value("x")
            .with_attribute("NSO", "mathvariant", "bold")
            .with_attribute("NSO", "intent", "velocity")
            .with_attribute("NSO", "width", "2em");
        let markup = build_element_markup(&elem.as_element(), &MathMlConfig::default()).unwrap();
        assert_eq!(markup, r#"<mi id="v1" intent="velocity" mathvariant="bold">x</mi>"#);
    }

    #[test]
    fn test_attributes_outside_nso_are_ignored() {
        let elem = StructElem::tagged("mspace").with_attribute("Layout", "width", "1em");
        let markup = build_element_markup(&elem.as_element(), &MathMlConfig::default()).unwrap();
        assert_eq!(markup, "<mspace></mspace>");
    }

    #[test]
    fn test_value_wins_over_children() {
        let elem = StructElem::tagged("mrow").with_value("raw").with_child(mi("y"));
        let markup = build_element_markup(&elem.as_element(), &MathMlConfig::default()).unwrap();
        assert_eq!(markup, "<mrow>raw</mrow>");
    }

    #[test]
    fn test_tagged_subtree() {
        // Formula
        //   └─ math
        //       └─ mfrac (mi a, mn 2)
        let formula = StructElem::new(StructType::Formula).with_child(
            StructElem::tagged("math").with_child(
                StructElem::tagged("mfrac")
                    .with_child(mi("a"))
                    .with_child(StructElem::tagged("mn").with_value("2")),
            ),
        );
        assert_eq!(
            reconstruct(&formula),
            "<math><mfrac><mi>a</mi><mn>2</mn></mfrac></math>"
        );
    }

    #[test]
    fn test_first_math_child_only() {
        let formula = StructElem::new(StructType::Formula)
            .with_child(StructElem::new(StructType::Span).with_value("ignored"))
            .with_child(StructElem::tagged("math").with_child(mi("first")))
            .with_child(StructElem::tagged("math").with_child(mi("second")));
        assert_eq!(reconstruct(&formula), "<math><mi>first</mi></math>");
    }

    #[test]
    fn test_vendor_attribute_wins() {
        let formula = StructElem::new(StructType::Formula)
            .with_attribute("MSFT_Office", "MSFT_MathML", "<math><mi>v</mi></math>")
            .with_child(StructElem::tagged("math").with_child(mi("t")));
        assert_eq!(reconstruct(&formula), "<math><mi>v</mi></math>");
    }

    #[test]
    fn test_empty_vendor_attribute_falls_through() {
        let formula = StructElem::new(StructType::Formula)
            .with_attribute("MSFT_Office", "MSFT_MathML", "")
            .with_child(StructElem::tagged("math").with_child(mi("t")));
        assert_eq!(reconstruct(&formula), "<math><mi>t</mi></math>");
    }

    #[test]
    fn test_value_mathml_namespace_is_stripped() {
        let formula = StructElem::new(StructType::Formula).with_value(
            r#"<math xmlns:mml="http://www.w3.org/1998/Math/MathML"><mi>x</mi></math>"#,
        );
        assert_eq!(reconstruct(&formula), "<math ><mi>x</mi></math>");
    }

    #[test]
    fn test_value_with_other_quoting_is_left_alone() {
        let value = "<math xmlns:mml='http://www.w3.org/1998/Math/MathML'><mi>x</mi></math>";
        let formula = StructElem::new(StructType::Formula).with_value(value);
        assert_eq!(reconstruct(&formula), value);
    }

    #[test]
    fn test_alt_text_is_escaped() {
        let formula = StructElem::new(StructType::Formula).with_value("a < b & c");
        assert_eq!(reconstruct(&formula), "<math><mtext>a &lt; b &amp; c</mtext></math>");
    }

    #[test]
    fn test_missing_value_gives_empty_mtext() {
        let mut formula = StructElem::new(StructType::Formula);
        formula.add_child(StructChild::MarkedContentRef { mcid: 0, page: 0 });
        assert_eq!(reconstruct(&formula), "<math><mtext></mtext></math>");
    }

    #[test]
    fn test_absent_element_is_not_found() {
        let result = MathReconstructor::default().reconstruct::<crate::structure::ElemRef<'_>>(None);
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[test]
    fn test_unresolved_children_are_skipped() {
        let mut mrow = StructElem::tagged("mrow");
        mrow.add_child(StructChild::StructElem(Box::new(mi("a"))));
        mrow.add_child(StructChild::ObjectRef(40, 0));
        mrow.add_child(StructChild::StructElem(Box::new(StructElem::tagged("mo").with_value("+"))));
        let markup = build_element_markup(&mrow.as_element(), &MathMlConfig::default()).unwrap();
        assert_eq!(markup, "<mrow><mi>a</mi><mo>+</mo></mrow>");
    }

    #[test]
    fn test_max_depth_truncates_subtree() {
        let formula = StructElem::new(StructType::Formula).with_child(
            StructElem::tagged("math")
                .with_child(StructElem::tagged("mrow").with_child(StructElem::tagged("mrow").with_child(mi("deep")))),
        );
        let reconstructor = MathReconstructor::new(MathMlConfig::new().with_max_depth(Some(2)));
        let markup = reconstructor.reconstruct(Some(&formula.as_element())).unwrap();
        assert_eq!(markup, "<math><mrow><mrow></mrow></mrow></math>");
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let elem = StructElem::tagged("mo")
            .with_value("x")
            .with_attribute("NSO", "intent", "\"quoted\" & more");
        let markup = build_element_markup(&elem.as_element(), &MathMlConfig::default()).unwrap();
        assert_eq!(markup, r#"<mo intent="&quot;quoted&quot; &amp; more">x</mo>"#);
    }

    #[test]
    fn test_strategies_in_isolation() {
        let formula = StructElem::new(StructType::Formula).with_value("alt");
        let view = formula.as_element();
        let config = MathMlConfig::default();
        assert_eq!(MathStrategy::VendorAttribute.apply(&view, &config), None);
        assert_eq!(MathStrategy::TaggedSubtree.apply(&view, &config), None);
        assert_eq!(
            MathStrategy::AltText.apply(&view, &config).as_deref(),
            Some("<math><mtext>alt</mtext></math>")
        );
    }
}
