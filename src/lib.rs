// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF A11y
//!
//! Screen-reader support for tagged PDFs: semantic roles for structure
//! elements and MathML for formulas, computed over a viewer's structure-tree
//! DOM.
//!
//! ## Core Features
//!
//! - **Roles**: standard structure types mapped to accessibility roles, with
//!   heading levels for `H1`..`H6` (ISO 32000-1:2008 §14.8.4)
//! - **MathML**: formulas rebuilt from `MSFT_MathML` attributes, tagged
//!   MathML structure subtrees, or embedded MathML / alt text
//! - **Fault tolerance**: DOM calls that fail drop only the affected child
//!   or attribute, output is always well-formed
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_a11y::structure::{classify, MathReconstructor, SemanticRole, StructElem, StructType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let heading = classify(Some("H3")).unwrap();
//! assert_eq!(heading.role, SemanticRole::Heading);
//! assert_eq!(heading.level.unwrap().as_str(), "3");
//!
//! let formula = StructElem::new(StructType::Formula)
//!     .with_child(StructElem::tagged("math").with_child(StructElem::tagged("mi").with_value("x")));
//! let markup = MathReconstructor::default().reconstruct(Some(&formula.as_element()))?;
//! assert_eq!(markup, "<math><mi>x</mi></math>");
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

/// PDF logical structure (Tagged PDFs)
pub mod structure;

// Re-exports
pub use config::MathMlConfig;
pub use error::{Error, Result};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
