//! Build indented HTML through nested scopes.
//!
//! A [`Document`] hands out [`ElementKind`]s for any tag name. Creating an
//! element writes it as self-closed (`<link .../>`); entering it with
//! [`Element::enter`] turns it into an open tag and indents everything
//! created while the returned [`Scope`] is alive. Dropping the scope writes
//! buffered text and the closing tag.
//!
//! # Example
//!
//! ```
//! use quickhtml::{Document, Indent};
//!
//! let doc = Document::new(Indent::FOUR);
//! doc.open()?;
//! {
//!     let div = doc.element("div", [("class_", "container")]);
//!     let _div = div.enter()?;
//!     doc.element("a", [("href", "#")]).text("Home")?;
//! }
//! doc.close()?;
//!
//! assert_eq!(
//!     doc.render()?,
//!     "<div class='container'>\n    <a href='#'>\n        Home\n    </a>\n</div>"
//! );
//! # Ok::<(), quickhtml::Error>(())
//! ```

mod document;
mod element;
mod error;
mod kind;

pub use document::Document;
pub use element::{Element, LINE_BREAK, PARAGRAPH, Scope};
pub use error::{Error, Result};
pub use kind::ElementKind;
pub use quickhtml_core::{AttrValue, Attributes, Indent, attribute_name};
