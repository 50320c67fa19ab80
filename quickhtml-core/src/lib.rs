//! Value-level primitives for the quickhtml builder.
//!
//! Nothing in this crate knows about documents or scopes. It covers the
//! pieces a rendered line is made of:
//!
//! - [`Indent`] - Whitespace unit repeated once per nesting level
//! - [`AttrValue`] - Scalar attribute values and their quoted form
//! - [`Attributes`] - Insertion-ordered attribute list
//! - [`attribute_name`] - Reserved-word remap for attribute keys

mod attributes;
mod indent;
mod reserved;
mod value;

pub use attributes::Attributes;
pub use indent::Indent;
pub use reserved::{RESERVED_WORDS, attribute_name};
pub use value::AttrValue;
