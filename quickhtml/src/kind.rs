//! Element kinds: one per distinct tag name in a document.

use std::{fmt, ptr, rc::Rc};

use quickhtml_core::Attributes;

use crate::{document::Document, element::Element};

/// A tag name bound to a document.
///
/// Kinds are cached by name, so asking a document for `"li"` twice yields two
/// handles to the same kind. Each [`create`](Self::create) call produces a new,
/// independent [`Element`].
#[derive(Clone)]
pub struct ElementKind<'d> {
    doc: &'d Document,
    name: Rc<str>,
}

impl<'d> ElementKind<'d> {
    pub(crate) fn new(doc: &'d Document, name: Rc<str>) -> Self {
        Self { doc, name }
    }

    /// The tag name, exactly as requested.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether both handles refer to the same cached kind of the same document.
    pub fn same_kind(&self, other: &ElementKind<'_>) -> bool {
        ptr::eq(self.doc, other.doc) && Rc::ptr_eq(&self.name, &other.name)
    }

    /// Write a new self-closed element at the current depth.
    ///
    /// Attributes are rendered in the order given, with `class_` written as
    /// `class`.
    pub fn create(&self, attrs: impl Into<Attributes>) -> Element<'d> {
        self.doc
            .create_element(Rc::clone(&self.name), &attrs.into())
    }

    /// Write a new self-closed element without attributes.
    pub fn create_bare(&self) -> Element<'d> {
        self.create(Attributes::new())
    }
}

impl fmt::Debug for ElementKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementKind").field(&self.name).finish()
    }
}
