//! Element instances and their scopes.

use std::{fmt, ops::Deref, rc::Rc};

use crate::{
    document::{Document, Phase},
    error::{Error, Result},
};

/// Marker joining text fragments, written on its own line when flushed.
pub const LINE_BREAK: &str = "<br/>";

/// Tag wrapped around text made of more than one fragment.
pub const PARAGRAPH: &str = "p";

/// Position of an element's record inside its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ElementId {
    pub(crate) generation: u32,
    pub(crate) index: usize,
}

/// One element written into a document.
///
/// Until entered it renders as `<tag .../>`. Entering it with
/// [`enter`](Self::enter) rewrites that line to `<tag ...>` and the closing
/// tag follows when the returned [`Scope`] drops.
pub struct Element<'d> {
    doc: &'d Document,
    id: ElementId,
    tag: Rc<str>,
    /// Prefix at creation depth, shared by the opening and closing tags.
    indent: String,
    line: usize,
}

impl<'d> Element<'d> {
    pub(crate) fn new(
        doc: &'d Document,
        id: ElementId,
        tag: Rc<str>,
        indent: String,
        line: usize,
    ) -> Self {
        Self {
            doc,
            id,
            tag,
            indent,
            line,
        }
    }

    pub(crate) fn id(&self) -> ElementId {
        self.id
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the element's scope is currently open.
    pub fn is_open(&self) -> bool {
        self.doc.phase(self.id) == Phase::Open
    }

    /// Open the element's scope.
    ///
    /// Elements created while the returned guard lives are nested one level
    /// deeper. Dropping the guard writes pending text and the closing tag,
    /// including when the enclosing block unwinds.
    pub fn enter(&self) -> Result<Scope<'_, 'd>> {
        self.doc.enter_scope(self)?;
        Ok(Scope { element: self })
    }

    /// Add text to the element.
    ///
    /// Inside an open scope the text is buffered until the scope exits. On an
    /// element that was never entered, the scope is opened and closed around
    /// the text right away, producing a complete `<tag>text</tag>` block.
    pub fn text(&self, text: impl Into<String>) -> Result<()> {
        match self.doc.phase(self.id) {
            Phase::Open => {
                self.doc.push_text(self.id, text.into());
                Ok(())
            }
            Phase::Placeholder => {
                self.doc.push_text(self.id, text.into());
                self.enter().map(drop)
            }
            Phase::Closed => Err(Error::AlreadyClosed {
                tag: self.tag.to_string(),
            }),
        }
    }

    fn exit(&self) {
        self.doc
            .exit_scope(self.id, format!("{}</{}>", self.indent, self.tag));
    }
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("line", &self.line)
            .finish()
    }
}

/// Guard for an open element scope.
///
/// Dereferences to the [`Element`], so text can be added through the guard.
#[must_use = "the scope closes as soon as the guard is dropped"]
pub struct Scope<'e, 'd> {
    element: &'e Element<'d>,
}

impl Scope<'_, '_> {
    /// Close the scope now instead of at the end of the block.
    pub fn exit(self) {
        drop(self);
    }
}

impl<'d> Deref for Scope<'_, 'd> {
    type Target = Element<'d>;

    fn deref(&self) -> &Self::Target {
        self.element
    }
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        self.element.exit();
    }
}

impl fmt::Debug for Scope<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Scope").field(self.element).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use quickhtml_core::Indent;

    use super::*;

    fn render(doc: &Document) -> String {
        doc.close().expect("document should close");
        doc.render().expect("document should render").to_string()
    }

    #[test]
    fn test_enter_rewrites_placeholder() {
        let doc = Document::new(Indent::Spaces(4));
        doc.open().unwrap();
        {
            let div = doc.element("div", [("id", "main")]);
            let _div = div.enter().unwrap();
            assert!(div.is_open());
            assert_eq!(doc.depth(), 1);
        }
        assert_eq!(doc.depth(), 0);
        assert_eq!(render(&doc), "<div id='main'>\n</div>");
    }

    #[test]
    fn test_enter_rewrites_own_line_not_last_line() {
        let doc = Document::new(Indent::Spaces(2));
        doc.open().unwrap();
        let ul = doc.get("ul").create_bare();
        doc.get("hr").create_bare();
        drop(ul.enter().unwrap());
        assert_eq!(render(&doc), "<ul>\n<hr/>\n</ul>");
    }

    #[test]
    fn test_leaf_text_auto_closes() {
        let doc = Document::new(Indent::Spaces(4));
        doc.open().unwrap();
        let title = doc.get("title").create_bare();
        title.text("My Webpage").unwrap();
        assert!(!title.is_open());
        assert_eq!(doc.depth(), 0);
        assert_eq!(render(&doc), "<title>\n    My Webpage\n</title>");
    }

    #[test]
    fn test_single_fragment_with_break_marker_splits_lines() {
        let doc = Document::new(Indent::Spaces(2));
        doc.open().unwrap();
        doc.get("td")
            .create_bare()
            .text("one<br/>two")
            .unwrap();
        assert_eq!(render(&doc), "<td>\n  one\n  <br/>\n  two\n</td>");
    }

    #[test]
    fn test_multiple_fragments_promote_to_paragraph() {
        let doc = Document::new(Indent::Spaces(4));
        doc.open().unwrap();
        {
            let a = doc.element("a", [("href", "#")]);
            let a = a.enter().unwrap();
            a.text("Home").unwrap();
            a.text("Contact").unwrap();
        }
        assert_eq!(
            render(&doc),
            "<a href='#'>\n    <p>\n        Home\n        <br/>\n        Contact\n    </p>\n</a>"
        );
    }

    #[test]
    fn test_text_after_exit_fails() {
        let doc = Document::new(Indent::Spaces(4));
        doc.open().unwrap();
        let span = doc.get("span").create_bare();
        span.text("once").unwrap();
        assert_eq!(
            span.text("twice"),
            Err(Error::AlreadyClosed {
                tag: "span".to_string()
            })
        );
    }

    #[test]
    fn test_reenter_fails() {
        let doc = Document::new(Indent::Spaces(4));
        doc.open().unwrap();
        let div = doc.get("div").create_bare();
        {
            let _scope = div.enter().unwrap();
            assert_eq!(
                div.enter().err(),
                Some(Error::AlreadyOpen {
                    tag: "div".to_string()
                })
            );
        }
        assert_eq!(
            div.enter().err(),
            Some(Error::AlreadyClosed {
                tag: "div".to_string()
            })
        );
        assert_eq!(render(&doc), "<div>\n</div>");
    }

    #[test]
    fn test_explicit_exit() {
        let doc = Document::new(Indent::Spaces(4));
        doc.open().unwrap();
        let nav = doc.get("nav").create_bare();
        let scope = nav.enter().unwrap();
        scope.text("links").unwrap();
        scope.exit();
        doc.get("footer").create_bare();
        assert_eq!(render(&doc), "<nav>\n    links\n</nav>\n<footer/>");
    }

    #[test]
    fn test_closing_tag_aligns_with_opening_tag() {
        let doc = Document::new(Indent::Spaces(3));
        doc.open().unwrap();
        {
            let a = doc.get("a").create_bare();
            let _a = a.enter().unwrap();
            let b = doc.get("b").create_bare();
            let _b = b.enter().unwrap();
            doc.get("c").create_bare().text("deep").unwrap();
        }
        assert_eq!(
            render(&doc),
            "<a>\n   <b>\n      <c>\n         deep\n      </c>\n   </b>\n</a>"
        );
    }

    #[test]
    fn test_scope_exits_during_unwind() {
        let doc = Document::new(Indent::Spaces(4));
        doc.open().unwrap();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let section = doc.get("section").create_bare();
            let section = section.enter().unwrap();
            section.text("partial").unwrap();
            panic!("builder failed");
        }));
        assert!(result.is_err());
        assert_eq!(doc.depth(), 0);
        assert_eq!(render(&doc), "<section>\n    partial\n</section>");
    }
}
