//! Document state and lifecycle.

use std::{
    cell::{OnceCell, RefCell},
    rc::Rc,
};

use indexmap::IndexSet;
use quickhtml_core::{Attributes, Indent};

use crate::{
    element::{Element, ElementId, LINE_BREAK, PARAGRAPH},
    error::{Error, Result},
    kind::ElementKind,
};

/// Lifecycle of one element instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Written as `<tag/>`, never entered.
    Placeholder,
    /// Scope entered, closing tag pending.
    Open,
    /// Scope exited. Terminal.
    Closed,
}

#[derive(Debug)]
struct Record {
    tag: Rc<str>,
    phase: Phase,
    pending: Vec<String>,
}

#[derive(Debug, Default)]
struct State {
    lines: Vec<String>,
    /// Innermost open scope last. Its length is the current depth.
    open: Vec<ElementId>,
    elements: Vec<Record>,
    last: Option<ElementId>,
    unbalanced: Option<(String, String)>,
    /// Bumped by `open()`; ids from an earlier generation are stale.
    generation: u32,
}

impl State {
    fn depth(&self) -> usize {
        self.open.len()
    }

    fn record(&self, id: ElementId) -> Option<&Record> {
        (id.generation == self.generation)
            .then(|| self.elements.get(id.index))
            .flatten()
    }

    fn record_mut(&mut self, id: ElementId) -> Option<&mut Record> {
        if id.generation != self.generation {
            return None;
        }
        self.elements.get_mut(id.index)
    }

    fn tag(&self, id: ElementId) -> String {
        self.record(id)
            .map(|record| record.tag.to_string())
            .unwrap_or_default()
    }
}

/// An HTML document under construction.
///
/// All builder state lives here: the output lines, the open scope stack, the
/// most recently created element and the cache of element kinds. Elements and
/// scopes borrow the document, so several documents can be built side by side.
///
/// The document is single-threaded (`!Sync`); share it across threads only
/// behind an external lock.
#[derive(Debug)]
pub struct Document {
    indent: Indent,
    state: RefCell<State>,
    kinds: RefCell<IndexSet<Rc<str>>>,
    finalized: OnceCell<String>,
}

impl Document {
    /// Create an empty document indenting each level by `indent`.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent,
            state: RefCell::default(),
            kinds: RefCell::default(),
            finalized: OnceCell::new(),
        }
    }

    /// Open a document, run `f` against it and return the rendered markup.
    ///
    /// ```
    /// use quickhtml::{Document, Indent};
    ///
    /// let html = Document::build(Indent::Spaces(2), |doc| {
    ///     doc.get("title").create_bare().text("My Webpage")
    /// })?;
    /// assert_eq!(html, "<title>\n  My Webpage\n</title>");
    /// # Ok::<(), quickhtml::Error>(())
    /// ```
    pub fn build<F>(indent: Indent, f: F) -> Result<String>
    where
        F: FnOnce(&Document) -> Result<()>,
    {
        let doc = Self::new(indent);
        doc.open()?;
        f(&doc)?;
        doc.close()?;
        doc.into_string()
    }

    /// Reset the output and start building.
    ///
    /// Elements created before the reset are dropped from the document: their
    /// scopes no longer write anything and they no longer accept text.
    pub fn open(&self) -> Result<&Self> {
        if self.is_finalized() {
            return Err(Error::AlreadyFinalized);
        }

        let mut state = self.state.borrow_mut();
        state.lines.clear();
        state.open.clear();
        state.last = None;
        state.unbalanced = None;
        state.elements.clear();
        state.generation = state.generation.wrapping_add(1);
        tracing::debug!(indent = ?self.indent, "opened document");

        Ok(self)
    }

    /// Finalize the document.
    ///
    /// Fails if a scope is still open, scopes exited out of order, or text is
    /// still buffered on an element that was never entered. Closing an already
    /// finalized document does nothing.
    pub fn close(&self) -> Result<()> {
        if self.is_finalized() {
            return Ok(());
        }

        let state = self.state.borrow();
        if let Some((expected, found)) = &state.unbalanced {
            return Err(Error::UnbalancedScope {
                expected: expected.clone(),
                found: found.clone(),
            });
        }
        if !state.open.is_empty() {
            let tags = state
                .open
                .iter()
                .map(|id| format!("<{}>", state.tag(*id)))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::UnclosedScopes {
                depth: state.depth(),
                tags,
            });
        }
        if let Some(record) = state
            .elements
            .iter()
            .find(|record| record.phase == Phase::Placeholder && !record.pending.is_empty())
        {
            return Err(Error::UnflushedText {
                tag: record.tag.to_string(),
                fragments: record.pending.len(),
            });
        }

        let html = self.finalized.get_or_init(|| state.lines.join("\n"));
        tracing::debug!(
            lines = state.lines.len(),
            bytes = html.len(),
            "finalized document"
        );
        Ok(())
    }

    /// The rendered markup. Only available after [`close`](Self::close).
    pub fn render(&self) -> Result<&str> {
        self.finalized
            .get()
            .map(String::as_str)
            .ok_or(Error::NotReady)
    }

    /// Consume the document and return the rendered markup.
    pub fn into_string(self) -> Result<String> {
        self.finalized.into_inner().ok_or(Error::NotReady)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.get().is_some()
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.state.borrow().depth()
    }

    pub fn indent(&self) -> Indent {
        self.indent
    }

    /// Look up the element kind for `name`, creating it on first use.
    ///
    /// Any name is accepted and used verbatim as the tag name.
    pub fn get(&self, name: &str) -> ElementKind<'_> {
        let mut kinds = self.kinds.borrow_mut();
        let name = match kinds.get(name) {
            Some(existing) => Rc::clone(existing),
            None => {
                let created: Rc<str> = Rc::from(name);
                kinds.insert(Rc::clone(&created));
                tracing::trace!(tag = name, "created element kind");
                created
            }
        };
        ElementKind::new(self, name)
    }

    /// Shorthand for `self.get(name).create(attrs)`.
    pub fn element(&self, name: &str, attrs: impl Into<Attributes>) -> Element<'_> {
        self.get(name).create(attrs)
    }

    /// Names of every kind requested so far, in first-use order.
    pub fn kinds(&self) -> Vec<String> {
        self.kinds.borrow().iter().map(|k| k.to_string()).collect()
    }

    /// Append text to the most recently created element.
    ///
    /// The text is written when that element's scope exits. Fails if no
    /// element exists yet or the last element has already exited, so text
    /// sent after a leaf, a flushed `<p>` or an exited child is rejected.
    /// Text buffered on an element that is never entered makes
    /// [`close`](Self::close) fail.
    pub fn text(&self, text: impl Into<String>) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let id = state.last.ok_or(Error::NoCurrentElement)?;
        let record = state.record_mut(id).ok_or(Error::NoCurrentElement)?;
        if record.phase == Phase::Closed {
            return Err(Error::AlreadyClosed {
                tag: record.tag.to_string(),
            });
        }
        record.pending.push(text.into());
        Ok(())
    }

    // =========================================================================
    // Element plumbing
    // =========================================================================

    /// Write `<tag attrs/>` at the current depth and register it as last.
    pub(crate) fn create_element(&self, tag: Rc<str>, attrs: &Attributes) -> Element<'_> {
        let mut state = self.state.borrow_mut();
        let indent = self.indent.prefix(state.depth());
        let line = if attrs.is_empty() {
            format!("{indent}<{tag}/>")
        } else {
            format!("{indent}<{tag} {attrs}/>")
        };

        let id = ElementId {
            generation: state.generation,
            index: state.elements.len(),
        };
        state.elements.push(Record {
            tag: Rc::clone(&tag),
            phase: Phase::Placeholder,
            pending: Vec::new(),
        });
        state.lines.push(line);
        state.last = Some(id);

        Element::new(self, id, tag, indent, state.lines.len() - 1)
    }

    /// Phase of an element. Elements from before the last reset are closed.
    pub(crate) fn phase(&self, id: ElementId) -> Phase {
        self.state
            .borrow()
            .record(id)
            .map_or(Phase::Closed, |record| record.phase)
    }

    pub(crate) fn push_text(&self, id: ElementId, text: String) {
        if let Some(record) = self.state.borrow_mut().record_mut(id) {
            record.pending.push(text);
        }
    }

    /// Promote the element's placeholder line to an open tag and push the scope.
    pub(crate) fn enter_scope(&self, element: &Element<'_>) -> Result<()> {
        let id = element.id();
        let mut state = self.state.borrow_mut();
        let Some(record) = state.record_mut(id) else {
            return Err(Error::AlreadyClosed {
                tag: element.tag().to_string(),
            });
        };
        match record.phase {
            Phase::Open => {
                return Err(Error::AlreadyOpen {
                    tag: record.tag.to_string(),
                });
            }
            Phase::Closed => {
                return Err(Error::AlreadyClosed {
                    tag: record.tag.to_string(),
                });
            }
            Phase::Placeholder => record.phase = Phase::Open,
        }

        let tag = Rc::clone(&record.tag);
        if let Some(placeholder) = state.lines.get_mut(element.line()) {
            if let Some(open) = placeholder.strip_suffix("/>") {
                *placeholder = format!("{open}>");
            }
        }
        state.open.push(id);
        tracing::debug!(tag = %tag, depth = state.depth(), "entered scope");

        Ok(())
    }

    /// Flush pending text, pop the scope and write the closing tag.
    ///
    /// Does nothing unless the scope is open, so it runs at most once.
    pub(crate) fn exit_scope(&self, id: ElementId, closing: String) {
        let pending = {
            let mut state = self.state.borrow_mut();
            match state.record_mut(id) {
                Some(record) if record.phase == Phase::Open => {
                    std::mem::take(&mut record.pending)
                }
                _ => return,
            }
        };

        if !pending.is_empty() {
            self.flush_text(pending);
        }

        let mut state = self.state.borrow_mut();
        if let Some(record) = state.record_mut(id) {
            record.phase = Phase::Closed;
        }
        if state.open.last() == Some(&id) {
            state.open.pop();
        } else {
            let expected = state
                .open
                .last()
                .map(|top| state.tag(*top))
                .unwrap_or_default();
            let found = state.tag(id);
            tracing::warn!(%expected, %found, "scope exited out of order");
            state.open.retain(|open| *open != id);
            if state.unbalanced.is_none() {
                state.unbalanced = Some((expected, found));
            }
        }
        tracing::debug!(depth = state.depth(), "exited scope");
        state.lines.push(closing);
    }

    /// Write buffered text at the current depth.
    ///
    /// Several fragments are joined with line breaks inside a `<p>` child;
    /// a single fragment is written directly, one line per break.
    fn flush_text(&self, pending: Vec<String>) {
        let joined = pending.join(LINE_BREAK);
        tracing::trace!(fragments = pending.len(), "flushing text");

        if pending.len() > 1 {
            let paragraph = self.get(PARAGRAPH).create_bare();
            // A freshly created element is always enterable.
            if let Ok(_scope) = paragraph.enter() {
                self.push_text(paragraph.id(), joined);
            }
            return;
        }

        let mut state = self.state.borrow_mut();
        let indent = self.indent.prefix(state.depth());
        let mut pieces = joined.split(LINE_BREAK);
        if let Some(first) = pieces.next() {
            state.lines.push(format!("{indent}{first}"));
        }
        for piece in pieces {
            state.lines.push(format!("{indent}{LINE_BREAK}"));
            state.lines.push(format!("{indent}{piece}"));
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}
