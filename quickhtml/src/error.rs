use miette::Diagnostic;
use thiserror::Error;

/// Result type for document building operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum Error {
    #[error("document is not ready to render")]
    #[diagnostic(
        code(quickhtml::not_ready),
        help("call `Document::close` once every scope has exited")
    )]
    NotReady,

    #[error("no element has been created in this document")]
    #[diagnostic(
        code(quickhtml::no_current_element),
        help("create an element before appending text to the document")
    )]
    NoCurrentElement,

    #[error("{depth} scope(s) still open: {tags}")]
    #[diagnostic(
        code(quickhtml::unclosed_scopes),
        help("drop every `Scope` guard before closing the document")
    )]
    UnclosedScopes { depth: usize, tags: String },

    #[error("scope <{found}> exited while <{expected}> was the innermost open scope")]
    #[diagnostic(
        code(quickhtml::unbalanced_scope),
        help("scopes must exit in the reverse order they were entered")
    )]
    UnbalancedScope { expected: String, found: String },

    #[error("{fragments} text fragment(s) buffered on <{tag}> were never written")]
    #[diagnostic(
        code(quickhtml::unflushed_text),
        help("enter the element, or send the text to it with `Element::text`, before closing")
    )]
    UnflushedText { tag: String, fragments: usize },

    #[error("scope <{tag}> is already open")]
    #[diagnostic(code(quickhtml::already_open))]
    AlreadyOpen { tag: String },

    #[error("scope <{tag}> has already exited")]
    #[diagnostic(
        code(quickhtml::already_closed),
        help("create a new element instead of reusing a closed one")
    )]
    AlreadyClosed { tag: String },

    #[error("document has already been finalized")]
    #[diagnostic(
        code(quickhtml::already_finalized),
        help("start a new `Document` to build another page")
    )]
    AlreadyFinalized,
}
