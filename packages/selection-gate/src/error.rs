/// A result with [`GateError`] as the error type.
pub type Result<T, E = GateError> = std::result::Result<T, E>;

/// Errors raised while setting up a gate.
///
/// Binding and click handling never fail. These only come out of the entry points that build the pieces a gate is
/// bound with: reading a configuration, parsing markup, or locating the browser document.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum GateError {
    /// The JSON configuration could not be read.
    #[error("invalid gate configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The markup handed to [`crate::MemoryDocument::parse`] is not valid HTML.
    #[error("failed to parse markup: {0}")]
    Markup(String),

    /// There is no `window`, for example inside a web worker.
    #[error("no window is available, the gate must run on a page's main thread")]
    NoWindow,

    /// The window has no document attached.
    #[error("the window has no document")]
    NoDocument,

    /// The element holding the embedded configuration does not exist.
    #[error("no element with id `{0}` holds a gate configuration")]
    MissingConfigElement(String),

    /// A DOM call was rejected by the browser.
    #[error("dom operation failed: {0}")]
    Dom(String),
}
