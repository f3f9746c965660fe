//! Selection Gate for the browser
//!
//! Binds a [`selection_gate::SelectionGate`] to the page through `web-sys`.
//!
//! ```rust, ignore
//! use selection_gate::{GateConfig, SubmitMatch};
//!
//! selection_gate_web::launch_forever(GateConfig::new(SubmitMatch::Button)).unwrap();
//! ```

use std::rc::Rc;

pub use selection_gate::{self, GateBinding, GateConfig, GateError, Result, SubmitMatch};
use selection_gate::SelectionGate;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

mod document;
pub use document::{WebDocument, WebListener};

/// Bind the gate to the current page and return the binding.
///
/// The gate is unbound when the binding is dropped. Call this after the page has loaded, or use [`launch_forever`]
/// which waits for it.
pub fn launch(config: GateConfig) -> Result<GateBinding<WebDocument>> {
    let document = Rc::new(WebDocument::from_window()?);
    Ok(SelectionGate::bind(document, config))
}

/// Bind the gate for the lifetime of the page.
///
/// If the document is still loading, binding is deferred until `DOMContentLoaded`.
pub fn launch_forever(config: GateConfig) -> Result<()> {
    let document = WebDocument::from_window()?;

    if !document.is_loading() {
        std::mem::forget(SelectionGate::bind(Rc::new(document), config));
        return Ok(());
    }

    tracing::debug!("document is loading, deferring the selection gate until DOMContentLoaded");
    let target = document.inner().clone();
    let ready = Closure::once_into_js(move || {
        std::mem::forget(SelectionGate::bind(Rc::new(document), config));
    });
    target
        .add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())
        .map_err(|err| GateError::Dom(format!("{err:?}")))
}

/// Read a JSON config embedded in the page, for example
/// `<script type="application/json" id="selection-gate">{"submit_match": "button"}</script>`.
pub fn config_from_element(id: &str) -> Result<GateConfig> {
    let document = WebDocument::from_window()?;
    let json = document
        .inner()
        .get_element_by_id(id)
        .and_then(|el| el.text_content())
        .ok_or_else(|| GateError::MissingConfigElement(id.to_string()))?;
    GateConfig::from_json(&json)
}

/// Route `tracing` events to the browser console.
#[cfg(feature = "logger")]
pub fn init_logging() {
    tracing_wasm::set_as_global_default();
}
