use selection_gate::{ClickHandler, Document, GateError, InputKind, Result, SubmitMatch};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement};

/// The browser's document.
#[derive(Clone, Debug)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window.
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or(GateError::NoWindow)?;
        let document = window.document().ok_or(GateError::NoDocument)?;
        Ok(Self::new(document))
    }

    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }

    /// Whether the page is still parsing. Binding before it finishes misses inputs that come later in the markup.
    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }
}

impl Document for WebDocument {
    type Node = Element;
    type Listener = WebListener;

    fn query_inputs(&self, kind: InputKind) -> Vec<Element> {
        let selector = format!("input[type='{kind}']");
        let list = match self.document.query_selector_all(&selector) {
            Ok(list) => list,
            Err(err) => {
                tracing::debug!("querySelectorAll({selector}) failed: {err:?}");
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|idx| list.item(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_submit(&self, matcher: SubmitMatch, id: &str) -> Option<Element> {
        let selector = matcher.css_selector(id);
        self.document
            .query_selector(&selector)
            .map_err(|err| tracing::debug!("querySelector({selector}) failed: {err:?}"))
            .ok()
            .flatten()
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .is_some_and(|input| input.checked())
    }

    fn is_disabled(&self, node: &Element) -> bool {
        node.has_attribute("disabled")
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        let result = if disabled {
            node.set_attribute("disabled", "disabled")
        } else {
            node.remove_attribute("disabled")
        };
        if let Err(err) = result {
            tracing::debug!("failed to update the disabled attribute: {err:?}");
        }
    }

    fn on_click(&self, node: &Element, handler: ClickHandler) -> WebListener {
        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| handler());
        if let Err(err) =
            node.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            tracing::debug!("failed to add click listener: {err:?}");
        }
        WebListener {
            target: node.clone(),
            closure,
        }
    }
}

/// A click listener on a browser element. Dropping it removes the listener and frees the closure.
pub struct WebListener {
    target: Element,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for WebListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback("click", self.closure.as_ref().unchecked_ref())
        {
            tracing::debug!("failed to remove click listener: {err:?}");
        }
    }
}
