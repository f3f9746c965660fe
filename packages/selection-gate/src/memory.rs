//! An in-memory document.
//!
//! Holds a flat list of elements in document order along with their click listeners. It models just enough of a
//! browser for the gate: input `type`, `name`, `checked` and `disabled`, element ids, and click activation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::{ClickHandler, Document, GateError, InputKind, Result, SubmitMatch};

/// A handle to an element in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// One element of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub tag: String,
    pub id: Option<String>,
    /// The `type` attribute, for inputs and buttons.
    pub input_type: Option<String>,
    pub name: Option<String>,
    pub checked: bool,
    pub disabled: bool,
}

impl MemoryElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// An `<input>` of the given type.
    pub fn input(input_type: impl Into<String>) -> Self {
        Self::new("input").with_type(input_type)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The kind of input this is, if it is a checkbox or radio `<input>`.
    pub fn input_kind(&self) -> Option<InputKind> {
        if self.tag != "input" {
            return None;
        }
        self.input_type.as_deref().and_then(InputKind::from_type_attr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ListenerId(usize);

#[derive(Default)]
struct DomInner {
    elements: Vec<MemoryElement>,
    listeners: FxHashMap<NodeId, Vec<(ListenerId, ClickHandler)>>,
    next_listener: usize,
}

/// A page held entirely in memory.
///
/// Cloning is cheap and every clone refers to the same page.
#[derive(Clone, Default)]
pub struct MemoryDocument {
    inner: Rc<RefCell<DomInner>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from HTML markup.
    ///
    /// Every element in the markup is kept, flattened in document order. A boolean `checked` or `disabled`
    /// attribute sets the matching state.
    pub fn parse(html: &str) -> Result<Self> {
        let dom = html_parser::Dom::parse(html).map_err(|err| GateError::Markup(err.to_string()))?;
        let document = Self::new();
        for node in &dom.children {
            document.push_parsed(node);
        }
        Ok(document)
    }

    fn push_parsed(&self, node: &html_parser::Node) {
        let html_parser::Node::Element(el) = node else {
            return;
        };

        let mut element = MemoryElement::new(&el.name);
        element.id = el.id.clone();
        for (name, value) in &el.attributes {
            match name.to_ascii_lowercase().as_str() {
                "type" => element.input_type = value.clone(),
                "name" => element.name = value.clone(),
                "checked" => element.checked = true,
                "disabled" => element.disabled = true,
                _ => {}
            }
        }
        self.push(element);

        for child in &el.children {
            self.push_parsed(child);
        }
    }

    /// Append an element to the end of the document.
    pub fn push(&self, element: MemoryElement) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        inner.elements.push(element);
        NodeId(inner.elements.len() - 1)
    }

    pub fn push_checkbox(&self, name: impl Into<String>) -> NodeId {
        self.push(MemoryElement::input("checkbox").with_name(name))
    }

    pub fn push_radio(&self, name: impl Into<String>) -> NodeId {
        self.push(MemoryElement::input("radio").with_name(name))
    }

    /// Append a `<button type="submit">` with the given id.
    pub fn push_button(&self, id: impl Into<String>) -> NodeId {
        self.push(MemoryElement::new("button").with_type("submit").with_id(id))
    }

    /// Append an `<input type="submit">` with the given id.
    pub fn push_submit_input(&self, id: impl Into<String>) -> NodeId {
        self.push(MemoryElement::input("submit").with_id(id))
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot of the element.
    pub fn element(&self, node: NodeId) -> Option<MemoryElement> {
        self.inner.borrow().elements.get(node.0).cloned()
    }

    /// The first element carrying `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.inner
            .borrow()
            .elements
            .iter()
            .position(|el| el.id.as_deref() == Some(id))
            .map(NodeId)
    }

    pub fn checked(&self, node: NodeId) -> bool {
        self.with_element(node, |el| el.checked).unwrap_or(false)
    }

    pub fn disabled(&self, node: NodeId) -> bool {
        self.with_element(node, |el| el.disabled).unwrap_or(false)
    }

    /// Set the checked state without dispatching a click, like a page restored with prior answers.
    ///
    /// Checking a radio unchecks the other radios sharing its name.
    pub fn set_checked(&self, node: NodeId, checked: bool) {
        let mut inner = self.inner.borrow_mut();
        let Some(el) = inner.elements.get_mut(node.0) else {
            return;
        };
        el.checked = checked;
        if checked && el.input_kind() == Some(InputKind::Radio) {
            uncheck_radio_siblings(&mut inner.elements, node);
        }
    }

    /// Number of click listeners registered on `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(&node)
            .map_or(0, |listeners| listeners.len())
    }

    /// Number of click listeners registered anywhere in the document.
    pub fn total_listeners(&self) -> usize {
        self.inner.borrow().listeners.values().map(Vec::len).sum()
    }

    /// Simulate a user click on `node`.
    ///
    /// A checkbox toggles. A radio becomes checked and every other radio with the same non-empty `name` is
    /// unchecked; radios are grouped across the whole document. Click listeners then run in the order they were
    /// registered. Disabled elements receive no click at all.
    ///
    /// Returns whether the click was dispatched.
    pub fn click(&self, node: NodeId) -> bool {
        let handlers = {
            let mut inner = self.inner.borrow_mut();
            let Some(el) = inner.elements.get_mut(node.0) else {
                return false;
            };
            if el.disabled {
                return false;
            }

            match el.input_kind() {
                Some(InputKind::Checkbox) => el.checked = !el.checked,
                Some(InputKind::Radio) => {
                    el.checked = true;
                    uncheck_radio_siblings(&mut inner.elements, node);
                }
                None => {}
            }

            // handlers read the document, so the borrow must end before they run
            inner
                .listeners
                .get(&node)
                .map(|listeners| {
                    listeners
                        .iter()
                        .map(|(_, handler)| handler.clone())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        };

        for handler in handlers {
            handler();
        }

        true
    }

    fn with_element<T>(&self, node: NodeId, f: impl FnOnce(&MemoryElement) -> T) -> Option<T> {
        self.inner.borrow().elements.get(node.0).map(f)
    }
}

fn uncheck_radio_siblings(elements: &mut [MemoryElement], node: NodeId) {
    let Some(name) = elements[node.0].name.clone().filter(|name| !name.is_empty()) else {
        return;
    };
    for (idx, other) in elements.iter_mut().enumerate() {
        if idx != node.0
            && other.input_kind() == Some(InputKind::Radio)
            && other.name.as_deref() == Some(name.as_str())
        {
            other.checked = false;
        }
    }
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryDocument")
            .field("elements", &inner.elements)
            .field("listeners", &inner.listeners.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;
    type Listener = MemoryListener;

    fn query_inputs(&self, kind: InputKind) -> Vec<NodeId> {
        self.inner
            .borrow()
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.input_kind() == Some(kind))
            .map(|(idx, _)| NodeId(idx))
            .collect()
    }

    fn query_submit(&self, matcher: SubmitMatch, id: &str) -> Option<NodeId> {
        self.inner
            .borrow()
            .elements
            .iter()
            .position(|el| el.id.as_deref() == Some(id) && matcher.matches_tag(&el.tag))
            .map(NodeId)
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.checked(*node)
    }

    fn is_disabled(&self, node: &NodeId) -> bool {
        self.disabled(*node)
    }

    fn set_disabled(&self, node: &NodeId, disabled: bool) {
        if let Some(el) = self.inner.borrow_mut().elements.get_mut(node.0) {
            el.disabled = disabled;
        }
    }

    fn on_click(&self, node: &NodeId, handler: ClickHandler) -> MemoryListener {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.entry(*node).or_default().push((id, handler));
        MemoryListener {
            document: Rc::downgrade(&self.inner),
            node: *node,
            id,
        }
    }
}

/// A click listener registered on a [`MemoryDocument`]. Dropping it unregisters the listener.
pub struct MemoryListener {
    document: Weak<RefCell<DomInner>>,
    node: NodeId,
    id: ListenerId,
}

impl MemoryListener {
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        let Some(document) = self.document.upgrade() else {
            return;
        };
        // a listener dropped from inside a click handler finds the document borrowed
        let Ok(mut inner) = document.try_borrow_mut() else {
            tracing::warn!(node = ?self.node, "listener dropped while the document was busy, it stays registered");
            return;
        };
        if let Some(listeners) = inner.listeners.get_mut(&self.node) {
            listeners.retain(|(id, _)| *id != self.id);
            if listeners.is_empty() {
                inner.listeners.remove(&self.node);
            }
        }
    }
}
