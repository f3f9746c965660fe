use std::rc::Rc;

use crate::SubmitMatch;

/// A callback run when a bound input is clicked.
pub type ClickHandler = Rc<dyn Fn()>;

/// The two input types the gate watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Checkbox,
    Radio,
}

impl InputKind {
    /// Both kinds, in the order the gate binds them.
    pub const ALL: [InputKind; 2] = [InputKind::Checkbox, InputKind::Radio];

    /// The value of the `type` attribute for this kind of input.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Checkbox => "checkbox",
            InputKind::Radio => "radio",
        }
    }

    /// Match an input's `type` attribute. HTML attribute values for `type` are case-insensitive.
    pub fn from_type_attr(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| value.eq_ignore_ascii_case(kind.as_str()))
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The page the gate is bound to.
///
/// Implementations only need to answer the handful of queries the gate makes and register click listeners. Every
/// method is infallible from the gate's point of view: a query that fails returns nothing, a write that fails is
/// dropped. This keeps a broken page from ever surfacing an error to the user filling out the form.
pub trait Document {
    /// A handle to an element in the document.
    type Node: Clone + 'static;

    /// Returned by [`Document::on_click`]. Dropping it must unregister the listener.
    type Listener;

    /// All `input` elements whose `type` is `kind`, in document order.
    fn query_inputs(&self, kind: InputKind) -> Vec<Self::Node>;

    /// The submit control with the given id, if an element of the matching type carries it.
    fn query_submit(&self, matcher: SubmitMatch, id: &str) -> Option<Self::Node>;

    /// Whether the element is a checked input.
    fn is_checked(&self, node: &Self::Node) -> bool;

    /// Whether the element carries the `disabled` attribute.
    fn is_disabled(&self, node: &Self::Node) -> bool;

    /// Add or remove the `disabled` attribute.
    fn set_disabled(&self, node: &Self::Node, disabled: bool);

    /// Run `handler` every time the element is clicked, until the returned listener is dropped.
    fn on_click(&self, node: &Self::Node, handler: ClickHandler) -> Self::Listener;
}
