use std::rc::{Rc, Weak};

use crate::{ClickHandler, Document, Evaluation, GateConfig, InputKind};

/// What caused the gate to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSource {
    /// A member of this group was clicked, or [`GateBinding::evaluate`] was called for it.
    Click(InputKind),
    /// The gate synced with the page's existing state, either at bind time or through [`GateBinding::sync`].
    Sync,
}

/// The outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateState {
    pub source: GateSource,
    /// At least one consulted input is checked.
    pub has_selection: bool,
    /// Whether a submit control was found to write to. When false the evaluation changed nothing on the page.
    pub submit_found: bool,
}

impl GateState {
    /// The value written to the submit control's `disabled` attribute.
    pub fn disabled(&self) -> bool {
        !self.has_selection
    }
}

/// Binds click listeners that keep a submit control disabled until something is selected.
pub struct SelectionGate;

impl SelectionGate {
    /// Bind the gate to every checkbox and radio input currently in `document`.
    ///
    /// Inputs added to the document later are not watched. If no submit control matches the config the listeners are
    /// still bound but their writes go nowhere, and if there are no inputs at all nothing is bound.
    ///
    /// The returned binding owns the listeners: dropping it (or calling [`GateBinding::dispose`]) unbinds them.
    pub fn bind<D: Document + 'static>(document: Rc<D>, config: GateConfig) -> GateBinding<D> {
        let checkboxes = document.query_inputs(InputKind::Checkbox);
        let radios = document.query_inputs(InputKind::Radio);
        let submit = document.query_submit(config.submit_match, &config.submit_id);

        tracing::debug!(
            checkboxes = checkboxes.len(),
            radios = radios.len(),
            submit_found = submit.is_some(),
            submit_id = %config.submit_id,
            "binding selection gate"
        );
        if submit.is_none() {
            tracing::debug!(
                "no {:?} element with id `{}`, gate writes will be ignored",
                config.submit_match,
                config.submit_id
            );
        }

        let sync = config.sync_on_bind;
        let inner = Rc::new(GateInner {
            checkboxes,
            radios,
            submit,
            config,
        });

        let weak_document = Rc::downgrade(&document);
        let mut listeners = Vec::with_capacity(inner.checkboxes.len() + inner.radios.len());
        for kind in InputKind::ALL {
            for node in inner.group(kind) {
                let handler = click_handler(kind, &inner, &weak_document);
                listeners.push(document.on_click(node, handler));
            }
        }

        let binding = GateBinding {
            document,
            inner,
            listeners,
        };

        // a page with nothing to select is never gated
        if sync && !binding.is_inert() {
            binding.sync();
        }

        binding
    }
}

fn click_handler<D: Document + 'static>(
    kind: InputKind,
    inner: &Rc<GateInner<D>>,
    document: &Weak<D>,
) -> ClickHandler {
    let inner = inner.clone();
    let document = document.clone();
    Rc::new(move || {
        // a forgotten binding can leave this handler registered after the document is gone
        if let Some(document) = document.upgrade() {
            inner.apply(&*document, GateSource::Click(kind));
        }
    })
}

struct GateInner<D: Document> {
    checkboxes: Vec<D::Node>,
    radios: Vec<D::Node>,
    submit: Option<D::Node>,
    config: GateConfig,
}

impl<D: Document> GateInner<D> {
    fn group(&self, kind: InputKind) -> &[D::Node] {
        match kind {
            InputKind::Checkbox => &self.checkboxes,
            InputKind::Radio => &self.radios,
        }
    }

    fn has_selection(&self, document: &D, kind: InputKind) -> bool {
        self.group(kind).iter().any(|node| document.is_checked(node))
    }

    fn apply(&self, document: &D, source: GateSource) -> GateState {
        let has_selection = match (source, self.config.evaluation) {
            (GateSource::Click(kind), Evaluation::PerGroup) => self.has_selection(document, kind),
            _ => InputKind::ALL
                .into_iter()
                .any(|kind| self.has_selection(document, kind)),
        };

        if let Some(submit) = &self.submit {
            document.set_disabled(submit, !has_selection);
        }

        let state = GateState {
            source,
            has_selection,
            submit_found: self.submit.is_some(),
        };

        tracing::trace!(?state, "selection gate evaluated");

        if let Some(observer) = &self.config.observer {
            observer(&state);
        }

        state
    }
}

/// A live gate. Listeners stay registered until this is dropped.
#[must_use = "dropping the binding unbinds the gate immediately"]
pub struct GateBinding<D: Document> {
    document: Rc<D>,
    inner: Rc<GateInner<D>>,
    listeners: Vec<D::Listener>,
}

impl<D: Document> GateBinding<D> {
    /// Run the click rule for `kind` as if one of its members had just been clicked.
    pub fn evaluate(&self, kind: InputKind) -> GateState {
        self.inner.apply(&*self.document, GateSource::Click(kind))
    }

    /// Write the submit control's state from both groups.
    pub fn sync(&self) -> GateState {
        self.inner.apply(&*self.document, GateSource::Sync)
    }

    /// Number of checkboxes watched by this gate.
    pub fn checkbox_count(&self) -> usize {
        self.inner.checkboxes.len()
    }

    /// Number of radio inputs watched by this gate.
    pub fn radio_count(&self) -> usize {
        self.inner.radios.len()
    }

    /// Number of click listeners this binding holds.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_submit_control(&self) -> bool {
        self.inner.submit.is_some()
    }

    /// True when the page had no checkbox or radio inputs to bind to.
    pub fn is_inert(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn config(&self) -> &GateConfig {
        &self.inner.config
    }

    pub fn document(&self) -> &Rc<D> {
        &self.document
    }

    /// Unbind every listener.
    pub fn dispose(self) {
        drop(self)
    }
}

impl<D: Document> Drop for GateBinding<D> {
    fn drop(&mut self) {
        tracing::debug!(listeners = self.listeners.len(), "unbinding selection gate");
        self.listeners.clear();
    }
}
