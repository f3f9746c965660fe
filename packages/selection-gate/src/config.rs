use std::rc::Rc;

use serde::Deserialize;

use crate::{GateState, Result};

/// The id the answer forms give their submit control.
pub const DEFAULT_SUBMIT_ID: &str = "SubmitAnswer";

/// A hook invoked with every state the gate computes.
pub type GateObserver = Rc<dyn Fn(&GateState)>;

/// Which element type may carry the submit control's id.
///
/// Pages exist that render the control as `<button id="SubmitAnswer">` and others that render it as
/// `<input type="submit" id="SubmitAnswer">`. There is no default: whoever assembles the page decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitMatch {
    /// Only a `button` element.
    Button,
    /// Only an `input` element.
    Input,
    /// Either a `button` or an `input` element.
    Any,
}

impl SubmitMatch {
    /// Whether an element with tag name `tag` may be the submit control.
    pub fn matches_tag(&self, tag: &str) -> bool {
        let is_button = tag.eq_ignore_ascii_case("button");
        let is_input = tag.eq_ignore_ascii_case("input");
        match self {
            SubmitMatch::Button => is_button,
            SubmitMatch::Input => is_input,
            SubmitMatch::Any => is_button || is_input,
        }
    }

    /// A CSS selector for the submit control carrying `id`.
    ///
    /// The id is matched through an attribute selector so ids that are not valid CSS identifiers still work.
    pub fn css_selector(&self, id: &str) -> String {
        let id = id.replace('\\', "\\\\").replace('\'', "\\'");
        match self {
            SubmitMatch::Button => format!("button[id='{id}']"),
            SubmitMatch::Input => format!("input[id='{id}']"),
            SubmitMatch::Any => format!("button[id='{id}'], input[id='{id}']"),
        }
    }
}

/// How a click is turned into the submit control's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// Only the group of the clicked input is consulted. A radio click ignores the checkboxes and vice versa.
    #[default]
    PerGroup,
    /// Both groups are consulted on every click.
    Combined,
}

/// Configuration for a [`crate::SelectionGate`].
///
/// # Example
///
/// ```rust
/// use selection_gate::{Evaluation, GateConfig, SubmitMatch};
///
/// let cfg = GateConfig::new(SubmitMatch::Input)
///     .submit_id("Next")
///     .evaluation(Evaluation::Combined)
///     .sync_on_bind(true);
/// assert_eq!(cfg.submit_id_str(), "Next");
/// ```
#[derive(Clone, Deserialize)]
pub struct GateConfig {
    #[serde(default = "default_submit_id")]
    pub(crate) submit_id: String,
    pub(crate) submit_match: SubmitMatch,
    #[serde(default)]
    pub(crate) evaluation: Evaluation,
    #[serde(default)]
    pub(crate) sync_on_bind: bool,
    #[serde(skip)]
    pub(crate) observer: Option<GateObserver>,
}

fn default_submit_id() -> String {
    DEFAULT_SUBMIT_ID.to_string()
}

impl GateConfig {
    /// Create a config that gates the control with id `SubmitAnswer`, matched as `submit_match`.
    pub fn new(submit_match: SubmitMatch) -> Self {
        Self {
            submit_id: default_submit_id(),
            submit_match,
            evaluation: Evaluation::default(),
            sync_on_bind: false,
            observer: None,
        }
    }

    /// Read a config from JSON.
    ///
    /// `submit_match` is required, every other field falls back to its default.
    ///
    /// ```rust
    /// use selection_gate::{GateConfig, SubmitMatch};
    ///
    /// let cfg = GateConfig::from_json(r#"{ "submit_match": "button" }"#).unwrap();
    /// assert_eq!(cfg.submit_match_kind(), SubmitMatch::Button);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the id of the submit control.
    pub fn submit_id(mut self, id: impl Into<String>) -> Self {
        self.submit_id = id.into();
        self
    }

    /// Set which element type may carry the submit control's id.
    pub fn submit_match(mut self, submit_match: SubmitMatch) -> Self {
        self.submit_match = submit_match;
        self
    }

    /// Set how clicks are evaluated.
    pub fn evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Evaluate both groups once when the gate is bound.
    ///
    /// Off by default: until the first click the submit control keeps whatever state the markup declared.
    /// A page without checkbox or radio inputs is left alone either way.
    pub fn sync_on_bind(mut self, sync: bool) -> Self {
        self.sync_on_bind = sync;
        self
    }

    /// Call `f` with every state the gate computes.
    pub fn on_evaluate(mut self, f: impl Fn(&GateState) + 'static) -> Self {
        self.observer = Some(Rc::new(f));
        self
    }

    pub fn submit_id_str(&self) -> &str {
        &self.submit_id
    }

    pub fn submit_match_kind(&self) -> SubmitMatch {
        self.submit_match
    }

    pub fn evaluation_mode(&self) -> Evaluation {
        self.evaluation
    }

    pub fn syncs_on_bind(&self) -> bool {
        self.sync_on_bind
    }
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("submit_id", &self.submit_id)
            .field("submit_match", &self.submit_match)
            .field("evaluation", &self.evaluation)
            .field("sync_on_bind", &self.sync_on_bind)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
