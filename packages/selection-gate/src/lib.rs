//! Selection Gate
//!
//! ## Overview
//! ------------
//! A small affordance for answer forms: the submit control stays disabled until the user has checked at least one
//! checkbox or radio input. Every checkbox and every radio present when the gate is bound gets a click listener, and
//! each click rewrites the submit control's `disabled` attribute from the checked state of the clicked input's group.
//!
//! The gate never touches a real browser directly. It talks to anything implementing [`Document`]:
//! - [`MemoryDocument`] is an in-memory page used for tests and headless tooling
//! - `selection-gate-web` implements [`Document`] over `web-sys`
//!
//! ```rust
//! use selection_gate::{Document, GateConfig, InputKind, MemoryDocument, SelectionGate, SubmitMatch};
//! use std::rc::Rc;
//!
//! let page = Rc::new(MemoryDocument::parse(r#"
//!     <input name="UserAnswer" type="checkbox" value="a" />
//!     <input name="UserAnswer" type="checkbox" value="b" />
//!     <button type="submit" id="SubmitAnswer" disabled>Submit!</button>
//! "#).unwrap());
//!
//! let gate = SelectionGate::bind(page.clone(), GateConfig::new(SubmitMatch::Button));
//! let first = page.query_inputs(InputKind::Checkbox)[0];
//! let submit = page.find_by_id("SubmitAnswer").unwrap();
//!
//! page.click(first);
//! assert!(!page.disabled(submit));
//!
//! gate.dispose();
//! ```

mod config;
mod document;
mod error;
mod gate;
mod memory;

pub use config::{Evaluation, GateConfig, GateObserver, SubmitMatch, DEFAULT_SUBMIT_ID};
pub use document::{ClickHandler, Document, InputKind};
pub use error::{GateError, Result};
pub use gate::{GateBinding, GateSource, GateState, SelectionGate};
pub use memory::{MemoryDocument, MemoryElement, MemoryListener, NodeId};
