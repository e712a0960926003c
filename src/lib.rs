//! # Scanflow
//!
//! Scanflow is the authoring core of an API security scanner. It keeps a
//! structured workflow definition (a named sequence of HTTP steps with
//! inter-step variable extraction) continuously in sync with a
//! human-editable YAML text form, and builds detection rules for
//! one-shot submission.
//!
//! ## Core Features
//!
//! - **Structural editing**: every operation clones the aggregate and
//!   swaps it in whole, so readers never observe a half-applied edit
//! - **Synchronized text form**: the YAML view is re-derived and pushed
//!   to the host after every change; parsing happens only at load time
//! - **Round-trip safety**: serializing a definition and parsing it back
//!   yields the same definition; malformed text never corrupts the model
//! - **Detection rule builder**: match predicate plus severity metadata,
//!   validated and handed off whole on save
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scanflow::{ActionType, StepPatch, WorkflowEditorBuilder};
//!
//! let mut editor = WorkflowEditorBuilder::new()
//!     .on_change(|text| println!("{text}"))
//!     .build();
//!
//! editor.add_step(ActionType::HttpRequest);
//! editor.update_step(0, StepPatch::Path("/api/login".to_string()));
//! editor.add_extraction(0);
//! ```

mod builder;
mod editor;
mod error;
mod model;
mod sync;
mod template;

pub use builder::WorkflowEditorBuilder;
pub use editor::{ChangeHandler, ExtractionPatch, RuleBuilder, SaveHandler, StepPatch, WorkflowEditor};
pub use error::ScanflowError;
pub use model::*;
pub use sync::{from_file, from_text, to_text};
pub use template::{placeholders, placeholders_in_value, substitute};

/// Result type alias for Scanflow operations.
pub type Result<T> = std::result::Result<T, ScanflowError>;
