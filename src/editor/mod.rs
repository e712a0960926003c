mod rule;
mod workflow;

pub use rule::{RuleBuilder, SaveHandler};
pub use workflow::{ChangeHandler, ExtractionPatch, StepPatch, WorkflowEditor};
