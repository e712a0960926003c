use tracing::error;

use crate::editor::{ChangeHandler, WorkflowEditor};

/// Builder wiring a [`WorkflowEditor`] to its host.
///
/// The initial text, when present, is parsed exactly once here; text the
/// editor publishes later is never fed back through the parser.
pub struct WorkflowEditorBuilder {
    initial_text: Option<String>,
    on_change: Option<ChangeHandler>,
}

impl Default for WorkflowEditorBuilder {
    fn default() -> Self {
        Self {
            initial_text: None,
            on_change: None,
        }
    }
}

impl WorkflowEditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial textual payload supplied by the host.
    pub fn initial_text(
        mut self,
        text: impl Into<String>,
    ) -> Self {
        self.initial_text = Some(text.into());
        self
    }

    /// Change handler receiving the serialized text after every edit.
    pub fn on_change(
        mut self,
        handler: impl FnMut(&str) + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Build the editor.
    ///
    /// An empty or absent initial text yields the default empty
    /// workflow; a malformed one is logged and the default kept, so the
    /// editor always comes up usable.
    pub fn build(self) -> WorkflowEditor {
        let mut editor = WorkflowEditor::new();

        if let Some(text) = self.initial_text.as_deref() {
            if !text.trim().is_empty() {
                if let Err(e) = editor.load_text(text) {
                    error!("failed to parse initial workflow text: {}", e);
                }
            }
        }

        if let Some(handler) = self.on_change {
            editor.set_change_handler(handler);
        }

        editor
    }
}
