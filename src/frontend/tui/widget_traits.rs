//! Behavior traits for form widgets
//!
//! These traits define common behaviors the forms implement, so the
//! frontend can paste, copy and save without knowing which form is open.

use anyhow::Result;
use tui_textarea::TextArea;

/// Trait for widgets with text input fields
pub trait TextEditable {
    /// Get reference to the currently focused text field
    fn get_focused_field(&self) -> Option<&TextArea<'static>>;

    /// Get mutable reference to the currently focused text field
    fn get_focused_field_mut(&mut self) -> Option<&mut TextArea<'static>>;

    /// Select all text in the focused field (Ctrl+A)
    fn select_all(&mut self) {
        if let Some(field) = self.get_focused_field_mut() {
            field.select_all();
        }
    }

    /// Copy selected text to clipboard
    fn copy_to_clipboard(&self) -> Result<()> {
        if let Some(field) = self.get_focused_field() {
            let selected = field.yank_text();
            if !selected.is_empty() {
                crate::clipboard::copy(&selected)?;
            }
        }
        Ok(())
    }

    /// Insert pasted text at the cursor of the focused field
    fn paste_text(&mut self, text: &str) {
        if let Some(field) = self.get_focused_field_mut() {
            field.insert_str(text);
        }
    }
}

/// Trait for widgets with enum fields that can be cycled
pub trait Cyclable {
    /// Cycle to next value (Right arrow or Space)
    fn cycle_forward(&mut self);

    /// Cycle to previous value (Left arrow)
    fn cycle_backward(&mut self);
}

/// Trait for widgets that support field navigation (forms)
pub trait FieldNavigable {
    /// Move to next field (Tab)
    fn next_field(&mut self);

    /// Move to previous field (Shift+Tab)
    fn previous_field(&mut self);

    /// Get the number of fields
    fn field_count(&self) -> usize;

    /// Get the current field index
    fn current_field(&self) -> usize;
}

/// Trait for widgets that can be saved (forms)
/// Uses associated type to allow each form to return its own rich result type
pub trait Saveable {
    /// The result type returned by try_save
    type SaveResult;

    /// Collect the current field values into a result
    /// Returns None if there is nothing sensible to submit
    fn try_save(&mut self) -> Option<Self::SaveResult>;

    /// Check if the widget has been modified
    fn is_modified(&self) -> bool {
        true // Default: always consider modified
    }
}
