//! Public "send us a message" form on the Contact section.
//!
//! Unlike the admin forms this one is drawn inline and keeps its text when
//! focus leaves it; it is only cleared after a successful send.

use super::form_frame;
use super::widget_traits::{FieldNavigable, Saveable, TextEditable};
use crate::data::ContactSubmission;
use crate::theme::AppTheme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget as RatatuiWidget},
};
use tui_textarea::TextArea;

const FIELD_COUNT: usize = 4;
const MESSAGE_FIELD: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFormResult {
    Submit(ContactSubmission),
    /// Leave the form, keeping what was typed
    Cancel,
}

pub struct ContactFormWidget {
    focused_field: usize,
    name: TextArea<'static>,
    email: TextArea<'static>,
    phone: TextArea<'static>,
    message: TextArea<'static>,
    error: Option<String>,
}

impl Default for ContactFormWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactFormWidget {
    pub fn new() -> Self {
        let mut name = TextArea::default();
        name.set_placeholder_text("Your name");
        let mut email = TextArea::default();
        email.set_placeholder_text("you@example.com");
        let mut phone = TextArea::default();
        phone.set_placeholder_text("Phone number");
        let mut message = TextArea::default();
        message.set_placeholder_text("Tell us about your project");

        Self {
            focused_field: 0,
            name,
            email,
            phone,
            message,
            error: None,
        }
    }

    /// Reset after a successful send
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn input(&mut self, key: KeyEvent) -> Option<ContactFormResult> {
        match key.code {
            KeyCode::Esc => return Some(ContactFormResult::Cancel),
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.select_all();
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.try_save();
            }
            KeyCode::Tab => FieldNavigable::next_field(self),
            KeyCode::BackTab => FieldNavigable::previous_field(self),
            KeyCode::Enter if self.focused_field != MESSAGE_FIELD => {
                FieldNavigable::next_field(self);
            }
            _ => {
                if let Some(field) = self.get_focused_field_mut() {
                    field.input(key);
                }
            }
        }
        None
    }

    /// Draw the form into `area`; `active` when it has keyboard focus
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &AppTheme, active: bool, sending: bool) {
        let border_color = if active {
            theme.window_border_focused
        } else {
            theme.window_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Send us a Message ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 4 || inner.width < form_frame::LABEL_WIDTH + 4 {
            return;
        }

        let x = inner.x + 1;
        let width = inner.width.saturating_sub(2);
        let focused = active.then_some(self.focused_field);
        let mut y = inner.y;

        for (index, label) in ["Name *", "Email *", "Phone *"].into_iter().enumerate() {
            let textarea = match index {
                0 => &mut self.name,
                1 => &mut self.email,
                _ => &mut self.phone,
            };
            form_frame::render_text_field(focused == Some(index), label, textarea, x, y, width, 1, buf, theme);
            y += 2;
        }

        let bottom = inner.y + inner.height;
        let message_height = bottom.saturating_sub(y + 3).max(1);
        form_frame::render_text_field(
            focused == Some(MESSAGE_FIELD),
            "Message *",
            &mut self.message,
            x,
            y,
            width,
            message_height,
            buf,
            theme,
        );
        y += message_height + 1;

        if y < bottom {
            form_frame::render_error(self.error.as_deref(), x, y, width, buf, theme);
        }
        if y + 1 < bottom {
            let hints = if sending {
                "Sending..."
            } else if active {
                "Ctrl+S:Send Message  Tab:Next  Esc:Leave form"
            } else {
                "Enter:Fill in the form"
            };
            buf.set_string(x, y + 1, hints, Style::default().fg(theme.text_secondary));
        }
    }
}

impl TextEditable for ContactFormWidget {
    fn get_focused_field(&self) -> Option<&TextArea<'static>> {
        match self.focused_field {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.phone),
            3 => Some(&self.message),
            _ => None,
        }
    }

    fn get_focused_field_mut(&mut self) -> Option<&mut TextArea<'static>> {
        match self.focused_field {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.phone),
            3 => Some(&mut self.message),
            _ => None,
        }
    }
}

impl FieldNavigable for ContactFormWidget {
    fn next_field(&mut self) {
        self.focused_field = (self.focused_field + 1) % FIELD_COUNT;
    }

    fn previous_field(&mut self) {
        self.focused_field = (self.focused_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    fn field_count(&self) -> usize {
        FIELD_COUNT
    }

    fn current_field(&self) -> usize {
        self.focused_field
    }
}

impl Saveable for ContactFormWidget {
    type SaveResult = ContactFormResult;

    /// Validation happens in the core so the rules live next to the payload
    fn try_save(&mut self) -> Option<Self::SaveResult> {
        self.error = None;
        Some(ContactFormResult::Submit(ContactSubmission {
            name: form_frame::field_text(&self.name),
            email: form_frame::field_text(&self.email),
            phone: form_frame::field_text(&self.phone),
            message: form_frame::field_text(&self.message),
        }))
    }

    fn is_modified(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.message]
            .iter()
            .any(|field| !form_frame::field_text(field).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut ContactFormWidget, text: &str) {
        for c in text.chars() {
            form.input(key(KeyCode::Char(c)));
        }
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_fill_and_submit() {
        let mut form = ContactFormWidget::new();
        type_text(&mut form, "Asha");
        form.input(key(KeyCode::Enter));
        type_text(&mut form, "asha@example.com");
        form.input(key(KeyCode::Tab));
        type_text(&mut form, "98765");
        form.input(key(KeyCode::Enter));
        type_text(&mut form, "MRI room");
        form.input(key(KeyCode::Enter));
        type_text(&mut form, "next month");

        assert_eq!(
            form.input(ctrl_s()),
            Some(ContactFormResult::Submit(ContactSubmission {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                phone: "98765".into(),
                message: "MRI room\nnext month".into(),
            }))
        );
    }

    #[test]
    fn test_escape_keeps_text() {
        let mut form = ContactFormWidget::new();
        type_text(&mut form, "Asha");
        assert_eq!(form.input(key(KeyCode::Esc)), Some(ContactFormResult::Cancel));
        assert!(form.is_modified());
    }

    #[test]
    fn test_clear_resets_fields_and_error() {
        let mut form = ContactFormWidget::new();
        type_text(&mut form, "Asha");
        form.set_error("Please enter a valid email address");
        form.clear();
        assert!(!form.is_modified());
        assert_eq!(form.error(), None);
        assert_eq!(form.current_field(), 0);
    }

    #[test]
    fn test_back_tab_wraps() {
        let mut form = ContactFormWidget::new();
        form.input(key(KeyCode::BackTab));
        assert_eq!(form.current_field(), MESSAGE_FIELD);
    }
}
