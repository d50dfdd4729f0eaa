//! Admin sign-in popup.

use super::form_frame;
use super::widget_traits::{FieldNavigable, Saveable, TextEditable};
use crate::theme::AppTheme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect};
use tui_textarea::TextArea;

const FIELD_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFormResult {
    Submit { username: String, password: String },
    Cancel,
}

pub struct LoginFormWidget {
    focused_field: usize,
    username: TextArea<'static>,
    password: TextArea<'static>,
    error: Option<String>,
}

impl Default for LoginFormWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFormWidget {
    pub fn new() -> Self {
        let mut username = TextArea::default();
        username.set_placeholder_text("admin");

        let mut password = TextArea::default();
        password.set_mask_char('•');

        Self {
            focused_field: 0,
            username,
            password,
            error: None,
        }
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn input(&mut self, key: KeyEvent) -> Option<LoginFormResult> {
        match key.code {
            KeyCode::Esc => return Some(LoginFormResult::Cancel),
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.select_all();
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.try_save();
            }
            KeyCode::Tab | KeyCode::Down => FieldNavigable::next_field(self),
            KeyCode::BackTab | KeyCode::Up => FieldNavigable::previous_field(self),
            KeyCode::Enter => {
                // Enter on the password submits, like the browser form
                if self.focused_field == FIELD_COUNT - 1 {
                    return self.try_save();
                }
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

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        let popup = form_frame::centered_popup(area, 46, 9);
        form_frame::draw_frame(popup, buf, " Admin Login ", theme);

        let x = popup.x + 2;
        let width = popup.width.saturating_sub(4);
        let focused = self.focused_field;

        form_frame::render_text_field(
            focused == 0,
            "Username:",
            &mut self.username,
            x,
            popup.y + 2,
            width,
            1,
            buf,
            theme,
        );
        form_frame::render_text_field(
            focused == 1,
            "Password:",
            &mut self.password,
            x,
            popup.y + 3,
            width,
            1,
            buf,
            theme,
        );

        form_frame::render_error(self.error.as_deref(), x, popup.y + 5, width, buf, theme);
        form_frame::render_hints("Enter:Login  Tab:Next  Esc:Close", x, popup.y + 7, width, buf, theme);
    }
}

impl TextEditable for LoginFormWidget {
    fn get_focused_field(&self) -> Option<&TextArea<'static>> {
        match self.focused_field {
            0 => Some(&self.username),
            1 => Some(&self.password),
            _ => None,
        }
    }

    fn get_focused_field_mut(&mut self) -> Option<&mut TextArea<'static>> {
        match self.focused_field {
            0 => Some(&mut self.username),
            1 => Some(&mut self.password),
            _ => None,
        }
    }

    // Never put the password on the clipboard
    fn copy_to_clipboard(&self) -> anyhow::Result<()> {
        if self.focused_field == 0 {
            let selected = self.username.yank_text();
            if !selected.is_empty() {
                crate::clipboard::copy(&selected)?;
            }
        }
        Ok(())
    }
}

impl FieldNavigable for LoginFormWidget {
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

impl Saveable for LoginFormWidget {
    type SaveResult = LoginFormResult;

    fn try_save(&mut self) -> Option<Self::SaveResult> {
        self.error = None;
        Some(LoginFormResult::Submit {
            username: form_frame::field_text(&self.username).trim().to_string(),
            password: form_frame::field_text(&self.password),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut LoginFormWidget, text: &str) {
        for c in text.chars() {
            form.input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_moves_then_submits() {
        let mut form = LoginFormWidget::new();
        type_text(&mut form, "admin");
        assert_eq!(form.input(key(KeyCode::Enter)), None);
        assert_eq!(form.current_field(), 1);

        type_text(&mut form, "s3cret");
        assert_eq!(
            form.input(key(KeyCode::Enter)),
            Some(LoginFormResult::Submit {
                username: "admin".into(),
                password: "s3cret".into()
            })
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = LoginFormWidget::new();
        assert_eq!(form.input(key(KeyCode::Esc)), Some(LoginFormResult::Cancel));
    }

    #[test]
    fn test_submit_clears_error() {
        let mut form = LoginFormWidget::new();
        form.set_error("Invalid credentials");
        assert_eq!(form.error(), Some("Invalid credentials"));
        form.input(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut form = LoginFormWidget::new();
        form.paste_text("editor");
        form.next_field();
        form.paste_text("pw");
        assert_eq!(
            form.try_save(),
            Some(LoginFormResult::Submit {
                username: "editor".into(),
                password: "pw".into()
            })
        );
    }
}
