//! Reply popup for a contact message.

use super::form_frame;
use super::widget_traits::{Saveable, TextEditable};
use crate::theme::AppTheme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use tui_textarea::TextArea;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseFormResult {
    Send { message_id: String, response: String },
    Cancel,
}

pub struct ResponseFormWidget {
    message_id: String,
    recipient: String,
    response: TextArea<'static>,
    error: Option<String>,
}

impl ResponseFormWidget {
    pub fn new(message_id: impl Into<String>, recipient: impl Into<String>) -> Self {
        let mut response = TextArea::default();
        response.set_placeholder_text("Type your response...");
        Self {
            message_id: message_id.into(),
            recipient: recipient.into(),
            response,
            error: None,
        }
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn input(&mut self, key: KeyEvent) -> Option<ResponseFormResult> {
        match key.code {
            KeyCode::Esc => return Some(ResponseFormResult::Cancel),
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.select_all();
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.try_save();
            }
            _ => {
                self.response.input(key);
            }
        }
        None
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        let popup = form_frame::centered_popup(area, 64, 14);
        form_frame::draw_frame(popup, buf, " Respond to Message ", theme);

        let x = popup.x + 2;
        let width = popup.width.saturating_sub(4);

        let to: String = format!("To: {}", self.recipient)
            .chars()
            .take(width as usize)
            .collect();
        buf.set_string(
            x,
            popup.y + 2,
            to,
            Style::default().fg(theme.text_primary).bg(theme.menu_background),
        );

        form_frame::render_text_field(true, "Response", &mut self.response, x, popup.y + 4, width, 5, buf, theme);
        form_frame::render_error(self.error.as_deref(), x, popup.y + 10, width, buf, theme);
        form_frame::render_hints("Ctrl+S:Send Response  Esc:Cancel", x, popup.y + 12, width, buf, theme);
    }
}

impl TextEditable for ResponseFormWidget {
    fn get_focused_field(&self) -> Option<&TextArea<'static>> {
        Some(&self.response)
    }

    fn get_focused_field_mut(&mut self) -> Option<&mut TextArea<'static>> {
        Some(&mut self.response)
    }
}

impl Saveable for ResponseFormWidget {
    type SaveResult = ResponseFormResult;

    fn try_save(&mut self) -> Option<Self::SaveResult> {
        self.error = None;
        Some(ResponseFormResult::Send {
            message_id: self.message_id.clone(),
            response: form_frame::field_text(&self.response),
        })
    }
}
