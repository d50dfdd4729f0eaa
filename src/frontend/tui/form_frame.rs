//! Drawing helpers shared by the popup forms.
//!
//! Forms draw their own frame straight into the buffer and lay fields out
//! one per row: a fixed-width label, then the text area.

use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget as RatatuiWidget},
};
use tui_textarea::TextArea;

/// Width reserved for field labels
pub const LABEL_WIDTH: u16 = 13;

/// Centered popup rectangle clipped to `area`
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Clear the popup area and draw its border and title
pub fn draw_frame(popup: Rect, buf: &mut Buffer, title: &str, theme: &AppTheme) {
    if popup.width < 2 || popup.height < 2 {
        return;
    }
    Clear.render(popup, buf);

    for row in popup.y..popup.y + popup.height {
        for col in popup.x..popup.x + popup.width {
            buf.set_string(col, row, " ", Style::default().bg(theme.menu_background));
        }
    }

    let border_style = Style::default().fg(theme.form_border).bg(theme.menu_background);
    let inner_width = popup.width as usize - 2;

    let top = format!("┌{}┐", "─".repeat(inner_width));
    buf.set_string(popup.x, popup.y, &top, border_style);
    buf.set_string(
        popup.x + 2,
        popup.y,
        title,
        border_style.fg(theme.window_title).add_modifier(Modifier::BOLD),
    );

    for i in 1..popup.height - 1 {
        buf.set_string(popup.x, popup.y + i, "│", border_style);
        buf.set_string(popup.x + popup.width - 1, popup.y + i, "│", border_style);
    }

    let bottom = format!("└{}┘", "─".repeat(inner_width));
    buf.set_string(popup.x, popup.y + popup.height - 1, &bottom, border_style);
}

/// Label plus text area. `height` > 1 gives a multi-line field.
#[allow(clippy::too_many_arguments)]
pub fn render_text_field(
    focused: bool,
    label: &str,
    textarea: &mut TextArea<'static>,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    buf: &mut Buffer,
    theme: &AppTheme,
) {
    render_label(focused, label, x, y, buf, theme);

    let base_style = Style::default()
        .fg(theme.form_field_text)
        .bg(theme.background_selected);
    textarea.set_style(base_style);
    if focused {
        textarea.set_cursor_style(
            Style::default()
                .bg(theme.text_primary)
                .fg(theme.menu_background),
        );
    } else {
        textarea.set_cursor_style(base_style);
    }
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_style(
        Style::default()
            .fg(theme.text_disabled)
            .bg(theme.background_selected),
    );

    let input_area = Rect {
        x: x + LABEL_WIDTH,
        y,
        width: width.saturating_sub(LABEL_WIDTH),
        height,
    };
    textarea.set_block(Block::default().borders(Borders::NONE).style(base_style));
    RatatuiWidget::render(&*textarea, input_area, buf);
}

/// Field label, highlighted when focused
pub fn render_label(focused: bool, label: &str, x: u16, y: u16, buf: &mut Buffer, theme: &AppTheme) {
    let label_style = if focused {
        Style::default().fg(theme.form_label_focused)
    } else {
        Style::default().fg(theme.form_label)
    };
    let label_area = Rect {
        x,
        y,
        width: LABEL_WIDTH,
        height: 1,
    };
    let label_para = Paragraph::new(Line::from(Span::styled(label.to_string(), label_style)));
    RatatuiWidget::render(label_para, label_area, buf);
}

/// Inline error row, if any
pub fn render_error(error: Option<&str>, x: u16, y: u16, width: u16, buf: &mut Buffer, theme: &AppTheme) {
    if let Some(error) = error {
        let text: String = error.chars().take(width as usize).collect();
        buf.set_string(
            x,
            y,
            text,
            Style::default().fg(theme.form_error).bg(theme.menu_background),
        );
    }
}

/// Key hints along the bottom of a form
pub fn render_hints(hints: &str, x: u16, y: u16, width: u16, buf: &mut Buffer, theme: &AppTheme) {
    let text: String = hints.chars().take(width as usize).collect();
    buf.set_string(
        x,
        y,
        text,
        Style::default().fg(theme.text_secondary).bg(theme.menu_background),
    );
}

/// Full text of a text area, lines joined with newlines
pub fn field_text(textarea: &TextArea<'_>) -> String {
    textarea.lines().join("\n")
}
