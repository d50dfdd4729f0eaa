//! Full-screen image viewer overlay.

use super::carousel::truncate;
use crate::core::lightbox::Lightbox;
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub fn render(lightbox: &Lightbox, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    if !lightbox.is_open() {
        return;
    }

    // Leave a one-cell margin so the page stays visible around the overlay
    let overlay = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    Clear.render(overlay, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.window_border_focused))
        .title(Line::from(Span::styled(
            format!(" {} ", lightbox.title()),
            Style::default().fg(theme.window_title).add_modifier(Modifier::BOLD),
        )))
        .title_top(
            Line::from(Span::styled(" × Esc ", Style::default().fg(theme.text_secondary)))
                .right_aligned(),
        )
        .style(Style::default().bg(theme.window_background));
    let inner = block.inner(overlay);
    block.render(overlay, buf);

    if inner.height < 3 || inner.width < 8 {
        return;
    }

    let text_width = inner.width.saturating_sub(8) as usize;
    let image = lightbox.current_image().unwrap_or_default();
    let mut lines = vec![
        Line::from(Span::styled(
            truncate(image, text_width),
            Style::default().fg(theme.link_color).add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate(
                &format!("{} - Image {}", lightbox.title(), lightbox.current_index() + 1),
                text_width,
            ),
            Style::default().fg(theme.text_secondary),
        )),
    ];
    if let Some((current, total)) = lightbox.position() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} / {}", current, total),
            Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD),
        )));
    }

    let top_pad = inner.height.saturating_sub(lines.len() as u16) / 2;
    let body = Rect {
        x: inner.x,
        y: inner.y + top_pad,
        width: inner.width,
        height: inner.height - top_pad,
    };
    Paragraph::new(lines).alignment(Alignment::Center).render(body, buf);

    let mid = inner.y + inner.height / 2;
    let arrow_style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    if lightbox.len() > 1 {
        buf.set_string(inner.x + 2, mid, "◀", arrow_style);
        buf.set_string(inner.x + inner.width - 3, mid, "▶", arrow_style);
    }

    let hint = if lightbox.len() > 1 {
        "←/→ previous/next   Home/End first/last   Esc close"
    } else {
        "Esc close"
    };
    let hint_area = Rect {
        x: inner.x,
        y: inner.y + inner.height - 1,
        width: inner.width,
        height: 1,
    };
    Paragraph::new(Line::from(Span::styled(hint, Style::default().fg(theme.text_disabled))))
        .alignment(Alignment::Center)
        .render(hint_area, buf);
}
