//! Carousel card rendering.
//!
//! A terminal can't show the photo itself, so the slide is drawn as a frame
//! holding the image reference and its alt text, with arrows, a position
//! counter and one dot per image.

use crate::core::carousel::{CarouselView, EMPTY_PLACEHOLDER};
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Cut `text` to `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Dot row for the indicator, `●` for the current image
pub fn dots_line(dots: &[bool]) -> String {
    dots.iter()
        .map(|current| if *current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct CarouselWidget<'a> {
    view: &'a CarouselView<'a>,
    theme: &'a AppTheme,
    focused: bool,
}

impl<'a> CarouselWidget<'a> {
    pub fn new(view: &'a CarouselView<'a>, theme: &'a AppTheme) -> Self {
        Self {
            view,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let border_color = if self.focused {
            theme.window_border_focused
        } else {
            theme.window_border
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        if let Some((current, total)) = self.view.position {
            block = block.title_top(
                Line::from(format!(" {} / {} ", current, total))
                    .right_aligned()
                    .style(Style::default().fg(theme.text_secondary)),
            );
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 3 {
            return;
        }

        // Reserve columns for the arrows so the text never runs under them
        let text_width = inner.width.saturating_sub(6) as usize;
        let mut lines = Vec::new();
        match self.view.image {
            Some(image) => {
                lines.push(Line::from(Span::styled(
                    truncate(image, text_width),
                    Style::default().fg(theme.link_color).add_modifier(Modifier::UNDERLINED),
                )));
                if let Some(alt) = &self.view.alt_text {
                    lines.push(Line::from(Span::styled(
                        truncate(alt, text_width),
                        Style::default().fg(theme.text_secondary),
                    )));
                }
            }
            None => lines.push(Line::from(Span::styled(
                EMPTY_PLACEHOLDER,
                Style::default().fg(theme.text_disabled),
            ))),
        }

        let has_dots = !self.view.dots.is_empty() && inner.height > lines.len() as u16 + 1;
        let body_height = inner.height - u16::from(has_dots);
        let top_pad = body_height.saturating_sub(lines.len() as u16) / 2;
        let body = Rect {
            x: inner.x,
            y: inner.y + top_pad,
            width: inner.width,
            height: body_height - top_pad,
        };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_primary))
            .render(body, buf);

        if self.view.show_controls {
            let arrow_style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
            let mid = inner.y + body_height.saturating_sub(1) / 2;
            buf.set_string(inner.x + 1, mid, "◀", arrow_style);
            buf.set_string(inner.x + inner.width - 2, mid, "▶", arrow_style);
        }

        if has_dots {
            let dots = truncate(&dots_line(&self.view.dots), inner.width as usize);
            let dots_area = Rect {
                x: inner.x,
                y: inner.y + inner.height - 1,
                width: inner.width,
                height: 1,
            };
            Paragraph::new(Line::from(Span::styled(dots, Style::default().fg(theme.accent))))
                .alignment(Alignment::Center)
                .render(dots_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn all_text(buf: &Buffer) -> String {
        (0..buf.area.height).map(|y| row_text(buf, y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_dots_line() {
        assert_eq!(dots_line(&[false, true, false]), "○ ● ○");
        assert_eq!(dots_line(&[]), "");
    }

    #[test]
    fn test_render_multi_image_view() {
        let theme = crate::theme::ThemePresets::dark();
        let view = CarouselView {
            title: "Suite",
            image: Some("https://cdn/b.jpg"),
            alt_text: Some("Suite - Image 2".into()),
            position: Some((2, 3)),
            show_controls: true,
            dots: vec![false, true, false],
        };
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        CarouselWidget::new(&view, &theme).render(area, &mut buf);

        let text = all_text(&buf);
        assert!(text.contains("https://cdn/b.jpg"));
        assert!(text.contains("Suite - Image 2"));
        assert!(text.contains("2 / 3"));
        assert!(text.contains("○ ● ○"));
        assert!(text.contains('◀') && text.contains('▶'));
    }

    #[test]
    fn test_render_empty_view() {
        let theme = crate::theme::ThemePresets::dark();
        let view = CarouselView {
            title: "Empty",
            image: None,
            alt_text: None,
            position: None,
            show_controls: false,
            dots: Vec::new(),
        };
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        CarouselWidget::new(&view, &theme).render(area, &mut buf);

        let text = all_text(&buf);
        assert!(text.contains(EMPTY_PLACEHOLDER));
        assert!(!text.contains('◀'));
        assert!(!text.contains('●'));
    }
}
