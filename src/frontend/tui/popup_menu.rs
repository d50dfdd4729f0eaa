//! Small popup menu, used for the gallery category filter.
//!
//! The menu is rebuilt every frame from core state, so it only renders;
//! the cursor lives in the core.

use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// A menu entry; `active` marks the value currently in effect
#[derive(Clone, Debug)]
pub struct MenuItem {
    pub text: String,
    pub active: bool,
}

/// Popup menu widget for navigable menus
pub struct PopupMenu<'a> {
    title: &'a str,
    items: Vec<MenuItem>,
    selected: usize,
    position: (u16, u16), // (col, row)
}

impl<'a> PopupMenu<'a> {
    pub fn new(title: &'a str, items: Vec<MenuItem>, position: (u16, u16), selected: usize) -> Self {
        Self {
            title,
            items,
            selected,
            position,
        }
    }

    /// Area the menu occupies inside `area`
    pub fn menu_rect(&self, area: Rect) -> Rect {
        let max_width = self
            .items
            .iter()
            .map(|item| item.text.chars().count() + 2)
            .chain(std::iter::once(self.title.chars().count()))
            .max()
            .unwrap_or(20)
            .min(60);

        let width = (max_width as u16 + 4).min(area.width); // borders and padding
        let height = (self.items.len() as u16 + 2).min(area.height); // borders

        let x = self.position.0.min(area.width.saturating_sub(width));
        let y = self.position.1.min(area.height.saturating_sub(height));

        Rect {
            x: area.x + x,
            y: area.y + y,
            width,
            height,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        let menu_rect = self.menu_rect(area);

        // Clear the area behind the menu
        Clear.render(menu_rect, buf);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let mut style = if idx == self.selected {
                    Style::default()
                        .fg(theme.menu_background)
                        .bg(theme.menu_item_selected)
                } else {
                    Style::default()
                        .fg(theme.menu_item_normal)
                        .bg(theme.menu_background)
                };
                if item.active {
                    style = style.add_modifier(Modifier::BOLD);
                }
                let marker = if item.active { "● " } else { "  " };
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(format!("{}{}", marker, item.text), style),
                    Span::raw(" "),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .border_style(Style::default().fg(theme.menu_border))
            .style(Style::default().bg(theme.menu_background));

        Paragraph::new(lines).block(block).render(menu_rect, buf);
    }
}
