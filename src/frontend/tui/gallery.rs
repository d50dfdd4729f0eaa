//! Project gallery section: filter bar, card list and the selected card's
//! carousel.

use super::carousel::{dots_line, truncate, CarouselWidget};
use crate::core::gallery::{Gallery, GalleryItem, LoadState};
use crate::data::site;
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

pub fn render(gallery: &Gallery, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(gallery, chunks[0], buf, theme);

    match gallery.state() {
        LoadState::Loading => render_notice("Loading projects...", theme.text_secondary, chunks[1], buf),
        LoadState::Failed(message) => {
            let text = format!("{}  (press r to retry)", message);
            render_notice(&text, theme.status_error, chunks[1], buf);
        }
        LoadState::Loaded if gallery.items().is_empty() => {
            render_notice(&gallery.empty_message(), theme.text_secondary, chunks[1], buf);
        }
        LoadState::Loaded => render_cards(gallery, chunks[1], buf, theme),
    }
}

fn render_header(gallery: &Gallery, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let autoplay = if gallery.autoplay() {
        format!("every {:.1}s", gallery.interval().as_duration().as_secs_f64())
    } else {
        "paused".to_string()
    };
    let lines = vec![
        Line::from(Span::styled(
            site::GALLERY_HEADING,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(site::GALLERY_SUBTITLE, Style::default().fg(theme.text_secondary))),
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(theme.text_secondary)),
            Span::styled(
                gallery.filter().label().to_string(),
                Style::default().fg(theme.text_selected).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Autoplay: ", Style::default().fg(theme.text_secondary)),
            Span::styled(autoplay, Style::default().fg(theme.text_primary)),
        ]),
    ];
    Paragraph::new(lines).alignment(Alignment::Center).render(area, buf);
}

fn render_notice(text: &str, color: ratatui::style::Color, area: Rect, buf: &mut Buffer) {
    let top = area.y + area.height / 3;
    if top >= area.y + area.height {
        return;
    }
    let line_area = Rect {
        x: area.x,
        y: top,
        width: area.width,
        height: 1,
    };
    Paragraph::new(Line::from(Span::styled(text.to_string(), Style::default().fg(color))))
        .alignment(Alignment::Center)
        .render(line_area, buf);
}

fn card_list_item<'a>(item: &'a GalleryItem, width: usize, theme: &AppTheme) -> ListItem<'a> {
    let view = item.carousel.view();
    let mut meta = vec![Span::styled(
        format!("  {}", item.project.category),
        Style::default().fg(theme.accent),
    )];
    if !view.dots.is_empty() {
        meta.push(Span::styled(
            format!("  {}", dots_line(&view.dots)),
            Style::default().fg(theme.text_secondary),
        ));
    }
    ListItem::new(vec![
        Line::from(Span::styled(
            truncate(&item.project.title, width),
            Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(meta),
        Line::from(""),
    ])
}

fn render_cards(gallery: &Gallery, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let list_width = columns[0].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = gallery
        .items()
        .iter()
        .map(|item| card_list_item(item, list_width, theme))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.window_border))
                .title(format!(" Projects ({}) ", gallery.items().len())),
        )
        .highlight_style(Style::default().bg(theme.background_selected))
        .highlight_symbol("▸ ");
    let mut state = ListState::default().with_selected(Some(gallery.selected()));
    StatefulWidget::render(list, columns[0], buf, &mut state);

    if let Some(item) = gallery.selected_item() {
        render_card(item, columns[1], buf, theme);
    }
}

fn render_card(item: &GalleryItem, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.window_border_focused))
        .title(Line::from(Span::styled(
            format!(" {} ", item.project.title),
            Style::default().fg(theme.window_title).add_modifier(Modifier::BOLD),
        )));
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(inner);

    let view = item.carousel.view();
    CarouselWidget::new(&view, theme).focused(true).render(rows[0], buf);

    Paragraph::new(Line::from(Span::styled(
        format!(" {} ", item.project.category),
        Style::default()
            .fg(theme.background_primary)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .render(rows[1], buf);

    Paragraph::new(item.project.description.as_str())
        .style(Style::default().fg(theme.text_primary))
        .wrap(Wrap { trim: true })
        .render(rows[2], buf);

    Paragraph::new(Line::from(Span::styled(
        "←/→ browse  1-9 jump  Enter view  y copy URL  f filter  p autoplay  +/- speed",
        Style::default().fg(theme.text_disabled),
    )))
    .render(rows[3], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::carousel::CarouselOptions;
    use crate::core::lightbox::KeyListenerRegistry;
    use crate::data::{Category, Project};
    use std::time::Instant;

    fn all_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn gallery() -> Gallery {
        Gallery::new(CarouselOptions::default(), KeyListenerRegistry::new())
    }

    fn render_to_text(gallery: &Gallery) -> String {
        let theme = crate::theme::ThemePresets::dark();
        let area = Rect::new(0, 0, 110, 30);
        let mut buf = Buffer::empty(area);
        render(gallery, area, &mut buf, &theme);
        all_text(&buf)
    }

    #[test]
    fn test_loading_state() {
        let mut g = gallery();
        g.request_reload();
        assert!(render_to_text(&g).contains("Loading projects..."));
    }

    #[test]
    fn test_failed_state() {
        let mut g = gallery();
        g.set_failed("timeout");
        assert!(render_to_text(&g).contains("Failed to load projects"));
    }

    #[test]
    fn test_loaded_cards() {
        let mut g = gallery();
        g.set_projects(
            vec![Project {
                id: "p1".into(),
                title: "Radiology Wing".into(),
                description: "Shielded MRI suite".into(),
                category: Category::Medical,
                images: vec!["https://cdn/1.jpg".to_string(), "https://cdn/2.jpg".to_string()].into(),
                created_at: None,
                updated_at: None,
            }],
            Instant::now(),
        );
        let text = render_to_text(&g);
        assert!(text.contains("Radiology Wing"));
        assert!(text.contains("https://cdn/1.jpg"));
        assert!(text.contains("Shielded MRI suite"));
        assert!(text.contains("1 / 2"));
    }

    #[test]
    fn test_empty_loaded_list() {
        let mut g = gallery();
        g.set_projects(Vec::new(), Instant::now());
        assert!(render_to_text(&g).contains("No projects available"));
    }
}
