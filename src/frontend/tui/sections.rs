//! Static page sections: hero, services, contact details and footer.

use crate::data::site;
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub fn render_hero(area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let mut lines = vec![
        Line::from(Span::styled(
            site::COMPANY_NAME,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            site::TAGLINE,
            Style::default().fg(theme.text_primary).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];
    for paragraph in site::HERO_PARAGRAPHS {
        lines.push(Line::from(Span::styled(paragraph, Style::default().fg(theme.text_secondary))));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(theme.text_selected).add_modifier(Modifier::BOLD)),
        Span::styled(" explore our work   ", Style::default().fg(theme.text_disabled)),
        Span::styled("w", Style::default().fg(theme.text_selected).add_modifier(Modifier::BOLD)),
        Span::styled(" copy WhatsApp chat link", Style::default().fg(theme.text_disabled)),
    ]));

    let content = centered_column(area, 90, lines.len() as u16 + 2);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(content, buf);
}

pub fn render_services(area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    Paragraph::new(vec![
        Line::from(Span::styled(
            site::SERVICES_HEADING,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(site::SERVICES_SUBTITLE, Style::default().fg(theme.text_secondary))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[0], buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[1]);
    for (row_index, row) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(*row);
        for (col_index, cell) in cells.iter().enumerate() {
            if let Some(service) = site::SERVICES.get(row_index * 2 + col_index) {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.window_border))
                    .title(Line::from(Span::styled(
                        format!(" {} ", service.title),
                        Style::default().fg(theme.window_title).add_modifier(Modifier::BOLD),
                    )));
                Paragraph::new(service.description)
                    .style(Style::default().fg(theme.text_primary))
                    .wrap(Wrap { trim: true })
                    .block(block)
                    .render(*cell, buf);
            }
        }
    }
}

/// Offices, phone, emails and WhatsApp; the form sits beside this
pub fn render_contact_info(area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let label = Style::default().fg(theme.form_label).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.text_primary);

    let mut lines = vec![
        Line::from(Span::styled(
            site::CONTACT_HEADING,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(site::CONTACT_SUBTITLE, Style::default().fg(theme.text_secondary))),
        Line::from(""),
    ];
    for office in site::OFFICES {
        for (i, line) in office.iter().enumerate() {
            let style = if i == 0 { label } else { text };
            lines.push(Line::from(Span::styled(*line, style)));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![Span::styled("Phone  ", label), Span::styled(site::PHONE, text)]));
    for email in site::EMAILS {
        lines.push(Line::from(vec![Span::styled("Email  ", label), Span::styled(email, text)]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("WhatsApp  ", label),
        Span::styled(site::whatsapp_link(), Style::default().fg(theme.link_color)),
    ]));
    lines.push(Line::from(Span::styled(
        "Press w to copy the chat link",
        Style::default().fg(theme.text_disabled),
    )));

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.window_border))
                .title(" Get in Touch "),
        )
        .render(area, buf);
}

pub fn render_footer(area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    Paragraph::new(Line::from(Span::styled(site::COPYRIGHT, Style::default().fg(theme.text_disabled))))
        .alignment(Alignment::Center)
        .render(area, buf);
}

/// Horizontally and vertically centered block of at most `width` x `height`
fn centered_column(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_hero_shows_company() {
        let theme = crate::theme::ThemePresets::dark();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        render_hero(area, &mut buf, &theme);
        let text = all_text(&buf);
        assert!(text.contains(site::COMPANY_NAME));
        assert!(text.contains(site::TAGLINE));
    }

    #[test]
    fn test_services_show_every_title() {
        let theme = crate::theme::ThemePresets::dark();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        render_services(area, &mut buf, &theme);
        let text = all_text(&buf);
        for service in site::SERVICES {
            assert!(text.contains(service.title), "missing {}", service.title);
        }
    }

    #[test]
    fn test_contact_info_lists_phone() {
        let theme = crate::theme::ThemePresets::dark();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        render_contact_info(area, &mut buf, &theme);
        assert!(all_text(&buf).contains(site::PHONE));
    }
}
