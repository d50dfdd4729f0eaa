//! Admin section: sign-in prompt, dashboard stats, project table and the
//! message inbox.

use super::carousel::{truncate, CarouselWidget};
use super::form_frame;
use crate::core::admin::{AdminPanel, AdminTab};
use crate::data::{ContactMessage, MessageStatus};
use crate::theme::AppTheme;
use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, StatefulWidget, Table,
        TableState, Tabs, Widget, Wrap,
    },
};

pub fn render(admin: &AdminPanel, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    if !admin.is_logged_in() {
        render_signed_out(area, buf, theme);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let mut title = vec![
        Span::styled("Admin Dashboard", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("   Welcome, {}", admin.username().unwrap_or_default()),
            Style::default().fg(theme.text_secondary),
        ),
    ];
    if admin.loading {
        title.push(Span::styled("   Loading...", Style::default().fg(theme.status_info)));
    }
    Paragraph::new(Line::from(title)).render(chunks[0], buf);

    render_stats(admin, chunks[1], buf, theme);

    let stats = admin.stats();
    let tab_titles = vec![
        format!(" Projects ({}) ", stats.total_projects),
        format!(" Messages ({}) ", stats.total_messages),
    ];
    let selected_tab = match admin.tab {
        AdminTab::Projects => 0,
        AdminTab::Messages => 1,
    };
    Tabs::new(tab_titles)
        .select(selected_tab)
        .style(Style::default().fg(theme.text_secondary))
        .highlight_style(Style::default().fg(theme.text_selected).add_modifier(Modifier::BOLD))
        .render(chunks[2], buf);

    match admin.tab {
        AdminTab::Projects => render_projects(admin, chunks[3], buf, theme),
        AdminTab::Messages => render_messages(admin, chunks[3], buf, theme),
    }

    let hints = match admin.tab {
        AdminTab::Projects => "n new  e edit  d delete  ←/→ tab  r refresh  x logout",
        AdminTab::Messages => "Enter mark read  a respond  ←/→ tab  r refresh  x logout",
    };
    Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(theme.text_disabled))))
        .render(chunks[4], buf);
}

fn render_signed_out(area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let lines = vec![
        Line::from(Span::styled(
            "Admin Login",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Sign in to manage projects and messages",
            Style::default().fg(theme.text_secondary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.text_selected).add_modifier(Modifier::BOLD)),
            Span::styled(" sign in", Style::default().fg(theme.text_disabled)),
        ]),
    ];
    let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
    let body = Rect {
        x: area.x,
        y: top,
        width: area.width,
        height: area.height - (top - area.y),
    };
    Paragraph::new(lines).alignment(Alignment::Center).render(body, buf);
}

fn render_stats(admin: &AdminPanel, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let stats = admin.stats();
    let cards = [
        ("Total Projects", stats.total_projects, theme.accent),
        ("Total Messages", stats.total_messages, theme.status_info),
        ("Unread Messages", stats.unread_messages, theme.status_warning),
    ];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(area);

    for ((label, value, color), column) in cards.into_iter().zip(columns.iter()) {
        Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.window_border))
                .title(format!(" {} ", label)),
        )
        .render(*column, buf);
    }
}

fn render_projects(admin: &AdminPanel, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.window_border_focused))
        .title(" Manage Projects ");

    if admin.projects().is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No projects yet. Press n to add one.",
            Style::default().fg(theme.text_secondary),
        )))
        .alignment(Alignment::Center)
        .block(block)
        .render(area, buf);
        return;
    }

    let header = Row::new(["Title", "Category", "Images", "Cover"])
        .style(Style::default().fg(theme.form_label).add_modifier(Modifier::BOLD));
    let rows = admin.projects().iter().map(|project| {
        Row::new(vec![
            Cell::from(project.title.clone()),
            Cell::from(project.category.to_string()),
            Cell::from(project.images.len().to_string()),
            Cell::from(project.cover_image().unwrap_or("-").to_string()),
        ])
        .style(Style::default().fg(theme.text_primary))
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(theme.background_selected))
    .highlight_symbol("▸ ");

    let (table_area, preview_area) = match admin.preview() {
        Some(_) if area.width >= 70 => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(area);
            (columns[0], Some(columns[1]))
        }
        _ => (area, None),
    };

    let mut state = TableState::default().with_selected(Some(admin.project_selected()));
    StatefulWidget::render(table, table_area, buf, &mut state);

    if let (Some(preview), Some(preview_area)) = (admin.preview(), preview_area) {
        let view = preview.view();
        CarouselWidget::new(&view, theme).render(preview_area, buf);
    }
}

fn status_color(status: MessageStatus, theme: &AppTheme) -> Color {
    match status {
        MessageStatus::Unread => theme.status_warning,
        MessageStatus::Read => theme.status_info,
        MessageStatus::Responded => theme.status_success,
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn render_messages(admin: &AdminPanel, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    if admin.messages().is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No messages yet",
            Style::default().fg(theme.text_secondary),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Contact Messages "))
        .render(area, buf);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let width = columns[0].width.saturating_sub(16) as usize;
    let items: Vec<ListItem> = admin
        .messages()
        .iter()
        .map(|message| {
            let name_style = if message.is_unread() {
                Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_primary)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<10}", message.status.label()),
                    Style::default().fg(status_color(message.status, theme)),
                ),
                Span::styled(truncate(&message.name, width), name_style),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.window_border_focused))
                .title(" Contact Messages "),
        )
        .highlight_style(Style::default().bg(theme.background_selected))
        .highlight_symbol("▸ ");
    let mut state = ListState::default().with_selected(Some(admin.message_selected()));
    StatefulWidget::render(list, columns[0], buf, &mut state);

    if let Some(message) = admin.selected_message() {
        render_message_detail(message, columns[1], buf, theme);
    }
}

fn render_message_detail(message: &ContactMessage, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let label = Style::default().fg(theme.form_label);
    let text = Style::default().fg(theme.text_primary);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(message.name.clone(), text.add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                message.status.label(),
                Style::default().fg(status_color(message.status, theme)),
            ),
        ]),
        Line::from(vec![Span::styled("Email: ", label), Span::styled(message.email.clone(), text)]),
        Line::from(vec![Span::styled("Phone: ", label), Span::styled(message.phone.clone(), text)]),
        Line::from(vec![
            Span::styled("Date:  ", label),
            Span::styled(format_date(message.created_at), text),
        ]),
        Line::from(""),
    ];
    lines.extend(message.message.lines().map(|line| Line::from(Span::styled(line.to_string(), text))));

    if let Some(response) = &message.response {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Your Response ({})", format_date(message.responded_at)),
            Style::default().fg(theme.status_success).add_modifier(Modifier::BOLD),
        )));
        lines.extend(response.lines().map(|line| Line::from(Span::styled(line.to_string(), text))));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.window_border))
                .title(" Message "),
        )
        .render(area, buf);
}

/// y/n prompt over the page before a project is deleted
pub fn render_confirm_delete(title: &str, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let popup = form_frame::centered_popup(area, 50, 7);
    form_frame::draw_frame(popup, buf, " Delete Project ", theme);

    let x = popup.x + 2;
    let width = popup.width.saturating_sub(4);
    let question = truncate(&format!("Delete \"{}\"?", title), width as usize);
    buf.set_string(
        x,
        popup.y + 2,
        question,
        Style::default().fg(theme.text_primary).bg(theme.menu_background),
    );
    form_frame::render_hints("y:Delete  n/Esc:Keep", x, popup.y + 4, width, buf, theme);
}
