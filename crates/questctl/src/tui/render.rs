//! Rendering - header, level list, detail panel and status line

use super::state::{NoticeKind, TuiState};
use quest_common::display::{app_title, status_glyph, toggle_label, xp_summary};
use quest_common::{LevelStatus, LevelView, ProgressView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const HELP_TEXT: &str = " ↑/↓ move   Enter toggle   q quit";

/// Draw the whole screen from the current view
pub fn draw_ui(f: &mut Frame, state: &TuiState, view: &ProgressView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // XP gauge with title
            Constraint::Min(8),    // levels + detail
            Constraint::Length(1), // notice
            Constraint::Length(1), // help
        ])
        .split(f.size());

    draw_header(f, chunks[0], state, view);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    draw_level_list(f, body[0], state, view);
    if let Some(level) = view.levels.get(state.selected) {
        let previous = state.selected.checked_sub(1).and_then(|p| view.levels.get(p));
        draw_detail(f, body[1], state, level, previous);
    }

    draw_notice(f, chunks[2], state);
    f.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn draw_header(f: &mut Frame, area: Rect, state: &TuiState, view: &ProgressView) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", app_title(state.emojis)),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        )
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(view.ratio())
        .label(format!("{} ({}%)", xp_summary(view), view.percent()));
    f.render_widget(gauge, area);
}

fn level_style(status: LevelStatus) -> Style {
    match status {
        LevelStatus::Completed => Style::default().fg(Color::Green),
        LevelStatus::Available => Style::default().fg(Color::Yellow),
        LevelStatus::Locked => Style::default().fg(Color::DarkGray),
    }
}

fn draw_level_list(f: &mut Frame, area: Rect, state: &TuiState, view: &ProgressView) {
    let items: Vec<ListItem> = view
        .levels
        .iter()
        .map(|level| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", status_glyph(level.status, state.emojis))),
                Span::styled(level.level.title, level_style(level.status)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Levels "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_detail(
    f: &mut Frame,
    area: Rect,
    state: &TuiState,
    level: &LevelView,
    previous: Option<&LevelView>,
) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(level.level.title, level_style(level.status).add_modifier(Modifier::BOLD))),
        Line::from(format!("{} · {} XP", level.key(), level.level.xp)),
        Line::from(""),
        Line::from(level.level.description),
        Line::from(""),
    ];

    if !level.level.example.is_empty() {
        let prefix = if state.emojis { "📌 Example: " } else { "Example: " };
        lines.push(Line::from(vec![
            Span::styled(prefix, label),
            Span::styled(level.level.example, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
        lines.push(Line::from(""));
    }

    if !level.level.resources.is_empty() {
        lines.push(Line::from(Span::styled("Resources", label)));
        let bullet = if state.emojis { "🔗" } else { "-" };
        for res in level.level.resources {
            lines.push(Line::from(format!("{} {}", bullet, res.label)));
            lines.push(Line::from(Span::styled(
                format!("  {}", res.url),
                Style::default().fg(Color::Cyan),
            )));
        }
        lines.push(Line::from(""));
    }

    let action = if level.is_unlocked {
        Line::from(vec![
            Span::raw("Enter: "),
            Span::styled(
                format!("[{}]", toggle_label(level.is_completed)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        let hint = previous
            .map(|p| format!("Locked: complete {} first", p.level.title))
            .unwrap_or_else(|| "Locked".to_string());
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
    };
    lines.push(action);

    let detail = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn draw_notice(f: &mut Frame, area: Rect, state: &TuiState) {
    let Some(notice) = &state.notice else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Info => Color::Blue,
        NoticeKind::Success => Color::Green,
        NoticeKind::Warning => Color::Yellow,
    };
    f.render_widget(
        Paragraph::new(format!(" {}", notice.text)).style(Style::default().fg(color)),
        area,
    );
}
