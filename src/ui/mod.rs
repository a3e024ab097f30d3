use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod templates;
pub mod widgets;

use crate::app::{App, InputMode, Screen, Section, StatusLevel};
use crate::core::Module;
use crate::domain::access::ListKind;
use widgets::StatCard;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    if app.screen == Screen::Login {
        draw_login(f, size, app);
        return;
    }

    let areas = layout::areas(size);

    draw_header(f, areas.header, app);
    draw_sidebar(f, areas.sidebar, app);
    match app.active_section {
        Section::Overview => draw_overview(f, areas.content, app),
        Section::Settings => app.settings.render(f, areas.content, &app.ctx),
        section => draw_list_panel(f, areas.content, app, section),
    }
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
}

fn draw_login(f: &mut Frame, area: Rect, app: &App) {
    let form_area = layout::centered_box(52, 11, area);
    app.login.render(f, form_area, &app.ctx);

    if let Some((text, level)) = app.status_text() {
        let below = Rect {
            x: form_area.x,
            y: form_area.y.saturating_add(form_area.height),
            width: form_area.width,
            height: 1,
        };
        if below.y < area.y.saturating_add(area.height) {
            let line = Line::styled(text.to_string(), level_style(level));
            f.render_widget(Paragraph::new(line).alignment(Alignment::Center), below);
        }
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let (operator, role) = app
        .session
        .as_ref()
        .map(|s| (s.user.username.as_str(), s.user.role.title()))
        .unwrap_or(("--", "--"));

    let mut spans = vec![
        Span::styled(
            "Gatehouse",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("User ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{operator} ")),
        Span::styled("Role ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{role} ")),
        Span::styled("Section ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.active_section.title()),
    ];
    if app.is_loading() {
        spans.push(Span::styled(
            "  loading…",
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(header, area);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|section| {
            let is_active = *section == app.active_section;
            let style = if is_active {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", section.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(section.title()),
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(
        Section::ALL
            .iter()
            .position(|section| *section == app.active_section),
    );
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_overview(f: &mut Frame, area: Rect, app: &App) {
    let areas = layout::overview_areas(area);
    let stats = app.stats.as_ref();
    let cards = [
        StatCard::new("Today's access", stats.map(|s| s.today_access)).accent(Color::Cyan),
        StatCard::new("Online devices", stats.map(|s| s.online_devices)).accent(Color::Green),
        StatCard::new("Alarm events", stats.map(|s| s.alarm_events)).accent(Color::Red),
        StatCard::new("Registered users", stats.map(|s| s.registered_users))
            .accent(Color::Magenta),
    ];
    for (card, card_area) in cards.into_iter().zip(areas.cards) {
        f.render_widget(card, card_area);
    }

    draw_rows(f, areas.activity, app, ListKind::Activity, "Recent activity");

    let api_line = match app.last_api.as_deref() {
        Some(summary) => Line::raw(summary.to_string()),
        None => Line::styled(
            "Probe the API with :api <endpoint> [method]",
            Style::default().fg(Color::DarkGray),
        ),
    };
    let api = Paragraph::new(api_line)
        .block(Block::default().borders(Borders::ALL).title("API"))
        .wrap(Wrap { trim: true });
    f.render_widget(api, areas.api);
}

fn draw_list_panel(f: &mut Frame, area: Rect, app: &App, section: Section) {
    let Some(kind) = section.list_kind() else {
        return;
    };
    draw_rows(f, area, app, kind, section.title());
}

fn draw_rows(f: &mut Frame, area: Rect, app: &App, kind: ListKind, title: &str) {
    let rows = app.container(kind).unwrap_or_default();
    let title = format!("{title} ({})", rows.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if rows.is_empty() {
        let placeholder = if app.is_loading() {
            "Loading…"
        } else {
            "No data"
        };
        let paragraph = Paragraph::new(Line::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = rows.iter().cloned().map(ListItem::new).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    if app.active_section.list_kind() == Some(kind) {
        state.select(Some(app.selected.min(rows.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let counts = [
        ("Devices", app.devices.len()),
        ("Users", app.members.len()),
        ("Records", app.records.len()),
    ];
    let mut spans = Vec::new();
    for (label, count) in counts {
        spans.push(Span::styled(
            format!("{label} "),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::raw(format!("{count}  ")));
    }
    if app.settings.is_dirty() {
        spans.push(Span::styled(
            "Settings modified",
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("dashboard", "Show the dashboard"),
        ("devices", "Show devices"),
        ("users", "Show users"),
        ("records", "Show access records"),
        ("settings", "Show settings"),
        ("go", "go <section id>"),
        ("api", "api <endpoint> [method]"),
        ("export", "Export the current section"),
        ("refresh", "Reload all data"),
        ("logout", "Sign out"),
        ("help", "Show help"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

fn level_style(level: StatusLevel) -> Style {
    let color = match level {
        StatusLevel::Info => Color::LightGreen,
        StatusLevel::Warn => Color::LightYellow,
        StatusLevel::Error => Color::LightRed,
    };
    Style::default().fg(color)
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input).unwrap_or("Enter=run Esc=cancel");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.as_str()),
                Span::styled(format!("  {}", hint), Style::default().fg(Color::DarkGray)),
            ])
        }
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text, level_style(level)),
                ])
            } else {
                action_hints(app)
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn action_hints(app: &App) -> Line<'static> {
    let mut hints = vec![("1-5", "section"), ("j/k", "move"), (":", "command")];
    if matches!(
        app.active_section,
        Section::Devices | Section::Users | Section::Records | Section::Settings
    ) {
        hints.push(("e", "export"));
    }
    hints.extend([("r", "reload"), ("L", "logout"), ("?", "help"), ("q", "quit")]);

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {label}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = layout::centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-5        Jump to section"),
        Line::from("  [ / ]      Prev/Next section"),
        Line::from("  j / k      Move selection"),
        Line::from("  Mouse      Click a menu entry"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  :          Command bar"),
        Line::from("  e          Export current section"),
        Line::from("  r          Reload data"),
        Line::from("  L          Sign out"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from("Settings"),
        Line::from("  Enter/Space  Change option"),
        Line::from("  + / -        Session timeout"),
        Line::from("  d / s        Defaults / Save"),
        Line::from(""),
        Line::from("Commands"),
        Line::from("  :go <id>  :api <endpoint> [method]  :export  :logout"),
        Line::from(""),
        Line::from(format!("Active section: {}", app.active_section.title())),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}
