//! Row templates used to render each list item

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::domain::access::{
    AccessRecord, AccessResult, ActivityEntry, Device, DeviceStatus, Member, MemberStatus, Role,
};

fn dim(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(Color::DarkGray))
}

fn padded(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

pub fn activity_line(entry: &ActivityEntry) -> Line<'static> {
    Line::from(vec![
        dim(padded(&entry.time, 18)),
        Span::styled(
            padded(&entry.user, 10),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(entry.action.clone()),
    ])
}

pub fn device_line(device: &Device) -> Line<'static> {
    let (dot, color) = match device.status {
        DeviceStatus::Online => ("●", Color::Green),
        DeviceStatus::Offline => ("○", Color::Red),
    };
    Line::from(vec![
        Span::styled(format!("{dot} "), Style::default().fg(color)),
        Span::styled(
            padded(&device.name, 16),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(padded(&device.location, 14)),
        Span::styled(padded(device.status.as_str(), 8), Style::default().fg(color)),
        dim(device.last_active.clone()),
    ])
}

pub fn member_line(member: &Member) -> Line<'static> {
    let role_style = match member.role {
        Role::Admin => Style::default().fg(Color::Magenta),
        Role::User => Style::default().fg(Color::Blue),
    };
    let status_style = match member.status {
        MemberStatus::Active => Style::default().fg(Color::Green),
        MemberStatus::Inactive => Style::default().fg(Color::DarkGray),
    };
    Line::from(vec![
        Span::raw(padded(&member.username, 12)),
        Span::raw(padded(&member.name, 12)),
        Span::styled(padded(member.role.title(), 8), role_style),
        Span::styled(member.status.as_str().to_string(), status_style),
    ])
}

pub fn record_line(record: &AccessRecord) -> Line<'static> {
    let result_style = match record.result {
        AccessResult::Success => Style::default().fg(Color::Green),
        AccessResult::Failed => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    };
    Line::from(vec![
        dim(padded(&record.time, 18)),
        Span::raw(padded(&record.user, 8)),
        Span::raw(padded(&record.device, 14)),
        Span::raw(padded(&record.method, 10)),
        Span::styled(record.result.as_str().to_string(), result_style),
    ])
}
