//! System settings panel
//!
//! Edits a working copy of the settings form. `s` applies the working copy,
//! `d` restores defaults. Only administrators may change anything.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::info;

use crate::core::{Action, Context, Module, NotifyLevel};
use crate::domain::access::{SettingField, SettingsForm};

const TIMEOUT_STEP: i32 = 5;

#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    /// Working copy shown in the form
    pub form: SettingsForm,
    /// Last saved settings
    pub saved: SettingsForm,
    pub selected: usize,
    /// Free-text field currently being typed into
    pub editing: bool,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_field(&self) -> SettingField {
        SettingField::ALL[self.selected.min(SettingField::ALL.len() - 1)]
    }

    pub fn is_dirty(&self) -> bool {
        self.form != self.saved
    }

    /// True while keystrokes belong to a text field
    pub fn captures_input(&self) -> bool {
        self.editing
    }

    /// Drop unsaved edits
    pub fn discard(&mut self) {
        self.form = self.saved.clone();
        self.editing = false;
    }

    fn move_selection(&mut self, down: bool) {
        let len = SettingField::ALL.len();
        self.selected = if down {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    fn text_mut(&mut self, field: SettingField) -> Option<&mut String> {
        match field {
            SettingField::SystemName => Some(&mut self.form.system_name),
            SettingField::EmailServer => Some(&mut self.form.email_server),
            _ => None,
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) -> Action {
        let field = self.selected_field();
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.editing = false,
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut(field) {
                    text.pop();
                }
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(text) = self.text_mut(field) {
                    text.push(ch);
                }
            }
            _ => {}
        }
        Action::None
    }

    fn read_only() -> Action {
        Action::Notify(
            "Only administrators can change settings".to_string(),
            NotifyLevel::Warn,
        )
    }
}

impl Module for SettingsPanel {
    fn id(&self) -> &'static str {
        "settings"
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        if self.editing {
            return self.handle_text_key(key);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(true);
                return Action::None;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(false);
                return Action::None;
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('+') | KeyCode::Char('-')
            | KeyCode::Char('d') | KeyCode::Char('s') => {}
            _ => return Action::None,
        }

        if !ctx.can_edit_settings() {
            return Self::read_only();
        }

        let field = self.selected_field();
        match key.code {
            KeyCode::Enter if field.is_text() => {
                self.editing = true;
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.form.cycle(field);
                Action::None
            }
            KeyCode::Char('+') => {
                self.form.adjust_timeout(TIMEOUT_STEP);
                Action::None
            }
            KeyCode::Char('-') => {
                self.form.adjust_timeout(-TIMEOUT_STEP);
                Action::None
            }
            KeyCode::Char('d') => {
                self.form = SettingsForm::default();
                Action::Notify(
                    "Defaults restored, press s to save".to_string(),
                    NotifyLevel::Info,
                )
            }
            KeyCode::Char('s') => {
                if !self.is_dirty() {
                    return Action::Notify("No changes to save".to_string(), NotifyLevel::Info);
                }
                self.saved = self.form.clone();
                info!(operator = ?ctx.operator, "settings saved");
                Action::Notify("Settings saved".to_string(), NotifyLevel::Info)
            }
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let title = if self.is_dirty() {
            "Settings (unsaved)"
        } else {
            "Settings"
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray));

        let mut lines = Vec::new();
        let mut group = "";
        for (idx, field) in SettingField::ALL.iter().enumerate() {
            if field.group() != group {
                if !group.is_empty() {
                    lines.push(Line::from(""));
                }
                group = field.group();
                lines.push(Line::from(Span::styled(
                    group.to_uppercase(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
            }

            let selected = idx == self.selected;
            let marker = if selected { "> " } else { "  " };
            let mut value = self.form.display(*field);
            if selected && self.editing {
                value.push('▏');
            }
            let value_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{:<22}", field.label()),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(value, value_style),
            ]));
        }

        lines.push(Line::from(""));
        let hint = if ctx.can_edit_settings() {
            "j/k select · Enter/Space change · +/- timeout · d defaults · s save"
        } else {
            "Read-only: sign in as an administrator to change settings"
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::{Role, Session, SessionUser};

    fn admin_ctx() -> Context {
        let session = Session {
            token: "t".to_string(),
            user: SessionUser {
                id: 1,
                username: "admin".to_string(),
                role: Role::Admin,
            },
        };
        Context::from_session(Some(&session))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn select(panel: &mut SettingsPanel, field: SettingField) {
        panel.selected = SettingField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap();
    }

    #[test]
    fn test_navigation_wraps() {
        let mut panel = SettingsPanel::new();
        let mut ctx = Context::new();
        panel.handle_key(key(KeyCode::Char('k')), &mut ctx);
        assert_eq!(panel.selected, SettingField::ALL.len() - 1);
        panel.handle_key(key(KeyCode::Char('j')), &mut ctx);
        assert_eq!(panel.selected, 0);
    }

    #[test]
    fn test_non_admin_is_read_only() {
        let mut panel = SettingsPanel::new();
        let mut ctx = Context::new();
        select(&mut panel, SettingField::TwoFactor);
        let action = panel.handle_key(key(KeyCode::Char(' ')), &mut ctx);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warn)));
        assert!(panel.form.two_factor);
        assert!(!panel.is_dirty());
    }

    #[test]
    fn test_admin_toggles_and_saves() {
        let mut panel = SettingsPanel::new();
        let mut ctx = admin_ctx();
        select(&mut panel, SettingField::SmsNotification);
        panel.handle_key(key(KeyCode::Enter), &mut ctx);
        assert!(panel.form.sms_notification);
        assert!(panel.is_dirty());

        let action = panel.handle_key(key(KeyCode::Char('s')), &mut ctx);
        assert_eq!(
            action,
            Action::Notify("Settings saved".to_string(), NotifyLevel::Info)
        );
        assert!(panel.saved.sms_notification);
        assert!(!panel.is_dirty());
    }

    #[test]
    fn test_timeout_is_clamped() {
        let mut panel = SettingsPanel::new();
        let mut ctx = admin_ctx();
        for _ in 0..40 {
            panel.handle_key(key(KeyCode::Char('+')), &mut ctx);
        }
        assert_eq!(panel.form.session_timeout_minutes, 120);
        for _ in 0..40 {
            panel.handle_key(key(KeyCode::Char('-')), &mut ctx);
        }
        assert_eq!(panel.form.session_timeout_minutes, 5);
    }

    #[test]
    fn test_text_field_editing() {
        let mut panel = SettingsPanel::new();
        let mut ctx = admin_ctx();
        select(&mut panel, SettingField::EmailServer);
        panel.handle_key(key(KeyCode::Enter), &mut ctx);
        assert!(panel.captures_input());
        for _ in 0.."example.com".len() {
            panel.handle_key(key(KeyCode::Backspace), &mut ctx);
        }
        for ch in "corp.io".chars() {
            panel.handle_key(key(KeyCode::Char(ch)), &mut ctx);
        }
        panel.handle_key(key(KeyCode::Esc), &mut ctx);
        assert!(!panel.captures_input());
        assert_eq!(panel.form.email_server, "smtp.corp.io");
    }

    #[test]
    fn test_defaults_and_discard() {
        let mut panel = SettingsPanel::new();
        let mut ctx = admin_ctx();
        select(&mut panel, SettingField::DataRetention);
        panel.handle_key(key(KeyCode::Enter), &mut ctx);
        assert_eq!(panel.form.data_retention_days, 180);
        panel.handle_key(key(KeyCode::Char('d')), &mut ctx);
        assert_eq!(panel.form, SettingsForm::default());

        panel.handle_key(key(KeyCode::Enter), &mut ctx);
        panel.discard();
        assert!(!panel.is_dirty());
    }
}
