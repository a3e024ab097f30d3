//! Login screen: username and password fields with a submit action

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::core::{Action, Context, Module};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Set while a submission is in flight; further submits are ignored
    pub submitting: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: LoginField::Username,
            submitting: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// A rejected attempt keeps the username and clears the password
    pub fn rejected(&mut self) {
        self.submitting = false;
        self.password.clear();
        self.focus = LoginField::Password;
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    fn active_field(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    fn submit(&mut self) -> Action {
        if self.submitting {
            return Action::None;
        }
        self.submitting = true;
        Action::SubmitLogin {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl Module for LoginForm {
    fn id(&self) -> &'static str {
        "login"
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => Action::Quit,
            (KeyCode::Esc, _) => Action::Quit,
            (KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down, _) => {
                self.toggle_focus();
                Action::None
            }
            (KeyCode::Enter, _) => {
                if self.focus == LoginField::Username && self.password.is_empty() {
                    self.focus = LoginField::Password;
                    return Action::None;
                }
                self.submit()
            }
            (KeyCode::Backspace, _) => {
                self.active_field().pop();
                Action::None
            }
            (KeyCode::Char(ch), mods) if !mods.contains(KeyModifiers::CONTROL) => {
                self.active_field().push(ch);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _ctx: &Context) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Gatehouse · Sign in ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title = Paragraph::new("Access control management console")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(title, rows[0]);

        let masked = "*".repeat(self.password.chars().count());
        render_field(
            frame,
            rows[1],
            "Username",
            &self.username,
            self.focus == LoginField::Username,
        );
        render_field(
            frame,
            rows[2],
            "Password",
            &masked,
            self.focus == LoginField::Password,
        );

        let hint = if self.submitting {
            Line::from(Span::styled(
                "Signing in…",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(vec![
                Span::styled("Tab", Style::default().fg(Color::Cyan)),
                Span::raw(" switch  "),
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" sign in  "),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::raw(" quit"),
            ])
        };
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rows[3]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::raw(value.to_string())];
    if focused {
        spans.push(Span::styled("▏", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label.to_string())
            .border_style(border),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(form: &mut LoginForm, code: KeyCode) -> Action {
        let mut ctx = Context::new();
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &mut ctx)
    }

    fn type_str(form: &mut LoginForm, text: &str) {
        for ch in text.chars() {
            press(form, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_dispatch_reaches_login_form() {
        let mut form = LoginForm::new();
        let mut ctx = Context::new();
        assert_eq!(form.id(), "login");
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(crate::core::dispatch_key(&mut form, key, &mut ctx), Action::None);
        assert_eq!(form.username, "a");
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(crate::core::dispatch_key(&mut form, esc, &mut ctx), Action::Quit);
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut form = LoginForm::new();
        type_str(&mut form, "admin");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "admin1234");
        press(&mut form, KeyCode::Backspace);
        assert_eq!(form.username, "admin");
        assert_eq!(form.password, "admin123");
    }

    #[test]
    fn test_enter_submits_once() {
        let mut form = LoginForm::new();
        type_str(&mut form, "admin");
        // First Enter on the username moves to the empty password field
        assert_eq!(press(&mut form, KeyCode::Enter), Action::None);
        assert_eq!(form.focus, LoginField::Password);
        type_str(&mut form, "admin123");
        assert_eq!(
            press(&mut form, KeyCode::Enter),
            Action::SubmitLogin {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            }
        );
        assert_eq!(press(&mut form, KeyCode::Enter), Action::None);
    }

    #[test]
    fn test_rejected_clears_password() {
        let mut form = LoginForm::new();
        type_str(&mut form, "guest");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "nope");
        press(&mut form, KeyCode::Enter);
        form.rejected();
        assert!(!form.submitting);
        assert_eq!(form.username, "guest");
        assert!(form.password.is_empty());
    }

    #[test]
    fn test_escape_quits() {
        let mut form = LoginForm::new();
        assert_eq!(press(&mut form, KeyCode::Esc), Action::Quit);
        let mut ctx = Context::new();
        let action = form.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut ctx,
        );
        assert_eq!(action, Action::Quit);
    }
}
