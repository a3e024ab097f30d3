//! System settings form

use serde::{Deserialize, Serialize};

pub const TIMEZONES: [&str; 3] = ["Asia/Shanghai", "America/New_York", "Europe/London"];
pub const LANGUAGES: [&str; 2] = ["zh-CN", "en-US"];
pub const RETENTION_DAYS: [u32; 4] = [30, 90, 180, 365];

pub const SESSION_TIMEOUT_MIN: u32 = 5;
pub const SESSION_TIMEOUT_MAX: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordPolicy {
    Low,
    Medium,
    High,
}

impl PasswordPolicy {
    pub fn describe(&self) -> &'static str {
        match self {
            PasswordPolicy::Low => "low (6+ characters)",
            PasswordPolicy::Medium => "medium (8+, letters and digits)",
            PasswordPolicy::High => "high (10+, letters, digits, symbols)",
        }
    }

    fn next(self) -> Self {
        match self {
            PasswordPolicy::Low => PasswordPolicy::Medium,
            PasswordPolicy::Medium => PasswordPolicy::High,
            PasswordPolicy::High => PasswordPolicy::Low,
        }
    }
}

/// Editable fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    SystemName,
    Timezone,
    Language,
    PasswordPolicy,
    SessionTimeout,
    TwoFactor,
    EmailNotification,
    EmailServer,
    SmsNotification,
    DataRetention,
}

impl SettingField {
    pub const ALL: [SettingField; 10] = [
        SettingField::SystemName,
        SettingField::Timezone,
        SettingField::Language,
        SettingField::PasswordPolicy,
        SettingField::SessionTimeout,
        SettingField::TwoFactor,
        SettingField::EmailNotification,
        SettingField::EmailServer,
        SettingField::SmsNotification,
        SettingField::DataRetention,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingField::SystemName => "System name",
            SettingField::Timezone => "Timezone",
            SettingField::Language => "Language",
            SettingField::PasswordPolicy => "Password policy",
            SettingField::SessionTimeout => "Session timeout",
            SettingField::TwoFactor => "Two-factor auth",
            SettingField::EmailNotification => "Email notification",
            SettingField::EmailServer => "Email server",
            SettingField::SmsNotification => "SMS notification",
            SettingField::DataRetention => "Data retention",
        }
    }

    /// Group heading the field is rendered under
    pub fn group(&self) -> &'static str {
        match self {
            SettingField::SystemName | SettingField::Timezone | SettingField::Language => {
                "System"
            }
            SettingField::PasswordPolicy
            | SettingField::SessionTimeout
            | SettingField::TwoFactor => "Security",
            SettingField::EmailNotification
            | SettingField::EmailServer
            | SettingField::SmsNotification => "Notifications",
            SettingField::DataRetention => "Data",
        }
    }

    /// Text fields are shown but not cycled
    pub fn is_text(&self) -> bool {
        matches!(self, SettingField::SystemName | SettingField::EmailServer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsForm {
    pub system_name: String,
    pub timezone: String,
    pub language: String,
    pub password_policy: PasswordPolicy,
    pub session_timeout_minutes: u32,
    pub two_factor: bool,
    pub email_notification: bool,
    pub email_server: String,
    pub sms_notification: bool,
    pub data_retention_days: u32,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            system_name: "Smart Access Control Console".to_string(),
            timezone: TIMEZONES[0].to_string(),
            language: LANGUAGES[0].to_string(),
            password_policy: PasswordPolicy::Medium,
            session_timeout_minutes: 30,
            two_factor: true,
            email_notification: true,
            email_server: "smtp.example.com".to_string(),
            sms_notification: false,
            data_retention_days: 90,
        }
    }
}

impl SettingsForm {
    /// Advance an option field to its next value, or flip a toggle.
    /// Returns false for fields that cannot be cycled.
    pub fn cycle(&mut self, field: SettingField) -> bool {
        match field {
            SettingField::Timezone => {
                self.timezone = next_in(&TIMEZONES, self.timezone.as_str()).to_string();
            }
            SettingField::Language => {
                self.language = next_in(&LANGUAGES, self.language.as_str()).to_string();
            }
            SettingField::PasswordPolicy => self.password_policy = self.password_policy.next(),
            SettingField::SessionTimeout => self.adjust_timeout(5),
            SettingField::TwoFactor => self.two_factor = !self.two_factor,
            SettingField::EmailNotification => self.email_notification = !self.email_notification,
            SettingField::SmsNotification => self.sms_notification = !self.sms_notification,
            SettingField::DataRetention => {
                self.data_retention_days = next_in(&RETENTION_DAYS, self.data_retention_days);
            }
            SettingField::SystemName | SettingField::EmailServer => return false,
        }
        true
    }

    /// Step the session timeout, clamped to the allowed range
    pub fn adjust_timeout(&mut self, delta: i32) {
        let next = self.session_timeout_minutes as i64 + delta as i64;
        self.session_timeout_minutes =
            next.clamp(SESSION_TIMEOUT_MIN as i64, SESSION_TIMEOUT_MAX as i64) as u32;
    }

    pub fn display(&self, field: SettingField) -> String {
        match field {
            SettingField::SystemName => self.system_name.clone(),
            SettingField::Timezone => self.timezone.clone(),
            SettingField::Language => match self.language.as_str() {
                "zh-CN" => "中文 (zh-CN)".to_string(),
                "en-US" => "English (en-US)".to_string(),
                other => other.to_string(),
            },
            SettingField::PasswordPolicy => self.password_policy.describe().to_string(),
            SettingField::SessionTimeout => format!("{} min", self.session_timeout_minutes),
            SettingField::TwoFactor => checkbox(self.two_factor),
            SettingField::EmailNotification => checkbox(self.email_notification),
            SettingField::EmailServer => self.email_server.clone(),
            SettingField::SmsNotification => checkbox(self.sms_notification),
            SettingField::DataRetention => format!("{} days", self.data_retention_days),
        }
    }
}

fn next_in<T: PartialEq + Copy>(options: &[T], current: T) -> T {
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    options[(idx + 1) % options.len()]
}

fn checkbox(on: bool) -> String {
    let mark = if on { "[x]" } else { "[ ]" };
    mark.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let form = SettingsForm::default();
        assert_eq!(form.timezone, "Asia/Shanghai");
        assert_eq!(form.password_policy, PasswordPolicy::Medium);
        assert_eq!(form.session_timeout_minutes, 30);
        assert_eq!(form.data_retention_days, 90);
        assert!(form.two_factor);
        assert!(!form.sms_notification);
    }

    #[test]
    fn test_cycle_wraps_options() {
        let mut form = SettingsForm::default();
        for _ in 0..TIMEZONES.len() {
            assert!(form.cycle(SettingField::Timezone));
        }
        assert_eq!(form.timezone, "Asia/Shanghai");

        form.cycle(SettingField::DataRetention);
        assert_eq!(form.data_retention_days, 180);
        form.cycle(SettingField::DataRetention);
        form.cycle(SettingField::DataRetention);
        assert_eq!(form.data_retention_days, 30);
    }

    #[test]
    fn test_text_fields_do_not_cycle() {
        let mut form = SettingsForm::default();
        assert!(!form.cycle(SettingField::SystemName));
        assert!(!form.cycle(SettingField::EmailServer));
        assert_eq!(form, SettingsForm::default());
    }

    #[test]
    fn test_timeout_is_clamped() {
        let mut form = SettingsForm::default();
        form.adjust_timeout(500);
        assert_eq!(form.session_timeout_minutes, SESSION_TIMEOUT_MAX);
        form.adjust_timeout(-500);
        assert_eq!(form.session_timeout_minutes, SESSION_TIMEOUT_MIN);
    }
}
