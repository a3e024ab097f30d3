use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::text::Line;
use tracing::{debug, info};

use crate::core::{Action, Command, Context, NotifyLevel};
use crate::domain::access::{
    AccessRecord, ActivityEntry, AuthError, DashboardStats, Dataset, Device, ListKind, Member,
    Session,
};
use crate::infrastructure::api::{ApiError, ApiResponse, Method, LOGIN_ENDPOINT};
use crate::modules::login::LoginForm;
use crate::modules::settings::SettingsPanel;
use crate::ui::templates;

pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Loads issued on dashboard entry: stats plus every list
const DASHBOARD_LOADS: usize = 1 + ListKind::ALL.len();

/// The two top-level screens; which one shows depends on the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

/// Sidebar sections of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Overview,
    Devices,
    Users,
    Records,
    Settings,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Overview,
        Section::Devices,
        Section::Users,
        Section::Records,
        Section::Settings,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Overview => "dashboard",
            Section::Devices => "devices",
            Section::Users => "users",
            Section::Records => "records",
            Section::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Dashboard",
            Section::Devices => "Devices",
            Section::Users => "Users",
            Section::Records => "Access Records",
            Section::Settings => "Settings",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Section::Overview => '1',
            Section::Devices => '2',
            Section::Users => '3',
            Section::Records => '4',
            Section::Settings => '5',
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.iter().copied().find(|section| section.id() == id)
    }

    /// The list rendered in this section, if any
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            Section::Overview => Some(ListKind::Activity),
            Section::Devices => Some(ListKind::Devices),
            Section::Users => Some(ListKind::Members),
            Section::Records => Some(ListKind::Records),
            Section::Settings => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub method: Method,
}

pub struct App {
    /// Shared context for modules
    pub ctx: Context,
    pub screen: Screen,
    /// Copy of the active session; the worker owns the persisted one
    pub session: Option<Session>,
    pub login: LoginForm,
    pub settings: SettingsPanel,
    pub active_section: Section,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub stats: Option<DashboardStats>,
    pub activity: Vec<ActivityEntry>,
    pub devices: Vec<Device>,
    pub members: Vec<Member>,
    pub records: Vec<AccessRecord>,
    /// Rendered rows per list; a container only exists while the dashboard is mounted
    containers: BTreeMap<ListKind, Vec<Line<'static>>>,
    pub selected: usize,
    pub loads_outstanding: usize,
    /// Bumped per reload; load results from older generations are dropped
    pub load_generation: u64,
    pub last_api: Option<String>,
    pub status: Option<StatusMessage>,
    pub message_ttl: Duration,
    pub export_dir: PathBuf,
    pub pending_login: Option<LoginRequest>,
    pub pending_logout: bool,
    pub pending_dashboard_load: bool,
    pub pending_api: Option<ApiRequest>,
    pub help_open: bool,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            ctx: Context::new(),
            screen: Screen::Login,
            session: None,
            login: LoginForm::new(),
            settings: SettingsPanel::new(),
            active_section: Section::Overview,
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            stats: None,
            activity: Vec::new(),
            devices: Vec::new(),
            members: Vec::new(),
            records: Vec::new(),
            containers: BTreeMap::new(),
            selected: 0,
            loads_outstanding: 0,
            load_generation: 0,
            last_api: None,
            status: None,
            message_ttl: DEFAULT_MESSAGE_TTL,
            export_dir: PathBuf::from(".gatehouse").join("exports"),
            pending_login: None,
            pending_logout: false,
            pending_dashboard_load: false,
            pending_api: None,
            help_open: false,
            should_quit: false,
        }
    }

    /// Pick the first screen from a restored session
    pub fn start(&mut self, restored: Option<Session>) {
        match restored {
            Some(session) => {
                let name = session.user.username.clone();
                self.sign_in(session);
                self.set_status(format!("Welcome back, {name}"), StatusLevel::Info);
            }
            None => self.screen = Screen::Login,
        }
    }

    fn sign_in(&mut self, session: Session) {
        self.ctx = Context::from_session(Some(&session));
        self.session = Some(session);
        self.login.reset();
        self.enter_dashboard();
    }

    /// Show the dashboard and request every dataset once
    pub fn enter_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
        self.input_mode = InputMode::Normal;
        self.mount_containers();
        self.set_section(Section::Overview);
        self.request_reload();
    }

    /// Re-fetch every dataset. Section switches never do this.
    pub fn request_reload(&mut self) {
        if self.screen != Screen::Dashboard {
            return;
        }
        self.load_generation += 1;
        self.pending_dashboard_load = true;
        self.loads_outstanding = DASHBOARD_LOADS;
    }

    pub fn is_loading(&self) -> bool {
        self.loads_outstanding > 0
    }

    /// End the session locally and ask the worker to clear the stored one
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(user = %session.user.username, "signing out");
        }
        self.ctx = Context::new();
        self.screen = Screen::Login;
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
        self.help_open = false;
        self.unmount_containers();
        self.stats = None;
        self.activity.clear();
        self.devices.clear();
        self.members.clear();
        self.records.clear();
        self.loads_outstanding = 0;
        self.last_api = None;
        self.settings.discard();
        self.login.reset();
        self.pending_dashboard_load = false;
        self.pending_api = None;
        self.pending_logout = true;
        self.set_status("Signed out", StatusLevel::Info);
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    /// Drop the status message once it has been visible for the TTL
    pub fn clear_expired_status(&mut self, now: Instant) {
        if let Some(status) = self.status.as_ref() {
            if now.saturating_duration_since(status.since) >= self.message_ttl {
                self.status = None;
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.clear_expired_status(Instant::now());
    }

    /// Activate the section with `id`; unknown ids leave everything as is
    pub fn switch_section(&mut self, id: &str) {
        let Some(section) = Section::from_id(id) else {
            debug!(id, "ignoring unknown section");
            return;
        };
        self.set_section(section);
    }

    pub fn set_section(&mut self, section: Section) {
        if self.active_section == Section::Settings && section != Section::Settings {
            self.settings.editing = false;
        }
        self.active_section = section;
        self.selected = 0;
    }

    pub fn is_section_active(&self, id: &str) -> bool {
        self.active_section.id() == id
    }

    pub fn cycle_section(&mut self, forward: bool) {
        let index = Section::ALL
            .iter()
            .position(|section| *section == self.active_section)
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % Section::ALL.len()
        } else {
            (index + Section::ALL.len() - 1) % Section::ALL.len()
        };
        self.set_section(Section::ALL[next]);
    }

    fn mount_containers(&mut self) {
        for kind in ListKind::ALL {
            self.containers.entry(kind).or_default().clear();
        }
    }

    fn unmount_containers(&mut self) {
        self.containers.clear();
    }

    /// Replace the contents of `container` with one rendered row per item,
    /// in input order. A container that is not mounted is left alone.
    pub fn render_list<T>(
        &mut self,
        container: ListKind,
        items: &[T],
        template: impl Fn(&T) -> Line<'static>,
    ) {
        let Some(entries) = self.containers.get_mut(&container) else {
            return;
        };
        entries.clear();
        entries.extend(items.iter().map(template));
    }

    pub fn container(&self, kind: ListKind) -> Option<&[Line<'static>]> {
        self.containers.get(&kind).map(Vec::as_slice)
    }

    pub fn list_len(&self) -> usize {
        self.active_section
            .list_kind()
            .and_then(|kind| self.container(kind))
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    pub fn move_selection(&mut self, down: bool) {
        let len = self.list_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(len - 1)
        } else {
            self.selected.saturating_sub(1)
        };
    }

    pub fn set_list_selection(&mut self, selection: usize) {
        let len = self.list_len();
        self.selected = selection.min(len.saturating_sub(1));
    }

    pub fn apply_logged_in(&mut self, session: Session) {
        let name = session.user.username.clone();
        self.sign_in(session);
        self.set_status(format!("Signed in as {name}"), StatusLevel::Info);
    }

    pub fn apply_login_rejected(&mut self, error: AuthError) {
        self.login.rejected();
        self.set_status(error.to_string(), StatusLevel::Error);
    }

    /// The login request never reached the worker; unlock the form
    pub fn apply_login_unsent(&mut self, message: String) {
        self.login.rejected();
        self.set_status(message, StatusLevel::Error);
    }

    pub fn apply_logged_out(&mut self) {
        debug!("stored session cleared");
    }

    fn accepts_load(&self, generation: u64) -> bool {
        self.screen == Screen::Dashboard && generation == self.load_generation
    }

    pub fn apply_stats(&mut self, generation: u64, stats: DashboardStats) {
        if !self.accepts_load(generation) {
            debug!(generation, current = self.load_generation, "dropping stale stats");
            return;
        }
        self.loads_outstanding = self.loads_outstanding.saturating_sub(1);
        self.stats = Some(stats);
    }

    /// Store a loaded list and render it into its container
    pub fn apply_dataset(&mut self, generation: u64, dataset: Dataset) {
        if !self.accepts_load(generation) {
            debug!(
                list = dataset.kind().title(),
                generation,
                current = self.load_generation,
                "dropping stale list"
            );
            return;
        }
        self.loads_outstanding = self.loads_outstanding.saturating_sub(1);
        match dataset {
            Dataset::Activity(items) => {
                self.render_list(ListKind::Activity, &items, templates::activity_line);
                self.activity = items;
            }
            Dataset::Devices(items) => {
                self.render_list(ListKind::Devices, &items, templates::device_line);
                self.devices = items;
            }
            Dataset::Members(items) => {
                self.render_list(ListKind::Members, &items, templates::member_line);
                self.members = items;
            }
            Dataset::Records(items) => {
                self.render_list(ListKind::Records, &items, templates::record_line);
                self.records = items;
            }
        }
        self.set_list_selection(self.selected);
    }

    pub fn apply_api_result(&mut self, endpoint: String, outcome: Result<ApiResponse, ApiError>) {
        match outcome {
            Ok(response) => {
                let summary = format!("{endpoint} → {}", response.data);
                self.set_status(format!("{endpoint}: ok"), StatusLevel::Info);
                self.last_api = Some(summary);
            }
            Err(err) => {
                self.set_status(format!("{endpoint}: {err}"), StatusLevel::Error);
                self.last_api = Some(format!("{endpoint} → {err}"));
            }
        }
    }

    /// One dashboard load failed; the rest of its batch still counts
    pub fn apply_load_failed(&mut self, generation: u64, message: String) {
        if !self.accepts_load(generation) {
            return;
        }
        self.loads_outstanding = self.loads_outstanding.saturating_sub(1);
        self.set_status(message, StatusLevel::Error);
    }

    /// The worker itself failed; nothing more is coming back
    pub fn apply_runtime_error(&mut self, message: String) {
        self.loads_outstanding = 0;
        self.set_status(message, StatusLevel::Error);
    }

    pub fn take_login_request(&mut self) -> Option<LoginRequest> {
        self.pending_login.take()
    }

    pub fn take_logout_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_logout)
    }

    /// The generation to load, if a reload is pending
    pub fn take_dashboard_load_request(&mut self) -> Option<u64> {
        std::mem::take(&mut self.pending_dashboard_load).then_some(self.load_generation)
    }

    pub fn take_api_request(&mut self) -> Option<ApiRequest> {
        self.pending_api.take()
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_command();
            return;
        }
        let cmd = crate::core::parse_command(&input);
        self.exit_command();
        let action = self.execute_command(&cmd);
        self.apply_action(action);
        self.command.last = Some(input);
    }
}

impl App {
    /// Execute a parsed command
    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Section(id) => Action::Navigate(id.to_string()),
            Command::Go(id) => Action::Navigate(id.clone()),
            Command::Logout => Action::Logout,
            Command::Export => Action::Export,
            Command::Refresh => Action::Refresh,
            Command::Api { endpoint, method } => {
                let method = match method.as_deref() {
                    Some(raw) => match Method::parse(raw) {
                        Some(method) => method,
                        None => {
                            return Action::Notify(
                                format!("Unknown method: {raw}"),
                                NotifyLevel::Warn,
                            )
                        }
                    },
                    None if endpoint == LOGIN_ENDPOINT => Method::Post,
                    None => Method::Get,
                };
                Action::Api {
                    endpoint: endpoint.clone(),
                    method,
                }
            }
            Command::Help => {
                self.help_open = true;
                Action::None
            }
            Command::Quit => Action::Quit,
            Command::Unknown(s) => {
                Action::Notify(format!("Unknown command: {}", s), NotifyLevel::Warn)
            }
        }
    }

    /// Apply an action returned by a command or module
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::SubmitLogin { username, password } => {
                self.pending_login = Some(LoginRequest { username, password });
            }
            Action::Navigate(id) => self.switch_section(&id),
            Action::Notify(msg, level) => self.set_status(msg, level.into()),
            Action::Api { endpoint, method } => {
                self.set_status(
                    format!("{} {endpoint}…", method.as_str()),
                    StatusLevel::Info,
                );
                self.pending_api = Some(ApiRequest { endpoint, method });
            }
            Action::Refresh => {
                self.request_reload();
                self.set_status("Reloading data…", StatusLevel::Info);
            }
            Action::Export => {
                let action = crate::modules::export::export_current_section(self);
                self.apply_action(action);
            }
            Action::Logout => self.logout(),
            Action::Quit => self.should_quit = true,
        }
    }
}
