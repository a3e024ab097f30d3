use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{error, info, warn};

use gatehouse::app::{App, InputMode, Screen, Section, StatusLevel};
use gatehouse::config::{self, Config};
use gatehouse::core::{dispatch_key, Action};
use gatehouse::infrastructure::api::MockApi;
use gatehouse::infrastructure::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use gatehouse::infrastructure::{Clock, DataProvider, MockProvider, SystemClock};
use gatehouse::logging;
use gatehouse::store::{self, SessionManager};
use gatehouse::ui;
use gatehouse::ui::layout::{rect_contains, rect_inner};

#[derive(Debug, Parser)]
#[command(
    name = "gatehouse",
    version,
    about = "Gatehouse: a terminal console for access-control systems"
)]
struct Args {
    /// Config file (defaults to ~/.config/gatehouse/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite file holding the persisted session
    #[arg(long)]
    session_db: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Log filter, e.g. "debug" or "gatehouse=trace"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = apply_args(config::load(args.config.as_deref()), &args);

    if let Some(log_path) = config.log_path() {
        if let Err(err) = logging::init(&log_path, &config.log.level) {
            eprintln!("file logging disabled: {err:#}");
        }
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting gatehouse");

    let provider: Arc<dyn DataProvider> = Arc::new(MockProvider::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut sessions = SessionManager::new(
        store::open_session_store(&config),
        provider.clone(),
        clock.clone(),
    );
    let restored = sessions.restore_session();

    let api = MockApi::new(clock, config.api_latency());
    let runtime = RuntimeBridge::new(sessions, provider, api)?;

    let mut app = App::new();
    app.message_ttl = config.message_ttl();
    app.export_dir = config.export_dir();
    app.start(restored);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime, config.tick_rate());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %format!("{err:#}"), "event loop failed");
        eprintln!("{err:?}");
    }
    info!("gatehouse stopped");

    Ok(())
}

/// CLI flags win over the config file
fn apply_args(mut config: Config, args: &Args) -> Config {
    if let Some(level) = args.log_level.clone() {
        config.log.level = level;
    }
    if let Some(path) = args.session_db.as_ref() {
        config.session.db_path = Some(path.display().to_string());
    }
    if args.ephemeral {
        config.session.ephemeral = true;
    }
    config
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_background(&mut app, &runtime);
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    // Process runtime events
    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::LoggedIn { session } => app.apply_logged_in(session),
            RuntimeEvent::LoginRejected { error } => app.apply_login_rejected(error),
            RuntimeEvent::LoggedOut => app.apply_logged_out(),
            RuntimeEvent::StatsLoaded { generation, stats } => app.apply_stats(generation, stats),
            RuntimeEvent::ListLoaded {
                generation,
                dataset,
            } => app.apply_dataset(generation, dataset),
            RuntimeEvent::LoadFailed {
                generation,
                message,
            } => app.apply_load_failed(generation, message),
            RuntimeEvent::ApiCompleted { endpoint, outcome } => {
                app.apply_api_result(endpoint, outcome)
            }
            RuntimeEvent::Error { message } => app.apply_runtime_error(message),
        }
    }

    // Process pending commands; a logout always goes out before a new login
    let mut commands = Vec::new();
    if app.take_logout_request() {
        commands.push(RuntimeCommand::Logout);
    }
    if let Some(request) = app.take_login_request() {
        commands.push(RuntimeCommand::Login {
            username: request.username,
            password: request.password,
        });
    }
    if let Some(generation) = app.take_dashboard_load_request() {
        commands.push(RuntimeCommand::LoadDashboard { generation });
    }
    if let Some(request) = app.take_api_request() {
        commands.push(RuntimeCommand::ApiRequest {
            endpoint: request.endpoint,
            method: request.method,
        });
    }
    for cmd in commands {
        let is_login = matches!(cmd, RuntimeCommand::Login { .. });
        if let Err(err) = runtime.send(cmd) {
            warn!(error = %err, "dropping command");
            if is_login {
                app.apply_login_unsent(err.to_string());
            } else {
                app.set_status(err.to_string(), StatusLevel::Error);
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.screen == Screen::Login {
        let action = dispatch_key(&mut app.login, key, &mut app.ctx);
        app.apply_action(action);
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Normal if app.settings.captures_input() => {
            let action = dispatch_key(&mut app.settings, key, &mut app.ctx);
            app.apply_action(action);
        }
        InputMode::Normal => handle_normal_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        (KeyCode::Char('q'), _) => app.should_quit = true,
        (KeyCode::Char('?'), _) => app.help_open = true,
        (KeyCode::Char(':'), _) => app.enter_command(),
        (KeyCode::Char('L'), _) => app.apply_action(Action::Logout),
        (KeyCode::Char('e'), _) => app.apply_action(Action::Export),
        (KeyCode::Char('r'), _) => app.apply_action(Action::Refresh),
        (KeyCode::Char('['), _) => app.cycle_section(false),
        (KeyCode::Char(']'), _) => app.cycle_section(true),
        (KeyCode::Char(ch @ '1'..='5'), _) => {
            if let Some(section) = Section::ALL.iter().find(|s| s.shortcut() == ch) {
                app.set_section(*section);
            }
        }
        _ if app.active_section == Section::Settings => {
            let action = dispatch_key(&mut app.settings, key, &mut app.ctx);
            app.apply_action(action);
        }
        (KeyCode::Up | KeyCode::Char('k'), _) => app.move_selection(false),
        (KeyCode::Down | KeyCode::Char('j'), _) => app.move_selection(true),
        (KeyCode::Home, _) => app.set_list_selection(0),
        (KeyCode::End, _) => app.set_list_selection(usize::MAX),
        _ => {}
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.screen != Screen::Dashboard || app.help_open || app.input_mode == InputMode::Command {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };
    let areas = ui::layout::areas(size);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_click(app, areas, mouse.column, mouse.row)
        }
        MouseEventKind::ScrollUp => app.move_selection(false),
        MouseEventKind::ScrollDown => app.move_selection(true),
        _ => {}
    }
}

fn handle_click(app: &mut App, areas: ui::layout::UiAreas, col: u16, row: u16) {
    if !rect_contains(areas.sidebar, col, row) {
        return;
    }
    let inner = rect_inner(areas.sidebar);
    if !rect_contains(inner, col, row) {
        return;
    }
    let idx = (row - inner.y) as usize;
    if let Some(section) = Section::ALL.get(idx).copied() {
        app.switch_section(section.id());
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
