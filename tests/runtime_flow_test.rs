//! Drive the App against the real worker thread, without a terminal

use std::sync::Arc;
use std::time::{Duration, Instant};

use gatehouse::app::{App, Screen, StatusLevel};
use gatehouse::core::Action;
use gatehouse::domain::access::ListKind;
use gatehouse::infrastructure::api::{ApiError, MockApi, DEFAULT_LATENCY};
use gatehouse::infrastructure::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use gatehouse::infrastructure::{ManualClock, MockProvider};
use gatehouse::store::{MemoryStore, SessionManager};

const WAIT: Duration = Duration::from_secs(5);

fn bridge() -> RuntimeBridge {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let provider = Arc::new(MockProvider::new());
    let sessions = SessionManager::new(Box::new(MemoryStore::new()), provider.clone(), clock.clone());
    let api = MockApi::new(clock, DEFAULT_LATENCY);
    RuntimeBridge::new(sessions, provider, api).expect("start runtime")
}

/// Forward the app's pending requests, the same way the event loop does
fn flush_requests(app: &mut App, runtime: &RuntimeBridge) {
    if app.take_logout_request() {
        runtime.send(RuntimeCommand::Logout).unwrap();
    }
    if let Some(request) = app.take_login_request() {
        runtime
            .send(RuntimeCommand::Login {
                username: request.username,
                password: request.password,
            })
            .unwrap();
    }
    if let Some(generation) = app.take_dashboard_load_request() {
        runtime
            .send(RuntimeCommand::LoadDashboard { generation })
            .unwrap();
    }
    if let Some(request) = app.take_api_request() {
        runtime
            .send(RuntimeCommand::ApiRequest {
                endpoint: request.endpoint,
                method: request.method,
            })
            .unwrap();
    }
}

fn apply(app: &mut App, event: RuntimeEvent) {
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
        RuntimeEvent::ApiCompleted { endpoint, outcome } => app.apply_api_result(endpoint, outcome),
        RuntimeEvent::Error { message } => app.apply_runtime_error(message),
    }
}

/// Pump requests and events until `done` holds or the wait runs out
fn pump_until(app: &mut App, runtime: &RuntimeBridge, done: impl Fn(&App) -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    loop {
        flush_requests(app, runtime);
        if done(app) {
            return true;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return false;
        }
        if let Some(event) = runtime.recv_timeout(remaining.min(Duration::from_millis(100))) {
            apply(app, event);
        }
    }
}

fn submit(app: &mut App, username: &str, password: &str) {
    app.apply_action(Action::SubmitLogin {
        username: username.to_string(),
        password: password.to_string(),
    });
}

#[test]
fn test_bad_login_stays_on_login_screen() {
    let runtime = bridge();
    let mut app = App::new();
    app.start(None);

    submit(&mut app, "admin", "letmein");
    assert!(pump_until(&mut app, &runtime, |app| app.status.is_some()));
    assert_eq!(app.screen, Screen::Login);
    assert_eq!(
        app.status_text(),
        Some(("Invalid username or password", StatusLevel::Error))
    );
    assert!(!app.login.submitting);
}

#[test]
fn test_login_loads_every_dataset() {
    let runtime = bridge();
    let mut app = App::new();
    app.start(None);

    submit(&mut app, "admin", "admin123");
    assert!(pump_until(&mut app, &runtime, |app| {
        app.screen == Screen::Dashboard && !app.is_loading()
    }));

    assert!(app.is_section_active("dashboard"));
    assert_eq!(app.stats.as_ref().map(|s| s.today_access), Some(128));
    assert_eq!(app.container(ListKind::Activity).map(<[_]>::len), Some(5));
    assert_eq!(app.container(ListKind::Devices).map(<[_]>::len), Some(4));
    assert_eq!(app.container(ListKind::Members).map(<[_]>::len), Some(4));
    assert_eq!(app.container(ListKind::Records).map(<[_]>::len), Some(5));

    // Switching sections works from what is already loaded
    app.switch_section("records");
    flush_requests(&mut app, &runtime);
    assert!(runtime.recv_timeout(Duration::from_millis(200)).is_none());
    assert_eq!(app.records.len(), 5);
}

#[test]
fn test_logout_then_login_again() {
    let runtime = bridge();
    let mut app = App::new();
    app.start(None);

    submit(&mut app, "admin", "admin123");
    assert!(pump_until(&mut app, &runtime, |app| {
        app.screen == Screen::Dashboard && !app.is_loading()
    }));

    app.apply_action(Action::Logout);
    assert_eq!(app.screen, Screen::Login);
    assert!(app.container(ListKind::Devices).is_none());

    submit(&mut app, "admin", "admin123");
    assert!(pump_until(&mut app, &runtime, |app| {
        app.screen == Screen::Dashboard && !app.is_loading()
    }));
    assert_eq!(app.devices.len(), 4);
}

#[test]
fn test_api_stub_round_trip() {
    let runtime = bridge();

    runtime
        .send(RuntimeCommand::ApiRequest {
            endpoint: "/api/dashboard/stats".to_string(),
            method: gatehouse::infrastructure::api::Method::Get,
        })
        .unwrap();
    match runtime.recv_timeout(WAIT) {
        Some(RuntimeEvent::ApiCompleted { endpoint, outcome }) => {
            assert_eq!(endpoint, "/api/dashboard/stats");
            let response = outcome.unwrap();
            assert!(response.success);
            assert_eq!(response.data["registeredUsers"], 156);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    runtime
        .send(RuntimeCommand::ApiRequest {
            endpoint: "/api/doors".to_string(),
            method: gatehouse::infrastructure::api::Method::Get,
        })
        .unwrap();
    match runtime.recv_timeout(WAIT) {
        Some(RuntimeEvent::ApiCompleted { outcome, .. }) => {
            let err = outcome.unwrap_err();
            assert!(matches!(err, ApiError::EndpointNotFound { .. }));
            assert_eq!(err.to_string(), "Endpoint not found");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
