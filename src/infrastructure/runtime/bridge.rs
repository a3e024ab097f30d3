//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! Commands go to the worker over a tokio channel; events come back over a
//! std channel that the UI loop drains without blocking.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use tokio::runtime::Builder;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::error;

use crate::domain::access::{AuthError, DashboardStats, Dataset, Session};
use crate::infrastructure::api::{ApiError, ApiResponse, Method, MockApi};
use crate::infrastructure::provider::DataProvider;
use crate::infrastructure::runtime::worker::run_async_worker;
use crate::store::SessionManager;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Check credentials and start a session
    Login { username: String, password: String },
    /// End the current session
    Logout,
    /// Fetch stats and every list, concurrently, tagged with the UI's load generation
    LoadDashboard { generation: u64 },
    /// Send a request to the simulated API
    ApiRequest { endpoint: String, method: Method },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    LoggedIn { session: Session },
    LoginRejected { error: AuthError },
    LoggedOut,
    StatsLoaded { generation: u64, stats: DashboardStats },
    ListLoaded { generation: u64, dataset: Dataset },
    /// One dashboard load failed
    LoadFailed { generation: u64, message: String },
    ApiCompleted {
        endpoint: String,
        outcome: Result<ApiResponse, ApiError>,
    },
    /// Error occurred
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Start the worker thread. The session manager moves onto the worker and
    /// is only reached through commands from here on.
    pub fn new(
        sessions: SessionManager,
        provider: Arc<dyn DataProvider>,
        api: MockApi,
    ) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let rt = Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("create tokio runtime")?;

        thread::Builder::new()
            .name("gatehouse-worker".to_string())
            .spawn(move || {
                rt.block_on(async {
                    let api = Arc::new(api);
                    if let Err(err) =
                        run_async_worker(sessions, provider, api, cmd_rx, evt_tx.clone()).await
                    {
                        error!(error = %format!("{err:#}"), "worker exited");
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Worker exited: {:#}", err),
                        });
                    }
                });
            })
            .context("spawn worker thread")?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Block up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<RuntimeEvent> {
        self.evt_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
