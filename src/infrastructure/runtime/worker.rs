//! Async worker - runs in Tokio runtime and owns the session manager

use std::sync::mpsc::Sender;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::domain::access::ListKind;
use crate::infrastructure::api::MockApi;
use crate::infrastructure::provider::DataProvider;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};
use crate::store::SessionManager;

/// Run the async worker loop until shutdown or until the bridge is dropped
pub async fn run_async_worker(
    mut sessions: SessionManager,
    provider: Arc<dyn DataProvider>,
    api: Arc<MockApi>,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    info!(provider = provider.name(), "worker started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            RuntimeCommand::Shutdown => break,

            // Session commands run inline so they apply in the order sent
            RuntimeCommand::Login { username, password } => {
                let event = match sessions.login(&username, &password).await {
                    Ok(session) => RuntimeEvent::LoggedIn { session },
                    Err(error) => RuntimeEvent::LoginRejected { error },
                };
                let _ = evt_tx.send(event);
            }

            RuntimeCommand::Logout => {
                sessions.logout();
                let _ = evt_tx.send(RuntimeEvent::LoggedOut);
            }

            RuntimeCommand::LoadDashboard { generation } => {
                let provider = Arc::clone(&provider);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    load_dashboard(provider, generation, evt_tx).await;
                });
            }

            RuntimeCommand::ApiRequest { endpoint, method } => {
                let api = Arc::clone(&api);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let outcome = api.request(&endpoint, method, None).await;
                    if let Err(err) = &outcome {
                        debug!(endpoint = %endpoint, error = %err, "mock api rejected request");
                    }
                    let _ = evt_tx.send(RuntimeEvent::ApiCompleted { endpoint, outcome });
                });
            }
        }
    }

    info!("worker stopped");
    Ok(())
}

/// Fetch stats and all four lists concurrently. Each result is reported on
/// its own; one failing load does not hold back the others.
pub async fn load_dashboard(
    provider: Arc<dyn DataProvider>,
    generation: u64,
    evt_tx: Sender<RuntimeEvent>,
) {
    let (stats, activity, devices, members, records) = futures::join!(
        provider.fetch_stats(),
        provider.fetch_list(ListKind::Activity),
        provider.fetch_list(ListKind::Devices),
        provider.fetch_list(ListKind::Members),
        provider.fetch_list(ListKind::Records),
    );

    match stats {
        Ok(stats) => {
            let _ = evt_tx.send(RuntimeEvent::StatsLoaded { generation, stats });
        }
        Err(err) => {
            warn!(generation, error = %err, "stats load failed");
            let _ = evt_tx.send(RuntimeEvent::LoadFailed {
                generation,
                message: format!("Stats load failed: {err}"),
            });
        }
    }

    let lists = [
        (ListKind::Activity, activity),
        (ListKind::Devices, devices),
        (ListKind::Members, members),
        (ListKind::Records, records),
    ];
    for (kind, result) in lists {
        match result {
            Ok(dataset) => {
                debug!(list = kind.title(), items = dataset.len(), "list loaded");
                let _ = evt_tx.send(RuntimeEvent::ListLoaded { generation, dataset });
            }
            Err(err) => {
                warn!(list = kind.title(), generation, error = %err, "list load failed");
                let _ = evt_tx.send(RuntimeEvent::LoadFailed {
                    generation,
                    message: format!("Loading {} failed: {err}", kind.title()),
                });
            }
        }
    }
}
