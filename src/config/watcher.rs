//! Routes file watcher for hot reload.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RouterConfig;
use crate::observability::metrics;

/// Monitors the routes file and emits each valid new configuration.
pub struct ConfigWatcher<T> {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterConfig<T>>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> ConfigWatcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterConfig<T>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
                _payload: PhantomData,
            },
            update_rx,
        )
    }

    /// Start watching the file. Dropping the returned handle stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = ?path, "Routes file change detected, reloading");
                    match load_config::<T>(&path) {
                        Ok(config) => {
                            forward(&tx, config);
                        }
                        Err(e) => {
                            metrics::record_reload("rejected");
                            tracing::error!(
                                error = %e,
                                "Failed to reload routes. Keeping current table."
                            );
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Routes watcher started");
        Ok(watcher)
    }
}

/// Hand a reloaded configuration to the table owner.
///
/// Returns `false` when the receiver has been dropped.
fn forward<T>(tx: &mpsc::UnboundedSender<RouterConfig<T>>, config: RouterConfig<T>) -> bool {
    match tx.send(config) {
        Ok(()) => true,
        Err(_) => {
            tracing::debug!("Route table receiver gone; reload dropped");
            false
        }
    }
}
