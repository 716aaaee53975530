//! Config file watcher.
//! Sends a reload signal whenever the controller config is written.

use std::path::Path;
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::time::Duration;

use log::{debug, info};
use notify::{EventKind, RecursiveMode, Watcher};

/// Watch `path` and send `()` on every modification.
/// Blocks the calling thread until the receiver goes away.
pub fn watch_config(path: &Path, tx: Sender<()>) -> Result<(), String> {
    let (notify_tx, notify_rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res {
            let _ = notify_tx.send(event);
        }
    })
    .map_err(|e| format!("watcher: {e}"))?;

    watcher
        .watch(path, RecursiveMode::NonRecursive)
        .map_err(|e| format!("watch {}: {e}", path.display()))?;

    info!("Watching config file {}", path.display());

    loop {
        match notify_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(event) => {
                if !is_write(&event.kind) {
                    continue;
                }
                debug!("Config changed: {:?}", event.kind);
                if tx.send(()).is_err() {
                    return Ok(());
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                return Err("watcher disconnected".to_string());
            }
        }
    }
}

fn is_write(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_))
}
