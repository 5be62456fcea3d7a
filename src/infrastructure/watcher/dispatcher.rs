use std::path::PathBuf;
use std::sync::Arc;

use notify::{RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::application::services::ChunkerService;
use crate::domain::repositories::ChunkStore;
use crate::infrastructure::watcher::events::{FileEvent, map_notify_event};

#[derive(Debug)]
pub enum WatchError {
    IoError(String),
    WatcherError(String),
}

impl std::fmt::Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::IoError(msg) => write!(f, "IO error: {}", msg),
            WatchError::WatcherError(msg) => write!(f, "Watcher error: {}", msg),
        }
    }
}

impl std::error::Error for WatchError {}

impl From<notify::Error> for WatchError {
    fn from(e: notify::Error) -> Self {
        WatchError::WatcherError(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Idle,
    Watching,
    Stopping,
    Stopped,
}

/// Owns the watch loop: notify delivers raw notifications on its own thread
/// into an mpsc channel, and a single consumer here routes them — create and
/// modify to the chunker, remove to the store's delete. Per-event failures
/// are logged and the loop keeps going; only Ctrl-C ends it.
pub struct WatchDispatcher {
    root: PathBuf,
    chunk_size: usize,
    chunker: Arc<ChunkerService>,
    store: Arc<dyn ChunkStore>,
    state: DispatcherState,
}

impl WatchDispatcher {
    pub fn new(
        root: PathBuf,
        chunk_size: usize,
        chunker: Arc<ChunkerService>,
        store: Arc<dyn ChunkStore>,
    ) -> Self {
        Self {
            root,
            chunk_size,
            chunker,
            store,
            state: DispatcherState::Idle,
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    /// Watch the root until interrupted. In-flight event handling completes
    /// before the loop exits; events delivered after the interrupt may be
    /// dropped.
    pub async fn run(&mut self) -> Result<(), WatchError> {
        if !self.root.is_dir() {
            warn!("watch directory '{}' does not exist, creating it", self.root.display());
            std::fs::create_dir_all(&self.root).map_err(|e| WatchError::IoError(e.to_string()))?;
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
            // Delivered on the notify backend thread; processing happens on
            // the consumer side of the channel.
            let _ = tx.send(result);
        })?;
        watcher.watch(&self.root, RecursiveMode::Recursive)?;

        self.state = DispatcherState::Watching;
        info!("watching directory '{}'", self.root.display());

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(Ok(event)) => {
                        for file_event in map_notify_event(event) {
                            self.handle_event(file_event).await;
                        }
                    }
                    Some(Err(e)) => warn!("watcher notification error: {}", e),
                    None => {
                        warn!("watcher channel closed");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    self.state = DispatcherState::Stopping;
                    info!("interrupt received, stopping watch loop");
                    break;
                }
            }
        }

        drop(watcher);
        self.state = DispatcherState::Stopped;
        info!("watch loop stopped ({:?})", self.state());
        Ok(())
    }

    async fn handle_event(&self, event: FileEvent) {
        match event {
            FileEvent::Created(path) | FileEvent::Modified(path) => {
                // Directory events are ignored; a path that vanished between
                // notification and handling is skipped the same way.
                if !path.is_file() {
                    return;
                }
                info!("change detected: '{}'", path.display());
                match self.chunker.chunk_file(&path, self.chunk_size).await {
                    Ok(count) => info!("synchronized '{}' ({} chunks)", path.display(), count),
                    Err(e) => error!("failed to chunk '{}': {}", path.display(), e),
                }
            }
            FileEvent::Removed(path) => {
                let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                    return;
                };
                info!("removal detected: '{}'", name);
                match self.store.delete_by_file_name(&name).await {
                    Ok(count) => info!("removed {} chunks of '{}'", count, name),
                    Err(e) => error!("failed to delete chunks of '{}': {}", name, e),
                }
            }
        }
    }
}
