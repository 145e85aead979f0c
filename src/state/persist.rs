use crate::state::messages::{PersistRequest, PersistResponse};
use kickoff_core::kv::{KeyValueStore, StoreError, WritePort};
use log::{debug, error};
use std::sync::Arc;
use tokio::sync::mpsc;

pub const ERROR_CHAR: char = '!';
const SAVING_CHAR: char = '⠿';

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SaveState {
    pub is_saving: bool,
    pub indicator: char,
}

impl Default for SaveState {
    fn default() -> Self {
        Self { is_saving: false, indicator: ' ' }
    }
}

/// Front half of the persistence channel. Handed to the stores as their
/// write port; never blocks the caller.
#[derive(Debug, Clone)]
pub struct PersistHandle {
    requests: mpsc::Sender<PersistRequest>,
}

impl PersistHandle {
    pub fn new(requests: mpsc::Sender<PersistRequest>) -> Self {
        Self { requests }
    }

    fn submit(&self, request: PersistRequest) {
        if let Err(e) = self.requests.try_send(request) {
            error!("dropped persistence request: {e}");
        }
    }
}

impl WritePort for PersistHandle {
    fn write(&self, key: &str, value: String) {
        self.submit(PersistRequest::Write { key: key.to_string(), value });
    }

    fn remove(&self, key: &str) {
        self.submit(PersistRequest::Remove { key: key.to_string() });
    }
}

/// Applies queued writes to the backing store in submission order.
pub struct PersistWorker {
    store: Arc<dyn KeyValueStore>,
    requests: mpsc::Receiver<PersistRequest>,
    responses: mpsc::Sender<PersistResponse>,
}

impl PersistWorker {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        requests: mpsc::Receiver<PersistRequest>,
        responses: mpsc::Sender<PersistResponse>,
    ) -> Self {
        Self { store, requests, responses }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let result = match request {
                PersistRequest::Write { key, value } => {
                    debug!("writing {key} ({} bytes)", value.len());
                    self.report(SaveState { is_saving: true, indicator: SAVING_CHAR }).await;
                    self.store.set(&key, &value)
                }
                PersistRequest::Remove { key } => {
                    debug!("removing {key}");
                    self.report(SaveState { is_saving: true, indicator: SAVING_CHAR }).await;
                    self.store.remove(&key)
                }
                PersistRequest::Shutdown => {
                    debug!("persistence worker shutting down");
                    break;
                }
            };

            if !self.finish(result).await {
                break;
            }
        }
    }

    async fn report(&self, save_state: SaveState) {
        let _ = self.responses.send(PersistResponse::SaveStateChanged { save_state }).await;
    }

    /// Returns false once the UI side has gone away.
    async fn finish(&self, result: Result<(), StoreError>) -> bool {
        let indicator = if result.is_ok() { ' ' } else { ERROR_CHAR };
        self.report(SaveState { is_saving: false, indicator }).await;

        if let Err(err) = result {
            error!("{err}");
            let message = err.to_string();
            if let Err(e) = self.responses.send(PersistResponse::Error { message }).await {
                error!("Failed to send persistence response: {e}");
                return false;
            }
        }
        true
    }
}
