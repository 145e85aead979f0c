use crate::state::persist::SaveState;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistRequest {
    Write { key: String, value: String },
    Remove { key: String },
    /// Finish everything queued before this, then stop.
    Shutdown,
}

#[derive(Debug)]
pub enum PersistResponse {
    SaveStateChanged { save_state: SaveState },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
