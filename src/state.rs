use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::Mutex;

use crate::config::AppConfig;
use crate::services::auth::Authenticator;
use crate::services::gateway::PersistenceGateway;
use crate::services::icons::IconProvider;
use crate::store::CatalogStore;
use crate::view::ViewState;

pub struct AppState {
    pub store: Mutex<CatalogStore>,
    pub config: AppConfig,
    pub gateway: Box<dyn PersistenceGateway>,
    pub icons: Box<dyn IconProvider>,
    pub auth: Box<dyn Authenticator>,
    /// Session token -> navigation state. Admin endpoints accept only tokens
    /// of sessions whose view state carries the admin flag.
    pub sessions: Mutex<HashMap<String, ViewState>>,
    /// Number of gateway calls in flight; the UI shows a syncing indicator
    /// while it is non-zero.
    pub in_flight: AtomicUsize,
}

impl AppState {
    pub fn syncing(&self) -> bool {
        self.in_flight.load(std::sync::atomic::Ordering::SeqCst) > 0
    }
}

/// RAII guard for the syncing indicator, so the counter drops on every exit
/// path of a handler.
pub struct SyncGuard<'a> {
    state: &'a AppState,
}

impl<'a> SyncGuard<'a> {
    pub fn begin(state: &'a AppState) -> Self {
        state
            .in_flight
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Self { state }
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.state
            .in_flight
            .fetch_sub(1, std::sync::atomic::Ordering::SeqCst);
    }
}
