//! Shared application state
//!
//! Everything the handlers share across requests: the loaded model bundle
//! (absent when the artifact failed to load), the two append-only stores and
//! the doctor directory. All of it is read-only after startup except the
//! stores, which serialize their own appends.

use std::sync::Arc;

use crate::config::Config;
use crate::logic::model::ModelBundle;
use crate::storage::doctors::DoctorDirectory;
use crate::storage::history::{BookingStore, RegistryStore};
use crate::storage::JsonlStore;

#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<ModelBundle>>,
    pub registry: Arc<RegistryStore>,
    pub bookings: Arc<BookingStore>,
    pub doctors: Arc<DoctorDirectory>,
}

impl AppState {
    /// Assemble the shared state from the loaded (or absent) model and the
    /// configured data directory.
    pub fn new(model: Option<Arc<ModelBundle>>, config: &Config) -> Self {
        Self {
            model,
            registry: Arc::new(JsonlStore::new(config.registry_path())),
            bookings: Arc::new(JsonlStore::new(config.bookings_path())),
            doctors: Arc::new(DoctorDirectory::load_or_seed(&config.doctors_path())),
        }
    }
}
