//! Application state for the Leave Policy Allocation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::service::AllocationService;
use crate::store::InMemoryStore;

/// The allocation service the API runs against.
pub type LeaveService = AllocationService<InMemoryStore, ConfigLoader>;

/// Shared application state.
///
/// Holds the allocation service, whose store is seeded from the loaded
/// configuration.
#[derive(Clone)]
pub struct AppState {
    service: Arc<LeaveService>,
}

impl AppState {
    /// Creates application state from a loaded configuration.
    ///
    /// The configured policies, periods and employees are loaded into a fresh
    /// in-memory store; leave types are read from the configuration.
    pub fn new(config: ConfigLoader) -> EngineResult<Self> {
        let store = InMemoryStore::new();
        config.seed_store(&store)?;
        let precision = config.settings().float_precision;

        Ok(Self::from_service(AllocationService::new(
            store, config, precision,
        )))
    }

    /// Creates application state around an existing service.
    pub fn from_service(service: LeaveService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns the allocation service.
    pub fn service(&self) -> &LeaveService {
        &self.service
    }
}
