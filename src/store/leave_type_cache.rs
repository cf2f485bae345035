//! Read-through cache of leave type descriptors.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::LeaveType;

use super::LeaveTypeSource;

/// Caches leave type descriptors by name, loading them from a
/// [`LeaveTypeSource`] on first use and again on a miss.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineResult;
/// use leave_engine::models::LeaveType;
/// use leave_engine::store::{LeaveTypeCache, LeaveTypeSource};
///
/// struct Fixed;
///
/// impl LeaveTypeSource for Fixed {
///     fn fetch_leave_types(&self) -> EngineResult<Vec<LeaveType>> {
///         Ok(vec![LeaveType::new("Casual Leave")])
///     }
/// }
///
/// let cache = LeaveTypeCache::new(Fixed);
/// assert_eq!(cache.get("Casual Leave").unwrap().name, "Casual Leave");
/// assert!(cache.get("Sabbatical").is_err());
/// ```
pub struct LeaveTypeCache<S> {
    source: S,
    entries: RwLock<Option<HashMap<String, Arc<LeaveType>>>>,
}

impl<S: LeaveTypeSource> LeaveTypeCache<S> {
    /// Creates an empty cache over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: RwLock::new(None),
        }
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the descriptor for `name`.
    ///
    /// A miss reloads every descriptor from the source once before failing
    /// with `LeaveTypeNotFound`.
    pub fn get(&self, name: &str) -> EngineResult<LeaveType> {
        if let Some(leave_type) = self.lookup(name)? {
            return Ok(leave_type.as_ref().clone());
        }

        self.reload()?;

        self.lookup(name)?
            .map(|leave_type| leave_type.as_ref().clone())
            .ok_or_else(|| EngineError::LeaveTypeNotFound {
                name: name.to_string(),
            })
    }

    /// Drops every cached descriptor.
    pub fn invalidate(&self) -> EngineResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        *entries = None;
        Ok(())
    }

    fn lookup(&self, name: &str) -> EngineResult<Option<Arc<LeaveType>>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.as_ref().and_then(|map| map.get(name).cloned()))
    }

    fn reload(&self) -> EngineResult<()> {
        let leave_types = self.source.fetch_leave_types()?;
        debug!(count = leave_types.len(), "Loaded leave type descriptors");

        let map = leave_types
            .into_iter()
            .map(|leave_type| (leave_type.name.clone(), Arc::new(leave_type)))
            .collect();

        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        *entries = Some(map);
        Ok(())
    }
}

fn poisoned() -> EngineError {
    EngineError::StoreError {
        message: "leave type cache lock poisoned".to_string(),
    }
}
