use costs_core::{Settings, SettingsUpdate};
use tracing::info;

use crate::error::{AppError, Result};
use crate::services::{SharedClock, SharedStore};
use crate::util::time::timestamp;

#[derive(Clone)]
pub struct SettingsService {
    store: SharedStore,
    clock: SharedClock,
}

impl SettingsService {
    pub(super) fn new(store: SharedStore, clock: SharedClock) -> Self {
        Self { store, clock }
    }

    pub fn get(&self) -> Result<Settings> {
        Ok(self.store.settings()?)
    }

    /// Re-reads the singleton id, then writes the new budget by id. The two
    /// calls are not atomic; a concurrent update in between is overwritten.
    pub fn update_budget(&self, monthly_budget: f64) -> Result<Settings> {
        if !monthly_budget.is_finite() {
            return Err(AppError::InvalidInput(
                "monthly_budget must be a finite number".to_string(),
            ));
        }
        let current = self.store.settings()?;
        let update = SettingsUpdate {
            monthly_budget,
            updated_at: timestamp(self.clock.as_ref()),
        };
        let updated = self.store.update_settings(&current.id, &update)?;
        info!(
            previous = current.monthly_budget,
            monthly_budget, "monthly budget updated"
        );
        Ok(updated)
    }
}
