use costs_core::{Session, SessionInput};
use tracing::info;

use crate::error::Result;
use crate::services::SharedStore;

#[derive(Clone)]
pub struct SessionsService {
    store: SharedStore,
}

impl SessionsService {
    pub(super) fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Coerces the entered fields and stores one session. Zero cost and zero
    /// tokens are accepted.
    pub fn add(&self, input: SessionInput) -> Result<Session> {
        let session = input.into_new_session();
        let stored = self.store.insert_session(&session)?;
        info!(
            id = %stored.id,
            date = %stored.date,
            model = %stored.model,
            cost_usd = stored.cost_usd,
            "session added"
        );
        Ok(stored)
    }
}
