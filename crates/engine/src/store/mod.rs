//! List state and CRUD actions for each admin collection
//!
//! A store only changes its list after the backend has answered. A failed call
//! leaves `items` exactly as it was and records the error for display.

mod confirm;
mod streak;

#[cfg(test)]
pub(crate) mod fake;

pub use confirm::DeleteConfirmation;
pub use streak::StreakStore;

use crate::forms::RecordForm;
use rewards_admin_core::{Error, Result};
use rewards_admin_networking::{Resource, ResourceApi};
use tracing::{debug, error, info, instrument, warn};

/// Loaded records of one collection plus request state
#[derive(Debug, Clone)]
pub struct Store<R: Resource> {
    items: Vec<R>,
    loading: bool,
    last_error: Option<String>,
}

impl<R: Resource> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> Store<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            last_error: None,
        }
    }

    /// A store pre-filled with records (already loaded elsewhere)
    pub fn with_items(items: Vec<R>) -> Self {
        Self {
            items,
            loading: false,
            last_error: None,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    /// Settle a finished request: clear the loading flag and record the outcome
    fn settle<T>(&mut self, action: &str, result: Result<T>) -> Result<T> {
        self.loading = false;
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => {
                error!("Failed to {} {}: {}", action, R::LABEL, e);
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Reload the whole list
    #[instrument(skip(self, api), fields(resource = R::LABEL))]
    pub async fn refresh<A>(&mut self, api: &A) -> Result<()>
    where
        A: ResourceApi<R> + ?Sized,
    {
        self.loading = true;
        let result = api.list().await;
        let items = self.settle("load", result)?;
        debug!("Loaded {} {} records", items.len(), R::LABEL);
        self.items = items;
        Ok(())
    }

    /// Create a record and append the server's copy
    pub async fn create<A>(&mut self, api: &A, record: &R) -> Result<R>
    where
        A: ResourceApi<R> + ?Sized,
    {
        self.loading = true;
        let result = api.create(record).await;
        let created = self.settle("create", result)?;
        self.items.push(created.clone());
        Ok(created)
    }

    /// Update a record and replace the local copy with the server's
    pub async fn update<A>(&mut self, api: &A, record: &R) -> Result<R>
    where
        A: ResourceApi<R> + ?Sized,
    {
        self.loading = true;
        let result = api.update(record).await;
        let updated = self.settle("update", result)?;
        match self.items.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = updated.clone(),
            None => self.items.push(updated.clone()),
        }
        Ok(updated)
    }

    /// Delete a record and drop it from the list
    pub async fn delete<A>(&mut self, api: &A, id: &str) -> Result<()>
    where
        A: ResourceApi<R> + ?Sized,
    {
        self.loading = true;
        let result = api.delete(id).await;
        self.settle("delete", result)?;
        self.items.retain(|r| r.id() != id);
        Ok(())
    }

    /// Validate a form against the loaded records, then create or update.
    ///
    /// An invalid form never reaches the backend.
    pub async fn submit<A, F>(&mut self, api: &A, form: &F) -> Result<R>
    where
        A: ResourceApi<R> + ?Sized,
        F: RecordForm<Record = R>,
    {
        let record = match form.validate(&self.items) {
            Ok(record) => record,
            Err(errors) => {
                warn!("Rejected {} form: {}", R::LABEL, errors);
                self.last_error = Some(errors.to_string());
                return Err(Error::Validation(errors));
            }
        };

        match form.editing_id() {
            Some(_) => self.update(api, &record).await,
            None => {
                let created = self.create(api, &record).await?;
                info!("Added {} {}", R::LABEL, created.id());
                Ok(created)
            }
        }
    }
}
