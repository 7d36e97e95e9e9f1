use api_types::{
    Id,
    category::Category,
    operation::Operation,
    stats::{Balance, Report},
};

use crate::{
    EngineError, Filter, OperationDraft, ResultEngine, Store, balance, commands, report,
};

/// Finance tracker service over an injected [`Store`].
///
/// Holds no data of its own: every call fetches the snapshot it needs and
/// computes into local values.
#[derive(Debug, Clone)]
pub struct Tracker<S> {
    store: S,
}

impl<S: Store> Tracker<S> {
    /// Return a builder for `Tracker`. Help to build the struct.
    pub fn builder() -> TrackerBuilder<S> {
        TrackerBuilder { store: None }
    }

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Operations matching `filter`, or an empty list when the store fails.
    pub async fn list_operations(&self, filter: &Filter) -> Vec<Operation> {
        match self.store.list_operations(filter).await {
            Ok(operations) => operations,
            Err(err) => {
                tracing::error!("error fetching operations: {err}");
                Vec::new()
            }
        }
    }

    /// Every category, or an empty list when the store fails.
    pub async fn list_categories(&self) -> Vec<Category> {
        match self.store.list_categories().await {
            Ok(categories) => categories,
            Err(err) => {
                tracing::error!("error fetching categories: {err}");
                Vec::new()
            }
        }
    }

    /// Totals over the complete operation set.
    pub async fn calculate_balance(&self) -> Balance {
        let operations = self.list_operations(&Filter::default()).await;
        balance::calculate_balance(&operations)
    }

    /// Category and month aggregates over the complete operation set.
    pub async fn generate_reports(&self) -> Report {
        let operations = self.list_operations(&Filter::default()).await;
        let categories = self.list_categories().await;
        tracing::debug!(
            operations = operations.len(),
            categories = categories.len(),
            "building report"
        );
        report::build_report(&operations, &categories)
    }

    pub async fn add_operation(&self, draft: &OperationDraft) -> ResultEngine<Operation> {
        let payload = draft.validate()?;
        let created = self.store.create_operation(&payload).await?;
        tracing::info!(id = %created.id, "operation added");
        Ok(created)
    }

    pub async fn edit_operation(
        &self,
        id: &Id,
        draft: &OperationDraft,
    ) -> ResultEngine<Operation> {
        let payload = draft.validate()?;
        let updated = self.store.update_operation(id, &payload).await?;
        tracing::info!(%id, "operation updated");
        Ok(updated)
    }

    pub async fn delete_operation(&self, id: &Id) -> ResultEngine<()> {
        self.store.remove_operation(id).await?;
        tracing::info!(%id, "operation deleted");
        Ok(())
    }

    pub async fn add_category(&self, name: &str) -> ResultEngine<Category> {
        let payload = commands::category_payload(name)?;
        let created = self.store.create_category(&payload).await?;
        tracing::info!(id = %created.id, "category added");
        Ok(created)
    }

    pub async fn edit_category(&self, id: &Id, name: &str) -> ResultEngine<Category> {
        let payload = commands::category_payload(name)?;
        let updated = self.store.update_category(id, &payload).await?;
        tracing::info!(%id, "category renamed");
        Ok(updated)
    }

    /// Remove a category that no operation references.
    ///
    /// Fails with [`EngineError::CategoryInUse`] when at least one operation points
    /// at `id`; the store is then left untouched. A failure while checking for
    /// references aborts the delete as well.
    pub async fn delete_category(&self, id: &Id) -> ResultEngine<()> {
        let referencing = self
            .store
            .list_operations(&Filter::for_category(id.clone()))
            .await?;
        if referencing
            .iter()
            .any(|op| op.category.as_ref() == Some(id))
        {
            tracing::warn!(%id, "refusing to delete category still in use");
            return Err(EngineError::category_in_use());
        }

        self.store.remove_category(id).await?;
        tracing::info!(%id, "category deleted");
        Ok(())
    }
}

/// The builder for `Tracker`
pub struct TrackerBuilder<S> {
    store: Option<S>,
}

impl<S: Store> TrackerBuilder<S> {
    /// Pass the required store
    pub fn store(mut self, store: S) -> TrackerBuilder<S> {
        self.store = Some(store);
        self
    }

    /// Construct `Tracker`
    pub fn build(self) -> ResultEngine<Tracker<S>> {
        let store = self
            .store
            .ok_or_else(|| EngineError::Validation("a store is required".to_string()))?;
        Ok(Tracker { store })
    }
}
