//! Entity list view.
//!
//! Holds the last successfully loaded collection and nothing else authoritative.
//! Reloads replace the collection wholesale; a failed reload keeps the old one.

use crate::client::CatalogClient;
use crate::errors::ClientError;
use crate::form::EntityForm;
use crate::kinds::EntityKind;

/// Explicit confirmation gate in front of destructive calls.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What a delete request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator declined; nothing was sent
    Cancelled,
    Deleted,
    Failed,
}

/// Collection view for one entity kind.
#[derive(Debug, Clone)]
pub struct EntityList<K: EntityKind> {
    items: Vec<K::Record>,
    loading: bool,
    error: Option<String>,
    success: Option<String>,
}

impl<K: EntityKind> Default for EntityList<K> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            success: None,
        }
    }
}

impl<K: EntityKind> EntityList<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[K::Record] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    /// Look up a loaded record by id.
    pub fn find(&self, id: &str) -> Option<&K::Record> {
        self.items.iter().find(|item| K::record_id(item) == Some(id))
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the collection on success; keep it and report on failure.
    pub fn finish_load(&mut self, result: Result<Vec<K::Record>, ClientError>) -> bool {
        self.loading = false;
        match result {
            Ok(items) => {
                tracing::debug!("Loaded {} {}s", items.len(), K::noun());
                self.items = items;
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.user_message(&format!("Failed to load {}s", K::noun())));
                false
            }
        }
    }

    /// Fetch the full collection.
    pub async fn load(&mut self, client: &CatalogClient) -> bool {
        self.begin_load();
        let result = K::list(client).await;
        self.finish_load(result)
    }

    /// Hand `item` to the form for editing.
    pub fn edit(&self, item: &K::Record, form: &mut EntityForm<K>) {
        form.start_edit(item);
    }

    /// Confirmation text shown before a delete.
    pub fn delete_prompt() -> String {
        format!("Are you sure you want to delete this {}?", K::noun())
    }

    /// Delete `id` after confirmation, then reload the collection.
    pub async fn delete<C: Confirm + ?Sized>(
        &mut self,
        client: &CatalogClient,
        id: &str,
        confirm: &mut C,
    ) -> DeleteOutcome {
        if !confirm.confirm(&Self::delete_prompt()) {
            tracing::debug!("Delete of {} {} cancelled", K::noun(), id);
            return DeleteOutcome::Cancelled;
        }

        self.loading = true;
        match K::delete(client, id).await {
            Ok(()) => {
                self.success = Some(format!("{} deleted successfully!", K::LABEL));
                self.load(client).await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.loading = false;
                self.error = Some(e.user_message(&format!("Failed to delete {}", K::noun())));
                DeleteOutcome::Failed
            }
        }
    }
}
