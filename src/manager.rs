//! Management page for one entity kind: a form next to the list it feeds.
//!
//! Successful saves and deletes reload the list; the list's edit action rehydrates
//! the form.

use crate::client::CatalogClient;
use crate::errors::FormError;
use crate::form::{EntityForm, SubmitOutcome};
use crate::kinds::{DestinationKind, EntityKind, HotelKind};
use crate::list::{Confirm, DeleteOutcome, EntityList};
use crate::models::{destination_choices, DestinationChoice};

/// Message to surface on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice<'a> {
    Error(&'a str),
    Success(&'a str),
}

/// Form plus list for one entity kind.
#[derive(Debug, Clone)]
pub struct EntityManager<K: EntityKind> {
    client: CatalogClient,
    form: EntityForm<K>,
    list: EntityList<K>,
}

pub type DestinationManager = EntityManager<DestinationKind>;
pub type HotelManager = EntityManager<HotelKind>;

impl<K: EntityKind> EntityManager<K> {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            form: EntityForm::new(),
            list: EntityList::new(),
        }
    }

    pub fn form(&self) -> &EntityForm<K> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntityForm<K> {
        &mut self.form
    }

    pub fn list(&self) -> &EntityList<K> {
        &self.list
    }

    /// Initial load when the page is shown.
    pub async fn activate(&mut self) -> bool {
        self.list.load(&self.client).await
    }

    pub async fn reload(&mut self) -> bool {
        self.list.load(&self.client).await
    }

    /// Submit the form; on success the list is reloaded.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<K::Record>, FormError> {
        self.list.clear_messages();
        let outcome = self.form.submit(&self.client).await?;
        if outcome.is_saved() {
            self.list.load(&self.client).await;
        }
        Ok(outcome)
    }

    /// Start editing the loaded record with `id`. Returns false if it is not loaded.
    pub fn edit(&mut self, id: &str) -> bool {
        match self.list.find(id) {
            Some(record) => {
                self.form.start_edit(record);
                true
            }
            None => false,
        }
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&mut self) {
        self.form.reset();
    }

    pub async fn delete<C: Confirm + ?Sized>(&mut self, id: &str, confirm: &mut C) -> DeleteOutcome {
        self.form.clear_messages();
        self.list.clear_messages();
        self.list.delete(&self.client, id, confirm).await
    }

    /// The most relevant message: errors before successes, form before list.
    pub fn notice(&self) -> Option<Notice<'_>> {
        self.form
            .error()
            .or(self.list.error())
            .map(Notice::Error)
            .or_else(|| {
                self.form
                    .success()
                    .or(self.list.success())
                    .map(Notice::Success)
            })
    }
}

impl EntityManager<HotelKind> {
    /// Destinations to offer in the hotel form's picker.
    ///
    /// A failure only logs; the picker is then empty.
    pub async fn load_destination_choices(&self) -> Vec<DestinationChoice> {
        match self.client.list_destinations().await {
            Ok(destinations) => destination_choices(&destinations),
            Err(e) => {
                tracing::error!("Failed to load destinations: {}", e);
                Vec::new()
            }
        }
    }
}
