//! Read-only hotels-by-destination viewer.
//!
//! The destination list is loaded once on activation. Each selection change issues a
//! hotel fetch tagged with a sequence number; only the response for the newest
//! selection is applied, so a slow answer for an older selection never overwrites a
//! newer one. After teardown no response is applied at all.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::client::CatalogClient;
use crate::errors::ClientError;
use crate::models::{Destination, Hotel};

/// A hotel fetch issued by a selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelRequest {
    pub seq: u64,
    pub destination_id: String,
}

/// State of the cross-filter viewer.
#[derive(Debug, Clone)]
pub struct CrossFilterViewer {
    destinations: Vec<Destination>,
    loading_destinations: bool,
    selected: Option<String>,
    hotels: Vec<Hotel>,
    loading: bool,
    error: Option<String>,
    live: bool,
    seq: u64,
}

impl Default for CrossFilterViewer {
    fn default() -> Self {
        Self {
            destinations: Vec::new(),
            loading_destinations: false,
            selected: None,
            hotels: Vec::new(),
            loading: false,
            error: None,
            live: true,
            seq: 0,
        }
    }
}

impl CrossFilterViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn is_loading_destinations(&self) -> bool {
        self.loading_destinations
    }

    pub fn selected_destination_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The loaded record for the current selection, if there is one.
    pub fn selected_destination(&self) -> Option<&Destination> {
        let selected = self.selected.as_deref()?;
        self.destinations
            .iter()
            .find(|d| d.id.as_deref() == Some(selected))
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn begin_destinations_load(&mut self) {
        self.loading_destinations = true;
    }

    /// Apply the destination list. Ignored once the viewer is torn down.
    pub fn finish_destinations_load(&mut self, result: Result<Vec<Destination>, ClientError>) -> bool {
        if !self.live {
            tracing::debug!("Viewer torn down; dropping destination list");
            return false;
        }
        self.loading_destinations = false;
        match result {
            Ok(destinations) => {
                self.destinations = destinations;
                true
            }
            Err(e) => {
                tracing::error!("loadDestinations error: {}", e);
                self.error = Some(e.user_message("Failed to load destinations"));
                false
            }
        }
    }

    /// Change the selection.
    ///
    /// Clears the shown hotels and any error. An empty id stops there; otherwise the
    /// returned request must be fetched and handed to [`Self::finish_hotels`].
    pub fn select_destination(&mut self, destination_id: &str) -> Option<HotelRequest> {
        self.seq += 1;
        self.error = None;
        self.hotels.clear();

        let destination_id = destination_id.trim();
        if destination_id.is_empty() {
            self.selected = None;
            self.loading = false;
            return None;
        }

        self.selected = Some(destination_id.to_string());
        self.loading = true;
        Some(HotelRequest {
            seq: self.seq,
            destination_id: destination_id.to_string(),
        })
    }

    /// Apply a hotel fetch result if it belongs to the newest selection.
    pub fn finish_hotels(
        &mut self,
        request: &HotelRequest,
        result: Result<Vec<Hotel>, ClientError>,
    ) -> bool {
        if !self.live || request.seq != self.seq {
            tracing::debug!(
                "Discarding stale hotels for destination {} (request {}, current {})",
                request.destination_id,
                request.seq,
                self.seq
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(hotels) => {
                self.hotels = hotels;
                true
            }
            Err(e) => {
                tracing::error!("getHotelsByDestination error: {}", e);
                self.error = Some(e.user_message("Failed to load hotels for this destination"));
                self.hotels.clear();
                false
            }
        }
    }

    /// Stop accepting responses.
    pub fn teardown(&mut self) {
        self.live = false;
    }

    /// Load the destination list in place.
    pub async fn activate(&mut self, client: &CatalogClient) -> bool {
        self.begin_destinations_load();
        let result = client.list_destinations().await;
        self.finish_destinations_load(result)
    }

    /// Select and fetch in place.
    pub async fn select(&mut self, client: &CatalogClient, destination_id: &str) -> bool {
        match self.select_destination(destination_id) {
            Some(request) => {
                let result = client
                    .list_hotels_by_destination(&request.destination_id)
                    .await;
                self.finish_hotels(&request, result)
            }
            None => true,
        }
    }
}

/// Viewer whose fetches run as background tasks, so a new selection can be made while
/// an older fetch is still in flight.
#[derive(Debug, Clone)]
pub struct SharedViewer {
    client: CatalogClient,
    state: Arc<Mutex<CrossFilterViewer>>,
}

impl SharedViewer {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(CrossFilterViewer::new())),
        }
    }

    /// Start loading the destination list.
    pub async fn activate(&self) -> JoinHandle<bool> {
        self.state.lock().await.begin_destinations_load();

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let result = client.list_destinations().await;
            state.lock().await.finish_destinations_load(result)
        })
    }

    /// Change the selection now and fetch its hotels in the background.
    ///
    /// The handle resolves to whether the fetched hotels were applied.
    pub async fn select(&self, destination_id: &str) -> Option<JoinHandle<bool>> {
        let request = self.state.lock().await.select_destination(destination_id)?;

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let result = client
                .list_hotels_by_destination(&request.destination_id)
                .await;
            state.lock().await.finish_hotels(&request, result)
        }))
    }

    pub async fn teardown(&self) {
        self.state.lock().await.teardown();
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> CrossFilterViewer {
        self.state.lock().await.clone()
    }
}
