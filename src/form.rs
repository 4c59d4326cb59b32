//! Entity form state machine.
//!
//! One generic machine serves both entity kinds. It is either in create mode (no
//! identity bound, fields at defaults) or editing a specific record. Submission is
//! split into [`EntityForm::begin_submit`] and [`EntityForm::finish_submit`] so the
//! transitions can be driven without a network; [`EntityForm::submit`] runs both
//! around the client call.

use crate::client::CatalogClient;
use crate::errors::{ClientError, FormError};
use crate::kinds::EntityKind;

/// Which state the form is in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Editing { id: String },
}

/// Where a submission goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(String),
}

/// A validated, transformed submission ready to send.
#[derive(Debug, Clone)]
pub struct SubmitRequest<K: EntityKind> {
    pub target: SubmitTarget,
    pub payload: K::Payload,
}

/// Result of a completed submission.
///
/// A save is judged by the response status alone. The echoed record is carried along
/// when the backend returned one that could be read.
#[derive(Debug, Clone)]
pub enum SubmitOutcome<R> {
    Created(Option<R>),
    Updated(Option<R>),
    /// The backend rejected the save; the error message is on the form
    Failed,
}

impl<R> SubmitOutcome<R> {
    pub fn is_saved(&self) -> bool {
        !matches!(self, SubmitOutcome::Failed)
    }
}

/// Form state for one entity kind.
#[derive(Debug, Clone)]
pub struct EntityForm<K: EntityKind> {
    fields: K::Fields,
    editing_id: Option<String>,
    busy: bool,
    error: Option<String>,
    success: Option<String>,
}

impl<K: EntityKind> Default for EntityForm<K> {
    fn default() -> Self {
        Self {
            fields: K::Fields::default(),
            editing_id: None,
            busy: false,
            error: None,
            success: None,
        }
    }
}

impl<K: EntityKind> EntityForm<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &K::Fields {
        &self.fields
    }

    pub fn mode(&self) -> FormMode {
        match &self.editing_id {
            Some(id) => FormMode::Editing { id: id.clone() },
            None => FormMode::Create,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    /// True while a submission is in flight; callers must not submit again.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Form heading, e.g. "Edit Hotel" or "Add New Hotel".
    pub fn title(&self) -> String {
        if self.is_editing() {
            format!("Edit {}", K::LABEL)
        } else {
            format!("Add New {}", K::LABEL)
        }
    }

    /// Bind `record` and load every field from it.
    pub fn start_edit(&mut self, record: &K::Record) {
        self.fields = K::hydrate(record);
        self.editing_id = K::record_id(record).map(str::to_string);
        if self.editing_id.is_none() {
            tracing::warn!("{} has no id; editing it will create a new record", K::LABEL);
        }
        tracing::debug!("Editing {} {:?}", K::noun(), self.editing_id);
    }

    /// Set one field. Does not validate.
    pub fn change_field(&mut self, path: &str, value: impl Into<String>) -> Result<(), FormError> {
        match K::field_mut(&mut self.fields, path) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(FormError::UnknownField(path.to_string())),
        }
    }

    pub fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    /// Back to create mode with default fields and no messages.
    pub fn reset(&mut self) {
        self.fields = K::Fields::default();
        self.editing_id = None;
        self.clear_messages();
    }

    /// Check that every required field is filled in.
    pub fn validate(&self) -> Result<(), FormError> {
        let missing = K::missing_required(&self.fields);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    /// Validate and transform the fields, marking the form busy.
    ///
    /// Nothing changes when this fails.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest<K>, FormError> {
        if self.busy {
            return Err(FormError::Busy);
        }
        self.validate()?;

        self.busy = true;
        self.error = None;
        self.success = None;

        let target = match &self.editing_id {
            Some(id) => SubmitTarget::Update(id.clone()),
            None => SubmitTarget::Create,
        };
        Ok(SubmitRequest {
            target,
            payload: K::to_payload(&self.fields),
        })
    }

    /// Apply the backend's answer to a submission started with `begin_submit`.
    ///
    /// On success the form resets and reports what happened; on failure the fields
    /// are kept so the operator can correct them and resubmit.
    pub fn finish_submit(
        &mut self,
        target: &SubmitTarget,
        result: Result<Option<K::Record>, ClientError>,
    ) -> SubmitOutcome<K::Record> {
        self.busy = false;

        match result {
            Ok(record) => {
                // reset() clears messages; the confirmation is set after it and stays
                // visible until the next edit, submit or delete.
                self.reset();
                match target {
                    SubmitTarget::Create => {
                        self.success = Some(format!("{} created successfully!", K::LABEL));
                        SubmitOutcome::Created(record)
                    }
                    SubmitTarget::Update(_) => {
                        self.success = Some(format!("{} updated successfully!", K::LABEL));
                        SubmitOutcome::Updated(record)
                    }
                }
            }
            Err(e) => {
                self.error = Some(e.user_message(&format!("Failed to save {}", K::noun())));
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate, send, and apply the result.
    pub async fn submit(
        &mut self,
        client: &CatalogClient,
    ) -> Result<SubmitOutcome<K::Record>, FormError> {
        let request = self.begin_submit()?;

        let result = match &request.target {
            SubmitTarget::Create => K::create(client, &request.payload).await,
            SubmitTarget::Update(id) => K::update(client, id, &request.payload).await,
        };

        Ok(self.finish_submit(&request.target, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{DestinationKind, HotelFields, HotelKind};
    use crate::models::{Destination, Hotel};
    use serde_json::json;

    fn filled_hotel_form() -> EntityForm<HotelKind> {
        let mut form = EntityForm::<HotelKind>::new();
        form.change_field("name", "Sea View").unwrap();
        form.change_field("destinationId", "d1").unwrap();
        form.change_field("address", "Beach Rd").unwrap();
        form.change_field("pricePerNight", "120").unwrap();
        form
    }

    #[test]
    fn test_starts_in_create_mode() {
        let form = EntityForm::<HotelKind>::new();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.fields(), &HotelFields::default());
        assert_eq!(form.title(), "Add New Hotel");
        assert!(!form.is_busy());
    }

    #[test]
    fn test_change_field_touches_one_field() {
        let mut form = filled_hotel_form();
        let before = form.fields().clone();
        form.change_field("contactInfo.email", "desk@seaview.test").unwrap();

        let after = form.fields();
        assert_eq!(after.contact_info.email, "desk@seaview.test");
        assert_eq!(after.contact_info.phone_number, before.contact_info.phone_number);
        assert_eq!(after.name, before.name);
        assert_eq!(after.price_per_night, before.price_per_night);
    }

    #[test]
    fn test_unknown_field() {
        let mut form = EntityForm::<DestinationKind>::new();
        assert_eq!(
            form.change_field("coordinates.altitude", "10"),
            Err(FormError::UnknownField("coordinates.altitude".to_string()))
        );
    }

    #[test]
    fn test_missing_fields_block_submission() {
        let mut form = EntityForm::<HotelKind>::new();
        form.change_field("name", "Sea View").unwrap();

        let err = form.begin_submit().unwrap_err();
        assert_eq!(
            err,
            FormError::MissingFields(vec!["destinationId", "address", "pricePerNight"])
        );
        assert!(!form.is_busy());
    }

    #[test]
    fn test_busy_rejects_second_submit() {
        let mut form = filled_hotel_form();
        let request = form.begin_submit().unwrap();
        assert!(form.is_busy());
        assert_eq!(request.target, SubmitTarget::Create);
        assert_eq!(form.begin_submit().unwrap_err(), FormError::Busy);

        form.finish_submit(&request.target, Ok(Some(Hotel::default())));
        assert!(!form.is_busy());
    }

    #[test]
    fn test_success_resets_and_reports() {
        let mut form = filled_hotel_form();
        let request = form.begin_submit().unwrap();
        let outcome = form.finish_submit(&request.target, Ok(Some(Hotel::default())));

        assert!(matches!(outcome, SubmitOutcome::Created(Some(_))));
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.fields(), &HotelFields::default());
        assert_eq!(form.success(), Some("Hotel created successfully!"));
    }

    #[test]
    fn test_saved_without_readable_echo() {
        let mut form = EntityForm::<DestinationKind>::new();
        form.start_edit(&Destination {
            id: Some("d1".to_string()),
            name: "Goa".to_string(),
            country: "India".to_string(),
            description: "Beaches".to_string(),
            coordinates: Some(crate::models::Coordinates {
                latitude: Some(15.3),
                longitude: Some(74.1),
            }),
            ..Default::default()
        });
        let request = form.begin_submit().unwrap();
        let outcome = form.finish_submit(&request.target, Ok(None));

        assert!(matches!(outcome, SubmitOutcome::Updated(None)));
        assert!(outcome.is_saved());
        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.error().is_none());
        assert_eq!(form.success(), Some("Destination updated successfully!"));
    }

    #[test]
    fn test_failure_keeps_fields() {
        let mut form = filled_hotel_form();
        let before = form.fields().clone();
        let request = form.begin_submit().unwrap();
        let outcome = form.finish_submit(
            &request.target,
            Err(ClientError::from_status(500, json!({ "message": "Database unavailable" }))),
        );

        assert!(!outcome.is_saved());
        assert_eq!(form.fields(), &before);
        assert_eq!(form.error(), Some("Database unavailable"));
        assert!(form.success().is_none());
    }

    #[test]
    fn test_failure_without_server_message() {
        let mut form = EntityForm::<DestinationKind>::new();
        form.start_edit(&Destination {
            id: Some("d1".to_string()),
            name: "Goa".to_string(),
            country: "India".to_string(),
            description: "Beaches".to_string(),
            coordinates: Some(crate::models::Coordinates {
                latitude: Some(15.3),
                longitude: Some(74.1),
            }),
            ..Default::default()
        });
        let request = form.begin_submit().unwrap();
        assert_eq!(request.target, SubmitTarget::Update("d1".to_string()));

        form.finish_submit(&request.target, Err(ClientError::Transport("down".to_string())));
        assert_eq!(form.error(), Some("Failed to save destination"));
        assert_eq!(form.mode(), FormMode::Editing { id: "d1".to_string() });
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut form = filled_hotel_form();
        form.reset();
        let once = form.fields().clone();
        form.reset();
        assert_eq!(form.fields(), &once);
        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.error().is_none());
    }

    #[test]
    fn test_edit_then_reset_returns_to_create() {
        let mut form = EntityForm::<HotelKind>::new();
        form.start_edit(&Hotel {
            id: Some("h1".to_string()),
            name: Some("Inn".to_string()),
            ..Default::default()
        });
        assert_eq!(form.title(), "Edit Hotel");
        form.reset();
        assert_eq!(form.mode(), FormMode::Create);
    }
}
