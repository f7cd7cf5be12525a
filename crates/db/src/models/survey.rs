//! Survey model and the transformation layer between the stored row and
//! the application record.
//!
//! [`SurveyRow`] is the explicit schema of a `surveys` row as the backend
//! returns it: every column optional. [`to_survey`] turns it into a fully
//! populated [`Survey`]; [`to_backend_record`] turns user input into the
//! column set written on insert and update.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shipcheck_core::error::CoreError;
use shipcheck_core::survey::{validate_custom_field_key, validate_tools, SurveyStatus};
use shipcheck_core::types::{RecordId, Timestamp};
use validator::Validate;

// ---------------------------------------------------------------------------
// Nested structures
// ---------------------------------------------------------------------------

/// A person at the client organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientContact {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightDetails {
    pub airline: String,
    pub flight_number: String,
    pub departure: String,
    pub arrival: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelDetails {
    pub name: String,
    pub address: String,
    pub check_in: String,
    pub check_out: String,
    pub notes: String,
}

// ---------------------------------------------------------------------------
// Stored row
// ---------------------------------------------------------------------------

/// A row from the `surveys` table, exactly as stored. Any column may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyRow {
    pub id: Option<RecordId>,
    pub user_id: Option<RecordId>,
    pub client_name: Option<String>,
    pub client_country: Option<String>,
    pub client_contacts: Option<Vec<ClientContact>>,
    pub ship_name: Option<String>,
    pub location: Option<String>,
    pub survey_date: Option<String>,
    pub project_scope: Option<String>,
    pub duration: Option<String>,
    pub tools: Option<Vec<String>>,
    pub custom_fields: Option<BTreeMap<String, String>>,
    pub flight_details: Option<FlightDetails>,
    pub hotel_details: Option<HotelDetails>,
    pub status: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub last_synced_at: Option<Timestamp>,
    pub needs_sync: Option<bool>,
}

// ---------------------------------------------------------------------------
// Application record
// ---------------------------------------------------------------------------

/// A vessel survey as the application sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Survey {
    /// Assigned by the backend on first save; immutable afterwards.
    pub id: Option<RecordId>,
    pub user_id: Option<RecordId>,
    pub client_name: String,
    pub client_country: String,
    pub client_contacts: Vec<ClientContact>,
    pub ship_name: String,
    pub location: String,
    pub survey_date: String,
    pub project_scope: String,
    pub duration: String,
    pub tools: Vec<String>,
    pub custom_fields: BTreeMap<String, String>,
    pub flight_details: FlightDetails,
    pub hotel_details: HotelDetails,
    pub status: SurveyStatus,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub last_synced_at: Option<Timestamp>,
    /// Always `false`: there is no local-only state to reconcile.
    pub needs_sync: bool,
}

impl Survey {
    /// Build the record returned after a save: the submitted fields plus
    /// the identifier the backend assigned.
    pub fn from_saved(id: RecordId, input: SurveyInput) -> Self {
        let mut survey = to_survey(SurveyRow::from(to_backend_record(&input)));
        survey.id = Some(id);
        survey
    }

    /// The user-supplied part of this record, without id, timestamps or
    /// sync bookkeeping.
    pub fn to_input(&self) -> SurveyInput {
        SurveyInput {
            user_id: self.user_id,
            client_name: self.client_name.clone(),
            client_country: self.client_country.clone(),
            client_contacts: self.client_contacts.clone(),
            ship_name: self.ship_name.clone(),
            location: self.location.clone(),
            survey_date: self.survey_date.clone(),
            project_scope: self.project_scope.clone(),
            duration: self.duration.clone(),
            tools: self.tools.clone(),
            custom_fields: self.custom_fields.clone(),
            flight_details: self.flight_details.clone(),
            hotel_details: self.hotel_details.clone(),
            status: self.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Input / outgoing record
// ---------------------------------------------------------------------------

/// Survey payload submitted by the user: everything except backend-assigned
/// columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SurveyInput {
    pub user_id: Option<RecordId>,
    #[validate(length(min = 1, max = 200))]
    pub client_name: String,
    #[validate(length(max = 100))]
    pub client_country: String,
    pub client_contacts: Vec<ClientContact>,
    #[validate(length(min = 1, max = 200))]
    pub ship_name: String,
    #[validate(length(max = 200))]
    pub location: String,
    pub survey_date: String,
    #[validate(length(max = 10000))]
    pub project_scope: String,
    #[validate(length(max = 100))]
    pub duration: String,
    pub tools: Vec<String>,
    pub custom_fields: BTreeMap<String, String>,
    pub flight_details: FlightDetails,
    pub hotel_details: HotelDetails,
    pub status: SurveyStatus,
}

impl SurveyInput {
    /// Form-level validation: field lengths, tool names, custom field keys.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        validate_tools(&self.tools)?;
        for key in self.custom_fields.keys() {
            validate_custom_field_key(key)?;
        }
        Ok(())
    }
}

/// The column set written to `surveys` on insert and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyRecord {
    pub user_id: Option<RecordId>,
    pub client_name: String,
    pub client_country: String,
    pub client_contacts: Vec<ClientContact>,
    pub ship_name: String,
    pub location: String,
    pub survey_date: String,
    pub project_scope: String,
    pub duration: String,
    pub tools: Vec<String>,
    pub custom_fields: BTreeMap<String, String>,
    pub flight_details: FlightDetails,
    pub hotel_details: HotelDetails,
    pub status: SurveyStatus,
}

impl From<SurveyRecord> for SurveyRow {
    fn from(record: SurveyRecord) -> Self {
        SurveyRow {
            user_id: record.user_id,
            client_name: Some(record.client_name),
            client_country: Some(record.client_country),
            client_contacts: Some(record.client_contacts),
            ship_name: Some(record.ship_name),
            location: Some(record.location),
            survey_date: Some(record.survey_date),
            project_scope: Some(record.project_scope),
            duration: Some(record.duration),
            tools: Some(record.tools),
            custom_fields: Some(record.custom_fields),
            flight_details: Some(record.flight_details),
            hotel_details: Some(record.hotel_details),
            status: Some(record.status.as_str().to_string()),
            ..SurveyRow::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Transformation
// ---------------------------------------------------------------------------

/// Convert a stored row into an application record.
///
/// Absent columns become empty strings, lists and maps; an absent or
/// unknown status becomes `draft`. `needs_sync` is always `false`, and
/// `last_synced_at` falls back to `updated_at`.
pub fn to_survey(row: SurveyRow) -> Survey {
    Survey {
        id: row.id,
        user_id: row.user_id,
        client_name: row.client_name.unwrap_or_default(),
        client_country: row.client_country.unwrap_or_default(),
        client_contacts: row.client_contacts.unwrap_or_default(),
        ship_name: row.ship_name.unwrap_or_default(),
        location: row.location.unwrap_or_default(),
        survey_date: row.survey_date.unwrap_or_default(),
        project_scope: row.project_scope.unwrap_or_default(),
        duration: row.duration.unwrap_or_default(),
        tools: row.tools.unwrap_or_default(),
        custom_fields: row.custom_fields.unwrap_or_default(),
        flight_details: row.flight_details.unwrap_or_default(),
        hotel_details: row.hotel_details.unwrap_or_default(),
        status: SurveyStatus::from_column(row.status.as_deref()),
        created_at: row.created_at,
        updated_at: row.updated_at,
        last_synced_at: row.last_synced_at.or(row.updated_at),
        needs_sync: false,
    }
}

/// Convert user input into the columns written to the backend.
pub fn to_backend_record(input: &SurveyInput) -> SurveyRecord {
    SurveyRecord {
        user_id: input.user_id,
        client_name: input.client_name.clone(),
        client_country: input.client_country.clone(),
        client_contacts: input.client_contacts.clone(),
        ship_name: input.ship_name.clone(),
        location: input.location.clone(),
        survey_date: input.survey_date.clone(),
        project_scope: input.project_scope.clone(),
        duration: input.duration.clone(),
        tools: input.tools.clone(),
        custom_fields: input.custom_fields.clone(),
        flight_details: input.flight_details.clone(),
        hotel_details: input.hotel_details.clone(),
        status: input.status,
    }
}
