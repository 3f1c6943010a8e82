//! Employee Model
//!
//! The canonical record schema is the union of every field the directory has
//! ever carried. Every attribute except `id` is optional and unconstrained —
//! no format or uniqueness checks are applied (deliberate pass-through).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Employee record as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub job_location: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Canonical name for the record's one temporal attribute. Stored as
    /// text, exactly as submitted.
    #[serde(default)]
    pub joining_date: Option<String>,
    /// Stored filename under the uploads dir, or the configured default
    /// sentinel when no picture was ever supplied.
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl Employee {
    /// Full "table:key" id string, used in view links
    pub fn id_str(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

/// Create payload — the store accepts partial records, so every field is
/// optional and absent fields are simply not written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Update payload — only serialized fields reach the store (merge
/// semantics), so `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl EmployeeCreate {
    /// Build a create payload from submitted form fields.
    ///
    /// Empty form values are treated as absent on create.
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        Self {
            name: text_field(fields, "name"),
            email: text_field(fields, "email"),
            position: text_field(fields, "position"),
            salary: text_field(fields, "salary").and_then(|s| s.parse().ok()),
            job_location: text_field(fields, "jobLocation"),
            phone_number: text_field(fields, "phoneNumber"),
            joining_date: text_field(fields, "joiningDate"),
            profile_picture: None,
        }
    }
}

impl EmployeeUpdate {
    /// Build an update payload from submitted form fields.
    ///
    /// `clears_on_empty` decides what an explicitly-empty value means: when
    /// true, an empty string overwrites the stored attribute with ""; when
    /// false, empty values are treated as "not supplied" and the stored
    /// attribute is preserved. Source iterations disagreed, so this is a
    /// configuration choice rather than a guess.
    pub fn from_form(fields: &HashMap<String, String>, clears_on_empty: bool) -> Self {
        let pick = |key: &str| -> Option<String> {
            match fields.get(key) {
                Some(v) if v.is_empty() && !clears_on_empty => None,
                Some(v) => Some(v.clone()),
                None => None,
            }
        };

        Self {
            name: pick("name"),
            email: pick("email"),
            position: pick("position"),
            salary: pick("salary").and_then(|s| s.parse().ok()),
            job_location: pick("jobLocation"),
            phone_number: pick("phoneNumber"),
            joining_date: pick("joiningDate"),
            profile_picture: None,
        }
    }
}

fn text_field(fields: &HashMap<String, String>, key: &str) -> Option<String> {
    fields.get(key).filter(|v| !v.is_empty()).cloned()
}
