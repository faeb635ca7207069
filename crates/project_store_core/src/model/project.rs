//! Project domain model.
//!
//! # Responsibility
//! - Define the persisted project record and its wire field names.
//! - Build new records from create payloads and shallow-merge update payloads.
//!
//! # Invariants
//! - `id` is generated once and never reassigned by payload input.
//! - `created_at` is set once; `updated_at` is refreshed on every mutation.
//! - Keys outside the known field set are preserved verbatim in `extra`.
//! - Decoding a JSON object never fails; off-type known keys land in `extra`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Loosely-typed request body accepted by create and update.
pub type ProjectPayload = Map<String, Value>;

/// Keys owned by the server. Payload values for these are ignored.
const RESERVED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Stable identifier of a project record.
///
/// Generated ids are hyphenated UUID v4 strings, but any string read from the
/// persisted document is accepted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One evaluated initiative in the collection.
///
/// Known fields are typed accessors over the stored JSON object. A known key
/// whose value has another JSON type is kept verbatim in `extra`, so every
/// parseable record survives a load → save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ProjectPayload")]
pub struct Project {
    /// Empty only for a stored record that never carried a string `id`.
    #[serde(skip_serializing_if = "ProjectId::is_empty")]
    pub id: ProjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Investment rating assigned by the evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_score: Option<f64>,
    /// Transport rating assigned by the evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_score: Option<f64>,
    /// Recommendation outcome, e.g. `Recommended`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// ISO-8601 UTC, see [`format_timestamp`].
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
    /// Any additional keys, including known keys with an unexpected type.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Builds a new record from a create payload.
    ///
    /// # Contract
    /// - Assigns a fresh `id` and sets `created_at == updated_at == now`.
    /// - Payload values for `id`, `createdAt` and `updatedAt` are ignored.
    pub fn from_payload(payload: ProjectPayload, now: DateTime<Utc>) -> Self {
        let timestamp = format_timestamp(now);
        let mut fields = strip_reserved(payload);
        fields.insert("id".into(), Value::String(ProjectId::generate().0));
        fields.insert("createdAt".into(), Value::String(timestamp.clone()));
        fields.insert("updatedAt".into(), Value::String(timestamp));
        Self::from(fields)
    }

    /// Shallow-merges `payload` over this record and refreshes `updated_at`.
    ///
    /// Keys present in the payload overwrite the stored value; absent keys are
    /// left untouched. A `null` clears a known field.
    pub fn merge_payload(&mut self, payload: ProjectPayload, now: DateTime<Utc>) {
        let mut fields = self.clone().into_fields();
        fields.extend(strip_reserved(payload));
        fields.insert("updatedAt".into(), Value::String(format_timestamp(now)));
        *self = Self::from(fields);
    }

    /// Flattens the record back into one JSON object.
    fn into_fields(self) -> ProjectPayload {
        let mut fields = self.extra;
        let known = [
            ("id", non_empty(self.id.0)),
            ("name", self.name.map(Value::String)),
            ("industry", self.industry.map(Value::String)),
            ("investmentScore", self.investment_score.map(Value::from)),
            ("transportScore", self.transport_score.map(Value::from)),
            ("status", self.status.map(Value::String)),
            ("createdAt", non_empty(self.created_at)),
            ("updatedAt", non_empty(self.updated_at)),
        ];
        for (key, value) in known {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        }
        fields
    }
}

impl From<ProjectPayload> for Project {
    fn from(mut fields: ProjectPayload) -> Self {
        let text = |value: &Value| value.as_str().map(str::to_string);
        Self {
            id: ProjectId(take_known(&mut fields, "id", text).unwrap_or_default()),
            name: take_known(&mut fields, "name", text),
            industry: take_known(&mut fields, "industry", text),
            investment_score: take_known(&mut fields, "investmentScore", Value::as_f64),
            transport_score: take_known(&mut fields, "transportScore", Value::as_f64),
            status: take_known(&mut fields, "status", text),
            created_at: take_known(&mut fields, "createdAt", text).unwrap_or_default(),
            updated_at: take_known(&mut fields, "updatedAt", text).unwrap_or_default(),
            extra: fields,
        }
    }
}

/// Formats a timestamp the way records store it (`2026-01-02T03:04:05.678Z`).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn strip_reserved(mut payload: ProjectPayload) -> ProjectPayload {
    for key in RESERVED_KEYS {
        payload.remove(key);
    }
    payload
}

/// Removes `key` when `convert` accepts its value; otherwise the value stays
/// in `fields`. `null` is dropped.
fn take_known<T>(
    fields: &mut ProjectPayload,
    key: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = fields.remove(key)?;
    if value.is_null() {
        return None;
    }
    let typed = convert(&value);
    if typed.is_none() {
        fields.insert(key.to_string(), value);
    }
    typed
}

fn non_empty(value: String) -> Option<Value> {
    (!value.is_empty()).then_some(Value::String(value))
}
