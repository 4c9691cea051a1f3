//! Enumerations stored as text in the database and their display labels.
//!
//! Unknown stored values are never rejected on the read path: label lookups
//! fall back to the raw value so new enum members added by the store show up
//! verbatim instead of breaking a page.

use serde::{Deserialize, Serialize};

/// Label used for a missing hometown or service type.
pub const UNSPECIFIED_LABEL: &str = "Не указан";

// ---------------------------------------------------------------------------
// Moderation status
// ---------------------------------------------------------------------------

/// Moderation status governing visibility of user-submitted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    /// The value stored in `status` columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Service type
// ---------------------------------------------------------------------------

/// How the person came to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Mobilized,
    Volunteer,
    Pmc,
    Professional,
}

/// All service types, in display order.
pub const SERVICE_TYPES: &[ServiceType] = &[
    ServiceType::Mobilized,
    ServiceType::Volunteer,
    ServiceType::Pmc,
    ServiceType::Professional,
];

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobilized => "mobilized",
            Self::Volunteer => "volunteer",
            Self::Pmc => "pmc",
            Self::Professional => "professional",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mobilized => "Мобилизованный",
            Self::Volunteer => "Доброволец",
            Self::Pmc => "ЧВК",
            Self::Professional => "Кадровый военный",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        SERVICE_TYPES.iter().copied().find(|t| t.as_str() == value)
    }
}

/// Display label for a stored service type value.
///
/// Missing or blank values map to [`UNSPECIFIED_LABEL`]; unknown values pass
/// through unchanged.
pub fn service_type_label(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None | Some("") => UNSPECIFIED_LABEL.to_string(),
        Some(raw) => ServiceType::parse(raw)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

/// Validate a `service_type` filter supplied by a client.
pub fn validate_service_type(value: &str) -> Result<ServiceType, String> {
    ServiceType::parse(value).ok_or_else(|| {
        let valid: Vec<&str> = SERVICE_TYPES.iter().map(|t| t.as_str()).collect();
        format!(
            "Invalid service type '{value}'. Must be one of: {}",
            valid.join(", ")
        )
    })
}

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

/// Stored relationship values and their labels.
const RELATIONSHIP_LABELS: &[(&str, &str)] = &[
    ("mother", "Мать"),
    ("father", "Отец"),
    ("wife", "Жена"),
    ("husband", "Муж"),
    ("son", "Сын"),
    ("daughter", "Дочь"),
    ("brother", "Брат"),
    ("sister", "Сестра"),
    ("grandmother", "Бабушка"),
    ("grandfather", "Дедушка"),
    ("relative", "Родственник"),
    ("comrade", "Сослуживец"),
    ("friend", "Друг"),
    ("other", "Другое"),
];

/// Display label for a connection's relationship; unknown values pass through.
pub fn relationship_label(value: &str) -> String {
    RELATIONSHIP_LABELS
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| value.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
