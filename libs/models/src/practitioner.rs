//! Practitioner model

use serde::{Deserialize, Serialize};

/// A health worker. Membership in organizations is stored separately
/// (practitioner roles); this is the user-facing record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    pub identifier: String,

    #[serde(default)]
    pub active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Identity-provider user id this practitioner record is linked to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
