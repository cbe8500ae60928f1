//! Location detail projection

use serde::{Deserialize, Serialize};

/// Identifier/name pair for a location, as returned by plan location-name
/// lookups. The full location geometry lives elsewhere and is not part of
/// this projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetail {
    pub identifier: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
