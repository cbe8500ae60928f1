//! Organization model

use serde::{Deserialize, Serialize};

/// A team or administrative unit that practitioners belong to and that
/// jurisdictions and plans are assigned to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Database id; absent on create requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Unique business identifier.
    pub identifier: String,

    #[serde(default)]
    pub active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Parent organization (database id), if this is a sub-team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<i64>,

    /// Organization type classification, e.g. the organization-type "team" coding.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<CodeableConcept>,

    /// Derived practitioner member count; populated by search queries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}
