//! Plan definition model
//!
//! A plan is a unit of work scoped to one or more jurisdictions and
//! synchronized to clients incrementally: `serverVersion` is a monotonically
//! non-decreasing watermark, and a client holding watermark V must receive
//! exactly the plans with `serverVersion > V` within its scope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDefinition {
    pub identifier: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,

    /// Opaque context payload, passed through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_context: Option<Value>,

    /// Jurisdiction codes this plan applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jurisdiction: Vec<Jurisdiction>,

    /// Opaque goal payload, passed through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Value>,

    /// Opaque action payload, passed through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,

    /// Sync watermark; assigned by the server on every write.
    #[serde(default)]
    pub server_version: i64,
}

impl PlanDefinition {
    /// Whether any of this plan's jurisdiction codes appears in `areas`.
    pub fn applies_to_any<'a, I>(&self, areas: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let codes: std::collections::HashSet<&str> =
            self.jurisdiction.iter().map(|j| j.code.as_str()).collect();
        areas.into_iter().any(|a| codes.contains(a))
    }
}

/// A geographic or administrative location unit, identified by its code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Jurisdiction {
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}
