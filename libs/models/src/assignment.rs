//! Assignment models
//!
//! An [`AssignedLocation`] links one organization, one jurisdiction, and one
//! plan, optionally bounded by a validity window. The relation is ternary:
//! the same organization/jurisdiction pair may carry several plans at once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of the Organization x Jurisdiction x Plan relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedLocation {
    pub organization_id: String,
    pub jurisdiction_id: String,
    pub plan_id: String,

    /// Start of the validity window; unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,

    /// End of the validity window; unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

impl AssignedLocation {
    /// Whether the assignment is in force on the given date.
    ///
    /// A missing bound is open on that side; both bounds are inclusive.
    pub fn in_force_at(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from_date {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to_date {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// Deduplicated projection of a user's assignments, grouped into parallel
/// sets. This is the payload of the user-assignment endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignment {
    pub organization_ids: HashSet<String>,
    pub jurisdictions: HashSet<String>,
    pub plans: HashSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn unbounded_assignment_is_always_in_force() {
        let a = AssignedLocation {
            organization_id: "org1".into(),
            jurisdiction_id: "area1".into(),
            plan_id: "plan1".into(),
            ..Default::default()
        };
        assert!(a.in_force_at(date("1970-01-01")));
        assert!(a.in_force_at(date("2999-12-31")));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let a = AssignedLocation {
            from_date: Some(date("2024-01-01")),
            to_date: Some(date("2024-06-30")),
            ..Default::default()
        };
        assert!(!a.in_force_at(date("2023-12-31")));
        assert!(a.in_force_at(date("2024-01-01")));
        assert!(a.in_force_at(date("2024-06-30")));
        assert!(!a.in_force_at(date("2024-07-01")));
    }

    #[test]
    fn half_open_windows() {
        let from_only = AssignedLocation {
            from_date: Some(date("2024-01-01")),
            ..Default::default()
        };
        assert!(!from_only.in_force_at(date("2023-06-01")));
        assert!(from_only.in_force_at(date("2030-01-01")));

        let to_only = AssignedLocation {
            to_date: Some(date("2024-01-01")),
            ..Default::default()
        };
        assert!(to_only.in_force_at(date("2020-01-01")));
        assert!(!to_only.in_force_at(date("2024-01-02")));
    }

    #[test]
    fn wire_field_names() {
        let a = AssignedLocation {
            organization_id: "org1".into(),
            jurisdiction_id: "area1".into(),
            plan_id: "plan1".into(),
            from_date: Some(date("2024-01-01")),
            to_date: None,
        };
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["organizationId"], "org1");
        assert_eq!(v["jurisdictionId"], "area1");
        assert_eq!(v["planId"], "plan1");
        assert_eq!(v["fromDate"], "2024-01-01");
        assert!(v.get("toDate").is_none());
    }
}
