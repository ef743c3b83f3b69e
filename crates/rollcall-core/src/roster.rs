//! Roster reconciliation: recognition outcome → per-student status.
//!
//! Recognition only says who was seen; the session roster decides who was
//! expected. Reconciling the two produces the marks the attendance ledger
//! stores.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::store::EnrollmentRecord;

/// Attendance status for one student in one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Flip the status. Backs the UI's manual correction affordance for
    /// faces the photo missed (occlusion) or caught by mistake.
    pub fn toggled(self) -> Self {
        match self {
            AttendanceStatus::Present => AttendanceStatus::Absent,
            AttendanceStatus::Absent => AttendanceStatus::Present,
        }
    }
}

/// One roster row with its reconciled status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub identifier: String,
    pub display_name: String,
    pub status: AttendanceStatus,
}

/// Reconcile recognized identifiers against the expected roster.
///
/// Every roster entry gets a mark, in roster order. Recognized
/// identifiers that are not on the roster are ignored; they belong to
/// another class or to a since-withdrawn enrollment.
pub fn reconcile(roster: &[EnrollmentRecord], present: &[String]) -> Vec<AttendanceMark> {
    let present: HashSet<&str> = present.iter().map(String::as_str).collect();

    roster
        .iter()
        .map(|record| AttendanceMark {
            identifier: record.identifier.clone(),
            display_name: record.display_name.clone(),
            status: if present.contains(record.identifier.as_str()) {
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Absent
            },
        })
        .collect()
}
