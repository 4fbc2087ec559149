//! Contact status - the outcome of reaching out to a student.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Outcome of the most recent contact attempt with a student.
///
/// Anything other than [`ContactStatus::Pending`] counts as "completed" for
/// performance purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    /// Not contacted yet
    Pending,
    /// Reached the student
    Contacted,
    /// Student is interested
    Interested,
    /// Student declined
    #[serde(alias = "not_interested")]
    NotInterested,
    /// Could not get through
    #[serde(alias = "not_reachable")]
    NotReachable,
    /// Student asked to be called again later
    #[serde(alias = "call_back")]
    CallBack,
}

impl ContactStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Contacted,
        Self::Interested,
        Self::NotInterested,
        Self::NotReachable,
        Self::CallBack,
    ];

    /// Wire spelling used in storage and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Interested => "interested",
            Self::NotInterested => "not-interested",
            Self::NotReachable => "not-reachable",
            Self::CallBack => "call-back",
        }
    }

    /// Whether the student counts as handled by their staff member.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Remarks recorded when a status is set without a typed note.
    #[must_use]
    pub const fn default_remarks(self) -> &'static str {
        match self {
            Self::Contacted => "Student contacted successfully",
            Self::Interested => "Student showed interest in the program",
            Self::NotInterested => "Student not interested",
            Self::NotReachable => "Could not reach student",
            Self::CallBack => "Student requested to call back later",
            Self::Pending => "Status updated",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| Error::InvalidStatus {
                value: s.to_string(),
            })
    }
}
