use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Closed set of application statuses; anything else is rejected at the
/// serde/sql boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
pub enum JobStatus {
    Applied,
    Interview,
    Offer,
    Pending,
    Declined,
    Rejected,
}

impl JobStatus {
    pub const ALL: [JobStatus; 6] = [
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Offer,
        JobStatus::Pending,
        JobStatus::Declined,
        JobStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "applied",
            JobStatus::Interview => "interview",
            JobStatus::Offer => "offer",
            JobStatus::Pending => "pending",
            JobStatus::Declined => "declined",
            JobStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(JobStatus::Applied),
            "interview" => Ok(JobStatus::Interview),
            "offer" => Ok(JobStatus::Offer),
            "pending" => Ok(JobStatus::Pending),
            "declined" => Ok(JobStatus::Declined),
            "rejected" => Ok(JobStatus::Rejected),
            other => Err(format!("unknown job status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "job_mode", rename_all = "kebab-case")]
pub enum JobMode {
    FullTime,
    PartTime,
    Internship,
    Contractor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: String,
    pub owner_id: String,
    pub position: String,
    pub company: String,
    pub location: String,
    pub status: JobStatus,
    pub mode: JobMode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of an owner's jobs, plus the pagination bookkeeping the
/// caller needs to render page controls.
#[derive(Debug, Serialize)]
pub struct JobPage {
    pub jobs: Vec<JobEntry>,
    pub count: i64,
    pub page: u32,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_round_trip() {
        for status in JobStatus::ALL {
            let parsed: JobStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("ghosted".parse::<JobStatus>().is_err());
    }

    #[test]
    fn mode_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&JobMode::FullTime).unwrap(),
            r#""full-time""#
        );
        assert_eq!(
            serde_json::from_str::<JobMode>(r#""part-time""#).unwrap(),
            JobMode::PartTime
        );
        assert!(serde_json::from_str::<JobMode>(r#""freelance""#).is_err());
    }

    #[test]
    fn status_rejects_values_outside_the_enum() {
        assert!(serde_json::from_str::<JobStatus>(r#""all""#).is_err());
        assert_eq!(
            serde_json::from_str::<JobStatus>(r#""declined""#).unwrap(),
            JobStatus::Declined
        );
    }
}
