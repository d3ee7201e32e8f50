//! Job application records and their status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{JobdexError, Result};

/// Where an application currently stands.
///
/// Forward order is Applied → Screening → Interview → Offer; an offer
/// resolves to Accepted or Rejected, and any non-terminal stage may be
/// rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Interview,
    Offer,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Whether the pipeline may move from `self` to `next`.
    pub fn can_advance_to(self, next: Self) -> bool {
        use ApplicationStatus::*;
        match (self, next) {
            (Applied, Screening)
            | (Screening, Interview)
            | (Interview, Offer)
            | (Offer, Accepted)
            | (Offer, Rejected) => true,
            (Applied | Screening | Interview, Rejected) => true,
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Applied => "applied",
            Self::Screening => "screening",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

impl FromStr for ApplicationStatus {
    type Err = JobdexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "applied" => Ok(Self::Applied),
            "screening" => Ok(Self::Screening),
            "interview" => Ok(Self::Interview),
            "offer" => Ok(Self::Offer),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(JobdexError::InvalidField {
                field: "status",
                reason: format!(
                    "'{other}' is not one of applied, screening, interview, offer, accepted, rejected"
                ),
            }),
        }
    }
}

/// One job application, linked to the contact it goes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: Uuid,
    /// The contact this application belongs to.
    pub contact: Uuid,
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl JobApplication {
    pub fn new(contact: Uuid, company: &str, role: &str) -> Result<Self> {
        let company = company.trim();
        let role = role.trim();
        if company.is_empty() {
            return Err(JobdexError::InvalidField {
                field: "company",
                reason: "must not be empty".to_string(),
            });
        }
        if role.is_empty() {
            return Err(JobdexError::InvalidField {
                field: "role",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            contact,
            company: company.to_string(),
            role: role.to_string(),
            status: ApplicationStatus::Applied,
            deadline: None,
        })
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Move to `next`, enforcing the pipeline's legal transitions.
    pub fn advance(&mut self, next: ApplicationStatus) -> Result<()> {
        if !self.status.can_advance_to(next) {
            return Err(JobdexError::Execution(format!(
                "cannot move application from {} to {}",
                self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    /// Parse a `YYYY-MM-DD` deadline as typed in a command line.
    pub fn parse_deadline(value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
            JobdexError::InvalidField {
                field: "deadline",
                reason: format!("'{value}' is not a YYYY-MM-DD date ({e})"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> JobApplication {
        JobApplication::new(Uuid::new_v4(), "Acme", "Engineer").unwrap()
    }

    #[test]
    fn test_new_application_starts_applied() {
        assert_eq!(app().status, ApplicationStatus::Applied);
    }

    #[test]
    fn test_forward_transitions() {
        let mut a = app();
        a.advance(ApplicationStatus::Screening).unwrap();
        a.advance(ApplicationStatus::Interview).unwrap();
        a.advance(ApplicationStatus::Offer).unwrap();
        a.advance(ApplicationStatus::Accepted).unwrap();
        assert!(a.status.is_terminal());
    }

    #[test]
    fn test_cannot_skip_stages() {
        let mut a = app();
        assert!(a.advance(ApplicationStatus::Offer).is_err());
        assert!(a.advance(ApplicationStatus::Accepted).is_err());
    }

    #[test]
    fn test_rejection_allowed_from_any_active_stage() {
        let mut a = app();
        a.advance(ApplicationStatus::Rejected).unwrap();
        // Terminal states stay put.
        assert!(a.advance(ApplicationStatus::Applied).is_err());
    }

    #[test]
    fn test_status_parsing_round_trip() {
        for status in [
            ApplicationStatus::Applied,
            ApplicationStatus::Screening,
            ApplicationStatus::Interview,
            ApplicationStatus::Offer,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(status.to_string().parse::<ApplicationStatus>().unwrap(), status);
        }
        assert!("limbo".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_deadline_parsing() {
        assert_eq!(
            JobApplication::parse_deadline("2026-09-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );
        assert!(JobApplication::parse_deadline("Sep 1").is_err());
    }

    #[test]
    fn test_blank_company_rejected() {
        assert!(JobApplication::new(Uuid::new_v4(), " ", "Engineer").is_err());
    }
}
