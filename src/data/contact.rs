//! Contact-form submissions and the messages the admin reviews.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use super::project::RecordError;

/// Review state of a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Unread,
    Read,
    Responded,
}

impl MessageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Responded => "responded",
        }
    }
}

/// Contact message as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(rename = "_id", default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
    pub status: MessageStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub response: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl ContactMessage {
    pub fn from_records(records: Vec<ContactRecord>) -> Vec<ContactMessage> {
        records
            .into_iter()
            .filter_map(|record| match ContactMessage::try_from(record) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!("Skipping contact message: {}", e);
                    None
                }
            })
            .collect()
    }

    pub fn is_unread(&self) -> bool {
        self.status == MessageStatus::Unread
    }
}

impl TryFrom<ContactRecord> for ContactMessage {
    type Error = RecordError;

    fn try_from(record: ContactRecord) -> Result<Self, Self::Error> {
        let id = super::resolve_record_id(record.object_id, record.id)
            .ok_or_else(|| RecordError::MissingId(record.email.clone()))?;

        Ok(Self {
            id,
            name: record.name,
            email: record.email,
            phone: record.phone,
            message: record.message,
            status: record.status,
            created_at: record.created_at,
            response: record.response,
            responded_at: record.responded_at,
        })
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Public contact form payload (`POST /contact`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

impl ContactSubmission {
    /// Trim every field in place, then check them
    pub fn validate(&mut self) -> Result<(), SubmissionError> {
        for field in [
            &mut self.name,
            &mut self.email,
            &mut self.phone,
            &mut self.message,
        ] {
            *field = field.trim().to_string();
        }

        if self.name.is_empty()
            || self.email.is_empty()
            || self.phone.is_empty()
            || self.message.is_empty()
        {
            return Err(SubmissionError::MissingFields);
        }
        if !email_pattern().is_match(&self.email) {
            return Err(SubmissionError::InvalidEmail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_normalization() {
        let record: ContactRecord = serde_json::from_value(json!({
            "_id": "m1",
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "+91 98765 43210",
            "message": "Need an MRI door quote",
            "status": "unread",
            "createdAt": "2025-01-10T09:30:00Z"
        }))
        .unwrap();

        let message = ContactMessage::try_from(record).unwrap();
        assert_eq!(message.id, "m1");
        assert!(message.is_unread());
        assert!(message.response.is_none());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let value = serde_json::to_value(MessageStatus::Responded).unwrap();
        assert_eq!(value, json!("responded"));
    }

    #[test]
    fn test_submission_validation() {
        let mut submission = ContactSubmission {
            name: "  Ravi ".into(),
            email: "ravi@example".into(),
            phone: "12345".into(),
            message: "Hello".into(),
        };
        assert_eq!(submission.validate(), Err(SubmissionError::InvalidEmail));
        assert_eq!(submission.name, "Ravi");

        submission.email = "ravi@example.in".into();
        assert_eq!(submission.validate(), Ok(()));

        submission.message = "   ".into();
        assert_eq!(submission.validate(), Err(SubmissionError::MissingFields));
    }
}
