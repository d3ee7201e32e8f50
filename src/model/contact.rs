//! Contact records and field validation.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{JobdexError, Result};

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{3,}$").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap())
}

/// A person in the record book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Contact {
    /// Build a contact from raw typed values, validating each field.
    pub fn new(name: &str, phone: &str, email: &str) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: validate_name(name)?,
            phone: validate_phone(phone)?,
            email: validate_email(email)?,
            address: None,
            tags: BTreeSet::new(),
        })
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = validate_name(name)?;
        Ok(())
    }

    pub fn set_phone(&mut self, phone: &str) -> Result<()> {
        self.phone = validate_phone(phone)?;
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<()> {
        self.email = validate_email(email)?;
        Ok(())
    }

    /// Case-insensitive match against name and email.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.email.to_lowercase().contains(&needle)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(JobdexError::InvalidField {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(name.to_string())
}

pub(crate) fn validate_phone(phone: &str) -> Result<String> {
    let phone = phone.trim();
    if !phone_re().is_match(phone) {
        return Err(JobdexError::InvalidField {
            field: "phone",
            reason: format!("'{phone}' must be at least 3 digits"),
        });
    }
    Ok(phone.to_string())
}

pub(crate) fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    if !email_re().is_match(email) {
        return Err(JobdexError::InvalidField {
            field: "email",
            reason: format!("'{email}' must look like local@domain"),
        });
    }
    Ok(email.to_string())
}
