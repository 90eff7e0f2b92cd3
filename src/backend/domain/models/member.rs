//! Domain model for a gym member.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::backend::domain::validation::ValidationError;

/// Member ids are positive, assigned ascending, and never reused.
pub type MemberId = u32;

/// Domain model representing a registered member ("socio") of the gym.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    /// National identity document, 7-8 digits. Unique across live members.
    pub dni: String,
    pub email: String,
    pub phone: String,
    pub birthdate: NaiveDate,
    pub address: String,
    pub joined_on: NaiveDate,
    pub active: bool,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Field set for a member about to be stored; the repository assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub email: String,
    pub phone: String,
    pub birthdate: NaiveDate,
    pub address: String,
    pub joined_on: NaiveDate,
    pub active: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum MemberError {
    #[error("member not found: {0}")]
    NotFound(MemberId),
    #[error("another member is already registered with DNI {0}")]
    DuplicateDni(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
