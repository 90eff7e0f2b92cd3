//! Domain model for a scheduled gym class.

use serde::{Deserialize, Serialize};

use crate::backend::domain::validation::ValidationError;

/// Class ids are positive, assigned ascending, and never reused.
pub type ClassId = u32;

/// Domain model representing a scheduled class ("clase") with a capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymClass {
    pub id: ClassId,
    pub name: String,
    pub instructor: String,
    /// Hard limit ("cupo") on concurrent enrollments. Always > 0.
    pub capacity: u32,
    /// Free-form schedule, e.g. "Monday 18:00".
    pub schedule: String,
    pub duration_minutes: u32,
    pub active: bool,
}

/// Field set for a class about to be stored; the repository assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGymClass {
    pub name: String,
    pub instructor: String,
    pub capacity: u32,
    pub schedule: String,
    pub duration_minutes: u32,
    pub active: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassError {
    #[error("class not found: {0}")]
    NotFound(ClassId),
    #[error("capacity {requested} is below the current enrollment count {enrolled}")]
    CapacityBelowEnrollment { requested: u32, enrolled: usize },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
