//! Domain model for attendance records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::backend::domain::models::gym_class::ClassId;
use crate::backend::domain::models::member::MemberId;
use crate::backend::domain::validation::ValidationError;

/// One cell of the attendance matrix: the dates a member attended a class.
/// Dates are unique within a slot and kept in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSlot {
    pub member_id: MemberId,
    pub class_id: ClassId,
    pub dates: Vec<NaiveDate>,
}

impl AttendanceSlot {
    pub fn count(&self) -> usize {
        self.dates.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("attendance for member {member_id} in class {class_id} already recorded on {date}")]
    DuplicateDate {
        member_id: MemberId,
        class_id: ClassId,
        date: NaiveDate,
    },
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),
    #[error("class not found: {0}")]
    ClassNotFound(ClassId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
