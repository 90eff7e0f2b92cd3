//! Domain model for an enrollment: a (member, class) pair.

use serde::{Deserialize, Serialize};

use crate::backend::domain::models::gym_class::ClassId;
use crate::backend::domain::models::member::MemberId;

/// A single enrollment ("inscripción"). The ledger never holds the same
/// pair twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enrollment {
    pub member_id: MemberId,
    pub class_id: ClassId,
}

impl Enrollment {
    pub fn new(member_id: MemberId, class_id: ClassId) -> Self {
        Self { member_id, class_id }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnrollmentError {
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),
    #[error("member {0} is inactive and cannot be enrolled")]
    MemberInactive(MemberId),
    #[error("class not found: {0}")]
    ClassNotFound(ClassId),
    #[error("class {0} is inactive and cannot take enrollments")]
    ClassInactive(ClassId),
    #[error("member {member_id} is already enrolled in class {class_id}")]
    AlreadyEnrolled { member_id: MemberId, class_id: ClassId },
    #[error("class {class_id} is full ({enrolled}/{capacity})")]
    ClassFull {
        class_id: ClassId,
        enrolled: usize,
        capacity: u32,
    },
    #[error("member {member_id} is not enrolled in class {class_id}")]
    NotEnrolled { member_id: MemberId, class_id: ClassId },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
