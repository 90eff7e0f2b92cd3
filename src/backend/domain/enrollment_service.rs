//! Enrollment ledger service.

use std::sync::Arc;

use log::{info, warn};

use crate::backend::domain::commands::enrollments::{
    ClassRosterCommand, ClassRosterResult, EnrollCommand, EnrollResult, MemberScheduleCommand,
    MemberScheduleResult, UnenrollCommand, UnenrollResult,
};
use crate::backend::domain::models::enrollment::{Enrollment, EnrollmentError};
use crate::backend::domain::models::gym_class::ClassId;
use crate::backend::storage::memory::{
    ClassRepository, EnrollmentRepository, MemberRepository, MemoryConnection,
};
use crate::backend::storage::traits::{ClassStorage, EnrollmentStorage, MemberStorage};

/// Service for the member-to-class enrollment ledger.
///
/// `enroll` checks its preconditions in a fixed order, so the first failing
/// one determines the reported reason: member exists, member active, class
/// exists, class active, not already enrolled, capacity available.
#[derive(Clone)]
pub struct EnrollmentService {
    member_repository: MemberRepository,
    class_repository: ClassRepository,
    enrollment_repository: EnrollmentRepository,
}

impl EnrollmentService {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self {
            member_repository: MemberRepository::new(connection.clone()),
            class_repository: ClassRepository::new(connection.clone()),
            enrollment_repository: EnrollmentRepository::new(connection),
        }
    }

    /// Enroll a member in a class.
    pub fn enroll(&self, command: EnrollCommand) -> Result<EnrollResult, EnrollmentError> {
        info!("Enrolling member {} in class {}", command.member_id, command.class_id);

        let member = self
            .member_repository
            .get_member(command.member_id)?
            .ok_or(EnrollmentError::MemberNotFound(command.member_id))?;
        if !member.active {
            return Err(EnrollmentError::MemberInactive(member.id));
        }

        let class = self
            .class_repository
            .get_class(command.class_id)?
            .ok_or(EnrollmentError::ClassNotFound(command.class_id))?;
        if !class.active {
            return Err(EnrollmentError::ClassInactive(class.id));
        }

        if self.enrollment_repository.is_enrolled(member.id, class.id)? {
            return Err(EnrollmentError::AlreadyEnrolled {
                member_id: member.id,
                class_id: class.id,
            });
        }

        let enrolled = self.enrollment_repository.count_for_class(class.id)?;
        if enrolled >= class.capacity as usize {
            warn!(
                "Rejected enrollment: class {} is full ({}/{})",
                class.id, enrolled, class.capacity
            );
            return Err(EnrollmentError::ClassFull {
                class_id: class.id,
                enrolled,
                capacity: class.capacity,
            });
        }

        self.enrollment_repository
            .add_enrollment(Enrollment::new(member.id, class.id))?;

        info!(
            "Enrolled {} in {} ({}/{})",
            member.full_name(),
            class.name,
            enrolled + 1,
            class.capacity
        );

        let success_message = format!(
            "Member '{}' enrolled in '{}' successfully",
            member.full_name(),
            class.name
        );
        Ok(EnrollResult {
            member,
            class,
            enrolled_count: enrolled + 1,
            success_message,
        })
    }

    /// Remove a member's enrollment in a class.
    pub fn unenroll(&self, command: UnenrollCommand) -> Result<UnenrollResult, EnrollmentError> {
        info!("Unenrolling member {} from class {}", command.member_id, command.class_id);

        let member = self
            .member_repository
            .get_member(command.member_id)?
            .ok_or(EnrollmentError::MemberNotFound(command.member_id))?;
        let class = self
            .class_repository
            .get_class(command.class_id)?
            .ok_or(EnrollmentError::ClassNotFound(command.class_id))?;

        let removed = self
            .enrollment_repository
            .remove_enrollment(Enrollment::new(member.id, class.id))?;
        if !removed {
            return Err(EnrollmentError::NotEnrolled {
                member_id: member.id,
                class_id: class.id,
            });
        }

        let enrolled_count = self.enrollment_repository.count_for_class(class.id)?;
        let success_message = format!(
            "Member '{}' unenrolled from '{}' successfully",
            member.full_name(),
            class.name
        );
        Ok(UnenrollResult {
            member,
            class,
            enrolled_count,
            success_message,
        })
    }

    /// The classes a member is enrolled in, in enrollment order.
    pub fn member_schedule(
        &self,
        command: MemberScheduleCommand,
    ) -> Result<MemberScheduleResult, EnrollmentError> {
        let member = self
            .member_repository
            .get_member(command.member_id)?
            .ok_or(EnrollmentError::MemberNotFound(command.member_id))?;

        let mut classes = Vec::new();
        for class_id in self.enrollment_repository.classes_of_member(member.id)? {
            if let Some(class) = self.class_repository.get_class(class_id)? {
                classes.push(class);
            }
        }

        Ok(MemberScheduleResult { member, classes })
    }

    /// The members enrolled in a class, in enrollment order, with the
    /// current count against the capacity.
    pub fn class_roster(
        &self,
        command: ClassRosterCommand,
    ) -> Result<ClassRosterResult, EnrollmentError> {
        let class = self
            .class_repository
            .get_class(command.class_id)?
            .ok_or(EnrollmentError::ClassNotFound(command.class_id))?;

        let mut members = Vec::new();
        for member_id in self.enrollment_repository.members_of_class(class.id)? {
            if let Some(member) = self.member_repository.get_member(member_id)? {
                members.push(member);
            }
        }

        let enrolled_count = members.len();
        let capacity = class.capacity;
        Ok(ClassRosterResult {
            class,
            members,
            enrolled_count,
            capacity,
        })
    }

    /// Current enrollment count for a class.
    pub fn count_for_class(&self, class_id: ClassId) -> Result<usize, EnrollmentError> {
        Ok(self.enrollment_repository.count_for_class(class_id)?)
    }
}
