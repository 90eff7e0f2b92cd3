//! In-memory enrollment ledger.

use std::sync::Arc;

use anyhow::{anyhow, Result};

use super::{lock, MemoryConnection};
use crate::backend::domain::models::enrollment::Enrollment;
use crate::backend::domain::models::gym_class::ClassId;
use crate::backend::domain::models::member::MemberId;
use crate::backend::storage::traits::EnrollmentStorage;

/// Enrollment ledger over the shared in-memory connection. Pairs are kept
/// in insertion order; uniqueness is the caller's precondition and is
/// still asserted on append.
#[derive(Clone)]
pub struct EnrollmentRepository {
    connection: Arc<MemoryConnection>,
}

impl EnrollmentRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl EnrollmentStorage for EnrollmentRepository {
    fn add_enrollment(&self, enrollment: Enrollment) -> Result<()> {
        let mut ledger = lock(&self.connection.enrollments)?;
        if ledger.contains(&enrollment) {
            return Err(anyhow!(
                "enrollment ({}, {}) already in ledger",
                enrollment.member_id,
                enrollment.class_id
            ));
        }
        ledger.push(enrollment);
        Ok(())
    }

    fn remove_enrollment(&self, enrollment: Enrollment) -> Result<bool> {
        let mut ledger = lock(&self.connection.enrollments)?;
        match ledger.iter().position(|entry| *entry == enrollment) {
            Some(index) => {
                ledger.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn is_enrolled(&self, member_id: MemberId, class_id: ClassId) -> Result<bool> {
        let ledger = lock(&self.connection.enrollments)?;
        Ok(ledger.contains(&Enrollment::new(member_id, class_id)))
    }

    fn list_enrollments(&self) -> Result<Vec<Enrollment>> {
        let ledger = lock(&self.connection.enrollments)?;
        Ok(ledger.clone())
    }

    fn classes_of_member(&self, member_id: MemberId) -> Result<Vec<ClassId>> {
        let ledger = lock(&self.connection.enrollments)?;
        Ok(ledger
            .iter()
            .filter(|entry| entry.member_id == member_id)
            .map(|entry| entry.class_id)
            .collect())
    }

    fn members_of_class(&self, class_id: ClassId) -> Result<Vec<MemberId>> {
        let ledger = lock(&self.connection.enrollments)?;
        Ok(ledger
            .iter()
            .filter(|entry| entry.class_id == class_id)
            .map(|entry| entry.member_id)
            .collect())
    }

    fn count_for_class(&self, class_id: ClassId) -> Result<usize> {
        let ledger = lock(&self.connection.enrollments)?;
        Ok(ledger.iter().filter(|entry| entry.class_id == class_id).count())
    }

    fn remove_for_member(&self, member_id: MemberId) -> Result<usize> {
        let mut ledger = lock(&self.connection.enrollments)?;
        let before = ledger.len();
        ledger.retain(|entry| entry.member_id != member_id);
        Ok(before - ledger.len())
    }

    fn remove_for_class(&self, class_id: ClassId) -> Result<usize> {
        let mut ledger = lock(&self.connection.enrollments)?;
        let before = ledger.len();
        ledger.retain(|entry| entry.class_id != class_id);
        Ok(before - ledger.len())
    }
}
