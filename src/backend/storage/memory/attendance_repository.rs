//! In-memory attendance matrix.

use std::collections::btree_map::Entry;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use log::debug;

use super::{lock, MemoryConnection};
use crate::backend::domain::models::attendance::AttendanceSlot;
use crate::backend::domain::models::gym_class::ClassId;
use crate::backend::domain::models::member::MemberId;
use crate::backend::storage::traits::AttendanceStorage;

/// Attendance matrix over the shared in-memory connection. Keys are
/// (member id, class id) pairs; values are the dates attended, unique and
/// in recording order.
#[derive(Clone)]
pub struct AttendanceRepository {
    connection: Arc<MemoryConnection>,
}

impl AttendanceRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl AttendanceStorage for AttendanceRepository {
    fn materialize_slots(&self) -> Result<usize> {
        // Full member x class cross product, regardless of enrollment:
        // the matrix deliberately tracks walk-ins and past enrollments too.
        let member_ids: Vec<MemberId> = {
            let members = lock(&self.connection.members)?;
            members.rows.keys().copied().collect()
        };
        let class_ids: Vec<ClassId> = {
            let classes = lock(&self.connection.classes)?;
            classes.rows.keys().copied().collect()
        };

        let mut matrix = lock(&self.connection.attendance)?;
        let mut created = 0;
        for &member_id in &member_ids {
            for &class_id in &class_ids {
                if let Entry::Vacant(slot) = matrix.entry((member_id, class_id)) {
                    slot.insert(Vec::new());
                    created += 1;
                }
            }
        }
        if created > 0 {
            debug!("Materialized {} new attendance slots", created);
        }
        Ok(created)
    }

    fn record_date(&self, member_id: MemberId, class_id: ClassId, date: NaiveDate) -> Result<bool> {
        let mut matrix = lock(&self.connection.attendance)?;
        let dates = matrix.entry((member_id, class_id)).or_default();
        if dates.contains(&date) {
            return Ok(false);
        }
        dates.push(date);
        Ok(true)
    }

    fn get_slot(&self, member_id: MemberId, class_id: ClassId) -> Result<Option<AttendanceSlot>> {
        let matrix = lock(&self.connection.attendance)?;
        Ok(matrix.get(&(member_id, class_id)).map(|dates| AttendanceSlot {
            member_id,
            class_id,
            dates: dates.clone(),
        }))
    }

    fn list_slots(&self) -> Result<Vec<AttendanceSlot>> {
        let matrix = lock(&self.connection.attendance)?;
        Ok(matrix
            .iter()
            .map(|(&(member_id, class_id), dates)| AttendanceSlot {
                member_id,
                class_id,
                dates: dates.clone(),
            })
            .collect())
    }

    fn remove_slots_for_member(&self, member_id: MemberId) -> Result<usize> {
        let mut matrix = lock(&self.connection.attendance)?;
        let before = matrix.len();
        matrix.retain(|&(slot_member, _), _| slot_member != member_id);
        Ok(before - matrix.len())
    }

    fn remove_slots_for_class(&self, class_id: ClassId) -> Result<usize> {
        let mut matrix = lock(&self.connection.attendance)?;
        let before = matrix.len();
        matrix.retain(|&(_, slot_class), _| slot_class != class_id);
        Ok(before - matrix.len())
    }
}
