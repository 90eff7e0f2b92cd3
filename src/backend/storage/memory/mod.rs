//! In-memory storage backend.
//!
//! One [`MemoryConnection`] owns all four stores, each behind its own
//! mutex. Repositories share the connection through an `Arc` and implement
//! the storage traits over it. Mutation and capacity checks are
//! check-then-act sequences at the service layer, so a multi-client caller
//! must serialize access per store; the per-store mutexes give exactly
//! that.

mod attendance_repository;
mod class_repository;
mod enrollment_repository;
mod member_repository;

pub use attendance_repository::AttendanceRepository;
pub use class_repository::ClassRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use member_repository::MemberRepository;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::backend::domain::models::enrollment::Enrollment;
use crate::backend::domain::models::gym_class::{ClassId, GymClass};
use crate::backend::domain::models::member::{Member, MemberId};

/// Next id for a registry snapshot: 1 when empty, otherwise max + 1.
pub fn next_id<V>(rows: &BTreeMap<u32, V>) -> u32 {
    rows.keys().next_back().map_or(1, |max| max + 1)
}

/// An id-keyed table with a high-water-mark id sequence. The sequence only
/// ever moves forward, so ids are never reused even after deletions.
#[derive(Debug)]
pub(super) struct Table<V> {
    pub rows: BTreeMap<u32, V>,
    next_id: u32,
}

impl<V> Table<V> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Claim the next id in the sequence.
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id.max(next_id(&self.rows));
        self.next_id = id + 1;
        id
    }
}

/// Shared in-memory state for every repository. One mutex per store.
#[derive(Debug)]
pub struct MemoryConnection {
    pub(super) members: Mutex<Table<Member>>,
    pub(super) classes: Mutex<Table<GymClass>>,
    pub(super) enrollments: Mutex<Vec<Enrollment>>,
    pub(super) attendance: Mutex<BTreeMap<(MemberId, ClassId), Vec<NaiveDate>>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(Table::new()),
            classes: Mutex::new(Table::new()),
            enrollments: Mutex::new(Vec::new()),
            attendance: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock a store, surfacing poisoning as a storage error instead of
/// panicking in the domain layer.
pub(super) fn lock<T>(store: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    store.lock().map_err(|_| anyhow!("store mutex poisoned"))
}
