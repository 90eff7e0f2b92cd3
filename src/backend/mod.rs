//! # Backend Module
//!
//! Synchronous, in-memory backend for the gym tracker. A presentation
//! layer constructs one [`Backend`] and drives the domain services on it
//! directly; there is no IO or async layer in between.

use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use storage::memory::MemoryConnection;

/// Main backend struct that orchestrates all services over one shared
/// in-memory connection.
pub struct Backend {
    pub member_service: domain::MemberService,
    pub class_service: domain::ClassService,
    pub enrollment_service: domain::EnrollmentService,
    pub attendance_service: domain::AttendanceService,
    pub statistics_service: domain::StatisticsService,
}

impl Backend {
    /// Create a new backend instance with all services over a fresh,
    /// empty store.
    pub fn new() -> Self {
        let connection = Arc::new(MemoryConnection::new());

        Backend {
            member_service: domain::MemberService::new(connection.clone()),
            class_service: domain::ClassService::new(connection.clone()),
            enrollment_service: domain::EnrollmentService::new(connection.clone()),
            attendance_service: domain::AttendanceService::new(connection.clone()),
            statistics_service: domain::StatisticsService::new(connection),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}
