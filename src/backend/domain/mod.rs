//! Domain layer: models, commands, validation, and the services that
//! enforce the cross-store consistency rules.

pub mod attendance_service;
pub mod class_service;
pub mod commands;
pub mod enrollment_service;
pub mod member_service;
pub mod models;
pub mod statistics_service;
pub mod validation;

pub use attendance_service::AttendanceService;
pub use class_service::ClassService;
pub use enrollment_service::EnrollmentService;
pub use member_service::MemberService;
pub use statistics_service::StatisticsService;
