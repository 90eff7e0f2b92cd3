//! Domain-level command and query types.
//!
//! These structs are the inputs and outputs of the services in this layer.
//! A presentation layer (CLI, TUI, HTTP handler) is responsible for mapping
//! whatever it collects from the user onto these types.

pub mod members {
    use crate::backend::domain::models::member::{Member, MemberId};

    /// Input for registering a new member. Dates are `YYYY-MM-DD` strings;
    /// `joined_on` defaults to today when omitted.
    #[derive(Debug, Clone)]
    pub struct CreateMemberCommand {
        pub first_name: String,
        pub last_name: String,
        pub dni: String,
        pub email: String,
        pub phone: String,
        pub birthdate: String,
        pub address: String,
        pub joined_on: Option<String>,
    }

    /// Input for updating a member. `None` fields are left untouched.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateMemberCommand {
        pub member_id: MemberId,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub dni: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub birthdate: Option<String>,
        pub address: Option<String>,
        pub active: Option<bool>,
    }

    #[derive(Debug, Clone)]
    pub struct GetMemberCommand {
        pub member_id: MemberId,
    }

    /// Query parameters for listing members.
    #[derive(Debug, Clone, Default)]
    pub struct ListMembersQuery {
        pub active_only: bool,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteMemberCommand {
        pub member_id: MemberId,
    }

    #[derive(Debug, Clone)]
    pub struct CreateMemberResult {
        pub member: Member,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateMemberResult {
        pub member: Member,
    }

    #[derive(Debug, Clone)]
    pub struct GetMemberResult {
        pub member: Option<Member>,
    }

    #[derive(Debug, Clone)]
    pub struct ListMembersResult {
        pub members: Vec<Member>,
    }

    /// Result of deleting a member, including how far the cascade reached.
    #[derive(Debug, Clone)]
    pub struct DeleteMemberResult {
        pub member: Member,
        pub removed_enrollments: usize,
        pub removed_attendance_slots: usize,
        pub success_message: String,
    }
}

pub mod classes {
    use crate::backend::domain::models::gym_class::{ClassId, GymClass};

    /// Input for registering a new class.
    #[derive(Debug, Clone)]
    pub struct CreateClassCommand {
        pub name: String,
        pub instructor: String,
        pub capacity: u32,
        pub schedule: String,
        pub duration_minutes: u32,
    }

    /// Input for updating a class. `None` fields are left untouched.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateClassCommand {
        pub class_id: ClassId,
        pub name: Option<String>,
        pub instructor: Option<String>,
        pub capacity: Option<u32>,
        pub schedule: Option<String>,
        pub duration_minutes: Option<u32>,
        pub active: Option<bool>,
    }

    #[derive(Debug, Clone)]
    pub struct GetClassCommand {
        pub class_id: ClassId,
    }

    #[derive(Debug, Clone, Default)]
    pub struct ListClassesQuery {
        pub active_only: bool,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteClassCommand {
        pub class_id: ClassId,
    }

    #[derive(Debug, Clone)]
    pub struct CreateClassResult {
        pub class: GymClass,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateClassResult {
        pub class: GymClass,
    }

    #[derive(Debug, Clone)]
    pub struct GetClassResult {
        pub class: Option<GymClass>,
    }

    #[derive(Debug, Clone)]
    pub struct ListClassesResult {
        pub classes: Vec<GymClass>,
    }

    /// Result of deleting a class, including how far the cascade reached.
    #[derive(Debug, Clone)]
    pub struct DeleteClassResult {
        pub class: GymClass,
        pub removed_enrollments: usize,
        pub removed_attendance_slots: usize,
        pub success_message: String,
    }
}

pub mod enrollments {
    use crate::backend::domain::models::gym_class::{ClassId, GymClass};
    use crate::backend::domain::models::member::{Member, MemberId};

    #[derive(Debug, Clone)]
    pub struct EnrollCommand {
        pub member_id: MemberId,
        pub class_id: ClassId,
    }

    #[derive(Debug, Clone)]
    pub struct UnenrollCommand {
        pub member_id: MemberId,
        pub class_id: ClassId,
    }

    #[derive(Debug, Clone)]
    pub struct MemberScheduleCommand {
        pub member_id: MemberId,
    }

    #[derive(Debug, Clone)]
    pub struct ClassRosterCommand {
        pub class_id: ClassId,
    }

    #[derive(Debug, Clone)]
    pub struct EnrollResult {
        pub member: Member,
        pub class: GymClass,
        /// Enrollment count for the class after this operation.
        pub enrolled_count: usize,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct UnenrollResult {
        pub member: Member,
        pub class: GymClass,
        pub enrolled_count: usize,
        pub success_message: String,
    }

    /// The classes a member is enrolled in, in enrollment order.
    #[derive(Debug, Clone)]
    pub struct MemberScheduleResult {
        pub member: Member,
        pub classes: Vec<GymClass>,
    }

    /// The members enrolled in a class, in enrollment order.
    #[derive(Debug, Clone)]
    pub struct ClassRosterResult {
        pub class: GymClass,
        pub members: Vec<Member>,
        pub enrolled_count: usize,
        pub capacity: u32,
    }
}

pub mod attendance {
    use crate::backend::domain::models::attendance::AttendanceSlot;
    use crate::backend::domain::models::gym_class::ClassId;
    use crate::backend::domain::models::member::MemberId;

    /// Input for recording a member's presence at a class on a date
    /// (`YYYY-MM-DD`).
    #[derive(Debug, Clone)]
    pub struct RecordAttendanceCommand {
        pub member_id: MemberId,
        pub class_id: ClassId,
        pub date: String,
    }

    #[derive(Debug, Clone)]
    pub struct MemberAttendanceCommand {
        pub member_id: MemberId,
    }

    #[derive(Debug, Clone)]
    pub struct ClassAttendanceCommand {
        pub class_id: ClassId,
    }

    #[derive(Debug, Clone)]
    pub struct RecordAttendanceResult {
        /// The updated slot, dates in recording order.
        pub slot: AttendanceSlot,
        pub success_message: String,
    }

    /// Attendance counts per class for one member, non-empty slots only.
    #[derive(Debug, Clone)]
    pub struct MemberAttendanceResult {
        pub member_id: MemberId,
        pub per_class: Vec<(ClassId, usize)>,
        pub total: usize,
    }

    /// Attendance counts per member for one class, non-empty slots only.
    #[derive(Debug, Clone)]
    pub struct ClassAttendanceResult {
        pub class_id: ClassId,
        pub per_member: Vec<(MemberId, usize)>,
        pub total: usize,
        /// How many distinct members attended at least once.
        pub members_attended: usize,
    }

    /// Aggregate view over the whole attendance matrix. `None` fields mean
    /// there is no data to aggregate.
    #[derive(Debug, Clone, PartialEq)]
    pub struct AttendanceSummary {
        pub total_records: usize,
        pub busiest_member: Option<(MemberId, usize)>,
        pub busiest_class: Option<(ClassId, usize)>,
        pub avg_per_member: Option<f64>,
        pub avg_per_class: Option<f64>,
    }

    #[derive(Debug, Clone)]
    pub struct EnsureSlotsResult {
        /// Slots newly created by this call.
        pub created: usize,
    }
}

pub mod statistics {
    use crate::backend::domain::models::gym_class::ClassId;

    /// Enrollment count for a single class.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ClassEnrollmentCount {
        pub class_id: ClassId,
        pub name: String,
        pub enrolled: usize,
    }

    /// Occupancy of a single class: enrolled over capacity.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ClassOccupancy {
        pub class_id: ClassId,
        pub name: String,
        pub enrolled: usize,
        pub capacity: u32,
        pub occupancy_pct: f64,
    }

    /// Read-only snapshot over the member registry, class registry, and
    /// enrollment ledger. `None` fields mean the denominator was zero.
    #[derive(Debug, Clone, PartialEq)]
    pub struct StatisticsReport {
        pub total_members: usize,
        pub active_members: usize,
        pub active_member_pct: Option<f64>,
        pub total_classes: usize,
        pub active_classes: usize,
        pub total_enrollments: usize,
        pub most_enrolled_class: Option<ClassEnrollmentCount>,
        pub avg_enrollments_per_class: Option<f64>,
        pub occupancy: Vec<ClassOccupancy>,
        pub classes_without_enrollments: usize,
    }
}
