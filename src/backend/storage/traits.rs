//! # Storage Traits
//!
//! Storage abstraction for the four stores the domain layer works with:
//! members, classes, the enrollment ledger, and the attendance matrix.
//! The domain services only depend on these traits, so a different backing
//! store can be swapped in without touching them.

use anyhow::Result;
use chrono::NaiveDate;

use crate::backend::domain::models::attendance::AttendanceSlot;
use crate::backend::domain::models::enrollment::Enrollment;
use crate::backend::domain::models::gym_class::{ClassId, GymClass, NewGymClass};
use crate::backend::domain::models::member::{Member, MemberId, NewMember};

/// Interface for member registry operations.
pub trait MemberStorage: Send + Sync {
    /// Store a new member, assigning the next id in the sequence.
    fn store_member(&self, new_member: NewMember) -> Result<Member>;

    /// Retrieve a specific member by id.
    fn get_member(&self, member_id: MemberId) -> Result<Option<Member>>;

    /// List all members in id (= creation) order.
    fn list_members(&self) -> Result<Vec<Member>>;

    /// Overwrite an existing member record.
    fn update_member(&self, member: &Member) -> Result<()>;

    /// Delete a member by id. Returns true if a record was removed.
    fn delete_member(&self, member_id: MemberId) -> Result<bool>;

    /// Check whether a DNI is already held by a member other than `exclude`.
    fn dni_in_use(&self, dni: &str, exclude: Option<MemberId>) -> Result<bool>;
}

/// Interface for class registry operations.
pub trait ClassStorage: Send + Sync {
    /// Store a new class, assigning the next id in the sequence.
    fn store_class(&self, new_class: NewGymClass) -> Result<GymClass>;

    /// Retrieve a specific class by id.
    fn get_class(&self, class_id: ClassId) -> Result<Option<GymClass>>;

    /// List all classes in id (= creation) order.
    fn list_classes(&self) -> Result<Vec<GymClass>>;

    /// Overwrite an existing class record.
    fn update_class(&self, class: &GymClass) -> Result<()>;

    /// Delete a class by id. Returns true if a record was removed.
    fn delete_class(&self, class_id: ClassId) -> Result<bool>;
}

/// Interface for the enrollment ledger.
///
/// The ledger is insertion-ordered and never holds the same pair twice;
/// `add_enrollment` assumes the caller has already checked the
/// preconditions (existence, active flags, duplicates, capacity).
pub trait EnrollmentStorage: Send + Sync {
    /// Append a pair to the ledger.
    fn add_enrollment(&self, enrollment: Enrollment) -> Result<()>;

    /// Remove a pair. Returns true if it was present.
    fn remove_enrollment(&self, enrollment: Enrollment) -> Result<bool>;

    /// Whether the pair is currently in the ledger.
    fn is_enrolled(&self, member_id: MemberId, class_id: ClassId) -> Result<bool>;

    /// All pairs in insertion order.
    fn list_enrollments(&self) -> Result<Vec<Enrollment>>;

    /// Class ids a member is enrolled in, in enrollment order.
    fn classes_of_member(&self, member_id: MemberId) -> Result<Vec<ClassId>>;

    /// Member ids enrolled in a class, in enrollment order.
    fn members_of_class(&self, class_id: ClassId) -> Result<Vec<MemberId>>;

    /// Current enrollment count for a class.
    fn count_for_class(&self, class_id: ClassId) -> Result<usize>;

    /// Drop every pair referencing the member. Returns how many were removed.
    fn remove_for_member(&self, member_id: MemberId) -> Result<usize>;

    /// Drop every pair referencing the class. Returns how many were removed.
    fn remove_for_class(&self, class_id: ClassId) -> Result<usize>;
}

/// Interface for the attendance matrix.
pub trait AttendanceStorage: Send + Sync {
    /// Create an empty slot for every (member, class) pair currently in the
    /// registries that does not have one yet. Idempotent. Returns how many
    /// slots were created.
    fn materialize_slots(&self) -> Result<usize>;

    /// Append a date to a slot, creating the slot if absent. Returns false
    /// if the date was already recorded (and leaves the slot unchanged).
    fn record_date(&self, member_id: MemberId, class_id: ClassId, date: NaiveDate) -> Result<bool>;

    /// Retrieve one slot.
    fn get_slot(&self, member_id: MemberId, class_id: ClassId) -> Result<Option<AttendanceSlot>>;

    /// All slots, ordered by (member id, class id), empty ones included.
    fn list_slots(&self) -> Result<Vec<AttendanceSlot>>;

    /// Drop every slot referencing the member. Returns how many were removed.
    fn remove_slots_for_member(&self, member_id: MemberId) -> Result<usize>;

    /// Drop every slot referencing the class. Returns how many were removed.
    fn remove_slots_for_class(&self, class_id: ClassId) -> Result<usize>;
}
