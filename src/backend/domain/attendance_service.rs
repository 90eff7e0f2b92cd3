//! Attendance matrix service.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info};

use crate::backend::domain::commands::attendance::{
    AttendanceSummary, ClassAttendanceCommand, ClassAttendanceResult, EnsureSlotsResult,
    MemberAttendanceCommand, MemberAttendanceResult, RecordAttendanceCommand,
    RecordAttendanceResult,
};
use crate::backend::domain::models::attendance::AttendanceError;
use crate::backend::domain::models::gym_class::ClassId;
use crate::backend::domain::models::member::MemberId;
use crate::backend::domain::validation::parse_date;
use crate::backend::storage::memory::{
    AttendanceRepository, ClassRepository, MemberRepository, MemoryConnection,
};
use crate::backend::storage::traits::{AttendanceStorage, ClassStorage, MemberStorage};

/// Service for the attendance matrix.
///
/// The matrix covers the full member x class cross product, not just
/// enrolled pairs: recording works for any id pair and creates the slot on
/// demand, which also covers walk-ins and since-removed enrollments.
#[derive(Clone)]
pub struct AttendanceService {
    member_repository: MemberRepository,
    class_repository: ClassRepository,
    attendance_repository: AttendanceRepository,
}

impl AttendanceService {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self {
            member_repository: MemberRepository::new(connection.clone()),
            class_repository: ClassRepository::new(connection.clone()),
            attendance_repository: AttendanceRepository::new(connection),
        }
    }

    /// Idempotently create an empty slot for every (member, class) pair in
    /// the registries. The registry services already call this after every
    /// creation; it is exposed for callers that seed stores directly.
    pub fn ensure_slots(&self) -> Result<EnsureSlotsResult, AttendanceError> {
        let created = self.attendance_repository.materialize_slots()?;
        Ok(EnsureSlotsResult { created })
    }

    /// Record a member's presence at a class on a date (`YYYY-MM-DD`).
    /// Recording the same date twice is rejected and leaves the slot
    /// unchanged.
    pub fn record_attendance(
        &self,
        command: RecordAttendanceCommand,
    ) -> Result<RecordAttendanceResult, AttendanceError> {
        let date = parse_date("attendance date", &command.date)?;

        let appended =
            self.attendance_repository
                .record_date(command.member_id, command.class_id, date)?;
        if !appended {
            debug!(
                "Attendance already recorded: member {} class {} on {}",
                command.member_id, command.class_id, date
            );
            return Err(AttendanceError::DuplicateDate {
                member_id: command.member_id,
                class_id: command.class_id,
                date,
            });
        }

        info!(
            "Recorded attendance: member {} at class {} on {}",
            command.member_id, command.class_id, date
        );

        // record_date just created the slot, so it is always present here.
        let slot = self
            .attendance_repository
            .get_slot(command.member_id, command.class_id)?
            .ok_or_else(|| anyhow::anyhow!("attendance slot vanished after record"))?;

        let success_message = format!(
            "Attendance recorded for member {} in class {} on {}",
            command.member_id, command.class_id, date
        );
        Ok(RecordAttendanceResult { slot, success_message })
    }

    /// Attendance counts per class for one member, skipping empty slots.
    pub fn member_attendance(
        &self,
        command: MemberAttendanceCommand,
    ) -> Result<MemberAttendanceResult, AttendanceError> {
        if self.member_repository.get_member(command.member_id)?.is_none() {
            return Err(AttendanceError::MemberNotFound(command.member_id));
        }

        let mut per_class = Vec::new();
        let mut total = 0;
        for slot in self.attendance_repository.list_slots()? {
            if slot.member_id == command.member_id && !slot.dates.is_empty() {
                per_class.push((slot.class_id, slot.count()));
                total += slot.count();
            }
        }

        Ok(MemberAttendanceResult {
            member_id: command.member_id,
            per_class,
            total,
        })
    }

    /// Attendance counts per member for one class, skipping empty slots.
    pub fn class_attendance(
        &self,
        command: ClassAttendanceCommand,
    ) -> Result<ClassAttendanceResult, AttendanceError> {
        if self.class_repository.get_class(command.class_id)?.is_none() {
            return Err(AttendanceError::ClassNotFound(command.class_id));
        }

        let mut per_member = Vec::new();
        let mut total = 0;
        for slot in self.attendance_repository.list_slots()? {
            if slot.class_id == command.class_id && !slot.dates.is_empty() {
                per_member.push((slot.member_id, slot.count()));
                total += slot.count();
            }
        }

        let members_attended = per_member.len();
        Ok(ClassAttendanceResult {
            class_id: command.class_id,
            per_member,
            total,
            members_attended,
        })
    }

    /// Aggregate view over the whole matrix: total records, busiest member
    /// and class (first-seen wins on ties), and averages over the registry
    /// sizes. `None` wherever there is no data to aggregate.
    pub fn summary(&self) -> Result<AttendanceSummary, AttendanceError> {
        let slots = self.attendance_repository.list_slots()?;

        let mut total_records = 0;
        let mut per_member: BTreeMap<MemberId, usize> = BTreeMap::new();
        let mut per_class: BTreeMap<ClassId, usize> = BTreeMap::new();
        for slot in &slots {
            total_records += slot.count();
            *per_member.entry(slot.member_id).or_insert(0) += slot.count();
            *per_class.entry(slot.class_id).or_insert(0) += slot.count();
        }

        let member_count = self.member_repository.list_members()?.len();
        let class_count = self.class_repository.list_classes()?.len();

        Ok(AttendanceSummary {
            total_records,
            busiest_member: argmax(&per_member),
            busiest_class: argmax(&per_class),
            avg_per_member: average(total_records, member_count),
            avg_per_class: average(total_records, class_count),
        })
    }
}

/// Key with the highest count; the lowest (= first-created) key wins ties.
/// `None` when every count is zero or the map is empty.
fn argmax(counts: &BTreeMap<u32, usize>) -> Option<(u32, usize)> {
    let mut best: Option<(u32, usize)> = None;
    for (&key, &count) in counts {
        if count > 0 && best.map_or(true, |(_, max)| count > max) {
            best = Some((key, count));
        }
    }
    best
}

fn average(total: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(total as f64 / denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::class_service::ClassService;
    use crate::backend::domain::commands::classes::CreateClassCommand;
    use crate::backend::domain::commands::members::CreateMemberCommand;
    use crate::backend::domain::member_service::MemberService;
    use crate::backend::domain::validation::ValidationError;

    struct Fixture {
        members: MemberService,
        classes: ClassService,
        attendance: AttendanceService,
    }

    fn setup_test() -> Fixture {
        let connection = Arc::new(MemoryConnection::new());
        Fixture {
            members: MemberService::new(connection.clone()),
            classes: ClassService::new(connection.clone()),
            attendance: AttendanceService::new(connection),
        }
    }

    impl Fixture {
        fn add_member(&self, name: &str, dni: &str) -> MemberId {
            self.members
                .create_member(CreateMemberCommand {
                    first_name: name.to_string(),
                    last_name: "Perez".to_string(),
                    dni: dni.to_string(),
                    email: "test@example.com".to_string(),
                    phone: "4567 8901".to_string(),
                    birthdate: "1990-01-01".to_string(),
                    address: String::new(),
                    joined_on: None,
                })
                .unwrap()
                .member
                .id
        }

        fn add_class(&self, name: &str) -> ClassId {
            self.classes
                .create_class(CreateClassCommand {
                    name: name.to_string(),
                    instructor: "Laura Gomez".to_string(),
                    capacity: 10,
                    schedule: "Monday 18:00".to_string(),
                    duration_minutes: 60,
                })
                .unwrap()
                .class
                .id
        }

        fn record(&self, member_id: MemberId, class_id: ClassId, date: &str) -> Result<RecordAttendanceResult, AttendanceError> {
            self.attendance.record_attendance(RecordAttendanceCommand {
                member_id,
                class_id,
                date: date.to_string(),
            })
        }
    }

    #[test]
    fn test_slots_materialized_on_creation() {
        let fx = setup_test();
        fx.add_member("Ana", "12345678");
        fx.add_member("Berta", "87654321");
        fx.add_class("Yoga");

        // 2 members x 1 class already materialized by the registry services.
        assert_eq!(fx.attendance.ensure_slots().unwrap().created, 0);

        fx.add_class("Boxing");
        assert_eq!(fx.attendance.ensure_slots().unwrap().created, 0);
    }

    #[test]
    fn test_record_attendance_and_duplicate() {
        let fx = setup_test();
        let member = fx.add_member("Ana", "12345678");
        let class = fx.add_class("Yoga");

        let first = fx.record(member, class, "2024-03-01").unwrap();
        assert_eq!(first.slot.dates.len(), 1);

        let duplicate = fx.record(member, class, "2024-03-01");
        assert!(matches!(duplicate, Err(AttendanceError::DuplicateDate { .. })));

        // The slot is unchanged after the rejected duplicate.
        let again = fx.record(member, class, "2024-03-08").unwrap();
        assert_eq!(
            again.slot.dates.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["2024-03-01", "2024-03-08"]
        );
    }

    #[test]
    fn test_record_attendance_rejects_bad_date() {
        let fx = setup_test();
        let result = fx.record(1, 1, "01/03/2024");
        assert!(matches!(
            result,
            Err(AttendanceError::Validation(ValidationError::InvalidDate { .. }))
        ));
    }

    #[test]
    fn test_record_without_slot_creates_it() {
        let fx = setup_test();
        // No members or classes registered at all.
        let result = fx.record(5, 9, "2024-03-01").unwrap();
        assert_eq!(result.slot.member_id, 5);
        assert_eq!(result.slot.class_id, 9);
        assert_eq!(result.slot.dates.len(), 1);
    }

    #[test]
    fn test_member_and_class_projections() {
        let fx = setup_test();
        let ana = fx.add_member("Ana", "12345678");
        let berta = fx.add_member("Berta", "87654321");
        let yoga = fx.add_class("Yoga");
        let boxing = fx.add_class("Boxing");

        fx.record(ana, yoga, "2024-03-01").unwrap();
        fx.record(ana, yoga, "2024-03-08").unwrap();
        fx.record(ana, boxing, "2024-03-02").unwrap();
        fx.record(berta, yoga, "2024-03-01").unwrap();

        let ana_report = fx
            .attendance
            .member_attendance(MemberAttendanceCommand { member_id: ana })
            .unwrap();
        assert_eq!(ana_report.per_class, vec![(yoga, 2), (boxing, 1)]);
        assert_eq!(ana_report.total, 3);

        let yoga_report = fx
            .attendance
            .class_attendance(ClassAttendanceCommand { class_id: yoga })
            .unwrap();
        assert_eq!(yoga_report.per_member, vec![(ana, 2), (berta, 1)]);
        assert_eq!(yoga_report.total, 3);
        assert_eq!(yoga_report.members_attended, 2);
    }

    #[test]
    fn test_projections_require_existing_ids() {
        let fx = setup_test();
        assert!(matches!(
            fx.attendance.member_attendance(MemberAttendanceCommand { member_id: 4 }),
            Err(AttendanceError::MemberNotFound(4))
        ));
        assert!(matches!(
            fx.attendance.class_attendance(ClassAttendanceCommand { class_id: 4 }),
            Err(AttendanceError::ClassNotFound(4))
        ));
    }

    #[test]
    fn test_summary() {
        let fx = setup_test();
        let ana = fx.add_member("Ana", "12345678");
        let berta = fx.add_member("Berta", "87654321");
        let yoga = fx.add_class("Yoga");
        let boxing = fx.add_class("Boxing");

        fx.record(ana, yoga, "2024-03-01").unwrap();
        fx.record(ana, boxing, "2024-03-02").unwrap();
        fx.record(berta, yoga, "2024-03-01").unwrap();

        let summary = fx.attendance.summary().unwrap();
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.busiest_member, Some((ana, 2)));
        assert_eq!(summary.busiest_class, Some((yoga, 2)));
        assert_eq!(summary.avg_per_member, Some(1.5));
        assert_eq!(summary.avg_per_class, Some(1.5));
    }

    #[test]
    fn test_summary_tie_breaks_first_seen() {
        let fx = setup_test();
        let ana = fx.add_member("Ana", "12345678");
        let berta = fx.add_member("Berta", "87654321");
        let yoga = fx.add_class("Yoga");

        // Both members end up with one record each; the earlier id wins.
        fx.record(berta, yoga, "2024-03-01").unwrap();
        fx.record(ana, yoga, "2024-03-01").unwrap();

        let summary = fx.attendance.summary().unwrap();
        assert_eq!(summary.busiest_member, Some((ana, 1)));
    }

    #[test]
    fn test_summary_empty() {
        let fx = setup_test();
        let summary = fx.attendance.summary().unwrap();
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.busiest_member, None);
        assert_eq!(summary.busiest_class, None);
        assert_eq!(summary.avg_per_member, None);
        assert_eq!(summary.avg_per_class, None);
    }
}
