//! Read-only statistics over the member registry, class registry, and
//! enrollment ledger.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use log::debug;

use crate::backend::domain::commands::statistics::{
    ClassEnrollmentCount, ClassOccupancy, StatisticsReport,
};
use crate::backend::domain::models::gym_class::ClassId;
use crate::backend::storage::memory::{
    ClassRepository, EnrollmentRepository, MemberRepository, MemoryConnection,
};
use crate::backend::storage::traits::{ClassStorage, EnrollmentStorage, MemberStorage};

/// Service computing the aggregate report. Never mutates any store.
#[derive(Clone)]
pub struct StatisticsService {
    member_repository: MemberRepository,
    class_repository: ClassRepository,
    enrollment_repository: EnrollmentRepository,
}

impl StatisticsService {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self {
            member_repository: MemberRepository::new(connection.clone()),
            class_repository: ClassRepository::new(connection.clone()),
            enrollment_repository: EnrollmentRepository::new(connection),
        }
    }

    /// Snapshot the three stores and compute the report. Every ratio with a
    /// zero denominator comes back as `None` instead of failing.
    pub fn get_statistics(&self) -> Result<StatisticsReport> {
        let members = self.member_repository.list_members()?;
        let classes = self.class_repository.list_classes()?;
        let enrollments = self.enrollment_repository.list_enrollments()?;

        debug!(
            "Computing statistics over {} members, {} classes, {} enrollments",
            members.len(),
            classes.len(),
            enrollments.len()
        );

        let total_members = members.len();
        let active_members = members.iter().filter(|member| member.active).count();
        let active_member_pct = if total_members > 0 {
            Some(active_members as f64 / total_members as f64 * 100.0)
        } else {
            None
        };

        let total_classes = classes.len();
        let active_classes = classes.iter().filter(|class| class.active).count();

        // Enrollment counts per class; classes keeps first-seen (id) order,
        // which decides argmax ties.
        let mut per_class: BTreeMap<ClassId, usize> = BTreeMap::new();
        for enrollment in &enrollments {
            *per_class.entry(enrollment.class_id).or_insert(0) += 1;
        }

        let mut most_enrolled_class: Option<ClassEnrollmentCount> = None;
        for class in &classes {
            let enrolled = per_class.get(&class.id).copied().unwrap_or(0);
            if enrolled == 0 {
                continue;
            }
            let beats = most_enrolled_class
                .as_ref()
                .map_or(true, |best| enrolled > best.enrolled);
            if beats {
                most_enrolled_class = Some(ClassEnrollmentCount {
                    class_id: class.id,
                    name: class.name.clone(),
                    enrolled,
                });
            }
        }

        let avg_enrollments_per_class = if total_classes > 0 {
            Some(enrollments.len() as f64 / total_classes as f64)
        } else {
            None
        };

        let occupancy: Vec<ClassOccupancy> = classes
            .iter()
            .map(|class| {
                let enrolled = per_class.get(&class.id).copied().unwrap_or(0);
                ClassOccupancy {
                    class_id: class.id,
                    name: class.name.clone(),
                    enrolled,
                    capacity: class.capacity,
                    occupancy_pct: enrolled as f64 / class.capacity as f64 * 100.0,
                }
            })
            .collect();

        let classes_without_enrollments = occupancy
            .iter()
            .filter(|entry| entry.enrolled == 0)
            .count();

        Ok(StatisticsReport {
            total_members,
            active_members,
            active_member_pct,
            total_classes,
            active_classes,
            total_enrollments: enrollments.len(),
            most_enrolled_class,
            avg_enrollments_per_class,
            occupancy,
            classes_without_enrollments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::class_service::ClassService;
    use crate::backend::domain::commands::classes::CreateClassCommand;
    use crate::backend::domain::commands::enrollments::EnrollCommand;
    use crate::backend::domain::commands::members::{CreateMemberCommand, UpdateMemberCommand};
    use crate::backend::domain::enrollment_service::EnrollmentService;
    use crate::backend::domain::member_service::MemberService;
    use crate::backend::domain::models::gym_class::ClassId;
    use crate::backend::domain::models::member::MemberId;

    struct Fixture {
        members: MemberService,
        classes: ClassService,
        enrollments: EnrollmentService,
        statistics: StatisticsService,
    }

    fn setup_test() -> Fixture {
        let connection = Arc::new(MemoryConnection::new());
        Fixture {
            members: MemberService::new(connection.clone()),
            classes: ClassService::new(connection.clone()),
            enrollments: EnrollmentService::new(connection.clone()),
            statistics: StatisticsService::new(connection),
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

        fn add_class(&self, name: &str, capacity: u32) -> ClassId {
            self.classes
                .create_class(CreateClassCommand {
                    name: name.to_string(),
                    instructor: "Laura Gomez".to_string(),
                    capacity,
                    schedule: "Monday 18:00".to_string(),
                    duration_minutes: 60,
                })
                .unwrap()
                .class
                .id
        }

        fn enroll(&self, member_id: MemberId, class_id: ClassId) {
            self.enrollments.enroll(EnrollCommand { member_id, class_id }).unwrap();
        }
    }

    #[test]
    fn test_empty_report() {
        let fx = setup_test();
        let report = fx.statistics.get_statistics().unwrap();
        assert_eq!(report.total_members, 0);
        assert_eq!(report.active_member_pct, None);
        assert_eq!(report.avg_enrollments_per_class, None);
        assert_eq!(report.most_enrolled_class, None);
        assert!(report.occupancy.is_empty());
    }

    #[test]
    fn test_averages_and_occupancy() {
        let fx = setup_test();
        let ana = fx.add_member("Ana", "11111111");
        let berta = fx.add_member("Berta", "22222222");
        let carla = fx.add_member("Carla", "33333333");
        let class_a = fx.add_class("Yoga", 10);
        let class_b = fx.add_class("Boxing", 10);

        // 2 enrollments in A, 1 in B.
        fx.enroll(ana, class_a);
        fx.enroll(berta, class_a);
        fx.enroll(carla, class_b);

        let report = fx.statistics.get_statistics().unwrap();
        assert_eq!(report.total_enrollments, 3);
        assert_eq!(report.avg_enrollments_per_class, Some(1.5));

        assert_eq!(report.occupancy.len(), 2);
        assert_eq!(report.occupancy[0].class_id, class_a);
        assert_eq!(report.occupancy[0].occupancy_pct, 20.0);
        assert_eq!(report.occupancy[1].class_id, class_b);
        assert_eq!(report.occupancy[1].occupancy_pct, 10.0);

        let most = report.most_enrolled_class.unwrap();
        assert_eq!(most.class_id, class_a);
        assert_eq!(most.enrolled, 2);
    }

    #[test]
    fn test_active_percentage() {
        let fx = setup_test();
        let ana = fx.add_member("Ana", "11111111");
        fx.add_member("Berta", "22222222");
        fx.add_member("Carla", "33333333");
        fx.add_member("Diana", "44444444");

        fx.members
            .update_member(UpdateMemberCommand {
                member_id: ana,
                active: Some(false),
                ..Default::default()
            })
            .unwrap();

        let report = fx.statistics.get_statistics().unwrap();
        assert_eq!(report.total_members, 4);
        assert_eq!(report.active_members, 3);
        assert_eq!(report.active_member_pct, Some(75.0));
    }

    #[test]
    fn test_most_enrolled_tie_breaks_first_seen() {
        let fx = setup_test();
        let ana = fx.add_member("Ana", "11111111");
        let berta = fx.add_member("Berta", "22222222");
        let yoga = fx.add_class("Yoga", 10);
        let boxing = fx.add_class("Boxing", 10);

        // One enrollment each, in reverse creation order.
        fx.enroll(ana, boxing);
        fx.enroll(berta, yoga);

        let most = fx.statistics.get_statistics().unwrap().most_enrolled_class.unwrap();
        assert_eq!(most.class_id, yoga);
    }

    #[test]
    fn test_classes_without_enrollments() {
        let fx = setup_test();
        let ana = fx.add_member("Ana", "11111111");
        let yoga = fx.add_class("Yoga", 10);
        fx.add_class("Boxing", 10);
        fx.add_class("Pilates", 10);

        fx.enroll(ana, yoga);

        let report = fx.statistics.get_statistics().unwrap();
        assert_eq!(report.total_classes, 3);
        assert_eq!(report.active_classes, 3);
        assert_eq!(report.classes_without_enrollments, 2);
    }
}
