//! Class registry service.

use std::sync::Arc;

use log::{info, warn};

use crate::backend::domain::commands::classes::{
    CreateClassCommand, CreateClassResult, DeleteClassCommand, DeleteClassResult, GetClassCommand,
    GetClassResult, ListClassesQuery, ListClassesResult, UpdateClassCommand, UpdateClassResult,
};
use crate::backend::domain::models::gym_class::{ClassError, NewGymClass};
use crate::backend::domain::validation::{require_non_empty, validate_capacity};
use crate::backend::storage::memory::{
    AttendanceRepository, ClassRepository, EnrollmentRepository, MemoryConnection,
};
use crate::backend::storage::traits::{AttendanceStorage, ClassStorage, EnrollmentStorage};

/// Service for managing scheduled classes.
#[derive(Clone)]
pub struct ClassService {
    class_repository: ClassRepository,
    enrollment_repository: EnrollmentRepository,
    attendance_repository: AttendanceRepository,
}

impl ClassService {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self {
            class_repository: ClassRepository::new(connection.clone()),
            enrollment_repository: EnrollmentRepository::new(connection.clone()),
            attendance_repository: AttendanceRepository::new(connection),
        }
    }

    /// Register a new class. Name and instructor must be non-empty and the
    /// capacity strictly positive.
    pub fn create_class(&self, command: CreateClassCommand) -> Result<CreateClassResult, ClassError> {
        info!("Creating class: {} ({})", command.name, command.instructor);

        let name = require_non_empty("class name", &command.name)?;
        let instructor = require_non_empty("instructor", &command.instructor)?;
        let capacity = validate_capacity(command.capacity)?;

        let class = self.class_repository.store_class(NewGymClass {
            name,
            instructor,
            capacity,
            schedule: command.schedule.trim().to_string(),
            duration_minutes: command.duration_minutes,
            active: true,
        })?;

        // Give every member an attendance slot for the new class.
        self.attendance_repository.materialize_slots()?;

        info!("Created class: {} with ID: {}", class.name, class.id);

        Ok(CreateClassResult { class })
    }

    /// Get a class by id. An unknown id is reported as `None`, not an error.
    pub fn get_class(&self, command: GetClassCommand) -> Result<GetClassResult, ClassError> {
        let class = self.class_repository.get_class(command.class_id)?;

        if class.is_none() {
            warn!("Class not found: {}", command.class_id);
        }

        Ok(GetClassResult { class })
    }

    /// List classes in creation order, optionally only the active ones.
    pub fn list_classes(&self, query: ListClassesQuery) -> Result<ListClassesResult, ClassError> {
        let mut classes = self.class_repository.list_classes()?;
        if query.active_only {
            classes.retain(|class| class.active);
        }
        Ok(ListClassesResult { classes })
    }

    /// Update an existing class. Shrinking the capacity below the current
    /// enrollment count is rejected so the capacity invariant always holds.
    pub fn update_class(&self, command: UpdateClassCommand) -> Result<UpdateClassResult, ClassError> {
        info!("Updating class: {}", command.class_id);

        let mut class = self
            .class_repository
            .get_class(command.class_id)?
            .ok_or(ClassError::NotFound(command.class_id))?;

        if let Some(ref name) = command.name {
            class.name = require_non_empty("class name", name)?;
        }
        if let Some(ref instructor) = command.instructor {
            class.instructor = require_non_empty("instructor", instructor)?;
        }
        if let Some(capacity) = command.capacity {
            let capacity = validate_capacity(capacity)?;
            let enrolled = self.enrollment_repository.count_for_class(class.id)?;
            if (capacity as usize) < enrolled {
                warn!(
                    "Rejected capacity change for class {}: {} below current enrollment {}",
                    class.id, capacity, enrolled
                );
                return Err(ClassError::CapacityBelowEnrollment {
                    requested: capacity,
                    enrolled,
                });
            }
            class.capacity = capacity;
        }
        if let Some(ref schedule) = command.schedule {
            class.schedule = schedule.trim().to_string();
        }
        if let Some(duration_minutes) = command.duration_minutes {
            class.duration_minutes = duration_minutes;
        }
        if let Some(active) = command.active {
            class.active = active;
        }

        self.class_repository.update_class(&class)?;

        info!("Updated class: {} with ID: {}", class.name, class.id);

        Ok(UpdateClassResult { class })
    }

    /// Delete a class. Cascades into the enrollment ledger and the
    /// attendance matrix so no dangling references survive.
    pub fn delete_class(&self, command: DeleteClassCommand) -> Result<DeleteClassResult, ClassError> {
        info!("Deleting class: {}", command.class_id);

        let class = self
            .class_repository
            .get_class(command.class_id)?
            .ok_or(ClassError::NotFound(command.class_id))?;

        let removed_enrollments = self.enrollment_repository.remove_for_class(class.id)?;
        let removed_attendance_slots =
            self.attendance_repository.remove_slots_for_class(class.id)?;
        self.class_repository.delete_class(class.id)?;

        info!(
            "Deleted class {} (ID {}): {} enrollments and {} attendance slots removed",
            class.name, class.id, removed_enrollments, removed_attendance_slots
        );

        let success_message = format!("Class '{}' deleted successfully", class.name);
        Ok(DeleteClassResult {
            class,
            removed_enrollments,
            removed_attendance_slots,
            success_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::enrollment::Enrollment;
    use crate::backend::domain::validation::ValidationError;

    fn setup_test() -> (ClassService, Arc<MemoryConnection>) {
        let connection = Arc::new(MemoryConnection::new());
        (ClassService::new(connection.clone()), connection)
    }

    fn class_command(name: &str, capacity: u32) -> CreateClassCommand {
        CreateClassCommand {
            name: name.to_string(),
            instructor: "Laura Gomez".to_string(),
            capacity,
            schedule: "Monday 18:00".to_string(),
            duration_minutes: 60,
        }
    }

    #[test]
    fn test_create_class() {
        let (service, _) = setup_test();
        let class = service.create_class(class_command("  Spinning ", 20)).unwrap().class;
        assert_eq!(class.id, 1);
        assert_eq!(class.name, "Spinning");
        assert_eq!(class.capacity, 20);
        assert!(class.active);
    }

    #[test]
    fn test_create_class_validation() {
        let (service, _) = setup_test();

        assert!(matches!(
            service.create_class(class_command("  ", 10)),
            Err(ClassError::Validation(ValidationError::EmptyField("class name")))
        ));

        let mut no_instructor = class_command("Yoga", 10);
        no_instructor.instructor = " ".to_string();
        assert!(matches!(
            service.create_class(no_instructor),
            Err(ClassError::Validation(ValidationError::EmptyField("instructor")))
        ));

        assert!(matches!(
            service.create_class(class_command("Yoga", 0)),
            Err(ClassError::Validation(ValidationError::NonPositiveCapacity))
        ));
    }

    #[test]
    fn test_update_class_fields() {
        let (service, _) = setup_test();
        let class = service.create_class(class_command("Yoga", 10)).unwrap().class;

        let command = UpdateClassCommand {
            class_id: class.id,
            schedule: Some("Friday 09:00".to_string()),
            active: Some(false),
            ..Default::default()
        };
        let updated = service.update_class(command).unwrap().class;
        assert_eq!(updated.schedule, "Friday 09:00");
        assert!(!updated.active);

        let active = service
            .list_classes(ListClassesQuery { active_only: true })
            .unwrap()
            .classes;
        assert!(active.is_empty());
    }

    #[test]
    fn test_update_nonexistent_class() {
        let (service, _) = setup_test();
        let command = UpdateClassCommand {
            class_id: 9,
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(matches!(service.update_class(command), Err(ClassError::NotFound(9))));
    }

    #[test]
    fn test_capacity_cannot_shrink_below_enrollment() {
        let (service, connection) = setup_test();
        let class = service.create_class(class_command("Yoga", 10)).unwrap().class;

        let enrollments = EnrollmentRepository::new(connection);
        enrollments.add_enrollment(Enrollment::new(1, class.id)).unwrap();
        enrollments.add_enrollment(Enrollment::new(2, class.id)).unwrap();

        let shrink = UpdateClassCommand {
            class_id: class.id,
            capacity: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            service.update_class(shrink),
            Err(ClassError::CapacityBelowEnrollment { requested: 1, enrolled: 2 })
        ));

        // Shrinking down to the current count is fine.
        let exact = UpdateClassCommand {
            class_id: class.id,
            capacity: Some(2),
            ..Default::default()
        };
        assert_eq!(service.update_class(exact).unwrap().class.capacity, 2);
    }

    #[test]
    fn test_delete_class_cascades() {
        let (service, connection) = setup_test();
        let class = service.create_class(class_command("Yoga", 10)).unwrap().class;

        let enrollments = EnrollmentRepository::new(connection.clone());
        enrollments.add_enrollment(Enrollment::new(1, class.id)).unwrap();
        let attendance = AttendanceRepository::new(connection);
        attendance
            .record_date(1, class.id, chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .unwrap();

        let result = service.delete_class(DeleteClassCommand { class_id: class.id }).unwrap();
        assert_eq!(result.removed_enrollments, 1);
        assert_eq!(result.removed_attendance_slots, 1);
        assert!(service
            .get_class(GetClassCommand { class_id: class.id })
            .unwrap()
            .class
            .is_none());
    }

    #[test]
    fn test_delete_nonexistent_class() {
        let (service, _) = setup_test();
        let result = service.delete_class(DeleteClassCommand { class_id: 3 });
        assert!(matches!(result, Err(ClassError::NotFound(3))));
    }
}
