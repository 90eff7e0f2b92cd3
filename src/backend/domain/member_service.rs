//! Member registry service.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};

use crate::backend::domain::commands::members::{
    CreateMemberCommand, CreateMemberResult, DeleteMemberCommand, DeleteMemberResult,
    GetMemberCommand, GetMemberResult, ListMembersQuery, ListMembersResult, UpdateMemberCommand,
    UpdateMemberResult,
};
use crate::backend::domain::models::member::{MemberError, NewMember};
use crate::backend::domain::validation::{
    parse_date, require_non_empty, validate_dni, validate_email, validate_phone,
};
use crate::backend::storage::memory::{
    AttendanceRepository, EnrollmentRepository, MemberRepository, MemoryConnection,
};
use crate::backend::storage::traits::{AttendanceStorage, EnrollmentStorage, MemberStorage};

/// Service for managing gym members.
///
/// Owns the member registry and, for deletion cascades and slot
/// materialization, collaborates with the enrollment ledger and the
/// attendance matrix.
#[derive(Clone)]
pub struct MemberService {
    member_repository: MemberRepository,
    enrollment_repository: EnrollmentRepository,
    attendance_repository: AttendanceRepository,
}

impl MemberService {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self {
            member_repository: MemberRepository::new(connection.clone()),
            enrollment_repository: EnrollmentRepository::new(connection.clone()),
            attendance_repository: AttendanceRepository::new(connection),
        }
    }

    /// Register a new member. All fields are validated first; the DNI must
    /// not belong to any existing member.
    pub fn create_member(
        &self,
        command: CreateMemberCommand,
    ) -> Result<CreateMemberResult, MemberError> {
        info!(
            "Creating member: {} {} (DNI {})",
            command.first_name, command.last_name, command.dni
        );

        let first_name = require_non_empty("first name", &command.first_name)?;
        let last_name = require_non_empty("last name", &command.last_name)?;
        let dni = validate_dni(&command.dni)?;
        if self.member_repository.dni_in_use(&dni, None)? {
            warn!("Rejected member creation: DNI {} already registered", dni);
            return Err(MemberError::DuplicateDni(dni));
        }
        let email = validate_email(&command.email)?;
        let phone = validate_phone(&command.phone)?;
        let birthdate = parse_date("birthdate", &command.birthdate)?;
        let joined_on = match command.joined_on {
            Some(ref date) => parse_date("join date", date)?,
            None => Utc::now().date_naive(),
        };

        let member = self.member_repository.store_member(NewMember {
            first_name,
            last_name,
            dni,
            email,
            phone,
            birthdate,
            address: command.address.trim().to_string(),
            joined_on,
            active: true,
        })?;

        // Every registry change re-materializes the attendance matrix so
        // the new member has a slot for every known class.
        self.attendance_repository.materialize_slots()?;

        info!("Created member: {} with ID: {}", member.full_name(), member.id);

        Ok(CreateMemberResult { member })
    }

    /// Get a member by id. An unknown id is reported as `None`, not an error.
    pub fn get_member(&self, command: GetMemberCommand) -> Result<GetMemberResult, MemberError> {
        let member = self.member_repository.get_member(command.member_id)?;

        if member.is_none() {
            warn!("Member not found: {}", command.member_id);
        }

        Ok(GetMemberResult { member })
    }

    /// List members in creation order, optionally only the active ones.
    pub fn list_members(&self, query: ListMembersQuery) -> Result<ListMembersResult, MemberError> {
        let mut members = self.member_repository.list_members()?;
        if query.active_only {
            members.retain(|member| member.active);
        }
        Ok(ListMembersResult { members })
    }

    /// Update an existing member. `None` fields are left as they were; DNI
    /// changes re-check uniqueness against everyone but this member.
    pub fn update_member(
        &self,
        command: UpdateMemberCommand,
    ) -> Result<UpdateMemberResult, MemberError> {
        info!("Updating member: {}", command.member_id);

        let mut member = self
            .member_repository
            .get_member(command.member_id)?
            .ok_or(MemberError::NotFound(command.member_id))?;

        if let Some(ref first_name) = command.first_name {
            member.first_name = require_non_empty("first name", first_name)?;
        }
        if let Some(ref last_name) = command.last_name {
            member.last_name = require_non_empty("last name", last_name)?;
        }
        if let Some(ref dni) = command.dni {
            let dni = validate_dni(dni)?;
            if self.member_repository.dni_in_use(&dni, Some(member.id))? {
                warn!("Rejected DNI change for member {}: {} already registered", member.id, dni);
                return Err(MemberError::DuplicateDni(dni));
            }
            member.dni = dni;
        }
        if let Some(ref email) = command.email {
            member.email = validate_email(email)?;
        }
        if let Some(ref phone) = command.phone {
            member.phone = validate_phone(phone)?;
        }
        if let Some(ref birthdate) = command.birthdate {
            member.birthdate = parse_date("birthdate", birthdate)?;
        }
        if let Some(ref address) = command.address {
            member.address = address.trim().to_string();
        }
        if let Some(active) = command.active {
            member.active = active;
        }

        self.member_repository.update_member(&member)?;

        info!("Updated member: {} with ID: {}", member.full_name(), member.id);

        Ok(UpdateMemberResult { member })
    }

    /// Delete a member. Cascades into the enrollment ledger and the
    /// attendance matrix so no dangling references survive.
    pub fn delete_member(
        &self,
        command: DeleteMemberCommand,
    ) -> Result<DeleteMemberResult, MemberError> {
        info!("Deleting member: {}", command.member_id);

        let member = self
            .member_repository
            .get_member(command.member_id)?
            .ok_or(MemberError::NotFound(command.member_id))?;

        let removed_enrollments = self.enrollment_repository.remove_for_member(member.id)?;
        let removed_attendance_slots =
            self.attendance_repository.remove_slots_for_member(member.id)?;
        self.member_repository.delete_member(member.id)?;

        info!(
            "Deleted member {} (ID {}): {} enrollments and {} attendance slots removed",
            member.full_name(),
            member.id,
            removed_enrollments,
            removed_attendance_slots
        );

        let success_message = format!("Member '{}' deleted successfully", member.full_name());
        Ok(DeleteMemberResult {
            member,
            removed_enrollments,
            removed_attendance_slots,
            success_message,
        })
    }
}
