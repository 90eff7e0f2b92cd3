//! In-memory member repository.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::debug;

use super::{lock, MemoryConnection};
use crate::backend::domain::models::member::{Member, MemberId, NewMember};
use crate::backend::storage::traits::MemberStorage;

/// Member registry over the shared in-memory connection.
#[derive(Clone)]
pub struct MemberRepository {
    connection: Arc<MemoryConnection>,
}

impl MemberRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl MemberStorage for MemberRepository {
    fn store_member(&self, new_member: NewMember) -> Result<Member> {
        let mut table = lock(&self.connection.members)?;
        let id = table.allocate_id();
        let member = Member {
            id,
            first_name: new_member.first_name,
            last_name: new_member.last_name,
            dni: new_member.dni,
            email: new_member.email,
            phone: new_member.phone,
            birthdate: new_member.birthdate,
            address: new_member.address,
            joined_on: new_member.joined_on,
            active: new_member.active,
        };
        table.rows.insert(id, member.clone());
        debug!("Stored member {} ({})", id, member.full_name());
        Ok(member)
    }

    fn get_member(&self, member_id: MemberId) -> Result<Option<Member>> {
        let table = lock(&self.connection.members)?;
        Ok(table.rows.get(&member_id).cloned())
    }

    fn list_members(&self) -> Result<Vec<Member>> {
        let table = lock(&self.connection.members)?;
        Ok(table.rows.values().cloned().collect())
    }

    fn update_member(&self, member: &Member) -> Result<()> {
        let mut table = lock(&self.connection.members)?;
        match table.rows.get_mut(&member.id) {
            Some(row) => {
                *row = member.clone();
                Ok(())
            }
            None => Err(anyhow!("cannot update missing member {}", member.id)),
        }
    }

    fn delete_member(&self, member_id: MemberId) -> Result<bool> {
        let mut table = lock(&self.connection.members)?;
        Ok(table.rows.remove(&member_id).is_some())
    }

    fn dni_in_use(&self, dni: &str, exclude: Option<MemberId>) -> Result<bool> {
        let table = lock(&self.connection.members)?;
        Ok(table
            .rows
            .values()
            .any(|member| member.dni == dni && Some(member.id) != exclude))
    }
}
