//! In-memory class repository.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::debug;

use super::{lock, MemoryConnection};
use crate::backend::domain::models::gym_class::{ClassId, GymClass, NewGymClass};
use crate::backend::storage::traits::ClassStorage;

/// Class registry over the shared in-memory connection.
#[derive(Clone)]
pub struct ClassRepository {
    connection: Arc<MemoryConnection>,
}

impl ClassRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl ClassStorage for ClassRepository {
    fn store_class(&self, new_class: NewGymClass) -> Result<GymClass> {
        let mut table = lock(&self.connection.classes)?;
        let id = table.allocate_id();
        let class = GymClass {
            id,
            name: new_class.name,
            instructor: new_class.instructor,
            capacity: new_class.capacity,
            schedule: new_class.schedule,
            duration_minutes: new_class.duration_minutes,
            active: new_class.active,
        };
        table.rows.insert(id, class.clone());
        debug!("Stored class {} ({})", id, class.name);
        Ok(class)
    }

    fn get_class(&self, class_id: ClassId) -> Result<Option<GymClass>> {
        let table = lock(&self.connection.classes)?;
        Ok(table.rows.get(&class_id).cloned())
    }

    fn list_classes(&self) -> Result<Vec<GymClass>> {
        let table = lock(&self.connection.classes)?;
        Ok(table.rows.values().cloned().collect())
    }

    fn update_class(&self, class: &GymClass) -> Result<()> {
        let mut table = lock(&self.connection.classes)?;
        match table.rows.get_mut(&class.id) {
            Some(row) => {
                *row = class.clone();
                Ok(())
            }
            None => Err(anyhow!("cannot update missing class {}", class.id)),
        }
    }

    fn delete_class(&self, class_id: ClassId) -> Result<bool> {
        let mut table = lock(&self.connection.classes)?;
        Ok(table.rows.remove(&class_id).is_some())
    }
}
