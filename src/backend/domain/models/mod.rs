//! Domain models shared across services and storage.

pub mod attendance;
pub mod enrollment;
pub mod gym_class;
pub mod member;
