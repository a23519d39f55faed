//! SeaORM entities for the `persons` and `tasks` tables.

pub mod person;
pub mod task;
