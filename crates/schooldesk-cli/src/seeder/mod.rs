//! Fake data generation for development databases.

pub mod students;

pub use students::{generate_students, insert_students_batch, seed_students};
