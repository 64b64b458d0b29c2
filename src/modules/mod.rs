pub mod auth;
pub mod fees;
pub mod library;
pub mod students;
pub mod user;
pub mod users;
