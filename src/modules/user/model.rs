pub use schooldesk_models::users::{MeResponse, User};
