pub use schooldesk_models::users::{
    LoginRequest, LoginResponse, LoginUser, RegisterRequest, RegisterResponse, User,
};

pub const REGISTERED: &str = "User registered successfully";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
