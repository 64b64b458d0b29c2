pub use schooldesk_models::MessageResponse;
pub use schooldesk_models::users::{
    CreateUserDto, UpdateUserDto, User, UserListResponse, UserResponse,
};

pub const USER_NOT_FOUND: &str = "User not found";
pub const ACCOUNT_GONE: &str = "Account no longer exists";
pub const USER_DELETED: &str = "Deleted successfully";
