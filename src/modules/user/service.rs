use tracing::instrument;

use schooldesk_core::AppError;
use schooldesk_db::UserStore;
use schooldesk_models::UserId;

use super::model::User;

pub struct UserService;

impl UserService {
    /// The caller's own account. The token may outlive the account, in which
    /// case this is a 404.
    #[instrument(skip(users))]
    pub async fn get_current_user(users: &dyn UserStore, id: UserId) -> Result<User, AppError> {
        users
            .find_user(id)
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
