use crate::error::AppError;
use crate::models::session_models::CurrentUser;
use crate::models::user_models::Role;

/// Check that the acting user owns the resource or holds the given role.
/// Fails `Forbidden` otherwise.
pub fn require_owner_or_role(
    owner_id: i32,
    current: &CurrentUser,
    role: Role,
) -> Result<(), AppError> {
    if current.id == owner_id || current.role == role {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
