pub mod auth;
pub mod boards;
pub mod columns;
pub mod tasks;

use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{AppError, Result};

/// Boards and everything under them are visible to their owner only.
fn ensure_owner(owner_id: Uuid, auth: &AuthUser) -> Result<()> {
    if owner_id != auth.user.id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}
