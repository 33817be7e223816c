//! Guards run between validation stages.

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::messages::users;
use crate::models::UserVerifyStatus;
use crate::validation::RequestContext;

/// The access token must belong to a verified account.
pub fn verified_user(context: &RequestContext) -> AppResult<()> {
    let decoded = context.authorization()?;
    if decoded.verify != UserVerifyStatus::Verified {
        debug!(user_id = %decoded.user_id, verify = ?decoded.verify, "unverified user rejected");
        return Err(AppError::forbidden(users::USER_IS_NOT_VERIFIED));
    }
    Ok(())
}
