//! Startup seeding of the administrator account.

use anyhow::Context as _;

use quill_core::domain::User;

use crate::config::AdminCredentials;
use crate::state::AppState;

/// Create the configured administrator unless an account with that email exists.
pub async fn ensure_admin(state: &AppState, admin: &AdminCredentials) -> anyhow::Result<()> {
    if let Some(existing) = state.users.find_by_email(&admin.email).await? {
        if !existing.is_admin {
            tracing::warn!(
                user_id = %existing.id,
                "ADMIN_EMAIL belongs to an account without the administrator role"
            );
        }
        return Ok(());
    }

    let password_hash = state
        .passwords
        .hash(&admin.password)
        .context("hashing administrator password")?;

    let user = state
        .users
        .save(User::new(admin.email.clone(), password_hash, true))
        .await?;
    tracing::info!(user_id = %user.id, "Administrator account created");

    Ok(())
}
