use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::pkg::server::state::AppState;
use crate::prelude::{Error, Result};

/// The verified identity attached to a request. The opaque user id comes
/// from the identity provider that provisioned the session; it is the
/// only scoping key the rest of the service trusts.
#[derive(FromRow, Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
}

pub struct Session;

impl Session {
    /// Resolves a session token to its user. Malformed, unknown, or
    /// expired tokens all resolve to `Unauthenticated` rather than
    /// leaking which of the three it was.
    pub async fn resolve_user(state: &AppState, token_str: &str) -> Result<CurrentUser> {
        let token = token_str
            .parse::<Uuid>()
            .map_err(|_| Error::Unauthenticated)?;
        let user = sqlx::query_as::<_, CurrentUser>(
            "select user_id from sessions where token = $1 and expiry > now()",
        )
        .bind(token)
        .fetch_optional(&*state.db_pool)
        .await?
        .ok_or(Error::Unauthenticated)?;
        Ok(user)
    }

    /// Expires every live session of the user, for logout.
    pub async fn expire_for_user(state: &AppState, user_id: &str) -> Result<u64> {
        let result = sqlx::query("update sessions set expiry = now() where user_id = $1")
            .bind(user_id)
            .execute(&*state.db_pool)
            .await?;
        Ok(result.rows_affected())
    }
}
