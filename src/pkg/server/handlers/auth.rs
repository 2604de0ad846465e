use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::{
    pkg::{
        internal::auth::{CurrentUser, Session},
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
) -> Result<Json<Value>> {
    let expired = Session::expire_for_user(&state, &user.user_id).await?;
    tracing::info!("user {} logged out, {} sessions expired", &user.user_id, expired);
    Ok(Json(json!({ "ok": true })))
}
