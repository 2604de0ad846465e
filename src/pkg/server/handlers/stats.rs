use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use chrono::{Months, Utc};

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::selectors::JobSelector,
            aggregate::{self, MonthlyCount, StatusCounts},
            auth::CurrentUser,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

/// Per-status tally of the caller's applications; every status is
/// present in the payload even at zero.
pub async fn status_summary(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
) -> Result<Json<StatusCounts>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let rows = JobSelector::new(&mut tx)
        .count_by_status(&user.user_id)
        .await?;
    Ok(Json(aggregate::status_counts(rows)))
}

/// Applications per month over the trailing six calendar months, in
/// first-occurrence order.
pub async fn timeline(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
) -> Result<Json<Vec<MonthlyCount>>> {
    let since = Utc::now() - Months::new(6);
    let mut tx = state.db_pool.begin_txn().await?;
    let created = JobSelector::new(&mut tx)
        .created_since(&user.user_id, since)
        .await?;
    Ok(Json(aggregate::monthly_series(created)))
}
