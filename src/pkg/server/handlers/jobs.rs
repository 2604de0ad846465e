use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::{
                filter::{self, JobFilter},
                mutators::JobMutator,
                selectors::JobSelector,
                spec::{JobEntry, JobMode, JobPage, JobStatus},
            },
            auth::CurrentUser,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{Error, Result},
};

/// Candidate record for create and update. Status and mode are closed
/// enums, so serde already rejects out-of-set values before validation
/// runs on the text fields.
#[derive(Debug, Deserialize, Validate)]
pub struct JobInput {
    #[validate(length(min = 2, message = "position must be at least 2 characters"))]
    pub position: String,
    #[validate(length(min = 2, message = "company must be at least 2 characters"))]
    pub company: String,
    #[validate(length(min = 2, message = "location must be at least 2 characters"))]
    pub location: String,
    pub status: JobStatus,
    pub mode: JobMode,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Json(input): Json<JobInput>,
) -> Result<Json<JobEntry>> {
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx).create(&user.user_id, &input).await?;
    tx.commit().await?;
    tracing::info!("job {} created for {}", &job.id, &user.user_id);
    Ok(Json(job))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Query(params): Query<ListParams>,
) -> Result<Json<JobPage>> {
    let status = filter::parse_status_param(params.status.as_deref())?;
    let criteria = JobFilter::for_owner(&user.user_id)
        .with_search(params.search.as_deref())
        .with_status(status);
    let mut tx = state.db_pool.begin_txn().await?;
    let page = JobSelector::new(&mut tx)
        .list(
            &criteria,
            params.page.unwrap_or(filter::DEFAULT_PAGE),
            params.limit.unwrap_or(filter::DEFAULT_LIMIT),
        )
        .await?;
    Ok(Json(page))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Path(id): Path<String>,
) -> Result<Json<JobEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get(&user.user_id, &id)
        .await?
        .ok_or(Error::JobNotFound)?;
    Ok(Json(job))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Path(id): Path<String>,
    Json(input): Json<JobInput>,
) -> Result<Json<JobEntry>> {
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .update(&user.user_id, &id, &input)
        .await?
        .ok_or(Error::JobNotFound)?;
    tx.commit().await?;
    Ok(Json(job))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Path(id): Path<String>,
) -> Result<Json<JobEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .remove(&user.user_id, &id)
        .await?
        .ok_or(Error::JobNotFound)?;
    tx.commit().await?;
    tracing::info!("job {} deleted for {}", &id, &user.user_id);
    Ok(Json(job))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(position: &str, company: &str, location: &str) -> JobInput {
        JobInput {
            position: position.into(),
            company: company.into(),
            location: location.into(),
            status: JobStatus::Applied,
            mode: JobMode::FullTime,
        }
    }

    #[test]
    fn rejects_fields_shorter_than_two_characters() {
        assert!(input("a", "acme", "berlin").validate().is_err());
        assert!(input("dev", "x", "berlin").validate().is_err());
        assert!(input("dev", "acme", "b").validate().is_err());
        assert!(input("dev", "acme", "berlin").validate().is_ok());
    }

    #[test]
    fn deserializes_wire_shape() {
        let input: JobInput = serde_json::from_str(
            r#"{"position":"backend dev","company":"acme","location":"remote",
                "status":"interview","mode":"full-time"}"#,
        )
        .unwrap();
        assert_eq!(input.status, JobStatus::Interview);
        assert_eq!(input.mode, JobMode::FullTime);
    }

    #[test]
    fn rejects_status_outside_the_enum_at_deserialization() {
        let raw = r#"{"position":"dev","company":"acme","location":"remote",
                      "status":"ghosted","mode":"full-time"}"#;
        assert!(serde_json::from_str::<JobInput>(raw).is_err());
    }
}
