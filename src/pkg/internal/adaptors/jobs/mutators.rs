use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::jobs::spec::JobEntry;
use crate::pkg::server::handlers::jobs::JobInput;
use crate::prelude::Result;

const JOB_COLUMNS: &str =
    "id, owner_id, \"position\", company, location, status, mode, created_at, updated_at";

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, owner_id: &str, job: &JobInput) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            r#"
            insert into jobs (id, owner_id, "position", company, location, status, mode)
            values ($1, $2, $3, $4, $5, $6, $7)
            returning {}
            "#,
            JOB_COLUMNS
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(owner_id)
        .bind(&job.position)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.status)
        .bind(job.mode)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Full-field replacement. The owner clause keeps one user from
    /// reaching another's record; a mismatch is just "no row".
    pub async fn update(
        &mut self,
        owner_id: &str,
        id: &str,
        job: &JobInput,
    ) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            r#"
            update jobs
            set "position" = $3, company = $4, location = $5, status = $6, mode = $7,
                updated_at = now()
            where id = $1 and owner_id = $2
            returning {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&job.position)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.status)
        .bind(job.mode)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn remove(&mut self, owner_id: &str, id: &str) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            "delete from jobs where id = $1 and owner_id = $2 returning {}",
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
