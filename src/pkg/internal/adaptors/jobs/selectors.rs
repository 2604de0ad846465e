use chrono::{DateTime, Utc};
use sqlx::{PgConnection, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::filter::{self, JobFilter};
use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobPage, JobStatus};
use crate::prelude::Result;

// "position" needs quoting; it is a reserved word in postgres.
const JOB_COLUMNS: &str =
    "id, owner_id, \"position\", company, location, status, mode, created_at, updated_at";

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get(&mut self, owner_id: &str, id: &str) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            "select {} from jobs where id = $1 and owner_id = $2",
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// One page of the owner's jobs matching the filter, most recent
    /// first, with the total match count alongside.
    pub async fn list(&mut self, criteria: &JobFilter, page: u32, limit: u32) -> Result<JobPage> {
        let page = filter::normalize_page(page);
        let limit = filter::normalize_limit(limit);

        let mut qb = QueryBuilder::new(format!("select {} from jobs", JOB_COLUMNS));
        criteria.push_where(&mut qb);
        qb.push(" order by created_at desc, id desc limit ");
        qb.push_bind(i64::from(limit));
        qb.push(" offset ");
        qb.push_bind(filter::offset(page, limit));
        let jobs = qb
            .build_query_as::<JobEntry>()
            .fetch_all(&mut *self.pool)
            .await?;

        let mut count_query = QueryBuilder::new("select count(*) from jobs");
        criteria.push_where(&mut count_query);
        let count: i64 = count_query
            .build_query_scalar()
            .fetch_one(&mut *self.pool)
            .await?;

        Ok(JobPage {
            jobs,
            count,
            page,
            total_pages: filter::total_pages(count, limit),
        })
    }

    pub async fn count_by_status(&mut self, owner_id: &str) -> Result<Vec<(JobStatus, i64)>> {
        let rows = sqlx::query_as::<_, (JobStatus, i64)>(
            "select status, count(*) from jobs where owner_id = $1 group by status",
        )
        .bind(owner_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    /// Creation timestamps of the owner's jobs from `since` onwards,
    /// ascending, for the monthly series fold.
    pub async fn created_since(
        &mut self,
        owner_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>> {
        let rows = sqlx::query_scalar::<_, DateTime<Utc>>(
            "select created_at from jobs where owner_id = $1 and created_at >= $2
             order by created_at asc",
        )
        .bind(owner_id)
        .bind(since)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
