use sqlx::{Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::spec::JobStatus;
use crate::prelude::{Error, Result};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Filter criteria for an owner's job listing. Owner scoping is always
/// present; search and status are optional narrowing clauses. The WHERE
/// clause is emitted in a fixed order (owner, search, status) so the
/// effective predicate does not depend on the order setters were called.
#[derive(Debug, Clone)]
pub struct JobFilter {
    owner_id: String,
    search: Option<String>,
    status: Option<JobStatus>,
}

impl JobFilter {
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        JobFilter {
            owner_id: owner_id.into(),
            search: None,
            status: None,
        }
    }

    /// Free-text search over position and company. Blank input means no
    /// search clause.
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        self
    }

    pub fn with_status(mut self, status: Option<JobStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn push_where<'a>(&'a self, qb: &mut QueryBuilder<'a, Postgres>) {
        qb.push(" where owner_id = ");
        qb.push_bind(self.owner_id.as_str());
        if let Some(search) = &self.search {
            qb.push(" and (\"position\" like ");
            qb.push_bind(like_pattern(search));
            qb.push(" or company like ");
            qb.push_bind(like_pattern(search));
            qb.push(")");
        }
        if let Some(status) = self.status {
            qb.push(" and status = ");
            qb.push_bind(status);
        }
    }
}

/// Wraps the term in wildcards, escaping LIKE metacharacters so user
/// input only ever matches as a literal substring.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Maps an optional `status` query parameter to a filter value. Absent,
/// blank, and the "all" sentinel all mean unfiltered; anything else must
/// name one of the six statuses.
pub fn parse_status_param(raw: Option<&str>) -> Result<Option<JobStatus>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| Error::UnknownStatus(s.to_string())),
    }
}

pub fn normalize_page(page: u32) -> u32 {
    page.max(1)
}

pub fn normalize_limit(limit: u32) -> u32 {
    limit.max(1)
}

pub fn offset(page: u32, limit: u32) -> i64 {
    i64::from(normalize_page(page) - 1) * i64::from(normalize_limit(limit))
}

pub fn total_pages(count: i64, limit: u32) -> u32 {
    if count <= 0 {
        return 0;
    }
    let limit = i64::from(normalize_limit(limit));
    ((count + limit - 1) / limit) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(filter: &JobFilter) -> String {
        let mut qb = QueryBuilder::new("select * from jobs");
        filter.push_where(&mut qb);
        qb.into_sql()
    }

    #[test]
    fn owner_clause_is_always_present() {
        let filter = JobFilter::for_owner("user-1");
        assert_eq!(rendered(&filter), "select * from jobs where owner_id = $1");
    }

    #[test]
    fn search_adds_an_or_group_over_position_and_company() {
        let filter = JobFilter::for_owner("user-1").with_search(Some("acme"));
        assert_eq!(
            rendered(&filter),
            "select * from jobs where owner_id = $1 and (\"position\" like $2 or company like $3)"
        );
    }

    #[test]
    fn status_adds_an_equality_clause() {
        let filter = JobFilter::for_owner("user-1").with_status(Some(JobStatus::Interview));
        assert_eq!(
            rendered(&filter),
            "select * from jobs where owner_id = $1 and status = $2"
        );
    }

    #[test]
    fn setter_order_does_not_change_the_predicate() {
        let a = JobFilter::for_owner("user-1")
            .with_search(Some("acme"))
            .with_status(Some(JobStatus::Offer));
        let b = JobFilter::for_owner("user-1")
            .with_status(Some(JobStatus::Offer))
            .with_search(Some("acme"));
        assert_eq!(rendered(&a), rendered(&b));
    }

    #[test]
    fn blank_search_means_no_search_clause() {
        let filter = JobFilter::for_owner("user-1").with_search(Some("   "));
        assert_eq!(rendered(&filter), "select * from jobs where owner_id = $1");
    }

    #[test]
    fn like_patterns_escape_metacharacters() {
        assert_eq!(like_pattern("50%_off\\now"), "%50\\%\\_off\\\\now%");
        assert_eq!(like_pattern("acme"), "%acme%");
    }

    #[test]
    fn status_param_sentinels_mean_unfiltered() {
        assert_eq!(parse_status_param(None).unwrap(), None);
        assert_eq!(parse_status_param(Some("all")).unwrap(), None);
        assert_eq!(parse_status_param(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_status_param(Some("pending")).unwrap(),
            Some(JobStatus::Pending)
        );
        assert!(parse_status_param(Some("ghosted")).is_err());
    }

    #[test]
    fn pagination_math() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(15, 10), 2);
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(2, 10), 10);
        // page below 1 clamps to the first page rather than going negative
        assert_eq!(offset(0, 10), 0);
        assert_eq!(normalize_page(0), 1);
        assert_eq!(normalize_limit(0), 1);
    }
}
