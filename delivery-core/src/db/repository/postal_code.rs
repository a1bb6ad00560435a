//! Postal Code Repository

use super::{RepoError, RepoResult};
use shared::models::{PostalCode, PostalCodeRecord, PostalLocation};
use sqlx::SqlitePool;

pub async fn find(pool: &SqlitePool, postal_code: &PostalCode) -> RepoResult<Option<PostalLocation>> {
    let record = sqlx::query_as::<_, PostalCodeRecord>(
        "SELECT postal_code, city, region_code FROM postal_code WHERE postal_code = ?",
    )
    .bind(postal_code.as_str())
    .fetch_optional(pool)
    .await?;
    Ok(record.map(PostalLocation::from))
}

/// Insert or replace the mapping for a code
pub async fn upsert(
    pool: &SqlitePool,
    postal_code: &PostalCode,
    location: &PostalLocation,
) -> RepoResult<()> {
    if location.city.trim().is_empty() {
        return Err(RepoError::Validation("city must not be empty".into()));
    }
    sqlx::query(
        "INSERT INTO postal_code (postal_code, city, region_code) VALUES (?, ?, ?) \
         ON CONFLICT(postal_code) DO UPDATE SET city = excluded.city, region_code = excluded.region_code",
    )
    .bind(postal_code.as_str())
    .bind(location.city.trim())
    .bind(location.region_code.trim())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM postal_code")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
