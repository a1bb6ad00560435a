//! Product Restriction Repository

use super::{RepoError, RepoResult};
use crate::matching::validate_zone_value;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use shared::models::{ProductRestriction, ProductRestrictionCreate, RestrictionType, ZoneType};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, vendor_id, product_id, zone_type, zone_value, restriction_type, restriction_message, active, created_at";

#[derive(Debug, sqlx::FromRow)]
struct RestrictionRow {
    id: i64,
    vendor_id: i64,
    product_id: i64,
    zone_type: String,
    zone_value: String,
    restriction_type: String,
    restriction_message: String,
    active: bool,
    created_at: i64,
}

impl RestrictionRow {
    fn into_restriction(self) -> Option<ProductRestriction> {
        let zone_type = self.zone_type.parse::<ZoneType>();
        let restriction_type = self.restriction_type.parse::<RestrictionType>();
        match (zone_type, restriction_type) {
            (Ok(zone_type), Ok(restriction_type)) => Some(ProductRestriction {
                id: self.id,
                vendor_id: self.vendor_id,
                product_id: self.product_id,
                zone_type,
                zone_value: self.zone_value,
                restriction_type,
                restriction_message: self.restriction_message,
                active: self.active,
                created_at: self.created_at,
            }),
            _ => {
                tracing::warn!(
                    target: "delivery::config",
                    restriction_id = self.id,
                    product_id = self.product_id,
                    zone_type = %self.zone_type,
                    restriction_type = %self.restriction_type,
                    "Skipping product restriction with unknown type"
                );
                None
            }
        }
    }
}

/// Active restrictions of a product, oldest first
pub async fn find_active_by_product(
    pool: &SqlitePool,
    vendor_id: i64,
    product_id: i64,
) -> RepoResult<Vec<ProductRestriction>> {
    let rows = sqlx::query_as::<_, RestrictionRow>(&format!(
        "SELECT {COLUMNS} FROM product_restriction \
         WHERE vendor_id = ? AND product_id = ? AND active = 1 \
         ORDER BY created_at ASC, id ASC"
    ))
    .bind(vendor_id)
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .filter_map(RestrictionRow::into_restriction)
        .collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ProductRestriction>> {
    let row = sqlx::query_as::<_, RestrictionRow>(&format!(
        "SELECT {COLUMNS} FROM product_restriction WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.and_then(RestrictionRow::into_restriction))
}

pub async fn create(
    pool: &SqlitePool,
    data: ProductRestrictionCreate,
) -> RepoResult<ProductRestriction> {
    validate_required_text(&data.zone_value, "zone_value", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.restriction_message, "restriction_message", MAX_NOTE_LEN)?;
    validate_zone_value(data.zone_type, &data.zone_value)?;

    let message = data
        .restriction_message
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO product_restriction (vendor_id, product_id, zone_type, zone_value, restriction_type, restriction_message, active, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.vendor_id)
    .bind(data.product_id)
    .bind(data.zone_type.as_str())
    .bind(data.zone_value.trim())
    .bind(data.restriction_type.as_str())
    .bind(message)
    .bind(data.active.unwrap_or(true))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product restriction".into()))
}

pub async fn set_active(pool: &SqlitePool, id: i64, active: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE product_restriction SET active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product restriction {id}")));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product_restriction WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
