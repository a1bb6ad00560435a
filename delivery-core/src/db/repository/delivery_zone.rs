//! Delivery Zone Repository

use super::{RepoError, RepoResult};
use crate::matching::validate_zone_value;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_delivery_fee, validate_required_text,
};
use shared::models::{DeliveryZone, DeliveryZoneCreate, ZoneType};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, vendor_id, zone_name, zone_type, zone_value, delivery_fee, delivery_time, active, created_at";

/// Raw row, zone_type kept as text until parsed
#[derive(Debug, sqlx::FromRow)]
struct ZoneRow {
    id: i64,
    vendor_id: i64,
    zone_name: String,
    zone_type: String,
    zone_value: String,
    delivery_fee: f64,
    delivery_time: String,
    active: bool,
    created_at: i64,
}

impl ZoneRow {
    fn into_zone(self) -> Option<DeliveryZone> {
        let zone_type = match self.zone_type.parse::<ZoneType>() {
            Ok(t) => t,
            Err(_) => {
                tracing::warn!(
                    target: "delivery::config",
                    zone_id = self.id,
                    vendor_id = self.vendor_id,
                    zone_type = %self.zone_type,
                    "Skipping delivery zone with unknown zone type"
                );
                return None;
            }
        };
        Some(DeliveryZone {
            id: self.id,
            vendor_id: self.vendor_id,
            zone_name: self.zone_name,
            zone_type,
            zone_value: self.zone_value,
            delivery_fee: self.delivery_fee,
            delivery_time: self.delivery_time,
            active: self.active,
            created_at: self.created_at,
        })
    }
}

/// Active zones of a vendor, cheapest first
pub async fn find_active_by_vendor(pool: &SqlitePool, vendor_id: i64) -> RepoResult<Vec<DeliveryZone>> {
    let rows = sqlx::query_as::<_, ZoneRow>(&format!(
        "SELECT {COLUMNS} FROM delivery_zone WHERE vendor_id = ? AND active = 1 \
         ORDER BY delivery_fee ASC, created_at ASC, id ASC"
    ))
    .bind(vendor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().filter_map(ZoneRow::into_zone).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DeliveryZone>> {
    let row = sqlx::query_as::<_, ZoneRow>(&format!(
        "SELECT {COLUMNS} FROM delivery_zone WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.and_then(ZoneRow::into_zone))
}

pub async fn create(pool: &SqlitePool, data: DeliveryZoneCreate) -> RepoResult<DeliveryZone> {
    validate_required_text(&data.zone_name, "zone_name", MAX_NAME_LEN)?;
    validate_required_text(&data.zone_value, "zone_value", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.delivery_time, "delivery_time", MAX_SHORT_TEXT_LEN)?;
    validate_delivery_fee(data.delivery_fee)?;
    validate_zone_value(data.zone_type, &data.zone_value)?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO delivery_zone (vendor_id, zone_name, zone_type, zone_value, delivery_fee, delivery_time, active, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.vendor_id)
    .bind(data.zone_name.trim())
    .bind(data.zone_type.as_str())
    .bind(data.zone_value.trim())
    .bind(data.delivery_fee)
    .bind(data.delivery_time.trim())
    .bind(data.active.unwrap_or(true))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create delivery zone".into()))
}

pub async fn set_active(pool: &SqlitePool, id: i64, active: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE delivery_zone SET active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Delivery zone {id}")));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM delivery_zone WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
