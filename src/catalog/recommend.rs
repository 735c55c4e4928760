use chrono::{Datelike, Local};
use sqlx::SqlitePool;

use super::{attach_tags, FLOWER_SELECT};
use crate::models::{Flower, FlowerWithTags};

/// Calendar month of `now`, 1 through 12.
pub fn current_month<T: Datelike>(now: &T) -> u32 {
    now.month()
}

/// Newest flower blooming in the current local month, if any.
pub async fn recommend_flower(db: &SqlitePool) -> Result<Option<FlowerWithTags>, sqlx::Error> {
    recommend_flower_for_month(db, current_month(&Local::now())).await
}

/// Newest flower whose stored month, read as an integer, equals `month`.
///
/// Ordering is `created_at` then `id`, both descending, so a timestamp tie
/// still yields one fixed winner.
pub async fn recommend_flower_for_month(
    db: &SqlitePool,
    month: u32,
) -> Result<Option<FlowerWithTags>, sqlx::Error> {
    let sql = format!(
        "{FLOWER_SELECT} \
         WHERE CAST(f.month AS INTEGER) = ? \
         ORDER BY f.created_at DESC, f.id DESC \
         LIMIT 1"
    );
    let flower: Option<Flower> = sqlx::query_as(&sql)
        .bind(i64::from(month))
        .fetch_optional(db)
        .await?;

    tracing::debug!(month, found = flower.is_some(), "monthly recommendation");

    let Some(flower) = flower else {
        return Ok(None);
    };

    Ok(attach_tags(db, vec![flower]).await?.pop())
}
