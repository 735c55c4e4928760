//! Read-only queries over the flower catalog.
//!
//! Nothing in here writes to the store. Failures from the pool are returned
//! as-is; an empty result is never an error.

pub mod recommend;
pub mod search;

pub use recommend::{current_month, recommend_flower, recommend_flower_for_month};
pub use search::{search_flowers, Criterion, FlowerFilter};

use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;

use crate::models::{Flower, FlowerWithTags, Hashtag};

/// Column list shared by every flower read; the table is aliased `f`.
pub(crate) const FLOWER_SELECT: &str = "SELECT f.id, f.name, f.month, f.day, f.language, \
     f.content, f.img_url1, f.img_url2, f.img_url3, f.scientific_name, f.english_name, \
     f.usage, f.cultivation, f.flower_type, f.created_at FROM flowers f";

// Stays under SQLite's historical 999 bound-parameter limit.
const TAG_BATCH_SIZE: usize = 900;

#[derive(FromRow)]
struct FlowerHashtagRow {
    flower_id: i64,
    id: i64,
    tag_name: String,
}

/// Load a single flower by identifier.
pub async fn find_flower(db: &SqlitePool, id: i64) -> Result<Option<FlowerWithTags>, sqlx::Error> {
    let sql = format!("{FLOWER_SELECT} WHERE f.id = ?");
    let flower: Option<Flower> = sqlx::query_as(&sql).bind(id).fetch_optional(db).await?;

    let Some(flower) = flower else {
        return Ok(None);
    };

    Ok(attach_tags(db, vec![flower]).await?.pop())
}

/// Pair each flower with all of its hashtags, preserving input order.
pub(crate) async fn attach_tags(
    db: &SqlitePool,
    flowers: Vec<Flower>,
) -> Result<Vec<FlowerWithTags>, sqlx::Error> {
    let mut by_flower: HashMap<i64, Vec<Hashtag>> = HashMap::new();

    for chunk in flowers.chunks(TAG_BATCH_SIZE) {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT fh.flower_id, h.id, h.tag_name \
             FROM flower_hashtags fh \
             JOIN hashtags h ON h.id = fh.hashtag_id \
             WHERE fh.flower_id IN (",
        );
        let mut separated = builder.separated(", ");
        for flower in chunk {
            separated.push_bind(flower.id);
        }
        separated.push_unseparated(")");
        builder.push(" ORDER BY h.tag_name ASC, h.id ASC");

        let rows: Vec<FlowerHashtagRow> = builder.build_query_as().fetch_all(db).await?;
        for row in rows {
            by_flower.entry(row.flower_id).or_default().push(Hashtag {
                id: row.id,
                tag_name: row.tag_name,
            });
        }
    }

    Ok(flowers
        .into_iter()
        .map(|flower| {
            let hashtags = by_flower.remove(&flower.id).unwrap_or_default();
            FlowerWithTags { flower, hashtags }
        })
        .collect())
}
