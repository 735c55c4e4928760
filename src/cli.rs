use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use sqlx::SqlitePool;
use std::fs;
use std::path::Path;

use crate::models::format_created_at;

// Seed files write month/day either as "3" or 3; the store keeps text.
fn deserialize_calendar_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    Ok(match Option::<StringOrInt>::deserialize(deserializer)? {
        Some(StringOrInt::String(s)) => Some(s),
        Some(StringOrInt::Int(i)) => Some(i.to_string()),
        None => None,
    })
}

#[derive(Deserialize)]
struct SeedFlower {
    name: String,
    #[serde(default, deserialize_with = "deserialize_calendar_field")]
    month: Option<String>,
    #[serde(default, deserialize_with = "deserialize_calendar_field")]
    day: Option<String>,
    language: Option<String>,
    content: Option<String>,
    img_url1: Option<String>,
    img_url2: Option<String>,
    img_url3: Option<String>,
    scientific_name: Option<String>,
    english_name: Option<String>,
    usage: Option<String>,
    cultivation: Option<String>,
    flower_type: Option<String>,
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    hashtags: Vec<String>,
}

/// Load a JSON array of flowers into the store in one transaction.
///
/// Hashtags are trimmed and created on first use; blank names are skipped.
pub async fn import_flowers(
    pool: &SqlitePool,
    file_path: &Path,
) -> Result<usize, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;
    let flowers: Vec<SeedFlower> = serde_json::from_str(&content)?;

    let mut imported = 0;
    let mut tx = pool.begin().await?;

    for flower in flowers {
        let created_at = format_created_at(flower.created_at.unwrap_or_else(Utc::now));

        let (flower_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO flowers (name, month, day, language, content, img_url1, img_url2, img_url3,
                scientific_name, english_name, usage, cultivation, flower_type, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&flower.name)
        .bind(&flower.month)
        .bind(&flower.day)
        .bind(&flower.language)
        .bind(&flower.content)
        .bind(&flower.img_url1)
        .bind(&flower.img_url2)
        .bind(&flower.img_url3)
        .bind(&flower.scientific_name)
        .bind(&flower.english_name)
        .bind(&flower.usage)
        .bind(&flower.cultivation)
        .bind(&flower.flower_type)
        .bind(&created_at)
        .fetch_one(&mut *tx)
        .await?;

        for tag_name in &flower.hashtags {
            let tag_name = tag_name.trim();
            if tag_name.is_empty() {
                continue;
            }

            let existing: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM hashtags WHERE tag_name = ?")
                    .bind(tag_name)
                    .fetch_optional(&mut *tx)
                    .await?;

            let hashtag_id = match existing {
                Some((id,)) => id,
                None => {
                    let (id,): (i64,) =
                        sqlx::query_as("INSERT INTO hashtags (tag_name) VALUES (?) RETURNING id")
                            .bind(tag_name)
                            .fetch_one(&mut *tx)
                            .await?;
                    id
                }
            };

            sqlx::query("INSERT OR IGNORE INTO flower_hashtags (flower_id, hashtag_id) VALUES (?, ?)")
                .bind(flower_id)
                .bind(hashtag_id)
                .execute(&mut *tx)
                .await?;
        }

        imported += 1;
    }

    tx.commit().await?;
    tracing::info!(imported, "flower import finished");
    Ok(imported)
}
