use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{attach_tags, FLOWER_SELECT};
use crate::models::{Flower, FlowerWithTags};

/// Optional search criteria. Each field is checked on its own: `None` and
/// `Some("")` both mean "no constraint", never "match the empty string".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FlowerFilter {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
}

/// One active constraint on the flower collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Substring of the display name.
    NameContains(String),
    /// Substring of at least one linked hashtag.
    TagContains(String),
    /// Exact text match on the stored month.
    MonthEquals(String),
    /// Exact text match on the stored day.
    DayEquals(String),
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

impl FlowerFilter {
    pub fn criteria(&self) -> Vec<Criterion> {
        [
            present(&self.name).map(Criterion::NameContains),
            present(&self.tag).map(Criterion::TagContains),
            present(&self.month).map(Criterion::MonthEquals),
            present(&self.day).map(Criterion::DayEquals),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Criterion {
    // instr() keeps containment case-sensitive and treats % and _ literally.
    fn push_predicate(&self, builder: &mut QueryBuilder<'static, Sqlite>) {
        match self {
            Criterion::NameContains(name) => {
                builder
                    .push("instr(f.name, ")
                    .push_bind(name.clone())
                    .push(") > 0");
            }
            Criterion::TagContains(tag) => {
                builder
                    .push(
                        "EXISTS (SELECT 1 FROM flower_hashtags fh \
                         JOIN hashtags h ON h.id = fh.hashtag_id \
                         WHERE fh.flower_id = f.id AND instr(h.tag_name, ",
                    )
                    .push_bind(tag.clone())
                    .push(") > 0)");
            }
            Criterion::MonthEquals(month) => {
                builder.push("f.month = ").push_bind(month.clone());
            }
            Criterion::DayEquals(day) => {
                builder.push("f.day = ").push_bind(day.clone());
            }
        }
    }
}

/// Compose the search statement. Criteria are ANDed; with none the whole
/// collection is selected. The tag constraint is a semi-join, so a flower
/// never repeats no matter how many of its tags match.
pub fn search_query(criteria: &[Criterion]) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(FLOWER_SELECT);

    for (i, criterion) in criteria.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        criterion.push_predicate(&mut builder);
    }

    builder.push(" ORDER BY f.id ASC");
    builder
}

pub async fn search_flowers(
    db: &SqlitePool,
    filter: &FlowerFilter,
) -> Result<Vec<FlowerWithTags>, sqlx::Error> {
    let criteria = filter.criteria();
    let mut query = search_query(&criteria);
    let flowers: Vec<Flower> = query.build_query_as().fetch_all(db).await?;

    tracing::debug!(
        criteria = criteria.len(),
        matched = flowers.len(),
        "flower search"
    );

    attach_tags(db, flowers).await
}
