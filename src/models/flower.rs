use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Hashtag;

/// A catalog row. `month` and `day` are kept as the stored text; the store
/// guarantees they are valid calendar values when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Flower {
    pub id: i64,
    pub name: String,
    pub month: Option<String>,
    pub day: Option<String>,
    /// Meaning traditionally attached to the flower.
    pub language: Option<String>,
    pub content: Option<String>,
    pub img_url1: Option<String>,
    pub img_url2: Option<String>,
    pub img_url3: Option<String>,
    pub scientific_name: Option<String>,
    pub english_name: Option<String>,
    pub usage: Option<String>,
    pub cultivation: Option<String>,
    pub flower_type: Option<String>,
    pub created_at: String,
}

/// Flower together with every hashtag linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerWithTags {
    #[serde(flatten)]
    pub flower: Flower,
    pub hashtags: Vec<Hashtag>,
}

impl FlowerWithTags {
    pub fn tag_names(&self) -> Vec<&str> {
        self.hashtags.iter().map(|h| h.tag_name.as_str()).collect()
    }
}

/// Fixed-width UTC form used for `created_at`, so text order is time order.
pub fn format_created_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flat_with_hashtags() {
        let flower = FlowerWithTags {
            flower: Flower {
                id: 7,
                name: "Red Rose".to_string(),
                month: Some("3".to_string()),
                day: None,
                language: Some("love".to_string()),
                content: None,
                img_url1: Some("https://img.example/rose.jpg".to_string()),
                img_url2: None,
                img_url3: None,
                scientific_name: Some("Rosa".to_string()),
                english_name: Some("Rose".to_string()),
                usage: None,
                cultivation: None,
                flower_type: None,
                created_at: "2025-03-01T09:00:00.000000Z".to_string(),
            },
            hashtags: vec![Hashtag {
                id: 1,
                tag_name: "spring".to_string(),
            }],
        };

        let json = serde_json::to_value(&flower).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Red Rose");
        assert_eq!(json["month"], "3");
        assert!(json["day"].is_null());
        assert_eq!(json["language"], "love");
        assert_eq!(json["img_url1"], "https://img.example/rose.jpg");
        assert_eq!(json["scientific_name"], "Rosa");
        assert!(json["flower_type"].is_null());
        assert_eq!(json["hashtags"][0]["tag_name"], "spring");
        assert_eq!(flower.tag_names(), vec!["spring"]);
    }

    #[test]
    fn created_at_is_fixed_width() {
        let early = "2025-03-01T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let later = "2025-03-01T09:00:00.5Z".parse::<DateTime<Utc>>().unwrap();

        let early = format_created_at(early);
        let later = format_created_at(later);
        assert_eq!(early, "2025-03-01T09:00:00.000000Z");
        assert_eq!(early.len(), later.len());
        assert!(early < later);
    }
}
