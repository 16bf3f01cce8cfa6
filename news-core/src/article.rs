use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::NewsError;
use crate::store::Keyed;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Category {
    Tech,
    Sports,
    Politics,
    Entertainment,
    Science,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tech,
        Category::Sports,
        Category::Politics,
        Category::Entertainment,
        Category::Science,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tech => "TECH",
            Category::Sports => "SPORTS",
            Category::Politics => "POLITICS",
            Category::Entertainment => "ENTERTAINMENT",
            Category::Science => "SCIENCE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = NewsError;

    /// Case-insensitive: `tech`, `Tech` and `TECH` all parse.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|cat| cat.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| NewsError::UnknownCategory(value.to_owned()))
    }
}

impl TryFrom<String> for Category {
    type Error = NewsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Keyed for Article {
    fn key(&self) -> u64 {
        self.id
    }
}

/// Body of a create request. Server-owned fields (`id`, `viewCount`,
/// `publishedAt`) are ignored if a client sends them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewArticle {
    pub fn into_article(self, id: u64, published_at: DateTime<Utc>) -> Article {
        Article {
            id,
            title: self.title,
            content: self.content,
            category: self.category,
            author: self.author,
            published_at,
            view_count: 0,
            tags: self.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("tech".parse::<Category>().unwrap(), Category::Tech);
        assert_eq!("Sports".parse::<Category>().unwrap(), Category::Sports);
        assert_eq!("SCIENCE".parse::<Category>().unwrap(), Category::Science);
        assert!("weather".parse::<Category>().is_err());
    }

    #[test]
    fn new_article_ignores_server_owned_fields() {
        let body = r#"{"id":42,"viewCount":9000,"title":"X","content":"Y","category":"tech","author":"Z"}"#;
        let draft: NewArticle = serde_json::from_str(body).unwrap();
        assert_eq!(draft.category, Category::Tech);
        assert!(draft.tags.is_empty());

        let now = Utc::now();
        let article = draft.into_article(7, now);
        assert_eq!(article.id, 7);
        assert_eq!(article.view_count, 0);
        assert_eq!(article.published_at, now);
    }

    #[test]
    fn article_serializes_camel_case_with_upper_category() {
        let article = NewArticle {
            title: "X".into(),
            content: "Y".into(),
            category: Category::Entertainment,
            author: "Z".into(),
            tags: vec![],
        }
        .into_article(1, Utc::now());
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["category"], "ENTERTAINMENT");
        assert_eq!(json["viewCount"], 0);
        assert!(json.get("publishedAt").is_some());
    }
}
