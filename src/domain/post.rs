use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::User;

/// A post as it appears in lists (feed, search results, category pages).
///
/// The platform's wire format uses French field names; they are mapped to
/// English here and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "temps")]
    pub reading_minutes: Option<u32>,
    #[serde(default, rename = "categorie")]
    pub category: Option<Category>,
    #[serde(default, rename = "true_reactions")]
    pub upvotes: Option<i64>,
    #[serde(default, rename = "false_reactions")]
    pub downvotes: Option<i64>,
    #[serde(default, rename = "commentaires_count")]
    pub comment_count: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PostSummary {
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized")
    }

    pub fn display_intro(&self) -> &str {
        self.introduction.as_deref().unwrap_or("")
    }
}

/// A full article as served by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "temps")]
    pub reading_minutes: Option<u32>,
    #[serde(default, rename = "categorie")]
    pub category: Option<Category>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, rename = "commentaires")]
    pub comments: Vec<Comment>,
    #[serde(default, rename = "commentaires_count")]
    pub comment_count: Option<i64>,
    #[serde(default, rename = "true_reactions")]
    pub upvotes: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn author_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("Unknown")
    }

    /// Comment total, preferring the server count over the embedded list.
    pub fn comment_total(&self) -> i64 {
        self.comment_count.unwrap_or(self.comments.len() as i64)
    }
}

/// One body section of an article. Section bodies are HTML fragments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "contenu")]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "contenu")]
    pub body: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn author_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("Anonymous")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY_SAMPLE: &str = r#"{
        "id": 7,
        "slug": "rust-en-production",
        "titre": "Rust en production",
        "introduction": "Un retour d'experience",
        "image": "https://example.com/cover.jpg",
        "temps": 6,
        "categorie": {"id": 2, "name": "Tech", "slug": "tech"},
        "true_reactions": 12,
        "false_reactions": 1,
        "commentaires_count": 4,
        "created_at": "2024-03-01T10:00:00.000000Z"
    }"#;

    #[test]
    fn test_summary_maps_wire_names() {
        let post: PostSummary = serde_json::from_str(SUMMARY_SAMPLE).unwrap();
        assert_eq!(post.title, "Rust en production");
        assert_eq!(post.reading_minutes, Some(6));
        assert_eq!(post.comment_count, Some(4));
        assert_eq!(post.category_name(), "Tech");
    }

    #[test]
    fn test_summary_tolerates_missing_optionals() {
        let post: PostSummary =
            serde_json::from_str(r#"{"id": 1, "titre": "Bref"}"#).unwrap();
        assert_eq!(post.category_name(), "Uncategorized");
        assert_eq!(post.display_intro(), "");
        assert!(post.created_at.is_none());
    }

    #[test]
    fn test_article_sections_and_comments() {
        let json = r#"{
            "id": 7,
            "titre": "Rust en production",
            "sections": [
                {"id": 1, "titre": "Contexte", "contenu": "<p>Debut</p>"}
            ],
            "commentaires": [
                {"id": 9, "contenu": "Super article", "user": {"id": 3, "name": "Lea"}}
            ]
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.sections.len(), 1);
        assert_eq!(post.sections[0].body, "<p>Debut</p>");
        assert_eq!(post.comments[0].author_name(), "Lea");
        assert_eq!(post.comment_total(), 1);
    }

    #[test]
    fn test_comment_total_prefers_server_count() {
        let json = r#"{"id": 7, "titre": "T", "commentaires_count": 40}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.comment_total(), 40);
    }
}
