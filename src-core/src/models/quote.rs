//! Quote and category models
//!
//! All models use serde; field names are camelCase in persisted JSON.

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Closed set of quote categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum QuoteCategory {
    #[default]
    Motivation,
    Success,
    Perseverance,
    Courage,
    Growth,
    Focus,
    Discipline,
    Resilience,
    Action,
    Mindset,
}

impl QuoteCategory {
    pub const ALL: [QuoteCategory; 10] = [
        QuoteCategory::Motivation,
        QuoteCategory::Success,
        QuoteCategory::Perseverance,
        QuoteCategory::Courage,
        QuoteCategory::Growth,
        QuoteCategory::Focus,
        QuoteCategory::Discipline,
        QuoteCategory::Resilience,
        QuoteCategory::Action,
        QuoteCategory::Mindset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QuoteCategory::Motivation => "Motivation",
            QuoteCategory::Success => "Success",
            QuoteCategory::Perseverance => "Perseverance",
            QuoteCategory::Courage => "Courage",
            QuoteCategory::Growth => "Growth",
            QuoteCategory::Focus => "Focus",
            QuoteCategory::Discipline => "Discipline",
            QuoteCategory::Resilience => "Resilience",
            QuoteCategory::Action => "Action",
            QuoteCategory::Mindset => "Mindset",
        }
    }

    /// Symbol name shown next to the category badge
    pub fn icon(self) -> &'static str {
        match self {
            QuoteCategory::Motivation => "flame.fill",
            QuoteCategory::Success => "star.fill",
            QuoteCategory::Perseverance => "mountain.2.fill",
            QuoteCategory::Courage => "shield.fill",
            QuoteCategory::Growth => "leaf.fill",
            QuoteCategory::Focus => "target",
            QuoteCategory::Discipline => "clock.fill",
            QuoteCategory::Resilience => "heart.fill",
            QuoteCategory::Action => "bolt.fill",
            QuoteCategory::Mindset => "brain.head.profile",
        }
    }

    /// Badge tint
    pub fn color(self) -> &'static str {
        match self {
            QuoteCategory::Motivation => "orange",
            QuoteCategory::Success => "yellow",
            QuoteCategory::Perseverance => "blue",
            QuoteCategory::Courage => "red",
            QuoteCategory::Growth => "green",
            QuoteCategory::Focus => "purple",
            QuoteCategory::Discipline => "indigo",
            QuoteCategory::Resilience => "pink",
            QuoteCategory::Action => "mint",
            QuoteCategory::Mindset => "cyan",
        }
    }
}

impl fmt::Display for QuoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single quote
///
/// Identity is the `id`: history and favorites deduplicate by it, never by
/// content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: QuoteCategory,
    pub date_added: DateTime<Utc>,
}

impl Quote {
    /// Create a quote with a fresh id; content must not be blank
    pub fn new(
        content: impl Into<String>,
        author: Option<String>,
        category: QuoteCategory,
    ) -> Result<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(AppError::InvalidQuote("content is empty".to_string()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            content,
            author,
            category,
            date_added: Utc::now(),
        })
    }

    /// Whether the stored record satisfies the content invariant
    pub fn is_valid(&self) -> bool {
        !self.content.trim().is_empty()
    }

    fn author_name(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.is_empty())
    }

    /// Text for the popover: quoted content with the author on its own line
    pub fn display_text(&self) -> String {
        match self.author_name() {
            Some(author) => format!("\"{}\"\n\n— {}", self.content, author),
            None => self.content.clone(),
        }
    }

    /// Single-line text for the clipboard and share sheet
    pub fn share_text(&self) -> String {
        match self.author_name() {
            Some(author) => format!("\"{}\" - {}", self.content, author),
            None => self.content.clone(),
        }
    }
}

/// Case-insensitive search over content and author, optionally restricted
/// to one category
pub fn filter_quotes(
    quotes: &[Quote],
    query: &str,
    category: Option<QuoteCategory>,
) -> Vec<Quote> {
    let query_lower = query.trim().to_lowercase();

    quotes
        .iter()
        .filter(|quote| {
            query_lower.is_empty()
                || quote.content.to_lowercase().contains(&query_lower)
                || quote
                    .author
                    .as_ref()
                    .is_some_and(|a| a.to_lowercase().contains(&query_lower))
        })
        .filter(|quote| category.map_or(true, |c| quote.category == c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_blank_content() {
        assert!(Quote::new("   ", None, QuoteCategory::Focus).is_err());
        assert!(Quote::new("", None, QuoteCategory::Focus).is_err());
    }

    #[test]
    fn test_new_assigns_unique_ids() {
        let a = Quote::new("Same words.", None, QuoteCategory::Growth).unwrap();
        let b = Quote::new("Same words.", None, QuoteCategory::Growth).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display_and_share_text_with_author() {
        let quote = Quote::new(
            "Focus creates power.",
            Some("Anon".to_string()),
            QuoteCategory::Focus,
        )
        .unwrap();

        assert_eq!(quote.display_text(), "\"Focus creates power.\"\n\n— Anon");
        assert_eq!(quote.share_text(), "\"Focus creates power.\" - Anon");
    }

    #[test]
    fn test_display_text_ignores_empty_author() {
        let quote = Quote::new("Grit is golden.", Some(String::new()), QuoteCategory::Resilience)
            .unwrap();

        assert_eq!(quote.display_text(), "Grit is golden.");
        assert_eq!(quote.share_text(), "Grit is golden.");
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let quote = Quote::new("Act now.", None, QuoteCategory::Action).unwrap();
        let value = serde_json::to_value(&quote).unwrap();

        assert!(value.get("dateAdded").is_some());
        assert_eq!(value["category"], "Action");
        assert!(value["author"].is_null());
    }

    #[test]
    fn test_missing_category_defaults_to_motivation() {
        let json = r#"{
            "id": "7d9f7c4e-3c5e-4a43-9a8e-2f1d3f0e9b10",
            "content": "Keep going.",
            "dateAdded": "2024-01-01T00:00:00Z"
        }"#;

        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.category, QuoteCategory::Motivation);
        assert!(quote.author.is_none());
    }

    #[test]
    fn test_filter_quotes_by_query_and_category() {
        let quotes = vec![
            Quote::new("Buy courage daily.", None, QuoteCategory::Courage).unwrap(),
            Quote::new("Focus beats distraction.", Some("Milk Man".to_string()), QuoteCategory::Focus)
                .unwrap(),
            Quote::new("Growth is slow.", None, QuoteCategory::Growth).unwrap(),
        ];

        let by_content = filter_quotes(&quotes, "FOCUS", None);
        assert_eq!(by_content.len(), 1);

        let by_author = filter_quotes(&quotes, "milk", None);
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].category, QuoteCategory::Focus);

        let by_category = filter_quotes(&quotes, "", Some(QuoteCategory::Growth));
        assert_eq!(by_category.len(), 1);

        assert!(filter_quotes(&quotes, "nonexistent", None).is_empty());
    }
}
