use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;

/// Category entity - groups posts under a named, colored label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category edits. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Build a URL-safe slug from a category name.
///
/// Letters are lowercased, anything outside `[a-z0-9]` that is not whitespace
/// or a hyphen is dropped, and runs of whitespace/hyphens become a single `-`.
/// The result never starts or ends with a hyphen.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    slug
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl Category {
    pub fn new(name: &str, description: Option<String>, color: Option<String>) -> Self {
        let now = Utc::now();
        let name = name.trim().to_string();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            description,
            color,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply edits; the slug follows the name only when a name is supplied.
    pub fn apply(&mut self, changes: CategoryChanges) {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
            self.slug = slugify(&self.name);
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(color) = changes.color {
            self.color = Some(color);
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let len = self.name.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&len) {
            return Err(DomainError::Validation(format!(
                "Name must be between {NAME_MIN} and {NAME_MAX} characters"
            )));
        }
        if let Some(color) = &self.color {
            if !is_hex_color(color) {
                return Err(DomainError::Validation(
                    "Color must be a valid hex color".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_slug_shape(slug: &str) {
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
            "unexpected character in {slug:?}"
        );
        assert!(!slug.contains("--"), "double hyphen in {slug:?}");
    }

    #[test]
    fn test_slugify_examples() {
        assert_eq!(slugify("Web Development"), "web-development");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
        assert_eq!(slugify("Tips -- and   Tricks"), "tips-and-tricks");
        assert_eq!(slugify("snake_case name"), "snakecase-name");
        assert_eq!(slugify("  Padded  "), "padded");
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
    }

    #[test]
    fn test_slug_shape_holds_for_awkward_names() {
        let names = [
            "Hello, World!",
            "---",
            "a - - b",
            "ÜBER cool\t\ttabs",
            "2024: Year in Review",
            "multi\nline\r\nname",
            "__init__",
        ];
        for name in names {
            assert_slug_shape(&slugify(name));
        }
    }

    #[test]
    fn test_new_computes_slug() {
        let category = Category::new(" Machine Learning ", None, Some("#A1B2C3".into()));
        assert_eq!(category.name, "Machine Learning");
        assert_eq!(category.slug, "machine-learning");
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_apply_without_name_keeps_slug() {
        let mut category = Category::new("Rust", None, None);
        category.apply(CategoryChanges {
            description: Some("Systems".into()),
            ..Default::default()
        });
        assert_eq!(category.slug, "rust");
        assert_eq!(category.description.as_deref(), Some("Systems"));

        category.apply(CategoryChanges {
            name: Some("Rust Lang".into()),
            ..Default::default()
        });
        assert_eq!(category.slug, "rust-lang");
    }

    #[test]
    fn test_validate_color() {
        let category = Category::new("Design", None, Some("red".into()));
        assert_eq!(
            category.validate(),
            Err(DomainError::Validation(
                "Color must be a valid hex color".to_string()
            ))
        );
    }
}
