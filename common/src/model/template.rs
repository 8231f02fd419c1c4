//! Template schema: the contract shared between the designer, the generator
//! and the backend. Field order is the visual/tab order and is preserved on
//! save/load.

use serde::{Deserialize, Serialize};

use crate::model::field::Field;

/// US Letter at 72 DPI, the default page geometry.
pub const DEFAULT_PAGE_WIDTH: f64 = 612.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable identifier, derived from the name or server-assigned. Empty
    /// until the store persists the template for the first time.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "default_page_width")]
    pub page_width: f64,
    #[serde(default = "default_page_height")]
    pub page_height: f64,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Set once when the store first persists the template, immutable after.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_file_path: Option<String>,
}

impl Template {
    pub fn new(name: &str) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            fields: Vec::new(),
            created_at: None,
            pdf_file_path: None,
        }
    }
}

fn default_page_width() -> f64 {
    DEFAULT_PAGE_WIDTH
}

fn default_page_height() -> f64 {
    DEFAULT_PAGE_HEIGHT
}

/// Derives a template id from its display name: lowercase, spaces become
/// underscores. A name with no usable characters falls back to a fresh UUID
/// so the store never ends up with an empty key.
pub fn slug_id(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    if slug.is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_replaces_spaces() {
        assert_eq!(slug_id("Invoice Template 2"), "invoice_template_2");
        assert_eq!(slug_id("  Receipt "), "receipt");
    }

    #[test]
    fn empty_name_falls_back_to_uuid() {
        let id = slug_id("   ");
        assert!(!id.is_empty());
        assert_ne!(id, slug_id("   "));
    }

    #[test]
    fn page_dimensions_default_to_us_letter() {
        let template: Template = serde_json::from_str(r#"{"name":"Bare"}"#).unwrap();
        assert_eq!(template.page_width, 612.0);
        assert_eq!(template.page_height, 792.0);
    }
}
