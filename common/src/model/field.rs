//! Field schema: one addressable region within a template.
//!
//! Fields are serialized with camelCase keys so the JSON matches what the
//! backend and the generation endpoint expect (`fontSize`, `tableRows`, ...).
//! Table-specific attributes are optional and omitted from the wire format
//! for every other field type.

use serde::{Deserialize, Serialize};

/// The kind of a template field. `Label` is decorative only: it is excluded
/// from generated data-entry forms and from submitted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Checkbox,
    Label,
    Table,
}

impl FieldType {
    /// Stable lowercase name, identical to the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Checkbox => "checkbox",
            FieldType::Label => "label",
            FieldType::Table => "table",
        }
    }

    pub fn from_str(value: &str) -> Option<FieldType> {
        match value {
            "text" => Some(FieldType::Text),
            "number" => Some(FieldType::Number),
            "date" => Some(FieldType::Date),
            "checkbox" => Some(FieldType::Checkbox),
            "label" => Some(FieldType::Label),
            "table" => Some(FieldType::Table),
            _ => None,
        }
    }

    /// All drawable kinds, in the order the designer toolbar offers them.
    pub fn all() -> [FieldType; 6] {
        [
            FieldType::Text,
            FieldType::Number,
            FieldType::Date,
            FieldType::Checkbox,
            FieldType::Label,
            FieldType::Table,
        ]
    }
}

/// One field of a template.
///
/// `name` is the data key during form collection and must be unique within a
/// template; collisions are not rejected here and the later value wins during
/// collection (see `forms::collect_form_data`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub x: f64,
    pub y: f64,
    /// Absent for `label` fields, which size themselves from their text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,

    // Table-only attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_headers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_height: Option<f64>,
}

pub fn default_font_size() -> f64 {
    12.0
}

pub fn default_font_weight() -> String {
    "normal".to_string()
}

pub fn default_font_family() -> String {
    "Helvetica".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_attributes_are_omitted_for_plain_fields() {
        let field = Field {
            name: "amount".into(),
            label: "Amount".into(),
            field_type: FieldType::Number,
            x: 10.0,
            y: 10.0,
            width: Some(100.0),
            height: Some(20.0),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            font_family: default_font_family(),
            table_rows: None,
            table_columns: None,
            table_headers: None,
            cell_width: None,
            cell_height: None,
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["fontSize"], 12.0);
        assert!(json.get("tableRows").is_none());
    }

    #[test]
    fn field_deserializes_with_camel_case_keys() {
        let field: Field = serde_json::from_str(
            r#"{"name":"items","type":"table","x":5,"y":40,"width":300,"height":120,
                "tableRows":3,"tableColumns":2,"tableHeaders":["Qty","Desc"],
                "cellWidth":150,"cellHeight":40}"#,
        )
        .unwrap();
        assert_eq!(field.field_type, FieldType::Table);
        assert_eq!(field.table_rows, Some(3));
        assert_eq!(field.table_headers.as_deref(), Some(&["Qty".to_string(), "Desc".to_string()][..]));
        assert_eq!(field.font_family, "Helvetica");
    }
}
