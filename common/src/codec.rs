//! Bidirectional codec between persisted `Field` records and the drawable
//! objects the canvas editor manipulates.
//!
//! Every call site that moves between the two representations (adding a
//! field, saving, loading, PDF import) goes through this one codec, so the
//! save and load mappings cannot drift apart. Geometry is kept as `f64`
//! while drawing and rounded to whole points on the way out.

use serde::{Deserialize, Serialize};

use crate::model::field::{
    default_font_family, default_font_size, default_font_weight, Field, FieldType,
};

/// Placement of the first auto-added object on an empty canvas.
pub const NEW_OBJECT_ORIGIN: (f64, f64) = (40.0, 40.0);
/// Each subsequently added object is offset down by this step.
pub const NEW_OBJECT_STEP: f64 = 34.0;

pub const DEFAULT_BOX_WIDTH: f64 = 140.0;
pub const DEFAULT_BOX_HEIGHT: f64 = 24.0;
pub const DEFAULT_CHECKBOX_SIZE: f64 = 16.0;
pub const DEFAULT_CELL_WIDTH: f64 = 80.0;
pub const DEFAULT_CELL_HEIGHT: f64 = 24.0;
pub const DEFAULT_TABLE_ROWS: u32 = 3;
pub const DEFAULT_TABLE_COLUMNS: u32 = 3;

/// Table metadata carried by a composite table object as one selectable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    pub rows: u32,
    pub columns: u32,
    pub headers: Vec<String>,
    pub cell_width: f64,
    pub cell_height: f64,
}

/// One drawable object on the designer canvas.
///
/// Labels keep a width/height for hit testing only; those values are derived
/// from the font metrics and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub font_weight: String,
    pub font_family: String,
    pub table: Option<TableMeta>,
}

impl CanvasObject {
    /// Label objects render as plain text and size themselves from the font,
    /// so direct width/height edits are rejected in their favor.
    pub fn accepts_box_resize(&self) -> bool {
        self.field_type != FieldType::Label
    }

    /// Hit-test box derived from font metrics for label objects.
    pub fn label_extent(label: &str, font_size: f64) -> (f64, f64) {
        let chars = label.chars().count().max(1) as f64;
        (chars * font_size * 0.6, font_size * 1.4)
    }

    /// Recomputes the derived extent after a label or font-size edit.
    pub fn refresh_label_extent(&mut self) {
        if self.field_type == FieldType::Label {
            let (w, h) = Self::label_extent(&self.label, self.font_size);
            self.width = w;
            self.height = h;
        }
    }
}

/// Creates a fresh drawable for `addField`: deterministic position offset by
/// a fixed vertical step per object already on the canvas, auto-named, and
/// sized per kind.
pub fn new_object(field_type: FieldType, existing: usize) -> CanvasObject {
    let (origin_x, origin_y) = NEW_OBJECT_ORIGIN;
    let index = existing as f64;
    let name = format!("field_{}", existing + 1);
    let label = match field_type {
        FieldType::Label => "Label".to_string(),
        _ => format!("Field {}", existing + 1),
    };

    let mut object = CanvasObject {
        name,
        label,
        field_type,
        x: origin_x,
        y: origin_y + index * NEW_OBJECT_STEP,
        width: DEFAULT_BOX_WIDTH,
        height: DEFAULT_BOX_HEIGHT,
        font_size: default_font_size(),
        font_weight: default_font_weight(),
        font_family: default_font_family(),
        table: None,
    };

    match field_type {
        FieldType::Checkbox => {
            object.width = DEFAULT_CHECKBOX_SIZE;
            object.height = DEFAULT_CHECKBOX_SIZE;
        }
        FieldType::Label => object.refresh_label_extent(),
        FieldType::Table => {
            let meta = TableMeta {
                rows: DEFAULT_TABLE_ROWS,
                columns: DEFAULT_TABLE_COLUMNS,
                headers: Vec::new(),
                cell_width: DEFAULT_CELL_WIDTH,
                cell_height: DEFAULT_CELL_HEIGHT,
            };
            object.width = meta.columns as f64 * meta.cell_width;
            object.height = meta.rows as f64 * meta.cell_height;
            object.table = Some(meta);
        }
        _ => {}
    }

    object
}

/// Converts a persisted field back into a drawable object. Exact inverse of
/// `field_from_object` for position, size and field metadata.
pub fn object_from_field(field: &Field) -> CanvasObject {
    let mut object = CanvasObject {
        name: field.name.clone(),
        label: field.label.clone(),
        field_type: field.field_type,
        x: field.x,
        y: field.y,
        width: field.width.unwrap_or(DEFAULT_BOX_WIDTH),
        height: field.height.unwrap_or(DEFAULT_BOX_HEIGHT),
        font_size: field.font_size,
        font_weight: field.font_weight.clone(),
        font_family: field.font_family.clone(),
        table: None,
    };

    if field.field_type == FieldType::Table {
        let rows = field.table_rows.unwrap_or(DEFAULT_TABLE_ROWS);
        let columns = field.table_columns.unwrap_or(DEFAULT_TABLE_COLUMNS);
        object.table = Some(TableMeta {
            rows,
            columns,
            headers: field.table_headers.clone().unwrap_or_default(),
            cell_width: field.cell_width.unwrap_or(DEFAULT_CELL_WIDTH),
            cell_height: field.cell_height.unwrap_or(DEFAULT_CELL_HEIGHT),
        });
    }

    object.refresh_label_extent();
    object
}

/// Converts a drawable object into its persisted field record, rounding all
/// geometry to whole points. Labels carry no width/height.
pub fn field_from_object(object: &CanvasObject) -> Field {
    let boxed = object.field_type != FieldType::Label;
    let mut field = Field {
        name: object.name.clone(),
        label: object.label.clone(),
        field_type: object.field_type,
        x: object.x.round(),
        y: object.y.round(),
        width: boxed.then(|| object.width.round()),
        height: boxed.then(|| object.height.round()),
        font_size: object.font_size,
        font_weight: object.font_weight.clone(),
        font_family: object.font_family.clone(),
        table_rows: None,
        table_columns: None,
        table_headers: None,
        cell_width: None,
        cell_height: None,
    };

    if let Some(meta) = &object.table {
        field.table_rows = Some(meta.rows);
        field.table_columns = Some(meta.columns);
        field.table_headers = Some(meta.headers.clone());
        field.cell_width = Some(meta.cell_width.round());
        field.cell_height = Some(meta.cell_height.round());
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_number_field_reloads_as_same_box() {
        // Template {name:"Invoice", fields:[amount number @10,10 100x20]}
        let field: Field = serde_json::from_str(
            r#"{"name":"amount","type":"number","x":10,"y":10,"width":100,"height":20}"#,
        )
        .unwrap();
        let object = object_from_field(&field);
        assert_eq!(object.field_type, FieldType::Number);
        assert_eq!((object.x, object.y), (10.0, 10.0));
        assert_eq!((object.width, object.height), (100.0, 20.0));
    }

    #[test]
    fn round_trip_is_lossless_up_to_rounding() {
        let mut object = new_object(FieldType::Text, 0);
        object.x = 33.4;
        object.y = 71.6;
        object.width = 120.2;
        object.height = 19.9;
        object.name = "customer".into();
        object.label = "Customer".into();

        let field = field_from_object(&object);
        assert_eq!((field.x, field.y), (33.0, 72.0));

        let reloaded = object_from_field(&field);
        let again = field_from_object(&reloaded);
        assert_eq!(field, again);
    }

    #[test]
    fn table_metadata_round_trips() {
        let mut object = new_object(FieldType::Table, 2);
        let meta = object.table.as_mut().unwrap();
        meta.rows = 4;
        meta.columns = 2;
        meta.headers = vec!["Qty".into(), "Description".into()];
        meta.cell_width = 110.0;
        meta.cell_height = 30.0;

        let field = field_from_object(&object);
        assert_eq!(field.table_rows, Some(4));
        assert_eq!(field.table_columns, Some(2));

        let reloaded = object_from_field(&field);
        assert_eq!(reloaded.table, object.table);
    }

    #[test]
    fn labels_persist_without_box_geometry() {
        let object = new_object(FieldType::Label, 1);
        assert!(!object.accepts_box_resize());

        let field = field_from_object(&object);
        assert!(field.width.is_none());
        assert!(field.height.is_none());

        // Derived extent comes back from the font, not from storage.
        let reloaded = object_from_field(&field);
        assert_eq!(reloaded.width, object.width);
        assert_eq!(field_from_object(&reloaded), field);
    }

    #[test]
    fn added_objects_step_down_the_page() {
        let first = new_object(FieldType::Text, 0);
        let second = new_object(FieldType::Text, 1);
        assert_eq!(first.x, second.x);
        assert_eq!(second.y - first.y, NEW_OBJECT_STEP);
        assert_ne!(first.name, second.name);
    }
}
