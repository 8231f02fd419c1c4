//! Data plane of the form generation workflow: collecting typed values from
//! the generated form controls, bulk-import prefill, sample data, and the
//! client-side PDF upload gate.
//!
//! Everything here is pure so the contracts (checkbox "Yes"/"" mapping,
//! blank-table-row dropping, MIME rejection before any network call) can be
//! tested without a browser.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::model::field::{Field, FieldType};

/// What a form control holds before collection.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Checked(bool),
    /// `[row][col]` cell contents of an editable table grid.
    Table(Vec<Vec<String>>),
}

#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("Only PDF files are accepted, got \"{0}\"")]
    NotPdf(String),
}

/// Rejects anything that is not a PDF before a request is issued. Browsers
/// occasionally report an empty MIME type on drag-and-drop, in which case the
/// file extension decides.
pub fn validate_pdf_upload(mime: &str, file_name: &str) -> Result<(), UploadError> {
    if mime == "application/pdf" {
        return Ok(());
    }
    if mime.is_empty() && file_name.to_lowercase().ends_with(".pdf") {
        return Ok(());
    }
    Err(UploadError::NotPdf(if mime.is_empty() {
        file_name.to_string()
    } else {
        mime.to_string()
    }))
}

/// Walks the fields in template order and builds the `data` object submitted
/// for generation.
///
/// - `label` fields are decorative and skipped entirely.
/// - Checkboxes emit exactly `"Yes"` or `""`, never booleans.
/// - Tables emit their kept rows (see [`collect_table_rows`]).
/// - A duplicate field name overwrites the earlier value; the store does not
///   reject collisions and neither does collection.
pub fn collect_form_data(fields: &[Field], values: &HashMap<String, RawValue>) -> Map<String, Value> {
    let mut data = Map::new();
    for field in fields {
        if field.field_type == FieldType::Label {
            continue;
        }
        let value = match (field.field_type, values.get(&field.name)) {
            (FieldType::Checkbox, Some(RawValue::Checked(true))) => json!("Yes"),
            (FieldType::Checkbox, _) => json!(""),
            (FieldType::Table, Some(RawValue::Table(rows))) => json!(collect_table_rows(rows)),
            (FieldType::Table, _) => json!(Vec::<Vec<String>>::new()),
            (_, Some(RawValue::Text(text))) => json!(text),
            _ => json!(""),
        };
        data.insert(field.name.clone(), value);
    }
    data
}

/// Drops rows whose cells are all blank (after trimming); the relative order
/// of the kept rows matches the original row order.
pub fn collect_table_rows(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    rows.iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .cloned()
        .collect()
}

/// Maps a bulk-import JSON document onto form values. Keys are matched to
/// field names; unknown keys are ignored. Table values accept either an
/// array of arrays or an array of objects; objects are matched against the
/// table headers when present and read positionally otherwise.
pub fn apply_import(fields: &[Field], document: &Value) -> HashMap<String, RawValue> {
    let mut values = HashMap::new();
    let Some(entries) = document.as_object() else {
        return values;
    };

    for field in fields {
        if field.field_type == FieldType::Label {
            continue;
        }
        let Some(raw) = entries.get(&field.name) else {
            continue;
        };
        let value = match field.field_type {
            FieldType::Checkbox => RawValue::Checked(truthy(raw)),
            FieldType::Table => RawValue::Table(import_table(field, raw)),
            _ => RawValue::Text(scalar_to_string(raw)),
        };
        values.insert(field.name.clone(), value);
    }
    values
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.to_lowercase().as_str(), "yes" | "true" | "1" | "x"),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn import_table(field: &Field, value: &Value) -> Vec<Vec<String>> {
    let rows = field.table_rows.unwrap_or(0) as usize;
    let columns = field.table_columns.unwrap_or(0) as usize;
    let mut grid = vec![vec![String::new(); columns]; rows];

    let Some(entries) = value.as_array() else {
        return grid;
    };

    for (r, entry) in entries.iter().take(rows).enumerate() {
        match entry {
            Value::Array(cells) => {
                for (c, cell) in cells.iter().take(columns).enumerate() {
                    grid[r][c] = scalar_to_string(cell);
                }
            }
            Value::Object(map) => {
                let headers = field.table_headers.as_deref().unwrap_or(&[]);
                if headers.is_empty() {
                    for (c, (_, cell)) in map.iter().take(columns).enumerate() {
                        grid[r][c] = scalar_to_string(cell);
                    }
                } else {
                    for (c, header) in headers.iter().take(columns).enumerate() {
                        if let Some(cell) = map.get(header) {
                            grid[r][c] = scalar_to_string(cell);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    grid
}

/// Synthetic placeholder for one field, used by the manual-testing fill
/// button. The RNG and current date are injected so tests stay deterministic.
/// Labels yield no value.
pub fn sample_value(field: &Field, rng: &mut dyn FnMut() -> f64, today: &str) -> Option<RawValue> {
    match field.field_type {
        FieldType::Label => None,
        FieldType::Text => Some(RawValue::Text("Sample text".to_string())),
        FieldType::Number => Some(RawValue::Text(((rng() * 1000.0).floor() as i64).to_string())),
        FieldType::Date => Some(RawValue::Text(today.to_string())),
        FieldType::Checkbox => Some(RawValue::Checked(rng() > 0.5)),
        FieldType::Table => {
            let rows = field.table_rows.unwrap_or(0) as usize;
            let columns = field.table_columns.unwrap_or(0) as usize;
            let grid = (0..rows)
                .map(|r| (0..columns).map(|c| format!("R{}C{}", r + 1, c + 1)).collect())
                .collect();
            Some(RawValue::Table(grid))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{field_from_object, new_object};

    fn plain_field(name: &str, field_type: FieldType) -> Field {
        let mut object = new_object(field_type, 0);
        object.name = name.to_string();
        field_from_object(&object)
    }

    fn table_field(name: &str, rows: u32, columns: u32) -> Field {
        let mut field = plain_field(name, FieldType::Table);
        field.table_rows = Some(rows);
        field.table_columns = Some(columns);
        field
    }

    #[test]
    fn checkbox_collects_yes_or_empty_string() {
        let fields = vec![plain_field("signed", FieldType::Checkbox)];
        let mut values = HashMap::new();

        values.insert("signed".to_string(), RawValue::Checked(true));
        let data = collect_form_data(&fields, &values);
        assert_eq!(data["signed"], json!("Yes"));

        values.insert("signed".to_string(), RawValue::Checked(false));
        let data = collect_form_data(&fields, &values);
        assert_eq!(data["signed"], json!(""));
    }

    #[test]
    fn blank_table_rows_are_dropped_in_order() {
        let rows = vec![
            vec!["".into(), "  ".into()],
            vec!["1".into(), "Widget".into()],
            vec!["".into(), "".into()],
            vec!["2".into(), "Gadget".into()],
        ];
        let kept = collect_table_rows(&rows);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0][1], "Widget");
        assert_eq!(kept[1][1], "Gadget");
        assert!(kept.iter().all(|row| row.iter().any(|c| !c.trim().is_empty())));
    }

    #[test]
    fn labels_are_excluded_from_collected_data() {
        let fields = vec![
            plain_field("title", FieldType::Label),
            plain_field("customer", FieldType::Text),
        ];
        let mut values = HashMap::new();
        values.insert("customer".to_string(), RawValue::Text("ACME".into()));
        let data = collect_form_data(&fields, &values);
        assert!(!data.contains_key("title"));
        assert_eq!(data["customer"], json!("ACME"));
    }

    #[test]
    fn import_accepts_array_of_arrays_and_array_of_objects() {
        let fields = vec![table_field("items", 3, 2)];

        let arrays = json!({"items": [["1", "Widget"], ["2", "Gadget"]]});
        let values = apply_import(&fields, &arrays);
        let RawValue::Table(grid) = &values["items"] else {
            panic!("expected table value");
        };
        assert_eq!(grid[0], vec!["1", "Widget"]);
        assert_eq!(grid[2], vec!["", ""]);

        let mut with_headers = table_field("items", 2, 2);
        with_headers.table_headers = Some(vec!["qty".into(), "desc".into()]);
        let objects = json!({"items": [{"desc": "Widget", "qty": 1}]});
        let values = apply_import(&[with_headers], &objects);
        let RawValue::Table(grid) = &values["items"] else {
            panic!("expected table value");
        };
        assert_eq!(grid[0], vec!["1", "Widget"]);
    }

    #[test]
    fn import_ignores_unknown_keys_and_coerces_scalars() {
        let fields = vec![
            plain_field("amount", FieldType::Number),
            plain_field("signed", FieldType::Checkbox),
        ];
        let doc = json!({"amount": 42.5, "signed": "Yes", "stray": "ignored"});
        let values = apply_import(&fields, &doc);
        assert_eq!(values["amount"], RawValue::Text("42.5".into()));
        assert_eq!(values["signed"], RawValue::Checked(true));
        assert!(!values.contains_key("stray"));
    }

    #[test]
    fn non_pdf_uploads_are_rejected_before_any_request() {
        assert!(validate_pdf_upload("application/pdf", "doc.pdf").is_ok());
        assert!(validate_pdf_upload("", "scan.PDF").is_ok());
        assert_eq!(
            validate_pdf_upload("image/png", "scan.png"),
            Err(UploadError::NotPdf("image/png".into()))
        );
        assert!(validate_pdf_upload("", "notes.txt").is_err());
    }

    #[test]
    fn sample_values_match_field_types() {
        let mut rng = || 0.75;
        let date = sample_value(&plain_field("due", FieldType::Date), &mut rng, "2026-08-23");
        assert_eq!(date, Some(RawValue::Text("2026-08-23".into())));

        let number = sample_value(&plain_field("qty", FieldType::Number), &mut rng, "");
        assert_eq!(number, Some(RawValue::Text("750".into())));

        let table = sample_value(&table_field("items", 2, 2), &mut rng, "");
        assert_eq!(
            table,
            Some(RawValue::Table(vec![
                vec!["R1C1".into(), "R1C2".into()],
                vec!["R2C1".into(), "R2C2".into()],
            ]))
        );

        assert_eq!(sample_value(&plain_field("hdr", FieldType::Label), &mut rng, ""), None);
    }
}
