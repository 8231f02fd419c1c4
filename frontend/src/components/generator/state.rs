//! State for the form generation workflow.

use std::collections::HashMap;

use common::forms::RawValue;
use common::model::records::RecentGeneration;
use common::model::template::Template;
use yew::prelude::*;

pub struct GeneratorComponent {
    pub templates: Vec<Template>,
    pub selected: Option<Template>,
    /// Current control values keyed by field name.
    pub values: HashMap<String, RawValue>,
    pub busy: bool,
    pub error: Option<String>,
    /// Data snapshot of the in-flight generation, logged on success.
    pub pending_data: Option<serde_json::Map<String, serde_json::Value>>,
    pub recent: Vec<RecentGeneration>,
    pub import_input_ref: NodeRef,
}

impl GeneratorComponent {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
            selected: None,
            values: HashMap::new(),
            busy: false,
            error: None,
            pending_data: None,
            recent: Vec::new(),
            import_input_ref: Default::default(),
        }
    }

    /// Grid for a table field, allocated lazily at its declared dimensions.
    pub fn table_grid(&mut self, name: &str, rows: usize, columns: usize) -> &mut Vec<Vec<String>> {
        let entry = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| RawValue::Table(vec![vec![String::new(); columns]; rows]));
        if !matches!(entry, RawValue::Table(_)) {
            *entry = RawValue::Table(vec![vec![String::new(); columns]; rows]);
        }
        let RawValue::Table(grid) = entry else {
            unreachable!("entry was just normalized to a table");
        };
        grid
    }
}
