//! Template store: a thin persistence layer over a key-value backend.
//!
//! The browser supplies localStorage as the backend; tests supply an
//! in-memory map. All persisted state lives under fixed keys and each key is
//! independently readable/writable. There is no cross-tab coordination:
//! last write wins, matching what localStorage itself provides.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::model::records::{ModelInfo, RecentGeneration};
use crate::model::template::{slug_id, Template};

pub const KEY_TEMPLATES: &str = "pdf_templates";
pub const KEY_RECENT_GENERATIONS: &str = "recent_generations";
pub const KEY_MODEL_INFO: &str = "last_model_info";
pub const KEY_API_BASE: &str = "api_base_url";

pub const DEFAULT_API_BASE: &str = "http://localhost:9000/api";
/// Number of recent-generation entries surfaced to the UI.
pub const RECENT_DISPLAY_CAP: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("could not serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minimal key-value contract the store runs on.
pub trait KeyValue {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub struct TemplateStore<S: KeyValue> {
    backend: S,
}

impl<S: KeyValue> TemplateStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// All stored templates, in insertion order. A missing or corrupt entry
    /// yields an empty collection rather than an error.
    pub fn get_all(&self) -> Vec<Template> {
        self.read_json(KEY_TEMPLATES).unwrap_or_default()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Template> {
        self.get_all().into_iter().find(|t| t.id == id)
    }

    /// Persists a template, assigning `id` (slug of the name) and
    /// `created_at` when missing. An existing entry with the same id is
    /// overwritten in place; `created_at` of the original entry survives the
    /// overwrite. Returns the value as persisted.
    pub fn save(&self, mut template: Template, now_iso: &str) -> Result<Template, StoreError> {
        if template.id.is_empty() {
            template.id = slug_id(&template.name);
        }

        let mut templates = self.get_all();
        match templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => {
                template.created_at = existing.created_at.clone().or(template.created_at);
                if template.created_at.is_none() {
                    template.created_at = Some(now_iso.to_string());
                }
                *existing = template.clone();
            }
            None => {
                if template.created_at.is_none() {
                    template.created_at = Some(now_iso.to_string());
                }
                templates.push(template.clone());
            }
        }

        self.write_json(KEY_TEMPLATES, &templates)?;
        Ok(template)
    }

    /// Appends to the generation log.
    pub fn save_recent_generation(&self, record: RecentGeneration) -> Result<(), StoreError> {
        let mut records: Vec<RecentGeneration> =
            self.read_json(KEY_RECENT_GENERATIONS).unwrap_or_default();
        records.push(record);
        self.write_json(KEY_RECENT_GENERATIONS, &records)
    }

    /// Newest first, capped to the display limit.
    pub fn recent_generations(&self) -> Vec<RecentGeneration> {
        let mut records: Vec<RecentGeneration> =
            self.read_json(KEY_RECENT_GENERATIONS).unwrap_or_default();
        records.reverse();
        records.truncate(RECENT_DISPLAY_CAP);
        records
    }

    pub fn model_info(&self) -> Option<ModelInfo> {
        self.read_json(KEY_MODEL_INFO)
    }

    /// Overwrites the cached training result wholesale.
    pub fn set_model_info(&self, info: &ModelInfo) -> Result<(), StoreError> {
        self.write_json(KEY_MODEL_INFO, info)
    }

    /// Configured API base URL. A legacy `:8000` port is migrated to `:9000`
    /// and written back whenever the value is read.
    pub fn api_base(&self) -> String {
        let stored = self
            .backend
            .get(KEY_API_BASE)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if stored.contains(":8000") {
            let migrated = stored.replace(":8000", ":9000");
            let _ = self.backend.set(KEY_API_BASE, &migrated);
            migrated
        } else {
            stored
        }
    }

    pub fn set_api_base(&self, base: &str) -> Result<(), StoreError> {
        self.backend.set(KEY_API_BASE, base.trim_end_matches('/'))
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        serde_json::from_str(&raw).ok()
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryBackend {
        entries: RefCell<HashMap<String, String>>,
    }

    impl KeyValue for MemoryBackend {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.entries.borrow_mut().insert(key.into(), value.into());
            Ok(())
        }
    }

    fn store() -> TemplateStore<MemoryBackend> {
        TemplateStore::new(MemoryBackend::default())
    }

    #[test]
    fn save_assigns_id_and_created_at_once() {
        let store = store();
        let saved = store
            .save(Template::new("Invoice Template"), "2026-08-23T10:00:00Z")
            .unwrap();
        assert_eq!(saved.id, "invoice_template");
        assert_eq!(saved.created_at.as_deref(), Some("2026-08-23T10:00:00Z"));

        // Overwrite later: created_at is immutable.
        let again = store.save(saved, "2026-08-24T00:00:00Z").unwrap();
        assert_eq!(again.created_at.as_deref(), Some("2026-08-23T10:00:00Z"));
    }

    #[test]
    fn saving_the_same_id_twice_overwrites_instead_of_duplicating() {
        let store = store();
        let mut template = store.save(Template::new("Invoice"), "t0").unwrap();
        assert_eq!(store.get_all().len(), 1);

        template.page_width = 595.0;
        store.save(template, "t1").unwrap();

        let all = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].page_width, 595.0);
    }

    #[test]
    fn get_by_id_round_trips_field_order() {
        use crate::codec::{field_from_object, new_object};
        use crate::model::field::FieldType;

        let mut template = Template::new("Ordered");
        for (i, kind) in [FieldType::Text, FieldType::Number, FieldType::Table]
            .into_iter()
            .enumerate()
        {
            template.fields.push(field_from_object(&new_object(kind, i)));
        }
        let saved = store_with(&template);
        let loaded = saved.get_by_id("ordered").unwrap();
        assert_eq!(loaded.fields, saved.get_all()[0].fields);
        assert_eq!(loaded.fields[1].name, "field_2");
    }

    fn store_with(template: &Template) -> TemplateStore<MemoryBackend> {
        let store = store();
        store.save(template.clone(), "t0").unwrap();
        store
    }

    #[test]
    fn recent_generations_come_back_newest_first_capped_to_five() {
        let store = store();
        for i in 0..7 {
            store
                .save_recent_generation(RecentGeneration {
                    template_id: "invoice".into(),
                    template_name: "Invoice".into(),
                    data: serde_json::json!({"n": i}),
                    timestamp: format!("t{}", i),
                })
                .unwrap();
        }
        let recent = store.recent_generations();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].timestamp, "t6");
        assert_eq!(recent[4].timestamp, "t2");
    }

    #[test]
    fn api_base_migrates_legacy_port_and_persists_it() {
        let store = store();
        assert_eq!(store.api_base(), DEFAULT_API_BASE);

        store.set_api_base("http://localhost:8000/api/").unwrap();
        assert_eq!(store.api_base(), "http://localhost:9000/api");
        // Migration was written back, not just applied on read.
        assert_eq!(
            store.backend.get(KEY_API_BASE).unwrap(),
            "http://localhost:9000/api"
        );
    }

    #[test]
    fn model_info_is_overwritten_wholesale() {
        let store = store();
        assert!(store.model_info().is_none());
        let info = ModelInfo {
            trained_at: "2026-08-23T10:00:00Z".into(),
            accuracy: 0.95,
            epochs: 20,
            template_count: 4,
            training_time: 12.5,
        };
        store.set_model_info(&info).unwrap();
        assert_eq!(store.model_info(), Some(info));
    }
}
