//! Component state for the template designer.
//!
//! The designer owns the in-memory draft template: a name, page geometry and
//! a list of drawable objects. Ownership transfers to the template store on
//! a successful save; until then the draft exists only here.

use common::codec::{field_from_object, CanvasObject};
use common::model::template::{DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
use common::model::template::Template;
use yew::prelude::*;

/// An in-progress pointer drag of one canvas object. Client coordinates of
/// the previous pointer event are kept so each move applies a delta,
/// independent of where inside the object the drag started.
pub struct DragState {
    pub index: usize,
    pub last_x: f64,
    pub last_y: f64,
}

pub struct DesignerComponent {
    pub template_name: String,
    pub page_width: f64,
    pub page_height: f64,
    /// Draft objects in field order (the visual/tab order).
    pub objects: Vec<CanvasObject>,
    pub selected: Option<usize>,
    /// Pure view transform; stored geometry is unaffected.
    pub zoom: f64,
    pub drag: Option<DragState>,
    /// Stored templates offered by the load dropdown.
    pub saved_templates: Vec<Template>,
    /// One in-flight save or import at a time.
    pub busy: bool,
    /// Digest of the draft at last save, for the unsaved-changes marker.
    pub original_md5: Option<String>,
    pub loaded: bool,
    pub import_input_ref: NodeRef,
}

impl DesignerComponent {
    pub fn new() -> Self {
        Self {
            template_name: String::new(),
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            objects: Vec::new(),
            selected: None,
            zoom: 1.0,
            drag: None,
            saved_templates: Vec::new(),
            busy: false,
            original_md5: None,
            loaded: false,
            import_input_ref: Default::default(),
        }
    }

    pub fn selected_object(&self) -> Option<&CanvasObject> {
        self.selected.and_then(|i| self.objects.get(i))
    }

    pub fn selected_object_mut(&mut self) -> Option<&mut CanvasObject> {
        let index = self.selected?;
        self.objects.get_mut(index)
    }

    /// MD5 over the persistable form of the draft. Geometry is rounded the
    /// same way saving rounds it, so pure pixel jitter below one point does
    /// not mark the draft dirty.
    pub fn digest(&self) -> String {
        let fields: Vec<_> = self.objects.iter().map(field_from_object).collect();
        let payload = serde_json::json!({
            "name": self.template_name,
            "pageWidth": self.page_width,
            "pageHeight": self.page_height,
            "fields": fields,
        });
        format!("{:x}", md5::compute(payload.to_string()))
    }

    pub fn dirty(&self) -> bool {
        match &self.original_md5 {
            Some(original) => original != &self.digest(),
            None => !self.objects.is_empty() || !self.template_name.is_empty(),
        }
    }
}
