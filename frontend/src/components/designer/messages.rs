use common::api::{ApiError, ImportedTemplate, SaveTemplateResponse};
use common::model::field::FieldType;

/// Property-panel edit applied to the selected object.
#[derive(Clone)]
pub enum PropEdit {
    Name(String),
    Label(String),
    Kind(FieldType),
    X(f64),
    Y(f64),
    Width(f64),
    Height(f64),
    FontSize(f64),
    FontWeight(String),
    TableRows(u32),
    TableColumns(u32),
    /// Comma-separated header list; truncated to the column count.
    TableHeaders(String),
}

pub enum Msg {
    AddField(FieldType),
    Select(Option<usize>),
    PointerDown { index: usize, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    DeleteSelected,
    ClearCanvas,
    SetTemplateName(String),
    Edit(PropEdit),
    SetZoom(f64),
    Save,
    RemoteSaveDone(Result<SaveTemplateResponse, ApiError>),
    LoadTemplate(String),
    OpenImportDialog,
    ImportFileSelected(web_sys::File),
    ImportFinished(Result<ImportedTemplate, ApiError>),
}
