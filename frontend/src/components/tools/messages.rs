use common::api::ApiError;

pub enum Msg {
    Browse,
    FileChosen(web_sys::File),
    DragOver(bool),
    SetTemplateName(String),
    Finished(Result<serde_json::Value, ApiError>),
    /// Persist a staged auto-generate / AI-import result into the store.
    SaveStaged,
    /// Generate a filled PDF from an extraction result.
    SmartGenerate,
    SmartGenerated(Result<Vec<u8>, ApiError>),
}
