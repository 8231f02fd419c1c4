use common::api::ApiError;

pub enum Msg {
    Select(String),
    SetText { name: String, value: String },
    SetChecked { name: String, checked: bool },
    SetCell { name: String, row: usize, col: usize, value: String },
    OpenImport,
    ImportChosen(web_sys::File),
    ImportParsed(Result<serde_json::Value, String>),
    FillSample,
    Generate,
    Generated(Result<Vec<u8>, ApiError>),
}
