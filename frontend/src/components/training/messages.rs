use common::api::{ApiError, MlTemplatesResponse};
use common::training::{TrainResponse, TrainStatus};

pub enum Msg {
    SetEpochs(u32),
    SetBatchSize(u32),
    SetSynthetic(bool),
    Start,
    Started(Result<TrainResponse, ApiError>),
    /// Timer fired: issue one status request (if still current).
    Poll { epoch: u32, task_id: String },
    PollResult {
        epoch: u32,
        task_id: String,
        result: Result<TrainStatus, ApiError>,
    },
    Reset,
    /// Best-effort load of the model's known-template list.
    FetchKnownTemplates,
    KnownTemplates(Result<MlTemplatesResponse, ApiError>),
}
