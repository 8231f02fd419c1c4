//! HTTP plumbing between the page workflows and the backend.
//!
//! All requests resolve their base URL through the template store (so the
//! configured value, including the legacy-port migration, applies
//! everywhere). Failures are mapped onto the shared `ApiError` taxonomy:
//! transport errors get the "is the backend running" hint, structured
//! bodies surface their most specific message, everything else is opaque.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use common::api::{backend_message, ApiError};

use crate::storage::store;

/// Absolute URL for an API path such as `/ml/detect-template`.
pub fn endpoint(path: &str) -> String {
    format!("{}{}", store().api_base(), path)
}

/// Uploads a PDF as multipart form data (field name `file`), with optional
/// auxiliary string fields, and decodes the JSON response body.
pub async fn post_pdf(
    path: &str,
    file: &web_sys::File,
    extra: &[(&str, String)],
) -> Result<serde_json::Value, ApiError> {
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::Unexpected("could not build multipart form data".to_string()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Unexpected("could not attach the file".to_string()))?;
    for (key, value) in extra {
        form.append_with_str(key, value)
            .map_err(|_| ApiError::Unexpected(format!("could not attach field {}", key)))?;
    }

    let request = Request::post(&endpoint(path))
        .body(form)
        .map_err(|err| ApiError::Unexpected(err.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    json_body(response).await
}

/// POSTs a JSON body and decodes the JSON response.
pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<serde_json::Value, ApiError> {
    let request = Request::post(&endpoint(path))
        .json(body)
        .map_err(|err| ApiError::Unexpected(err.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    json_body(response).await
}

/// POSTs a JSON body to an endpoint returning a binary PDF.
pub async fn post_json_binary<B: Serialize>(path: &str, body: &B) -> Result<Vec<u8>, ApiError> {
    let request = Request::post(&endpoint(path))
        .json(body)
        .map_err(|err| ApiError::Unexpected(err.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(decode_failure(response).await);
    }
    response
        .binary()
        .await
        .map_err(|err| ApiError::Unexpected(err.to_string()))
}

pub async fn get_json(path: &str) -> Result<serde_json::Value, ApiError> {
    let response = Request::get(&endpoint(path))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    json_body(response).await
}

/// Narrows a decoded JSON value into a typed payload.
pub fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Unexpected(err.to_string()))
}

async fn json_body(response: Response) -> Result<serde_json::Value, ApiError> {
    if !response.ok() {
        return Err(decode_failure(response).await);
    }
    response
        .json::<serde_json::Value>()
        .await
        .map_err(|err| ApiError::Unexpected(err.to_string()))
}

async fn decode_failure(response: Response) -> ApiError {
    let status = response.status();
    match response.json::<serde_json::Value>().await {
        Ok(body) => {
            let message = backend_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            ApiError::Backend { status, message, body }
        }
        Err(_) => ApiError::Backend {
            status,
            message: format!("Request failed with status {}", status),
            body: serde_json::Value::Null,
        },
    }
}
