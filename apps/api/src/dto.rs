use serde::Serialize;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Boolean acknowledgement used by `/submit` and `/login`.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Successful upload payload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub filename: String,
    pub sha256: String,
}
