use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use tracing::debug;
use url::form_urlencoded;

use crate::state::AppState;

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Decoded text fields of a form body, in the order they were sent.
///
/// Both url-encoded and multipart bodies are accepted. File parts are
/// skipped. Any other body, or one that cannot be read, yields no fields.
#[derive(Debug, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        Self(form_urlencoded::parse(body).into_owned().collect())
    }

    /// First value sent for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// All pairs as borrowed strings.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    async fn from_multipart(mut multipart: Multipart) -> Self {
        let mut fields = Vec::new();

        loop {
            match multipart.next_field().await {
                Ok(Some(field)) if field.file_name().is_some() => continue,
                Ok(Some(field)) => {
                    let name = field.name().unwrap_or_default().to_owned();
                    match field.text().await {
                        Ok(value) => fields.push((name, value)),
                        Err(error) => {
                            debug!(%error, "multipart form field unreadable");
                            break;
                        }
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    debug!(%error, "multipart form body unreadable");
                    break;
                }
            }
        }

        Self(fields)
    }
}

impl FromRequest<AppState> for FormFields {
    type Rejection = Infallible;

    async fn from_request(request: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match media_type(request.headers()).as_deref() {
            Some(URLENCODED) => {
                let body = Bytes::from_request(request, state)
                    .await
                    .unwrap_or_default();
                Ok(Self::from_urlencoded(&body))
            }
            Some(MULTIPART) => Ok(match Multipart::from_request(request, state).await {
                Ok(multipart) => Self::from_multipart(multipart).await,
                Err(_) => Self::default(),
            }),
            _ => Ok(Self::default()),
        }
    }
}

fn media_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
}
