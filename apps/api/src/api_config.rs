use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use dochost_core::AppError;
use dochost_domain::Credential;
use tracing_subscriber::EnvFilter;

const DEFAULT_UPLOAD_DIR: &str = "/data/uploads";
const DEFAULT_EVENT_LOG_PATH: &str = "/data/logs/app.json";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub upload_dir: PathBuf,
    pub event_log_path: PathBuf,
    pub credential: Credential,
    pub trust_forwarded_for: bool,
    pub max_upload_bytes: usize,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let api_port = parse_or("API_PORT", lookup("API_PORT"), 5000_u16)?;

        let upload_dir =
            PathBuf::from(lookup("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_owned()));
        let event_log_path = PathBuf::from(
            lookup("EVENT_LOG_PATH").unwrap_or_else(|| DEFAULT_EVENT_LOG_PATH.to_owned()),
        );

        let credential = Credential::new(
            required(&lookup, "LOGIN_USERNAME")?,
            required(&lookup, "LOGIN_PASSWORD")?,
        )?;

        let trust_forwarded_for = lookup("TRUST_FORWARDED_FOR")
            .unwrap_or_else(|| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let max_upload_bytes = parse_or(
            "MAX_UPLOAD_BYTES",
            lookup("MAX_UPLOAD_BYTES"),
            DEFAULT_MAX_UPLOAD_BYTES,
        )?;

        Ok(Self {
            api_host,
            api_port,
            upload_dir,
            event_log_path,
            credential,
            trust_forwarded_for,
            max_upload_bytes,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, AppError> {
    lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name} '{raw}': {error}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use super::ApiConfig;

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, dochost_core::AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = load(&[("LOGIN_USERNAME", "testuser"), ("LOGIN_PASSWORD", "Password123")]);
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_port, 5000);
        assert_eq!(config.upload_dir, Path::new("/data/uploads"));
        assert_eq!(config.event_log_path, Path::new("/data/logs/app.json"));
        assert!(!config.trust_forwarded_for);
        assert_eq!(config.max_upload_bytes, 100 * 1024 * 1024);
        assert_eq!(config.credential.username(), "testuser");
        assert_eq!(
            config.socket_address().map(|address| address.to_string()).ok(),
            Some("0.0.0.0:5000".to_owned())
        );
    }

    #[test]
    fn credentials_are_required() {
        assert!(load(&[("LOGIN_USERNAME", "testuser")]).is_err());
        assert!(load(&[("LOGIN_PASSWORD", "Password123")]).is_err());
        assert!(load(&[("LOGIN_USERNAME", " "), ("LOGIN_PASSWORD", "Password123")]).is_err());
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let config = load(&[
            ("LOGIN_USERNAME", "testuser"),
            ("LOGIN_PASSWORD", "Password123"),
            ("API_PORT", "fifty"),
        ]);
        assert!(config.is_err());
    }

    #[test]
    fn overrides_are_honored() {
        let config = load(&[
            ("LOGIN_USERNAME", "auditor"),
            ("LOGIN_PASSWORD", "s3cret"),
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8080"),
            ("UPLOAD_DIR", "/srv/uploads"),
            ("EVENT_LOG_PATH", "/srv/events.jsonl"),
            ("TRUST_FORWARDED_FOR", "TRUE"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ]);
        assert!(config.is_ok());
        let config = config.unwrap_or_else(|_| unreachable!());

        assert_eq!(config.upload_dir, Path::new("/srv/uploads"));
        assert_eq!(config.event_log_path, Path::new("/srv/events.jsonl"));
        assert!(config.trust_forwarded_for);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(
            config.socket_address().map(|address| address.to_string()).ok(),
            Some("127.0.0.1:8080".to_owned())
        );
    }
}
