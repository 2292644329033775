use std::time::Duration;

use anyhow::{Context, Result};

use crate::inference::{DEFAULT_GENERATION_URL, DEFAULT_QA_URL};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a number is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Unset means question answering runs in degraded (rules-only) mode.
    pub huggingface_api_key: Option<String>,
    pub huggingface_qa_url: String,
    pub huggingface_generation_url: String,
    pub inference_timeout: Duration,
    pub presigned_url_ttl: Duration,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            s3_bucket: require("S3_BUCKET")?,
            s3_endpoint: require("S3_ENDPOINT")?,
            s3_region: get("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            aws_access_key_id: require("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
            huggingface_api_key: get("HUGGINGFACE_API_KEY"),
            huggingface_qa_url: get("HUGGINGFACE_QA_URL")
                .unwrap_or_else(|| DEFAULT_QA_URL.to_string()),
            huggingface_generation_url: get("HUGGINGFACE_GENERATION_URL")
                .unwrap_or_else(|| DEFAULT_GENERATION_URL.to_string()),
            inference_timeout: Duration::from_secs(parse_or(
                get("INFERENCE_TIMEOUT_SECS"),
                30,
                "INFERENCE_TIMEOUT_SECS must be a whole number of seconds",
            )?),
            presigned_url_ttl: Duration::from_secs(parse_or(
                get("PRESIGNED_URL_TTL_SECS"),
                3600,
                "PRESIGNED_URL_TTL_SECS must be a whole number of seconds",
            )?),
            max_upload_bytes: parse_or(
                get("MAX_UPLOAD_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
                "MAX_UPLOAD_BYTES must be a byte count",
            )?,
            port: parse_or(get("PORT"), 8080, "PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// True when no inference credential is configured.
    pub fn inference_degraded(&self) -> bool {
        self.huggingface_api_key.is_none()
    }
}

fn parse_or<T>(value: Option<String>, default: T, message: &'static str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => v.trim().parse::<T>().context(message),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn required() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost/resumeqa"),
            ("S3_BUCKET", "resumes"),
            ("S3_ENDPOINT", "http://localhost:9000"),
            ("AWS_ACCESS_KEY_ID", "minio"),
            ("AWS_SECRET_ACCESS_KEY", "minio123"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Config> {
        Config::from_source(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = load(&required()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.s3_region, "us-east-1");
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.huggingface_qa_url, DEFAULT_QA_URL);
        assert_eq!(config.huggingface_generation_url, DEFAULT_GENERATION_URL);
        assert_eq!(config.inference_timeout, Duration::from_secs(30));
        assert_eq!(config.presigned_url_ttl, Duration::from_secs(3600));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.inference_degraded());
    }

    #[test]
    fn test_missing_required_variable_is_named() {
        let mut vars = required();
        vars.remove("S3_BUCKET");
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("S3_BUCKET"));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let mut vars = required();
        vars.insert("HUGGINGFACE_API_KEY", "   ");
        vars.insert("PORT", "");
        let config = load(&vars).unwrap();
        assert!(config.inference_degraded());
        assert_eq!(config.port, 8080);

        vars.insert("DATABASE_URL", "");
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_overrides_and_malformed_numbers() {
        let mut vars = required();
        vars.insert("HUGGINGFACE_API_KEY", "hf_token");
        vars.insert("INFERENCE_TIMEOUT_SECS", "5");
        vars.insert("PORT", "3000");
        let config = load(&vars).unwrap();
        assert!(!config.inference_degraded());
        assert_eq!(config.inference_timeout, Duration::from_secs(5));
        assert_eq!(config.port, 3000);

        vars.insert("PORT", "not-a-port");
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
