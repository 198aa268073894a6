use std::{fmt, path::PathBuf};

use api_types::income::IncomeDocument;
use reqwest::Url;

use crate::error::{AppError, LoadError, Result};

/// Where a location string points to once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(Url),
    Local(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Option<Url>,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let base_url = base_url
            .map(Url::parse)
            .transpose()
            .map_err(|err| AppError::InvalidConfig(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Resolves `location` against the configured base URL.
    ///
    /// Without a base URL, anything that is not an `http(s)://` or `file://`
    /// URL is a path on the local filesystem.
    pub fn resolve(&self, location: &str) -> std::result::Result<Source, LoadError> {
        let invalid = |reason: String| LoadError::InvalidLocation(format!("{location}: {reason}"));

        let url = match &self.base_url {
            Some(base) => base.join(location).map_err(|err| invalid(err.to_string()))?,
            None => match Url::parse(location) {
                Ok(url) if matches!(url.scheme(), "http" | "https" | "file") => url,
                _ => return Ok(Source::Local(PathBuf::from(location))),
            },
        };

        match url.scheme() {
            "http" | "https" => Ok(Source::Remote(url)),
            "file" => url
                .to_file_path()
                .map(Source::Local)
                .map_err(|()| invalid("not a local file path".to_string())),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    /// Retrieves and parses the income document at `location`.
    ///
    /// A single attempt is made; there is no timeout and no retry.
    pub async fn fetch_dataset(
        &self,
        location: &str,
    ) -> std::result::Result<IncomeDocument, LoadError> {
        let source = self.resolve(location)?;
        tracing::info!("loading income data from {source}");

        let body = match &source {
            Source::Remote(url) => self.fetch_remote(url.clone()).await?,
            Source::Local(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|err| LoadError::Fetch(format!("{}: {err}", path.display())))?,
        };
        tracing::debug!("read {} bytes from {source}", body.len());

        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_remote(&self, url: Url) -> std::result::Result<String, LoadError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| LoadError::Fetch(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(LoadError::Fetch(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            )));
        }

        res.text()
            .await
            .map_err(|err| LoadError::Fetch(err.to_string()))
    }
}
