use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use super::CatalogError;

/// Location of a CSV export: a local file or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(String),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Self::Remote(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    pub async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<u8>, CatalogError> {
        match self {
            DataSource::File(path) => {
                debug!(path = %path.display(), "reading catalog file");
                tokio::fs::read(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        location: path.display().to_string(),
                        source,
                    })
            }
            DataSource::Remote(url) => {
                debug!(%url, "fetching catalog export");
                let response = client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CatalogError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{url}"),
        }
    }
}
