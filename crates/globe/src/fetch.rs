use std::path::PathBuf;

use formats::geojson::{FeatureCollection, GeoJsonError};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

/// Where the countries dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    Path(PathBuf),
}

impl DatasetSource {
    /// `http://` and `https://` locations are URLs; anything else is a local path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GET {url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse dataset: {0}")]
    Parse(#[from] GeoJsonError),
}

pub async fn fetch_bytes(client: &Client, source: &DatasetSource) -> Result<Vec<u8>, FetchError> {
    match source {
        DatasetSource::Url(url) => {
            let resp = client.get(url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.clone(),
                    status,
                });
            }
            Ok(resp.bytes().await?.to_vec())
        }
        DatasetSource::Path(path) => {
            tokio::fs::read(path).await.map_err(|source| FetchError::Io {
                path: path.clone(),
                source,
            })
        }
    }
}

/// Fetches and parses the dataset once.
pub async fn fetch_collection(
    client: &Client,
    source: &DatasetSource,
) -> Result<FeatureCollection, FetchError> {
    let bytes = fetch_bytes(client, source).await?;
    let hash = blake3::hash(&bytes);
    info!(
        bytes = bytes.len(),
        blake3 = %hash.to_hex(),
        source = ?source,
        "fetched dataset"
    );

    let collection = FeatureCollection::from_geojson_slice(&bytes)?;
    info!(
        features = collection.len(),
        skipped = collection.skipped,
        "parsed dataset"
    );
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::{DatasetSource, FetchError, fetch_collection};
    use pretty_assertions::assert_eq;
    use reqwest::Client;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn parses_urls_and_paths() {
        assert_eq!(
            DatasetSource::parse("https://example.org/c.geojson"),
            DatasetSource::Url("https://example.org/c.geojson".to_string())
        );
        assert_eq!(
            DatasetSource::parse(" data/countries.geojson "),
            DatasetSource::Path(PathBuf::from("data/countries.geojson"))
        );
    }

    #[tokio::test]
    async fn reads_collection_from_local_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"{{ "type": "FeatureCollection", "features": [
                {{ "type": "Feature", "properties": {{ "ADMIN": "Testland" }},
                   "geometry": {{ "type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [0, 0]]] }} }}
            ] }}"#
        )
        .expect("write");

        let source = DatasetSource::Path(file.path().to_path_buf());
        let fc = fetch_collection(&Client::new(), &source).await.expect("fetch");
        assert_eq!(fc.len(), 1);
        assert_eq!(fc.features[0].name(), Some("Testland"));
    }

    #[tokio::test]
    async fn missing_file_and_bad_payload_are_errors() {
        let missing = DatasetSource::Path(PathBuf::from("/nonexistent/countries.geojson"));
        let err = fetch_collection(&Client::new(), &missing).await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{ "type": "Feature" }}"#).expect("write");
        let source = DatasetSource::Path(file.path().to_path_buf());
        let err = fetch_collection(&Client::new(), &source).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
