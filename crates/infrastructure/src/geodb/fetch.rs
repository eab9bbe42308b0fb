use super::reader::MmdbIndex;
use async_trait::async_trait;
use geotxt_application::ports::{GeoSnapshot, SnapshotLoader};
use geotxt_domain::DomainError;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads snapshots from a file on disk.
pub struct FileSnapshotLoader {
    path: PathBuf,
    origin: String,
}

impl FileSnapshotLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let origin = path.display().to_string();
        Self { path, origin }
    }
}

#[async_trait]
impl SnapshotLoader for FileSnapshotLoader {
    async fn load(&self) -> Result<GeoSnapshot, DomainError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DomainError::LoadFailed(format!("{}: {}", self.origin, e)))?;
        let bytes = unpack_database(bytes)
            .map_err(|e| DomainError::LoadFailed(format!("{}: {}", self.origin, e)))?;
        let index = MmdbIndex::from_bytes(bytes)?;
        Ok(GeoSnapshot::new(self.origin.clone(), Arc::new(index)))
    }

    fn origin(&self) -> &str {
        &self.origin
    }
}

/// Downloads snapshots over HTTP(S) with a bounded request timeout.
pub struct HttpSnapshotLoader {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotLoader {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("geotxt-dns/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::FetchFailed(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SnapshotLoader for HttpSnapshotLoader {
    async fn load(&self) -> Result<GeoSnapshot, DomainError> {
        debug!(url = %self.url, "downloading geo database");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DomainError::FetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::FetchFailed(format!(
                "{}: HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::FetchFailed(e.to_string()))?;

        let bytes = unpack_database(body.to_vec())
            .map_err(|e| DomainError::FetchFailed(format!("{}: {}", self.url, e)))?;
        let index = MmdbIndex::from_bytes(bytes)
            .map_err(|e| DomainError::FetchFailed(e.to_string()))?;
        Ok(GeoSnapshot::new(self.url.clone(), Arc::new(index)))
    }

    fn origin(&self) -> &str {
        &self.url
    }
}

/// Undo the packaging a database ships in: plain mmdb, gzip (`.mmdb.gz`),
/// or a gzipped tar archive with an `.mmdb` member. Detection is by magic
/// bytes, not by file extension.
fn unpack_database(bytes: Vec<u8>) -> io::Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    let mut decompressed = Vec::new();
    flate2::read::GzDecoder::new(bytes.as_slice()).read_to_end(&mut decompressed)?;

    if is_tar(&decompressed) {
        return extract_mmdb_member(&decompressed);
    }
    Ok(decompressed)
}

fn is_tar(bytes: &[u8]) -> bool {
    bytes.len() > 262 && &bytes[257..262] == b"ustar"
}

fn extract_mmdb_member(tar_bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut archive = tar::Archive::new(tar_bytes);
    for entry in archive.entries()? {
        let mut entry = entry?;
        let is_mmdb = entry
            .path()?
            .extension()
            .is_some_and(|ext| ext == "mmdb");
        if is_mmdb {
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            return Ok(contents);
        }
    }
    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        "archive contains no .mmdb member",
    ))
}
