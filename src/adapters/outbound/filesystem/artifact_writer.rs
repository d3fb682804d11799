use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::shared::error::EnrichError;
use crate::shared::Result;

/// GzipArtifactWriter adapter for persisting downloaded report artifacts
///
/// The platform delivers reports gzip-compressed. The compressed
/// download is kept on disk beside the decompressed CSV so a failed
/// decompression can be retried without another download.
pub struct GzipArtifactWriter;

impl GzipArtifactWriter {
    pub fn new() -> Self {
        Self
    }

    /// The on-disk location for the compressed download: the target path
    /// with `.gz` appended.
    pub fn compressed_path(&self, target: &Path) -> PathBuf {
        let mut name = target.as_os_str().to_os_string();
        name.push(".gz");
        PathBuf::from(name)
    }

    /// Writes the raw compressed bytes next to the target path.
    pub fn write_compressed(&self, target: &Path, bytes: &[u8]) -> Result<PathBuf> {
        let gz_path = self.compressed_path(target);
        let mut file = File::create(&gz_path).map_err(|e| EnrichError::FileWrite {
            path: gz_path.clone(),
            details: e.to_string(),
        })?;
        file.write_all(bytes).map_err(|e| EnrichError::FileWrite {
            path: gz_path.clone(),
            details: e.to_string(),
        })?;
        Ok(gz_path)
    }

    /// Decompresses a gzip file to the target path.
    ///
    /// # Returns
    /// The number of decompressed bytes written.
    pub fn decompress_to(&self, gz_path: &Path, target: &Path) -> Result<u64> {
        let compressed = File::open(gz_path).map_err(|e| EnrichError::FileRead {
            path: gz_path.to_path_buf(),
            details: e.to_string(),
        })?;
        let mut decoder = GzDecoder::new(BufReader::new(compressed));

        let output = File::create(target).map_err(|e| EnrichError::FileWrite {
            path: target.to_path_buf(),
            details: e.to_string(),
        })?;
        let mut writer = BufWriter::new(output);

        let bytes = io::copy(&mut decoder, &mut writer).map_err(|e| EnrichError::FileWrite {
            path: target.to_path_buf(),
            details: format!("Failed to decompress {}: {}", gz_path.display(), e),
        })?;
        writer.flush().map_err(|e| EnrichError::FileWrite {
            path: target.to_path_buf(),
            details: e.to_string(),
        })?;

        Ok(bytes)
    }
}

impl Default for GzipArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}
