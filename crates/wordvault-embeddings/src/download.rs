//! Model file retrieval.
//!
//! A model file is fetched at most once: [`ensure_file`] returns the cached
//! path whenever a non-empty file is already present, and otherwise streams
//! the download into a `.part` file that is renamed into place only after
//! the stream completes. A crashed or failed download therefore never
//! leaves a truncated file where the loader would trust it.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use wordvault_core::DataRoot;

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::registry::{PretrainedModel, MODEL_FAMILY};

/// Maximum redirects followed before giving up.
const REDIRECT_LIMIT: usize = 10;

/// Ensure the model file exists locally, downloading it if missing.
///
/// # Returns
/// Path to the complete model file under `<root>/downloads/word2vec/`.
///
/// # Errors
/// * `EmbeddingError::Http` - transport failure
/// * `EmbeddingError::DownloadFailed` - non-success HTTP status
/// * `EmbeddingError::Io` - local filesystem failure
pub async fn ensure_file(
    model: &PretrainedModel,
    root: &DataRoot,
    show_progress: bool,
) -> EmbeddingResult<PathBuf> {
    let file_name = model.file_name();
    let target = root.download_path(MODEL_FAMILY, &file_name)?;

    if let Ok(metadata) = std::fs::metadata(&target) {
        if metadata.len() > 0 {
            debug!(path = %target.display(), "Model file already present");
            return Ok(target);
        }
        // A zero-byte file is treated as absent.
        std::fs::remove_file(&target)?;
    }

    let part = root.download_path(MODEL_FAMILY, &format!("{file_name}.part"))?;
    info!(url = model.url, path = %target.display(), "Downloading model file");
    download_file(model.url, &part, &target, show_progress).await?;
    Ok(target)
}

/// Stream a URL into `part`, then rename it to `target` on success.
async fn download_file(
    url: &str,
    part: &Path,
    target: &Path,
    show_progress: bool,
) -> EmbeddingResult<()> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(REDIRECT_LIMIT))
        .build()?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(EmbeddingError::DownloadFailed {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let total_size = response.content_length();
    let progress = match (show_progress, total_size) {
        (true, Some(total)) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        }
        _ => None,
    };

    let mut stream = response.bytes_stream();
    let mut file = File::create(part).await?;
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(pb) = &progress {
            pb.inc(chunk.len() as u64);
        } else if let Some(total) = total_size {
            // Without a bar, log roughly every 100 MB.
            if total > 1_000_000 && downloaded % 100_000_000 < chunk.len() as u64 {
                let percent = (downloaded as f64 / total as f64) * 100.0;
                debug!("Download progress: {percent:.1}%");
            }
        }
    }

    file.flush().await?;
    drop(file);
    tokio::fs::rename(part, target).await?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    info!(bytes = downloaded, path = %target.display(), "Download complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn offline_model() -> PretrainedModel {
        PretrainedModel {
            name: "tiny_test",
            // Port 9 (discard) on loopback: connection is refused, never served.
            url: "http://127.0.0.1:9/tiny_test.bin",
            file_extension: "bin",
            dimension: 3,
            vocab_size: 2,
            description: "offline fixture",
        }
    }

    #[tokio::test]
    async fn test_existing_file_skips_network() {
        let tmp = TempDir::new().unwrap();
        let root = DataRoot::at(tmp.path());
        let model = offline_model();

        let target = root.download_path(MODEL_FAMILY, &model.file_name()).unwrap();
        std::fs::write(&target, b"not empty").unwrap();

        // The URL is unreachable, so this only passes if no request is made.
        let path = ensure_file(&model, &root, false).await.unwrap();
        assert_eq!(path, target);
        assert_eq!(std::fs::read(&path).unwrap(), b"not empty");
    }

    #[tokio::test]
    async fn test_failed_download_leaves_no_target_file() {
        let tmp = TempDir::new().unwrap();
        let root = DataRoot::at(tmp.path());
        let model = offline_model();

        let result = ensure_file(&model, &root, false).await;
        assert!(result.is_err());

        let target = root.download_path(MODEL_FAMILY, &model.file_name()).unwrap();
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_zero_byte_file_treated_as_absent() {
        let tmp = TempDir::new().unwrap();
        let root = DataRoot::at(tmp.path());
        let model = offline_model();

        let target = root.download_path(MODEL_FAMILY, &model.file_name()).unwrap();
        std::fs::write(&target, b"").unwrap();

        // The empty file triggers a (failing) re-download instead of being
        // returned as a valid model.
        let result = ensure_file(&model, &root, false).await;
        assert!(result.is_err());
        assert!(!target.exists());
    }
}
