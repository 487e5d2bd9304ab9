use crate::models::SearchCriteria;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load every `*.json` criteria document in `dir`.
///
/// Read once per scrape, so edits show up on the next scrape. Documents that
/// can't be read or parsed are skipped with a warning, and a missing
/// directory simply yields no criteria.
pub async fn load_dir(dir: &Path) -> Vec<SearchCriteria> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Failed to read criteria directory");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    paths.push(path);
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to list criteria directory");
                break;
            }
        }
    }
    paths.sort();

    let mut criteria = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable criteria document");
                continue;
            }
        };

        match SearchCriteria::from_json(&raw) {
            Ok(parsed) => {
                debug!(path = %path.display(), "Loaded criteria document");
                criteria.push(parsed);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{e:#}"), "Skipping malformed criteria document");
            }
        }
    }

    criteria
}
