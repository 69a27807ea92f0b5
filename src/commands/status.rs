use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{ExtractRunManifest, PageInventoryManifest, SessionListingManifest};
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.cache_root.join("manifests");
    let listing_path = manifest_dir.join("session_listing.json");
    let inventory_path = manifest_dir.join("page_inventory.json");
    let output_dir = args.cache_root.join("out");

    info!(cache_root = %args.cache_root.display(), "status requested");

    if listing_path.exists() {
        let listing: SessionListingManifest = read_json(&listing_path)?;
        info!(
            generated_at = %listing.generated_at,
            source_page = %listing.source_page,
            sessions = listing.session_count,
            "loaded session listing manifest"
        );
    } else {
        warn!(path = %listing_path.display(), "session listing manifest missing");
    }

    if inventory_path.exists() {
        let inventory: PageInventoryManifest = read_json(&inventory_path)?;
        info!(
            generated_at = %inventory.generated_at,
            page_count = inventory.page_count,
            "loaded page inventory manifest"
        );
    } else {
        warn!(path = %inventory_path.display(), "page inventory manifest missing");
    }

    match latest_run_manifest(&manifest_dir)? {
        Some(path) => {
            let manifest: ExtractRunManifest = read_json(&path)?;
            info!(
                run_id = %manifest.run_id,
                status = %manifest.status,
                updated_at = %manifest.updated_at,
                pages = manifest.counts.page_count,
                extracted = manifest.counts.extracted_count,
                failed = manifest.counts.failed_count,
                topics = manifest.counts.topic_count,
                questions = manifest.counts.question_count,
                recovered_lost_questions = manifest.counts.recovered_lost_questions,
                merged_short_titles = manifest.counts.merged_short_titles,
                mismatched_documents = manifest.counts.mismatched_documents,
                duplicate_title_documents = manifest.counts.duplicate_title_documents,
                "loaded latest extract run manifest"
            );
            for failure in &manifest.failures {
                warn!(session = %failure.talk_code, reason = %failure.reason, "failed session");
            }
        }
        None => warn!(path = %manifest_dir.display(), "no extract run manifest found"),
    }

    if output_dir.exists() {
        let session_files = count_session_files(&output_dir)?;
        info!(path = %output_dir.display(), session_files, "output directory status");
    } else {
        warn!(path = %output_dir.display(), "output directory missing");
    }

    Ok(())
}

/// Run manifests carry a compact UTC timestamp, so the lexically last name
/// is the newest run.
fn latest_run_manifest(manifest_dir: &Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.exists() {
        return Ok(None);
    }

    let mut latest: Option<PathBuf> = None;
    let entries = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", manifest_dir.display()))?;
        let path = entry.path();
        let is_run_manifest = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with("extract_run_") && name.ends_with(".json"))
            .unwrap_or(false);

        if is_run_manifest && latest.as_ref().is_none_or(|current| &path > current) {
            latest = Some(path);
        }
    }

    Ok(latest)
}

fn count_session_files(output_dir: &Path) -> Result<usize> {
    let entries = fs::read_dir(output_dir)
        .with_context(|| format!("failed to read {}", output_dir.display()))?;

    let mut count = 0usize;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", output_dir.display()))?;
        let is_session_file = entry
            .file_name()
            .to_str()
            .map(|name| {
                name.starts_with("hcj_") && name.ends_with(".json") && name != "hcj_data.json"
            })
            .unwrap_or(false);
        if is_session_file {
            count += 1;
        }
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_run_manifest_picks_newest_timestamp() {
        let dir = std::env::temp_dir().join(format!("hcj-agenda-status-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("scratch dir should be created");
        for name in [
            "extract_run_20240101T000000Z.json",
            "extract_run_20240315T101500Z.json",
            "page_inventory.json",
        ] {
            fs::write(dir.join(name), "{}").expect("write manifest");
        }

        let latest = latest_run_manifest(&dir).expect("scan should succeed");
        assert_eq!(
            latest.as_deref(),
            Some(dir.join("extract_run_20240315T101500Z.json").as_path())
        );
        assert_eq!(count_session_files(&dir).expect("count should succeed"), 0);

        let _ = fs::remove_dir_all(&dir);
    }
}
