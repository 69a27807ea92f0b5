use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::cli::InventoryArgs;
use crate::model::{PageEntry, PageInventoryManifest};
use crate::session::parse_talk_code;
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub fn run(args: InventoryArgs) -> Result<()> {
    let manifest = build_manifest(&args.cache_root)?;

    if args.dry_run {
        info!(
            page_count = manifest.page_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.cache_root.join("manifests").join("page_inventory.json"));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote page inventory manifest");
    info!(page_count = manifest.page_count, "inventory completed");

    Ok(())
}

/// Indexes `<cache_root>/pages/<talk_code>.html`.
pub fn build_manifest(cache_root: &Path) -> Result<PageInventoryManifest> {
    let pages_dir = cache_root.join("pages");
    let mut page_paths = discover_pages(&pages_dir)?;
    page_paths.sort();

    let mut pages = Vec::with_capacity(page_paths.len());
    for path in page_paths {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();

        let Some((kind, _)) = parse_talk_code(stem) else {
            debug!(file = %filename, "skipping page without talk-code name");
            continue;
        };

        pages.push(PageEntry {
            talk_code: stem.to_string(),
            type_talk: kind.tag().to_string(),
            sha256: sha256_file(&path)?,
            filename,
        });
    }

    if pages.is_empty() {
        bail!("no session pages found in {}", pages_dir.display());
    }

    pages.sort_by(|a, b| {
        a.type_talk
            .cmp(&b.type_talk)
            .then(a.talk_code.cmp(&b.talk_code))
    });

    Ok(PageInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: pages_dir.display().to_string(),
        page_count: pages.len(),
        pages,
    })
}

fn discover_pages(pages_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();

    let entries = fs::read_dir(pages_dir)
        .with_context(|| format!("failed to read {}", pages_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", pages_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_html = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("html"))
            .unwrap_or(false);

        if is_html {
            pages.push(path);
        }
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "hcj-agenda-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("pages")).expect("scratch pages dir should be created");
        root
    }

    #[test]
    fn build_manifest_indexes_talk_code_pages_only() {
        let root = scratch_root("inventory");
        let pages = root.join("pages");
        fs::write(pages.join("vrp_0042.html"), "<html></html>").expect("write page");
        fs::write(pages.join("dp1_0007.html"), "<html></html>").expect("write page");
        fs::write(pages.join("notes.html"), "<html></html>").expect("write page");
        fs::write(pages.join("vrp_0043.txt"), "text").expect("write page");

        let manifest = build_manifest(&root).expect("inventory should build");
        let codes = manifest
            .pages
            .iter()
            .map(|page| page.talk_code.as_str())
            .collect::<Vec<&str>>();

        assert_eq!(codes, vec!["dp1_0007", "vrp_0042"]);
        assert_eq!(manifest.page_count, 2);
        assert_eq!(manifest.pages[0].type_talk, "dp1");
        assert_eq!(manifest.pages[0].sha256.len(), 64);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn build_manifest_rejects_empty_page_directory() {
        let root = scratch_root("inventory-empty");
        assert!(build_manifest(&root).is_err());
        let _ = fs::remove_dir_all(&root);
    }
}
