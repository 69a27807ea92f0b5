use super::*;

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("extract-{}", utc_compact_string(started_ts));

    let cache_root = args.cache_root.clone();
    let manifest_dir = cache_root.join("manifests");
    ensure_directory(&manifest_dir)?;

    let pages_dir = cache_root.join("pages");
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| cache_root.join("out"));
    ensure_directory(&output_dir)?;

    let inventory_manifest_path = args
        .inventory_manifest_path
        .clone()
        .unwrap_or_else(|| manifest_dir.join("page_inventory.json"));
    let listing_manifest_path = args
        .listing_manifest_path
        .clone()
        .unwrap_or_else(|| manifest_dir.join("session_listing.json"));
    let run_manifest_path = manifest_dir.join(format!(
        "extract_run_{}.json",
        utc_compact_string(started_ts)
    ));

    info!(cache_root = %cache_root.display(), run_id = %run_id, "starting extract");

    let inventory = load_or_refresh_inventory(
        &cache_root,
        &inventory_manifest_path,
        args.refresh_inventory,
    )?;

    let mut warnings = Vec::<String>::new();
    let listing = load_listing(&listing_manifest_path, &mut warnings)?;
    let pages = select_pages(&inventory.pages, &args.sessions, &mut warnings);

    let rules = AgendaRules::new().context("failed to build agenda extraction rules")?;

    let mut counts = ExtractCounts {
        page_count: pages.len(),
        ..ExtractCounts::default()
    };
    let mut failures = Vec::<ExtractFailure>::new();
    let mut sessions_by_type = BTreeMap::<String, BTreeMap<String, SessionRecord>>::new();

    for page in pages {
        let listing_entry = listing.get(&page.talk_code);
        match process_page(&rules, &pages_dir, page, listing_entry) {
            Ok(record) => {
                tally_record(&mut counts, &record);

                let record_path = output_dir.join(format!("hcj_{}.json", page.talk_code));
                write_json_pretty(&record_path, &record)?;
                info!(
                    session = %page.talk_code,
                    dialect = record.diagnostics.dialect.as_str(),
                    topics = record.project.items.len(),
                    questions = record.project.question_count(),
                    "extracted session agenda"
                );

                sessions_by_type
                    .entry(page.type_talk.clone())
                    .or_default()
                    .insert(page.talk_code.clone(), record);
            }
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(session = %page.talk_code, error = %reason, "skipping session page");
                counts.failed_count += 1;
                failures.push(ExtractFailure {
                    talk_code: page.talk_code.clone(),
                    reason,
                });
            }
        }
    }

    let aggregate_path = output_dir.join("hcj_data.json");
    write_json_pretty(&aggregate_path, &sessions_by_type)?;

    let status = if failures.is_empty() {
        "completed"
    } else {
        "completed_with_failures"
    };

    let manifest = ExtractRunManifest {
        manifest_version: 1,
        run_id,
        status: status.to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_extract_command(&args),
        paths: ExtractPaths {
            cache_root: cache_root.display().to_string(),
            pages_dir: pages_dir.display().to_string(),
            output_dir: output_dir.display().to_string(),
            inventory_manifest_path: inventory_manifest_path.display().to_string(),
            listing_manifest_path: listing_manifest_path.display().to_string(),
        },
        counts,
        failures,
        warnings,
    };

    write_json_pretty(&run_manifest_path, &manifest)?;
    info!(
        path = %run_manifest_path.display(),
        extracted = manifest.counts.extracted_count,
        failed = manifest.counts.failed_count,
        topics = manifest.counts.topic_count,
        questions = manifest.counts.question_count,
        "extract completed"
    );

    Ok(())
}

fn render_extract_command(args: &ExtractArgs) -> String {
    let mut command = format!(
        "hcj-agenda extract --cache-root {}",
        args.cache_root.display()
    );

    if let Some(path) = &args.inventory_manifest_path {
        command.push_str(&format!(" --inventory-manifest-path {}", path.display()));
    }
    if let Some(path) = &args.listing_manifest_path {
        command.push_str(&format!(" --listing-manifest-path {}", path.display()));
    }
    if let Some(path) = &args.output_dir {
        command.push_str(&format!(" --output-dir {}", path.display()));
    }
    if args.refresh_inventory {
        command.push_str(" --refresh-inventory");
    }
    for session in &args.sessions {
        command.push_str(&format!(" --session {session}"));
    }

    command
}
