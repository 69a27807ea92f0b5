use super::*;

/// Runs the agenda extraction for one parsed page and attaches its metadata.
pub(super) fn extract_session(
    rules: &AgendaRules,
    document: &Html,
    page: &PageEntry,
    kind: SessionKind,
    listing: Option<&SessionListingEntry>,
) -> Result<SessionRecord, AgendaError> {
    let attachment = rules.attachment(document)?;
    let extraction = rules.extract(document, kind.dialect())?;

    Ok(SessionRecord {
        project: extraction.agenda,
        meta: SessionMeta {
            talk_date: listing.and_then(|entry| entry.talk_date.clone()),
            talk_name: listing.map(|entry| entry.talk_name.clone()),
            type_talk: kind.tag().to_string(),
            talk_href: listing.map(|entry| entry.talk_href.clone()),
            talk_code: page.talk_code.clone(),
            file_name: attachment.file_name,
            file_link: attachment.file_link,
        },
        diagnostics: extraction.diagnostics,
    })
}

pub(super) fn process_page(
    rules: &AgendaRules,
    pages_dir: &Path,
    page: &PageEntry,
    listing: Option<&SessionListingEntry>,
) -> Result<SessionRecord> {
    let kind = SessionKind::from_tag(&page.type_talk)
        .with_context(|| format!("unknown session type '{}'", page.type_talk))?;
    let html = read_html(&pages_dir.join(&page.filename))?;
    let document = Html::parse_document(&html);

    let record = extract_session(rules, &document, page, kind, listing)
        .with_context(|| format!("failed to extract agenda for {}", page.talk_code))?;
    Ok(record)
}

pub(super) fn tally_record(counts: &mut ExtractCounts, record: &SessionRecord) {
    counts.extracted_count += 1;
    counts.topic_count += record.project.items.len();
    counts.question_count += record.project.question_count();
    counts.merged_short_titles += record.diagnostics.merged_titles;

    match record.diagnostics.lost_question {
        Some(LostQuestionOutcome::Recovered) => counts.recovered_lost_questions += 1,
        Some(LostQuestionOutcome::NotFound) => counts.missing_lost_questions += 1,
        None => {}
    }

    if record.diagnostics.mismatch.is_some() {
        counts.mismatched_documents += 1;
    }
    if !record.diagnostics.duplicate_titles.is_empty() {
        counts.duplicate_title_documents += 1;
    }
}

/// Pages named by `--session`, or every page when none are named.
pub(super) fn select_pages<'a>(
    pages: &'a [PageEntry],
    sessions: &[String],
    warnings: &mut Vec<String>,
) -> Vec<&'a PageEntry> {
    if sessions.is_empty() {
        return pages.iter().collect();
    }

    for code in sessions {
        if !pages.iter().any(|page| &page.talk_code == code) {
            warn!(session = %code, "requested session has no saved page");
            warnings.push(format!("requested session {code} has no saved page"));
        }
    }

    pages
        .iter()
        .filter(|page| sessions.contains(&page.talk_code))
        .collect()
}

pub(super) fn load_or_refresh_inventory(
    cache_root: &Path,
    inventory_manifest_path: &Path,
    refresh: bool,
) -> Result<PageInventoryManifest> {
    if refresh || !inventory_manifest_path.exists() {
        let manifest = inventory::build_manifest(cache_root)?;
        write_json_pretty(inventory_manifest_path, &manifest)?;
        info!(path = %inventory_manifest_path.display(), "refreshed page inventory");
        return Ok(manifest);
    }

    read_json(inventory_manifest_path)
}

/// Listing entries keyed by talk code; empty when no listing was saved.
pub(super) fn load_listing(
    listing_manifest_path: &Path,
    warnings: &mut Vec<String>,
) -> Result<HashMap<String, SessionListingEntry>> {
    if !listing_manifest_path.exists() {
        warn!(
            path = %listing_manifest_path.display(),
            "session listing manifest missing; metadata limited to page names"
        );
        warnings.push(format!(
            "session listing manifest missing: {}",
            listing_manifest_path.display()
        ));
        return Ok(HashMap::new());
    }

    let listing: SessionListingManifest = read_json(listing_manifest_path)?;
    Ok(listing
        .sessions
        .into_iter()
        .map(|entry| (entry.talk_code.clone(), entry))
        .collect())
}
