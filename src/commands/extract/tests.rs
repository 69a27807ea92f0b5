use std::fs;
use std::path::PathBuf;

use super::*;
use crate::agenda::Dialect;

const DISCIPLINARY_PAGE: &str = r#"
    <html><body>
    <article id="node-700">
      <div><h2>Засідання Першої Дисциплінарної палати</h2></div>
      <div>
        <p class="rtejustify">1. Про відкриття дисциплінарних справ:</p>
        <ol><li>Про відкриття справи щодо судді Іваненка (Доповідач – Петро Петренко);</li></ol>
        <p class="rtejustify">2. Різне</p>
        <p>Про інформацію члена палати</p>
        <p>Секретар Першої Дисциплінарної палати</p>
        <p><a href="/sites/default/files/dp1_0007.docx">Проєкт порядку денного</a></p>
      </div>
    </article>
    </body></html>
"#;

const PLENARY_PAGE: &str = r#"
    <html><body>
    <article id="node-420">
      <div><h2>Засідання Вищої ради правосуддя</h2></div>
      <div>
        <p><a href="/sites/default/files/vrp_0042.docx">Порядок денний</a></p>
        <p><u>1. Кадрові питання:</u></p>
        <p>1) Про звільнення судді Коваленка К.К.;</p>
        <p>2) Про відставку судді Сидоренка С.С.</p>
      </div>
    </article>
    </body></html>
"#;

fn page(talk_code: &str, type_talk: &str) -> PageEntry {
    PageEntry {
        filename: format!("{talk_code}.html"),
        talk_code: talk_code.to_string(),
        type_talk: type_talk.to_string(),
        sha256: String::new(),
    }
}

fn listing_entry(talk_code: &str) -> SessionListingEntry {
    SessionListingEntry {
        talk_date: Some("15.03.2024".to_string()),
        talk_name: "Засідання Вищої ради правосуддя".to_string(),
        type_talk: "vrp".to_string(),
        talk_href: "/announces/zasidannya-vrp-42".to_string(),
        talk_code: talk_code.to_string(),
    }
}

fn rules() -> AgendaRules {
    AgendaRules::new().expect("agenda rules should compile")
}

#[test]
fn extract_session_attaches_attachment_and_listing_metadata() {
    let document = Html::parse_document(PLENARY_PAGE);
    let entry = listing_entry("vrp_0042");
    let record = extract_session(
        &rules(),
        &document,
        &page("vrp_0042", "vrp"),
        SessionKind::Plenary,
        Some(&entry),
    )
    .expect("plenary page should extract");

    assert_eq!(record.meta.talk_code, "vrp_0042");
    assert_eq!(record.meta.type_talk, "vrp");
    assert_eq!(record.meta.talk_date.as_deref(), Some("15.03.2024"));
    assert_eq!(record.meta.file_name, "Порядок денний");
    assert_eq!(record.meta.file_link, "/sites/default/files/vrp_0042.docx");
    assert_eq!(record.diagnostics.dialect, Dialect::Plenary);

    let items = &record.project.items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "1. Кадрові питання");
    let texts = items[0]
        .questions
        .iter()
        .map(|question| question.text.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(
        texts,
        vec![
            "Про звільнення судді Коваленка К.К.",
            "Про відставку судді Сидоренка С.С"
        ]
    );
}

#[test]
fn extract_session_recovers_disciplinary_trailing_topic() {
    let document = Html::parse_document(DISCIPLINARY_PAGE);
    let record = extract_session(
        &rules(),
        &document,
        &page("dp1_0007", "dp1"),
        SessionKind::from_tag("dp1").expect("dp1 is a known tag"),
        None,
    )
    .expect("disciplinary page should extract");

    assert!(record.meta.talk_date.is_none());
    assert_eq!(
        record.diagnostics.lost_question,
        Some(LostQuestionOutcome::Recovered)
    );

    let items = &record.project.items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].questions[0].speaker.as_deref(), Some("Петро Петренко"));
    assert_eq!(items[1].title, "2. Різне");
    assert_eq!(items[1].questions[0].text, "Про інформацію члена палати");
}

#[test]
fn extract_session_without_attachment_fails() {
    let document =
        Html::parse_document(r#"<article id="node-1"><div><p>1. Питання</p></div></article>"#);
    let err = extract_session(
        &rules(),
        &document,
        &page("vrp_0001", "vrp"),
        SessionKind::Plenary,
        None,
    )
    .expect_err("page without attachment should fail");

    assert!(matches!(err, AgendaError::MissingStructure { .. }));
}

#[test]
fn tally_record_counts_topics_and_repairs() {
    let document = Html::parse_document(DISCIPLINARY_PAGE);
    let record = extract_session(
        &rules(),
        &document,
        &page("dp1_0007", "dp1"),
        SessionKind::from_tag("dp1").expect("dp1 is a known tag"),
        None,
    )
    .expect("disciplinary page should extract");

    let mut counts = ExtractCounts::default();
    tally_record(&mut counts, &record);

    assert_eq!(counts.extracted_count, 1);
    assert_eq!(counts.topic_count, 2);
    assert_eq!(counts.question_count, 2);
    assert_eq!(counts.recovered_lost_questions, 1);
    assert_eq!(counts.missing_lost_questions, 0);
    assert_eq!(counts.mismatched_documents, 0);
    assert_eq!(counts.duplicate_title_documents, 0);
}

#[test]
fn select_pages_filters_and_reports_unknown_sessions() {
    let pages = vec![page("dp1_0007", "dp1"), page("vrp_0042", "vrp")];
    let mut warnings = Vec::new();

    let all = select_pages(&pages, &[], &mut warnings);
    assert_eq!(all.len(), 2);

    let chosen = select_pages(
        &pages,
        &["vrp_0042".to_string(), "vrp_0099".to_string()],
        &mut warnings,
    );
    assert_eq!(chosen.len(), 1);
    assert_eq!(chosen[0].talk_code, "vrp_0042");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("vrp_0099"));
}

#[test]
fn run_writes_session_files_and_skips_broken_pages() {
    let root: PathBuf =
        std::env::temp_dir().join(format!("hcj-agenda-extract-{}", std::process::id()));
    let _ = fs::remove_dir_all(&root);
    let pages_dir = root.join("pages");
    fs::create_dir_all(&pages_dir).expect("pages dir should be created");
    fs::write(pages_dir.join("dp1_0007.html"), DISCIPLINARY_PAGE).expect("write page");
    fs::write(pages_dir.join("vrp_0042.html"), PLENARY_PAGE).expect("write page");
    fs::write(pages_dir.join("dp2_0001.html"), "<html><body>порожньо</body></html>")
        .expect("write page");

    let listing = SessionListingManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_page: "announces.html".to_string(),
        session_count: 1,
        sessions: vec![listing_entry("vrp_0042")],
    };
    write_json_pretty(
        &root.join("manifests").join("session_listing.json"),
        &listing,
    )
    .expect("listing manifest should be written");

    run(ExtractArgs {
        cache_root: root.clone(),
        inventory_manifest_path: None,
        listing_manifest_path: None,
        output_dir: None,
        refresh_inventory: false,
        sessions: Vec::new(),
    })
    .expect("extract run should complete");

    let output_dir = root.join("out");
    assert!(output_dir.join("hcj_dp1_0007.json").exists());
    assert!(!output_dir.join("hcj_dp2_0001.json").exists());

    let plenary: serde_json::Value =
        read_json(&output_dir.join("hcj_vrp_0042.json")).expect("session file should parse");
    assert_eq!(plenary["meta"]["talk_date"], "15.03.2024");
    assert_eq!(
        plenary["project"]["1. Кадрові питання"]
            .as_array()
            .map(Vec::len),
        Some(2)
    );
    assert_eq!(
        plenary["project"]["1. Кадрові питання"][0]["error"],
        serde_json::Value::Bool(false)
    );

    let aggregate: serde_json::Value =
        read_json(&output_dir.join("hcj_data.json")).expect("aggregate file should parse");
    assert!(aggregate["dp1"]["dp1_0007"].is_object());
    assert!(aggregate["vrp"]["vrp_0042"].is_object());

    let run_manifest_path = fs::read_dir(root.join("manifests"))
        .expect("manifests dir should exist")
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("extract_run_"))
        })
        .expect("run manifest should be written");
    let manifest: ExtractRunManifest =
        read_json(&run_manifest_path).expect("run manifest should parse");

    assert_eq!(manifest.status, "completed_with_failures");
    assert_eq!(manifest.counts.page_count, 3);
    assert_eq!(manifest.counts.extracted_count, 2);
    assert_eq!(manifest.counts.failed_count, 1);
    assert_eq!(manifest.counts.recovered_lost_questions, 1);
    assert_eq!(manifest.failures[0].talk_code, "dp2_0001");
    assert!(manifest.failures[0].reason.contains("missing document structure"));

    let _ = fs::remove_dir_all(&root);
}
