use serde::{Deserialize, Serialize};

use crate::agenda::{AgendaDocument, ExtractionDiagnostics};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListingEntry {
    pub talk_date: Option<String>,
    pub talk_name: String,
    pub type_talk: String,
    pub talk_href: String,
    pub talk_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListingManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_page: String,
    pub session_count: usize,
    pub sessions: Vec<SessionListingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    pub filename: String,
    pub talk_code: String,
    pub type_talk: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub page_count: usize,
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionMeta {
    pub talk_date: Option<String>,
    pub talk_name: Option<String>,
    pub type_talk: String,
    pub talk_href: Option<String>,
    pub talk_code: String,
    pub file_name: String,
    pub file_link: String,
}

/// Contents of one `hcj_<talk_code>.json` file.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub project: AgendaDocument,
    pub meta: SessionMeta,
    pub diagnostics: ExtractionDiagnostics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractPaths {
    pub cache_root: String,
    pub pages_dir: String,
    pub output_dir: String,
    pub inventory_manifest_path: String,
    pub listing_manifest_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractCounts {
    pub page_count: usize,
    pub extracted_count: usize,
    pub failed_count: usize,
    pub topic_count: usize,
    pub question_count: usize,
    pub recovered_lost_questions: usize,
    pub missing_lost_questions: usize,
    pub merged_short_titles: usize,
    pub mismatched_documents: usize,
    #[serde(default)]
    pub duplicate_title_documents: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractFailure {
    pub talk_code: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub paths: ExtractPaths,
    pub counts: ExtractCounts,
    pub failures: Vec<ExtractFailure>,
    pub warnings: Vec<String>,
}
