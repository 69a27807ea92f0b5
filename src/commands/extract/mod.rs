use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use scraper::Html;
use tracing::{info, warn};

use crate::agenda::{AgendaError, AgendaRules, LostQuestionOutcome};
use crate::cli::ExtractArgs;
use crate::commands::inventory;
use crate::model::{
    ExtractCounts, ExtractFailure, ExtractPaths, ExtractRunManifest, PageEntry,
    PageInventoryManifest, SessionListingEntry, SessionListingManifest, SessionMeta,
    SessionRecord,
};
use crate::session::SessionKind;
use crate::util::{
    ensure_directory, now_utc_string, read_html, read_json, utc_compact_string, write_json_pretty,
};

mod pages;
mod run;
#[cfg(test)]
mod tests;

pub use run::run;

use pages::*;
