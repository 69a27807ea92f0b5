use std::collections::HashSet;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::speaker::SpeakerSplit;

/// Markup convention of a session page.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Disciplinary-chamber sessions: emphasised titles, questions in `<ol>`.
    Disciplinary,
    /// Plenary council sessions: underlined titles, questions as loose lines.
    Plenary,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disciplinary => "disciplinary",
            Self::Plenary => "plenary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub speaker: Option<String>,
    pub error: bool,
}

impl Question {
    /// A question whose speaker annotation was split off by the extractor.
    pub fn listed(split: SpeakerSplit) -> Self {
        Self {
            text: split.text,
            speaker: split.speaker,
            error: false,
        }
    }

    /// Raw block kept verbatim because the speaker split left no question text.
    pub fn unverified(text: String) -> Self {
        Self {
            text,
            speaker: None,
            error: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaItem {
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgendaDocument {
    pub items: Vec<AgendaItem>,
}

impl AgendaDocument {
    pub fn question_count(&self) -> usize {
        self.items.iter().map(|item| item.questions.len()).sum()
    }

    /// Titles that occur more than once, in first-repeat order. Their
    /// entries collide as keys of the serialised title map.
    pub fn duplicate_titles(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for item in &self.items {
            if !seen.insert(item.title.as_str()) && !duplicates.contains(&item.title) {
                duplicates.push(item.title.clone());
            }
        }
        duplicates
    }
}

/// Serialised as an ordered object mapping each title to its questions.
impl Serialize for AgendaDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for item in &self.items {
            map.serialize_entry(&item.title, &item.questions)?;
        }
        map.end()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LostQuestionOutcome {
    Recovered,
    NotFound,
}

/// Title and list-group counts that could not be reconciled.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SegmentationMismatch {
    pub titles: usize,
    pub groups: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionDiagnostics {
    pub dialect: Dialect,
    pub title_count: usize,
    pub group_count: usize,
    pub degenerate_titles_discarded: bool,
    pub lost_question: Option<LostQuestionOutcome>,
    pub mismatch: Option<SegmentationMismatch>,
    pub merged_titles: usize,
    pub duplicate_titles: Vec<String>,
}

impl ExtractionDiagnostics {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            title_count: 0,
            group_count: 0,
            degenerate_titles_discarded: false,
            lost_question: None,
            mismatch: None,
            merged_titles: 0,
            duplicate_titles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgendaExtraction {
    pub agenda: AgendaDocument,
    pub diagnostics: ExtractionDiagnostics,
}
