//! Session agenda extraction.
//!
//! Turns the content article of a saved session page into an ordered list of
//! topics with their discussion questions. Two markup dialects are handled:
//! disciplinary-chamber pages (emphasised titles, questions in `<ol>` lists)
//! and plenary pages (underlined titles, questions as loose paragraph lines).

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

mod assemble;
mod document;
mod error;
mod harvest;
mod normalize;
mod recover;
mod repair;
mod segment;
mod speaker;
mod types;

pub use error::AgendaError;
pub use types::{
    AgendaDocument, AgendaExtraction, AgendaItem, Dialect, ExtractionDiagnostics,
    LostQuestionOutcome, Question, SegmentationMismatch,
};

use assemble::*;
use repair::*;
use segment::*;

/// Canonical form of the "speaker" keyword that introduces a reporter name.
const SPEAKER_KEYWORD: &str = "Доповідач";

/// Closing-signature line that bounds the lost-question search.
const SENTINEL_WORD: &str = "Секретар";

/// Compiled patterns and selectors shared by every extraction call.
///
/// Holds no per-document state; one instance can process any number of
/// documents in sequence.
#[derive(Debug)]
pub struct AgendaRules {
    whitespace: Regex,
    paren_spacing: Regex,
    space_before_period: Regex,
    split_keyword_gate: Regex,
    split_keyword: Regex,
    speaker_annotation: Regex,
    disciplinary_title_tail: Regex,
    plenary_line_tail: Regex,
    question_tail: Regex,
    question_marker: Regex,
    content_node: Selector,
    attachment_link: Selector,
    emphasized_paragraph: Selector,
    underlined_in_paragraph: Selector,
    ordered_list: Selector,
    paragraph: Selector,
}

impl AgendaRules {
    pub fn new() -> Result<Self, AgendaError> {
        Ok(Self {
            whitespace: compile("whitespace", r"\s+")?,
            paren_spacing: compile("parenthesis spacing", r"\(\s*(.+?)\s*\)")?,
            space_before_period: compile("space before period", r" \.")?,
            split_keyword_gate: compile("split speaker keyword gate", r"(?i)Д\s+оповідач")?,
            split_keyword: compile("split speaker keyword", r"Д\s+оповідач")?,
            speaker_annotation: compile(
                "speaker annotation",
                r"(?i)\(Доповідач(?:\s*[-–—])?\s*(.+?)\)",
            )?,
            disciplinary_title_tail: compile("disciplinary title tail", r"[:.,]$")?,
            plenary_line_tail: compile("plenary line tail", r"[\s:.]$")?,
            question_tail: compile("question tail", r"[:.,;\s]$")?,
            question_marker: compile("question marker", r"\d+\) ")?,
            content_node: select("content node", r#"[id^="node-"]"#)?,
            attachment_link: select(
                "attachment link",
                r#"article[id^="node-"] > div:nth-of-type(2) a"#,
            )?,
            emphasized_paragraph: select("emphasised paragraph", "p.rtejustify")?,
            underlined_in_paragraph: select("underlined text", "p u")?,
            ordered_list: select("ordered list", "ol")?,
            paragraph: select("paragraph", "p")?,
        })
    }

    /// Extracts the agenda of one parsed session page.
    pub fn extract(
        &self,
        document: &Html,
        dialect: Dialect,
    ) -> Result<AgendaExtraction, AgendaError> {
        let article = self.content_node(document)?;
        let mut extraction = match dialect {
            Dialect::Disciplinary => self.extract_disciplinary(article)?,
            Dialect::Plenary => self.extract_plenary(article),
        };

        let duplicates = extraction.agenda.duplicate_titles();
        if !duplicates.is_empty() {
            warn!(
                titles = ?duplicates,
                "repeated topic titles; only the last one survives in the title map"
            );
        }
        extraction.diagnostics.duplicate_titles = duplicates;
        Ok(extraction)
    }

    fn extract_disciplinary(
        &self,
        article: ElementRef<'_>,
    ) -> Result<AgendaExtraction, AgendaError> {
        let segmented = self.disciplinary_titles(article);
        let mut groups = self.harvest_list_groups(article);

        let mut diagnostics = ExtractionDiagnostics::new(Dialect::Disciplinary);
        diagnostics.title_count = segmented.titles.len();
        diagnostics.group_count = groups.len();
        diagnostics.degenerate_titles_discarded = segmented.degenerate_discarded;

        if segmented.titles.len() == groups.len() + 1 {
            if let Some(last_title) = segmented.titles.last() {
                debug!(title = %last_title, "recovering question outside list markup");
                let lines = self.paragraph_lines(article);
                match self.recover_lost_question(&lines, last_title)? {
                    Some(question) => {
                        groups.push(vec![question]);
                        diagnostics.lost_question = Some(LostQuestionOutcome::Recovered);
                    }
                    None => {
                        groups.push(Vec::new());
                        diagnostics.lost_question = Some(LostQuestionOutcome::NotFound);
                    }
                }
            }
        } else if segmented.titles.len() != groups.len() {
            warn!(
                titles = segmented.titles.len(),
                groups = groups.len(),
                "title and question-group counts disagree; pairing positionally"
            );
            diagnostics.mismatch = Some(SegmentationMismatch {
                titles: segmented.titles.len(),
                groups: groups.len(),
            });
        }

        let agenda = pair_titles_with_groups(segmented.titles, groups);
        Ok(AgendaExtraction {
            agenda,
            diagnostics,
        })
    }

    fn extract_plenary(&self, article: ElementRef<'_>) -> AgendaExtraction {
        let titles = self.plenary_titles(article);
        let lines = self.plenary_lines(article);
        let raw_topics = group_plenary_lines(&titles, lines);

        let mut diagnostics = ExtractionDiagnostics::new(Dialect::Plenary);
        diagnostics.title_count = titles.len();
        diagnostics.group_count = raw_topics.len();

        let mut topics = raw_topics
            .into_iter()
            .map(|topic| self.split_plenary_topic(topic))
            .collect::<Vec<_>>();
        diagnostics.merged_titles = merge_short_titles(&mut topics);

        let agenda = self.assemble_plenary(topics);
        AgendaExtraction {
            agenda,
            diagnostics,
        }
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, AgendaError> {
    Regex::new(pattern).map_err(|source| AgendaError::Pattern { name, source })
}

fn select(name: &'static str, selector: &str) -> Result<Selector, AgendaError> {
    Selector::parse(selector).map_err(|err| AgendaError::Selector {
        name,
        reason: err.to_string(),
    })
}
