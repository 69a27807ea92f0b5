use tracing::debug;

use super::AgendaRules;
use super::segment::RawTopic;

/// Titles this short are the head of a title that the underline markup cut
/// in two; the rest of it is the first question line.
const SHORT_TITLE_MAX_CHARS: usize = 7;

/// Clause appended to resignation items that is not part of the question.
const RESIGNATION_NOISE: &str = "- у зв’язку з поданням заяви про відставку";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PlenaryTopic {
    pub title: String,
    pub questions: Vec<String>,
}

impl AgendaRules {
    /// Rejoins a topic's lines and re-splits them on `N) ` markers.
    pub(super) fn split_plenary_topic(&self, topic: RawTopic) -> PlenaryTopic {
        if topic.lines.is_empty() {
            return PlenaryTopic {
                title: topic.title,
                questions: Vec::new(),
            };
        }

        let joined = topic
            .lines
            .iter()
            .map(|line| {
                if line.chars().all(|ch| ch.is_ascii_digit()) {
                    format!("{line})")
                } else {
                    line.clone()
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
            .replace(RESIGNATION_NOISE, "");

        let questions = self
            .question_marker
            .split(&joined)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| self.question_tail.replace(piece, "").trim().to_string())
            .filter(|question| !question.is_empty())
            .collect();

        PlenaryTopic {
            title: topic.title,
            questions,
        }
    }
}

/// Moves the first question into every short title that has one. Returns the
/// number of titles repaired.
pub(super) fn merge_short_titles(topics: &mut [PlenaryTopic]) -> usize {
    let mut merged = 0usize;

    for topic in topics.iter_mut() {
        if topic.title.chars().count() > SHORT_TITLE_MAX_CHARS || topic.questions.is_empty() {
            continue;
        }

        let first_question = topic.questions.remove(0);
        debug!(title = %topic.title, "merging short title with first question");
        topic.title = format!("{} {}", topic.title, first_question);
        merged += 1;
    }

    merged
}
