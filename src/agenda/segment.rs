use std::collections::HashSet;

use scraper::ElementRef;
use tracing::debug;

use super::AgendaRules;
use super::normalize::starts_with_digit;

#[derive(Debug, Default)]
pub(super) struct SegmentedTitles {
    pub titles: Vec<String>,
    pub degenerate_discarded: bool,
}

/// Plenary topic before its lines are split into questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RawTopic {
    pub title: String,
    pub lines: Vec<String>,
}

impl AgendaRules {
    /// Titles of a disciplinary page: numbered `p.rtejustify` paragraphs, or
    /// numbered underlined runs when those are absent or degenerate.
    pub(super) fn disciplinary_titles(&self, article: ElementRef<'_>) -> SegmentedTitles {
        let mut candidates = article
            .select(&self.emphasized_paragraph)
            .collect::<Vec<ElementRef<'_>>>();

        let mut degenerate_discarded = false;
        if candidates.len() == 1 && is_lone_nbsp(candidates[0]) {
            debug!("discarding placeholder title paragraph");
            candidates.clear();
            degenerate_discarded = true;
        }

        if candidates.is_empty() {
            candidates = article.select(&self.underlined_in_paragraph).collect();
        }

        let titles = candidates
            .into_iter()
            .filter_map(|candidate| {
                self.disciplinary_title(&candidate.text().collect::<String>())
            })
            .collect();

        SegmentedTitles {
            titles,
            degenerate_discarded,
        }
    }

    fn disciplinary_title(&self, raw: &str) -> Option<String> {
        let normalized = self.normalize(raw);
        if !starts_with_digit(&normalized) {
            return None;
        }

        let title = self
            .disciplinary_title_tail
            .replace(&normalized, "")
            .trim_end()
            .to_string();
        if title.is_empty() { None } else { Some(title) }
    }

    /// Every numbered text run directly inside an underline, normalised.
    pub(super) fn plenary_titles(&self, article: ElementRef<'_>) -> Vec<String> {
        article
            .select(&self.underlined_in_paragraph)
            .flat_map(|underline| underline.children())
            .filter_map(|child| child.value().as_text().map(|text| self.plenary_line(text)))
            .filter(|title| starts_with_digit(title))
            .collect()
    }

    /// Text nodes inside any `<p>` or `<li>` of the article, in document
    /// order, each reduced to one normalised line.
    pub(super) fn plenary_lines(&self, article: ElementRef<'_>) -> Vec<String> {
        let article_id = article.id();
        article
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let inside_block = node
                    .ancestors()
                    .take_while(|ancestor| ancestor.id() != article_id)
                    .filter_map(|ancestor| ancestor.value().as_element())
                    .any(|element| matches!(element.name(), "p" | "li"));
                if !inside_block {
                    return None;
                }
                let line = self.plenary_line(text);
                if line.is_empty() { None } else { Some(line) }
            })
            .collect()
    }
}

/// Groups plenary lines under the most recent title line.
///
/// Lines before the first title are dropped; the last open topic is closed
/// at the end of the stream.
pub(super) fn group_plenary_lines(titles: &[String], lines: Vec<String>) -> Vec<RawTopic> {
    let known_titles = titles.iter().map(String::as_str).collect::<HashSet<&str>>();
    let mut topics = Vec::new();
    let mut current: Option<RawTopic> = None;

    for line in lines {
        if known_titles.contains(line.as_str()) {
            if let Some(topic) = current.take() {
                topics.push(topic);
            }
            current = Some(RawTopic {
                title: line,
                lines: Vec::new(),
            });
            continue;
        }

        if let Some(topic) = current.as_mut() {
            topic.lines.push(line);
        }
    }

    if let Some(topic) = current.take() {
        topics.push(topic);
    }

    topics
}

fn is_lone_nbsp(element: ElementRef<'_>) -> bool {
    element.text().collect::<String>() == "\u{a0}"
}
