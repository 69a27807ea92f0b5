use regex::Regex;
use tracing::debug;

use super::{AgendaError, AgendaRules, Question, SENTINEL_WORD};

impl AgendaRules {
    /// Searches the article prose for the question block that follows the
    /// last title and ends at the first secretary's signature line.
    ///
    /// `Ok(None)` means no such block exists; the topic then keeps an empty
    /// question list.
    pub(super) fn recover_lost_question(
        &self,
        lines: &[String],
        last_title: &str,
    ) -> Result<Option<Question>, AgendaError> {
        let pattern = format!(
            r"(?m)^{}.*\n((?:.+\n)+?){}\b",
            regex::escape(last_title),
            SENTINEL_WORD
        );
        let block_regex = Regex::new(&pattern).map_err(|source| AgendaError::Pattern {
            name: "lost question",
            source,
        })?;

        let full_text = lines.join("\n");
        let Some(block) = block_regex
            .captures(&full_text)
            .and_then(|captures| captures.get(1))
        else {
            debug!(title = %last_title, "no question block before signature line");
            return Ok(None);
        };

        let collapsed = self.normalize(block.as_str());
        let split = self.split_speaker(&collapsed);
        if split.text.is_empty() {
            // Only the annotation survived the split.
            return Ok(Some(Question::unverified(collapsed)));
        }

        Ok(Some(Question::listed(split)))
    }
}
