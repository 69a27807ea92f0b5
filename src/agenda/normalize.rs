use super::{AgendaRules, SPEAKER_KEYWORD};

impl AgendaRules {
    /// Collapses whitespace (non-breaking spaces included), tightens
    /// parentheses, drops the space before a period and joins the split
    /// speaker keyword. Applying it twice gives the same result.
    pub fn normalize(&self, raw: &str) -> String {
        let collapsed = self.whitespace.replace_all(raw, " ");
        let parenthesised = self.paren_spacing.replace_all(collapsed.trim(), "(${1})");
        let text = self
            .space_before_period
            .replace_all(&parenthesised, ".")
            .into_owned();

        if !self.split_keyword_gate.is_match(&text) {
            return text;
        }

        self.split_keyword
            .replace_all(&text, SPEAKER_KEYWORD)
            .into_owned()
    }

    /// Normalises a plenary text node and strips one trailing `:`, `.` or
    /// whitespace character.
    pub(super) fn plenary_line(&self, raw: &str) -> String {
        let normalized = self.normalize(raw);
        self.plenary_line_tail
            .replace(&normalized, "")
            .trim()
            .to_string()
    }
}

pub(super) fn starts_with_digit(value: &str) -> bool {
    value
        .chars()
        .next()
        .map(|ch| ch.is_ascii_digit())
        .unwrap_or(false)
}
