use super::AgendaRules;

/// Question text with its optional speaker annotation split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerSplit {
    pub text: String,
    pub speaker: Option<String>,
}

impl AgendaRules {
    /// Splits `(Доповідач – Name)` out of a normalised line.
    ///
    /// The keyword match is case-insensitive and the dash after it may be a
    /// hyphen, en dash, em dash or missing. Text on both sides of the
    /// annotation is kept; trailing semicolons are trimmed.
    pub fn split_speaker(&self, line: &str) -> SpeakerSplit {
        let Some(captures) = self.speaker_annotation.captures(line) else {
            return SpeakerSplit {
                text: trim_question_piece(line).to_string(),
                speaker: None,
            };
        };

        let Some(annotation) = captures.get(0) else {
            return SpeakerSplit {
                text: trim_question_piece(line).to_string(),
                speaker: None,
            };
        };

        let speaker = captures
            .get(1)
            .map(|name| name.as_str().trim().to_string())
            .filter(|name| !name.is_empty());

        let before = trim_question_piece(&line[..annotation.start()]);
        let after = trim_question_piece(&line[annotation.end()..]);
        let text = match (before.is_empty(), after.is_empty()) {
            (false, false) => format!("{before} {after}"),
            (false, true) => before.to_string(),
            (true, false) => after.to_string(),
            (true, true) => String::new(),
        };

        SpeakerSplit { text, speaker }
    }
}

fn trim_question_piece(piece: &str) -> &str {
    piece.trim().trim_end_matches(';').trim_end()
}
