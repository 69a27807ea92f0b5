use anyhow::{Context, Result};
use regex::Regex;

use crate::agenda::Dialect;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Chamber {
    First,
    Second,
    Third,
}

/// Kind of session announced on the listing page.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum SessionKind {
    Plenary,
    Disciplinary(Chamber),
}

impl SessionKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Plenary => "vrp",
            Self::Disciplinary(Chamber::First) => "dp1",
            Self::Disciplinary(Chamber::Second) => "dp2",
            Self::Disciplinary(Chamber::Third) => "dp3",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "vrp" => Some(Self::Plenary),
            "dp1" => Some(Self::Disciplinary(Chamber::First)),
            "dp2" => Some(Self::Disciplinary(Chamber::Second)),
            "dp3" => Some(Self::Disciplinary(Chamber::Third)),
            _ => None,
        }
    }

    pub fn dialect(self) -> Dialect {
        match self {
            Self::Plenary => Dialect::Plenary,
            Self::Disciplinary(_) => Dialect::Disciplinary,
        }
    }
}

#[derive(Debug)]
pub struct SessionClassifier {
    talk_name: Regex,
}

impl SessionClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            talk_name: Regex::new(
                r"^Засідання (?:(?P<chamber>Першої|Другої|Третьої) Дисциплінарної палати )?Вищої ради правосуддя$",
            )
            .context("failed to compile session title regex")?,
        })
    }

    /// Plenary when the title names no chamber; `None` for any other kind of
    /// announcement.
    pub fn classify(&self, talk_name: &str) -> Option<SessionKind> {
        let captures = self.talk_name.captures(talk_name.trim())?;
        let Some(chamber) = captures.name("chamber") else {
            return Some(SessionKind::Plenary);
        };

        let chamber = match chamber.as_str().to_lowercase().as_str() {
            "першої" => Chamber::First,
            "другої" => Chamber::Second,
            "третьої" => Chamber::Third,
            _ => return None,
        };
        Some(SessionKind::Disciplinary(chamber))
    }
}

/// `vrp_0042` from the kind and an announcement href ending in `-42`.
pub fn talk_code(kind: SessionKind, talk_href: &str) -> Option<String> {
    let number = talk_href.trim_end_matches('/').rsplit('-').next()?;
    if number.is_empty() || !number.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    Some(format!("{}_{:0>4}", kind.tag(), number))
}

pub fn parse_talk_code(code: &str) -> Option<(SessionKind, u32)> {
    let (tag, number) = code.split_once('_')?;
    let kind = SessionKind::from_tag(tag)?;
    if number.len() < 4 || !number.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    Some((kind, number.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_distinguishes_plenary_and_chambers() {
        let classifier = SessionClassifier::new().expect("classifier should compile");
        assert_eq!(
            classifier.classify("Засідання Вищої ради правосуддя"),
            Some(SessionKind::Plenary)
        );
        assert_eq!(
            classifier.classify("Засідання Другої Дисциплінарної палати Вищої ради правосуддя"),
            Some(SessionKind::Disciplinary(Chamber::Second))
        );
        assert_eq!(classifier.classify("Нарада голів судів"), None);
    }

    #[test]
    fn talk_code_pads_session_number() {
        assert_eq!(
            talk_code(SessionKind::Plenary, "/announces/zasidannya-vrp-42"),
            Some("vrp_0042".to_string())
        );
        assert_eq!(
            talk_code(
                SessionKind::Disciplinary(Chamber::Third),
                "/announces/dp-12345"
            ),
            Some("dp3_12345".to_string())
        );
        assert_eq!(talk_code(SessionKind::Plenary, "/announces/zasidannya"), None);
    }

    #[test]
    fn parse_talk_code_reads_saved_page_stems() {
        assert_eq!(
            parse_talk_code("dp1_0007"),
            Some((SessionKind::Disciplinary(Chamber::First), 7))
        );
        assert_eq!(parse_talk_code("vrp_12"), None);
        assert_eq!(parse_talk_code("xyz_0001"), None);
        assert_eq!(SessionKind::Plenary.dialect(), Dialect::Plenary);
    }
}
