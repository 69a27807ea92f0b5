use super::repair::PlenaryTopic;
use super::{AgendaDocument, AgendaItem, AgendaRules, Question};

/// Zips titles with question groups by position. Whichever side is longer
/// loses its excess; callers report that case separately.
pub(super) fn pair_titles_with_groups(
    titles: Vec<String>,
    groups: Vec<Vec<Question>>,
) -> AgendaDocument {
    AgendaDocument {
        items: titles
            .into_iter()
            .zip(groups)
            .map(|(title, questions)| AgendaItem { title, questions })
            .collect(),
    }
}

impl AgendaRules {
    pub(super) fn assemble_plenary(&self, topics: Vec<PlenaryTopic>) -> AgendaDocument {
        AgendaDocument {
            items: topics
                .into_iter()
                .map(|topic| AgendaItem {
                    title: topic.title,
                    questions: topic
                        .questions
                        .iter()
                        .map(|question| Question::listed(self.split_speaker(question)))
                        .collect(),
                })
                .collect(),
        }
    }
}
