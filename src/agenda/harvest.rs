use scraper::ElementRef;

use super::{AgendaRules, Question};

impl AgendaRules {
    /// One question group per `<ol>` in the article, in document order.
    pub(super) fn harvest_list_groups(&self, article: ElementRef<'_>) -> Vec<Vec<Question>> {
        article
            .select(&self.ordered_list)
            .map(|list| self.harvest_list(list))
            .collect()
    }

    fn harvest_list(&self, list: ElementRef<'_>) -> Vec<Question> {
        list.child_elements()
            .filter(|item| item.value().name() == "li")
            .filter_map(|item| {
                let joined = item.text().collect::<Vec<&str>>().join(" ");
                let line = self.normalize(&joined);
                if line.is_empty() {
                    return None;
                }
                Some(Question::listed(self.split_speaker(&line)))
            })
            .collect()
    }
}
