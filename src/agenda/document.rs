use scraper::{ElementRef, Html};
use serde::Serialize;

use super::{AgendaError, AgendaRules};

/// Downloadable agenda file linked from the session page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub file_name: String,
    pub file_link: String,
}

impl AgendaRules {
    /// The `node-*` element holding the session body.
    pub(super) fn content_node<'a>(
        &self,
        document: &'a Html,
    ) -> Result<ElementRef<'a>, AgendaError> {
        document
            .select(&self.content_node)
            .next()
            .ok_or(AgendaError::MissingStructure {
                what: "content node",
            })
    }

    /// First link inside the second block of the content article.
    pub fn attachment(&self, document: &Html) -> Result<Attachment, AgendaError> {
        let link = document
            .select(&self.attachment_link)
            .next()
            .ok_or(AgendaError::MissingStructure {
                what: "attachment link",
            })?;

        let file_link = link
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or(AgendaError::MissingStructure {
                what: "attachment href",
            })?;

        Ok(Attachment {
            file_name: self.normalize(&link.text().collect::<String>()),
            file_link: file_link.to_string(),
        })
    }

    /// Every non-empty text node inside a paragraph, normalised, in document
    /// order.
    pub(super) fn paragraph_lines(&self, article: ElementRef<'_>) -> Vec<String> {
        article
            .select(&self.paragraph)
            .filter(|paragraph| !has_paragraph_ancestor(*paragraph, article))
            .flat_map(|paragraph| paragraph.text())
            .map(|text| self.normalize(text))
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// Nested paragraphs are already covered by their outermost paragraph.
fn has_paragraph_ancestor(element: ElementRef<'_>, article: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .take_while(|ancestor| ancestor.id() != article.id())
        .filter_map(|ancestor| ancestor.value().as_element())
        .any(|ancestor| ancestor.name() == "p")
}
