use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::cli::ListingArgs;
use crate::model::{SessionListingEntry, SessionListingManifest};
use crate::session::{SessionClassifier, talk_code};
use crate::util::{now_utc_string, read_html, write_json_pretty};

pub fn run(args: ListingArgs) -> Result<()> {
    let html = read_html(&args.page)?;
    let classifier = SessionClassifier::new()?;
    let sessions = parse_listing(&html, &classifier)?;

    let manifest = SessionListingManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_page: args.page.display().to_string(),
        session_count: sessions.len(),
        sessions,
    };

    let manifest_path = args.manifest_path.unwrap_or_else(|| {
        args.cache_root
            .join("manifests")
            .join("session_listing.json")
    });

    write_json_pretty(&manifest_path, &manifest)?;
    info!(
        path = %manifest_path.display(),
        sessions = manifest.session_count,
        "wrote session listing manifest"
    );

    Ok(())
}

/// Rows of the announcement list that announce a plenary or chamber session.
pub fn parse_listing(
    html: &str,
    classifier: &SessionClassifier,
) -> Result<Vec<SessionListingEntry>> {
    let rows = parse_selector("#block-system-main > div > div > div > div")?;
    let date = parse_selector(".field-content .date-display-single")?;
    let link = parse_selector("span.field-content a")?;

    let document = Html::parse_document(html);
    let mut sessions = Vec::new();

    for row in document.select(&rows) {
        let blocks = row
            .child_elements()
            .filter(|block| block.value().name() == "div")
            .collect::<Vec<ElementRef<'_>>>();

        let talk_date = blocks
            .first()
            .and_then(|block| block.select(&date).next())
            .map(element_text)
            .filter(|value| !value.is_empty());

        let Some(anchor) = blocks.get(1).and_then(|block| block.select(&link).next()) else {
            warn!("listing row without session link");
            continue;
        };

        let talk_name = element_text(anchor);
        let Some(talk_href) = anchor.value().attr("href").map(str::trim) else {
            warn!(talk_name = %talk_name, "listing link without href");
            continue;
        };

        let Some(kind) = classifier.classify(&talk_name) else {
            debug!(talk_name = %talk_name, "skipping unrelated announcement");
            continue;
        };

        let Some(code) = talk_code(kind, talk_href) else {
            warn!(talk_href = %talk_href, "announcement href has no session number");
            continue;
        };

        sessions.push(SessionListingEntry {
            talk_date,
            talk_name,
            type_talk: kind.tag().to_string(),
            talk_href: talk_href.to_string(),
            talk_code: code,
        });
    }

    Ok(sessions)
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|err| anyhow!("invalid selector {selector}: {err}"))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
        <div id="block-system-main"><div><div><div>
          <div>
            <div><div class="field-content"><span class="date-display-single">15.03.2024</span></div></div>
            <div><span class="field-content"><a href="/announces/zasidannya-vrp-42">Засідання Вищої ради правосуддя</a></span></div>
          </div>
          <div>
            <div><div class="field-content"><span class="date-display-single">16.03.2024</span></div></div>
            <div><span class="field-content"><a href="/announces/dp-7">Засідання Першої Дисциплінарної палати Вищої ради правосуддя</a></span></div>
          </div>
          <div>
            <div><div class="field-content"><span class="date-display-single">17.03.2024</span></div></div>
            <div><span class="field-content"><a href="/announces/narada-3">Нарада з питань бюджету</a></span></div>
          </div>
          <div>
            <div><div class="field-content"></div></div>
          </div>
        </div></div></div></div>
        </body></html>
    "#;

    #[test]
    fn parse_listing_keeps_classified_sessions() {
        let classifier = SessionClassifier::new().expect("classifier should compile");
        let sessions = parse_listing(LISTING, &classifier).expect("listing should parse");

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].talk_code, "vrp_0042");
        assert_eq!(sessions[0].type_talk, "vrp");
        assert_eq!(sessions[0].talk_date.as_deref(), Some("15.03.2024"));
        assert_eq!(sessions[1].talk_code, "dp1_0007");
        assert_eq!(
            sessions[1].talk_name,
            "Засідання Першої Дисциплінарної палати Вищої ради правосуддя"
        );
    }
}
