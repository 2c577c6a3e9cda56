// What's New: one row per release-notes article

use super::{ReportTable, TableRow};
use crate::config::Config;
use crate::error::Result;
use crate::html::{self, Attrs};
use crate::net::{get_response, Session};
use crate::progress;
use scraper::Html;
use serde::Serialize;

/// Article link, its title and the editor/author line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhatsNewRow {
    pub link: String,
    pub title: String,
    pub editor: String,
}

impl TableRow for WhatsNewRow {
    const HEADER: &'static [&'static str] = &["Article link", "Title", "Editor, Author"];

    fn cells(&self) -> Vec<String> {
        vec![self.link.clone(), self.title.clone(), self.editor.clone()]
    }
}

pub fn whats_new(session: &dyn Session, config: &Config) -> Result<Option<ReportTable<WhatsNewRow>>> {
    let whats_new_url = config.site.main_url()?.join("whatsnew/")?;
    let Some(body) = get_response(session, whats_new_url.as_str()) else {
        return Ok(None);
    };

    // Resolve links first so the listing document is dropped before the walk
    let links = {
        let doc = Html::parse_document(&body);
        let main_section = html::find_tag(
            doc.root_element(),
            "section",
            &Attrs::id("what-s-new-in-python"),
        )?;
        let toctree = html::find_tag(
            main_section,
            "div",
            &Attrs::class("toctree-wrapper compound"),
        )?;

        let mut links = Vec::new();
        for item in html::find_all(toctree, "li", &Attrs::class("toctree-l1")) {
            let anchor = html::find_tag(item, "a", &Attrs::new())?;
            links.push(whats_new_url.join(html::attr(anchor, "href")?)?);
        }
        links
    };

    let pb = progress::bar(links.len(), "whats-new");
    let mut rows = Vec::with_capacity(links.len());
    for link in links {
        pb.inc(1);
        let Some(body) = get_response(session, link.as_str()) else {
            continue;
        };
        let doc = Html::parse_document(&body);
        let h1 = html::find_tag(doc.root_element(), "h1", &Attrs::new())?;
        let dl = html::find_tag(doc.root_element(), "dl", &Attrs::new())?;

        rows.push(WhatsNewRow {
            link: link.to_string(),
            title: html::text(h1),
            editor: html::text(dl).replace('\n', " "),
        });
    }
    pb.finish_and_clear();

    tracing::info!(articles = rows.len(), "What's New collected");
    Ok(Some(ReportTable::new(rows)))
}
