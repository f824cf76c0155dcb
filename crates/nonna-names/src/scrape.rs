//! List page scraping
//!
//! Every captioned table on the page contributes one [`RawEntry`] per body row,
//! skipping the header row. The entry text is the row's first header cell and
//! the url is its first link.

use crate::error::ScrapeError;
use crate::types::RawEntry;
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e:?}")))
}

fn enclosing_table(caption: ElementRef<'_>) -> Option<ElementRef<'_>> {
    caption
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

/// Extract raw rows from a list page
///
/// Rows without a header cell are skipped; rows without a link get an empty url.
///
/// # Errors
/// Only fails on an invalid selector, which would be a programming error.
pub fn parse_entries(html: &str) -> Result<Vec<RawEntry>, ScrapeError> {
    let document = Html::parse_document(html);
    let caption_sel = selector("caption")?;
    let tbody_sel = selector("tbody")?;
    let tr_sel = selector("tr")?;
    let th_sel = selector("th")?;
    let a_sel = selector("a")?;

    let mut entries = Vec::new();
    for caption in document.select(&caption_sel) {
        let Some(table) = enclosing_table(caption) else {
            continue;
        };
        let Some(body) = table.select(&tbody_sel).next() else {
            continue;
        };

        for row in body.select(&tr_sel).skip(1) {
            let Some(header) = row.select(&th_sel).next() else {
                continue;
            };
            let url = row
                .select(&a_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .unwrap_or_default();
            entries.push(RawEntry::new(header.text().collect::<String>(), url));
        }
    }

    tracing::debug!(count = entries.len(), "parsed list page");
    Ok(entries)
}

/// Fetch a list page and extract its rows
///
/// # Errors
/// - `ScrapeError::Request` on transport failure
/// - `ScrapeError::Status` on a non-success response
pub async fn fetch_entries(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<RawEntry>, ScrapeError> {
    tracing::info!(%url, "fetching list page");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    parse_entries(&body)
}
