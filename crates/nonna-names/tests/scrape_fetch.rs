//! Scraper against a mock list page.

use nonna_names::{fetch_entries, normalize_entries, ScrapeError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<html><body>
<table><caption>Ribbon</caption><tbody>
<tr><th>Type</th></tr>
<tr><th><a href="./Busiate">Busiate (or busiati)</a></th></tr>
<tr><th><a href="./Scialatielli">Scialatelli or scialatielli</a></th></tr>
</tbody></table>
</body></html>"#;

#[tokio::test]
async fn fetches_and_normalizes_list_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/html/List_of_pasta"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/page/html/List_of_pasta", server.uri());
    let entries = fetch_entries(&client, &url).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].url, "./Busiate");

    let names: Vec<String> = normalize_entries(&entries)
        .into_iter()
        .map(|n| n.into_inner())
        .collect();
    assert_eq!(
        names,
        vec!["Busiate", "busiati", "busiati", "Scialatelli", "scialatielli"]
    );
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let err = fetch_entries(&client, &server.uri()).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 500, .. }));
}
