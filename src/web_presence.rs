use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::domain::Candidate;

/// Checks the public profile page for the "contact right away" banner, which
/// only renders for accounts that exist and can be messaged.
#[derive(Clone)]
pub struct WebPresenceFetcher {
    http: Client,
    origin: String,
}

impl WebPresenceFetcher {
    pub fn new(http: Client, origin: impl Into<String>) -> Self {
        Self {
            http,
            origin: origin.into(),
        }
    }

    /// `false` on any failure: absence of confirmation is not confirmation.
    pub async fn is_contactable(&self, candidate: &Candidate) -> bool {
        let url = format!("{}/{}", self.origin, candidate.as_str());
        let body = match self.fetch(&url).await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(target: "probe", url = %url, error = %err, "profile fetch failed");
                return false;
            }
        };
        page_has_contact_marker(&body, candidate)
    }

    async fn fetch(&self, url: &str) -> reqwest::Result<String> {
        self.http.get(url).send().await?.text().await
    }
}

static OG_DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:description"]"#).expect("valid selector")
});

/// Looks for `You can contact @<name> right away.` in the document text and in
/// the `og:description` meta content. Live profile pages carry the capitalised
/// sentence only in the meta tag; the visible banner reads "...you can contact".
fn page_has_contact_marker(body: &str, candidate: &Candidate) -> bool {
    let marker = format!("You can contact @{} right away.", candidate.as_str());
    let document = Html::parse_document(body);

    let in_meta = document
        .select(&OG_DESCRIPTION)
        .filter_map(|meta| meta.value().attr("content"))
        .any(|content| content.contains(&marker));
    in_meta || document.root_element().text().collect::<String>().contains(&marker)
}
