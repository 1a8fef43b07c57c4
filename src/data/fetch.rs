//! Page fetching against Naver Finance's daily-quote pages.
//!
//! The rest of the pipeline only sees the `PageFetcher` capability, so tests
//! drive collection with in-memory fakes and the collector never knows it is
//! talking to a browser-facing website.

use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::error::{AppError, ErrorCode};

/// The cell texts of one `<tr>`, in document order. Transient: rows live only
/// long enough to be parsed.
pub type RawRow = Vec<String>;

/// Capability interface for fetching one page of raw rows.
///
/// Takes `&mut self` because the real implementation is one exclusive,
/// stateful browsing session: only one navigation may be in flight at a time.
pub trait PageFetcher {
    fn fetch_page(&mut self, code: &str, page: u32) -> Result<Vec<RawRow>, AppError>;
}

const DEFAULT_BASE_URL: &str = "https://finance.naver.com";
const QUOTE_PATH: &str = "/item/sise_day.naver";

/// The source serves a trimmed page to clients without a browser user agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0 Safari/537.36";

/// One HTTP session against the quote pages.
///
/// Created once before any collection begins and dropped once after the last
/// instrument's last page; ownership of the session by the pipeline scope is
/// what guarantees release on every exit path.
pub struct NaverSession {
    client: Client,
    base_url: String,
    row_selector: Selector,
    cell_selector: Selector,
}

impl NaverSession {
    /// Build a session, honoring a `SISE_BASE_URL` override from the
    /// environment (`.env` supported) so tests and mirrors can redirect it.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url =
            std::env::var("SISE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(|e| {
                AppError::new(ErrorCode::Transport, format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url,
            row_selector: parse_selector("table.type2 tr")?,
            cell_selector: parse_selector("td")?,
        })
    }

    fn page_url(&self, code: &str, page: u32) -> String {
        format!("{}{QUOTE_PATH}?code={code}&page={page}", self.base_url)
    }
}

impl PageFetcher for NaverSession {
    fn fetch_page(&mut self, code: &str, page: u32) -> Result<Vec<RawRow>, AppError> {
        let url = self.page_url(code, page);

        let resp = self.client.get(&url).send().map_err(|e| {
            AppError::new(
                ErrorCode::Transport,
                format!("Fetch failed for instrument {code}, page {page}: {e}"),
            )
        })?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                ErrorCode::Transport,
                format!(
                    "Fetch failed for instrument {code}, page {page}: HTTP {}.",
                    resp.status()
                ),
            ));
        }

        let body = resp.text().map_err(|e| {
            AppError::new(
                ErrorCode::Transport,
                format!("Failed to read page body for instrument {code}, page {page}: {e}"),
            )
        })?;

        Ok(extract_rows(&body, &self.row_selector, &self.cell_selector))
    }
}

/// Pull every table row's cell texts out of a quote page.
///
/// Short/separator rows are included as-is; deciding whether a row is data is
/// the parser's job, not the transport's.
fn extract_rows(body: &str, row_selector: &Selector, cell_selector: &Selector) -> Vec<RawRow> {
    let document = Html::parse_document(body);
    document
        .select(row_selector)
        .map(|tr| {
            tr.select(cell_selector)
                .map(|td| td.text().collect::<String>())
                .collect()
        })
        .collect()
}

fn parse_selector(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css)
        .map_err(|e| AppError::new(ErrorCode::Transport, format!("Invalid selector '{css}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="type2">
          <tr><td colspan="7">header</td></tr>
          <tr>
            <td><span>2025.07.28</span></td><td><span>70,500</span></td>
            <td>100</td><td>71,000</td><td>71,200</td><td>70,100</td><td>1,234,567</td>
          </tr>
          <tr><td></td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn extract_rows_keeps_cell_text_and_short_rows() {
        let rows = extract_rows(
            PAGE,
            &parse_selector("table.type2 tr").unwrap(),
            &parse_selector("td").unwrap(),
        );

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 7);
        assert_eq!(rows[1][0].trim(), "2025.07.28");
        assert_eq!(rows[1][1].trim(), "70,500");
        assert_eq!(rows[2].len(), 1);
    }
}
