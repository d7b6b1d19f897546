//! Request-parameter scraping from the public FAQ page.
//!
//! The streaming endpoint requires two opaque values the service embeds in
//! inline script variables on its public pages. They are extracted by
//! pattern match; a missing value is reported as `None`, not an error —
//! the chat call itself fails downstream if a required value was absent.

use regex::Regex;
use reqwest::Client;

use sidechat_core::{Endpoints, Result};

/// Inline variable holding the `at` form value.
const AT_PARAM: &str = "SNlM0e";
/// Inline variable holding the `bl` query value.
const BL_PARAM: &str = "cfb2h";

/// Opaque parameters authorizing the streaming chat call. Scraped once per
/// conversation and reused for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    pub at_value: Option<String>,
    pub bl_value: Option<String>,
}

/// Extract an inline `"<name>":"<value>"` assignment from page markup.
pub fn extract_embedded_value(name: &str, html: &str) -> Option<String> {
    let pattern = format!("\"{}\":\"([^\"]+)\"", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    re.captures(html).map(|caps| caps[1].to_string())
}

/// Fetch the FAQ page and scrape both request parameters.
pub async fn fetch_request_params(client: &Client, endpoints: &Endpoints) -> Result<RequestParams> {
    let html = client.get(&endpoints.faq_url).send().await?.text().await?;
    Ok(RequestParams {
        at_value: extract_embedded_value(AT_PARAM, &html),
        bl_value: extract_embedded_value(BL_PARAM, &html),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<script>window.WIZ_global_data = {"SNlM0e":"AFm_Ab-cd","cfb2h":"boq_assistant_20230321"};</script>"#;

    #[test]
    fn test_extracts_both_values() {
        assert_eq!(
            extract_embedded_value("SNlM0e", PAGE),
            Some("AFm_Ab-cd".into())
        );
        assert_eq!(
            extract_embedded_value("cfb2h", PAGE),
            Some("boq_assistant_20230321".into())
        );
    }

    #[test]
    fn test_missing_value_is_none() {
        let page = r#"{"SNlM0e":"X"}"#;
        assert_eq!(extract_embedded_value("SNlM0e", page), Some("X".into()));
        assert_eq!(extract_embedded_value("cfb2h", page), None);
    }

    #[test]
    fn test_name_is_escaped_literally() {
        // A name containing regex metacharacters must not be interpreted;
        // an unescaped "a.b" would match the earlier "aXb" assignment.
        let page = r#"{"aXb":"v2","a.b":"v1"}"#;
        assert_eq!(extract_embedded_value("a.b", page), Some("v1".into()));
    }
}
