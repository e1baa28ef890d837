//! ContentService — read-only proxy for the headless CMS
//!
//! Page copy/layout configuration (titles, labels, gradients) lives in an
//! external content-management service. The proxy fetches entries per page
//! slug and falls back to built-in defaults on any error, so pages always
//! render even when the CMS is down or unconfigured.

use reqwest::Client;
use shared::pages::PageContent;

/// HTTP client for the headless CMS
#[derive(Clone, Debug)]
pub struct ContentService {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl ContentService {
    /// Create a new ContentService
    ///
    /// `base_url` unset means the CMS is not configured; every lookup then
    /// serves the built-in defaults.
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Fetch page content by slug, falling back to defaults on any failure
    pub async fn get_page(&self, slug: &str) -> PageContent {
        let Some(base_url) = &self.base_url else {
            return default_page(slug);
        };

        let url = format!("{}/pages/{}", base_url.trim_end_matches('/'), slug);
        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("api_key", key);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<PageContent>().await {
                    Ok(page) => page,
                    Err(e) => {
                        tracing::warn!(target: "cms", slug, error = %e, "CMS entry parse failed");
                        default_page(slug)
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(target: "cms", slug, status = %response.status(), "CMS fetch failed");
                default_page(slug)
            }
            Err(e) => {
                tracing::warn!(target: "cms", slug, error = %e, "CMS unreachable");
                default_page(slug)
            }
        }
    }
}

/// Built-in page defaults (served when the CMS is unreachable)
pub fn default_page(slug: &str) -> PageContent {
    let (title, subtitle, gradient) = match slug {
        "home" => (
            "FarmCom",
            "Fresh from the farm, straight to you",
            "from-green-600 to-lime-500",
        ),
        "cart" => ("Your Cart", "Review your basket", "from-amber-500 to-orange-500"),
        "orders" => ("Your Orders", "Track your purchases", "from-sky-600 to-cyan-500"),
        "seller" => (
            "Seller Dashboard",
            "Manage your listings and orders",
            "from-emerald-600 to-teal-500",
        ),
        _ => ("FarmCom", "", "from-green-600 to-lime-500"),
    };

    PageContent {
        slug: slug.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        labels: serde_json::json!({
            "cartLabel": "Cart",
            "checkoutLabel": "Checkout",
            "addToCartLabel": "Add to cart",
        }),
        gradient: gradient.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_service_serves_defaults() {
        let service = ContentService::new(None, None);
        let page = service.get_page("home").await;
        assert_eq!(page.slug, "home");
        assert_eq!(page.title, "FarmCom");
        assert!(!page.gradient.is_empty());
    }

    #[test]
    fn unknown_slug_still_renders() {
        let page = default_page("no-such-page");
        assert_eq!(page.slug, "no-such-page");
        assert_eq!(page.title, "FarmCom");
    }
}
