//! HTTP client for the content API
//!
//! Every public query recovers locally: a transport failure or non-2xx
//! response is logged and surfaced as an empty result (or `None` for
//! single-post lookups), never as an error crossing the client boundary.
//! Only published content is ever requested (`is_public=true` on every
//! query).

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use thiserror::Error;

use crate::cms::cache::ResponseCache;
use crate::cms::mapper::map_posts;
use crate::cms::wire::WireResponse;
use crate::config::CmsConfig;
use crate::content::Post;

/// One page of posts plus the collection totals reported by the CMS
#[derive(Debug, Clone, Default)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    /// Total pages at the requested page size
    pub pages: usize,
    /// Total matching posts
    pub total: usize,
}

/// Internal failure modes; never escape the client's public surface
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the headless content API
pub struct CmsClient {
    http: reqwest::Client,
    config: CmsConfig,
    cache: ResponseCache,
}

impl CmsClient {
    /// Create a client from explicit connection settings
    pub fn new(config: CmsConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .unwrap_or_default();
        let cache = ResponseCache::new(config.cache_ttl_seconds);
        Self {
            http,
            config,
            cache,
        }
    }

    /// All public posts, newest first, one page at a time
    pub async fn posts(&self, page: usize, count: usize) -> PostsPage {
        let endpoint = format!(
            "/posts?filters[is_public][$eq]=true&pagination[page]={}&pagination[pageSize]={}&sort[1]=createdAt%3Adesc&populate=*",
            page, count
        );
        self.fetch_page(&endpoint).await
    }

    /// Posts flagged for prominent placement
    pub async fn sticky_posts(&self) -> Vec<Post> {
        let endpoint = "/posts?filters[is_public][$eq]=true&filters[type][$eq]=featured&pagination[pageSize]=6&sort[1]=createdAt%3Adesc&populate=*";
        self.fetch_page(endpoint).await.posts
    }

    /// The most recent posts
    pub async fn recent_posts(&self, count: usize) -> Vec<Post> {
        let endpoint = format!(
            "/posts?filters[is_public][$eq]=true&pagination[pageSize]={}&sort[1]=createdAt%3Adesc&populate=*",
            count
        );
        self.fetch_page(&endpoint).await.posts
    }

    /// Look up a single post by slug
    pub async fn post_by_slug(&self, slug: &str) -> Option<Post> {
        let endpoint = format!(
            "/posts?filters[slug][$eq]={}&populate=*",
            encode(slug)
        );
        self.fetch_page(&endpoint).await.posts.into_iter().next()
    }

    /// Posts in a category, selected by category slug
    pub async fn posts_by_category(&self, slug: &str, page: usize, count: usize) -> PostsPage {
        let endpoint = format!(
            "/posts?filters[is_public][$eq]=true&filters[categories][slug][$eq]={}&pagination[page]={}&pagination[pageSize]={}&populate=*",
            encode(slug),
            page,
            count
        );
        self.fetch_page(&endpoint).await
    }

    /// Posts carrying a tag, selected by tag slug
    pub async fn posts_by_tag(&self, slug: &str, page: usize, count: usize) -> PostsPage {
        let endpoint = format!(
            "/posts?filters[is_public][$eq]=true&filters[tags][slug][$eq]={}&pagination[page]={}&pagination[pageSize]={}&populate=*",
            encode(slug),
            page,
            count
        );
        self.fetch_page(&endpoint).await
    }

    /// Posts written by an author, selected by author slug
    pub async fn posts_by_author(&self, slug: &str, page: usize, count: usize) -> PostsPage {
        let endpoint = format!(
            "/posts?filters[is_public][$eq]=true&filters[author][slug][$eq]={}&pagination[page]={}&pagination[pageSize]={}&populate=*",
            encode(slug),
            page,
            count
        );
        self.fetch_page(&endpoint).await
    }

    /// Server-side search over title, excerpt, and content
    pub async fn search_posts(&self, query: &str) -> Vec<Post> {
        let q = encode(query);
        let endpoint = format!(
            "/posts?filters[is_public][$eq]=true&filters[$or][0][title][$containsi]={q}&filters[$or][1][excerpt][$containsi]={q}&filters[$or][2][content][$containsi]={q}&populate=*"
        );
        self.fetch_page(&endpoint).await.posts
    }

    /// Posts related to a post: same category, the post itself excluded
    pub async fn related_posts(
        &self,
        post_id: i64,
        category_slug: &str,
        count: usize,
    ) -> Vec<Post> {
        let endpoint = format!(
            "/posts?filters[is_public][$eq]=true&filters[categories][slug][$eq]={}&filters[id][$ne]={}&pagination[pageSize]={}&populate=*",
            encode(category_slug),
            post_id,
            count
        );
        self.fetch_page(&endpoint).await.posts
    }

    /// Fetch and map one listing endpoint, recovering to an empty page
    async fn fetch_page(&self, endpoint: &str) -> PostsPage {
        match self.fetch(endpoint).await {
            Ok(response) => PostsPage {
                posts: map_posts(&response.data),
                pages: response
                    .meta
                    .pagination
                    .as_ref()
                    .map(|p| p.page_count)
                    .unwrap_or(1),
                total: response
                    .meta
                    .pagination
                    .as_ref()
                    .map(|p| p.total)
                    .unwrap_or(0),
            },
            Err(err) => {
                tracing::warn!("CMS request failed for {}: {}", endpoint, err);
                PostsPage::default()
            }
        }
    }

    /// Issue one GET against the content API, consulting the TTL cache first
    async fn fetch(&self, endpoint: &str) -> Result<WireResponse, CmsError> {
        if let Some(body) = self.cache.get(endpoint) {
            return Ok(serde_json::from_str(&body)?);
        }

        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut request = self
            .http
            .get(&url)
            .header("Content-Type", "application/json");
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let body = request
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response: WireResponse = serde_json::from_str(&body)?;
        self.cache.put(endpoint, &body);
        Ok(response)
    }
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "data": [{
                "id": 1,
                "attributes": {
                    "title": "First",
                    "slug": "first",
                    "excerpt": "<p>intro</p>",
                    "content": "<p>body</p>",
                    "createdAt": "2024-02-01T00:00:00.000Z",
                    "updatedAt": "2024-02-02T00:00:00.000Z",
                    "publishedAt": "2024-02-01T12:00:00.000Z"
                }
            }],
            "meta": { "pagination": { "page": 1, "pageSize": 22, "pageCount": 3, "total": 55 } }
        })
    }

    fn client_for(server: &MockServer, ttl: u64) -> CmsClient {
        CmsClient::new(CmsConfig {
            base_url: format!("{}/api", server.uri()),
            auth_token: None,
            cache_ttl_seconds: ttl,
            timeout_seconds: 5,
        })
    }

    #[tokio::test]
    async fn test_posts_maps_body_and_totals() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/posts"))
            .and(query_param("filters[is_public][$eq]", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .mount(&server)
            .await;

        let page = client_for(&server, 0).posts(1, 22).await;
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].slug, "first");
        assert_eq!(page.pages, 3);
        assert_eq!(page.total, 55);
    }

    #[tokio::test]
    async fn test_non_2xx_yields_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let page = client_for(&server, 0).posts(1, 22).await;
        assert!(page.posts.is_empty());
        assert_eq!(page.pages, 0);
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_unreachable_cms_yields_empty_results() {
        let client = CmsClient::new(CmsConfig {
            base_url: "http://127.0.0.1:1/api".to_string(),
            auth_token: None,
            cache_ttl_seconds: 0,
            timeout_seconds: 1,
        });
        assert!(client.sticky_posts().await.is_empty());
        assert!(client.post_by_slug("whatever").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_post_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [],
                "meta": {}
            })))
            .mount(&server)
            .await;

        assert!(client_for(&server, 0).post_by_slug("ghost").await.is_none());
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = CmsClient::new(CmsConfig {
            base_url: format!("{}/api", server.uri()),
            auth_token: Some("sekrit".to_string()),
            cache_ttl_seconds: 0,
            timeout_seconds: 5,
        });
        let page = client.posts(1, 22).await;
        assert_eq!(page.posts.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_avoids_second_request_within_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, 60);
        let first = client.posts(1, 22).await;
        let second = client.posts(1, 22).await;
        assert_eq!(first.posts.len(), second.posts.len());
        // wiremock verifies the expect(1) on drop
    }

    #[tokio::test]
    async fn test_cache_refetches_after_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server, 1);
        client.posts(1, 22).await;
        tokio::time::sleep(Duration::from_millis(1100)).await;
        let page = client.posts(1, 22).await;
        assert_eq!(page.posts.len(), 1);
        // wiremock verifies the expect(2) on drop
    }
}
