//! HTTP server and page routes
//!
//! Each page render issues its independent CMS reads (joined, not ordered),
//! runs the pure view pipeline over the results, and renders HTML. Missing
//! content surfaces as a 404 page; CMS failures degrade to empty listings
//! inside the client, so no handler ever propagates an error to the wire.

mod pages;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::cms::{resolve_tag_name, CmsClient, PostsPage};
use crate::config::SiteConfig;
use crate::content::ContentRenderer;
use crate::view::{ListView, ALL_CATEGORIES};

/// Upper bound on posts pulled for in-memory filtering on the home page
const HOME_FETCH_SIZE: usize = 1000;

/// Posts pulled for a scoped (category/tag/author) listing
const SCOPED_FETCH_SIZE: usize = 100;

/// Related posts shown under an article
const RELATED_COUNT: usize = 3;

/// Shared state for all handlers
struct AppState {
    config: SiteConfig,
    cms: CmsClient,
    renderer: ContentRenderer,
}

/// Query parameters accepted by listing pages.
///
/// A filter change arrives as a fresh URL without `page`, which is exactly
/// the "changing the filters resets to page 1" rule, stateless.
#[derive(Debug, Default, Deserialize)]
struct ListParams {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    page: Option<usize>,
}

impl ListParams {
    fn search(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL_CATEGORIES)
    }

    fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}

/// Start the blog server
pub async fn start(config: SiteConfig, ip: &str, port: u16) -> Result<()> {
    let renderer = ContentRenderer::with_theme(&config.highlight_theme);
    let state = Arc::new(AppState {
        cms: CmsClient::new(config.cms.clone()),
        renderer,
        config,
    });

    let app = Router::new()
        .route("/", get(home))
        .route("/category/:slug", get(category))
        .route("/tag/:slug", get(tag))
        .route("/author/:slug", get(author))
        .route("/:slug", get(show_post))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Serving blog at http://{}:{}", ip, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Home: full post list plus the sticky strip, filterable and paged
async fn home(State(state): State<Arc<AppState>>, Query(params): Query<ListParams>) -> Response {
    // independent reads, no ordering dependency
    let (page, sticky) = tokio::join!(
        state.cms.posts(1, HOME_FETCH_SIZE),
        state.cms.sticky_posts()
    );

    let view = ListView::build(
        &page.posts,
        &sticky,
        params.search(),
        params.category(),
        params.page(),
    );

    let mut body = pages::category_pills(&page.posts, params.category());
    body.push_str(&pages::listing(
        &state.config.title,
        &state.config.description,
        &view,
        &listing_base_url("/", &params),
    ));

    Html(pages::layout(&state.config, "Home", &body)).into_response()
}

/// Category listing, selected by category slug
async fn category(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let page = state
        .cms
        .posts_by_category(&slug, 1, SCOPED_FETCH_SIZE)
        .await;
    let Some(first) = page.posts.first() else {
        return not_found(&state);
    };

    let heading = first.category.clone();
    let subheading = format!("{} articles in {}", page.total, heading);
    scoped_listing(&state, page, heading, subheading, &slug, "category", &params)
}

/// Tag listing; the display name resolves from the tags on the result set
async fn tag(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let page = state.cms.posts_by_tag(&slug, 1, SCOPED_FETCH_SIZE).await;
    if page.posts.is_empty() {
        return not_found(&state);
    }

    let name = resolve_tag_name(&page.posts, &slug);
    let subheading = format!("{} articles tagged with {}", page.total, name);
    scoped_listing(&state, page, format!("#{}", name), subheading, &slug, "tag", &params)
}

/// Author listing, selected by author slug
async fn author(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let page = state.cms.posts_by_author(&slug, 1, SCOPED_FETCH_SIZE).await;
    let Some(first) = page.posts.first() else {
        return not_found(&state);
    };

    let heading = first.author.name.clone();
    let subheading = format!("{} articles by {}", page.total, heading);
    scoped_listing(&state, page, heading, subheading, &slug, "author", &params)
}

/// Single post, expanded through the content renderer
async fn show_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let Some(post) = state.cms.post_by_slug(&slug).await else {
        return not_found(&state);
    };

    let related = state
        .cms
        .related_posts(post.id, &post.category_slug, RELATED_COUNT)
        .await;
    let content = state.renderer.render(&post.content);
    let body = pages::post_page(&post, &content, &related);

    Html(pages::layout(&state.config, &post.title, &body)).into_response()
}

/// Shared tail of the scoped listing handlers
fn scoped_listing(
    state: &AppState,
    page: PostsPage,
    heading: String,
    subheading: String,
    slug: &str,
    route: &str,
    params: &ListParams,
) -> Response {
    // the result set is already scoped server-side; only search/page apply
    let view = ListView::build_scoped(&page.posts, params.search(), params.page());

    let base = listing_base_url(&format!("/{}/{}", route, slug), params);
    let body = pages::listing(&heading, &subheading, &view, &base);
    Html(pages::layout(&state.config, &heading, &body)).into_response()
}

fn not_found(state: &AppState) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(pages::layout(&state.config, "Not found", &pages::not_found())),
    )
        .into_response()
}

/// Base URL for paginator links, carrying the active filters forward
fn listing_base_url(path: &str, params: &ListParams) -> String {
    let mut query = Vec::new();
    if !params.search().is_empty() {
        query.push(format!(
            "q={}",
            percent_encoding::utf8_percent_encode(
                params.search(),
                percent_encoding::NON_ALPHANUMERIC
            )
        ));
    }
    if params.category() != ALL_CATEGORIES {
        query.push(format!(
            "category={}",
            percent_encoding::utf8_percent_encode(
                params.category(),
                percent_encoding::NON_ALPHANUMERIC
            )
        ));
    }

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}
