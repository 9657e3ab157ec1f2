//! In-memory filtering, sorting, and page slicing for listing pages
//!
//! Every listing page (home, category, tag, author) runs the same pipeline:
//! filter by search term and category, sort by publish date descending, then
//! slice out the requested page. All of it is a pure function of
//! `(posts, search_term, selected_category, current_page)`, with no hidden
//! state, recomputed in full on every request.

use crate::content::Post;
use crate::helpers::strip_html;
use crate::view::pagination::{visible_pages, PageToken};

/// Fixed page size for regular (non-sticky) posts
pub const POSTS_PER_PAGE: usize = 6;

/// Category filter value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// A fully-filtered, paginated listing ready for rendering
#[derive(Debug, Clone)]
pub struct ListView {
    /// The requested page of regular posts, date-sorted descending
    pub posts: Vec<Post>,
    /// Featured posts passing the same filters; never paginated
    pub featured: Vec<Post>,
    /// Current page, 1-indexed
    pub current_page: usize,
    /// Total pages of regular posts at `POSTS_PER_PAGE`
    pub total_pages: usize,
    /// Total regular posts after filtering
    pub total_posts: usize,
}

impl ListView {
    /// Run the full pipeline over an in-memory post list.
    ///
    /// `featured` posts are tracked separately from the regular flow: they
    /// pass through the same search/category filters but are excluded from
    /// pagination. Posts flagged `featured` inside `all` are likewise dropped
    /// from the regular pages.
    pub fn build(
        all: &[Post],
        featured: &[Post],
        search: &str,
        category: &str,
        page: usize,
    ) -> Self {
        let mut regular: Vec<Post> = all
            .iter()
            .filter(|post| !post.featured && matches_filters(post, search, category))
            .cloned()
            .collect();
        sort_by_published_desc(&mut regular);

        let featured: Vec<Post> = featured
            .iter()
            .filter(|post| matches_filters(post, search, category))
            .cloned()
            .collect();

        let total_posts = regular.len();
        let total_pages = total_posts.div_ceil(POSTS_PER_PAGE);
        let posts = page_slice(&regular, page, POSTS_PER_PAGE).to_vec();

        Self {
            posts,
            featured,
            current_page: page,
            total_pages,
            total_posts,
        }
    }

    /// Run the pipeline for a scoped (category/tag/author) listing.
    ///
    /// The result set arrived already scoped, so only the search filter and
    /// pagination apply. Featured posts stay in the regular flow here: a
    /// scoped page shows every post in its scope, paginated, with no
    /// separate featured strip.
    pub fn build_scoped(all: &[Post], search: &str, page: usize) -> Self {
        let mut regular: Vec<Post> = all
            .iter()
            .filter(|post| matches_filters(post, search, ALL_CATEGORIES))
            .cloned()
            .collect();
        sort_by_published_desc(&mut regular);

        let total_posts = regular.len();
        let total_pages = total_posts.div_ceil(POSTS_PER_PAGE);
        let posts = page_slice(&regular, page, POSTS_PER_PAGE).to_vec();

        Self {
            posts,
            featured: Vec::new(),
            current_page: page,
            total_pages,
            total_posts,
        }
    }

    /// Visible pagination tokens for this view
    pub fn page_tokens(&self) -> Vec<PageToken> {
        visible_pages(self.current_page, self.total_pages)
    }
}

/// Whether a post passes the search term and category filters.
///
/// The search term matches case-insensitively as a substring of the title,
/// the HTML-stripped excerpt, or any tag name. The category matches exactly
/// by display name, with `"All"` disabling the filter. The two predicates are
/// independent, so their order of application never matters.
pub fn matches_filters(post: &Post, search: &str, category: &str) -> bool {
    let matches_category = category == ALL_CATEGORIES || post.category == category;
    if !matches_category {
        return false;
    }

    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();
    post.title.to_lowercase().contains(&needle)
        || strip_html(&post.excerpt).to_lowercase().contains(&needle)
        || post
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Sort posts by publish date, newest first
pub fn sort_by_published_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Slice out one page (1-indexed) of a post list
pub fn page_slice(posts: &[Post], page: usize, per_page: usize) -> &[Post] {
    let start = page.saturating_sub(1) * per_page;
    if start >= posts.len() {
        return &[];
    }
    let end = (start + per_page).min(posts.len());
    &posts[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Author, PLACEHOLDER_IMAGE};
    use chrono::{TimeZone, Utc};

    fn post(id: i64, title: &str, category: &str, tags: &[&str], featured: bool) -> Post {
        Post {
            id,
            title: title.to_string(),
            slug: slug::slugify(title),
            excerpt: format!("<p>About {}</p>", title),
            content: String::new(),
            category: category.to_string(),
            category_slug: slug::slugify(category),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            tag_slugs: tags.iter().map(|t| t.to_lowercase()).collect(),
            author: Author::default(),
            // older ids published earlier, so date-desc order is id-desc
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::days(id),
            updated_at: Utc::now(),
            read_time: "1 min read".to_string(),
            featured,
            image: PLACEHOLDER_IMAGE.to_string(),
            chapters: Vec::new(),
        }
    }

    fn corpus(n: i64) -> Vec<Post> {
        (0..n)
            .map(|i| post(i, &format!("Post {}", i), "Backend", &["rust"], false))
            .collect()
    }

    #[test]
    fn test_page_two_of_fourteen_posts() {
        let posts = corpus(14);
        let view = ListView::build(&posts, &[], "", ALL_CATEGORIES, 2);

        assert_eq!(view.total_posts, 14);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.posts.len(), 6);
        // date-sorted descending: ids 13..0; page 2 holds sorted indices 6-11
        let ids: Vec<i64> = view.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3, 2]);
    }

    #[test]
    fn test_search_matches_tag_only() {
        let mut posts = corpus(3);
        posts.push(post(10, "Unrelated title", "Backend", &["Kubernetes"], false));

        let view = ListView::build(&posts, &[], "kubernetes", ALL_CATEGORIES, 1);
        assert_eq!(view.posts.len(), 1);
        assert_eq!(view.posts[0].id, 10);
    }

    #[test]
    fn test_search_matches_stripped_excerpt() {
        let posts = vec![post(1, "First", "Backend", &[], false)];
        // excerpt is "<p>About First</p>"; match on its plain text
        let view = ListView::build(&posts, &[], "about first", ALL_CATEGORIES, 1);
        assert_eq!(view.posts.len(), 1);
    }

    #[test]
    fn test_filter_order_commutes() {
        let mut posts = corpus(6);
        posts.push(post(20, "Databases deep dive", "Data", &["postgres"], false));
        posts.push(post(21, "Another data post", "Data", &["mysql"], false));

        let by_category_then_search: Vec<i64> = posts
            .iter()
            .filter(|p| matches_filters(p, "", "Data"))
            .filter(|p| matches_filters(p, "postgres", ALL_CATEGORIES))
            .map(|p| p.id)
            .collect();
        let by_search_then_category: Vec<i64> = posts
            .iter()
            .filter(|p| matches_filters(p, "postgres", ALL_CATEGORIES))
            .filter(|p| matches_filters(p, "", "Data"))
            .map(|p| p.id)
            .collect();

        assert_eq!(by_category_then_search, vec![20]);
        assert_eq!(by_category_then_search, by_search_then_category);
    }

    #[test]
    fn test_featured_posts_kept_separate() {
        let mut posts = corpus(8);
        posts.push(post(30, "Sticky one", "Backend", &["rust"], true));
        let featured = vec![post(30, "Sticky one", "Backend", &["rust"], true)];

        let view = ListView::build(&posts, &featured, "", ALL_CATEGORIES, 1);
        // the flagged post never enters the regular pages
        assert!(view.posts.iter().all(|p| !p.featured));
        assert_eq!(view.total_posts, 8);
        assert_eq!(view.featured.len(), 1);

        // featured list obeys the same filters
        let filtered = ListView::build(&posts, &featured, "no such term", ALL_CATEGORIES, 1);
        assert!(filtered.featured.is_empty());
    }

    #[test]
    fn test_scoped_listing_keeps_featured_in_flow() {
        let mut posts = corpus(2);
        posts.push(post(40, "Pinned guide", "Backend", &["rust"], true));

        let view = ListView::build_scoped(&posts, "", 1);
        assert_eq!(view.total_posts, 3);
        assert_eq!(view.posts.len(), 3);
        assert!(view.posts.iter().any(|p| p.featured));
        assert!(view.featured.is_empty());
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let posts = corpus(5);
        let view = ListView::build(&posts, &[], "", ALL_CATEGORIES, 4);
        assert!(view.posts.is_empty());
        assert_eq!(view.total_pages, 1);
    }
}
