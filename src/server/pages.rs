//! Server-rendered page markup
//!
//! Pages are assembled as HTML strings from small builder functions. The
//! markup is deliberately thin; the behavioral weight lives in the view
//! engine and the content renderer.

use crate::config::SiteConfig;
use crate::content::{Chapter, Post};
use crate::helpers::{date_xml, full_date, html_escape, strip_html, truncate};
use crate::view::{ListView, PageToken, ALL_CATEGORIES};

/// Shared page skeleton
pub fn layout(config: &SiteConfig, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="author" content="{}">
<title>{} | {}</title>
</head>
<body class="min-h-screen bg-slate-50 dark:bg-slate-950">
<header class="site-header"><a href="/" class="site-title">{}</a></header>
<main class="max-w-7xl mx-auto px-4">{}</main>
</body>
</html>"#,
        html_escape(&config.language),
        html_escape(&config.author),
        html_escape(title),
        html_escape(&config.title),
        html_escape(&config.title),
        body
    )
}

/// One post card in a listing
pub fn post_card(post: &Post) -> String {
    let excerpt = truncate(&strip_html(&post.excerpt), 160, None);
    let mut tags = String::new();
    for (name, slug) in post.tag_pairs() {
        tags.push_str(&format!(
            r#"<a class="tag-pill" href="/tag/{}">#{}</a>"#,
            html_escape(slug),
            html_escape(name)
        ));
    }

    format!(
        r#"<article class="post-card">
<img class="post-card-image" src="{}" alt="">
<a class="post-card-category" href="/category/{}">{}</a>
<h2 class="post-card-title"><a href="/{}">{}</a></h2>
<p class="post-card-excerpt">{}</p>
<div class="post-card-meta">
<a class="post-card-author" href="/author/{}">{}</a>
<time datetime="{}">{}</time>
<span class="post-card-readtime">{}</span>
</div>
<div class="post-card-tags">{}</div>
</article>"#,
        html_escape(&post.image),
        html_escape(&post.category_slug),
        html_escape(&post.category),
        html_escape(&post.slug),
        html_escape(&post.title),
        html_escape(&excerpt),
        html_escape(&post.author.slug),
        html_escape(&post.author.name),
        date_xml(&post.published_at),
        full_date(&post.published_at),
        html_escape(&post.read_time),
        tags
    )
}

/// Category filter pills, "All" first then the post categories sorted
pub fn category_pills(posts: &[Post], selected: &str) -> String {
    let mut categories: Vec<&str> = posts.iter().map(|p| p.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();

    let mut html = r#"<div class="category-filters">"#.to_string();
    for name in std::iter::once(ALL_CATEGORIES).chain(categories) {
        let class = if name == selected {
            "category-pill active"
        } else {
            "category-pill"
        };
        html.push_str(&format!(
            r#"<a class="{}" href="/?category={}">{}</a>"#,
            class,
            urlencode(name),
            html_escape(name)
        ));
    }
    html.push_str("</div>");
    html
}

/// A full listing page: optional featured strip, post grid, paginator
pub fn listing(heading: &str, subheading: &str, view: &ListView, base_url: &str) -> String {
    let mut html = format!(
        r#"<section class="listing"><h1 class="listing-heading">{}</h1><p class="listing-subheading">{}</p>"#,
        html_escape(heading),
        html_escape(subheading)
    );

    if !view.featured.is_empty() {
        html.push_str(r#"<section class="featured-posts">"#);
        for post in &view.featured {
            html.push_str(&post_card(post));
        }
        html.push_str("</section>");
    }

    if view.posts.is_empty() {
        html.push_str(r#"<p class="empty-state">No content found.</p>"#);
    } else {
        html.push_str(r#"<section class="post-grid">"#);
        for post in &view.posts {
            html.push_str(&post_card(post));
        }
        html.push_str("</section>");
    }

    html.push_str(&paginator(view, base_url));
    html.push_str("</section>");
    html
}

/// Pagination strip for a listing.
///
/// Renders nothing for a single page. Prev/next render as disabled spans at
/// the boundaries, so out-of-range pages are never requested; the token
/// window itself comes from `visible_pages`.
pub fn paginator(view: &ListView, base_url: &str) -> String {
    let tokens = view.page_tokens();
    if tokens.is_empty() {
        return String::new();
    }

    let sep = if base_url.contains('?') { '&' } else { '?' };
    let page_url = |page: usize| format!("{}{}page={}", base_url, sep, page);

    let mut html = r#"<nav class="pagination">"#.to_string();

    if view.current_page > 1 {
        html.push_str(&format!(
            r#"<a class="pagination-prev" href="{}">Previous</a>"#,
            page_url(view.current_page - 1)
        ));
    } else {
        html.push_str(r#"<span class="pagination-prev disabled">Previous</span>"#);
    }

    html.push_str(r#"<span class="pagination-numbers">"#);
    for token in tokens {
        match token {
            PageToken::Ellipsis => {
                html.push_str(r#"<span class="pagination-ellipsis">…</span>"#);
            }
            PageToken::Page(page) if page == view.current_page => {
                html.push_str(&format!(
                    r#"<span class="pagination-number current">{}</span>"#,
                    page
                ));
            }
            PageToken::Page(page) => {
                html.push_str(&format!(
                    r#"<a class="pagination-number" href="{}">{}</a>"#,
                    page_url(page),
                    page
                ));
            }
        }
    }
    html.push_str("</span>");

    if view.current_page < view.total_pages {
        html.push_str(&format!(
            r#"<a class="pagination-next" href="{}">Next</a>"#,
            page_url(view.current_page + 1)
        ));
    } else {
        html.push_str(r#"<span class="pagination-next disabled">Next</span>"#);
    }

    html.push_str("</nav>");
    html
}

/// Author byline box shown under a post
pub fn author_box(post: &Post) -> String {
    let avatar = if post.author.avatar.is_empty() {
        format!(
            r#"<span class="author-initials">{}</span>"#,
            html_escape(&post.author.initials())
        )
    } else {
        format!(
            r#"<img class="author-avatar" src="{}" alt="{}">"#,
            html_escape(&post.author.avatar),
            html_escape(&post.author.name)
        )
    };

    format!(
        r#"<aside class="author-box">{}<div><a class="author-name" href="/author/{}">{}</a><p class="author-bio">{}</p></div></aside>"#,
        avatar,
        html_escape(&post.author.slug),
        html_escape(&post.author.name),
        html_escape(&post.author.bio)
    )
}

/// A single post page; `content` is the renderer-expanded body
pub fn post_page(post: &Post, content: &str, related: &[Post]) -> String {
    let mut tags = String::new();
    for (name, slug) in post.tag_pairs() {
        tags.push_str(&format!(
            r#"<a class="tag-pill" href="/tag/{}">#{}</a>"#,
            html_escape(slug),
            html_escape(name)
        ));
    }

    let mut html = format!(
        r#"<article class="post">
<a class="post-category" href="/category/{}">{}</a>
<h1 class="post-title">{}</h1>
<div class="post-meta"><time datetime="{}">{}</time><span>{}</span></div>
<div class="post-tags">{}</div>
<div class="post-content">{}</div>
{}{}
</article>"#,
        html_escape(&post.category_slug),
        html_escape(&post.category),
        html_escape(&post.title),
        date_xml(&post.published_at),
        full_date(&post.published_at),
        html_escape(&post.read_time),
        tags,
        content,
        chapter_overview(&post.chapters),
        author_box(post)
    );

    if !related.is_empty() {
        html.push_str(r#"<section class="related-posts"><h2>Related posts</h2>"#);
        for post in related {
            html.push_str(&post_card(post));
        }
        html.push_str("</section>");
    }

    html
}

/// Chapter overview for long-form guide posts; empty when the post has none.
///
/// A chapter lists its posts when it owns any, otherwise it falls back to
/// its freestanding summary/content HTML.
pub fn chapter_overview(chapters: &[Chapter]) -> String {
    if chapters.is_empty() {
        return String::new();
    }

    let mut html = format!(
        r#"<nav class="chapter-overview"><h2>{} chapters</h2><ol class="chapter-list">"#,
        chapters.len()
    );
    for chapter in chapters {
        html.push_str(&format!(
            r#"<li class="chapter" id="{}"><h3 class="chapter-title">{}</h3>"#,
            html_escape(&chapter.slug),
            html_escape(&chapter.title)
        ));
        if chapter.posts.is_empty() {
            if let Some(summary) = &chapter.summary {
                html.push_str(&format!(r#"<div class="chapter-summary">{}</div>"#, summary));
            }
            if let Some(content) = &chapter.content {
                html.push_str(&format!(r#"<div class="chapter-content">{}</div>"#, content));
            }
        } else {
            html.push_str(r#"<ul class="chapter-posts">"#);
            for post in &chapter.posts {
                html.push_str(&format!(
                    r#"<li><a href="/{}">{}</a><span class="chapter-post-readtime">{}</span></li>"#,
                    html_escape(&post.slug),
                    html_escape(&post.title),
                    html_escape(&post.read_time)
                ));
            }
            html.push_str("</ul>");
        }
        html.push_str("</li>");
    }
    html.push_str("</ol></nav>");
    html
}

/// The not-found page body
pub fn not_found() -> String {
    r#"<section class="not-found"><h1>404</h1><p>No content found.</p><a href="/">Back to the blog</a></section>"#
        .to_string()
}

fn urlencode(raw: &str) -> String {
    percent_encoding::utf8_percent_encode(raw, percent_encoding::NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Author, PLACEHOLDER_IMAGE};
    use chrono::Utc;

    fn post() -> Post {
        Post {
            id: 1,
            title: "Intro to <Rust>".to_string(),
            slug: "intro-to-rust".to_string(),
            excerpt: "<p>Learn things</p>".to_string(),
            content: "<p>Body</p>".to_string(),
            category: "Backend".to_string(),
            category_slug: "backend".to_string(),
            tags: vec!["Rust".to_string()],
            tag_slugs: vec!["rust".to_string()],
            author: Author {
                name: "Ada Lovelace".to_string(),
                slug: "ada".to_string(),
                bio: String::new(),
                avatar: String::new(),
            },
            published_at: Utc::now(),
            updated_at: Utc::now(),
            read_time: "1 min read".to_string(),
            featured: false,
            image: PLACEHOLDER_IMAGE.to_string(),
            chapters: Vec::new(),
        }
    }

    #[test]
    fn test_post_card_escapes_title() {
        let card = post_card(&post());
        assert!(card.contains("Intro to &lt;Rust&gt;"));
        assert!(card.contains(r#"href="/intro-to-rust""#));
    }

    #[test]
    fn test_single_page_has_no_paginator() {
        let view = ListView::build(&[post()], &[], "", ALL_CATEGORIES, 1);
        assert_eq!(paginator(&view, "/"), "");
    }

    #[test]
    fn test_paginator_disables_prev_on_first_page() {
        let posts: Vec<Post> = (0..13)
            .map(|i| {
                let mut p = post();
                p.id = i;
                p
            })
            .collect();
        let view = ListView::build(&posts, &[], "", ALL_CATEGORIES, 1);
        let html = paginator(&view, "/");
        assert!(html.contains(r#"<span class="pagination-prev disabled">"#));
        assert!(html.contains(r#"href="/?page=2""#));
    }

    #[test]
    fn test_chapter_overview_freestanding_content() {
        let chapters = vec![Chapter {
            title: "Intro".to_string(),
            slug: "intro".to_string(),
            summary: Some("<p>sum</p>".to_string()),
            content: Some("<p>body</p>".to_string()),
            posts: Vec::new(),
        }];
        let html = chapter_overview(&chapters);
        assert!(html.contains("1 chapters"));
        assert!(html.contains(r#"<div class="chapter-summary"><p>sum</p></div>"#));
        assert!(chapter_overview(&[]).is_empty());
    }

    #[test]
    fn test_author_box_falls_back_to_initials() {
        let html = author_box(&post());
        assert!(html.contains(r#"<span class="author-initials">AL</span>"#));
    }
}
