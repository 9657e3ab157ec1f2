//! Pagination window computation
//!
//! Computes which page numbers a paged listing shows, collapsing runs of
//! pages far from the current one into ellipsis tokens.

/// One entry in the visible pagination strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A concrete, clickable page number (1-indexed)
    Page(usize),
    /// A collapsed run of pages
    Ellipsis,
}

/// Pages kept visible on each side of the current page
const DELTA: usize = 2;

/// Compute the visible page tokens for a paged listing.
///
/// Page 1 and the last page are always present; pages within `DELTA` of the
/// current page form a contiguous window; an ellipsis appears wherever the
/// window is non-adjacent (gap > 1) to the first or last page. A single page
/// yields nothing to render.
///
/// Callers are responsible for rejecting page changes outside
/// `1..=total_pages`; no clamping happens here.
pub fn visible_pages(current: usize, total: usize) -> Vec<PageToken> {
    if total <= 1 {
        return Vec::new();
    }

    let mut tokens = vec![PageToken::Page(1)];

    // gap between page 1 and the window start
    if current > DELTA + 2 {
        tokens.push(PageToken::Ellipsis);
    }

    let start = current.saturating_sub(DELTA).max(2);
    let end = (current + DELTA).min(total - 1);
    for page in start..=end {
        tokens.push(PageToken::Page(page));
    }

    // gap between the window end and the last page
    if current + DELTA + 1 < total {
        tokens.push(PageToken::Ellipsis);
    }

    tokens.push(PageToken::Page(total));
    tokens
}
