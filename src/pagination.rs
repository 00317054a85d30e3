//
//  gitlab-node
//  pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Pagination Signals
//!
//! GitLab deployments have exposed the "more pages available" signal in two
//! ways over time: an explicit `x-next-page` response header carrying the
//! next page number, and a `Link` header with a `rel="next"` relation. This
//! module abstracts both behind a single capability, [`PageStrategy`], chosen
//! per deployment when the client is constructed.
//!
//! The [`PageCursor`] tracks the position of the pagination loop: page
//! numbers start at 1 and the page size is fixed at 100 while paginating.
//! Only the pagination driver mutates it.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::HeaderMap;

/// Fixed page size used while fetching every page.
pub const PAGE_SIZE: u64 = 100;

/// Matches a `rel="next"` relation inside a `Link` header value.
static LINK_NEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#";\s*rel="next""#).expect("static pattern compiles"));

/// Position of the pagination loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Current page number, starting at 1.
    pub page: u64,
    /// Page size requested from the server.
    pub per_page: u64,
}

impl PageCursor {
    /// Cursor for the first page at the fixed pagination page size.
    pub fn first() -> Self {
        Self {
            page: 1,
            per_page: PAGE_SIZE,
        }
    }

    /// Advances the cursor by one page.
    pub fn advance(&mut self) {
        self.page += 1;
    }
}

/// How a deployment signals that more pages are available.
///
/// The absence of the signal terminates the pagination loop.
///
/// # Example
///
/// ```rust
/// use gitlab_node::PageStrategy;
/// use reqwest::header::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-next-page", "2".parse().unwrap());
///
/// assert!(PageStrategy::NextPageHeader.has_next(&headers));
/// assert!(!PageStrategy::LinkHeader.has_next(&headers));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageStrategy {
    /// A non-empty `x-next-page` header names the next page. The common
    /// convention, and the default.
    #[default]
    NextPageHeader,

    /// A `Link` header carries a `rel="next"` relation.
    LinkHeader,
}

impl PageStrategy {
    /// Inspects response headers for the "more pages" signal.
    pub fn has_next(&self, headers: &HeaderMap) -> bool {
        match self {
            PageStrategy::NextPageHeader => headers
                .get("x-next-page")
                .and_then(|value| value.to_str().ok())
                .map(|value| !value.is_empty())
                .unwrap_or(false),
            PageStrategy::LinkHeader => headers
                .get(reqwest::header::LINK)
                .and_then(|value| value.to_str().ok())
                .map(|value| LINK_NEXT.is_match(value))
                .unwrap_or(false),
        }
    }
}
