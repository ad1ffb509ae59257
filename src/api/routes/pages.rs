//! Page Routes
//!
//! The two navigable views of the explorer. Any other path falls back to
//! the about page.
//!
//! - GET / and GET /about - About page
//! - GET /explore - Explore page (charts and dropdowns)

use axum::{http::Uri, response::Html};

const ABOUT_PAGE: &str = include_str!("../../../assets/about.html");
const EXPLORE_PAGE: &str = include_str!("../../../assets/explore.html");

/// Navigable views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    About,
    Explore,
}

impl Page {
    /// Resolve a request path; unknown paths show the about page
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/explore" => Page::Explore,
            _ => Page::About,
        }
    }

    pub fn html(self) -> &'static str {
        match self {
            Page::About => ABOUT_PAGE,
            Page::Explore => EXPLORE_PAGE,
        }
    }
}

/// GET /, GET /about
pub async fn about() -> Html<&'static str> {
    Html(Page::About.html())
}

/// GET /explore
pub async fn explore() -> Html<&'static str> {
    Html(Page::Explore.html())
}

/// Fallback for any other path
pub async fn fallback(uri: Uri) -> Html<&'static str> {
    tracing::debug!(path = %uri.path(), "Unknown page, serving about");
    Html(Page::from_path(uri.path()).html())
}
