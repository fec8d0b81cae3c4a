//! Client-side route table.
//!
//! Pages map to the paths the goto prompt accepts; anything
//! unrecognized resolves to the 404 page. The account page requires an
//! authenticated session.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Directory,
    Account,
    Error,
    NotFound,
}

/// Pages reachable from the nav bar, in display order.
pub const NAV_PAGES: [Page; 4] = [Page::Home, Page::About, Page::Directory, Page::Account];

impl Page {
    /// Resolve a typed route path. Unknown paths land on NotFound.
    pub fn from_path(path: &str) -> Self {
        let normalized = path.trim();
        let normalized = normalized.strip_prefix('/').unwrap_or(normalized);
        match normalized.trim_end_matches('/') {
            "" => Page::Home,
            "about" => Page::About,
            "directory" => Page::Directory,
            "account" => Page::Account,
            "error" => Page::Error,
            _ => Page::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Directory => "/directory",
            Page::Account => "/account",
            Page::Error => "/error",
            Page::NotFound => "/404",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Directory => "Directory",
            Page::Account => "Account",
            Page::Error => "Error",
            Page::NotFound => "Not Found",
        }
    }

    /// Whether the page is gated on an authenticated session.
    pub fn requires_auth(self) -> bool {
        matches!(self, Page::Account)
    }

    fn nav_index(self) -> Option<usize> {
        NAV_PAGES.iter().position(|p| *p == self)
    }

    /// Next nav page (wrapping around). Off-nav pages go home.
    pub fn next(self) -> Self {
        match self.nav_index() {
            Some(i) => NAV_PAGES[(i + 1) % NAV_PAGES.len()],
            None => Page::Home,
        }
    }

    /// Previous nav page (wrapping around). Off-nav pages go home.
    pub fn prev(self) -> Self {
        match self.nav_index() {
            Some(i) => NAV_PAGES[(i + NAV_PAGES.len() - 1) % NAV_PAGES.len()],
            None => Page::Home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths_resolve() {
        assert_eq!(Page::from_path("/"), Page::Home);
        assert_eq!(Page::from_path(""), Page::Home);
        assert_eq!(Page::from_path("/about"), Page::About);
        assert_eq!(Page::from_path("about"), Page::About);
        assert_eq!(Page::from_path("/directory/"), Page::Directory);
        assert_eq!(Page::from_path("  /account "), Page::Account);
        assert_eq!(Page::from_path("/error"), Page::Error);
    }

    #[test]
    fn test_unknown_paths_hit_404() {
        assert_eq!(Page::from_path("/contact"), Page::NotFound);
        assert_eq!(Page::from_path("/table/extra"), Page::NotFound);
        assert_eq!(Page::from_path("/ACCOUNT"), Page::NotFound);
    }

    #[test]
    fn test_nav_cycle_wraps() {
        assert_eq!(Page::Home.next(), Page::About);
        assert_eq!(Page::Account.next(), Page::Home);
        assert_eq!(Page::Home.prev(), Page::Account);
        // Off-nav pages return home
        assert_eq!(Page::NotFound.next(), Page::Home);
        assert_eq!(Page::Error.prev(), Page::Home);
    }

    #[test]
    fn test_only_account_is_gated() {
        for page in [Page::Home, Page::About, Page::Directory, Page::Error, Page::NotFound] {
            assert!(!page.requires_auth());
        }
        assert!(Page::Account.requires_auth());
    }
}
