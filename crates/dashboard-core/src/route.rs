//! Ordered path-to-page table with a catch-all fallback.

use std::collections::HashSet;

use thiserror::Error;

/// Path of the catch-all entry.
pub const CATCH_ALL: &str = "**";

/// Where a route entry leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget<P> {
    Page(P),
    /// Resolve `path` instead.
    Redirect(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("duplicate route for path '{0}'")]
    DuplicatePath(String),
    #[error("route table has no catch-all entry")]
    MissingFallback,
    #[error("catch-all entry must be the last route")]
    FallbackNotLast,
    #[error("redirect loop through '{0}'")]
    RedirectLoop(String),
}

/// Outcome of resolving a navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a, P> {
    pub page: &'a P,
    /// Normalized path after redirects.
    pub path: String,
    /// At least one redirect was followed.
    pub redirected: bool,
}

#[derive(Debug, Clone)]
struct RouteEntry<P> {
    path: String,
    target: RouteTarget<P>,
}

/// Resolves paths first-match-wins over exact entries, then the fallback.
#[derive(Debug, Clone)]
pub struct RouteTable<P> {
    entries: Vec<RouteEntry<P>>,
    fallback: RouteTarget<P>,
}

/// Strip query, fragment and surrounding slashes.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].trim_matches('/').to_string()
}

impl<P> RouteTable<P> {
    pub fn builder() -> RouteTableBuilder<P> {
        RouteTableBuilder::default()
    }

    /// Resolve `path` to a page, following redirects.
    ///
    /// Unknown paths go to the fallback; this only fails on a redirect
    /// cycle.
    pub fn resolve(&self, path: &str) -> Result<Resolution<'_, P>, RouteError> {
        let mut current = normalize_path(path);
        let mut visited = HashSet::new();
        let mut redirected = false;

        loop {
            match self.lookup(&current) {
                RouteTarget::Page(page) => {
                    return Ok(Resolution {
                        page,
                        path: current,
                        redirected,
                    });
                }
                RouteTarget::Redirect(to) => {
                    if !visited.insert(current.clone()) {
                        return Err(RouteError::RedirectLoop(current));
                    }
                    tracing::debug!(from = %current, to = %to, "following redirect");
                    current = normalize_path(to);
                    redirected = true;
                }
            }
        }
    }

    fn lookup(&self, path: &str) -> &RouteTarget<P> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map_or(&self.fallback, |entry| &entry.target)
    }

    /// Exact paths in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.path.as_str())
    }

    pub fn fallback(&self) -> &RouteTarget<P> {
        &self.fallback
    }
}

/// Collects entries in order and validates the table on `build`.
#[derive(Debug)]
pub struct RouteTableBuilder<P> {
    entries: Vec<(String, RouteTarget<P>)>,
}

impl<P> Default for RouteTableBuilder<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P> RouteTableBuilder<P> {
    #[must_use]
    pub fn page(self, path: &str, page: P) -> Self {
        self.route(path, RouteTarget::Page(page))
    }

    #[must_use]
    pub fn redirect(self, path: &str, to: &str) -> Self {
        self.route(path, RouteTarget::Redirect(normalize_path(to)))
    }

    #[must_use]
    pub fn route(mut self, path: &str, target: RouteTarget<P>) -> Self {
        let path = if path == CATCH_ALL {
            CATCH_ALL.to_string()
        } else {
            normalize_path(path)
        };
        self.entries.push((path, target));
        self
    }

    pub fn build(self) -> Result<RouteTable<P>, RouteError> {
        let mut entries = self.entries;
        let fallback_at = entries
            .iter()
            .position(|(path, _)| path == CATCH_ALL)
            .ok_or(RouteError::MissingFallback)?;
        if fallback_at != entries.len() - 1 {
            return Err(RouteError::FallbackNotLast);
        }
        let Some((_, fallback)) = entries.pop() else {
            return Err(RouteError::MissingFallback);
        };

        let mut seen = HashSet::new();
        for (path, _) in &entries {
            if !seen.insert(path.as_str()) {
                return Err(RouteError::DuplicatePath(path.clone()));
            }
        }

        let table = RouteTable {
            entries: entries
                .into_iter()
                .map(|(path, target)| RouteEntry { path, target })
                .collect(),
            fallback,
        };

        // Every redirect must land on a page.
        let redirects: Vec<String> = table
            .entries
            .iter()
            .filter_map(|entry| match &entry.target {
                RouteTarget::Redirect(_) => Some(entry.path.clone()),
                RouteTarget::Page(_) => None,
            })
            .collect();
        for path in redirects {
            table.resolve(&path)?;
        }
        if matches!(table.fallback, RouteTarget::Redirect(_)) {
            table.resolve(CATCH_ALL)?;
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Page {
        Home,
        Config,
        Network,
    }

    fn table() -> RouteTable<Page> {
        RouteTable::builder()
            .page("home", Page::Home)
            .page("config", Page::Config)
            .page("network", Page::Network)
            .redirect(CATCH_ALL, "home")
            .build()
            .unwrap()
    }

    #[test]
    fn test_exact_path_resolves() {
        let table = table();
        let resolution = table.resolve("config").unwrap();
        assert_eq!(*resolution.page, Page::Config);
        assert_eq!(resolution.path, "config");
        assert!(!resolution.redirected);
    }

    #[test]
    fn test_unknown_path_goes_to_fallback() {
        let table = table();
        let unknown = table.resolve("/does-not-exist").unwrap();
        let home = table.resolve("home").unwrap();

        assert_eq!(unknown.page, home.page);
        assert_eq!(unknown.path, "home");
        assert!(unknown.redirected);
    }

    #[test]
    fn test_exact_entry_beats_fallback() {
        let table = RouteTable::builder()
            .page("network", Page::Network)
            .page(CATCH_ALL, Page::Home)
            .build()
            .unwrap();

        assert_eq!(*table.resolve("network").unwrap().page, Page::Network);
        let fallback = table.resolve("elsewhere").unwrap();
        assert_eq!(*fallback.page, Page::Home);
        assert_eq!(fallback.path, "elsewhere");
        assert!(!fallback.redirected);
    }

    #[test]
    fn test_normalizes_slashes_query_and_fragment() {
        let table = table();
        assert_eq!(*table.resolve("/network/?tab=algos#top").unwrap().page, Page::Network);
        assert_eq!(normalize_path("//config//"), "config");
        assert_eq!(normalize_path("/"), "");
    }

    #[test]
    fn test_build_validates_fallback() {
        let missing = RouteTable::builder().page("home", Page::Home).build();
        assert_eq!(missing.unwrap_err(), RouteError::MissingFallback);

        let not_last = RouteTable::builder()
            .redirect(CATCH_ALL, "home")
            .page("home", Page::Home)
            .build();
        assert_eq!(not_last.unwrap_err(), RouteError::FallbackNotLast);

        let two = RouteTable::builder()
            .page("home", Page::Home)
            .redirect(CATCH_ALL, "home")
            .redirect(CATCH_ALL, "home")
            .build();
        assert_eq!(two.unwrap_err(), RouteError::FallbackNotLast);
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let result = RouteTable::builder()
            .page("home", Page::Home)
            .page("/home/", Page::Config)
            .redirect(CATCH_ALL, "home")
            .build();
        assert_eq!(result.unwrap_err(), RouteError::DuplicatePath("home".to_string()));
    }

    #[test]
    fn test_build_rejects_redirect_loop() {
        let result = RouteTable::<Page>::builder()
            .redirect("a", "b")
            .redirect("b", "a")
            .page(CATCH_ALL, Page::Home)
            .build();
        assert!(matches!(result, Err(RouteError::RedirectLoop(_))));

        let result = RouteTable::<Page>::builder()
            .page("home", Page::Home)
            .redirect(CATCH_ALL, "nowhere")
            .build();
        assert!(matches!(result, Err(RouteError::RedirectLoop(_))));
    }

    #[test]
    fn test_redirect_entry_chains_to_page() {
        let table = RouteTable::builder()
            .redirect("", "home")
            .page("home", Page::Home)
            .redirect(CATCH_ALL, "home")
            .build()
            .unwrap();

        let root = table.resolve("/").unwrap();
        assert_eq!(*root.page, Page::Home);
        assert!(root.redirected);
        assert_eq!(table.paths().collect::<Vec<_>>(), vec!["", "home"]);
    }
}
