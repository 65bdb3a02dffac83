//! Fragment route guard.

use crate::config::CatalogConfig;
use crate::nav::history::route_of;
use url::Url;

/// Outcome of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allowed(String),
    Redirect { route: String, destination: String },
}

/// Static allow-list check for fragment routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: Vec<String>,
    not_found: String,
}

impl RouteGuard {
    pub fn new(allowed: Vec<String>, not_found: impl Into<String>) -> Self {
        Self {
            allowed,
            not_found: not_found.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            config.allowed_routes.clone(),
            config.not_found_destination.clone(),
        )
    }

    /// Reads the fragment of `url` (empty means `/`) and decides whether it
    /// may stay.
    pub fn check(&self, url: &Url) -> RouteDecision {
        let route = route_of(url);
        if self.allowed.iter().any(|known| *known == route) {
            RouteDecision::Allowed(route)
        } else {
            RouteDecision::Redirect {
                route,
                destination: self.not_found.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteDecision, RouteGuard};
    use crate::config::CatalogConfig;
    use url::Url;

    fn check(raw: &str) -> RouteDecision {
        let guard = RouteGuard::from_config(&CatalogConfig::default());
        guard.check(&Url::parse(raw).expect("valid url"))
    }

    #[test]
    fn missing_or_empty_fragment_is_root() {
        assert_eq!(
            check("https://pantheon.test/index.html"),
            RouteDecision::Allowed("/".to_string())
        );
        assert_eq!(
            check("https://pantheon.test/index.html#"),
            RouteDecision::Allowed("/".to_string())
        );
    }

    #[test]
    fn known_routes_are_allowed() {
        assert_eq!(
            check("https://pantheon.test/#/characters"),
            RouteDecision::Allowed("/characters".to_string())
        );
        assert_eq!(
            check("https://pantheon.test/?character=zeus-01#/about"),
            RouteDecision::Allowed("/about".to_string())
        );
    }

    #[test]
    fn unknown_routes_redirect_to_not_found() {
        assert_eq!(
            check("https://pantheon.test/#/olympus"),
            RouteDecision::Redirect {
                route: "/olympus".to_string(),
                destination: "404.html".to_string(),
            }
        );
        assert!(matches!(
            check("https://pantheon.test/#characters"),
            RouteDecision::Redirect { .. }
        ));
    }
}
