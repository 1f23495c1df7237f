//! Client-side navigation between the three pages.

use std::fmt;

use strum::EnumIter;
use tokio::sync::watch;
use tracing::info;

use crate::binding::FormEvent;
use crate::element::Shared;

/// The pages the backend serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter)]
pub enum Location {
    #[default]
    Home,
    Register,
    SignIn,
}

impl Location {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Register => "/register/",
            Self::SignIn => "/sign-in/",
        }
    }

    /// Resolve a path, with or without its trailing slash.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Self::Home),
            "/register" => Some(Self::Register),
            "/sign-in" => Some(Self::SignIn),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Register => "Register",
            Self::SignIn => "Sign In",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Holds the current location.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Shared<Location>,
}

impl Navigator {
    pub fn new(start: Location) -> Self {
        Self {
            current: Shared::new(start),
        }
    }

    pub fn current(&self) -> Location {
        self.current.get()
    }

    pub fn navigate(&self, to: Location) {
        let from = self.current();
        if from != to {
            info!(%from, %to, "navigate");
            self.current.set(to);
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Location> {
        self.current.subscribe()
    }

    /// Swallow the default form action and go to the sign-in page.
    pub fn redirect_to_sign_in(&self, event: &mut FormEvent) {
        event.prevent_default();
        self.navigate(Location::SignIn);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Location::Home)
    }
}

/// A navigation marker: an entry that is highlighted while its target is
/// the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub target: Location,
}

impl NavLink {
    pub fn new(target: Location) -> Self {
        Self { target }
    }

    pub fn is_current(self, navigator: &Navigator) -> bool {
        navigator.current() == self.target
    }

    pub fn label(self) -> &'static str {
        self.target.title()
    }
}

/// One marker per page, in display order.
pub fn nav_links() -> Vec<NavLink> {
    use strum::IntoEnumIterator;
    Location::iter().map(NavLink::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::EventKind;
    use crate::element::ElementId;

    #[test]
    fn paths_round_trip() {
        for link in nav_links() {
            assert_eq!(Location::from_path(link.target.path()), Some(link.target));
        }
        assert_eq!(Location::from_path("/sign-in"), Some(Location::SignIn));
        assert_eq!(Location::from_path("/admin/"), None);
    }

    #[test]
    fn redirect_prevents_default_and_moves_to_sign_in() {
        let navigator = Navigator::new(Location::Register);
        let mut event = FormEvent::new(ElementId::GoToSignInButton, EventKind::Click);

        navigator.redirect_to_sign_in(&mut event);

        assert!(event.default_prevented());
        assert_eq!(navigator.current(), Location::SignIn);
    }

    #[test]
    fn exactly_one_marker_is_highlighted() {
        let navigator = Navigator::new(Location::Register);
        let active: Vec<NavLink> = nav_links()
            .into_iter()
            .filter(|l| l.is_current(&navigator))
            .collect();
        assert_eq!(active, vec![NavLink::new(Location::Register)]);
    }
}
