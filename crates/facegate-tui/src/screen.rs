//! Screen identifiers and their page locations.

use std::fmt;

use facegate_core::Location;

/// Each page of the front end, navigable by number keys 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Home, // 1
    Register, // 2
    SignIn,   // 3
}

impl ScreenId {
    /// All screens in nav-bar order.
    pub const ALL: [ScreenId; 3] = [Self::Home, Self::Register, Self::SignIn];

    pub fn number(self) -> u8 {
        match self {
            Self::Home => 1,
            Self::Register => 2,
            Self::SignIn => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Home),
            2 => Some(Self::Register),
            3 => Some(Self::SignIn),
            _ => None,
        }
    }

    pub fn location(self) -> Location {
        match self {
            Self::Home => Location::Home,
            Self::Register => Location::Register,
            Self::SignIn => Location::SignIn,
        }
    }

    pub fn label(self) -> &'static str {
        self.location().title()
    }
}

impl From<Location> for ScreenId {
    fn from(location: Location) -> Self {
        match location {
            Location::Home => Self::Home,
            Location::Register => Self::Register,
            Location::SignIn => Self::SignIn,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
