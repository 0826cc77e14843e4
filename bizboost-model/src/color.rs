use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Supported color identifiers.
///
/// The set is closed: anything else a user or a stored record provides has to
/// be coerced onto one of these before it reaches the theme state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorToken {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Pink,
    Indigo,
    Gray,
    Black,
    White,
    Teal,
    Orange,
    Amber,
}

impl ColorToken {
    pub const ALL: [ColorToken; 13] = [
        ColorToken::Blue,
        ColorToken::Red,
        ColorToken::Green,
        ColorToken::Yellow,
        ColorToken::Purple,
        ColorToken::Pink,
        ColorToken::Indigo,
        ColorToken::Gray,
        ColorToken::Black,
        ColorToken::White,
        ColorToken::Teal,
        ColorToken::Orange,
        ColorToken::Amber,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ColorToken::Blue => "blue",
            ColorToken::Red => "red",
            ColorToken::Green => "green",
            ColorToken::Yellow => "yellow",
            ColorToken::Purple => "purple",
            ColorToken::Pink => "pink",
            ColorToken::Indigo => "indigo",
            ColorToken::Gray => "gray",
            ColorToken::Black => "black",
            ColorToken::White => "white",
            ColorToken::Teal => "teal",
            ColorToken::Orange => "orange",
            ColorToken::Amber => "amber",
        }
    }

    /// Exact-match lookup. Case and surrounding whitespace are significant.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.as_str() == name)
    }
}

impl Display for ColorToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorToken {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| ModelError::UnknownColor(s.to_string()))
    }
}

/// Result of resolving free text against the supported color set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorResolution {
    /// The input already named a supported color.
    Valid(ColorToken),
    /// The input was unsupported and `token` was substituted.
    Coerced { token: ColorToken, original: String },
}

impl ColorResolution {
    pub fn token(&self) -> ColorToken {
        match self {
            ColorResolution::Valid(token) => *token,
            ColorResolution::Coerced { token, .. } => *token,
        }
    }

    pub fn was_coerced(&self) -> bool {
        matches!(self, ColorResolution::Coerced { .. })
    }
}

/// Primary and secondary colors of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorPair {
    pub primary: ColorToken,
    pub secondary: ColorToken,
}

impl ColorPair {
    /// Palette used outside any template context (marketing pages).
    pub const UNSCOPED: ColorPair =
        ColorPair::new(ColorToken::Blue, ColorToken::Orange);

    pub const fn new(primary: ColorToken, secondary: ColorToken) -> Self {
        Self { primary, secondary }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::UNSCOPED
    }
}

/// Partial color change applied to a stored record.
///
/// `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorUpdate {
    pub primary: Option<ColorToken>,
    pub secondary: Option<ColorToken>,
}

impl ColorUpdate {
    pub fn primary(color: ColorToken) -> Self {
        Self {
            primary: Some(color),
            secondary: None,
        }
    }

    pub fn secondary(color: ColorToken) -> Self {
        Self {
            primary: None,
            secondary: Some(color),
        }
    }

    pub fn both(colors: ColorPair) -> Self {
        Self {
            primary: Some(colors.primary),
            secondary: Some(colors.secondary),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

impl From<ColorPair> for ColorUpdate {
    fn from(colors: ColorPair) -> Self {
        Self::both(colors)
    }
}

/// Raw color fields as found in a persisted record or session blob.
///
/// Empty strings are treated as unset, matching how the front-end checks
/// these fields for truthiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoredColors<'a> {
    pub primary: Option<&'a str>,
    pub secondary: Option<&'a str>,
}

impl<'a> StoredColors<'a> {
    pub fn new(primary: Option<&'a str>, secondary: Option<&'a str>) -> Self {
        Self {
            primary: primary.filter(|raw| !raw.is_empty()),
            secondary: secondary.filter(|raw| !raw.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_round_trips_through_its_name() {
        for token in ColorToken::ALL {
            assert_eq!(ColorToken::from_name(token.as_str()), Some(token));
            assert_eq!(token.as_str().parse::<ColorToken>(), Ok(token));
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(ColorToken::from_name("Blue"), None);
        assert_eq!(ColorToken::from_name(" red"), None);
        assert_eq!(ColorToken::from_name("cyan"), None);
        assert!(matches!(
            "cyan".parse::<ColorToken>(),
            Err(ModelError::UnknownColor(raw)) if raw == "cyan"
        ));
    }

    #[test]
    fn stored_colors_ignore_empty_strings() {
        let stored = StoredColors::new(Some(""), Some("teal"));
        assert_eq!(stored.primary, None);
        assert_eq!(stored.secondary, Some("teal"));
        assert!(StoredColors::new(Some(""), None).is_empty());
    }
}
