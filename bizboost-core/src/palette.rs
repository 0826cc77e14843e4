//! Color palette resolution.
//!
//! Every resolver here is total: unsupported input is coerced, never
//! rejected. The plain resolver always falls back to blue, independent of
//! the active template; store-level callers that need the template's own
//! default use [`resolve_color_or`].

use bizboost_model::{ColorResolution, ColorToken};

/// Fallback used by [`resolve_color`] for unsupported input.
pub const FALLBACK_COLOR: ColorToken = ColorToken::Blue;

pub fn resolve_color(candidate: &str) -> ColorToken {
    resolve_color_or(candidate, FALLBACK_COLOR)
}

pub fn resolve_color_or(candidate: &str, fallback: ColorToken) -> ColorToken {
    ColorToken::from_name(candidate).unwrap_or(fallback)
}

/// Like [`resolve_color`], but reports whether the input was substituted.
pub fn resolve_color_audited(candidate: &str) -> ColorResolution {
    match ColorToken::from_name(candidate) {
        Some(token) => ColorResolution::Valid(token),
        None => {
            tracing::debug!(
                original = candidate,
                fallback = %FALLBACK_COLOR,
                "coercing unsupported color"
            );
            ColorResolution::Coerced {
                token: FALLBACK_COLOR,
                original: candidate.to_string(),
            }
        }
    }
}
