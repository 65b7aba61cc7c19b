//! Password strength meter
//!
//! Scores a password 0-5 from five independent signals and maps the score
//! onto three display tiers. Independent of [`super::is_valid_password`]: a
//! password can be accepted and still show as weak.

use serde::Serialize;

/// Number of segments in the strength bar
pub const SEGMENT_COUNT: usize = 3;

/// Colour of an unfilled segment
pub const EMPTY_SEGMENT_COLOR: &str = "#e2e8f0";

/// Display tier of a strength score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthTier {
    /// Score 0-2
    Weak,
    /// Score 3-4
    Moderate,
    /// Score 5
    Strong,
}

impl StrengthTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => StrengthTier::Weak,
            3..=4 => StrengthTier::Moderate,
            _ => StrengthTier::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthTier::Weak => "Weak",
            StrengthTier::Moderate => "Moderate",
            StrengthTier::Strong => "Strong",
        }
    }

    /// Colour for the label and the filled segments
    pub fn color(&self) -> &'static str {
        match self {
            StrengthTier::Weak => "#ef4444",
            StrengthTier::Moderate => "#f59e0b",
            StrengthTier::Strong => "#10b981",
        }
    }

    /// How many of the [`SEGMENT_COUNT`] segments are filled
    pub fn filled_segments(&self) -> usize {
        match self {
            StrengthTier::Weak => 1,
            StrengthTier::Moderate => 2,
            StrengthTier::Strong => SEGMENT_COUNT,
        }
    }
}

impl std::fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scored password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub tier: StrengthTier,
}

impl PasswordStrength {
    /// Score `password`. One point each for: at least 8 UTF-16 code units, at
    /// least 12 code units, an uppercase ASCII letter, an ASCII digit, and any
    /// character outside `[A-Za-z0-9]`.
    pub fn of(password: &str) -> Self {
        let len = super::utf16_len(password);
        let signals = [
            len >= 8,
            len >= 12,
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];

        let score = signals.iter().filter(|s| **s).count() as u8;
        Self {
            score,
            tier: StrengthTier::from_score(score),
        }
    }

    /// Colour of each segment, left to right
    pub fn segment_colors(&self) -> [&'static str; SEGMENT_COUNT] {
        let filled = self.tier.filled_segments();
        let mut colors = [EMPTY_SEGMENT_COLOR; SEGMENT_COUNT];
        for color in colors.iter_mut().take(filled) {
            *color = self.tier.color();
        }
        colors
    }
}
