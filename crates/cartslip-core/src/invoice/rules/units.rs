//! Package size extraction from free-form product names.
//!
//! Names are matched lowercased against three pattern tiers; the first tier
//! that matches anywhere in the name wins:
//!
//! 1. parenthetical size, `(1kg)`, `(6 pcs)`
//! 2. inline size, `500g`, `1 l`, `2 pack`
//! 3. standalone size bounded by word boundaries, `6pcs`
//!
//! A name without any size token is one piece of unspecified size.

use regex::Regex;

use super::patterns::{UNIT_INLINE, UNIT_PARENTHETICAL, UNIT_STANDALONE};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::invoice::Unit;

/// Size of one purchased package, in canonical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackageSize {
    pub value: f64,
    pub unit: Unit,
}

impl PackageSize {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Normalize a matched number and unit token: kilograms and litres are
    /// scaled to grams and millilitres, `pcs` collapses to `pc`.
    fn from_token(value: f64, token: &str) -> Option<Self> {
        let size = match token {
            "kg" => Self::new(value * 1000.0, Unit::G),
            "l" => Self::new(value * 1000.0, Unit::Ml),
            "g" => Self::new(value, Unit::G),
            "ml" => Self::new(value, Unit::Ml),
            "pc" | "pcs" => Self::new(value, Unit::Pc),
            "pack" => Self::new(value, Unit::Pack),
            "set" => Self::new(value, Unit::Set),
            "bundle" => Self::new(value, Unit::Bundle),
            _ => return None,
        };
        Some(size)
    }
}

impl Default for PackageSize {
    fn default() -> Self {
        Self::new(1.0, Unit::Pcs)
    }
}

/// Pattern tier that produced a package size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitTier {
    Parenthetical,
    Inline,
    Standalone,
    /// No tier matched.
    Default,
}

impl UnitTier {
    /// Tiers that carry a pattern, in evaluation order.
    pub const MATCHING: [UnitTier; 3] = [
        UnitTier::Parenthetical,
        UnitTier::Inline,
        UnitTier::Standalone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitTier::Parenthetical => "parenthetical",
            UnitTier::Inline => "inline",
            UnitTier::Standalone => "standalone",
            UnitTier::Default => "default",
        }
    }

    fn pattern(&self) -> Option<&'static Regex> {
        match self {
            UnitTier::Parenthetical => Some(&*UNIT_PARENTHETICAL),
            UnitTier::Inline => Some(&*UNIT_INLINE),
            UnitTier::Standalone => Some(&*UNIT_STANDALONE),
            UnitTier::Default => None,
        }
    }

    /// Leftmost match of this tier in an already lowercased name.
    fn first_match(&self, lower: &str) -> Option<ExtractionMatch<PackageSize>> {
        let caps = self.pattern()?.captures(lower)?;
        let whole = caps.get(0)?;
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        let size = PackageSize::from_token(value, caps.get(2)?.as_str())?;

        Some(ExtractionMatch::new(size, whole.as_str()).with_position(whole.start(), whole.end()))
    }
}

/// A package size match and the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitMatch {
    pub size: ExtractionMatch<PackageSize>,
    pub tier: UnitTier,
}

/// Package size extractor.
///
/// Match positions refer to the lowercased name.
pub struct UnitExtractor;

impl UnitExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the package size of a name together with the tier that
    /// produced it, falling back to one piece.
    pub fn resolve(&self, name: &str) -> (PackageSize, UnitTier) {
        self.extract(name)
            .map(|m| (m.size.value, m.tier))
            .unwrap_or((PackageSize::default(), UnitTier::Default))
    }
}

impl Default for UnitExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for UnitExtractor {
    type Output = UnitMatch;

    /// First tier with a match wins, leftmost match within that tier.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lower = text.to_lowercase();
        UnitTier::MATCHING.iter().find_map(|tier| {
            tier.first_match(&lower).map(|size| UnitMatch { size, tier: *tier })
        })
    }
}

/// Parse the package size embedded in a product name.
pub fn parse_unit_and_value(name: &str) -> PackageSize {
    UnitExtractor::new().resolve(name).0
}
