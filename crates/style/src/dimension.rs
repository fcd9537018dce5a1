//! Relative dimensions and the algebra that resolves them into concrete extents.
use crate::parsers::{self, DimensionError};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use trellis_types::Size;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum DimensionUnit {
    /// No opinion; resolves to whatever fallback the caller supplies.
    #[default]
    Auto,
    /// An absolute extent that resolves to exactly its value.
    Points,
    /// A share of the parent extent in `[0, 1]`.
    Fraction,
}

impl fmt::Display for DimensionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionUnit::Auto => f.write_str("auto"),
            DimensionUnit::Points => f.write_str("points"),
            DimensionUnit::Fraction => f.write_str("fraction"),
        }
    }
}

/// A validated `(unit, value)` pair.
///
/// The invariants are checked once at construction:
/// `Auto` carries `0`, `Points` a finite non-negative value and `Fraction`
/// a value in `[0, 1]`. A `Dimension` can therefore be shared freely and
/// resolved without further checks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimension {
    unit: DimensionUnit,
    value: f32,
}

impl Eq for Dimension {}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit.hash(state);
        self.value.to_bits().hash(state);
    }
}

impl Dimension {
    pub const AUTO: Dimension = Dimension {
        unit: DimensionUnit::Auto,
        value: 0.0,
    };

    /// Builds a dimension, reporting which invariant was violated.
    pub fn try_new(unit: DimensionUnit, value: f32) -> Result<Self, DimensionError> {
        let valid = match unit {
            DimensionUnit::Auto => value == 0.0,
            DimensionUnit::Points => value.is_finite() && value >= 0.0,
            DimensionUnit::Fraction => (0.0..=1.0).contains(&value),
        };
        if !valid {
            return Err(DimensionError::InvalidValue { unit, value });
        }
        // Folds -0.0 into 0.0 so that equal values hash equally.
        Ok(Self {
            unit,
            value: value + 0.0,
        })
    }

    /// Builds a dimension from trusted layout code.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not valid for `unit`.
    pub fn new(unit: DimensionUnit, value: f32) -> Self {
        match Self::try_new(unit, value) {
            Ok(dimension) => dimension,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn points(points: f32) -> Self {
        Self::new(DimensionUnit::Points, points)
    }

    pub fn fraction(fraction: f32) -> Self {
        Self::new(DimensionUnit::Fraction, fraction)
    }

    /// Parses `"50%"`, `"12pt"`, `"12"` or `"auto"`.
    pub fn parse(text: &str) -> Result<Self, DimensionError> {
        parsers::parse_dimension_str(text)
    }

    pub fn unit(&self) -> DimensionUnit {
        self.unit
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_auto(&self) -> bool {
        self.unit == DimensionUnit::Auto
    }

    /// Resolves against a parent extent, substituting `auto_extent` for `Auto`.
    ///
    /// A non-zero fraction of an infinite parent is infinite. A zero fraction
    /// is always zero, even against an infinite parent.
    pub fn resolve(&self, parent_extent: f32, auto_extent: f32) -> f32 {
        match self.unit {
            DimensionUnit::Auto => auto_extent,
            DimensionUnit::Points => self.value,
            DimensionUnit::Fraction if self.value == 0.0 => 0.0,
            DimensionUnit::Fraction => self.value * parent_extent,
        }
    }
}

impl From<f32> for Dimension {
    fn from(points: f32) -> Self {
        Dimension::points(points)
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::parse(s)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DimensionUnit::Auto => f.write_str("auto"),
            DimensionUnit::Points => write!(f, "{}pt", self.value),
            DimensionUnit::Fraction => write!(f, "{}%", percent_text(self.value)),
        }
    }
}

/// Formats a fraction as a percentage by moving the decimal point of its
/// shortest round-trip text two places right. Parsing the result yields the
/// same bits; multiplying by 100 in floating point would not.
fn percent_text(fraction: f32) -> String {
    let text = fraction.to_string();
    let (whole, decimals) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let decimals = format!("{decimals:0<2}");
    let (moved, rest) = decimals.split_at(2);
    let digits = format!("{whole}{moved}");
    let digits = match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    if rest.is_empty() {
        digits.to_string()
    } else {
        format!("{digits}.{rest}")
    }
}

impl Serialize for Dimension {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DimensionVisitor;
        impl de::Visitor<'_> for DimensionVisitor {
            type Value = Dimension;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string like '50%', '12pt' or 'auto', or a number of points")
            }

            fn visit_str<E>(self, value: &str) -> Result<Dimension, E>
            where
                E: de::Error,
            {
                Dimension::parse(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Dimension, E>
            where
                E: de::Error,
            {
                Dimension::try_new(DimensionUnit::Points, value as f32).map_err(E::custom)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Dimension, E>
            where
                E: de::Error,
            {
                self.visit_f64(value as f64)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Dimension, E>
            where
                E: de::Error,
            {
                self.visit_f64(value as f64)
            }
        }
        deserializer.deserialize_any(DimensionVisitor)
    }
}

/// A pair of dimensions, resolved independently per axis.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayoutSize {
    pub width: Dimension,
    pub height: Dimension,
}

impl LayoutSize {
    pub const AUTO: LayoutSize = LayoutSize {
        width: Dimension::AUTO,
        height: Dimension::AUTO,
    };

    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }

    pub fn resolve(&self, parent_size: Size, auto_size: Size) -> Size {
        Size::new(
            self.width.resolve(parent_size.width, auto_size.width),
            self.height.resolve(parent_size.height, auto_size.height),
        )
    }
}

impl fmt::Display for LayoutSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.width, self.height)
    }
}

pub fn resolve_dimension(dimension: Dimension, parent_extent: f32, auto_extent: f32) -> f32 {
    dimension.resolve(parent_extent, auto_extent)
}

pub fn resolve_size(layout_size: LayoutSize, parent_size: Size, auto_size: Size) -> Size {
    layout_size.resolve(parent_size, auto_size)
}
