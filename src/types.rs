//! Core types for spark-floating.
//!
//! These are the values that flow between the caller, the binding and the
//! position engine: placements, strategies, rects, middleware data and the
//! published position result.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::FloatingError;

// =============================================================================
// Placement
// =============================================================================

/// Side of the reference element the floating element is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Alignment of the floating element along the placement side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    End,
}

/// Where the floating element sits relative to the reference element.
///
/// All 12 compass placements. `Bottom` (centered, below) is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Placement {
    Top,
    TopStart,
    TopEnd,
    Right,
    RightStart,
    RightEnd,
    #[default]
    Bottom,
    BottomStart,
    BottomEnd,
    Left,
    LeftStart,
    LeftEnd,
}

impl Placement {
    /// Every placement, in declaration order.
    pub const ALL: [Placement; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
    ];

    /// Kebab-case name (`"top-start"`, `"bottom"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
        }
    }

    pub const fn side(&self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Right | Self::RightStart | Self::RightEnd => Side::Right,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Side::Left,
        }
    }

    /// `None` for the centered placements.
    pub const fn alignment(&self) -> Option<Alignment> {
        match self {
            Self::TopStart | Self::RightStart | Self::BottomStart | Self::LeftStart => {
                Some(Alignment::Start)
            }
            Self::TopEnd | Self::RightEnd | Self::BottomEnd | Self::LeftEnd => Some(Alignment::End),
            _ => None,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = FloatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| FloatingError::InvalidPlacement(s.to_string()))
    }
}

// =============================================================================
// Strategy
// =============================================================================

/// CSS positioning mode of the floating element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strategy {
    #[default]
    Absolute,
    Fixed,
}

impl Strategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = FloatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absolute" => Ok(Self::Absolute),
            "fixed" => Ok(Self::Fixed),
            other => Err(FloatingError::InvalidStrategy(other.to_string())),
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// An axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The rects the engine measured for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRects {
    pub reference: Rect,
    pub floating: Rect,
}

// =============================================================================
// Middleware Data
// =============================================================================

/// Output of a single middleware: named numeric fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MiddlewareOutput(BTreeMap<String, f64>);

impl MiddlewareOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Per-middleware outputs of one computation, keyed by middleware name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MiddlewareData(BTreeMap<String, MiddlewareOutput>);

impl MiddlewareData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, output: MiddlewareOutput) {
        self.0.insert(name.into(), output);
    }

    pub fn get(&self, name: &str) -> Option<&MiddlewareOutput> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MiddlewareOutput)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Arrow offsets, if an `arrow` middleware ran and reported a center offset.
    pub fn arrow(&self) -> Option<ArrowData> {
        let output = self.get(ArrowData::MIDDLEWARE_NAME)?;
        Some(ArrowData {
            x: output.get("x"),
            y: output.get("y"),
            center_offset: output.get("center_offset")?,
            alignment_offset: output.get("alignment_offset"),
        })
    }
}

/// Arrow element offsets reported by the `arrow` middleware.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArrowData {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub center_offset: f64,
    pub alignment_offset: Option<f64>,
}

impl ArrowData {
    pub const MIDDLEWARE_NAME: &'static str = "arrow";
}

// =============================================================================
// Position Data
// =============================================================================

/// The published position result.
///
/// Replaced as a whole on every successful computation so readers never see
/// a mix of two results.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionData {
    pub x: f64,
    pub y: f64,
    pub placement: Placement,
    pub strategy: Strategy,
    pub middleware_data: MiddlewareData,
    pub arrow: Option<ArrowData>,
    pub is_positioned: bool,
}

impl PositionData {
    /// Result before any computation: origin, not positioned.
    pub fn initial(placement: Placement, strategy: Strategy) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            placement,
            strategy,
            middleware_data: MiddlewareData::new(),
            arrow: None,
            is_positioned: false,
        }
    }
}

impl Default for PositionData {
    fn default() -> Self {
        Self::initial(Placement::default(), Strategy::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
