//! Floating styles - CSS projection of the position result.

use std::fmt;

use crate::element::ElementRef;
use crate::types::{PositionData, Strategy};
use crate::utils::{get_dpr, round_by_dpr};

/// Ratio from which `will-change: transform` is emitted.
const WILL_CHANGE_DPR: f64 = 1.5;

/// CSS properties to apply to the floating element.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingStyles {
    pub position: Strategy,
    pub top: String,
    pub left: String,
    pub transform: Option<String>,
    pub will_change: Option<String>,
}

impl FloatingStyles {
    /// Styles before a floating element exists.
    pub fn initial(strategy: Strategy, transform: bool) -> Self {
        Self {
            position: strategy,
            top: px(0.0),
            left: px(0.0),
            transform: Some(if transform {
                translate(0.0, 0.0)
            } else {
                "none".to_string()
            }),
            will_change: None,
        }
    }

    /// `(property, value)` pairs in CSS property names.
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        let mut props = vec![
            ("position", self.position.as_str().to_string()),
            ("top", self.top.clone()),
            ("left", self.left.clone()),
        ];
        if let Some(transform) = &self.transform {
            props.push(("transform", transform.clone()));
        }
        if let Some(will_change) = &self.will_change {
            props.push(("will-change", will_change.clone()));
        }
        props
    }

    /// Value of a single CSS property.
    pub fn get(&self, property: &str) -> Option<String> {
        self.properties()
            .into_iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for FloatingStyles {
    /// Inline style text: `position: absolute; top: 0px; left: 0px`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in self.properties() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", name, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Project a position result into floating element styles.
///
/// With `transform` the element stays at the origin and is moved with
/// `translate()`, rounded to the floating element's device pixel grid.
/// Otherwise `top`/`left` carry the coordinates as computed.
pub fn compute_floating_styles(
    data: &PositionData,
    transform: bool,
    floating: Option<&ElementRef>,
) -> FloatingStyles {
    let Some(floating) = floating else {
        return FloatingStyles::initial(data.strategy, transform);
    };

    if transform {
        let x = round_by_dpr(floating, data.x);
        let y = round_by_dpr(floating, data.y);
        FloatingStyles {
            position: data.strategy,
            top: px(0.0),
            left: px(0.0),
            transform: Some(translate(x, y)),
            will_change: (get_dpr(floating) >= WILL_CHANGE_DPR).then(|| "transform".to_string()),
        }
    } else {
        FloatingStyles {
            position: data.strategy,
            top: px(data.y),
            left: px(data.x),
            transform: None,
            will_change: None,
        }
    }
}

fn px(value: f64) -> String {
    // Avoid "-0px"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}px", value)
}

fn translate(x: f64, y: f64) -> String {
    format!("translate({}, {})", px(x), px(y))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::types::{Placement, Rect};

    struct Screen(f64);

    impl Element for Screen {
        fn bounding_client_rect(&self) -> Rect {
            Rect::default()
        }

        fn device_pixel_ratio(&self) -> f64 {
            self.0
        }
    }

    fn positioned(x: f64, y: f64) -> PositionData {
        PositionData {
            x,
            y,
            is_positioned: true,
            ..PositionData::initial(Placement::Bottom, Strategy::Absolute)
        }
    }

    #[test]
    fn test_initial_styles_with_transform() {
        let styles = FloatingStyles::initial(Strategy::Absolute, true);
        assert_eq!(styles.get("position").as_deref(), Some("absolute"));
        assert_eq!(styles.get("top").as_deref(), Some("0px"));
        assert_eq!(styles.get("left").as_deref(), Some("0px"));
        assert_eq!(styles.get("transform").as_deref(), Some("translate(0px, 0px)"));
    }

    #[test]
    fn test_initial_styles_without_transform() {
        let styles = FloatingStyles::initial(Strategy::Fixed, false);
        assert_eq!(styles.position, Strategy::Fixed);
        assert_eq!(styles.transform.as_deref(), Some("none"));
    }

    #[test]
    fn test_no_floating_element_uses_initial() {
        let styles = compute_floating_styles(&positioned(25.0, 50.0), true, None);
        assert_eq!(styles, FloatingStyles::initial(Strategy::Absolute, true));
    }

    #[test]
    fn test_transform_styles() {
        let floating = ElementRef::new(Screen(1.0));
        let styles = compute_floating_styles(&positioned(25.0, 50.0), true, Some(&floating));

        assert_eq!(styles.top, "0px");
        assert_eq!(styles.left, "0px");
        assert_eq!(styles.transform.as_deref(), Some("translate(25px, 50px)"));
        assert_eq!(styles.will_change, None);
    }

    #[test]
    fn test_top_left_styles() {
        let floating = ElementRef::new(Screen(1.0));
        let styles = compute_floating_styles(&positioned(25.0, 50.0), false, Some(&floating));

        assert_eq!(styles.top, "50px");
        assert_eq!(styles.left, "25px");
        assert_eq!(styles.transform, None);
        assert_eq!(styles.to_string(), "position: absolute; top: 50px; left: 25px");
    }

    #[test]
    fn test_top_left_keeps_fractional_coordinates() {
        let floating = ElementRef::new(Screen(2.0));
        let data = positioned(12.75, 10.3);

        let styles = compute_floating_styles(&data, false, Some(&floating));
        assert_eq!(styles.left, "12.75px");
        assert_eq!(styles.top, "10.3px");

        let styles = compute_floating_styles(&data, true, Some(&floating));
        assert_eq!(styles.transform.as_deref(), Some("translate(13px, 10.5px)"));
    }

    #[test]
    fn test_high_dpr_adds_will_change() {
        let floating = ElementRef::new(Screen(2.0));
        let styles = compute_floating_styles(&positioned(10.3, 4.0), true, Some(&floating));

        assert_eq!(styles.transform.as_deref(), Some("translate(10.5px, 4px)"));
        assert_eq!(styles.will_change.as_deref(), Some("transform"));
        assert_eq!(styles.get("will-change").as_deref(), Some("transform"));
    }

    #[test]
    fn test_negative_zero_is_printed_as_zero() {
        let floating = ElementRef::new(Screen(1.0));
        let styles = compute_floating_styles(&positioned(-0.2, 0.0), false, Some(&floating));
        assert_eq!(styles.left, "0px");
    }
}
