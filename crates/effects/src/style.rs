//! Style changes: the output of every DOM-facing effect.
//!
//! Effects never touch elements directly. They return [`StyleChange`] values
//! naming a target element, a CSS property, and the value to assign; the host
//! applies them.

use serde::Serialize;
use std::fmt;

/// The element a style change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum StyleTarget {
    Orb,
    /// An app card, by document order.
    Card(usize),
    Flame,
    FlameGlow,
}

impl StyleTarget {
    /// CSS selector matching the target's element class.
    pub fn selector(&self) -> &'static str {
        match self {
            StyleTarget::Orb => crate::selectors::ORB,
            StyleTarget::Card(_) => crate::selectors::APP_CARD,
            StyleTarget::Flame => crate::selectors::FLAME,
            StyleTarget::FlameGlow => crate::selectors::FLAME_GLOW,
        }
    }
}

impl fmt::Display for StyleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleTarget::Card(i) => write!(f, "{}[{i}]", self.selector()),
            other => f.write_str(other.selector()),
        }
    }
}

/// A CSS property an effect writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Transform,
    Opacity,
    Transition,
    /// A custom property such as `--mouse-x`, set with `setProperty`.
    Custom(&'static str),
}

impl StyleProperty {
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::Transform => "transform",
            StyleProperty::Opacity => "opacity",
            StyleProperty::Transition => "transition",
            StyleProperty::Custom(name) => name,
        }
    }
}

impl Serialize for StyleProperty {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.css_name())
    }
}

/// The CSS transforms the effects produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// `translateY({px}px)`
    TranslateY(f64),
    /// `translateY({px}px) scale({scale})`
    Lift { px: f64, scale: f64 },
    /// `translateY(0)`
    Rest,
    /// `translateY(0) scale(1)`
    RestScaled,
    /// `translateX(-50%) scale({scale}) rotate({rotate_deg}deg)`
    Flicker { scale: f64, rotate_deg: f64 },
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Transform::TranslateY(px) => write!(f, "translateY({px}px)"),
            Transform::Lift { px, scale } => write!(f, "translateY({px}px) scale({scale})"),
            Transform::Rest => f.write_str("translateY(0)"),
            Transform::RestScaled => f.write_str("translateY(0) scale(1)"),
            Transform::Flicker { scale, rotate_deg } => {
                write!(f, "translateX(-50%) scale({scale}) rotate({rotate_deg}deg)")
            }
        }
    }
}

/// One property assignment on one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleChange {
    pub target: StyleTarget,
    pub property: StyleProperty,
    pub value: String,
}

impl StyleChange {
    pub fn transform(target: StyleTarget, transform: Transform) -> Self {
        Self {
            target,
            property: StyleProperty::Transform,
            value: transform.to_string(),
        }
    }

    pub fn opacity(target: StyleTarget, opacity: f64) -> Self {
        Self {
            target,
            property: StyleProperty::Opacity,
            value: opacity.to_string(),
        }
    }

    pub fn transition(target: StyleTarget, value: String) -> Self {
        Self {
            target,
            property: StyleProperty::Transition,
            value,
        }
    }

    pub fn custom(target: StyleTarget, name: &'static str, value: String) -> Self {
        Self {
            target,
            property: StyleProperty::Custom(name),
            value,
        }
    }
}

impl fmt::Display for StyleChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.target, self.property.css_name(), self.value)
    }
}
