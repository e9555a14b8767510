//! Declarative tween descriptions
//!
//! A [`Tween`] is the subset of style the page animates. Each field left as
//! `None` is not touched by the engine.

use serde::{Deserialize, Serialize};

/// Target style of a tween
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub opacity: Option<f64>,
    /// Horizontal offset in px
    pub x: Option<f64>,
    /// Vertical offset in px
    pub y: Option<f64>,
    /// Gaussian blur radius in px
    pub blur: Option<f64>,
    pub scale: Option<f64>,
    /// Rotation in degrees
    pub rotation: Option<f64>,
    /// Drop the engine's inline style overrides once the tween completes
    #[serde(default)]
    pub clear_props: bool,
}

impl Tween {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully visible, no offset, no blur
    pub fn settled() -> Self {
        Self::new().opacity(1.0).x(0.0).y(0.0).blur(0.0)
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn x(mut self, value: f64) -> Self {
        self.x = Some(value);
        self
    }

    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }

    pub fn blur(mut self, value: f64) -> Self {
        self.blur = Some(value);
        self
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn rotation(mut self, value: f64) -> Self {
        self.rotation = Some(value);
        self
    }

    pub fn clear_props(mut self) -> Self {
        self.clear_props = true;
        self
    }
}

/// Which end of the target list a stagger starts from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaggerFrom {
    #[default]
    Start,
    End,
}

impl StaggerFrom {
    /// Engine-facing name
    pub fn as_str(&self) -> &'static str {
        match self {
            StaggerFrom::Start => "start",
            StaggerFrom::End => "end",
        }
    }
}

/// Per-target delay between consecutive elements
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stagger {
    /// Seconds between consecutive targets
    pub each: f64,
    pub from: StaggerFrom,
}

/// Duration, easing and staggering of a tween
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Seconds
    pub duration: f64,
    /// Easing curve name understood by the engine (e.g. `power2.out`)
    pub ease: String,
    pub stagger: Option<Stagger>,
}

impl Timing {
    pub fn new(duration: f64, ease: impl Into<String>) -> Self {
        Self {
            duration,
            ease: ease.into(),
            stagger: None,
        }
    }

    pub fn stagger(mut self, each: f64, from: StaggerFrom) -> Self {
        self.stagger = Some(Stagger { each, from });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_clears_offsets() {
        let tween = Tween::settled();
        assert_eq!(tween.opacity, Some(1.0));
        assert_eq!(tween.x, Some(0.0));
        assert_eq!(tween.y, Some(0.0));
        assert_eq!(tween.blur, Some(0.0));
        assert!(tween.scale.is_none());
        assert!(!tween.clear_props);
    }

    #[test]
    fn test_stagger_from_names() {
        assert_eq!(StaggerFrom::Start.as_str(), "start");
        assert_eq!(StaggerFrom::End.as_str(), "end");
    }
}
