//! Page configuration
//!
//! Every id, marker attribute, selector and timing constant the page
//! depends on lives here, so the transition logic never spells out a
//! literal. All fields default to the values the shipped markup uses; a
//! JSON document may override any subset of them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vitrina_ports::{StaggerFrom, Timing, Tween};

use crate::error::ConfigError;

/// Fixed element ids
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    /// Home content container (also the main content region)
    pub home: String,
    /// Project-detail container, hidden while on home
    pub project_space: String,
    /// Parent of the built project fragment
    pub project_content: String,
    /// The "back" control
    pub back: String,
    pub footer: String,
    pub project_list: String,
    pub logo: String,
    pub nav_links: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            home: "contenido".to_string(),
            project_space: "espacio-proyecto".to_string(),
            project_content: "contenido-proyecto".to_string(),
            back: "volver".to_string(),
            footer: "pie".to_string(),
            project_list: "proyectos".to_string(),
            logo: "logo".to_string(),
            nav_links: "enlaces".to_string(),
        }
    }
}

/// Marker attributes, classes and selectors
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Markers {
    /// Attribute carrying the project id on trigger elements
    pub trigger_attr: String,
    /// Optional external link target on a trigger
    pub url_attr: String,
    /// Deferred image source
    pub deferred_src_attr: String,
    /// Class that hides the project-detail container
    pub hidden_class: String,
    /// Selector of the main page container
    pub main_container: String,
    /// Class added to the main container once the page is ready
    pub ready_class: String,
    /// Tag of the navigation bar inside the main content region
    pub nav_tag: String,
    /// Tag of project list items inside the project list
    pub project_item_tag: String,
    pub social_links: String,
    pub anchor_links: String,
    /// Heading lookup inside a trigger, for the detail title
    pub title_selector: String,
    pub title_tag: String,
    pub paragraph_tag: String,
    pub separator_tag: String,
    pub separator_class: String,
    /// Tags treated as the project's media element
    pub media_tags: Vec<String>,
    /// Source block id is this prefix followed by the project id
    pub source_id_prefix: String,
    /// Query parameter (and hash key) naming the project
    pub query_param: String,
    pub placeholder_title: String,
    /// Entrance targets beyond the logo, nav links, project list and footer
    pub entrance_extra: Vec<String>,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            trigger_attr: "proyecto".to_string(),
            url_attr: "data-url".to_string(),
            deferred_src_attr: "data-src".to_string(),
            hidden_class: "oculto".to_string(),
            main_container: ".contenedor".to_string(),
            ready_class: "visible".to_string(),
            nav_tag: "nav".to_string(),
            project_item_tag: "li".to_string(),
            social_links: ".redes a".to_string(),
            anchor_links: "a[href^=\"#\"]".to_string(),
            title_selector: "h1, h2, h3, h4, h5, h6".to_string(),
            title_tag: "h2".to_string(),
            paragraph_tag: "p".to_string(),
            separator_tag: "hr".to_string(),
            separator_class: "separador".to_string(),
            media_tags: vec!["img".to_string(), "video".to_string()],
            source_id_prefix: String::new(),
            query_param: "proyecto".to_string(),
            placeholder_title: "Proyecto".to_string(),
            entrance_extra: vec![
                ".hero h1".to_string(),
                ".hero p".to_string(),
                ".chat-flotante".to_string(),
            ],
        }
    }
}

/// Duration, travel and blur of one animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionPreset {
    /// Seconds
    pub duration: f64,
    /// Travel in px
    pub offset: f64,
    /// Blur radius in px
    pub blur: f64,
    /// Seconds between consecutive targets; 0 disables staggering
    #[serde(default)]
    pub stagger: f64,
}

impl MotionPreset {
    pub const fn new(duration: f64, offset: f64, blur: f64, stagger: f64) -> Self {
        Self {
            duration,
            offset,
            blur,
            stagger,
        }
    }

    /// Invisible, shifted left, blurred
    pub fn shifted_left(&self) -> Tween {
        Tween::new().opacity(0.0).x(-self.offset).blur(self.blur)
    }

    /// Invisible, shifted down, blurred
    pub fn shifted_down(&self) -> Tween {
        Tween::new().opacity(0.0).y(self.offset).blur(self.blur)
    }

    pub fn timing(&self, ease: &str, from: StaggerFrom) -> Timing {
        let timing = Timing::new(self.duration, ease);
        if self.stagger > 0.0 {
            timing.stagger(self.stagger, from)
        } else {
            timing
        }
    }
}

/// Social link hover micro-animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoverMotion {
    pub duration: f64,
    pub scale: f64,
    /// Degrees
    pub rotation: f64,
}

/// Motion presets for every animation the page plays
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionConfig {
    /// Easing curve name passed to the engine
    pub ease: String,
    pub footer_exit: MotionPreset,
    pub home_exit: MotionPreset,
    pub detail_enter: MotionPreset,
    pub detail_exit: MotionPreset,
    pub home_enter: MotionPreset,
    pub footer_enter: MotionPreset,
    pub entrance: MotionPreset,
    pub hover: HoverMotion,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            ease: "power2.out".to_string(),
            footer_exit: MotionPreset::new(0.25, 20.0, 4.0, 0.0),
            home_exit: MotionPreset::new(0.35, 40.0, 6.0, 0.04),
            detail_enter: MotionPreset::new(0.5, 30.0, 6.0, 0.06),
            detail_exit: MotionPreset::new(0.3, 30.0, 6.0, 0.04),
            home_enter: MotionPreset::new(0.5, 40.0, 6.0, 0.04),
            footer_enter: MotionPreset::new(0.5, 20.0, 4.0, 0.0),
            entrance: MotionPreset::new(0.8, 24.0, 10.0, 0.015),
            hover: HoverMotion {
                duration: 0.3,
                scale: 1.15,
                rotation: 8.0,
            },
        }
    }
}

/// Complete page configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub ids: ElementIds,
    pub markers: Markers,
    pub motion: MotionConfig,
    /// Delay before a deep-linked project opens, so the entrance starts first
    pub deep_link_delay_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            markers: Markers::default(),
            motion: MotionConfig::default(),
            deep_link_delay_ms: 350,
        }
    }
}

impl PageConfig {
    /// Defaults overridden by whatever fields `json` provides
    ///
    /// Objects merge key by key at every depth, so a single preset field
    /// can be overridden without restating the rest of the preset.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge(&mut merged, overrides);
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject element tags the document would refuse to create
    fn validate(&self) -> Result<(), ConfigError> {
        let markers = &self.markers;
        for tag in [&markers.title_tag, &markers.paragraph_tag, &markers.separator_tag] {
            if !is_valid_tag(tag) {
                return Err(ConfigError::InvalidTag(tag.clone()));
            }
        }
        Ok(())
    }

    /// Selector of the project list items
    pub fn project_items_selector(&self) -> String {
        format!("#{} {}", self.ids.project_list, self.markers.project_item_tag)
    }

    /// Selector of every trigger element
    pub fn trigger_selector(&self) -> String {
        format!("[{}]", self.markers.trigger_attr)
    }

    /// Id of the source content block for `project_id`
    pub fn source_block_id(&self, project_id: &str) -> String {
        format!("{}{}", self.markers.source_id_prefix, project_id)
    }

    /// Selectors animated by the page-load entrance, in order
    pub fn entrance_selectors(&self) -> Vec<String> {
        let ids = &self.ids;
        let mut selectors = vec![
            format!("#{}", ids.logo),
            format!("#{} a", ids.nav_links),
        ];
        selectors.extend(self.markers.entrance_extra.iter().cloned());
        selectors.push(self.project_items_selector());
        selectors.push(format!("#{} a", ids.project_list));
        selectors.push(format!("#{}", ids.footer));
        selectors
    }

    pub fn is_media_tag(&self, tag: &str) -> bool {
        self.markers
            .media_tags
            .iter()
            .any(|m| m.eq_ignore_ascii_case(tag))
    }
}

fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PageConfig::from_json(
            r#"{ "ids": { "footer": "footer" }, "motion": { "ease": "expo.out" }, "deepLinkDelayMs": 0 }"#,
        )
        .unwrap();
        assert_eq!(config.ids.footer, "footer");
        assert_eq!(config.ids.home, "contenido");
        assert_eq!(config.motion.ease, "expo.out");
        assert_eq!(config.motion.home_exit, MotionConfig::default().home_exit);
        assert_eq!(config.deep_link_delay_ms, 0);
        assert_eq!(config.markers, Markers::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            PageConfig::from_json("{ ids: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_partial_preset_override() {
        let config = PageConfig::from_json(r#"{ "motion": { "homeExit": { "duration": 0.9 } } }"#).unwrap();
        let defaults = MotionConfig::default().home_exit;
        let home_exit = config.motion.home_exit;
        assert_eq!(home_exit.duration, 0.9);
        assert_eq!(home_exit.offset, defaults.offset);
        assert_eq!(home_exit.blur, defaults.blur);
        assert_eq!(home_exit.stagger, defaults.stagger);
        assert_eq!(config.motion.hover, MotionConfig::default().hover);
    }

    #[test]
    fn test_partial_hover_override() {
        let config = PageConfig::from_json(r#"{ "motion": { "hover": { "scale": 1.3 } } }"#).unwrap();
        assert_eq!(config.motion.hover.scale, 1.3);
        assert_eq!(config.motion.hover.rotation, 8.0);
    }

    #[test]
    fn test_wrong_field_type_is_error() {
        assert!(matches!(
            PageConfig::from_json(r#"{ "motion": { "homeExit": { "duration": "slow" } } }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_tag_is_rejected() {
        assert!(matches!(
            PageConfig::from_json(r#"{ "markers": { "titleTag": "h2 class" } }"#),
            Err(ConfigError::InvalidTag(tag)) if tag == "h2 class"
        ));
        assert!(matches!(
            PageConfig::from_json(r#"{ "markers": { "separatorTag": "" } }"#),
            Err(ConfigError::InvalidTag(_))
        ));
        let custom = PageConfig::from_json(r#"{ "markers": { "paragraphTag": "x-bloque" } }"#).unwrap();
        assert_eq!(custom.markers.paragraph_tag, "x-bloque");
    }

    #[test]
    fn test_preset_tweens() {
        let preset = MotionPreset::new(0.4, 30.0, 5.0, 0.05);
        let left = preset.shifted_left();
        assert_eq!(left.opacity, Some(0.0));
        assert_eq!(left.x, Some(-30.0));
        assert_eq!(left.y, None);
        assert_eq!(left.blur, Some(5.0));

        let down = preset.shifted_down();
        assert_eq!(down.y, Some(30.0));
        assert_eq!(down.x, None);
    }

    #[test]
    fn test_preset_timing_staggers_only_when_set() {
        let staggered = MotionPreset::new(0.4, 30.0, 5.0, 0.05).timing("power2.out", StaggerFrom::End);
        let stagger = staggered.stagger.unwrap();
        assert_eq!(stagger.from, StaggerFrom::End);
        assert!((stagger.each - 0.05).abs() < 1e-9);

        let plain = MotionPreset::new(0.4, 30.0, 5.0, 0.0).timing("power2.out", StaggerFrom::End);
        assert!(plain.stagger.is_none());
    }

    #[test]
    fn test_entrance_selectors_use_ids() {
        let selectors = PageConfig::default().entrance_selectors();
        assert_eq!(selectors.first().map(String::as_str), Some("#logo"));
        assert!(selectors.contains(&"#enlaces a".to_string()));
        assert!(selectors.contains(&"#proyectos li".to_string()));
        assert_eq!(selectors.last().map(String::as_str), Some("#pie"));
    }
}
