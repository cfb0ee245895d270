//! Animation configuration in its serialized wire shape.

use serde::{Deserialize, Serialize};

/// Configuration supplied once at mount time.
///
/// This is the only wire format in the system: a flat JSON object
/// `{"type", "speed", "color", "customCode"?}` traveling from an
/// authoring context to a rendering context. The serde renames keep the
/// serialized field names exactly as the wire expects; `speed` stays an
/// `f64` so no precision is lost on round trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Variant name, e.g. `"aurora"` or `"custom"`.
    #[serde(rename = "type")]
    pub variant: String,
    /// Speed multiplier; values at or below zero are treated as 1.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Base color specification; empty means "use the variant default".
    #[serde(default)]
    pub color: String,
    /// Expression source for the `"custom"` variant.
    #[serde(rename = "customCode", default, skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
}

fn default_speed() -> f64 {
    1.0
}

impl AnimationConfig {
    /// Config for a named variant with defaults for everything else.
    pub fn for_variant(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            speed: default_speed(),
            color: String::new(),
            custom_code: None,
        }
    }

    /// The effective speed multiplier as the engine consumes it.
    pub fn speed_factor(&self) -> f32 {
        if self.speed > 0.0 { self.speed as f32 } else { 1.0 }
    }

    /// The configured color, or `default` when none was chosen.
    pub fn color_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.color.is_empty() { default } else { &self.color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let config = AnimationConfig {
            variant: "snowfall".into(),
            speed: 1.25,
            color: "#0073aa".into(),
            custom_code: None,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "snowfall", "speed": 1.25, "color": "#0073aa"})
        );
    }

    #[test]
    fn test_round_trip_exact() {
        let wire = r#"{"type":"custom","speed":0.333333333333,"color":"rgba(1,2,3,0.5)","customCode":"x + y"}"#;
        let config: AnimationConfig = serde_json::from_str(wire).unwrap();
        assert_eq!(config.speed, 0.333333333333);
        assert_eq!(config.custom_code.as_deref(), Some("x + y"));
        let back = serde_json::to_string(&config).unwrap();
        assert_eq!(back, wire);
    }

    #[test]
    fn test_missing_fields_default() {
        let config: AnimationConfig = serde_json::from_str(r#"{"type":"waves"}"#).unwrap();
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.color, "");
        assert_eq!(config.custom_code, None);
        assert_eq!(config.color_or("#0073aa"), "#0073aa");
    }

    #[test]
    fn test_speed_factor_guards_nonpositive() {
        let mut config = AnimationConfig::for_variant("waves");
        config.speed = 0.0;
        assert_eq!(config.speed_factor(), 1.0);
        config.speed = -2.0;
        assert_eq!(config.speed_factor(), 1.0);
        config.speed = 2.5;
        assert_eq!(config.speed_factor(), 2.5);
    }
}
