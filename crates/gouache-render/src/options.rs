//! Paint pass configuration.

use gouache_css::ColorValue;
use serde::{Deserialize, Serialize};

use crate::error::PaintError;

/// Knobs for one paint pass. Every field has a default, so a partial JSON
/// object is enough.
///
/// ```
/// use gouache_render::PaintOptions;
///
/// let options = PaintOptions::from_json(r#"{ "anti_alias": true }"#).unwrap();
/// assert!(options.anti_alias);
/// assert!(options.cull_tiles);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintOptions {
    /// Color the frame starts out with.
    pub canvas_color: ColorValue,
    /// Skip background tiles that lie entirely outside the clip.
    pub cull_tiles: bool,
    /// Anti-alias rectangle edges. Off keeps borders and backgrounds
    /// pixel-aligned.
    pub anti_alias: bool,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            canvas_color: ColorValue::WHITE,
            cull_tiles: true,
            anti_alias: false,
        }
    }
}

impl PaintOptions {
    /// Parse options from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::Config`] if `json` is not a valid options object.
    pub fn from_json(json: &str) -> Result<Self, PaintError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(PaintOptions::from_json("{}").unwrap(), PaintOptions::default());
    }

    #[test]
    fn canvas_color_is_an_rgba_object() {
        let options =
            PaintOptions::from_json(r#"{ "canvas_color": { "r": 0, "g": 0, "b": 0, "a": 255 } }"#)
                .unwrap();
        assert_eq!(options.canvas_color, ColorValue::BLACK);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = PaintOptions::from_json(r#"{ "cull_tiles": "yes" }"#).unwrap_err();
        assert!(matches!(err, PaintError::Config(_)));
    }
}
