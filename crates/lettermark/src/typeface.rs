// Imports
use crate::error::Error;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// The style of a typeface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "font_style")]
pub enum FontStyle {
    /// Regular.
    #[default]
    #[serde(rename = "regular")]
    Regular,
    /// Italic.
    #[serde(rename = "italic")]
    Italic,
}

impl From<piet::FontStyle> for FontStyle {
    fn from(piet_font_style: piet::FontStyle) -> Self {
        match piet_font_style {
            piet::FontStyle::Regular => Self::Regular,
            piet::FontStyle::Italic => Self::Italic,
        }
    }
}

impl From<FontStyle> for piet::FontStyle {
    fn from(font_style: FontStyle) -> Self {
        match font_style {
            FontStyle::Regular => piet::FontStyle::Regular,
            FontStyle::Italic => piet::FontStyle::Italic,
        }
    }
}

/// A typeface selector: family name plus style flags.
///
/// The default is a light sans-serif, resolved through the backend's generic
/// sans-serif family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "font_spec")]
pub struct FontSpec {
    /// The font family name. `None` resolves to the backend's generic sans-serif.
    #[serde(rename = "family")]
    pub family: Option<String>,
    /// The font weight.
    #[serde(rename = "weight")]
    pub weight: u16,
    /// The font style.
    #[serde(rename = "style")]
    pub style: FontStyle,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: None,
            weight: Self::WEIGHT_LIGHT,
            style: FontStyle::Regular,
        }
    }
}

/// Resolved font families, keyed by family name.
///
/// Family lookups go through the text backend once, afterwards the resolved
/// handle is reused.
static FAMILY_CACHE: Lazy<Mutex<HashMap<String, piet::FontFamily>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

impl FontSpec {
    /// Light font weight.
    pub const WEIGHT_LIGHT: u16 = 300;
    /// Regular font weight.
    pub const WEIGHT_REGULAR: u16 = 400;
    /// Bold font weight.
    pub const WEIGHT_BOLD: u16 = 700;

    /// A new spec with the given family name and style, regular weight.
    pub fn new(family: impl Into<String>, style: FontStyle) -> Self {
        Self {
            family: Some(family.into()),
            weight: Self::WEIGHT_REGULAR,
            style,
        }
    }

    /// Resolve the family through the given text backend.
    ///
    /// A named family unknown to the backend fails with [Error::FontNotFound].
    pub fn resolve<T>(&self, piet_text: &mut T) -> Result<piet::FontFamily, Error>
    where
        T: piet::Text,
    {
        let Some(family) = &self.family else {
            return Ok(piet::FontFamily::SANS_SERIF);
        };

        if let Some(resolved) = FAMILY_CACHE.lock().unwrap().get(family) {
            return Ok(resolved.clone());
        }

        let resolved = piet_text
            .font_family(family)
            .ok_or_else(|| Error::FontNotFound {
                family: family.clone(),
            })?;
        FAMILY_CACHE
            .lock()
            .unwrap()
            .insert(family.clone(), resolved.clone());

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_light_sans_serif() {
        let spec = FontSpec::default();

        assert_eq!(spec.family, None);
        assert_eq!(spec.weight, FontSpec::WEIGHT_LIGHT);
        assert_eq!(spec.style, FontStyle::Regular);
    }

    #[test]
    fn named_spec_has_regular_weight() {
        let spec = FontSpec::new("Cantarell", FontStyle::Italic);

        assert_eq!(spec.family.as_deref(), Some("Cantarell"));
        assert_eq!(spec.weight, FontSpec::WEIGHT_REGULAR);
        assert_eq!(spec.style, FontStyle::Italic);
    }

    #[test]
    fn spec_serde_roundtrip() {
        let spec = FontSpec::new("Adwaita Sans", FontStyle::Regular);

        let json = serde_json::to_string(&spec).unwrap();
        let back: FontSpec = serde_json::from_str(&json).unwrap();

        assert_eq!(back, spec);
    }
}
