use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    /// Parse a font weight from a string (e.g., "bold", "400")
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "regular" | "normal" => Ok(FontWeight::Regular),
            "bold" => Ok(FontWeight::Bold),
            // Numeric weights collapse onto the two faces the base-14 families ship.
            other => other
                .parse::<u16>()
                .map(Self::from_numeric)
                .map_err(|_| format!("Invalid font weight: '{}'", s)),
        }
    }

    pub fn from_numeric(weight: u16) -> Self {
        if weight >= 600 {
            FontWeight::Bold
        } else {
            FontWeight::Regular
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(Self::from_numeric(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// The standard PDF font families. They need no embedding, which keeps output small and stable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
}

impl FontFamily {
    /// The PostScript name of the base-14 face for this family, weight and style.
    pub fn base_font_name(&self, weight: FontWeight, style: FontStyle) -> &'static str {
        match (self, weight, style) {
            (FontFamily::Helvetica, FontWeight::Regular, FontStyle::Normal) => "Helvetica",
            (FontFamily::Helvetica, FontWeight::Bold, FontStyle::Normal) => "Helvetica-Bold",
            (FontFamily::Helvetica, FontWeight::Regular, FontStyle::Italic) => "Helvetica-Oblique",
            (FontFamily::Helvetica, FontWeight::Bold, FontStyle::Italic) => "Helvetica-BoldOblique",
            (FontFamily::Times, FontWeight::Regular, FontStyle::Normal) => "Times-Roman",
            (FontFamily::Times, FontWeight::Bold, FontStyle::Normal) => "Times-Bold",
            (FontFamily::Times, FontWeight::Regular, FontStyle::Italic) => "Times-Italic",
            (FontFamily::Times, FontWeight::Bold, FontStyle::Italic) => "Times-BoldItalic",
        }
    }
}

/// A resolved font face: family plus weight and style.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct FontFace {
    #[serde(default)]
    pub family: FontFamily,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
}

impl FontFace {
    pub const fn new(family: FontFamily, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    pub fn base_font_name(&self) -> &'static str {
        self.family.base_font_name(self.weight, self.style)
    }

    pub fn with_weight(self, weight: FontWeight) -> Self {
        Self { weight, ..self }
    }

    pub fn with_style(self, style: FontStyle) -> Self {
        Self { style, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_font_names() {
        let times = FontFace::new(FontFamily::Times, FontWeight::Bold, FontStyle::Normal);
        assert_eq!(times.base_font_name(), "Times-Bold");
        assert_eq!(
            times.with_weight(FontWeight::Regular).with_style(FontStyle::Italic).base_font_name(),
            "Times-Italic"
        );
        assert_eq!(FontFace::default().base_font_name(), "Helvetica");
    }

    #[test]
    fn test_weight_parsing() {
        assert_eq!(FontWeight::parse("Bold").unwrap(), FontWeight::Bold);
        assert_eq!(FontWeight::parse("700").unwrap(), FontWeight::Bold);
        assert_eq!(FontWeight::parse("400").unwrap(), FontWeight::Regular);
        assert!(FontWeight::parse("heavy-ish").is_err());
    }
}
