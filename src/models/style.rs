use serde::{Deserialize, Serialize};

/// Styles offered by the drawing client. The proxy forwards any style
/// value; this list only backs `GET /api/styles` and the unknown-style warning.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ImageStyle {
    #[default]
    Realistic,
    Anime,
    Cartoon,
    OilPainting,
    Watercolor,
    Sketch,
    #[serde(rename = "3d-render")]
    Render3d,
    PixelArt,
    Cyberpunk,
    Fantasy,
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub default: bool,
}

impl ImageStyle {
    pub const ALL: [ImageStyle; 10] = [
        ImageStyle::Realistic,
        ImageStyle::Anime,
        ImageStyle::Cartoon,
        ImageStyle::OilPainting,
        ImageStyle::Watercolor,
        ImageStyle::Sketch,
        ImageStyle::Render3d,
        ImageStyle::PixelArt,
        ImageStyle::Cyberpunk,
        ImageStyle::Fantasy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Realistic => "realistic",
            ImageStyle::Anime => "anime",
            ImageStyle::Cartoon => "cartoon",
            ImageStyle::OilPainting => "oil-painting",
            ImageStyle::Watercolor => "watercolor",
            ImageStyle::Sketch => "sketch",
            ImageStyle::Render3d => "3d-render",
            ImageStyle::PixelArt => "pixel-art",
            ImageStyle::Cyberpunk => "cyberpunk",
            ImageStyle::Fantasy => "fantasy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ImageStyle::Realistic => "Realistic",
            ImageStyle::Anime => "Anime",
            ImageStyle::Cartoon => "Cartoon",
            ImageStyle::OilPainting => "Oil Painting",
            ImageStyle::Watercolor => "Watercolor",
            ImageStyle::Sketch => "Sketch",
            ImageStyle::Render3d => "3D Render",
            ImageStyle::PixelArt => "Pixel Art",
            ImageStyle::Cyberpunk => "Cyberpunk",
            ImageStyle::Fantasy => "Fantasy",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|style| style.as_str() == id)
    }

    pub fn supported_styles() -> Vec<StyleInfo> {
        Self::ALL
            .iter()
            .map(|style| StyleInfo {
                id: style.as_str(),
                name: style.display_name(),
                default: *style == ImageStyle::default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_STYLE;

    #[test]
    fn ids_round_trip_through_serde() {
        for style in ImageStyle::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.as_str()));
            assert_eq!(ImageStyle::from_id(style.as_str()), Some(style));
        }
    }

    #[test]
    fn default_matches_request_default() {
        assert_eq!(ImageStyle::default().as_str(), DEFAULT_STYLE);
        let defaults: Vec<_> = ImageStyle::supported_styles()
            .into_iter()
            .filter(|s| s.default)
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, "realistic");
    }

    #[test]
    fn unknown_id() {
        assert_eq!(ImageStyle::from_id("vaporwave"), None);
        assert_eq!(ImageStyle::from_id("Realistic"), None);
    }
}
