use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    /// 0-100, as reported by the recommendation backend.
    pub popularity: u8,
    pub followers: u64,
    pub image_url: Option<String>,
    pub profile_url: String,
    pub genres: Vec<String>,
}

impl Artist {
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn genre_summary(&self) -> String {
        if self.genres.is_empty() {
            "No genres available".to_string()
        } else {
            self.genres.join(", ")
        }
    }
}

/// Clamps a raw popularity score into the 0-100 range.
pub fn clamp_popularity(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist() -> Artist {
        Artist {
            id: "4dpARuHxo51G3z768sgnrY".to_string(),
            name: "Adele".to_string(),
            popularity: 90,
            followers: 55_000_000,
            image_url: None,
            profile_url: "https://open.spotify.com/artist/4dpARuHxo51G3z768sgnrY".to_string(),
            genres: vec![],
        }
    }

    #[test]
    fn test_placeholder_image() {
        let mut a = artist();
        assert_eq!(a.image_or_placeholder(), PLACEHOLDER_IMAGE);
        a.image_url = Some("https://i.scdn.co/image/abc".to_string());
        assert_eq!(a.image_or_placeholder(), "https://i.scdn.co/image/abc");
    }

    #[test]
    fn test_genre_summary() {
        let mut a = artist();
        assert_eq!(a.genre_summary(), "No genres available");
        a.genres = vec!["pop".to_string(), "soul".to_string()];
        assert_eq!(a.genre_summary(), "pop, soul");
    }

    #[test]
    fn test_clamp_popularity() {
        assert_eq!(clamp_popularity(-4), 0);
        assert_eq!(clamp_popularity(57), 57);
        assert_eq!(clamp_popularity(250), 100);
    }
}
