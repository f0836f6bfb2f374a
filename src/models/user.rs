use serde::{Deserialize, Serialize};

/// Profile of the signed-in listener, as returned by `GET /me`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub country: Option<String>, // Doubles as the recommendations market
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Image {
    pub url: String,
}

impl UserProfile {
    pub fn avatar_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }

    /// Name shown in the header, falling back to the account id
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_falls_back_to_account_id_and_first_image() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id":"u1","display_name":"","country":"SE",
                "images":[{"url":"https://i.scdn.co/a.jpg"},{"url":"https://i.scdn.co/b.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(profile.label(), "u1");
        assert_eq!(profile.avatar_url(), Some("https://i.scdn.co/a.jpg"));
    }
}
