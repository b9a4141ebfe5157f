use common::Story;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct HNItem {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub score: u64,
    pub url: Option<String>,
}

impl HNItem {
    /// Text-only posts (Ask HN and friends) carry no link and are dropped.
    pub fn into_story(self) -> Option<Story> {
        match self.url {
            Some(url) if !url.trim().is_empty() => Some(Story {
                title: self.title,
                url,
                score: self.score,
            }),
            _ => None,
        }
    }
}
