use crate::error::{Error, Result};
use crate::torrents::Torrents;
use crate::Config;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::str::FromStr;

/// HTTP GET capability used to load pages lazily.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Returns the body of `url`, which may be relative to the site root.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Site category filter, sent as the numeric code the index expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All = 0,
    Audio = 100,
    Video = 200,
    Applications = 300,
    Games = 400,
    Other = 600,
}

impl Category {
    pub const NAMES: [&'static str; 6] = ["all", "audio", "video", "applications", "games", "other"];
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "audio" => Ok(Self::Audio),
            "video" => Ok(Self::Video),
            "applications" => Ok(Self::Applications),
            "games" => Ok(Self::Games),
            "other" => Ok(Self::Other),
            x => Err(format!("unknown category `{}`", x)),
        }
    }
}

pub struct Search {
    base_url: Url,
    client: Client,
}

impl Search {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&format!("https://{}/", config.base_url))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = reqwest::ClientBuilder::new()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Address of the first results page for `name` in `category`.
    pub fn search_url(&self, name: &str, category: Category) -> Result<Url> {
        let code = (category as u16).to_string();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .clear()
            .extend(&["search", name, "1", "99", code.as_str()]);
        Ok(url)
    }

    pub async fn search(&self, name: &str, category: Category) -> Result<Torrents> {
        let url = self.search_url(name, category)?;
        let page = self.get(url).await?;
        Torrents::from_html(&page)
    }

    fn resolve(&self, url: &str) -> Result<Url> {
        self.base_url
            .join(url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    async fn get(&self, url: Url) -> Result<String> {
        tracing::debug!(%url, "GET");
        let res = self.client.get(url).send().await?.error_for_status()?;
        Ok(res.text().await?)
    }
}

#[async_trait]
impl Fetch for Search {
    async fn fetch(&self, url: &str) -> Result<String> {
        let url = self.resolve(url)?;
        self.get(url).await
    }
}
