use crate::error::{Error, Result};
use crate::extitem;
use crate::row::Row;
use crate::search::Fetch;
use crate::size::parse_size;
use fancy_regex::Regex;
use select::node::Node;
use serde::Serialize;
use std::fmt;
use tokio::sync::OnceCell;
use unicode_normalization::UnicodeNormalization;

lazy_static::lazy_static! {
    static ref MAGNET: Regex = Regex::new(r"^magnet:").unwrap();
}

/// One result row of a search page.
#[derive(Debug, Clone, Serialize)]
pub struct Torrent {
    title: String,
    url: String,
    magnet: String,
    seeds: u32,
    leeches: u32,
    uploaded: String,
    size: String,
    byte_size: u64,
    uploader: String,

    #[serde(skip)]
    info: OnceCell<String>,
}

impl Torrent {
    /// Extracts every field of a result row.
    pub fn from_row<R: Row + ?Sized>(row: &R) -> Result<Self> {
        let detail = row
            .link_with_class("detLink")
            .ok_or(Error::MissingField("title"))?;
        let title = detail.text.trim().to_string();
        if title.is_empty() {
            return Err(Error::MissingField("title"));
        }

        let magnet = row
            .link_matching(&MAGNET)
            .ok_or(Error::MissingField("magnet"))?
            .href;

        let cells = row.right_aligned_cells();
        let (seeds, leeches) = match cells.as_slice() {
            [seeds, leeches, ..] => (count("seeds", seeds)?, count("leeches", leeches)?),
            _ => return Err(Error::MissingField("seeds/leeches")),
        };

        let desc = row
            .text_with_class("font", "detDesc")
            .ok_or(Error::MissingField("description"))?;
        let parts = desc.split(',').collect::<Vec<_>>();
        let [uploaded, size, uploader] = parts.as_slice() else {
            return Err(Error::MalformedDescription(desc.clone()));
        };
        let uploaded = labelled(uploaded, "Uploaded ");
        let size = labelled(size, "Size ");
        let uploader = labelled(uploader, "ULed by ");
        let byte_size = parse_size(&size)?;

        Ok(Self {
            title,
            url: detail.href,
            magnet,
            seeds,
            leeches,
            uploaded,
            size,
            byte_size,
            uploader,
            info: OnceCell::new(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Link to the detail page, as found in the row (usually site-relative).
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn magnet(&self) -> &str {
        &self.magnet
    }

    pub fn seeds(&self) -> u32 {
        self.seeds
    }

    pub fn leeches(&self) -> u32 {
        self.leeches
    }

    pub fn uploaded(&self) -> &str {
        &self.uploaded
    }

    /// Size as displayed, e.g. `1.37 GiB`.
    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    pub fn uploader(&self) -> &str {
        &self.uploader
    }

    /// Extended description from the detail page.
    ///
    /// The page is fetched on first call only; later calls reuse the result.
    /// A failed fetch is not cached.
    pub async fn info<F: Fetch + ?Sized>(&self, fetcher: &F) -> Result<&str> {
        self.info
            .get_or_try_init(|| async {
                tracing::debug!(url = %self.url, "fetching torrent details");
                let page = fetcher.fetch(&self.url).await?;
                extitem::parse_info(&page)
            })
            .await
            .map(String::as_str)
    }
}

impl<'a> TryFrom<Node<'a>> for Torrent {
    type Error = Error;

    fn try_from(value: Node<'a>) -> Result<Self> {
        Self::from_row(&value)
    }
}

impl fmt::Display for Torrent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, S: {}, L: {}, {}",
            self.title, self.seeds, self.leeches, self.size
        )
    }
}

fn count(field: &'static str, text: &str) -> Result<u32> {
    text.trim().parse::<u32>().map_err(|_| Error::FieldParse {
        field,
        value: text.to_string(),
    })
}

fn labelled(part: &str, label: &str) -> String {
    let part = part.trim();
    part.strip_prefix(label)
        .unwrap_or(part)
        .trim()
        .nfkd()
        .collect()
}
