use thiserror::Error;

use crate::size::SizeFormatError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while fetching or parsing a search page.
#[derive(Debug, Error)]
pub enum Error {
    /// The page has no body content at all.
    #[error("could not determine torrents (empty html body)")]
    EmptyPage,

    /// An element the row must carry is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// An element is present but its text does not parse.
    #[error("cannot parse {field} from `{value}`")]
    FieldParse { field: &'static str, value: String },

    /// The description blob does not split into date, size and uploader.
    #[error("malformed description: `{0}`")]
    MalformedDescription(String),

    #[error(transparent)]
    SizeFormat(#[from] SizeFormatError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
