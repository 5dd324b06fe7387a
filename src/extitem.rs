use crate::error::{Error, Result};
use select::document::Document;
use select::predicate::{And, Class, Name};

/// Pulls the extended description out of a torrent detail page.
pub fn parse_info(html: &str) -> Result<String> {
    let doc = Document::from(html);
    doc.find(And(Name("div"), Class("nfo")))
        .next()
        .map(|x| x.text().trim().to_string())
        .ok_or(Error::MissingField("info"))
}
