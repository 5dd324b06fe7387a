use crate::criteria::{select_best, Criteria};
use crate::error::{Error, Result};
use crate::item::Torrent;
use crate::size::SizeFormatError;
use select::document::Document;
use select::node::Node;
use select::predicate::{And, Class, Name};
use std::fmt;
use std::ops::Index;

/// Every result row of a search page, in page order.
#[derive(Debug, Clone, Default)]
pub struct Torrents {
    list: Vec<Torrent>,
}

impl Torrents {
    /// Parses a search page.
    ///
    /// Rows are the `tr` elements holding exactly one `td.vertTh` cell; header
    /// and ad rows carry none. A row that looks like a result but fails to
    /// parse fails the whole page.
    ///
    /// A body without elements or text, including an explicit
    /// `<body></body>`, is an [`Error::EmptyPage`] rather than an empty set.
    pub fn from_html(html: &str) -> Result<Self> {
        let doc = Document::from(html);
        let body = doc
            .find(Name("body"))
            .next()
            .filter(has_content)
            .ok_or(Error::EmptyPage)?;

        let list = body
            .find(Name("tr"))
            .filter(|row| row.find(And(Name("td"), Class("vertTh"))).count() == 1)
            .map(Torrent::try_from)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = list.len(), "parsed search page");
        Ok(Self { list })
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Torrent> {
        self.list.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Torrent> {
        self.list.iter()
    }

    /// Highest seeded torrent passing `criteria`, see [`select_best`].
    pub fn best(
        &self,
        criteria: &Criteria,
    ) -> std::result::Result<Option<&Torrent>, SizeFormatError> {
        select_best(self, criteria)
    }
}

fn has_content(body: &Node) -> bool {
    body.children().any(|x| {
        x.name().is_some() || x.as_text().map_or(false, |text| !text.trim().is_empty())
    })
}

impl Index<usize> for Torrents {
    type Output = Torrent;

    fn index(&self, index: usize) -> &Torrent {
        &self.list[index]
    }
}

impl<'a> IntoIterator for &'a Torrents {
    type Item = &'a Torrent;
    type IntoIter = std::slice::Iter<'a, Torrent>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl fmt::Display for Torrents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} torrents", self.list.len())
    }
}
