use fancy_regex::Regex;
use select::node::Node;
use select::predicate::{And, Attr, Class, Name};

/// An anchor found inside a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
}

/// The queries needed to pull a torrent out of one result row.
///
/// Kept apart from the markup library so extraction can run over any tree.
pub trait Row {
    /// First anchor carrying `class`.
    fn link_with_class(&self, class: &str) -> Option<Link>;

    /// First anchor whose `href` matches `pattern`.
    fn link_matching(&self, pattern: &Regex) -> Option<Link>;

    /// Text of every `td align="right"` cell, in document order.
    fn right_aligned_cells(&self) -> Vec<String>;

    /// Text of the first `tag` element carrying `class`.
    fn text_with_class(&self, tag: &str, class: &str) -> Option<String>;
}

fn link(node: Node) -> Option<Link> {
    Some(Link {
        href: node.attr("href")?.to_string(),
        text: node.text(),
    })
}

impl<'a> Row for Node<'a> {
    fn link_with_class(&self, class: &str) -> Option<Link> {
        self.find(And(Name("a"), Class(class))).next().and_then(link)
    }

    fn link_matching(&self, pattern: &Regex) -> Option<Link> {
        self.find(And(Name("a"), Attr("href", ())))
            .filter(|x| {
                x.attr("href")
                    .map_or(false, |href| pattern.is_match(href).unwrap_or(false))
            })
            .find_map(link)
    }

    fn right_aligned_cells(&self) -> Vec<String> {
        self.find(And(Name("td"), Attr("align", "right")))
            .map(|x| x.text())
            .collect()
    }

    fn text_with_class(&self, tag: &str, class: &str) -> Option<String> {
        self.find(And(Name(tag), Class(class)))
            .next()
            .map(|x| x.text())
    }
}
