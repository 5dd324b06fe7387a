use crate::item::Torrent;
use crate::size::{parse_size, SizeFormatError};
use crate::torrents::Torrents;
use std::cmp::Reverse;

/// A size limit, either in bytes or in `*iB` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeBound {
    Bytes(u64),
    Text(String),
}

impl SizeBound {
    pub fn resolve(&self) -> Result<u64, SizeFormatError> {
        match self {
            Self::Bytes(x) => Ok(*x),
            Self::Text(x) => parse_size(x),
        }
    }
}

macro_rules! bytes_bound {
    ($($ty:ty),*) => {
        $(impl From<$ty> for SizeBound {
            fn from(x: $ty) -> Self {
                Self::Bytes(x as u64)
            }
        })*
    };
}

bytes_bound!(u8, u16, u32, u64, usize);

macro_rules! signed_bytes_bound {
    ($($ty:ty),*) => {
        $(impl From<$ty> for SizeBound {
            /// Negative counts clamp to zero bytes.
            fn from(x: $ty) -> Self {
                Self::Bytes(u64::try_from(x).unwrap_or(0))
            }
        })*
    };
}

signed_bytes_bound!(i8, i16, i32, i64, isize);

impl From<&str> for SizeBound {
    fn from(x: &str) -> Self {
        Self::Text(x.to_string())
    }
}

impl From<String> for SizeBound {
    fn from(x: String) -> Self {
        Self::Text(x)
    }
}

/// Constraints used to pick a torrent out of a result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub min_seeds: u32,
    pub min_size: SizeBound,
    pub max_size: SizeBound,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            min_seeds: 30,
            min_size: "1 GiB".into(),
            max_size: "4 GiB".into(),
        }
    }
}

impl Criteria {
    pub fn min_seeds(mut self, seeds: u32) -> Self {
        self.min_seeds = seeds;
        self
    }

    pub fn min_size(mut self, size: impl Into<SizeBound>) -> Self {
        self.min_size = size.into();
        self
    }

    pub fn max_size(mut self, size: impl Into<SizeBound>) -> Self {
        self.max_size = size.into();
        self
    }
}

/// Returns the highest seeded torrent with at least `min_seeds` seeds and a
/// size within `min_size..=max_size`. Ties go to the earlier row.
///
/// `Ok(None)` means nothing passed the filter; only an unparsable size bound
/// is an error.
pub fn select_best<'a>(
    torrents: &'a Torrents,
    criteria: &Criteria,
) -> Result<Option<&'a Torrent>, SizeFormatError> {
    let min_size = criteria.min_size.resolve()?;
    let max_size = criteria.max_size.resolve()?;

    let best = torrents
        .iter()
        .filter(|x| x.seeds() >= criteria.min_seeds)
        .filter(|x| (min_size..=max_size).contains(&x.byte_size()))
        .min_by_key(|x| Reverse(x.seeds()));

    if best.is_none() {
        tracing::info!("no torrents found given criteria");
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: u64 = 1 << 30;

    fn page(rows: &[(&str, u32, &str)]) -> Torrents {
        let rows = rows
            .iter()
            .map(|(title, seeds, size)| {
                format!(
                    r#"<tr><td class="vertTh">Video</td><td>
                    <a class="detLink" href="/torrent/{title}">{title}</a>
                    <a href="magnet:?xt=urn:btih:{title}">m</a>
                    <font class="detDesc">Uploaded Y-day, Size {size}, ULed by x</font></td>
                    <td align="right">{seeds}</td><td align="right">0</td></tr>"#
                )
            })
            .collect::<String>();
        Torrents::from_html(&format!("<html><body><table>{rows}</table></body></html>")).unwrap()
    }

    #[test]
    fn picks_most_seeded() {
        let torrents = page(&[("a", 10, "2 GiB"), ("b", 50, "2 GiB"), ("c", 5, "2 GiB")]);
        let best = select_best(&torrents, &Criteria::default()).unwrap();
        assert_eq!(best.unwrap().title(), "b");
    }

    #[test]
    fn nothing_meets_seed_floor() {
        let torrents = page(&[("a", 10, "2 GiB"), ("b", 29, "2 GiB")]);
        assert!(select_best(&torrents, &Criteria::default()).unwrap().is_none());
        assert!(torrents.best(&Criteria::default()).unwrap().is_none());
    }

    #[test]
    fn ties_go_to_first_row() {
        let torrents = page(&[("a", 40, "2 GiB"), ("b", 90, "3 GiB"), ("c", 90, "1 GiB")]);
        assert_eq!(torrents.best(&Criteria::default()).unwrap().unwrap().title(), "b");
    }

    #[test]
    fn size_bounds_are_inclusive() {
        let torrents = page(&[
            ("low", 40, "1 GiB"),
            ("high", 50, "4 GiB"),
            ("over", 900, "4.01 GiB"),
            ("under", 900, "1023 MiB"),
        ]);
        let best = torrents.best(&Criteria::default()).unwrap().unwrap();
        assert_eq!(best.title(), "high");

        let criteria = Criteria::default().max_size(GIB);
        assert_eq!(torrents.best(&criteria).unwrap().unwrap().title(), "low");
    }

    #[test]
    fn bounds_accept_bytes_or_text() {
        let torrents = page(&[("a", 40, "700 MiB"), ("b", 35, "8 GiB")]);
        assert!(torrents.best(&Criteria::default()).unwrap().is_none());

        let criteria = Criteria::default()
            .min_size(500u32 << 20)
            .max_size(String::from("1 GiB"));
        assert_eq!(torrents.best(&criteria).unwrap().unwrap().title(), "a");

        let criteria = Criteria::default().min_seeds(0).min_size(0usize).max_size("1 TiB");
        assert_eq!(torrents.best(&criteria).unwrap().unwrap().title(), "a");
    }

    #[test]
    fn bounds_accept_plain_integer_literals() {
        let torrents = page(&[("a", 40, "700 MiB"), ("b", 35, "1 GiB")]);

        let criteria = Criteria::default().min_size(1 << 30).max_size("2 GiB");
        assert_eq!(torrents.best(&criteria).unwrap().unwrap().title(), "b");

        let criteria = Criteria::default().min_size(-5).max_size(700i64 << 20);
        assert_eq!(criteria.min_size, SizeBound::Bytes(0));
        assert_eq!(torrents.best(&criteria).unwrap().unwrap().title(), "a");
    }

    #[test]
    fn bad_bound_is_an_error() {
        let torrents = page(&[("a", 40, "2 GiB")]);
        let criteria = Criteria::default().max_size("4 GB");
        assert!(matches!(
            torrents.best(&criteria),
            Err(SizeFormatError::UnknownUnit(_))
        ));
    }

    #[test]
    fn empty_set_has_no_best() {
        let torrents = Torrents::default();
        assert!(select_best(&torrents, &Criteria::default()).unwrap().is_none());
    }
}
