pub mod criteria;
pub mod error;
pub mod extitem;
pub mod item;
pub mod row;
pub mod search;
pub mod size;
pub mod torrents;

pub use criteria::{select_best, Criteria, SizeBound};
pub use error::{Error, Result};
pub use item::Torrent;
pub use search::{Category, Fetch, Search};
pub use size::{parse_size, SizeFormatError};
pub use torrents::Torrents;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const UAGENT: &str = concat!("tpbscrape/", env!("CARGO_PKG_VERSION"), " (Linux x86_64;)");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Host of the index, without scheme.
    pub base_url: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "thepiratebay10.org".to_string(),
            user_agent: UAGENT.to_string(),
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde("~/.config/tpbscrape/config").as_ref())
    }

    /// Reads the config at `path`, writing out the defaults if there is none yet.
    pub fn load(path: &Path) -> Result<Self> {
        match File::open(path) {
            Ok(file) => Ok(serde_json::from_reader(BufReader::new(file))?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let config = Self::default();
                config.dump(path)?;
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn dump(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        File::create(path)?.write_all(json.as_bytes())?;
        Ok(())
    }
}
