use super::*;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct CacheConfig {
  pub(crate) items: CachePolicy,
  pub(crate) lists: CachePolicy,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      items: CachePolicy {
        fresh_secs: 15 * 60,
        max_entries: CachePolicy::default_max_entries(),
        retain_secs: 25 * 60,
      },
      lists: CachePolicy {
        fresh_secs: 2 * 60,
        max_entries: CachePolicy::default_max_entries(),
        retain_secs: 5 * 60,
      },
    }
  }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct TreeLimits {
  pub(crate) max_depth: usize,
  pub(crate) max_nodes: usize,
}

impl Default for TreeLimits {
  fn default() -> Self {
    Self {
      max_depth: 64,
      max_nodes: 2000,
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Config {
  pub(crate) api_base_url: String,
  pub(crate) cache: CacheConfig,
  pub(crate) concurrency: usize,
  pub(crate) data_dir: Option<PathBuf>,
  pub(crate) max_list_ids: usize,
  pub(crate) page_links: usize,
  pub(crate) per_page: usize,
  pub(crate) request_timeout_secs: u64,
  pub(crate) retry: Retry,
  pub(crate) tree: TreeLimits,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_base_url: "https://hacker-news.firebaseio.com/v0".into(),
      cache: CacheConfig::default(),
      concurrency: 16,
      data_dir: None,
      max_list_ids: 300,
      page_links: 5,
      per_page: 30,
      request_timeout_secs: 10,
      retry: Retry::default(),
      tree: TreeLimits::default(),
    }
  }
}

impl Config {
  pub(crate) fn data_dir(&self) -> PathBuf {
    if let Some(dir) = &self.data_dir {
      return dir.clone();
    }

    if let Ok(dir) = env::var("HN_READER_DATA_DIR") {
      return PathBuf::from(dir);
    }

    dirs::data_dir()
      .unwrap_or_else(|| PathBuf::from(".local").join("share"))
      .join(PACKAGE_NAME)
  }

  fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(PACKAGE_NAME).join("config.toml"))
  }

  /// Loads `path` if given, otherwise the default config file. Only a
  /// missing default file falls back to the built-in settings.
  pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
    let (path, required) = match path {
      Some(path) => (path.to_path_buf(), true),
      None => match Self::default_path() {
        Some(path) => (path, false),
        None => return Ok(Self::default()),
      },
    };

    if !required && !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&path).map_err(|source| Error::Io {
      path: path.clone(),
      source,
    })?;

    Self::parse(&content, path)
  }

  fn parse(content: &str, path: PathBuf) -> Result<Self> {
    let config = toml::from_str::<Self>(content)
      .map_err(|source| Error::Config { path, source })?;

    Ok(Self {
      concurrency: config.concurrency.max(1),
      page_links: config.page_links.max(1),
      per_page: config.per_page.max(1),
      ..config
    })
  }
}
