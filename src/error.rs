use super::*;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
  #[error("could not parse config file `{}`", path.display())]
  Config {
    path: PathBuf,
    source: toml::de::Error,
  },
  #[error("could not decode response from {url}")]
  Decode {
    url: String,
    source: serde_json::Error,
  },
  #[error("could not fetch {url}: {message}")]
  Fetch {
    message: String,
    status: Option<u16>,
    url: String,
  },
  #[error(
    "unknown category `{category}`, expected one of: {}",
    Category::labels()
  )]
  InvalidCategory { category: String },
  #[error("invalid item id `{id}`, ids start at 1")]
  InvalidId { id: u64 },
  #[error("items per page must be greater than zero")]
  InvalidPerPage,
  #[error("I/O error at `{}`", path.display())]
  Io { path: PathBuf, source: io::Error },
  #[error("could not serialize favorites")]
  Serialize(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn fetch(url: &str, error: &reqwest::Error) -> Self {
    Self::Fetch {
      message: error.to_string(),
      status: error.status().map(|status| status.as_u16()),
      url: url.to_string(),
    }
  }

  pub(crate) fn is_transient(&self) -> bool {
    match self {
      Self::Fetch { status: None, .. } => true,
      Self::Fetch {
        status: Some(status),
        ..
      } => *status == 429 || *status >= 500,
      _ => false,
    }
  }

  pub(crate) fn status(url: &str, status: StatusCode) -> Self {
    Self::Fetch {
      message: format!("upstream responded with {status}"),
      status: Some(status.as_u16()),
      url: url.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fetch_error(status: Option<u16>) -> Error {
    Error::Fetch {
      message: "boom".into(),
      status,
      url: "https://example.com".into(),
    }
  }

  #[test]
  fn network_and_server_errors_are_transient() {
    assert!(fetch_error(None).is_transient());
    assert!(fetch_error(Some(500)).is_transient());
    assert!(fetch_error(Some(503)).is_transient());
    assert!(fetch_error(Some(429)).is_transient());
  }

  #[test]
  fn client_errors_and_bad_input_are_terminal() {
    assert!(!fetch_error(Some(400)).is_transient());
    assert!(!fetch_error(Some(403)).is_transient());
    assert!(!Error::InvalidId { id: 0 }.is_transient());
    assert!(
      !Error::InvalidCategory {
        category: "past".into()
      }
      .is_transient()
    );
  }

  #[test]
  fn invalid_category_lists_known_categories() {
    let message = Error::InvalidCategory {
      category: "nope".into(),
    }
    .to_string();

    assert!(message.contains("`nope`"));
    assert!(message.contains("top"));
    assert!(message.contains("favorites"));
  }
}
