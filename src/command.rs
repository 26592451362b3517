use super::*;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
  /// Manage locally saved favorites
  Favorites {
    #[command(subcommand)]
    action: FavoritesCommand,
  },
  /// Show one page of a category
  List {
    /// One of top, new, best, ask, show, jobs or favorites
    #[arg(default_value = "top")]
    category: Category,
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Items per page, overriding the configured value
    #[arg(long)]
    per_page: Option<usize>,
  },
  /// Open an item's link, or its discussion page, in the browser
  Open { id: u64 },
  /// Show an item with its comment tree
  Story { id: u64 },
}

impl Command {
  fn favorites(data_dir: PathBuf) -> anyhow::Result<Favorites> {
    Favorites::load(Box::new(FileStore::new(data_dir)))
      .context("could not load favorites")
  }

  /// Collapses absence and upstream failure into one user-facing error.
  fn require<T>(id: u64, result: Result<Option<T>>) -> anyhow::Result<T> {
    match result {
      Ok(Some(value)) => Ok(value),
      Ok(None) => Err(anyhow!("item {id} not found")),
      Err(error @ Error::InvalidId { .. }) => Err(error.into()),
      Err(error) => {
        warn!(%error, id, "could not load item");
        Err(anyhow!("item {id} not found"))
      }
    }
  }

  pub(crate) async fn run(self, config: Config) -> anyhow::Result<()> {
    let data_dir = config.data_dir();

    let per_page = config.per_page;

    let source = Arc::new(HttpSource::new(&config)?);

    let client = Client::new(config, source);

    let renderer = Renderer::new(
      io::stdout().is_terminal(),
      Utc::now().timestamp(),
      terminal::size().map_or(80, |(columns, _)| usize::from(columns)),
    );

    let mut stdout = io::stdout();

    match self {
      Self::Favorites { action } => {
        action.run(&mut stdout, &mut Self::favorites(data_dir)?)?;
      }
      Self::List {
        category,
        page,
        per_page: per_page_override,
      } => {
        let favorites = Self::favorites(data_dir)?;

        let listing = client
          .listing(
            category,
            page,
            per_page_override.unwrap_or(per_page),
            &favorites,
          )
          .await
          .with_context(|| format!("could not load {category} stories"))?;

        renderer.listing(&mut stdout, &listing, &favorites)?;
      }
      Self::Open { id } => {
        let item = Self::require(id, client.fetch_item(id).await)?;

        let link = item.link();

        webbrowser::open(&link)
          .with_context(|| format!("could not open {link}"))?;
      }
      Self::Story { id } => {
        let thread = Self::require(id, client.thread(id).await)?;

        renderer.thread(&mut stdout, &thread)?;
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn favorites_load_from_data_dir() {
    let dir = tempfile::tempdir().unwrap();

    fs::write(dir.path().join("favorites-storage.json"), "[3,1]").unwrap();

    assert_eq!(
      Command::favorites(dir.path().to_path_buf()).unwrap().ids(),
      [3, 1]
    );
  }

  #[test]
  fn require_unwraps_present_values() {
    assert_eq!(Command::require(1, Ok(Some(7))).unwrap(), 7);
  }

  #[test]
  fn require_reports_absence_and_failure_alike() {
    let failure = Error::Fetch {
      message: "connection reset".into(),
      status: None,
      url: "https://example.com".into(),
    };

    for result in [Ok(None::<u64>), Err(failure)] {
      assert_eq!(
        Command::require(9, result).unwrap_err().to_string(),
        "item 9 not found"
      );
    }
  }

  #[test]
  fn require_keeps_invalid_id() {
    assert_eq!(
      Command::require(0, Err::<Option<u64>, _>(Error::InvalidId { id: 0 }))
        .unwrap_err()
        .to_string(),
      "invalid item id `0`, ids start at 1"
    );
  }
}
