use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  config: Arc<Config>,
  items: Arc<Cache<u64, Option<Item>>>,
  lists: Arc<Cache<Category, Vec<u64>>>,
  source: Arc<dyn Source>,
}

impl Client {
  /// Fetches every id concurrently and keeps the items that resolved, in
  /// input order. Failed and absent ids are dropped.
  pub(crate) async fn aggregate(&self, ids: &[u64]) -> Vec<ResolvedItem> {
    let results = stream::iter(ids.iter().copied())
      .map(|id| async move { (id, self.fetch_item(id).await) })
      .buffered(self.config.concurrency)
      .collect::<Vec<_>>()
      .await;

    results
      .into_iter()
      .filter_map(|(id, result)| match result {
        Ok(Some(item)) => Some(ResolvedItem::leaf(item)),
        Ok(None) => {
          debug!(id, "dropping absent item");
          None
        }
        Err(error) => {
          warn!(%error, id, "dropping item that failed to load");
          None
        }
      })
      .collect()
  }

  /// Returns the item with `id`, or `None` when it is missing, deleted, dead
  /// or malformed.
  pub(crate) async fn fetch_item(&self, id: u64) -> Result<Option<Item>> {
    if id == 0 {
      return Err(Error::InvalidId { id });
    }

    match self.items.get(&id).await {
      Lookup::Fresh(item) => {
        debug!(id, "item cache hit");
        return Ok(item);
      }
      Lookup::Stale { refresh, value } => {
        if refresh {
          self.spawn_item_refresh(id);
        }

        return Ok(value);
      }
      Lookup::Miss => {}
    }

    let item = self.load_item(id).await?;

    self.items.insert(id, item.clone()).await;

    Ok(item)
  }

  pub(crate) async fn listing(
    &self,
    category: Category,
    page: usize,
    per_page: usize,
    favorites: &Favorites,
  ) -> Result<Listing> {
    if per_page == 0 {
      return Err(Error::InvalidPerPage);
    }

    let ids = self.resolve_list(category, favorites).await?;

    let links = self.config.page_links;

    let mut window = PageWindow::compute(ids.len(), per_page, page, links)?;

    let mut redirected_from = None;

    if let PageStatus::OutOfRange { redirect } = window.status {
      info!(%category, page, redirect, "page out of range");
      redirected_from = Some(page);
      window = PageWindow::compute(ids.len(), per_page, redirect, links)?;
    }

    let items = self.aggregate(window.slice(&ids)).await;

    let status = if ids.is_empty() {
      ListingStatus::EmptyCategory
    } else if items.is_empty() {
      ListingStatus::Unavailable
    } else {
      ListingStatus::Ready
    };

    Ok(Listing {
      category,
      items,
      redirected_from,
      status,
      total_count: ids.len(),
      window,
    })
  }

  async fn load_item(&self, id: u64) -> Result<Option<Item>> {
    let record = self
      .config
      .retry
      .run("item", || self.source.fetch_item(id))
      .await?;

    let Some(record) = record else {
      debug!(id, "item not found");
      return Ok(None);
    };

    if record.id != id {
      warn!(id, returned = record.id, "upstream returned a different item");
      return Ok(None);
    }

    let kind = record.kind();

    let item = Item::from_record(record);

    if item.is_none() {
      debug!(id, kind = kind.label(), "item is not renderable");
    }

    Ok(item)
  }

  async fn load_list(&self, endpoint: &str) -> Result<Vec<u64>> {
    let mut ids = self
      .config
      .retry
      .run("story list", || self.source.fetch_ids(endpoint))
      .await?
      .unwrap_or_default();

    ids.truncate(self.config.max_list_ids);

    info!(endpoint, count = ids.len(), "resolved story list");

    Ok(ids)
  }

  pub(crate) fn new(config: Config, source: Arc<dyn Source>) -> Self {
    Self {
      items: Arc::new(Cache::new(config.cache.items)),
      lists: Arc::new(Cache::new(config.cache.lists)),
      config: Arc::new(config),
      source,
    }
  }

  /// Returns the ordered ids for `category`, at most `max_list_ids` long.
  /// Favorites come from local state and never touch the upstream.
  pub(crate) async fn resolve_list(
    &self,
    category: Category,
    favorites: &Favorites,
  ) -> Result<Vec<u64>> {
    let endpoint = match category.kind() {
      CategoryKind::Favorites => {
        let mut ids = favorites.ids().to_vec();
        ids.truncate(self.config.max_list_ids);
        return Ok(ids);
      }
      CategoryKind::Stories(endpoint) => endpoint,
    };

    match self.lists.get(&category).await {
      Lookup::Fresh(ids) => {
        debug!(%category, "story list cache hit");
        return Ok(ids);
      }
      Lookup::Stale { refresh, value } => {
        if refresh {
          self.spawn_list_refresh(category, endpoint);
        }

        return Ok(value);
      }
      Lookup::Miss => {}
    }

    let ids = self.load_list(endpoint).await?;

    self.lists.insert(category, ids.clone()).await;

    Ok(ids)
  }

  /// Materializes the reply tree under `root` breadth first, fetching each
  /// level concurrently. Replies that fail or are absent are dropped along
  /// with everything below them.
  pub(crate) async fn resolve_tree(&self, root: Item) -> ResolvedItem {
    let TreeLimits {
      max_depth,
      max_nodes,
    } = self.config.tree;

    let mut seen = HashSet::from([root.id]);

    let mut tree = ReplyTree::new(root);

    let mut frontier = vec![0];

    while !frontier.is_empty() {
      let mut pending = Vec::new();

      for &node in &frontier {
        let child_ids = tree.child_ids(node);

        if child_ids.is_empty() {
          continue;
        }

        if tree.depth(node) >= max_depth {
          warn!(id = tree.id(node), max_depth, "reply depth limit reached");
          continue;
        }

        for &id in child_ids {
          if seen.insert(id) {
            pending.push((node, id));
          } else {
            warn!(id, "skipping reply that appears twice in the tree");
          }
        }
      }

      let budget = max_nodes.saturating_sub(tree.len());

      if pending.len() > budget {
        warn!(
          max_nodes,
          skipped = pending.len() - budget,
          "reply count limit reached"
        );

        pending.truncate(budget);
      }

      let fetched = stream::iter(pending)
        .map(|(parent, id)| async move {
          (parent, id, self.fetch_item(id).await)
        })
        .buffered(self.config.concurrency)
        .collect::<Vec<_>>()
        .await;

      frontier.clear();

      for (parent, id, result) in fetched {
        match result {
          Ok(Some(item)) => frontier.push(tree.push(parent, item)),
          Ok(None) => debug!(id, "skipping absent reply"),
          Err(error) => warn!(%error, id, "skipping reply that failed to load"),
        }
      }
    }

    tree.into_resolved()
  }

  fn spawn_item_refresh(&self, id: u64) {
    let client = self.clone();

    tokio::spawn(async move {
      match client.load_item(id).await {
        Ok(item) => client.items.insert(id, item).await,
        Err(error) => {
          warn!(%error, id, "background item refresh failed");
          client.items.release(&id).await;
        }
      }
    });
  }

  fn spawn_list_refresh(&self, category: Category, endpoint: &'static str) {
    let client = self.clone();

    tokio::spawn(async move {
      match client.load_list(endpoint).await {
        Ok(ids) => client.lists.insert(category, ids).await,
        Err(error) => {
          warn!(%error, %category, "background list refresh failed");
          client.lists.release(&category).await;
        }
      }
    });
  }

  /// Fetches the item with `id` and its full reply tree.
  pub(crate) async fn thread(&self, id: u64) -> Result<Option<ResolvedItem>> {
    let Some(root) = self.fetch_item(id).await? else {
      return Ok(None);
    };

    Ok(Some(self.resolve_tree(root).await))
  }
}
