use super::*;

/// Scripted upstream with per-request counters.
#[derive(Default)]
pub(crate) struct FakeSource {
  delays: Mutex<HashMap<u64, Duration>>,
  failures: Mutex<HashMap<u64, usize>>,
  item_requests: Mutex<HashMap<u64, usize>>,
  items: Mutex<HashMap<u64, Value>>,
  list_failures: Mutex<HashMap<String, usize>>,
  list_requests: AtomicUsize,
  lists: Mutex<HashMap<String, Option<Vec<u64>>>>,
}

impl FakeSource {
  pub(crate) fn delay(&self, id: u64, delay: Duration) {
    self.delays.lock().unwrap().insert(id, delay);
  }

  /// Fails the next `times` requests for `id` with a transient error.
  pub(crate) fn fail(&self, id: u64, times: usize) {
    self.failures.lock().unwrap().insert(id, times);
  }

  pub(crate) fn fail_list(&self, endpoint: &str, times: usize) {
    self
      .list_failures
      .lock()
      .unwrap()
      .insert(endpoint.to_string(), times);
  }

  pub(crate) fn item(&self, value: Value) {
    let id = value["id"].as_u64().unwrap();
    self.item_as(id, value);
  }

  /// Serves `value` for requests of `id`, whatever id the record carries.
  pub(crate) fn item_as(&self, id: u64, value: Value) {
    self.items.lock().unwrap().insert(id, value);
  }

  pub(crate) fn item_requests(&self, id: u64) -> usize {
    self
      .item_requests
      .lock()
      .unwrap()
      .get(&id)
      .copied()
      .unwrap_or(0)
  }

  pub(crate) fn list(&self, endpoint: &str, ids: Option<Vec<u64>>) {
    self
      .lists
      .lock()
      .unwrap()
      .insert(endpoint.to_string(), ids);
  }

  pub(crate) fn list_requests(&self) -> usize {
    self.list_requests.load(atomic::Ordering::SeqCst)
  }

  pub(crate) fn total_item_requests(&self) -> usize {
    self.item_requests.lock().unwrap().values().sum()
  }

  fn transient(url: String) -> Error {
    Error::Fetch {
      message: "connection reset".into(),
      status: None,
      url,
    }
  }
}

#[async_trait]
impl Source for FakeSource {
  async fn fetch_ids(&self, endpoint: &str) -> Result<Option<Vec<u64>>> {
    self.list_requests.fetch_add(1, atomic::Ordering::SeqCst);

    if let Some(remaining) =
      self.list_failures.lock().unwrap().get_mut(endpoint)
      && *remaining > 0
    {
      *remaining -= 1;
      return Err(Self::transient(format!("fake://{endpoint}")));
    }

    Ok(self.lists.lock().unwrap().get(endpoint).cloned().flatten())
  }

  async fn fetch_item(&self, id: u64) -> Result<Option<ItemRecord>> {
    *self.item_requests.lock().unwrap().entry(id).or_default() += 1;

    let delay = self.delays.lock().unwrap().get(&id).copied();

    if let Some(delay) = delay {
      time::sleep(delay).await;
    }

    if let Some(remaining) = self.failures.lock().unwrap().get_mut(&id)
      && *remaining > 0
    {
      *remaining -= 1;
      return Err(Self::transient(format!("fake://item/{id}")));
    }

    let value = self.items.lock().unwrap().get(&id).cloned();

    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
  }
}

pub(crate) fn comment(id: u64, kids: &[u64]) -> Value {
  json!({
    "by": format!("user{id}"),
    "id": id,
    "kids": kids,
    "text": format!("<p>comment {id}</p>"),
    "time": 1_700_000_000,
    "type": "comment"
  })
}

pub(crate) fn dead(id: u64) -> Value {
  json!({ "dead": true, "id": id, "type": "comment" })
}

pub(crate) fn story(id: u64, kids: &[u64]) -> Value {
  json!({
    "by": "pg",
    "descendants": kids.len(),
    "id": id,
    "kids": kids,
    "score": 10,
    "time": 1_700_000_000,
    "title": format!("Story {id}"),
    "type": "story",
    "url": format!("https://example.com/{id}")
  })
}
