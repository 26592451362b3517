use super::*;

pub(crate) struct Favorites {
  ids: Vec<u64>,
  set: HashSet<u64>,
  store: Box<dyn Store>,
}

impl Favorites {
  const KEY: &str = "favorites-storage";

  pub(crate) fn add(&mut self, id: u64) -> Result<bool> {
    if !self.set.insert(id) {
      return Ok(false);
    }

    self.ids.push(id);
    self.persist()?;

    Ok(true)
  }

  pub(crate) fn contains(&self, id: u64) -> bool {
    self.set.contains(&id)
  }

  /// Parses a stored payload, falling back to no favorites when it is not a
  /// JSON array of positive integers.
  fn decode(payload: &str) -> Vec<u64> {
    let ids = match serde_json::from_str::<Vec<u64>>(payload) {
      Ok(ids) if !ids.contains(&0) => ids,
      Ok(_) | Err(_) => {
        warn!("ignoring corrupt favorites payload");
        return Vec::new();
      }
    };

    let mut seen = HashSet::new();

    ids.into_iter().filter(|id| seen.insert(*id)).collect()
  }

  pub(crate) fn ids(&self) -> &[u64] {
    &self.ids
  }

  pub(crate) fn load(store: Box<dyn Store>) -> Result<Self> {
    let ids = store
      .get(Self::KEY)?
      .map(|payload| Self::decode(&payload))
      .unwrap_or_default();

    let set = ids.iter().copied().collect();

    Ok(Self { ids, set, store })
  }

  fn persist(&self) -> Result {
    self
      .store
      .set(Self::KEY, &serde_json::to_string(&self.ids)?)
  }

  pub(crate) fn remove(&mut self, id: u64) -> Result<bool> {
    if !self.set.remove(&id) {
      return Ok(false);
    }

    self.ids.retain(|existing| *existing != id);
    self.persist()?;

    Ok(true)
  }

  pub(crate) fn toggle(&mut self, id: u64) -> Result<bool> {
    if self.contains(id) {
      self.remove(id)?;
      Ok(false)
    } else {
      self.add(id)?;
      Ok(true)
    }
  }
}
