use super::*;

/// String key-value persistence for client-side state.
pub(crate) trait Store {
  fn get(&self, key: &str) -> Result<Option<String>>;

  fn set(&self, key: &str, value: &str) -> Result;
}

/// Keeps each key in its own `<key>.json` file under `dir`.
#[derive(Debug)]
pub(crate) struct FileStore {
  dir: PathBuf,
}

impl FileStore {
  pub(crate) fn new(dir: PathBuf) -> Self {
    Self { dir }
  }

  fn path(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{key}.json"))
  }
}

impl Store for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let path = self.path(key);

    let bytes = match fs::read(&path) {
      Ok(bytes) => bytes,
      Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(source) => return Err(Error::Io { path, source }),
    };

    match String::from_utf8(bytes) {
      Ok(value) => Ok(Some(value)),
      Err(error) => {
        warn!(
          %error,
          path = %path.display(),
          "ignoring stored value that is not UTF-8"
        );
        Ok(None)
      }
    }
  }

  fn set(&self, key: &str, value: &str) -> Result {
    fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
      path: self.dir.clone(),
      source,
    })?;

    let path = self.path(key);

    fs::write(&path, value).map_err(|source| Error::Io { path, source })
  }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
  values: Arc<Mutex<HashMap<String, String>>>,
}

#[cfg(test)]
impl Store for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(self.values.lock().unwrap().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result {
    self
      .values
      .lock()
      .unwrap()
      .insert(key.to_string(), value.to_string());

    Ok(())
  }
}
