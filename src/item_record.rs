use super::*;

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ItemRecord {
  pub(crate) by: Option<String>,
  pub(crate) dead: Option<bool>,
  pub(crate) deleted: Option<bool>,
  pub(crate) descendants: Option<u64>,
  pub(crate) id: u64,
  pub(crate) kids: Option<Vec<u64>>,
  pub(crate) score: Option<u64>,
  pub(crate) text: Option<String>,
  pub(crate) time: Option<i64>,
  pub(crate) title: Option<String>,
  pub(crate) r#type: Option<String>,
  pub(crate) url: Option<String>,
}

impl ItemRecord {
  pub(crate) fn kind(&self) -> ItemKind {
    if self.deleted.unwrap_or(false) || self.dead.unwrap_or(false) {
      return ItemKind::Deleted;
    }

    match self.r#type.as_deref() {
      Some("comment") => ItemKind::Comment,
      Some("job") => ItemKind::Job,
      Some("poll") => ItemKind::Poll,
      Some("pollopt") => ItemKind::PollOption,
      Some("story") => ItemKind::Story,
      _ => ItemKind::Unknown,
    }
  }
}
