use super::*;

/// A validated upstream item. Records that are deleted, dead, of an unknown
/// type or missing the fields their type requires never become an `Item`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Item {
  pub(crate) author: Option<String>,
  pub(crate) child_ids: Vec<u64>,
  pub(crate) created_at: Option<i64>,
  pub(crate) descendant_count: Option<u64>,
  pub(crate) external_url: Option<String>,
  pub(crate) id: u64,
  pub(crate) kind: ItemKind,
  pub(crate) score: Option<u64>,
  pub(crate) text_html: Option<String>,
  pub(crate) title: Option<String>,
}

impl Item {
  pub(crate) fn discussion_url(&self) -> String {
    format!("{DISCUSSION_URL}{}", self.id)
  }

  pub(crate) fn from_record(record: ItemRecord) -> Option<Self> {
    let kind = record.kind();

    let has_title = record.title.as_deref().is_some_and(|t| !t.is_empty());
    let has_author = record.by.as_deref().is_some_and(|by| !by.is_empty());
    let has_text = record.text.is_some();

    let valid = match kind {
      ItemKind::Comment => has_author && has_text,
      ItemKind::Job => has_title,
      ItemKind::Poll => has_title && has_author,
      ItemKind::PollOption => has_text,
      ItemKind::Story => has_title && has_author && record.time.is_some(),
      ItemKind::Deleted | ItemKind::Unknown => false,
    };

    if !valid {
      return None;
    }

    Some(Self {
      author: record.by,
      child_ids: record.kids.unwrap_or_default(),
      created_at: record.time,
      descendant_count: record.descendants,
      external_url: record.url.filter(|url| !url.is_empty()),
      id: record.id,
      kind,
      score: record.score,
      text_html: record.text,
      title: record.title,
    })
  }

  pub(crate) fn host(&self) -> Option<String> {
    let url = reqwest::Url::parse(self.external_url.as_deref()?).ok()?;

    url
      .host_str()
      .map(|host| host.trim_start_matches("www.").to_string())
  }

  pub(crate) fn link(&self) -> String {
    self
      .external_url
      .clone()
      .unwrap_or_else(|| self.discussion_url())
  }
}
