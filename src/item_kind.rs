#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ItemKind {
  Comment,
  Deleted,
  Job,
  Poll,
  PollOption,
  Story,
  Unknown,
}

impl ItemKind {
  pub(crate) fn label(self) -> &'static str {
    match self {
      Self::Comment => "comment",
      Self::Deleted => "deleted",
      Self::Job => "job",
      Self::Poll => "poll",
      Self::PollOption => "pollopt",
      Self::Story => "story",
      Self::Unknown => "unknown",
    }
  }
}
