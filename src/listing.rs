use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListingStatus {
  /// The category has no items at all.
  EmptyCategory,
  Ready,
  /// The page had ids, but none of them could be shown.
  Unavailable,
}

#[derive(Clone, Debug)]
pub(crate) struct Listing {
  pub(crate) category: Category,
  pub(crate) items: Vec<ResolvedItem>,
  pub(crate) redirected_from: Option<usize>,
  pub(crate) status: ListingStatus,
  pub(crate) total_count: usize,
  pub(crate) window: PageWindow,
}
