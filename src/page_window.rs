use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageStatus {
  InRange,
  OutOfRange { redirect: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PageWindow {
  pub(crate) end: usize,
  pub(crate) links: Vec<usize>,
  pub(crate) page: usize,
  pub(crate) start: usize,
  pub(crate) status: PageStatus,
  pub(crate) total_pages: usize,
}

impl PageWindow {
  /// Computes the slice bounds and navigation links for `page` (1-based).
  ///
  /// Out-of-range pages report the page to redirect to. Links are always
  /// centered on the page that would actually be shown.
  pub(crate) fn compute(
    total_count: usize,
    per_page: usize,
    page: usize,
    max_links: usize,
  ) -> Result<Self> {
    if per_page == 0 {
      return Err(Error::InvalidPerPage);
    }

    let total_pages = total_count.div_ceil(per_page);

    let last_page = total_pages.max(1);

    let status = if page < 1 || page > last_page {
      PageStatus::OutOfRange {
        redirect: page.clamp(1, last_page),
      }
    } else {
      PageStatus::InRange
    };

    let shown = match status {
      PageStatus::InRange => page,
      PageStatus::OutOfRange { redirect } => redirect,
    };

    let links = if total_pages == 0 {
      Vec::new()
    } else {
      let max_links = max_links.max(1);
      let first = shown.saturating_sub(max_links / 2).max(1);
      let last = total_pages.min(first + max_links - 1);
      ((last + 1).saturating_sub(max_links).max(1)..=last).collect()
    };

    Ok(Self {
      end: page.saturating_mul(per_page),
      links,
      page,
      start: page.saturating_sub(1).saturating_mul(per_page),
      status,
      total_pages,
    })
  }

  pub(crate) fn has_next(&self) -> bool {
    self.page < self.total_pages
  }

  pub(crate) fn has_previous(&self) -> bool {
    self.page > 1
  }

  /// The part of `items` this page covers, clamped to what exists.
  pub(crate) fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
    let start = self.start.min(items.len());
    let end = self.end.min(items.len());
    &items[start..end]
  }
}
