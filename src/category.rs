use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CategoryKind {
  Favorites,
  Stories(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Category {
  Ask,
  Best,
  Favorites,
  Jobs,
  New,
  Show,
  Top,
}

impl Category {
  pub(crate) fn all() -> &'static [Category] {
    &[
      Category::Top,
      Category::New,
      Category::Best,
      Category::Ask,
      Category::Show,
      Category::Jobs,
      Category::Favorites,
    ]
  }

  pub(crate) fn kind(self) -> CategoryKind {
    match self {
      Category::Ask => CategoryKind::Stories("askstories"),
      Category::Best => CategoryKind::Stories("beststories"),
      Category::Favorites => CategoryKind::Favorites,
      Category::Jobs => CategoryKind::Stories("jobstories"),
      Category::New => CategoryKind::Stories("newstories"),
      Category::Show => CategoryKind::Stories("showstories"),
      Category::Top => CategoryKind::Stories("topstories"),
    }
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      Category::Ask => "ask",
      Category::Best => "best",
      Category::Favorites => "favorites",
      Category::Jobs => "jobs",
      Category::New => "new",
      Category::Show => "show",
      Category::Top => "top",
    }
  }

  pub(crate) fn labels() -> String {
    Self::all()
      .iter()
      .map(|category| category.label())
      .collect::<Vec<_>>()
      .join(", ")
  }
}

impl Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for Category {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::all()
      .iter()
      .copied()
      .find(|category| category.label() == s)
      .ok_or_else(|| Error::InvalidCategory {
        category: s.to_string(),
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_category_round_trips_through_its_label() {
    for category in Category::all() {
      assert_eq!(category.label().parse::<Category>().unwrap(), *category);
    }
  }

  #[test]
  fn table_lists_each_variant_once() {
    let labels = Category::all()
      .iter()
      .map(|category| category.label())
      .collect::<HashSet<_>>();

    assert_eq!(labels.len(), Category::all().len());
    assert_eq!(labels.len(), 7);
  }

  #[test]
  fn story_categories_map_to_upstream_endpoints() {
    assert_eq!(Category::Top.kind(), CategoryKind::Stories("topstories"));
    assert_eq!(Category::Ask.kind(), CategoryKind::Stories("askstories"));
    assert_eq!(Category::Favorites.kind(), CategoryKind::Favorites);
  }

  #[test]
  fn unknown_labels_are_rejected() {
    assert!(matches!(
      "past".parse::<Category>(),
      Err(Error::InvalidCategory { category }) if category == "past"
    ));

    assert!("Top".parse::<Category>().is_err());
    assert!("".parse::<Category>().is_err());
  }
}
