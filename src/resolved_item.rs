use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResolvedItem {
  pub(crate) children: Vec<ResolvedItem>,
  pub(crate) item: Item,
}

impl ResolvedItem {
  pub(crate) fn leaf(item: Item) -> Self {
    Self {
      children: Vec::new(),
      item,
    }
  }

  /// Number of resolved descendants, which may be lower than the
  /// upstream `descendant_count` when parts of the tree were dropped.
  pub(crate) fn resolved_count(&self) -> usize {
    let mut count = 0;
    let mut stack = vec![self];

    while let Some(node) = stack.pop() {
      count += node.children.len();
      stack.extend(node.children.iter());
    }

    count
  }
}
