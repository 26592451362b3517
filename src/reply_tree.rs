use super::*;

struct Reply {
  depth: usize,
  item: Item,
  parent: usize,
}

/// Flat arena of resolved replies. Node `0` is the root and reply `n` is
/// node `n + 1`; every reply is pushed after its parent.
pub(crate) struct ReplyTree {
  replies: Vec<Reply>,
  root: Item,
}

impl ReplyTree {
  pub(crate) fn child_ids(&self, node: usize) -> &[u64] {
    &self.entry(node).0.child_ids
  }

  pub(crate) fn depth(&self, node: usize) -> usize {
    self.entry(node).1
  }

  fn entry(&self, node: usize) -> (&Item, usize) {
    match node.checked_sub(1) {
      None => (&self.root, 0),
      Some(index) => {
        let reply = &self.replies[index];
        (&reply.item, reply.depth)
      }
    }
  }

  pub(crate) fn id(&self, node: usize) -> u64 {
    self.entry(node).0.id
  }

  /// Nests every reply under its parent, keeping siblings in push order.
  pub(crate) fn into_resolved(self) -> ResolvedItem {
    let mut children = iter::repeat_with(Vec::new)
      .take(self.len())
      .collect::<Vec<Vec<ResolvedItem>>>();

    for (index, reply) in self.replies.into_iter().enumerate().rev() {
      let mut own = mem::take(&mut children[index + 1]);
      own.reverse();

      children[reply.parent].push(ResolvedItem {
        children: own,
        item: reply.item,
      });
    }

    let mut top = mem::take(&mut children[0]);
    top.reverse();

    ResolvedItem {
      children: top,
      item: self.root,
    }
  }

  pub(crate) fn len(&self) -> usize {
    self.replies.len() + 1
  }

  pub(crate) fn new(root: Item) -> Self {
    Self {
      replies: Vec::new(),
      root,
    }
  }

  pub(crate) fn push(&mut self, parent: usize, item: Item) -> usize {
    let depth = self.depth(parent) + 1;

    self.replies.push(Reply {
      depth,
      item,
      parent,
    });

    self.replies.len()
  }
}
