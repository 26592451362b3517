use super::*;

const INDENT: usize = 2;

const MIN_BODY_WIDTH: usize = 20;

/// Plain-text views of listings and threads.
pub(crate) struct Renderer {
  color: bool,
  now: i64,
  width: usize,
}

impl Renderer {
  fn body(html: &str, width: usize) -> String {
    match html2text::from_read(html.as_bytes(), width.max(MIN_BODY_WIDTH)) {
      Ok(text) => text.trim_end().to_owned(),
      Err(error) => {
        debug!(%error, "falling back to stripped markup");
        sanitize_comment(html)
      }
    }
  }

  fn byline(&self, item: &Item) -> String {
    let mut parts = Vec::new();

    match (item.score, item.author.as_deref()) {
      (Some(score), Some(by)) => {
        parts.push(format!("{} by {by}", format_points(score)));
      }
      (Some(score), None) => parts.push(format_points(score)),
      (None, Some(by)) => parts.push(format!("by {by}")),
      (None, None) => {}
    }

    if let Some(created_at) = item.created_at {
      parts.push(format!("{} ago", format_time_ago(created_at, self.now)));
    }

    if let Some(count) = item.descendant_count {
      parts.push(format_comment_count(count));
    }

    parts.join(" | ")
  }

  fn heading(&self, text: &str) -> String {
    if self.color {
      text.bold().to_string()
    } else {
      text.to_string()
    }
  }

  pub(crate) fn listing(
    &self,
    out: &mut impl Write,
    listing: &Listing,
    favorites: &Favorites,
  ) -> io::Result<()> {
    let window = &listing.window;

    if let Some(requested) = listing.redirected_from {
      writeln!(
        out,
        "{}",
        self.muted(&format!(
          "page {requested} is out of range, showing page {}",
          window.page
        ))
      )?;
    }

    match listing.status {
      ListingStatus::EmptyCategory => {
        return writeln!(out, "no stories in {}", listing.category);
      }
      ListingStatus::Unavailable => {
        return writeln!(
          out,
          "could not load any {} stories on page {}",
          listing.category, window.page
        );
      }
      ListingStatus::Ready => {}
    }

    writeln!(
      out,
      "{}",
      self.heading(&format!(
        "{} · page {} of {} · {} items",
        listing.category, window.page, window.total_pages, listing.total_count
      ))
    )?;

    writeln!(out)?;

    for (index, resolved) in listing.items.iter().enumerate() {
      let item = &resolved.item;

      let marker = if favorites.contains(item.id) { "★ " } else { "" };

      let mut title = format!("{marker}{}", Self::title(item));

      if let Some(host) = item.host() {
        title.push_str(&format!(" ({host})"));
      }

      writeln!(out, "{:>3}. {title}", window.start + index + 1)?;

      writeln!(
        out,
        "     {}",
        self.muted(&format!("{} | id {}", self.byline(item), item.id))
      )?;
    }

    writeln!(out)?;

    writeln!(out, "{}", self.page_links(window))
  }

  fn muted(&self, text: &str) -> String {
    if self.color {
      text.dim().to_string()
    } else {
      text.to_string()
    }
  }

  pub(crate) fn new(color: bool, now: i64, width: usize) -> Self {
    Self { color, now, width }
  }

  fn page_links(&self, window: &PageWindow) -> String {
    let mut parts = Vec::new();

    if window.has_previous() {
      parts.push("prev".to_string());
    }

    for &link in &window.links {
      if link == window.page {
        parts.push(self.heading(&format!("[{link}]")));
      } else {
        parts.push(link.to_string());
      }
    }

    if window.has_next() {
      parts.push("next".to_string());
    }

    parts.join(" ")
  }

  pub(crate) fn thread(
    &self,
    out: &mut impl Write,
    thread: &ResolvedItem,
  ) -> io::Result<()> {
    let root = &thread.item;

    writeln!(out, "{}", self.heading(&Self::title(root)))?;
    writeln!(out, "{}", self.muted(&self.byline(root)))?;
    writeln!(out, "{}", root.link())?;

    if root.title.is_some()
      && let Some(html) = &root.text_html
    {
      writeln!(out)?;
      writeln!(out, "{}", Self::body(html, self.width))?;
    }

    writeln!(out)?;

    if thread.children.is_empty() {
      return writeln!(out, "no comments yet");
    }

    writeln!(
      out,
      "{}",
      self.heading(&format_comment_count(thread.resolved_count() as u64))
    )?;

    let mut stack = thread
      .children
      .iter()
      .rev()
      .map(|child| (child, 0))
      .collect::<Vec<_>>();

    while let Some((node, depth)) = stack.pop() {
      let pad = " ".repeat(depth * INDENT);

      let item = &node.item;

      let mut header = item.author.clone().unwrap_or_else(|| "unknown".into());

      if let Some(created_at) = item.created_at {
        header
          .push_str(&format!(" {} ago", format_time_ago(created_at, self.now)));
      }

      writeln!(out)?;
      writeln!(out, "{pad}{}", self.heading(&header))?;

      let body = item
        .text_html
        .as_deref()
        .map(|html| Self::body(html, self.width.saturating_sub(pad.len())))
        .unwrap_or_default();

      for line in body.lines() {
        writeln!(out, "{pad}{line}")?;
      }

      stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    Ok(())
  }

  /// Display title, falling back to a snippet of the body for items
  /// without one.
  fn title(item: &Item) -> String {
    if let Some(title) = &item.title {
      return title.clone();
    }

    item
      .text_html
      .as_deref()
      .map(sanitize_comment)
      .filter(|text| !text.is_empty())
      .map_or_else(
        || format!("{} {}", item.kind.label(), item.id),
        |text| truncate(&text, 80),
      )
  }
}
