use super::*;

pub(crate) fn format_comment_count(count: u64) -> String {
  match count {
    1 => "1 comment".to_string(),
    _ => format!("{count} comments"),
  }
}

pub(crate) fn sanitize_comment(text: &str) -> String {
  let mut cleaned = String::with_capacity(text.len());
  let mut inside_tag = false;
  let mut last_was_space = false;

  for ch in text.chars() {
    match ch {
      '<' => {
        inside_tag = true;

        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      '>' => {
        inside_tag = false;
      }
      _ if inside_tag => {}
      _ if ch.is_whitespace() => {
        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      _ => {
        cleaned.push(ch);
        last_was_space = false;
      }
    }
  }

  let decoded = html_escape::decode_html_entities(cleaned.trim());

  decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

pub(crate) fn format_points(score: u64) -> String {
  match score {
    1 => "1 point".to_string(),
    _ => format!("{score} points"),
  }
}

/// Compact age of a unix timestamp relative to `now`, in the largest whole
/// unit. Timestamps in the future read as `now`.
pub(crate) fn format_time_ago(created_at: i64, now: i64) -> String {
  const UNITS: [(i64, &str); 6] = [
    (365 * 24 * 60 * 60, "y"),
    (30 * 24 * 60 * 60, "mo"),
    (7 * 24 * 60 * 60, "w"),
    (24 * 60 * 60, "d"),
    (60 * 60, "h"),
    (60, "m"),
  ];

  let elapsed = now.saturating_sub(created_at);

  UNITS
    .iter()
    .find(|(seconds, _)| elapsed >= *seconds)
    .map_or_else(
      || "now".to_string(),
      |(seconds, suffix)| format!("{}{suffix}", elapsed / seconds),
    )
}
