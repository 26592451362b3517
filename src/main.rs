use {
  anyhow::{Context, anyhow},
  arguments::Arguments,
  async_trait::async_trait,
  cache::{Cache, CachePolicy, Lookup},
  category::{Category, CategoryKind},
  chrono::Utc,
  clap::{Parser, Subcommand},
  client::Client,
  command::Command,
  config::{Config, TreeLimits},
  crossterm::{style::Stylize, terminal},
  error::Error,
  favorites::Favorites,
  favorites_command::FavoritesCommand,
  futures::stream::{self, StreamExt},
  http_source::HttpSource,
  item::Item,
  item_kind::ItemKind,
  item_record::ItemRecord,
  listing::{Listing, ListingStatus},
  page_window::{PageStatus, PageWindow},
  render::Renderer,
  reply_tree::ReplyTree,
  reqwest::StatusCode,
  resolved_item::ResolvedItem,
  retry::Retry,
  serde::Deserialize,
  source::Source,
  std::{
    backtrace::BacktraceStatus,
    collections::HashSet,
    env,
    fmt::{self, Display},
    fs,
    future::Future,
    hash::Hash,
    io::{self, IsTerminal, Write},
    iter, mem,
    path::{Path, PathBuf},
    process,
    str::FromStr,
    sync::{
      Arc,
      atomic::{self, AtomicBool},
    },
    time::Duration,
  },
  store::{FileStore, Store},
  tokio::time::{self, Instant},
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  utils::{
    format_comment_count, format_points, format_time_ago, sanitize_comment,
    truncate,
  },
};

#[cfg(test)]
use {
  fake_source::{FakeSource, comment, dead, story},
  serde_json::{Value, json},
  std::{
    collections::HashMap,
    sync::{Mutex, atomic::AtomicUsize},
  },
  store::MemoryStore,
};

mod arguments;
mod cache;
mod category;
mod client;
mod command;
mod config;
mod error;
#[cfg(test)]
mod fake_source;
mod favorites;
mod favorites_command;
mod http_source;
mod item;
mod item_kind;
mod item_record;
mod listing;
mod page_window;
mod render;
mod reply_tree;
mod resolved_item;
mod retry;
mod source;
mod store;
mod utils;

const DISCUSSION_URL: &str = "https://news.ycombinator.com/item?id=";

const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

const USER_AGENT: &str =
  concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

type Result<T = (), E = Error> = std::result::Result<T, E>;

#[tokio::main]
async fn main() {
  if let Err(error) = Arguments::parse().run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
