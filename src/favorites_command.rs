use super::*;

#[derive(Debug, Subcommand)]
pub(crate) enum FavoritesCommand {
  /// Save an item
  Add { id: u64 },
  /// Print saved item ids, oldest first
  List,
  /// Forget an item
  Remove { id: u64 },
  /// Save an item, or forget it if already saved
  Toggle { id: u64 },
}

impl FavoritesCommand {
  pub(crate) fn run(
    self,
    out: &mut impl Write,
    favorites: &mut Favorites,
  ) -> anyhow::Result<()> {
    let message = match self {
      Self::Add { id } => {
        Self::validate(id)?;

        if favorites.add(id)? {
          format!("added {id} to favorites")
        } else {
          format!("{id} is already a favorite")
        }
      }
      Self::List => {
        for id in favorites.ids() {
          writeln!(out, "{id}")?;
        }

        return Ok(());
      }
      Self::Remove { id } => {
        if favorites.remove(id)? {
          format!("removed {id} from favorites")
        } else {
          format!("{id} is not a favorite")
        }
      }
      Self::Toggle { id } => {
        Self::validate(id)?;

        if favorites.toggle(id)? {
          format!("added {id} to favorites")
        } else {
          format!("removed {id} from favorites")
        }
      }
    };

    writeln!(out, "{message}")?;

    Ok(())
  }

  fn validate(id: u64) -> Result {
    if id == 0 {
      return Err(Error::InvalidId { id });
    }

    Ok(())
  }
}
