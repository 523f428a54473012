/// Subcommand implementations
///
/// Each command builds a fresh [`PlayerSession`] over the configured
/// collaborators and writes human-readable output.
use crate::device::HeadlessDevice;
use crate::error::{CliError, Result};
use pokoro_core::{FavoritesStore, GuestIdStore, Track, TrackCatalog, TrackId};
use pokoro_playback::{format_time, ActiveView, PlaybackConfig};
use pokoro_session::{PlayerSession, SessionIdentity};
use std::io::Write;
use tracing::info;

/// Collaborators shared by all commands
pub struct Context<'a> {
    pub catalog: &'a dyn TrackCatalog,
    pub favorites: &'a dyn FavoritesStore,
    pub guests: &'a dyn GuestIdStore,
    pub host_user_id: Option<String>,
    pub playback: PlaybackConfig,
}

impl Context<'_> {
    fn identity(&self) -> SessionIdentity {
        SessionIdentity::resolve(&self.host_user_id, self.guests)
    }

    async fn open_session(&self) -> PlayerSession<HeadlessDevice> {
        let mut session = PlayerSession::new(HeadlessDevice, self.playback);
        session.set_identity(self.identity());
        session.refresh_catalog(self.catalog).await;
        session.load_favorites(self.favorites).await;
        session
    }
}

/// Print the resolved user id and where it came from
pub fn whoami(ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let identity = ctx.identity();
    writeln!(out, "{} ({:?})", identity.user_id(), identity.source())?;
    Ok(())
}

/// List the queue for a search text and view
pub async fn tracks(
    ctx: &Context<'_>,
    search: Option<&str>,
    favorites_only: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut session = ctx.open_session().await;
    if let Some(search) = search {
        session.set_search_text(search);
    }
    if favorites_only {
        session.set_view(ActiveView::Favorites);
    }

    if session.queue().is_empty() {
        writeln!(out, "No tracks")?;
        return Ok(());
    }
    for track in session.queue() {
        write_track(out, track, session.is_favorite(&track.id))?;
    }
    Ok(())
}

/// Flip the favorite mark of a catalog track
pub async fn favorite(ctx: &Context<'_>, track_id: &str, out: &mut dyn Write) -> Result<()> {
    let mut session = ctx.open_session().await;
    let id = TrackId::from(track_id);

    let Some(track) = session.catalog().iter().find(|t| t.id == id).cloned() else {
        return Err(CliError::UnknownTrack(track_id.to_string()));
    };

    let was_favorite = session.is_favorite(&id);
    session.toggle_favorite(ctx.favorites, &id).await;
    let is_favorite = session.is_favorite(&id);

    if was_favorite == is_favorite {
        writeln!(out, "Could not update favorite for {}", track.title)?;
    } else if is_favorite {
        info!(track_id = %id, "Added favorite");
        writeln!(out, "Added {} - {} to favorites", track.title, track.artist)?;
    } else {
        info!(track_id = %id, "Removed favorite");
        writeln!(out, "Removed {} - {} from favorites", track.title, track.artist)?;
    }
    Ok(())
}

/// Print the profile summary
pub async fn profile(ctx: &Context<'_>, json: bool, out: &mut dyn Write) -> Result<()> {
    let session = ctx.open_session().await;
    let profile = session.profile();

    if json {
        serde_json::to_writer_pretty(&mut *out, &profile)?;
        writeln!(out)?;
        return Ok(());
    }

    let user = profile
        .user_id
        .as_ref()
        .map_or_else(|| "unknown".to_string(), ToString::to_string);
    writeln!(out, "User:      {}", user)?;
    writeln!(out, "Favorites: {}", profile.favorites_count)?;
    writeln!(out, "Shuffle:   {}", profile.shuffle_label())?;
    writeln!(out, "Repeat:    {}", profile.repeat_label())?;
    writeln!(out, "Premium:   not available")?;

    let transport = session.transport();
    if let Some(track) = transport.current_track() {
        let snapshot = transport.session();
        writeln!(
            out,
            "Now:       {} - {} [{} / {}]",
            track.title,
            track.artist,
            format_time(snapshot.position_seconds),
            format_time(snapshot.duration_seconds)
        )?;
    }
    Ok(())
}

fn write_track(out: &mut dyn Write, track: &Track, favorite: bool) -> Result<()> {
    let marker = if favorite { '*' } else { ' ' };
    writeln!(
        out,
        "{} {:>6}  {} - {}",
        marker,
        track.id.as_str(),
        track.title,
        track.artist
    )?;
    Ok(())
}
