//! Next/previous decision logic
//!
//! Pure functions of the queue, the current track, the repeat mode and the
//! shuffle flag. The caller acts on the returned [`Decision`].
//!
//! Shuffle draws uniformly from the whole queue with replacement: there is
//! no play history, so the current track may be picked again.

use crate::queue::index_of;
use crate::types::RepeatMode;
use pokoro_core::{Track, TrackId};
use rand::Rng;

/// What the transport should do after a next/previous request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Queue is empty, leave playback untouched
    NoOp,

    /// Load and play this track (may be the current one)
    Play(TrackId),

    /// End of queue reached with repeat off
    Stop,
}

/// Decide the track after the current one
pub fn decide_next<R: Rng + ?Sized>(
    queue: &[Track],
    current: Option<&TrackId>,
    repeat: RepeatMode,
    shuffle: bool,
    rng: &mut R,
) -> Decision {
    if let Some(decision) = decide_common(queue, current, repeat, shuffle, rng) {
        return decision;
    }

    let index = current.and_then(|id| index_of(queue, id)).unwrap_or(0);
    match queue.get(index + 1) {
        Some(track) => Decision::Play(track.id.clone()),
        None if repeat == RepeatMode::All => Decision::Play(queue[0].id.clone()),
        None => Decision::Stop,
    }
}

/// Decide the track before the current one
///
/// Always wraps, regardless of repeat mode.
pub fn decide_previous<R: Rng + ?Sized>(
    queue: &[Track],
    current: Option<&TrackId>,
    repeat: RepeatMode,
    shuffle: bool,
    rng: &mut R,
) -> Decision {
    if let Some(decision) = decide_common(queue, current, repeat, shuffle, rng) {
        return decision;
    }

    let len = queue.len();
    let index = current.and_then(|id| index_of(queue, id)).unwrap_or(0);
    Decision::Play(queue[(index + len - 1) % len].id.clone())
}

/// Rules shared by both directions: empty queue, repeat one, shuffle
fn decide_common<R: Rng + ?Sized>(
    queue: &[Track],
    current: Option<&TrackId>,
    repeat: RepeatMode,
    shuffle: bool,
    rng: &mut R,
) -> Option<Decision> {
    if queue.is_empty() {
        return Some(Decision::NoOp);
    }

    if repeat == RepeatMode::One {
        if let Some(id) = current {
            return Some(Decision::Play(id.clone()));
        }
    }

    if shuffle {
        let pick = rng.gen_range(0..queue.len());
        return Some(Decision::Play(queue[pick].id.clone()));
    }

    None
}
