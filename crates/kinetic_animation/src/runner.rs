//! Async playback
//!
//! Drives a chain from a tokio interval so callers can `.await` its end.

use crate::chain::{AnimationChain, ChainState};
use crate::error::Result;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};

/// Shortest frame period the runner ticks at
pub const MIN_FRAME: Duration = Duration::from_millis(1);

/// Play `chain` and tick it every `frame` until it stops playing.
///
/// `frame` is raised to [`MIN_FRAME`] when shorter. Returns the chain's final
/// state, which is `Completed` once the last step finishes.
///
/// Dropping the future cancels playback and leaves the chain `Playing`;
/// call [`AnimationChain::stop`] on it afterwards to halt its drivers.
pub async fn play_chain(chain: &mut AnimationChain, frame: Duration) -> Result<ChainState> {
    chain.play()?;

    let mut ticker = interval(frame.max(MIN_FRAME));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;
    let mut last = Instant::now();

    while chain.is_playing() {
        ticker.tick().await;
        let now = Instant::now();
        chain.tick((now - last).as_secs_f32() * 1000.0);
        last = now;
    }

    tracing::debug!(state = ?chain.state(), "chain playback finished");
    Ok(chain.state())
}
