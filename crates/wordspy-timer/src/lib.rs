//! Cancellable deferred timers for Wordspy.
//!
//! A [`TimerQueue`] holds the pending timers of a single owner (one room
//! actor): disconnect grace periods, the round-advance delay, the room
//! deletion window. Timers are keyed, replaceable, and idempotently
//! cancellable.
//!
//! # Cancellation is race-free
//!
//! Each scheduled timer carries a generation number. [`TimerQueue::cancel`]
//! drops the key's current generation; when a sleep task fires, its expiry
//! is delivered through an internal channel and checked against the live
//! generation *inside the owner's task*. A timer that was cancelled — or
//! replaced by a newer schedule for the same key — the instant it fired is
//! discarded there, so "cancel" and "fire" can never both apply.
//!
//! # Integration
//!
//! The queue is designed to sit inside a room actor's `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         key = timers.expired() => { /* handle the elapsed timer */ }
//!     }
//! }
//! ```
//!
//! With nothing scheduled, `expired()` simply pends and the other select
//! branches keep running.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tracing::trace;

/// Message sent from a sleep task back to its queue.
struct Expiry<K> {
    key: K,
    generation: u64,
}

/// A set of pending, cancellable timers keyed by `K`.
///
/// Not `Clone` and not thread-safe by design: a queue belongs to exactly
/// one task, which is what makes the fire/cancel check atomic.
pub struct TimerQueue<K> {
    tx: mpsc::UnboundedSender<Expiry<K>>,
    rx: mpsc::UnboundedReceiver<Expiry<K>>,
    /// Live generation per key. A missing key means "nothing scheduled".
    live: HashMap<K, u64>,
    next_generation: u64,
}

impl<K> TimerQueue<K>
where
    K: Eq + Hash + Clone + Send + std::fmt::Debug + 'static,
{
    /// Creates an empty timer queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            live: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Schedules (or reschedules) the timer for `key` to fire after `delay`.
    ///
    /// A previously scheduled timer for the same key is superseded: its
    /// eventual expiry will be recognized as stale and dropped.
    pub fn schedule(&mut self, key: K, delay: Duration) {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.live.insert(key.clone(), generation);

        let tx = self.tx.clone();
        let task_key = key.clone();
        tokio::spawn(async move {
            time::sleep(delay).await;
            // The queue may be gone; a dead receiver is fine.
            let _ = tx.send(Expiry {
                key: task_key,
                generation,
            });
        });

        trace!(?key, ?delay, generation, "timer scheduled");
    }

    /// Cancels the pending timer for `key`, if any.
    ///
    /// Returns `true` if a timer was pending. Cancelling a missing or
    /// already-fired timer is a no-op.
    pub fn cancel(&mut self, key: &K) -> bool {
        let was_live = self.live.remove(key).is_some();
        if was_live {
            trace!(?key, "timer cancelled");
        }
        was_live
    }

    /// Returns `true` if a timer is currently pending for `key`.
    pub fn is_scheduled(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.live.clear();
    }

    /// Waits for the next live timer to elapse and returns its key.
    ///
    /// Stale expiries (cancelled or superseded generations) are skipped.
    /// Pends forever while no timer is scheduled — safe to park in a
    /// `tokio::select!` branch. Cancel-safe: the only await point is the
    /// channel receive.
    pub async fn expired(&mut self) -> K {
        loop {
            // recv() cannot return None: we hold a sender for the queue's
            // own lifetime.
            let Some(expiry) = self.rx.recv().await else {
                unreachable!("timer queue holds its own sender");
            };
            match self.live.get(&expiry.key) {
                Some(generation) if *generation == expiry.generation => {
                    self.live.remove(&expiry.key);
                    trace!(key = ?expiry.key, "timer elapsed");
                    return expiry.key;
                }
                _ => {
                    trace!(key = ?expiry.key, "stale timer expiry dropped");
                }
            }
        }
    }
}

impl<K> Default for TimerQueue<K>
where
    K: Eq + Hash + Clone + Send + std::fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
