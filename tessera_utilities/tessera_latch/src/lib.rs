// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Completion Latch
//!
//! A [`CompletionLatch`] watches a fixed set of named events and, once each of them has been
//! recorded at least once, hands a completion callback to a [`Scheduler`] on its fast lane. The
//! latch never resets: the callback is dispatched at most once over its lifetime.
//!
//! Asynchronous sources that should not see the whole latch can be given an [`EventTrigger`]
//! instead, which is bound to a single event.
//!
//! ```
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use tessera_latch::{CompletionLatch, ManualScheduler};
//!
//! let scheduler = ManualScheduler::new();
//! let complete = Arc::new(AtomicBool::new(false));
//! let flag = complete.clone();
//! let latch = CompletionLatch::new(&scheduler, ["first", "second"], move || {
//!     flag.store(true, Ordering::SeqCst)
//! });
//!
//! let trigger = latch.trigger("second");
//! assert!(latch.record("first"));
//! assert!(trigger.fire());
//! assert!(latch.done());
//!
//! scheduler.run_pending();
//! assert!(complete.load(Ordering::SeqCst));
//! ```

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

mod scheduler;

pub use scheduler::{Lane, ManualScheduler, Scheduler, Task, TokioScheduler};


/// The lane on which the completion callback is dispatched.
const COMPLETION_LANE: Lane = Lane::Fast;

struct LatchState {
    /// Whether each tracked event has been recorded.
    fired: HashMap<String, bool>,
    done: bool,
    /// Taken when the latch completes.
    on_complete: Option<Task>,
}

enum Recorded {
    Ignored,
    Accepted,
    Completed(Task),
}

impl LatchState {
    fn mark(&mut self, event: &str) -> Recorded {
        let LatchState {
            fired,
            done,
            on_complete,
        } = self;
        match fired.get_mut(event) {
            Some(flag) => *flag = true,
            None => return Recorded::Ignored,
        }
        if *done || !fired.values().all(|flag| *flag) {
            Recorded::Accepted
        } else {
            *done = true;
            on_complete
                .take()
                .map_or(Recorded::Accepted, Recorded::Completed)
        }
    }
}

struct LatchInner<S> {
    scheduler: S,
    state: Mutex<LatchState>,
}

impl<S: Scheduler> LatchInner<S> {
    fn record(&self, event: &str) -> bool {
        // The lock must be released before dispatching: a scheduler that runs tasks immediately
        // may call back into the latch.
        let (recorded, num_events) = {
            let mut guard = self.state.lock();
            let recorded = guard.mark(event);
            (recorded, guard.fired.len())
        };
        match recorded {
            Recorded::Ignored => {
                trace!(name = event, "Ignoring an event that is not tracked by the latch.");
                false
            }
            Recorded::Accepted => {
                trace!(name = event, "Event recorded.");
                true
            }
            Recorded::Completed(on_complete) => {
                trace!(name = event, "Event recorded.");
                self.complete(num_events, on_complete);
                true
            }
        }
    }

    fn complete(&self, num_events: usize, on_complete: Task) {
        debug!(num_events, "All events fired. Dispatching completion callback.");
        self.scheduler.dispatch(COMPLETION_LANE, on_complete);
    }
}

/// A one-shot latch that dispatches a callback once every event in a fixed set has been recorded.
///
/// The latch shares its scheduler rather than owning one: pass `&S` or `Arc<S>` to use a scheduler
/// that is also used elsewhere. Calls to [`CompletionLatch::record`] are serialized internally so
/// the completion callback will be dispatched at most once, even if events are recorded from
/// several threads.
pub struct CompletionLatch<S> {
    inner: Arc<LatchInner<S>>,
}

impl<S> Debug for CompletionLatch<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let guard = self.inner.state.lock();
        f.debug_struct("CompletionLatch")
            .field("fired", &guard.fired)
            .field("done", &guard.done)
            .finish()
    }
}

impl<S: Scheduler> CompletionLatch<S> {
    /// # Arguments
    /// * `scheduler` - Used to dispatch the completion callback.
    /// * `events` - The events to wait for. Duplicates are collapsed into a single event.
    /// * `on_complete` - Called once all of the events have been recorded.
    ///
    /// # Note
    ///
    /// If `events` is empty the latch is complete on creation and `on_complete` is dispatched
    /// before this returns. A scheduler that runs fast tasks immediately will therefore have run
    /// the callback already.
    pub fn new<I, E, F>(scheduler: S, events: I, on_complete: F) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
        F: FnOnce() + Send + 'static,
    {
        let fired: HashMap<String, bool> = events
            .into_iter()
            .map(|event| (event.into(), false))
            .collect();
        let done = fired.is_empty();
        let on_complete: Task = Box::new(on_complete);
        let (on_complete, immediate) = if done {
            (None, Some(on_complete))
        } else {
            (Some(on_complete), None)
        };
        let inner = Arc::new(LatchInner {
            scheduler,
            state: Mutex::new(LatchState {
                fired,
                done,
                on_complete,
            }),
        });
        if let Some(on_complete) = immediate {
            inner.complete(0, on_complete);
        }
        CompletionLatch { inner }
    }

    /// Create a latch with no completion callback. This is useful when completion is only observed
    /// through [`CompletionLatch::done`].
    pub fn without_callback<I, E>(scheduler: S, events: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        CompletionLatch::new(scheduler, events, || {})
    }

    /// Record that an event has fired. Returns `false`, and does nothing else, if the event is not
    /// tracked by this latch. Recording the same event more than once has no further effect.
    pub fn record(&self, event: &str) -> bool {
        self.inner.record(event)
    }

    /// Create a trigger that will record `event` on this latch when fired.
    pub fn trigger(&self, event: impl Into<String>) -> EventTrigger<S> {
        EventTrigger {
            inner: self.inner.clone(),
            event: event.into(),
        }
    }
}

impl<S> CompletionLatch<S> {
    /// Whether every tracked event has been recorded.
    pub fn done(&self) -> bool {
        self.inner.state.lock().done
    }

    /// The events that have not been recorded yet, in sorted order.
    pub fn pending(&self) -> Vec<String> {
        let guard = self.inner.state.lock();
        let mut pending = guard
            .fired
            .iter()
            .filter(|(_, fired)| !**fired)
            .map(|(event, _)| event.clone())
            .collect::<Vec<_>>();
        pending.sort();
        pending
    }

    /// The number of distinct events tracked by the latch.
    pub fn len(&self) -> usize {
        self.inner.state.lock().fired.len()
    }

    /// Whether the latch tracks no events at all (and so was complete on creation).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Records a single, fixed event on a [`CompletionLatch`]. Triggers keep the state of the latch
/// alive so can be moved into tasks that outlive the latch handle.
pub struct EventTrigger<S> {
    inner: Arc<LatchInner<S>>,
    event: String,
}

impl<S> Debug for EventTrigger<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTrigger")
            .field("event", &self.event)
            .finish()
    }
}

impl<S> Clone for EventTrigger<S> {
    fn clone(&self) -> Self {
        EventTrigger {
            inner: self.inner.clone(),
            event: self.event.clone(),
        }
    }
}

impl<S> EventTrigger<S> {
    /// The event that this trigger records.
    pub fn event(&self) -> &str {
        &self.event
    }
}

impl<S: Scheduler> EventTrigger<S> {
    /// Record the event on the latch. This behaves exactly as [`CompletionLatch::record`].
    pub fn fire(&self) -> bool {
        self.inner.record(&self.event)
    }
}
