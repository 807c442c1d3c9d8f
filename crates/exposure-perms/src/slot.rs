//! Holder for one permission kind's status.
//!
//! The current value lives in a `watch` channel so readers always get a
//! whole snapshot and can await changes. Prompts go through [`StatusSlot::coalesce`]
//! so overlapping requests share one native call.

use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use tokio::sync::{watch, Mutex};

type InFlight<S> = Shared<BoxFuture<'static, S>>;

pub(crate) struct StatusSlot<S> {
    status: watch::Sender<S>,
    /// The prompt currently awaiting the user, if any.
    ///
    /// Held weakly: once every caller awaiting it has dropped, it can no
    /// longer be upgraded and the next request starts a fresh prompt.
    in_flight: Mutex<Option<WeakShared<BoxFuture<'static, S>>>>,
}

impl<S> StatusSlot<S>
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    pub(crate) fn new(initial: S) -> Self {
        let (status, _) = watch::channel(initial);
        Self {
            status,
            in_flight: Mutex::new(None),
        }
    }

    pub(crate) fn current(&self) -> S {
        self.status.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<S> {
        self.status.subscribe()
    }

    /// Store a completed value. Watchers are woken only if it changed.
    pub(crate) fn publish(&self, value: S) -> S {
        self.status.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value.clone();
            true
        });
        value
    }

    /// Run `start` unless a prompt is already in flight, in which case wait
    /// for that one instead.
    ///
    /// A prompt that has already resolved, or that every caller abandoned,
    /// is never joined. The lock is held only while choosing.
    pub(crate) async fn coalesce<F>(&self, start: F) -> S
    where
        F: FnOnce() -> BoxFuture<'static, S>,
    {
        let prompt: InFlight<S> = {
            let mut in_flight = self.in_flight.lock().await;
            let pending = in_flight
                .as_ref()
                .and_then(WeakShared::upgrade)
                .filter(|prompt| prompt.peek().is_none());

            match pending {
                Some(prompt) => {
                    tracing::debug!("joining in-flight permission prompt");
                    prompt
                }
                None => {
                    let prompt = start().shared();
                    *in_flight = prompt.downgrade();
                    prompt
                }
            }
        };

        let value = prompt.await;
        self.publish(value)
    }
}
