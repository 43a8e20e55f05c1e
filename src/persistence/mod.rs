//! Persistence of the graph document across page loads.
//!
//! The document is kept in a [`DurableStore`] under a single key. A
//! [`Poller`] re-reads that key on an interval so changes made by another
//! tab show up without a reload.

mod storage;
mod sync;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use leptos::leptos_dom::helpers::{IntervalHandle, set_interval_with_handle};
use log::warn;

pub use storage::{CookieStore, DurableStore, MemoryStore, cookie_value, expiry_duration};
pub use sync::{LoadOutcome, PersistenceSync, PollOutcome, StorageSettings};

/// Shared flag telling a periodic task to stop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	/// Tells every holder of this token to stop.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::Release);
	}

	/// Whether `cancel` has been called.
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}

	/// Wraps `tick` so that it does nothing once this token is cancelled.
	pub fn guard(&self, tick: impl Fn() + 'static) -> impl Fn() + 'static {
		let token = self.clone();
		move || {
			if !token.is_cancelled() {
				tick();
			}
		}
	}
}

/// A cancellable interval timer. Dropping it cancels it.
#[derive(Debug)]
pub struct Poller {
	token: CancelToken,
	handle: Option<IntervalHandle>,
}

impl Poller {
	/// Runs `tick` every `interval` on the host event loop.
	pub fn start(interval: Duration, tick: impl Fn() + 'static) -> Self {
		let token = CancelToken::default();
		let handle = match set_interval_with_handle(token.guard(tick), interval) {
			Ok(handle) => Some(handle),
			Err(e) => {
				warn!("grafo: could not start poll timer: {:?}", e);
				None
			}
		};
		Self { token, handle }
	}

	/// Stops the timer. Any tick already queued becomes a no-op.
	pub fn cancel(&mut self) {
		self.token.cancel();
		if let Some(handle) = self.handle.take() {
			handle.clear();
		}
	}

	/// Whether the timer has been stopped.
	pub fn is_cancelled(&self) -> bool {
		self.token.is_cancelled()
	}
}

impl Drop for Poller {
	fn drop(&mut self) {
		self.cancel();
	}
}
