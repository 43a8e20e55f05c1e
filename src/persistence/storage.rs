//! Durable key/value stores with expiry.
//!
//! [`CookieStore`] is what the browser build uses. [`MemoryStore`] keeps
//! entries for the lifetime of the page (used when cookies are unavailable)
//! and runs on a manual clock, which makes expiry testable.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlDocument;

use crate::error::{GrafoError, Result};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Browsers silently drop cookies larger than this.
const MAX_COOKIE_BYTES: usize = 4096;

/// A client-side key/value store whose entries expire.
pub trait DurableStore {
	/// Returns the live value for `key`, or `None` if unset or expired.
	fn get(&self, key: &str) -> Option<String>;

	/// Stores `value` under `key` for `expires_in_days` days.
	fn set(&self, key: &str, value: &str, expires_in_days: f64) -> Result<()>;
}

/// Converts a lifetime in (possibly fractional) days to a duration.
pub fn expiry_duration(expires_in_days: f64) -> Duration {
	Duration::from_secs_f64((expires_in_days * SECONDS_PER_DAY).max(0.0))
}

/// Cookie-backed store for the current page's document.
pub struct CookieStore {
	document: HtmlDocument,
}

impl CookieStore {
	/// Returns `None` outside a browser or when the page is not an HTML document.
	pub fn new() -> Option<Self> {
		let document = web_sys::window()?.document()?;
		let document = document.dyn_into::<HtmlDocument>().ok()?;
		Some(Self { document })
	}
}

impl DurableStore for CookieStore {
	fn get(&self, key: &str) -> Option<String> {
		let cookies = self.document.cookie().ok()?;
		let encoded = cookie_value(&cookies, &String::from(js_sys::encode_uri_component(key)))?;
		match js_sys::decode_uri_component(encoded) {
			Ok(value) => Some(String::from(value)),
			Err(e) => {
				warn!("grafo: cookie {} is not valid URI encoding: {:?}", key, e);
				None
			}
		}
	}

	fn set(&self, key: &str, value: &str, expires_in_days: f64) -> Result<()> {
		let name = String::from(js_sys::encode_uri_component(key));
		let encoded = String::from(js_sys::encode_uri_component(value));
		let cookie = format!(
			"{}={}; max-age={}; path=/; SameSite=Lax",
			name,
			encoded,
			expiry_duration(expires_in_days).as_secs()
		);
		if cookie.len() > MAX_COOKIE_BYTES {
			return Err(GrafoError::Storage(format!(
				"document is {} bytes encoded, cookies hold at most {}",
				cookie.len(),
				MAX_COOKIE_BYTES
			)));
		}

		self.document.set_cookie(&cookie).map_err(js_error)?;

		// The browser may refuse the cookie without reporting an error.
		if self.get(key).as_deref() != Some(value) {
			return Err(GrafoError::Storage(format!("browser did not keep cookie {}", key)));
		}
		Ok(())
	}
}

fn js_error(value: JsValue) -> GrafoError {
	GrafoError::Storage(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// Finds the raw value of cookie `name` in a `document.cookie` string.
pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
	cookies
		.split(';')
		.filter_map(|pair| pair.trim_start().split_once('='))
		.find(|(key, _)| *key == name)
		.map(|(_, value)| value)
}

struct Entry {
	value: String,
	expires_at: Duration,
}

/// In-memory store on a manually advanced clock.
#[derive(Default)]
pub struct MemoryStore {
	entries: RefCell<HashMap<String, Entry>>,
	now: Cell<Duration>,
	writes: Cell<usize>,
}

impl MemoryStore {
	/// An empty store with its clock at zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Moves the store's clock forward.
	pub fn advance(&self, by: Duration) {
		self.now.set(self.now.get() + by);
	}

	/// Time left before `key` expires, if it is live.
	pub fn expires_in(&self, key: &str) -> Option<Duration> {
		let now = self.now.get();
		self.entries
			.borrow()
			.get(key)
			.and_then(|entry| entry.expires_at.checked_sub(now))
			.filter(|left| !left.is_zero())
	}

	/// Number of successful `set` calls so far.
	pub fn writes(&self) -> usize {
		self.writes.get()
	}
}

impl DurableStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		let now = self.now.get();
		let mut entries = self.entries.borrow_mut();
		let expired = entries.get(key)?.expires_at <= now;
		if expired {
			entries.remove(key);
			return None;
		}
		entries.get(key).map(|entry| entry.value.clone())
	}

	fn set(&self, key: &str, value: &str, expires_in_days: f64) -> Result<()> {
		let expires_at = self.now.get() + expiry_duration(expires_in_days);
		self.entries.borrow_mut().insert(
			key.to_string(),
			Entry {
				value: value.to_string(),
				expires_at,
			},
		);
		self.writes.set(self.writes.get() + 1);
		Ok(())
	}
}
