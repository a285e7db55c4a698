// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lazy resolution of the session context.
//!
//! Every send resolves the session before building its event:
//!
//! 1. The network type is re-queried and stored as `connection`.
//! 2. If the context already holds every tracked field (plus any extra
//!    required keys of the call), it is used as is.
//! 3. Otherwise the identity provider is asked for the signed-in user. On
//!    success its attributes and the device id are merged in; on failure the
//!    context is reset to `{appVersion}` and the session is degraded.
//!
//! There is no retry and no single-flight: a degraded session looks up the
//! identity again on the next send, and two racing sends both perform a
//! lookup. The lock is released across every await, so concurrent
//! resolutions are last-write-wins.

use serde::{Deserialize, Serialize};
use tally_analytics_core::{field, RequiredKeys};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::collaborators::{SharedDeviceInfo, SharedIdentityProvider, SharedNetworkProbe};
use crate::context::SessionContext;
use crate::diagnostics::DiagnosticSink;
use crate::error::AnalyticsError;

/// Where the session is in its resolution lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
	/// Only the seed values are known; nothing has been resolved yet.
	Seeded,
	/// The last resolution took the fast path or a successful lookup.
	Complete,
	/// The last identity lookup failed and the context was reset.
	Degraded,
}

/// The session as seen by one send.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
	/// Snapshot of the context after resolution.
	pub context: SessionContext,
	/// Whether the snapshot holds every tracked field.
	pub complete: bool,
}

#[derive(Debug)]
struct Slot {
	context: SessionContext,
	state: SessionState,
}

/// Owns the session context of one analytics instance.
pub struct SessionResolver {
	slot: Mutex<Slot>,
	identity: SharedIdentityProvider,
	network: SharedNetworkProbe,
	device: SharedDeviceInfo,
	tracked: RequiredKeys,
	diagnostics: DiagnosticSink,
}

impl SessionResolver {
	pub fn new(
		seed: SessionContext,
		identity: SharedIdentityProvider,
		network: SharedNetworkProbe,
		device: SharedDeviceInfo,
	) -> Self {
		Self {
			slot: Mutex::new(Slot {
				context: seed,
				state: SessionState::Seeded,
			}),
			identity,
			network,
			device,
			tracked: RequiredKeys::tracked_session(),
			diagnostics: DiagnosticSink::default(),
		}
	}

	/// Sets the fields that make a session complete. An empty set keeps the
	/// current one.
	pub fn with_tracked_fields(mut self, tracked: RequiredKeys) -> Self {
		if !tracked.is_empty() {
			self.tracked = tracked;
		}
		self
	}

	/// Sets the sink lookup failures are reported to.
	pub fn with_diagnostics(mut self, diagnostics: DiagnosticSink) -> Self {
		self.diagnostics = diagnostics;
		self
	}

	/// The fields that make a session complete.
	pub fn tracked_fields(&self) -> &RequiredKeys {
		&self.tracked
	}

	/// Current snapshot of the context, without resolving.
	pub async fn context(&self) -> SessionContext {
		self.slot.lock().await.context.clone()
	}

	/// Current lifecycle state, without resolving.
	pub async fn state(&self) -> SessionState {
		self.slot.lock().await.state
	}

	/// Resolves the session with no extra required keys and returns the
	/// resulting context.
	pub async fn initialize(&self) -> SessionContext {
		self.resolve(&RequiredKeys::new()).await.context
	}

	/// Resolves the session for a send whose caller also requires `extra`.
	pub async fn resolve(&self, extra: &RequiredKeys) -> Resolution {
		let network = self.network.network_state().await;
		let wanted = self.tracked.union(extra);

		{
			let mut slot = self.slot.lock().await;
			slot.context.set_field(field::CONNECTION, network.network_type);

			if slot.context.is_complete(&wanted) {
				slot.state = SessionState::Complete;
				debug!("session complete, skipping identity lookup");
				return self.snapshot(&slot.context);
			}

			debug!(missing = ?slot.context.missing(&wanted), "session incomplete, looking up identity");
		}

		match self.identity.lookup_identity().await {
			Ok(identity) => {
				let device_id = self.device.unique_id();
				let mut slot = self.slot.lock().await;
				slot.context.apply_identity(&identity);
				slot.context.set_field(field::DEVICE_ID, device_id);
				if slot.state != SessionState::Complete {
					info!("session resolved from identity lookup");
				}
				slot.state = SessionState::Complete;
				self.snapshot(&slot.context)
			}
			Err(err) => {
				let err = match err {
					err @ AnalyticsError::IdentityLookup(_) => err,
					other => AnalyticsError::identity_lookup(other.to_string()),
				};
				warn!(error = %err, "identity lookup failed, session degraded");
				self.diagnostics.report("resolve_session", &err);

				let mut slot = self.slot.lock().await;
				slot.context.reset_to_app_version();
				slot.state = SessionState::Degraded;
				self.snapshot(&slot.context)
			}
		}
	}

	fn snapshot(&self, context: &SessionContext) -> Resolution {
		Resolution {
			context: context.clone(),
			complete: context.is_complete(&self.tracked),
		}
	}
}
