// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! External collaborators the SDK talks to.
//!
//! The SDK shapes events; it does not transport them, look up users, or
//! probe hardware. Hosts plug those capabilities in through the traits in
//! this module:
//!
//! | Trait | Provides |
//! |-------|----------|
//! | [`EventRecorder`] | Records finished events with the analytics backend |
//! | [`IdentityProvider`] | Resolves the signed-in user (may fail) |
//! | [`NetworkProbe`] | Current network type, re-queried on every send |
//! | [`DeviceInfo`] | Static device/app attributes |

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tally_analytics_core::EventParams;

use crate::error::Result;

/// Records shaped events with the analytics backend.
///
/// Implementations own the wire protocol, batching and retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRecorder: Send + Sync + 'static {
	/// Records a named event.
	async fn record_event(&self, event_name: &str, payload: EventParams) -> Result<()>;

	/// Records a screen view. The payload carries `screen_name` and, when
	/// known, `screen_class`.
	async fn record_screen_view(&self, payload: EventParams) -> Result<()>;

	/// Records that the app came to the foreground.
	async fn record_app_open(&self) -> Result<()> {
		self.record_event("app_open", EventParams::new()).await
	}
}

/// Identity attributes of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
	#[serde(default)]
	pub email: Option<String>,
	/// Subject identifier of the user.
	#[serde(default, alias = "sub")]
	pub subject: Option<String>,
	/// Tenant (client) code the user operates under.
	#[serde(default, alias = "tname")]
	pub tenant_code: Option<String>,
	#[serde(default)]
	pub locale: Option<String>,
}

/// Resolves the identity of the signed-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
	/// Looks up the current identity. Rejections surface as
	/// [`AnalyticsError::IdentityLookup`](crate::AnalyticsError::IdentityLookup).
	async fn lookup_identity(&self) -> Result<Identity>;
}

/// Snapshot of the device's network state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkState {
	/// e.g. `wifi`, `cellular`, `none`.
	pub network_type: String,
}

impl NetworkState {
	pub fn new(network_type: impl Into<String>) -> Self {
		Self {
			network_type: network_type.into(),
		}
	}
}

/// Reports the current network state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkProbe: Send + Sync + 'static {
	async fn network_state(&self) -> NetworkState;
}

/// Physical screen dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenMeasurements {
	pub screen_width: f64,
	pub screen_height: f64,
}

/// Static device and application attributes. Calls must not fail or block.
pub trait DeviceInfo: Send + Sync + 'static {
	fn unique_id(&self) -> String;
	fn screen_measurements(&self) -> ScreenMeasurements;
	fn application_name(&self) -> String;
	fn device_model(&self) -> String;
	fn os_version(&self) -> String;
}

/// Type alias for a shared recorder.
pub type SharedRecorder = Arc<dyn EventRecorder>;
/// Type alias for a shared identity provider.
pub type SharedIdentityProvider = Arc<dyn IdentityProvider>;
/// Type alias for a shared network probe.
pub type SharedNetworkProbe = Arc<dyn NetworkProbe>;
/// Type alias for shared device info.
pub type SharedDeviceInfo = Arc<dyn DeviceInfo>;

/// A recorder that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRecorder;

#[async_trait]
impl EventRecorder for NoOpRecorder {
	async fn record_event(&self, _event_name: &str, _payload: EventParams) -> Result<()> {
		Ok(())
	}

	async fn record_screen_view(&self, _payload: EventParams) -> Result<()> {
		Ok(())
	}
}

/// A network probe that always reports the same network type.
#[derive(Debug, Clone, Default)]
pub struct StaticNetwork {
	network_type: String,
}

impl StaticNetwork {
	pub fn new(network_type: impl Into<String>) -> Self {
		Self {
			network_type: network_type.into(),
		}
	}

	/// Reports `unknown`.
	pub fn unknown() -> Self {
		Self::new("unknown")
	}
}

#[async_trait]
impl NetworkProbe for StaticNetwork {
	async fn network_state(&self) -> NetworkState {
		NetworkState::new(self.network_type.clone())
	}
}

/// Device info with fixed values. The default reports empty strings and a
/// zero-sized screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticDeviceInfo {
	pub unique_id: String,
	pub screen: ScreenMeasurements,
	pub application_name: String,
	pub device_model: String,
	pub os_version: String,
}

impl DeviceInfo for StaticDeviceInfo {
	fn unique_id(&self) -> String {
		self.unique_id.clone()
	}

	fn screen_measurements(&self) -> ScreenMeasurements {
		self.screen
	}

	fn application_name(&self) -> String {
		self.application_name.clone()
	}

	fn device_model(&self) -> String {
		self.device_model.clone()
	}

	fn os_version(&self) -> String {
		self.os_version.clone()
	}
}
