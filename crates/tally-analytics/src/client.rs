// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The analytics facade applications talk to.

use std::sync::Arc;

use tally_analytics_core::{field, EventKind, EventParams, RequiredKeys};
use tracing::{debug, info};

use crate::collaborators::{
	SharedDeviceInfo, SharedIdentityProvider, SharedNetworkProbe, SharedRecorder, StaticDeviceInfo,
	StaticNetwork,
};
use crate::config::AnalyticsConfig;
use crate::context::SessionContext;
use crate::diagnostics::DiagnosticSink;
use crate::emitters::{
	ActionEmitter, CustomEmitter, EmitterBase, GateMode, LifecycleEmitter, ScreenViewEmitter,
	UserInfoEmitter,
};
use crate::error::{AnalyticsError, Result};
use crate::session::{SessionResolver, SessionState};

/// Builder for constructing an [`Analytics`] instance.
pub struct AnalyticsBuilder {
	seed: EventParams,
	app_version: Option<String>,
	debug_mode: Option<bool>,
	config: AnalyticsConfig,
	recorder: Option<SharedRecorder>,
	identity_provider: Option<SharedIdentityProvider>,
	network_probe: Option<SharedNetworkProbe>,
	device_info: Option<SharedDeviceInfo>,
}

impl AnalyticsBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			seed: EventParams::new(),
			app_version: None,
			debug_mode: None,
			config: AnalyticsConfig::default(),
			recorder: None,
			identity_provider: None,
			network_probe: None,
			device_info: None,
		}
	}

	/// Sets the initial session values.
	pub fn seed(mut self, seed: EventParams) -> Self {
		self.seed = seed;
		self
	}

	/// Sets `appVersion`, overriding the seed and the configuration.
	pub fn app_version(mut self, app_version: impl Into<String>) -> Self {
		self.app_version = Some(app_version.into());
		self
	}

	/// Enables debug reporting, overriding the configuration.
	pub fn debug_mode(mut self, debug_mode: bool) -> Self {
		self.debug_mode = Some(debug_mode);
		self
	}

	/// Sets the loaded configuration.
	pub fn config(mut self, config: AnalyticsConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the recorder events are handed to (required).
	pub fn recorder(mut self, recorder: SharedRecorder) -> Self {
		self.recorder = Some(recorder);
		self
	}

	/// Sets the identity provider used to complete the session (required).
	pub fn identity_provider(mut self, provider: SharedIdentityProvider) -> Self {
		self.identity_provider = Some(provider);
		self
	}

	/// Sets the network probe. Defaults to one that reports `unknown`.
	pub fn network_probe(mut self, probe: SharedNetworkProbe) -> Self {
		self.network_probe = Some(probe);
		self
	}

	/// Sets the device info source. Defaults to empty values.
	pub fn device_info(mut self, device_info: SharedDeviceInfo) -> Self {
		self.device_info = Some(device_info);
		self
	}

	/// Builds the analytics instance.
	pub fn build(self) -> Result<Analytics> {
		let recorder = self
			.recorder
			.ok_or(AnalyticsError::MissingCollaborator("recorder"))?;
		let identity_provider = self
			.identity_provider
			.ok_or(AnalyticsError::MissingCollaborator("identity_provider"))?;
		let network_probe = self
			.network_probe
			.unwrap_or_else(|| Arc::new(StaticNetwork::unknown()) as SharedNetworkProbe);
		let device_info = self
			.device_info
			.unwrap_or_else(|| Arc::new(StaticDeviceInfo::default()) as SharedDeviceInfo);

		let mut config = self.config;
		if let Some(debug_mode) = self.debug_mode {
			config.debug_mode = debug_mode;
		}

		let mut context = SessionContext::from_seed(self.seed);
		if context.app_version().is_none() {
			if let Some(app_version) = &config.app_version {
				context.set_field(field::APP_VERSION, app_version.as_str());
			}
		}
		if let Some(app_version) = self.app_version {
			context.set_field(field::APP_VERSION, app_version);
		}

		let diagnostics = DiagnosticSink::new(config.debug_mode);
		let session = SessionResolver::new(
			context,
			identity_provider,
			network_probe,
			device_info.clone(),
		)
		.with_tracked_fields(config.tracked_keys())
		.with_diagnostics(diagnostics);

		let base = EmitterBase::new(
			recorder,
			diagnostics,
			GateMode::from_flag(config.gate_incomplete_sessions),
		);

		info!(
			enabled = config.enabled,
			debug_mode = config.debug_mode,
			gate = ?base.gate(),
			"analytics initialized"
		);

		Ok(Analytics {
			inner: Arc::new(AnalyticsInner {
				config,
				session,
				device_info,
				action: ActionEmitter::new(base.clone()),
				custom: CustomEmitter::new(base.clone()),
				user_info: UserInfoEmitter::new(base.clone()),
				screen_view: ScreenViewEmitter::new(base.clone()),
				lifecycle: LifecycleEmitter::new(base),
			}),
		})
	}
}

impl Default for AnalyticsBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct AnalyticsInner {
	config: AnalyticsConfig,
	session: SessionResolver,
	device_info: SharedDeviceInfo,
	action: ActionEmitter,
	custom: CustomEmitter,
	user_info: UserInfoEmitter,
	screen_view: ScreenViewEmitter,
	lifecycle: LifecycleEmitter,
}

/// Shapes and records analytics events for one application session.
///
/// Cloning is cheap; clones share the session context. No send returns an
/// error: see [`emitters`](crate::emitters) for the meaning of results.
///
/// # Example
///
/// ```ignore
/// let analytics = Analytics::builder()
///     .app_version("1.2.0")
///     .recorder(Arc::new(my_recorder))
///     .identity_provider(Arc::new(my_identity))
///     .build()?;
///
/// analytics.send_action("press", "home", EventParams::new().insert("role", "picker")).await;
/// ```
#[derive(Clone)]
pub struct Analytics {
	inner: Arc<AnalyticsInner>,
}

impl Analytics {
	/// Starts building an instance.
	pub fn builder() -> AnalyticsBuilder {
		AnalyticsBuilder::new()
	}

	/// The effective configuration, after builder overrides.
	pub fn config(&self) -> &AnalyticsConfig {
		&self.inner.config
	}

	/// Resolves the session eagerly and returns the resulting context.
	pub async fn initialize(&self) -> SessionContext {
		self.inner.session.initialize().await
	}

	/// Current session context, without resolving.
	pub async fn context(&self) -> SessionContext {
		self.inner.session.context().await
	}

	/// Where the session is in its resolution lifecycle.
	pub async fn state(&self) -> SessionState {
		self.inner.session.state().await
	}

	/// Records the app, device and user attributes of this session.
	pub async fn send_user_info(&self) -> Option<bool> {
		if !self.is_enabled("send_user_info") {
			return None;
		}

		let resolution = self.inner.session.resolve(&RequiredKeys::new()).await;
		let device = &self.inner.device_info;
		let screen = device.screen_measurements();

		let params = resolution
			.context
			.basic_fields()
			.insert(field::APP_NAME, device.application_name())
			.insert(field::DEVICE, device.device_model())
			.insert(field::OS_VERSION, device.os_version())
			.insert(
				field::SCREEN_SIZE,
				EventParams::new()
					.insert(field::SCREEN_WIDTH, screen.screen_width)
					.insert(field::SCREEN_HEIGHT, screen.screen_height)
					.into_value(),
			);

		self.inner.user_info.send(&resolution, &params).await
	}

	/// Records a user interaction on a screen.
	///
	/// The session values of the action's required fields override same-named
	/// keys of `extra`; every other key of `extra` is recorded as given.
	pub async fn send_action(
		&self,
		action_name: &str,
		screen_name: &str,
		extra: EventParams,
	) -> Option<bool> {
		if !self.is_enabled("send_action") {
			return None;
		}
		debug!(action_name, screen_name, "sending action");

		let resolution = self.inner.session.resolve(&RequiredKeys::new()).await;
		let session = resolution
			.context
			.project(&EventKind::Action.default_required_keys());
		let params = extra
			.merge(session)
			.insert(field::SCREEN_NAME, screen_name)
			.insert(field::ACTION_NAME, action_name);

		self.inner.action.send(&resolution, &params).await
	}

	/// Records a caller-named event.
	///
	/// Keys in `extra_required` must be non-empty strings in the final
	/// parameters. The session values of every required key are merged over
	/// `extra` when the session holds them.
	pub async fn send_custom_event(
		&self,
		event_name: &str,
		extra: EventParams,
		extra_required: &RequiredKeys,
	) -> Option<bool> {
		if !self.is_enabled("send_custom_event") {
			return None;
		}
		debug!(event_name, "sending custom event");

		let resolution = self.inner.session.resolve(extra_required).await;
		let required = EventKind::Custom.default_required_keys().union(extra_required);
		let params = extra.merge(resolution.context.project(&required));

		self.inner
			.custom
			.send(&resolution, event_name, &params, extra_required)
			.await
	}

	/// Records a screen view.
	pub async fn send_screen_tracking(
		&self,
		screen_name: &str,
		screen_class: Option<&str>,
	) -> Option<bool> {
		if !self.is_enabled("send_screen_tracking") {
			return None;
		}

		let resolution = self.inner.session.resolve(&RequiredKeys::new()).await;
		let session = resolution.context.basic_fields();

		self.inner
			.screen_view
			.send(&resolution, screen_name, screen_class, &session)
			.await
	}

	/// Records that the app came to the foreground.
	pub async fn send_app_open(&self) -> Option<bool> {
		if !self.is_enabled("send_app_open") {
			return None;
		}
		Some(self.inner.lifecycle.send_app_open().await)
	}

	/// Records a log out. `method` defaults to `manual_logout`.
	pub async fn send_log_out(&self, method: Option<&str>) -> Option<bool> {
		if !self.is_enabled("send_log_out") {
			return None;
		}
		Some(self.inner.lifecycle.send_log_out(method).await)
	}

	/// Records that the user entered `module`.
	pub async fn send_module_started(&self, module: &str, params: EventParams) -> Option<bool> {
		if !self.is_enabled("send_module_started") {
			return None;
		}
		Some(self.inner.lifecycle.send_module_started(module, params).await)
	}

	/// Records that the user left `module`.
	pub async fn send_module_ended(&self, module: &str, params: EventParams) -> Option<bool> {
		if !self.is_enabled("send_module_ended") {
			return None;
		}
		Some(self.inner.lifecycle.send_module_ended(module, params).await)
	}

	/// Records a language change.
	pub async fn send_selected_language(&self, language: &str) -> Option<bool> {
		if !self.is_enabled("send_selected_language") {
			return None;
		}
		Some(self.inner.lifecycle.send_selected_language(language).await)
	}

	fn is_enabled(&self, operation: &str) -> bool {
		if !self.inner.config.enabled {
			debug!(operation, "analytics disabled, skipping send");
		}
		self.inner.config.enabled
	}
}
