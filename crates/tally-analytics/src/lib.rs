// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tally analytics SDK.
//!
//! Shapes application events and hands them to an analytics backend. The SDK
//! keeps a session context (user identity, device and network attributes),
//! resolves it lazily before every send, and attaches it to each event.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tally_analytics::{Analytics, EventParams};
//!
//! let analytics = Analytics::builder()
//!     .app_version("1.2.0")
//!     .recorder(Arc::new(my_recorder))
//!     .identity_provider(Arc::new(my_identity))
//!     .build()?;
//!
//! analytics.send_user_info().await;
//! analytics
//!     .send_action("press", "home", EventParams::new().insert("role", "picker"))
//!     .await;
//! analytics.send_screen_tracking("home", Some("HomeScreen")).await;
//! ```
//!
//! Sends never fail: they return `None` when gated, `Some(false)` when the
//! event was invalid or the recorder rejected it, and `Some(true)` otherwise.

pub mod client;
pub mod collaborators;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod emitters;
pub mod error;
pub mod session;

pub use client::{Analytics, AnalyticsBuilder};
pub use collaborators::{
	DeviceInfo, EventRecorder, Identity, IdentityProvider, NetworkProbe, NetworkState,
	NoOpRecorder, ScreenMeasurements, SharedDeviceInfo, SharedIdentityProvider,
	SharedNetworkProbe, SharedRecorder, StaticDeviceInfo, StaticNetwork,
};
pub use config::{load_config, AnalyticsConfig, AnalyticsConfigLayer, ConfigError};
pub use context::SessionContext;
pub use diagnostics::DiagnosticSink;
pub use emitters::GateMode;
pub use error::{AnalyticsError, Result};
pub use session::{Resolution, SessionResolver, SessionState};

pub use tally_analytics_core::{
	field, format_value, EventError, EventKind, EventParams, RequiredFieldValidator, RequiredKeys,
};
