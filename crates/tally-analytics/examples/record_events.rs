// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: Shape a few events and print them instead of sending them.
//!
//! Run with:
//!   RUST_LOG=tally_analytics=debug cargo run --example record_events -p tally-analytics
//!
//! Set `TALLY_ANALYTICS_*` variables or pass a TOML path as the first
//! argument to change the configuration.

use std::sync::Arc;

use async_trait::async_trait;
use tally_analytics::{
	load_config, Analytics, EventParams, EventRecorder, Identity, IdentityProvider,
	RequiredKeys, ScreenMeasurements, StaticDeviceInfo, StaticNetwork,
};
use tracing_subscriber::EnvFilter;

/// Prints every event as JSON.
struct PrintingRecorder;

#[async_trait]
impl EventRecorder for PrintingRecorder {
	async fn record_event(
		&self,
		event_name: &str,
		payload: EventParams,
	) -> tally_analytics::Result<()> {
		println!("event {event_name}: {}", payload.into_value());
		Ok(())
	}

	async fn record_screen_view(&self, payload: EventParams) -> tally_analytics::Result<()> {
		println!("screen_view: {}", payload.into_value());
		Ok(())
	}
}

/// Always reports the same signed-in user.
struct DemoIdentity;

#[async_trait]
impl IdentityProvider for DemoIdentity {
	async fn lookup_identity(&self) -> tally_analytics::Result<Identity> {
		Ok(Identity {
			email: Some("picker@example.com".to_string()),
			subject: Some("user-42".to_string()),
			tenant_code: Some("acme".to_string()),
			locale: Some("en-US".to_string()),
		})
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config_path = std::env::args()
		.nth(1)
		.unwrap_or_else(|| "tally-analytics.toml".to_string());
	let config = load_config(config_path)?;

	let analytics = Analytics::builder()
		.config(config)
		.app_version("1.2.0")
		.debug_mode(true)
		.recorder(Arc::new(PrintingRecorder))
		.identity_provider(Arc::new(DemoIdentity))
		.network_probe(Arc::new(StaticNetwork::new("wifi")))
		.device_info(Arc::new(StaticDeviceInfo {
			unique_id: "device-0001".to_string(),
			screen: ScreenMeasurements {
				screen_width: 360.0,
				screen_height: 640.0,
			},
			application_name: "Picking".to_string(),
			device_model: "Pixel 7".to_string(),
			os_version: "14".to_string(),
		}))
		.build()?;

	let context = analytics.initialize().await;
	println!("session: {}", context.as_params().clone().into_value());

	analytics.send_app_open().await;
	analytics.send_user_info().await;
	analytics
		.send_action("Button Press", "Home", EventParams::new().insert("role", "picker"))
		.await;
	analytics
		.send_custom_event(
			"order_picked",
			EventParams::new().insert("orderId", "A-100").insert("items", 3),
			&RequiredKeys::new(),
		)
		.await;
	analytics.send_screen_tracking("Home", Some("HomeScreen")).await;
	analytics.send_log_out(None).await;

	Ok(())
}
