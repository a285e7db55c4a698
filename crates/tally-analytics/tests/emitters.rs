// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Payload shapes of every send, through the public facade.

mod support;

use support::{user, FakeIdentity, Harness, Recorded};
use tally_analytics::{EventParams, RequiredKeys};

fn harness() -> Harness {
	Harness::new(FakeIdentity::resolving(user()), |b| {
		b.app_version("1.2.0").debug_mode(true)
	})
}

#[tokio::test]
async fn user_info_is_flat_with_collapsed_screen_size() {
	let harness = harness();
	assert_eq!(harness.analytics.send_user_info().await, Some(true));

	let events = harness.recorder.events();
	let (name, payload) = &events[0];
	assert_eq!(name, "user_info");

	let expected = EventParams::new()
		.insert("language", "en-US")
		.insert("connection", "wifi")
		.insert("deviceId", "device-1")
		.insert("device", "Pixel 7")
		.insert("osVersion", "14")
		.insert("screenSize", "360 x 640")
		.insert("userEmail", "a@b.com")
		.insert("userId", "u1")
		.insert("client", "t1")
		.insert("appVersion", "1.2.0")
		.insert("appName", "picking");
	assert_eq!(payload, &expected);
}

#[tokio::test]
async fn action_values_are_formatted() {
	let harness = harness();
	harness
		.analytics
		.send_action("Button Press", "Order Detail", EventParams::new())
		.await;

	let (_, payload) = &harness.recorder.events()[0];
	assert_eq!(payload.get_str("actionName"), Some("button_press"));
	assert_eq!(payload.get_str("screenName"), Some("order_detail"));
}

#[tokio::test]
async fn caller_extra_cannot_override_session_fields() {
	let harness = harness();
	harness
		.analytics
		.send_action(
			"press",
			"home",
			EventParams::new().insert("userId", "spoofed").insert("note", "kept"),
		)
		.await;

	let (_, payload) = &harness.recorder.events()[0];
	assert_eq!(payload.get_str("userId"), Some("u1"));
	assert!(payload.get_str("dataEvent").unwrap().contains(r#""note":"kept""#));
}

#[tokio::test]
async fn free_form_keys_named_like_session_attributes_are_kept() {
	let harness = Harness::new(FakeIdentity::resolving(user()), |b| b.app_version("1.2.0"));
	harness.network.set("");

	harness
		.analytics
		.send_action(
			"press",
			"home",
			EventParams::new()
				.insert("deviceId", "scanner-7")
				.insert("role", "picker"),
		)
		.await;
	harness
		.analytics
		.send_custom_event(
			"sync_done",
			EventParams::new().insert("connection", "vpn-tunnel"),
			&RequiredKeys::new(),
		)
		.await;

	let events = harness.recorder.events();
	assert_eq!(events.len(), 2);
	assert_eq!(
		events[0].1.get_str("dataEvent"),
		Some(r#"{"deviceId":"scanner-7","role":"picker"}"#)
	);
	assert_eq!(events[1].0, "sync_done");
	assert_eq!(
		events[1].1.get_str("dataEvent"),
		Some(r#"{"connection":"vpn-tunnel"}"#)
	);
}

#[tokio::test]
async fn custom_event_with_unknown_required_key_fails() {
	let harness = harness();
	let result = harness
		.analytics
		.send_custom_event(
			"picking_done",
			EventParams::new().insert("orderId", "A-100"),
			&RequiredKeys::new().with("warehouse"),
		)
		.await;

	assert_eq!(result, Some(false));
	assert!(harness.recorder.calls().is_empty());
}

#[tokio::test]
async fn custom_event_required_key_from_caller_params() {
	let harness = harness();
	let result = harness
		.analytics
		.send_custom_event(
			"picking_done",
			EventParams::new().insert("warehouse", "North Hub"),
			&RequiredKeys::from_json(&serde_json::json!(["warehouse", "", 4])),
		)
		.await;

	assert_eq!(result, Some(true));
	let (name, payload) = &harness.recorder.events()[0];
	assert_eq!(name, "picking_done");
	assert_eq!(payload.get_str("warehouse"), Some("north hub"));
}

#[tokio::test]
async fn screen_view_uses_screen_view_operation() {
	let harness = harness();
	assert_eq!(
		harness
			.analytics
			.send_screen_tracking("Order Detail", None)
			.await,
		Some(true)
	);

	match harness.recorder.calls().as_slice() {
		[Recorded::ScreenView { payload }] => {
			assert_eq!(payload.get_str("screen_name"), Some("Order Detail"));
			assert!(!payload.contains_key("screen_class"));
			assert_eq!(payload.get_str("client"), Some("t1"));
		}
		calls => panic!("unexpected calls: {calls:?}"),
	}
}

#[tokio::test]
async fn lifecycle_events_are_not_gated() {
	let harness = Harness::new(FakeIdentity::rejecting(), |b| b.app_version("1.2.0"));

	assert_eq!(harness.analytics.send_app_open().await, Some(true));
	assert_eq!(harness.analytics.send_log_out(None).await, Some(true));
	assert_eq!(
		harness
			.analytics
			.send_module_started("picking", EventParams::new().insert("wave", 2))
			.await,
		Some(true)
	);
	assert_eq!(
		harness
			.analytics
			.send_module_ended("picking", EventParams::new())
			.await,
		Some(true)
	);
	assert_eq!(harness.analytics.send_selected_language("es").await, Some(true));
	assert_eq!(harness.analytics.send_selected_language("").await, Some(false));

	let names: Vec<String> = harness
		.recorder
		.events()
		.into_iter()
		.map(|(name, _)| name)
		.collect();
	assert_eq!(
		names,
		vec!["app_open", "log_out", "module_start", "module_end", "selected_language"]
	);
	assert_eq!(harness.identity.lookups(), 0);
}
