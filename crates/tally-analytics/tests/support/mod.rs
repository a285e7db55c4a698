// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hand-written collaborator fakes shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tally_analytics::{
	Analytics, AnalyticsBuilder, AnalyticsError, EventParams, EventRecorder, Identity,
	IdentityProvider, NetworkProbe, NetworkState, Result, ScreenMeasurements, StaticDeviceInfo,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
	Event { name: String, payload: EventParams },
	ScreenView { payload: EventParams },
}

/// Keeps every recorder call.
#[derive(Default)]
pub struct RecordingRecorder {
	calls: Mutex<Vec<Recorded>>,
}

impl RecordingRecorder {
	pub fn calls(&self) -> Vec<Recorded> {
		self.calls.lock().unwrap().clone()
	}

	pub fn events(&self) -> Vec<(String, EventParams)> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				Recorded::Event { name, payload } => Some((name, payload)),
				Recorded::ScreenView { .. } => None,
			})
			.collect()
	}
}

#[async_trait]
impl EventRecorder for RecordingRecorder {
	async fn record_event(&self, event_name: &str, payload: EventParams) -> Result<()> {
		self.calls.lock().unwrap().push(Recorded::Event {
			name: event_name.to_string(),
			payload,
		});
		Ok(())
	}

	async fn record_screen_view(&self, payload: EventParams) -> Result<()> {
		self.calls
			.lock()
			.unwrap()
			.push(Recorded::ScreenView { payload });
		Ok(())
	}
}

/// Answers lookups with a fixed identity, or rejects them.
pub struct FakeIdentity {
	identity: Option<Identity>,
	lookups: AtomicUsize,
}

impl FakeIdentity {
	pub fn resolving(identity: Identity) -> Self {
		Self {
			identity: Some(identity),
			lookups: AtomicUsize::new(0),
		}
	}

	pub fn rejecting() -> Self {
		Self {
			identity: None,
			lookups: AtomicUsize::new(0),
		}
	}

	pub fn lookups(&self) -> usize {
		self.lookups.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
	async fn lookup_identity(&self) -> Result<Identity> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		self.identity
			.clone()
			.ok_or_else(|| AnalyticsError::identity_lookup("no signed-in user"))
	}
}

/// Reports a network type that tests can change between sends.
pub struct FakeNetwork {
	network_type: Mutex<String>,
}

impl FakeNetwork {
	pub fn new(network_type: &str) -> Self {
		Self {
			network_type: Mutex::new(network_type.to_string()),
		}
	}

	pub fn set(&self, network_type: &str) {
		*self.network_type.lock().unwrap() = network_type.to_string();
	}
}

#[async_trait]
impl NetworkProbe for FakeNetwork {
	async fn network_state(&self) -> NetworkState {
		NetworkState::new(self.network_type.lock().unwrap().clone())
	}
}

pub fn user() -> Identity {
	Identity {
		email: Some("a@b.com".to_string()),
		subject: Some("u1".to_string()),
		tenant_code: Some("t1".to_string()),
		locale: Some("en-US".to_string()),
	}
}

pub fn device() -> StaticDeviceInfo {
	StaticDeviceInfo {
		unique_id: "device-1".to_string(),
		screen: ScreenMeasurements {
			screen_width: 360.0,
			screen_height: 640.0,
		},
		application_name: "Picking".to_string(),
		device_model: "Pixel 7".to_string(),
		os_version: "14".to_string(),
	}
}

/// Collaborators wired into one analytics instance.
pub struct Harness {
	pub analytics: Analytics,
	pub recorder: Arc<RecordingRecorder>,
	pub identity: Arc<FakeIdentity>,
	pub network: Arc<FakeNetwork>,
}

impl Harness {
	pub fn new(
		identity: FakeIdentity,
		configure: impl FnOnce(AnalyticsBuilder) -> AnalyticsBuilder,
	) -> Self {
		let recorder = Arc::new(RecordingRecorder::default());
		let identity = Arc::new(identity);
		let network = Arc::new(FakeNetwork::new("wifi"));

		let builder = Analytics::builder()
			.recorder(recorder.clone())
			.identity_provider(identity.clone())
			.network_probe(network.clone())
			.device_info(Arc::new(device()));
		let analytics = configure(builder).build().unwrap();

		Self {
			analytics,
			recorder,
			identity,
			network,
		}
	}
}
