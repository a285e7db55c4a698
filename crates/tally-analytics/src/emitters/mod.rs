// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event emitters.
//!
//! Each emitter turns resolved session data plus caller parameters into one
//! recorder call. None of them return errors: failures are reported to the
//! [`DiagnosticSink`] and surface as the emission result.
//!
//! | Result | Meaning |
//! |--------|---------|
//! | `None` | Gated: the session was incomplete and nothing was recorded |
//! | `Some(false)` | Validation or recorder failure |
//! | `Some(true)` | Recorded |

mod action;
mod custom;
mod lifecycle;
mod screen_view;
mod user_info;

pub use action::ActionEmitter;
pub use custom::CustomEmitter;
pub use lifecycle::LifecycleEmitter;
pub use screen_view::ScreenViewEmitter;
pub use user_info::UserInfoEmitter;

use serde::{Deserialize, Serialize};
use tally_analytics_core::EventParams;
use tracing::{debug, trace};

use crate::collaborators::SharedRecorder;
use crate::diagnostics::DiagnosticSink;
use crate::error::AnalyticsError;
use crate::session::Resolution;

/// Whether an emitter skips sends while the session is incomplete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
	/// Return `None` without recording when the session is incomplete.
	#[default]
	Gated,
	/// Always attempt the send.
	Open,
}

impl GateMode {
	pub fn from_flag(gated: bool) -> Self {
		if gated {
			GateMode::Gated
		} else {
			GateMode::Open
		}
	}

	pub fn blocks(&self, complete: bool) -> bool {
		matches!(self, GateMode::Gated) && !complete
	}
}

/// Recorder, diagnostics and gate shared by every emitter.
#[derive(Clone)]
pub struct EmitterBase {
	recorder: SharedRecorder,
	diagnostics: DiagnosticSink,
	gate: GateMode,
}

impl EmitterBase {
	pub fn new(recorder: SharedRecorder, diagnostics: DiagnosticSink, gate: GateMode) -> Self {
		Self {
			recorder,
			diagnostics,
			gate,
		}
	}

	pub fn gate(&self) -> GateMode {
		self.gate
	}

	fn is_gated(&self, operation: &str, resolution: &Resolution) -> bool {
		let gated = self.gate.blocks(resolution.complete);
		if gated {
			debug!(operation, "session incomplete, skipping send");
		}
		gated
	}

	fn fail(&self, operation: &str, err: AnalyticsError) -> bool {
		self.diagnostics.report(operation, &err);
		false
	}

	async fn record_event(&self, operation: &str, event_name: &str, payload: EventParams) -> bool {
		trace!(operation, event_name, fields = payload.len(), "recording event");
		match self.recorder.record_event(event_name, payload).await {
			Ok(()) => {
				debug!(event_name, "event recorded");
				true
			}
			Err(err) => self.fail(operation, recorder_error(err)),
		}
	}

	async fn record_screen_view(&self, operation: &str, payload: EventParams) -> bool {
		trace!(operation, fields = payload.len(), "recording screen view");
		match self.recorder.record_screen_view(payload).await {
			Ok(()) => true,
			Err(err) => self.fail(operation, recorder_error(err)),
		}
	}

	async fn record_app_open(&self, operation: &str) -> bool {
		match self.recorder.record_app_open().await {
			Ok(()) => true,
			Err(err) => self.fail(operation, recorder_error(err)),
		}
	}
}

fn recorder_error(err: AnalyticsError) -> AnalyticsError {
	match err {
		err @ AnalyticsError::Recorder(_) => err,
		other => AnalyticsError::recorder(other.to_string()),
	}
}
