// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Debug-only reporting of swallowed send failures.

use crate::error::AnalyticsError;

/// Where send operations report the errors they swallow.
///
/// Silent unless `debug_mode` is set, in which case each error is logged at
/// `error` level with the operation that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSink {
	debug_mode: bool,
}

impl DiagnosticSink {
	pub fn new(debug_mode: bool) -> Self {
		Self { debug_mode }
	}

	pub fn debug_mode(&self) -> bool {
		self.debug_mode
	}

	/// Reports `err` raised by `operation`. Returns true if it was logged.
	pub fn report(&self, operation: &str, err: &AnalyticsError) -> bool {
		if !self.debug_mode {
			return false;
		}

		tracing::error!(
			operation,
			error = %err,
			validation = err.is_validation(),
			"analytics send failed"
		);
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tally_analytics_core::EventError;

	#[test]
	fn test_silent_outside_debug_mode() {
		let sink = DiagnosticSink::default();
		assert!(!sink.report("send_action", &EventError::MissingParams.into()));
	}

	#[test]
	fn test_reports_in_debug_mode() {
		let sink = DiagnosticSink::new(true);
		assert!(sink.debug_mode());
		assert!(sink.report("send_user_info", &AnalyticsError::identity_lookup("rejected")));
	}
}
