// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core event shaping for Tally analytics.
//!
//! This crate holds the pure, synchronous half of the SDK: the types and
//! functions that turn a loose bag of parameters into the payload handed to
//! an analytics backend. It performs no I/O and is shared by the runtime SDK
//! (`tally-analytics`) and anything that needs to predict its payloads.
//!
//! # Overview
//!
//! - [`EventParams`]: ordered key/value parameters
//! - [`format_value`]: stringify, collapse whitespace to `_`, lowercase
//! - [`RequiredKeys`] and [`EventKind`]: required-key sets per event type
//! - [`RequiredFieldValidator`]: presence/type contract on required keys
//! - [`ParamSplit`]: required vs free-form partition and payload assembly

pub mod error;
pub mod format;
pub mod keys;
pub mod params;
pub mod split;
pub mod validate;

pub use error::{EventError, Result};
pub use format::{canonical_string, format_value, lowercase_value, ValueFormatter};
pub use keys::{field, EventKind, RequiredKeys, DEFAULT_TRACKED_FIELDS, SESSION_FIELDS};
pub use params::{is_truthy, EventParams};
pub use split::ParamSplit;
pub use validate::RequiredFieldValidator;
