// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Normalization of scalar parameter values.
//!
//! Event dashboards group on exact string values, so values destined for
//! top-level event fields are reduced to a canonical form: stringified,
//! whitespace runs collapsed into `_`, lowercased.

use std::io;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::params::is_truthy;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A per-value transform applied to required fields while splitting.
///
/// Returning `None` omits the field.
pub type ValueFormatter = fn(&Value) -> Option<String>;

/// Formats a value for use as an event field.
///
/// Falsy values (`null`, `false`, `0`, `""`) yield `None`. Anything else is
/// stringified with [`canonical_string`], every run of whitespace is replaced
/// with a single underscore and the result is lowercased.
///
/// ```
/// use serde_json::json;
/// use tally_analytics_core::format_value;
///
/// assert_eq!(format_value(&json!("Button Press")).as_deref(), Some("button_press"));
/// assert_eq!(format_value(&json!([1, 2])).as_deref(), Some("[1,_2]"));
/// assert_eq!(format_value(&json!(0)), None);
/// ```
pub fn format_value(value: &Value) -> Option<String> {
	if !is_truthy(value) {
		return None;
	}

	let raw = canonical_string(value);
	Some(WHITESPACE_RUN.replace_all(&raw, "_").to_lowercase())
}

/// Lowercases a value without touching its whitespace.
///
/// This is the transform required fields get when no [`ValueFormatter`] is
/// supplied. Falsy values yield `None`.
pub fn lowercase_value(value: &Value) -> Option<String> {
	if !is_truthy(value) {
		return None;
	}

	Some(canonical_string(value).to_lowercase())
}

/// Renders a value as a plain string.
///
/// Strings are returned verbatim, numbers and booleans in decimal/literal
/// form, and arrays or objects as JSON with a space after each `,` and `:`.
pub fn canonical_string(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Array(_) | Value::Object(_) => {
			spaced_json(value).unwrap_or_else(|_| value.to_string())
		}
		other => other.to_string(),
	}
}

fn spaced_json(value: &Value) -> io::Result<String> {
	let mut buf = Vec::new();
	let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
	value.serialize(&mut ser)?;
	String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Single-line JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
	fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		if first {
			Ok(())
		} else {
			writer.write_all(b", ")
		}
	}

	fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		if first {
			Ok(())
		} else {
			writer.write_all(b", ")
		}
	}

	fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		writer.write_all(b": ")
	}
}
