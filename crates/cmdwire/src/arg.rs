//! Command arguments.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use bytes::BytesMut;

use crate::num::decimal_len;

/// A single command argument.
///
/// Every variant is written as one bulk string. The variant is picked once,
/// when the argument is created, so encoding is a single `match`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Arg<'a> {
	/// Raw bytes, written verbatim.
	Raw(Cow<'a, [u8]>),

	/// A view into a shared buffer, written without copying it first.
	View(Bytes),

	/// UTF-8 text.
	Text(Cow<'a, str>),

	/// The textual form of an arbitrary `Display` value.
	Formatted(String),

	/// An integer, written as decimal ASCII through the numeric cache.
	Int(i64),

	/// No value; written as an empty bulk string.
	#[default]
	Absent,
}

impl<'a> Arg<'a> {
	/// Capture the textual representation of `value`.
	pub fn display(value: &impl fmt::Display) -> Self {
		Arg::Formatted(value.to_string())
	}

	pub fn is_absent(&self) -> bool {
		matches!(self, Arg::Absent)
	}

	/// Length in bytes of the bulk string content.
	pub fn content_len(&self) -> usize {
		match self {
			Arg::Raw(bytes) => bytes.len(),
			Arg::View(view) => view.len(),
			Arg::Text(text) => text.len(),
			Arg::Formatted(text) => text.len(),
			Arg::Int(value) => decimal_len(*value),
			Arg::Absent => 0,
		}
	}

	/// Detach the argument from any borrowed data.
	pub fn into_owned(self) -> Arg<'static> {
		match self {
			Arg::Raw(bytes) => Arg::Raw(Cow::Owned(bytes.into_owned())),
			Arg::View(view) => Arg::View(view),
			Arg::Text(text) => Arg::Text(Cow::Owned(text.into_owned())),
			Arg::Formatted(text) => Arg::Formatted(text),
			Arg::Int(value) => Arg::Int(value),
			Arg::Absent => Arg::Absent,
		}
	}
}

impl<'a> From<&'a str> for Arg<'a> {
	fn from(s: &'a str) -> Self {
		Arg::Text(Cow::Borrowed(s))
	}
}

impl<'a> From<&'a String> for Arg<'a> {
	fn from(s: &'a String) -> Self {
		Arg::Text(Cow::Borrowed(s.as_str()))
	}
}

impl From<String> for Arg<'_> {
	fn from(s: String) -> Self {
		Arg::Text(Cow::Owned(s))
	}
}

impl<'a> From<Cow<'a, str>> for Arg<'a> {
	fn from(s: Cow<'a, str>) -> Self {
		Arg::Text(s)
	}
}

impl<'a> From<&'a [u8]> for Arg<'a> {
	fn from(b: &'a [u8]) -> Self {
		Arg::Raw(Cow::Borrowed(b))
	}
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
	fn from(b: &'a [u8; N]) -> Self {
		Arg::Raw(Cow::Borrowed(b.as_slice()))
	}
}

impl From<Vec<u8>> for Arg<'_> {
	fn from(v: Vec<u8>) -> Self {
		Arg::Raw(Cow::Owned(v))
	}
}

impl From<Bytes> for Arg<'_> {
	fn from(b: Bytes) -> Self {
		Arg::View(b)
	}
}

impl From<&Bytes> for Arg<'_> {
	fn from(b: &Bytes) -> Self {
		Arg::View(b.clone())
	}
}

impl From<BytesMut> for Arg<'_> {
	fn from(b: BytesMut) -> Self {
		Arg::View(b.freeze())
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Arg<'_> {
				fn from(value: $ty) -> Self {
					Arg::Int(i64::from(value))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Values outside the i64 range fall back to their textual form.
macro_rules! impl_from_wide_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Arg<'_> {
				fn from(value: $ty) -> Self {
					match i64::try_from(value) {
						Ok(value) => Arg::Int(value),
						Err(_) => Arg::Formatted(value.to_string()),
					}
				}
			}
		)*
	};
}

impl_from_wide_int!(u64, usize, isize, i128, u128);

impl From<f64> for Arg<'_> {
	fn from(value: f64) -> Self {
		Arg::Formatted(value.to_string())
	}
}

impl From<f32> for Arg<'_> {
	fn from(value: f32) -> Self {
		Arg::Formatted(value.to_string())
	}
}

impl<'a, T: Into<Arg<'a>>> From<Option<T>> for Arg<'a> {
	fn from(o: Option<T>) -> Self {
		match o {
			Some(v) => v.into(),
			None => Arg::Absent,
		}
	}
}
