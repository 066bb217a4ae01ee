//! Serialization of commands into RESP multi-bulk requests.
//!
//! ```text
//! *<argument count>\r\n
//! $<length>\r\n<bytes>\r\n     (once per argument)
//! ```

use crate::arg::Arg;
use crate::command::Command;
use crate::num::decimal_len;
use crate::num::num_to_bytes;
use crate::sink::Sink;
use crate::utils::ARRAY;
use crate::utils::BULK_STRING;
use crate::utils::CRLF;
use crate::utils::EMPTY;

/// Write `command` as an array header followed by one bulk string per
/// argument.
///
/// A command without arguments is written as `*0\r\n`.
pub fn write_command<S: Sink + ?Sized>(sink: &mut S, command: &Command<'_>) -> Result<(), S::Error> {
	encode_length(sink, ARRAY, command.len())?;
	for arg in command.args() {
		write_bulk(sink, arg)?;
	}
	log::trace!("wrote command with {} arguments", command.len());
	Ok(())
}

/// Write a command given as four optional leading slots and a trailing
/// slice, without building a [`Command`] first.
///
/// `None` slots are skipped.
pub fn write_direct<'a, S: Sink + ?Sized>(
	sink: &mut S,
	name: Option<&Arg<'a>>,
	arg1: Option<&Arg<'a>>,
	arg2: Option<&Arg<'a>>,
	arg3: Option<&Arg<'a>>,
	rest: &[Arg<'a>],
) -> Result<(), S::Error> {
	let slots = [name, arg1, arg2, arg3];
	let count = slots.iter().flatten().count() + rest.len();

	encode_length(sink, ARRAY, count)?;
	for arg in slots.into_iter().flatten().chain(rest) {
		write_bulk(sink, arg)?;
	}
	Ok(())
}

/// Write one argument as a bulk string.
pub fn write_bulk<S: Sink + ?Sized>(sink: &mut S, arg: &Arg<'_>) -> Result<(), S::Error> {
	match arg {
		Arg::Raw(bytes) => encode_bulk_string(sink, bytes),
		Arg::View(view) => {
			encode_length(sink, BULK_STRING, view.len())?;
			sink.put_view(view)?;
			sink.put_raw(CRLF)
		}
		Arg::Text(text) => encode_bulk_string(sink, text.as_bytes()),
		Arg::Formatted(text) => encode_bulk_string(sink, text.as_bytes()),
		Arg::Int(value) => encode_bulk_string(sink, &num_to_bytes(*value, false)),
		Arg::Absent => encode_bulk_string(sink, EMPTY),
	}
}

/// Bytes taken by the array header for `count` arguments.
#[inline]
pub(crate) fn header_len(count: usize) -> usize {
	1 + decimal_len(count as i64) + CRLF.len()
}

/// Bytes taken by `arg` once written as a bulk string.
#[inline]
pub(crate) fn bulk_len(arg: &Arg<'_>) -> usize {
	let len = arg.content_len();
	1 + decimal_len(len as i64) + CRLF.len() + len + CRLF.len()
}

// Lengths come from in-memory buffers, which never exceed isize::MAX, so the
// cast to i64 is lossless.
#[inline]
fn encode_length<S: Sink + ?Sized>(sink: &mut S, marker: u8, length: usize) -> Result<(), S::Error> {
	sink.put_raw(&[marker])?;
	sink.put_raw(&num_to_bytes(length as i64, true))
}

#[inline]
fn encode_bulk_string<S: Sink + ?Sized>(sink: &mut S, bytes: &[u8]) -> Result<(), S::Error> {
	encode_length(sink, BULK_STRING, bytes.len())?;
	sink.put_raw(bytes)?;
	sink.put_raw(CRLF)
}
