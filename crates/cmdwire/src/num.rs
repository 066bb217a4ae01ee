//! Integer to decimal ASCII conversion.
//!
//! Array and bulk string lengths are formatted for every request, and almost
//! all of them are small. Values in `0..CACHE_LEN` and the `-1` null marker
//! are served from tables built once per process; everything else is
//! formatted into a buffer of exactly the required size.

use std::borrow::Cow;
use std::sync::LazyLock;

use crate::sink::Sink;
use crate::utils::CR;
use crate::utils::LF;

/// Number of non-negative values served from the table.
pub const CACHE_LEN: usize = 256;

/// `-1`, the RESP null length marker.
pub const NEG_ONE: &[u8] = b"-1";

/// `-1` followed by CRLF.
pub const NEG_ONE_CRLF: &[u8] = b"-1\r\n";

/// Precomputed encodings of `0..CACHE_LEN`, with and without CRLF.
///
/// Never mutated after construction.
struct NumCache {
	plain: Box<[Box<[u8]>]>,
	with_crlf: Box<[Box<[u8]>]>,
}

impl NumCache {
	fn build() -> Self {
		let plain = (0..CACHE_LEN as i64)
			.map(|value| encode_decimal(value, false).into_boxed_slice())
			.collect();
		let with_crlf = (0..CACHE_LEN as i64)
			.map(|value| encode_decimal(value, true).into_boxed_slice())
			.collect();
		log::debug!("numeric cache built for 0..{}", CACHE_LEN);
		Self { plain, with_crlf }
	}

	#[inline]
	fn get(&self, index: usize, with_crlf: bool) -> &[u8] {
		if with_crlf {
			&self.with_crlf[index]
		} else {
			&self.plain[index]
		}
	}
}

static NUM_CACHE: LazyLock<NumCache> = LazyLock::new(NumCache::build);

/// Build the numeric cache now instead of on the first encode.
pub fn warm_up() {
	LazyLock::force(&NUM_CACHE);
}

/// Convert `value` to its decimal ASCII bytes, optionally followed by CRLF.
///
/// Cached values are borrowed from the process-wide table; any other value
/// is formatted into a freshly allocated buffer.
///
/// # Example
///
/// ```rust
/// use cmdwire::num::num_to_bytes;
///
/// assert_eq!(&num_to_bytes(42, true)[..], b"42\r\n");
/// assert_eq!(&num_to_bytes(-1024, false)[..], b"-1024");
/// ```
#[inline]
pub fn num_to_bytes(value: i64, with_crlf: bool) -> Cow<'static, [u8]> {
	if (0..CACHE_LEN as i64).contains(&value) {
		Cow::Borrowed(NUM_CACHE.get(value as usize, with_crlf))
	} else if value == -1 {
		Cow::Borrowed(if with_crlf { NEG_ONE_CRLF } else { NEG_ONE })
	} else {
		Cow::Owned(encode_decimal(value, with_crlf))
	}
}

/// Write the decimal encoding of `value` straight into `sink`.
#[inline]
pub fn write_num<S: Sink + ?Sized>(sink: &mut S, value: i64, with_crlf: bool) -> Result<(), S::Error> {
	sink.put_raw(&num_to_bytes(value, with_crlf))
}

/// Number of bytes in the decimal encoding of `value`, without CRLF.
#[inline]
pub fn decimal_len(value: i64) -> usize {
	digit_count(value.unsigned_abs()) + usize::from(value < 0)
}

/// Format `value` without consulting the cache.
///
/// The magnitude is taken as `u64`, so `i64::MIN` needs no special case.
pub(crate) fn encode_decimal(value: i64, with_crlf: bool) -> Vec<u8> {
	let negative = value < 0;
	let mut magnitude = value.unsigned_abs();
	let mut index = digit_count(magnitude) + usize::from(negative);

	let mut bytes = vec![0u8; if with_crlf { index + 2 } else { index }];
	if with_crlf {
		bytes[index] = CR;
		bytes[index + 1] = LF;
	}
	if negative {
		bytes[0] = b'-';
	}

	// Runs at least once so zero still yields a single digit.
	loop {
		index -= 1;
		bytes[index] = b'0' + (magnitude % 10) as u8;
		magnitude /= 10;
		if magnitude == 0 {
			break;
		}
	}
	bytes
}

#[inline]
fn digit_count(magnitude: u64) -> usize {
	magnitude.checked_ilog10().map_or(1, |log| log as usize + 1)
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_zero() {
		assert_eq!(&num_to_bytes(0, false)[..], b"0");
		assert_eq!(encode_decimal(0, false), b"0");
	}

	#[rstest]
	#[case(0)]
	#[case(-1)]
	#[case(1)]
	#[case(9)]
	#[case(10)]
	#[case(255)]
	#[case(256)]
	#[case(-256)]
	#[case(-2)]
	#[case(1_000)]
	#[case(999_999)]
	#[case(-1_000_000_007)]
	#[case(i32::MAX as i64)]
	#[case(i32::MIN as i64)]
	#[case(i64::MAX)]
	#[case(i64::MIN)]
	#[case(i64::MIN + 1)]
	fn test_parses_back(#[case] value: i64) {
		let bytes = num_to_bytes(value, false);
		let text = std::str::from_utf8(&bytes).unwrap();
		assert_eq!(text.parse::<i64>().unwrap(), value);
		assert_eq!(text, value.to_string());
	}

	#[test]
	fn test_wide_range_matches_std() {
		let mut value: i64 = 1;
		while value < i64::MAX / 3 {
			for v in [value - 1, value, value + 1, -value, -value - 1] {
				assert_eq!(num_to_bytes(v, false).as_ref(), v.to_string().as_bytes(), "value {}", v);
			}
			value *= 3;
		}
	}

	#[rstest]
	#[case(0)]
	#[case(-1)]
	#[case(77)]
	#[case(255)]
	#[case(256)]
	#[case(-4096)]
	#[case(i64::MAX)]
	#[case(i64::MIN)]
	fn test_crlf_is_suffix(#[case] value: i64) {
		let mut expected = num_to_bytes(value, false).into_owned();
		expected.extend_from_slice(b"\r\n");
		assert_eq!(num_to_bytes(value, true).as_ref(), expected.as_slice());
	}

	#[test]
	fn test_cache_matches_generic_path() {
		for value in 0..CACHE_LEN as i64 {
			assert_eq!(num_to_bytes(value, false).as_ref(), encode_decimal(value, false).as_slice());
			assert_eq!(num_to_bytes(value, true).as_ref(), encode_decimal(value, true).as_slice());
		}
		assert_eq!(NEG_ONE, encode_decimal(-1, false).as_slice());
		assert_eq!(NEG_ONE_CRLF, encode_decimal(-1, true).as_slice());
	}

	#[rstest]
	#[case(0, true)]
	#[case(255, true)]
	#[case(-1, true)]
	#[case(256, false)]
	#[case(-2, false)]
	fn test_cached_values_are_borrowed(#[case] value: i64, #[case] cached: bool) {
		let bytes = num_to_bytes(value, true);
		assert_eq!(matches!(bytes, Cow::Borrowed(_)), cached);
	}

	#[rstest]
	#[case(9, 1)]
	#[case(10, 2)]
	#[case(99, 2)]
	#[case(100, 3)]
	#[case(999_999_999_999_999_999, 18)]
	#[case(1_000_000_000_000_000_000, 19)]
	#[case(u64::MAX, 20)]
	fn test_digit_count_at_powers_of_ten(#[case] magnitude: u64, #[case] expected: usize) {
		assert_eq!(digit_count(magnitude), expected);
	}

	#[rstest]
	#[case(1_000, false, 4)]
	#[case(1_000, true, 6)]
	#[case(-1_000, false, 5)]
	#[case(-1_000, true, 7)]
	#[case(i64::MIN, false, 20)]
	fn test_generic_buffer_is_exact(#[case] value: i64, #[case] with_crlf: bool, #[case] len: usize) {
		let bytes = encode_decimal(value, with_crlf);
		assert_eq!(bytes.len(), len);
		assert_eq!(bytes.capacity(), len);
		assert_eq!(decimal_len(value) + if with_crlf { 2 } else { 0 }, len);
	}

	#[test]
	fn test_write_num() {
		let mut buf = Vec::new();
		warm_up();
		write_num(&mut buf, 12, true).unwrap();
		write_num(&mut buf, -1, false).unwrap();
		assert_eq!(buf, b"12\r\n-1");
	}

	#[test]
	fn test_concurrent_reads() {
		let handles: Vec<_> = (0..4)
			.map(|_| {
				std::thread::spawn(|| {
					(0..CACHE_LEN as i64)
						.map(|value| num_to_bytes(value, true).len())
						.sum::<usize>()
				})
			})
			.collect();
		let totals: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
		assert!(totals.windows(2).all(|w| w[0] == w[1]));
	}
}
