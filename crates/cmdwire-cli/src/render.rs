use std::fmt::Write;

use crate::cli::OutputFormat;

/// Render encoded request bytes for printing.
pub fn render(format: OutputFormat, encoded: &[u8]) -> Vec<u8> {
	match format {
		OutputFormat::Raw => encoded.to_vec(),
		OutputFormat::Escaped => {
			let mut out = encoded.escape_ascii().to_string();
			out.push('\n');
			out.into_bytes()
		}
		OutputFormat::Hex => {
			let mut out = String::with_capacity(encoded.len() * 2 + 1);
			for byte in encoded {
				let _ = write!(out, "{byte:02x}");
			}
			out.push('\n');
			out.into_bytes()
		}
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(OutputFormat::Raw, b"*1\r\n$4\r\nPING\r\n".as_slice())]
	#[case(OutputFormat::Escaped, b"*1\\r\\n$4\\r\\nPING\\r\\n\n".as_slice())]
	#[case(OutputFormat::Hex, b"2a310d0a24340d0a50494e470d0a\n".as_slice())]
	fn test_render(#[case] format: OutputFormat, #[case] expected: &[u8]) {
		assert_eq!(render(format, b"*1\r\n$4\r\nPING\r\n"), expected);
	}

	#[test]
	fn test_escaped_binary() {
		assert_eq!(render(OutputFormat::Escaped, &[0x00, 0xff]), b"\\x00\\xff\n");
	}
}
