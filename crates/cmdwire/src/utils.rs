//! Wire constants shared by the encoders.

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';

/// Type markers used by requests
pub const ARRAY: u8 = b'*';
pub const BULK_STRING: u8 = b'$';

/// Content of an absent argument
pub const EMPTY: &[u8] = b"";
