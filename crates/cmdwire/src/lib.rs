//! # cmdwire - RESP request encoding
//!
//! Encodes client command invocations into the multi-bulk request format
//! understood by Redis-compatible servers:
//!
//! ```text
//! *3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n
//! ```
//!
//! ## Features
//!
//! - **No allocation for short commands**: up to four arguments are stored
//!   inline
//! - **Zero-copy views**: `Bytes` arguments are handed to the sink as-is
//! - **Cached lengths**: small integers are formatted from a table built once
//!   per process
//! - **Pluggable output**: anything implementing [`Sink`]; sink errors are
//!   returned unchanged
//!
//! ## Example
//!
//! ```rust
//! use bytes::Bytes;
//! use bytes::BytesMut;
//! use cmdwire::Command;
//!
//! let payload = Bytes::from_static(b"hello");
//! let cmd = Command::new("SET").arg("greeting").arg(payload);
//!
//! let mut buf = BytesMut::new();
//! cmdwire::write_command(&mut buf, &cmd).unwrap();
//! assert_eq!(&buf[..], b"*3\r\n$3\r\nSET\r\n$8\r\ngreeting\r\n$5\r\nhello\r\n");
//! ```

mod arg;
mod command;
pub mod num;
mod sink;
mod utils;
mod writer;

pub use arg::Arg;
pub use command::Command;
pub use command::INLINE_ARGS;
pub use num::num_to_bytes;
pub use sink::BoundedSink;
pub use sink::ChunkedSink;
pub use sink::IoSink;
pub use sink::Sink;
pub use sink::SinkError;
pub use utils::ARRAY;
pub use utils::BULK_STRING;
pub use utils::CR;
pub use utils::CRLF;
pub use utils::EMPTY;
pub use utils::LF;
pub use writer::write_bulk;
pub use writer::write_command;
pub use writer::write_direct;
