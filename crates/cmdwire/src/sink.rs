//! Byte targets that encoded requests are appended to.

use std::convert::Infallible;
use std::io;

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;
use thiserror::Error;

/// An append-only byte target.
///
/// Encoders only ever append; they never read back what was written. Errors
/// raised by a sink are returned to the caller unchanged.
pub trait Sink {
	type Error;

	/// Append raw bytes.
	fn put_raw(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

	/// Append the contents of a byte view.
	///
	/// Sinks that can hold on to shared buffers override this to avoid
	/// copying the view.
	#[inline]
	fn put_view(&mut self, view: &Bytes) -> Result<(), Self::Error> {
		self.put_raw(view)
	}
}

impl Sink for BytesMut {
	type Error = Infallible;

	#[inline]
	fn put_raw(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
		self.put_slice(bytes);
		Ok(())
	}
}

impl Sink for Vec<u8> {
	type Error = Infallible;

	#[inline]
	fn put_raw(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
		self.extend_from_slice(bytes);
		Ok(())
	}
}

impl<S: Sink + ?Sized> Sink for &mut S {
	type Error = S::Error;

	#[inline]
	fn put_raw(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
		(**self).put_raw(bytes)
	}

	#[inline]
	fn put_view(&mut self, view: &Bytes) -> Result<(), Self::Error> {
		(**self).put_view(view)
	}
}

/// Collects output as a list of chunks suitable for vectored writes.
///
/// Raw bytes are gathered into an owned buffer, while byte views are kept
/// as reference-counted handles to the caller's memory.
#[derive(Debug, Default)]
pub struct ChunkedSink {
	chunks: Vec<Bytes>,
	pending: BytesMut,
}

impl ChunkedSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Total number of bytes accepted so far.
	pub fn len(&self) -> usize {
		self.chunks.iter().map(Bytes::len).sum::<usize>() + self.pending.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Finish and return the chunks in write order.
	pub fn into_chunks(mut self) -> Vec<Bytes> {
		self.flush_pending();
		self.chunks
	}

	fn flush_pending(&mut self) {
		if !self.pending.is_empty() {
			self.chunks.push(self.pending.split().freeze());
		}
	}
}

impl Sink for ChunkedSink {
	type Error = Infallible;

	#[inline]
	fn put_raw(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
		self.pending.put_slice(bytes);
		Ok(())
	}

	fn put_view(&mut self, view: &Bytes) -> Result<(), Self::Error> {
		if view.is_empty() {
			return Ok(());
		}
		self.flush_pending();
		self.chunks.push(view.clone());
		Ok(())
	}
}

/// Forwards everything to an [`io::Write`].
///
/// Small writes are passed through as-is, so wrap unbuffered writers in a
/// `BufWriter` first.
#[derive(Debug)]
pub struct IoSink<W> {
	inner: W,
	written: usize,
}

impl<W: io::Write> IoSink<W> {
	pub fn new(inner: W) -> Self {
		Self { inner, written: 0 }
	}

	/// Bytes successfully handed to the writer.
	pub fn written(&self) -> usize {
		self.written
	}

	pub fn get_ref(&self) -> &W {
		&self.inner
	}

	pub fn into_inner(self) -> W {
		self.inner
	}
}

impl<W: io::Write> Sink for IoSink<W> {
	type Error = io::Error;

	fn put_raw(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
		self.inner.write_all(bytes)?;
		self.written += bytes.len();
		Ok(())
	}
}

/// Errors raised by [`BoundedSink`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SinkError<E> {
	/// Accepting the write would take the sink past its limit
	#[error("Sink capacity exceeded: {written} of {limit} bytes used, {requested} more requested")]
	CapacityExceeded {
		limit: usize,
		written: usize,
		requested: usize,
	},

	/// The wrapped sink failed
	#[error("Inner sink error: {0}")]
	Inner(E),
}

/// Caps the number of bytes passed to the wrapped sink.
///
/// A write that would cross the limit is rejected as a whole; bytes accepted
/// before it stay in the inner sink.
#[derive(Debug)]
pub struct BoundedSink<S> {
	inner: S,
	limit: usize,
	written: usize,
}

impl<S: Sink> BoundedSink<S> {
	pub fn new(inner: S, limit: usize) -> Self {
		Self {
			inner,
			limit,
			written: 0,
		}
	}

	pub fn written(&self) -> usize {
		self.written
	}

	pub fn remaining(&self) -> usize {
		self.limit - self.written
	}

	pub fn into_inner(self) -> S {
		self.inner
	}

	#[inline]
	fn admit(&self, requested: usize) -> Result<(), SinkError<S::Error>> {
		if requested > self.remaining() {
			return Err(SinkError::CapacityExceeded {
				limit: self.limit,
				written: self.written,
				requested,
			});
		}
		Ok(())
	}
}

impl<S: Sink> Sink for BoundedSink<S> {
	type Error = SinkError<S::Error>;

	fn put_raw(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
		self.admit(bytes.len())?;
		self.inner.put_raw(bytes).map_err(SinkError::Inner)?;
		self.written += bytes.len();
		Ok(())
	}

	fn put_view(&mut self, view: &Bytes) -> Result<(), Self::Error> {
		self.admit(view.len())?;
		self.inner.put_view(view).map_err(SinkError::Inner)?;
		self.written += view.len();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	struct FailingWriter;

	impl io::Write for FailingWriter {
		fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
			Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	fn fill<S: Sink<Error = Infallible>>(sink: &mut S) {
		sink.put_raw(b"raw").unwrap();
		sink.put_view(&Bytes::from_static(b"view")).unwrap();
	}

	#[test]
	fn test_bytes_mut_and_vec_agree() {
		let mut a = BytesMut::new();
		let mut b = Vec::new();
		fill(&mut a);
		fill(&mut b);
		assert_eq!(&a[..], b"rawview");
		assert_eq!(b, b"rawview");
	}

	#[test]
	fn test_chunked_sink_keeps_views_shared() {
		let view = Bytes::from(b"shared payload".to_vec());
		let mut sink = ChunkedSink::new();
		sink.put_raw(b"$14\r\n").unwrap();
		sink.put_view(&view).unwrap();
		sink.put_raw(b"\r\n").unwrap();
		assert_eq!(sink.len(), 21);

		let chunks = sink.into_chunks();
		assert_eq!(chunks.len(), 3);
		assert_eq!(chunks[1].as_ptr(), view.as_ptr());
		assert_eq!(chunks.concat(), b"$14\r\nshared payload\r\n");
	}

	#[test]
	fn test_chunked_sink_skips_empty_views() {
		let mut sink = ChunkedSink::new();
		assert!(sink.is_empty());
		sink.put_view(&Bytes::new()).unwrap();
		assert!(sink.is_empty());
		assert!(sink.into_chunks().is_empty());
	}

	#[test]
	fn test_io_sink_counts_bytes() {
		let mut sink = IoSink::new(Vec::new());
		sink.put_raw(b"abc").unwrap();
		sink.put_view(&Bytes::from_static(b"de")).unwrap();
		assert_eq!(sink.written(), 5);
		assert_eq!(sink.get_ref().as_slice(), b"abcde");
	}

	#[test]
	fn test_io_sink_propagates_writer_error() {
		let mut sink = IoSink::new(FailingWriter);
		let err = sink.put_raw(b"abc").unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
		assert_eq!(sink.written(), 0);
	}

	#[rstest]
	#[case(4, b"ab".as_slice(), b"cd".as_slice(), true)]
	#[case(3, b"ab".as_slice(), b"cd".as_slice(), false)]
	#[case(0, b"".as_slice(), b"".as_slice(), true)]
	fn test_bounded_sink_limit(#[case] limit: usize, #[case] first: &[u8], #[case] second: &[u8], #[case] fits: bool) {
		let mut sink = BoundedSink::new(Vec::new(), limit);
		sink.put_raw(first).unwrap();
		assert_eq!(sink.put_raw(second).is_ok(), fits);
	}

	#[test]
	fn test_bounded_sink_reports_capacity() {
		let mut sink = BoundedSink::new(Vec::new(), 5);
		sink.put_raw(b"abc").unwrap();
		let err = sink.put_view(&Bytes::from_static(b"def")).unwrap_err();
		assert_eq!(
			err,
			SinkError::CapacityExceeded {
				limit: 5,
				written: 3,
				requested: 3,
			}
		);
		assert_eq!(sink.remaining(), 2);
		assert_eq!(sink.into_inner(), b"abc");
	}

	#[test]
	fn test_bounded_sink_wraps_inner_error() {
		let mut sink = BoundedSink::new(IoSink::new(FailingWriter), 16);
		let err = sink.put_raw(b"abc").unwrap_err();
		assert!(matches!(err, SinkError::Inner(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
		assert_eq!(sink.written(), 0);
	}
}
