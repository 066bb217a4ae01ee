//! Command representation.

use std::convert::Infallible;
use std::slice;

use bytes::Bytes;
use bytes::BytesMut;
use smallvec::SmallVec;

use crate::arg::Arg;
use crate::sink::Sink;
use crate::writer::bulk_len;
use crate::writer::header_len;
use crate::writer::write_command;

/// Number of arguments stored without a heap allocation.
pub const INLINE_ARGS: usize = 4;

/// A single command invocation: a name followed by its arguments.
///
/// Up to [`INLINE_ARGS`] arguments live inline; longer commands spill to
/// the heap. A command is not modified once built.
///
/// # Example
///
/// ```rust
/// use cmdwire::Command;
///
/// let cmd = Command::new("SET").arg("key").arg("value");
/// assert_eq!(cmd.len(), 3);
/// assert_eq!(&cmd.encode()[..], b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command<'a> {
	args: SmallVec<[Arg<'a>; INLINE_ARGS]>,
}

impl<'a> Command<'a> {
	/// Start a command with its name.
	pub fn new(name: impl Into<Arg<'a>>) -> Self {
		let mut args = SmallVec::new();
		args.push(name.into());
		Self { args }
	}

	/// Append one argument.
	#[must_use]
	pub fn arg(mut self, arg: impl Into<Arg<'a>>) -> Self {
		self.args.push(arg.into());
		self
	}

	/// A name followed by a sequence of arguments.
	pub fn with_args<I>(name: impl Into<Arg<'a>>, rest: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Arg<'a>>,
	{
		let rest = rest.into_iter();
		let mut args = SmallVec::with_capacity(1 + rest.size_hint().0);
		args.push(name.into());
		args.extend(rest.map(Into::into));
		Self { args }
	}

	/// A command made only of a sequence of arguments, the first being the name.
	pub fn from_args<I>(args: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Arg<'a>>,
	{
		Self {
			args: args.into_iter().map(Into::into).collect(),
		}
	}

	/// Build from four optional leading slots and a trailing sequence.
	///
	/// `None` slots are skipped and do not count towards the length; an
	/// explicit [`Arg::Absent`] is kept and encodes as an empty bulk string.
	pub fn from_slots<I>(
		name: Option<Arg<'a>>,
		arg1: Option<Arg<'a>>,
		arg2: Option<Arg<'a>>,
		arg3: Option<Arg<'a>>,
		rest: I,
	) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Arg<'a>>,
	{
		let mut args: SmallVec<[Arg<'a>; INLINE_ARGS]> = [name, arg1, arg2, arg3].into_iter().flatten().collect();
		args.extend(rest.into_iter().map(Into::into));
		Self { args }
	}

	/// Total number of arguments, name included.
	pub fn len(&self) -> usize {
		self.args.len()
	}

	pub fn is_empty(&self) -> bool {
		self.args.is_empty()
	}

	pub fn name(&self) -> Option<&Arg<'a>> {
		self.args.first()
	}

	/// Arguments in the order they are written.
	pub fn args(&self) -> slice::Iter<'_, Arg<'a>> {
		self.args.iter()
	}

	/// Whether the arguments still fit in inline storage.
	pub fn is_inline(&self) -> bool {
		!self.args.spilled()
	}

	/// Exact number of bytes [`write_command`] produces for this command.
	pub fn encoded_len(&self) -> usize {
		header_len(self.len()) + self.args().map(bulk_len).sum::<usize>()
	}

	/// Write this command into `sink`.
	pub fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<(), S::Error> {
		write_command(sink, self)
	}

	/// Encode into a buffer sized for this command.
	pub fn encode(&self) -> Bytes {
		let mut buf = BytesMut::with_capacity(self.encoded_len());
		let result: Result<(), Infallible> = self.write_to(&mut buf);
		match result {
			Ok(()) => buf.freeze(),
			Err(never) => match never {},
		}
	}

	pub fn into_owned(self) -> Command<'static> {
		Command {
			args: self.args.into_iter().map(Arg::into_owned).collect(),
		}
	}
}

impl<'c, 'a> IntoIterator for &'c Command<'a> {
	type Item = &'c Arg<'a>;
	type IntoIter = slice::Iter<'c, Arg<'a>>;

	fn into_iter(self) -> Self::IntoIter {
		self.args()
	}
}

impl<'a, A: Into<Arg<'a>>> FromIterator<A> for Command<'a> {
	fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
		Self::from_args(iter)
	}
}

/// Build a [`Command`] from a name and any number of arguments.
///
/// ```rust
/// let cmd = cmdwire::cmd!("EXPIRE", "session:1", 30);
/// assert_eq!(&cmd.encode()[..], b"*3\r\n$6\r\nEXPIRE\r\n$9\r\nsession:1\r\n$2\r\n30\r\n");
/// ```
#[macro_export]
macro_rules! cmd {
	($name:expr $(, $arg:expr)* $(,)?) => {
		$crate::Command::new($name)$(.arg($arg))*
	};
}
