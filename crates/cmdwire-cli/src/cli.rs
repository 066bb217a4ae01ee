//! Command-line arguments.

use clap::Parser;
use clap::ValueEnum;
use cmdwire::Arg;
use cmdwire::Command;

/// How the encoded request is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// The request bytes exactly as sent on the wire
	Raw,
	/// Printable ASCII with control bytes escaped, followed by a newline
	Escaped,
	/// Lowercase hex, followed by a newline
	Hex,
}

/// Encode a command as a RESP multi-bulk request
#[derive(Parser, Debug)]
#[command(name = "cmdwire", author, version, about, long_about = None)]
pub struct Cli {
	/// Output format
	#[arg(short, long, value_enum, default_value_t = OutputFormat::Escaped)]
	pub format: OutputFormat,

	/// Fail if the request would be larger than this many bytes
	#[arg(long)]
	pub max_bytes: Option<usize>,

	/// Argument value that is sent as an empty bulk string
	#[arg(long)]
	pub null_token: Option<String>,

	/// Log level (off, trace, debug, info, warn, error)
	#[arg(long, default_value = "warn")]
	pub log_level: String,

	/// Command name followed by its arguments
	#[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
	pub args: Vec<String>,
}

impl Cli {
	/// Build the command, borrowing every argument from the parsed line.
	pub fn to_command(&self) -> Command<'_> {
		self.args
			.iter()
			.map(|arg| match &self.null_token {
				Some(token) if token == arg => Arg::Absent,
				_ => Arg::from(arg.as_str()),
			})
			.collect()
	}
}
