mod cli;
mod render;

use std::convert::Infallible;
use std::io;
use std::io::Write;
use std::process::ExitCode;

use bytes::BytesMut;
use clap::Parser;
use cmdwire::BoundedSink;
use cmdwire::Command;
use cmdwire::SinkError;
use cmdwire::write_command;
use thiserror::Error;

use crate::cli::Cli;

#[derive(Error, Debug)]
enum CliError {
	#[error(transparent)]
	Telemetry(#[from] telemetry::TelemetryError),

	#[error("Failed to write output: {0}")]
	Io(#[from] io::Error),

	#[error("Request too large: {0}")]
	Sink(#[from] SinkError<Infallible>),
}

fn main() -> ExitCode {
	let args = Cli::parse();
	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("error: {}", e);
			ExitCode::FAILURE
		}
	}
}

fn run(args: &Cli) -> Result<(), CliError> {
	telemetry::init(&args.log_level)?;
	cmdwire::num::warm_up();

	let command = args.to_command();
	let encoded = encode(&command, args.max_bytes)?;
	tracing::debug!(
		arguments = command.len(),
		bytes = encoded.len(),
		inline = command.is_inline(),
		"Encoded command"
	);

	let mut stdout = io::stdout().lock();
	stdout.write_all(&render::render(args.format, &encoded))?;
	stdout.flush()?;
	Ok(())
}

fn encode(command: &Command<'_>, max_bytes: Option<usize>) -> Result<BytesMut, SinkError<Infallible>> {
	let mut buf = BytesMut::with_capacity(command.encoded_len());
	match max_bytes {
		Some(limit) => {
			let mut sink = BoundedSink::new(&mut buf, limit);
			write_command(&mut sink, command)?;
		}
		None => {
			if let Err(never) = write_command(&mut buf, command) {
				match never {}
			}
		}
	}
	Ok(buf)
}
