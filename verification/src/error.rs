use std::{fmt, io};

/// Fork configuration and persistence errors.
#[derive(Debug, PartialEq)]
pub enum Error {
	/// Configured trigger height is below the minimum of the active network.
	ForkHeightTooLow { configured: u32, minimum: u32 },
	/// Fork id does not fit the 3 bytes carried in post-fork signatures.
	ForkIdOutOfRange(u32),
	/// Activation marker on disk disagrees with the configured trigger.
	MarkerMismatch { key: &'static str, configured: u32, recorded: u32 },
	/// Activation marker exists but cannot be parsed.
	MarkerCorrupt(String),
	/// Marker file could not be read or written.
	Io(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::ForkHeightTooLow { configured, minimum } =>
				write!(f, "fork height {} is less than network minimum {}", configured, minimum),
			Error::ForkIdOutOfRange(fork_id) =>
				write!(f, "fork id {} is not in range 0..{}", fork_id, 0x00ffffffu32),
			Error::MarkerMismatch { key, configured, recorded } =>
				write!(f, "activation marker disagrees with configuration: {} is {}, configured {}", key, recorded, configured),
			Error::MarkerCorrupt(ref reason) =>
				write!(f, "activation marker is corrupt: {}", reason),
			Error::Io(ref reason) =>
				write!(f, "marker io error: {}", reason),
		}
	}
}

impl From<io::Error> for Error {
	fn from(err: io::Error) -> Self {
		Error::Io(err.to_string())
	}
}
