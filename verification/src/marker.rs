//! Durable record of a performed fork activation.
//!
//! The marker file is the sole source of truth for "was this already
//! activated": its presence restores the activated state on restart and its
//! absence means the triggers are still being watched. It is written with a
//! temp-file-and-rename so a crash mid-write never leaves a readable marker.

use std::fs;
use std::io::Write;
use std::path::Path;
use error::Error;

/// Marker file name inside the data directory.
pub const MARKER_FILENAME: &'static str = "fork.conf";

/// Parsed activation marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ForkMarker {
	/// Height the fork activated at.
	pub fork_height: u32,
	/// Fork id the node was configured with when it activated.
	pub fork_id: u32,
	/// Height recorded for the one-time wallet backup.
	pub auto_backup_block: Option<u32>,
}

impl ForkMarker {
	/// Reads the marker. `Ok(None)` means no marker has been written yet.
	pub fn load(path: &Path) -> Result<Option<ForkMarker>, Error> {
		let contents = match fs::read_to_string(path) {
			Ok(contents) => contents,
			Err(ref err) if err.kind() == ::std::io::ErrorKind::NotFound => return Ok(None),
			Err(err) => return Err(err.into()),
		};

		let mut fork_height = None;
		let mut fork_id = None;
		let mut auto_backup_block = None;

		for line in contents.lines() {
			let line = line.trim();
			if line.is_empty() || line.starts_with('#') {
				continue;
			}

			let (key, value) = match line.split_once('=') {
				Some(pair) => pair,
				None => return Err(Error::MarkerCorrupt(format!("line without '=': {}", line))),
			};

			let value = value.trim().parse::<u32>()
				.map_err(|_| Error::MarkerCorrupt(format!("non-numeric value for {}", key)))?;

			match key.trim() {
				"forkheight" => fork_height = Some(value),
				"forkid" => fork_id = Some(value),
				"autobackupblock" => auto_backup_block = Some(value),
				// tolerate keys written by newer versions
				_ => (),
			}
		}

		match (fork_height, fork_id) {
			(Some(fork_height), Some(fork_id)) => Ok(Some(ForkMarker {
				fork_height: fork_height,
				fork_id: fork_id,
				auto_backup_block: auto_backup_block,
			})),
			(None, _) => Err(Error::MarkerCorrupt("missing forkheight".into())),
			(_, None) => Err(Error::MarkerCorrupt("missing forkid".into())),
		}
	}

	/// Writes the marker atomically: the contents are synced to a temporary
	/// sibling first and renamed over the final path in one step.
	pub fn store(&self, path: &Path) -> Result<(), Error> {
		let mut contents = String::new();
		contents.push_str(&format!("forkheight={}\n", self.fork_height));
		contents.push_str(&format!("forkid={}\n", self.fork_id));
		if let Some(auto_backup_block) = self.auto_backup_block {
			contents.push_str(&format!("autobackupblock={}\n", auto_backup_block));
		}

		let tmp_path = match path.file_name() {
			Some(name) => {
				let mut tmp_name = name.to_os_string();
				tmp_name.push(".tmp");
				path.with_file_name(tmp_name)
			},
			None => return Err(Error::Io(format!("invalid marker path: {:?}", path))),
		};

		{
			let mut file = fs::File::create(&tmp_path)?;
			file.write_all(contents.as_bytes())?;
			file.sync_all()?;
		}
		fs::rename(&tmp_path, path)?;

		Ok(())
	}
}
