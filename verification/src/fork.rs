//! One-shot hard-fork activation controller.
//!
//! The controller is queried once per connected block. It decides exactly
//! once when the new consensus ruleset becomes active, runs the one-time
//! activation actions, and survives process restarts without re-triggering:
//! the durable marker written at activation is the sole source of truth for
//! "was this already activated".

use std::path::{Path, PathBuf};
use parking_lot::Mutex;
use network::{ConsensusParams, MAX_FORK_ID};
use storage::BlockHeaderProvider;
use deployments::{threshold_state, DeploymentState};
use error::Error;
use marker::{ForkMarker, MARKER_FILENAME};

/// One-time action run at activation, typically an automatic wallet backup
/// performed by the host node. Implementations must tolerate an already
/// existing backup file by renaming it aside rather than overwriting it.
pub trait BackupHook: Send + Sync {
	fn backup(&self, activation_height: u32) -> Result<(), String>;
}

/// Lifecycle of the one-shot consensus-rule transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkStatus {
	/// No trigger configured and no activation recorded.
	Dormant,
	/// Triggers configured, watching connected blocks.
	Armed,
	/// The new ruleset is in force. Terminal.
	Activated,
}

/// Emitted exactly once per process lifetime, by the evaluation that performs
/// the activation actions. Never emitted for an activation restored from a
/// marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
	/// Height the fork activated at.
	pub height: u32,
	/// Whether the one-time backup hook ran successfully.
	pub backup_performed: bool,
}

struct State {
	status: ForkStatus,
	activation_height: Option<u32>,
	previously_activated: bool,
	signal: Option<DeploymentState>,
}

/// Decides exactly once when the new consensus ruleset becomes active.
pub struct ForkActivation {
	consensus: ConsensusParams,
	marker_path: PathBuf,
	backup: Option<Box<dyn BackupHook>>,
	state: Mutex<State>,
}

impl ForkActivation {
	/// Validates the trigger configuration and restores a previous activation
	/// if the data directory carries a marker.
	pub fn setup(consensus: ConsensusParams, data_dir: &Path) -> Result<Self, Error> {
		{
			let fork = &consensus.fork;
			if let Some(fork_height) = fork.fork_height {
				let minimum = consensus.network.default_fork_height();
				if fork_height < minimum {
					return Err(Error::ForkHeightTooLow {
						configured: fork_height,
						minimum: minimum,
					});
				}
			}
			if fork.fork_id > MAX_FORK_ID {
				return Err(Error::ForkIdOutOfRange(fork.fork_id));
			}
			if fork.fork_id == 0 {
				warn!(target: "fork", "fork id 0 leaves transactions vulnerable to replay across the fork");
			}
		}

		let marker_path = data_dir.join(MARKER_FILENAME);
		let state = match ForkMarker::load(&marker_path)? {
			Some(marker) => {
				if marker.fork_id != consensus.fork.fork_id {
					return Err(Error::MarkerMismatch {
						key: "forkid",
						configured: consensus.fork.fork_id,
						recorded: marker.fork_id,
					});
				}

				info!(target: "fork", "found activation marker at {} - client has already forked at height {}",
					marker_path.display(), marker.fork_height);
				State {
					status: ForkStatus::Activated,
					activation_height: Some(marker.fork_height),
					previously_activated: true,
					signal: None,
				}
			},
			None => {
				let armed = consensus.fork.fork_height.is_some() || consensus.fork.signal.is_some();
				State {
					status: if armed { ForkStatus::Armed } else { ForkStatus::Dormant },
					activation_height: None,
					previously_activated: false,
					signal: None,
				}
			},
		};

		Ok(ForkActivation {
			consensus: consensus,
			marker_path: marker_path,
			backup: None,
			state: Mutex::new(state),
		})
	}

	/// Installs the one-time backup hook run at activation.
	pub fn with_backup_hook(mut self, hook: Box<dyn BackupHook>) -> Self {
		self.backup = Some(hook);
		self
	}

	/// Evaluates the triggers against the newly connected block at `height`.
	///
	/// Returns the one-time activation event when this block flips the fork
	/// on; after that (and after a restart with a marker present) the call is
	/// a no-op with respect to one-time actions.
	pub fn evaluate(&self, height: u32, headers: &dyn BlockHeaderProvider) -> Result<Option<Activation>, Error> {
		let mut state = self.state.lock();
		match state.status {
			ForkStatus::Dormant | ForkStatus::Activated => return Ok(None),
			ForkStatus::Armed => (),
		}

		if let Some(fork_height) = self.consensus.fork.fork_height {
			// the height trigger pre-empts any signal still accumulating
			if height == fork_height {
				return self.activate(&mut state, height).map(Some);
			}
		}

		if let Some(ref deployment) = self.consensus.fork.signal {
			if threshold_state(&mut state.signal, deployment, height, headers).is_active() {
				return self.activate(&mut state, height).map(Some);
			}
		}

		Ok(None)
	}

	fn activate(&self, state: &mut State, height: u32) -> Result<Activation, Error> {
		info!(target: "fork", "performing fork activation actions at height {}", height);

		let fork = &self.consensus.fork;
		let marker = ForkMarker {
			fork_height: height,
			fork_id: fork.fork_id,
			auto_backup_block: Some(fork.auto_backup_block.unwrap_or(height.saturating_sub(1))),
		};
		// the marker decides "already activated" on the next start, so it is
		// made durable before any other one-time action runs
		marker.store(&self.marker_path)?;

		let backup_performed = match self.backup {
			Some(ref hook) => match hook.backup(height) {
				Ok(()) => true,
				Err(error) => {
					warn!(target: "fork", "one-time backup failed, continuing without it: {}", error);
					false
				},
			},
			None => {
				if fork.auto_backup_block.is_some() {
					warn!(target: "fork", "auto backup configured but no backup hook is installed, skipping");
				}
				false
			},
		};

		state.status = ForkStatus::Activated;
		state.activation_height = Some(height);

		Ok(Activation {
			height: height,
			backup_performed: backup_performed,
		})
	}

	pub fn status(&self) -> ForkStatus {
		self.state.lock().status
	}

	/// True once the hard-fork ruleset is in force.
	pub fn is_active(&self) -> bool {
		self.state.lock().status == ForkStatus::Activated
	}

	/// Height the new ruleset applies from; fed to `work_required`.
	pub fn activation_height(&self) -> Option<u32> {
		self.state.lock().activation_height
	}

	/// True when activation was restored from a marker written by an earlier
	/// run, i.e. no activation actions were performed by this process.
	pub fn previously_activated(&self) -> bool {
		self.state.lock().previously_activated
	}
}
