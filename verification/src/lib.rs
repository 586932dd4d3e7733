//! Hard-fork difficulty retargeting and activation rules.
//!
//! For every newly connected block the host node first asks the
//! [`ForkActivation`](struct.ForkActivation.html) controller whether the block
//! triggers or follows the one-time consensus-rule transition, then queries
//! [`work_required`](fn.work_required.html) for the difficulty applicable at
//! the current height. All bits/target/difficulty conversions are delegated to
//! `primitives::compact`.

extern crate parking_lot;
#[macro_use]
extern crate log;

extern crate chain;
extern crate network;
extern crate primitives;
extern crate storage;

#[cfg(test)]
extern crate tempdir;

mod deployments;
mod error;
mod fork;
mod marker;
#[cfg(test)]
mod test_chain;
mod work;

pub use primitives::{compact, hash, uint};

pub use deployments::{threshold_state, DeploymentState, ThresholdState};
pub use error::Error;
pub use fork::{Activation, BackupHook, ForkActivation, ForkStatus};
pub use marker::{ForkMarker, MARKER_FILENAME};
pub use work::{
	is_retarget_height, is_valid_proof_of_work, is_valid_proof_of_work_hash,
	retarget_timespan, work_required, work_required_fork_reset,
	work_required_post_fork_retarget, work_required_retarget,
};
