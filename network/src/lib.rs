extern crate primitives;

mod consensus;
mod deployments;
mod network;
mod schedule;

pub use primitives::{hash, compact, uint};

pub use consensus::{ConsensusParams, ForkParams, DEFAULT_FORK_ID, MAX_FORK_ID};
pub use deployments::Deployment;
pub use network::Network;
pub use schedule::{RetargetPhase, RetargetSchedule, ScheduleError, HARDFORK_RETARGET_BLOCKS};
