//! Version-bits signal tracking for the fork trigger.
//!
//! A deployment walks `Defined -> Started -> LockedIn -> Active` over
//! signalling periods of `window` blocks. A period locks the deployment in
//! when every one of its blocks carries the signal bits; the period after
//! that makes it active. There is no timeout: the trigger is watched for the
//! life of the chain or until the height trigger pre-empts it.

use network::Deployment;
use hash::H256;
use storage::{BlockAncestors, BlockHeaderProvider, BlockIterator, BlockRef};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ThresholdState {
	Defined,
	Started,
	LockedIn,
	Active,
}

impl Default for ThresholdState {
	fn default() -> Self {
		ThresholdState::Defined
	}
}

impl ThresholdState {
	pub fn is_active(&self) -> bool {
		match *self {
			ThresholdState::Active => true,
			_ => false,
		}
	}
}

/// Threshold state at a given signalling-period boundary.
#[derive(Debug, Clone, Default)]
pub struct DeploymentState {
	/// Boundary block number the state was computed at.
	block_number: u32,
	/// Boundary block hash, to detect that the cache still matches the chain.
	block_hash: H256,
	/// Threshold state in force after that boundary.
	state: ThresholdState,
}

/// Calculates threshold state of given deployment for the block currently
/// being connected at `number`. Blocks `0..number` are expected to be
/// available from the provider.
pub fn threshold_state(cache: &mut Option<DeploymentState>, deployment: &Deployment, number: u32, headers: &dyn BlockHeaderProvider) -> ThresholdState {
	// a block's state is that of the last period boundary before it
	let number = number.saturating_sub(1);
	let number = first_of_the_period(number, deployment.window);

	let hash = match headers.block_header(BlockRef::Number(number)) {
		Some(header) => header.hash,
		None => return ThresholdState::Defined,
	};

	if let Some(ref state) = *cache {
		if state.state.is_active() {
			return state.state;
		}
		// by checking hash, we make sure we are on the same branch
		if state.block_number == number && state.block_hash == hash {
			return state.state;
		}
	}

	let (start, initial_state) = match *cache {
		Some(ref state) => (number, state.state),
		None => (deployment.window - 1, ThresholdState::Defined),
	};

	let iter = ThresholdIterator::new(*deployment, headers, start, initial_state);
	let state = match iter.last() {
		Some(state) => state,
		None => DeploymentState {
			block_number: number,
			block_hash: hash,
			state: initial_state,
		},
	};

	let result = state.state;
	*cache = Some(state);
	result
}

fn first_of_the_period(block: u32, window: u32) -> u32 {
	if block < window - 1 {
		0
	} else {
		block - ((block + 1) % window)
	}
}

fn count_deployment_matches(block_number: u32, blocks: &dyn BlockHeaderProvider, deployment: &Deployment) -> usize {
	BlockAncestors::new(BlockRef::Number(block_number), blocks)
		.take(deployment.window as usize)
		.filter(|header| deployment.matches(header.raw.version))
		.count()
}

struct ThresholdIterator<'a> {
	deployment: Deployment,
	block_iterator: BlockIterator<'a>,
	headers: &'a dyn BlockHeaderProvider,
	last_state: ThresholdState,
}

impl<'a> ThresholdIterator<'a> {
	fn new(deployment: Deployment, headers: &'a dyn BlockHeaderProvider, to_check: u32, state: ThresholdState) -> Self {
		ThresholdIterator {
			deployment: deployment,
			block_iterator: BlockIterator::new(to_check, deployment.window, headers),
			headers: headers,
			last_state: state,
		}
	}
}

impl<'a> Iterator for ThresholdIterator<'a> {
	type Item = DeploymentState;

	fn next(&mut self) -> Option<Self::Item> {
		let (block_number, header) = match self.block_iterator.next() {
			Some(header) => header,
			None => return None,
		};

		match self.last_state {
			ThresholdState::Defined => {
				self.last_state = ThresholdState::Started;
			},
			ThresholdState::Started => {
				let count = count_deployment_matches(block_number, self.headers, &self.deployment);
				if count == self.deployment.window as usize {
					self.last_state = ThresholdState::LockedIn;
				}
			},
			ThresholdState::LockedIn => {
				self.last_state = ThresholdState::Active;
			},
			ThresholdState::Active => {
				return None;
			},
		}

		let result = DeploymentState {
			block_number: block_number,
			block_hash: header.hash,
			state: self.last_state,
		};

		Some(result)
	}
}

#[cfg(test)]
mod tests {
	use network::Deployment;
	use test_chain::MemoryHeaderProvider;
	use super::{first_of_the_period, threshold_state, ThresholdState};

	const SIGNAL: u32 = 0x20000002;
	const NO_SIGNAL: u32 = 0x20000000;

	fn deployment(window: u32) -> Deployment {
		Deployment {
			name: "test",
			bit_mask: 0x02,
			window: window,
		}
	}

	#[test]
	fn test_first_of_the_period() {
		let window = 144;
		assert_eq!(0, first_of_the_period(0, window));
		assert_eq!(0, first_of_the_period(142, window));
		assert_eq!(143, first_of_the_period(143, window));
		assert_eq!(143, first_of_the_period(286, window));
		assert_eq!(287, first_of_the_period(287, window));
		assert_eq!(431, first_of_the_period(431, window));
		assert_eq!(431, first_of_the_period(574, window));
	}

	#[test]
	fn test_threshold_state_advances_over_periods() {
		let deployment = deployment(8);
		let mut headers = MemoryHeaderProvider::default();
		let mut cache = None;

		// every block signals; three full periods are needed
		for height in 1..33 {
			headers.push(SIGNAL, height * 600, 0.into());
			let state = threshold_state(&mut cache, &deployment, height, &headers);
			let expected = match height {
				1..=7 => ThresholdState::Defined,
				8..=15 => ThresholdState::Started,
				16..=23 => ThresholdState::LockedIn,
				_ => ThresholdState::Active,
			};
			assert_eq!(state, expected, "at height {}", height);
		}
	}

	#[test]
	fn test_threshold_state_requires_every_block_to_signal() {
		let deployment = deployment(8);
		let mut headers = MemoryHeaderProvider::default();
		let mut cache = None;

		for height in 1..65 {
			// one hold-out per period keeps the deployment from locking in
			let version = if height % 8 == 3 { NO_SIGNAL } else { SIGNAL };
			headers.push(version, height * 600, 0.into());
			let state = threshold_state(&mut cache, &deployment, height, &headers);
			assert!(!state.is_active(), "unexpectedly active at height {}", height);
			assert!(state != ThresholdState::LockedIn, "unexpectedly locked in at height {}", height);
		}
	}

	#[test]
	fn test_threshold_state_cold_cache_catches_up() {
		let deployment = deployment(8);
		let mut headers = MemoryHeaderProvider::default();
		for height in 1..33 {
			headers.push(SIGNAL, height * 600, 0.into());
		}

		// a fresh cache replays all periods in one call
		let mut cache = None;
		assert_eq!(threshold_state(&mut cache, &deployment, 32, &headers), ThresholdState::Active);
	}
}
