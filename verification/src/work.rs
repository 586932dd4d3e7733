use std::cmp;

use compact::Compact;
use hash::H256;
use uint::U256;
use chain::IndexedBlockHeader;
use network::ConsensusParams;
use storage::{BlockHeaderProvider, BlockRef};

/// Returns true if the given height is a retarget boundary for the given
/// interval.
pub fn is_retarget_height(height: u32, interval: u32) -> bool {
	height % interval == 0
}

fn range_constrain(value: i64, min: i64, max: i64) -> i64 {
	cmp::min(cmp::max(value, min), max)
}

/// Returns true if hash is lower or equal than target represented by compact bits
pub fn is_valid_proof_of_work_hash(bits: Compact, hash: &H256) -> bool {
	let target = match bits.to_u256() {
		Ok(target) => target,
		_err => return false,
	};

	let value = U256::from_big_endian(&*hash.reversed());
	value <= target
}

/// Returns true if hash is lower or equal than target and target is lower or
/// equal than current network maximum
pub fn is_valid_proof_of_work(max_work_bits: Compact, bits: Compact, hash: &H256) -> bool {
	let maximum = match max_work_bits.to_u256() {
		Ok(max) => max,
		_err => return false,
	};

	let target = match bits.to_u256() {
		Ok(target) => target,
		_err => return false,
	};

	let value = U256::from_big_endian(&*hash.reversed());
	target <= maximum && value <= target
}

/// Returns constrained number of seconds since last retarget
pub fn retarget_timespan(retarget_timestamp: u32, last_timestamp: u32, target_timespan: u32, clamp_ratio: u32) -> u32 {
	// subtract unsigned 32 bit numbers in signed 64 bit space in
	// order to prevent underflow before applying the range constraint
	let timespan = last_timestamp as i64 - retarget_timestamp as i64;
	let min = (target_timespan / clamp_ratio) as i64;
	let max = target_timespan as i64 * clamp_ratio as i64;
	range_constrain(timespan, min, max) as u32
}

/// Returns work required for the block at the given height.
///
/// `activation_height` is the height the fork controller reports the new
/// ruleset active from; `None` while it is dormant or armed.
pub fn work_required(parent_header: IndexedBlockHeader, height: u32, store: &dyn BlockHeaderProvider, consensus: &ConsensusParams, activation_height: Option<u32>) -> Compact {
	let max_bits: Compact = consensus.max_bits().into();
	if height == 0 {
		return max_bits;
	}

	if let Some(fork_height) = activation_height {
		if height >= fork_height {
			return work_required_post_fork(parent_header, height, fork_height, store, consensus, max_bits);
		}
	}

	let interval = consensus.retarget_interval();
	if is_retarget_height(height, interval) {
		if consensus.pow_no_retargeting {
			return parent_header.raw.bits;
		}

		let retarget_ref = (height - interval).into();
		let retarget_header = store.block_header(retarget_ref)
			.expect("height != 0 && height % retarget_interval == 0; qed");

		// timestamp of the first block of the closing window
		let retarget_timestamp = retarget_header.raw.time;
		// timestamp of parent block
		let last_timestamp = parent_header.raw.time;
		// bits of parent block
		let last_bits = parent_header.raw.bits;

		let actual_timespan = retarget_timespan(retarget_timestamp, last_timestamp, consensus.pow_target_timespan, consensus.fork.narrow_clamp_ratio);
		return work_required_retarget(max_bits, consensus.pow_target_timespan, actual_timespan, last_bits);
	}

	parent_header.raw.bits
}

fn work_required_post_fork(parent_header: IndexedBlockHeader, height: u32, fork_height: u32, store: &dyn BlockHeaderProvider, consensus: &ConsensusParams, max_bits: Compact) -> Compact {
	let fork = &consensus.fork;

	if height == fork_height {
		// one-time reset over the full accumulated pre-fork window
		let lookback = consensus.retarget_interval();
		let first_height = (height - 1).saturating_sub(lookback);
		let first_header = store.block_header(BlockRef::Number(first_height))
			.expect("first_height < height; headers up to the parent are connected; qed");

		return work_required_fork_reset(parent_header.raw.bits, parent_header.raw.time, first_header.raw.time, fork.drop_factor, max_bits);
	}

	let offset = height - fork_height;
	let interval = fork.schedule.interval(offset);
	if !is_retarget_height(height, interval) {
		return parent_header.raw.bits;
	}
	if consensus.pow_no_retargeting {
		return parent_header.raw.bits;
	}

	let target_timespan = fork.schedule.target_timespan(offset);
	let lookback = target_timespan / consensus.pow_target_spacing;
	let first_height = (height - 1).saturating_sub(lookback);
	let first_header = store.block_header(BlockRef::Number(first_height))
		.expect("first_height < height; headers up to the parent are connected; qed");

	work_required_post_fork_retarget(parent_header.raw.bits, parent_header.raw.time, first_header.raw.time, target_timespan, consensus, max_bits)
}

/// Post-fork retarget with the two-tier timespan clamp.
///
/// While the phase timespan is shorter than `short_timespan_multiple`
/// spacings the allowed swing is `wide_clamp_ratio`, so the chain can absorb
/// the hashrate cliff right after activation; afterwards the standard
/// `narrow_clamp_ratio` applies.
pub fn work_required_post_fork_retarget(last_bits: Compact, last_time: u32, first_time: u32, target_timespan: u32, consensus: &ConsensusParams, max_bits: Compact) -> Compact {
	let fork = &consensus.fork;

	// a zero timespan would retarget to an unminable zero target; observed
	// under mock timestamps, answered with the pow limit
	let timespan = last_time as i64 - first_time as i64;
	if timespan <= 0 {
		trace!(target: "fork", "zero timespan at post-fork retarget, returning pow limit");
		return max_bits;
	}

	let clamp_ratio = if target_timespan >= consensus.pow_target_spacing * fork.short_timespan_multiple {
		fork.narrow_clamp_ratio
	} else {
		fork.wide_clamp_ratio
	};

	let min = (target_timespan / clamp_ratio) as i64;
	let max = target_timespan as i64 * clamp_ratio as i64;
	let actual_timespan = range_constrain(timespan, min, max) as u32;

	trace!(target: "fork", "post-fork retarget: target timespan {}, actual timespan {}", target_timespan, actual_timespan);
	work_required_retarget(max_bits, target_timespan, actual_timespan, last_bits)
}

/// The one-time difficulty reset at the activation boundary.
///
/// The reduced target timespan is the accumulated pre-fork timespan divided
/// by the drop factor, so the target grows by roughly that factor in a single
/// step and a resumed chain is minable at the intended rate.
pub fn work_required_fork_reset(last_bits: Compact, last_time: u32, first_time: u32, drop_factor: u32, max_bits: Compact) -> Compact {
	let actual_timespan = last_time as i64 - first_time as i64;
	if actual_timespan <= 0 {
		return max_bits;
	}

	let reduced_timespan = actual_timespan as u64 / drop_factor as u64;
	if reduced_timespan == 0 {
		return max_bits;
	}

	info!(target: "fork", "fork block difficulty reset: timespan {} reduced by factor {}", actual_timespan, drop_factor);
	work_required_retarget(max_bits, reduced_timespan as u32, actual_timespan as u32, last_bits)
}

/// Applies the retarget formula, clamping the result to the proof-of-work
/// limit.
///
/// The division is performed before the multiplication: at relaxed-limit
/// targets the multiply is the step that exceeds 256 bits, so the quotient
/// has to be taken first. A multiply that still overflows clamps to the
/// limit instead of propagating a wrapped value.
pub fn work_required_retarget(max_bits: Compact, target_timespan: u32, actual_timespan: u32, last_bits: Compact) -> Compact {
	let maximum: U256 = max_bits.into();
	let old_target: U256 = last_bits.into();

	let quotient = old_target / U256::from(target_timespan);
	let (retarget, overflow) = quotient.overflowing_mul(U256::from(actual_timespan));

	if overflow || retarget > maximum {
		max_bits
	} else if retarget.is_zero() {
		// a zero target could never be met; pin to the smallest encodable one
		Compact::from_u256(U256::one())
	} else {
		retarget.into()
	}
}
