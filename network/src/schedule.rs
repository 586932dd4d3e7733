//! Post-fork retargeting phase table.
//!
//! After activation the chain retargets very frequently so it stays minable
//! through a hashrate cliff, then the cadence stretches back out until the
//! final open-ended phase restores the standard 2016-block interval.

use std::fmt;

/// Length of the post-fork recovery window in blocks (roughly half a year of
/// standard spacing). Past this offset the standard cadence applies again.
pub const HARDFORK_RETARGET_BLOCKS: u32 = 25_920;

/// A contiguous range of post-fork heights sharing one retarget cadence.
///
/// `start..end` are height offsets relative to the activation height; `end`
/// of the final phase is `u32::max_value()`, which keeps it open-ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetargetPhase {
	pub start: u32,
	pub end: u32,
	/// Blocks between retargets while the phase is in effect.
	pub interval: u32,
	/// Seconds one retarget window is expected to take.
	pub target_timespan: u32,
}

/// Phase table misconfiguration.
#[derive(Debug, PartialEq)]
pub enum ScheduleError {
	/// No phases at all.
	Empty,
	/// First phase does not start at offset zero.
	Start,
	/// Phase at given index has an empty or inverted range.
	EmptyPhase(usize),
	/// Phase at given index overlaps or leaves a gap after its predecessor.
	Discontinuous(usize),
	/// Phase at given index has a zero interval or timespan.
	ZeroCadence(usize),
	/// Last phase does not extend to the maximum height.
	Truncated,
}

impl fmt::Display for ScheduleError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			ScheduleError::Empty => write!(f, "schedule has no phases"),
			ScheduleError::Start => write!(f, "first phase does not start at offset 0"),
			ScheduleError::EmptyPhase(index) => write!(f, "phase {} covers no heights", index),
			ScheduleError::Discontinuous(index) => write!(f, "phase {} is not contiguous with its predecessor", index),
			ScheduleError::ZeroCadence(index) => write!(f, "phase {} has zero interval or timespan", index),
			ScheduleError::Truncated => write!(f, "last phase is not open-ended"),
		}
	}
}

/// Ordered, contiguous, non-overlapping phase table.
#[derive(Debug, Clone)]
pub struct RetargetSchedule {
	phases: Vec<RetargetPhase>,
}

impl RetargetSchedule {
	pub fn new(phases: Vec<RetargetPhase>) -> Result<Self, ScheduleError> {
		if phases.is_empty() {
			return Err(ScheduleError::Empty);
		}
		if phases[0].start != 0 {
			return Err(ScheduleError::Start);
		}

		for (index, phase) in phases.iter().enumerate() {
			if phase.start >= phase.end {
				return Err(ScheduleError::EmptyPhase(index));
			}
			if phase.interval == 0 || phase.target_timespan == 0 {
				return Err(ScheduleError::ZeroCadence(index));
			}
			if index > 0 && phase.start != phases[index - 1].end {
				return Err(ScheduleError::Discontinuous(index));
			}
		}

		if phases.last().expect("phases is non-empty; qed").end != u32::max_value() {
			return Err(ScheduleError::Truncated);
		}

		Ok(RetargetSchedule {
			phases: phases,
		})
	}

	/// The default recovery table: per-block retargets over short windows right
	/// after activation, then geometrically longer intervals until the standard
	/// cadence returns.
	pub fn post_fork(spacing: u32, pow_target_timespan: u32) -> Self {
		let phases = vec![
			RetargetPhase { start: 0, end: 8, interval: 1, target_timespan: spacing },
			RetargetPhase { start: 8, end: 47, interval: 1, target_timespan: spacing * 6 },
			RetargetPhase { start: 47, end: 154, interval: 1, target_timespan: spacing * 36 },
			RetargetPhase { start: 154, end: 300, interval: 1, target_timespan: spacing * 72 },
			RetargetPhase { start: 300, end: 1_300, interval: 1, target_timespan: spacing * 144 },
			RetargetPhase { start: 1_300, end: 2_017, interval: 1, target_timespan: spacing * 288 },
			RetargetPhase { start: 2_017, end: 4_000, interval: 10, target_timespan: spacing * 288 },
			RetargetPhase { start: 4_000, end: 5_000, interval: 40, target_timespan: spacing * 288 },
			RetargetPhase { start: 5_000, end: 10_000, interval: 40, target_timespan: spacing * 432 },
			RetargetPhase { start: 10_000, end: 15_000, interval: 100, target_timespan: spacing * 576 },
			RetargetPhase { start: 15_000, end: 20_000, interval: 400, target_timespan: spacing * 1152 },
			RetargetPhase { start: 20_000, end: HARDFORK_RETARGET_BLOCKS, interval: 1_000, target_timespan: spacing * 1152 },
			RetargetPhase { start: HARDFORK_RETARGET_BLOCKS, end: u32::max_value(), interval: 2_016, target_timespan: pow_target_timespan },
		];

		RetargetSchedule::new(phases).expect("static schedule is valid; qed")
	}

	/// The phase covering the given height offset.
	pub fn phase(&self, offset: u32) -> &RetargetPhase {
		self.phases.iter()
			.find(|phase| offset >= phase.start && offset < phase.end)
			.unwrap_or_else(|| self.phases.last().expect("schedule is validated non-empty; qed"))
	}

	pub fn interval(&self, offset: u32) -> u32 {
		self.phase(offset).interval
	}

	pub fn target_timespan(&self, offset: u32) -> u32 {
		self.phase(offset).target_timespan
	}

	pub fn phases(&self) -> &[RetargetPhase] {
		&self.phases
	}
}
