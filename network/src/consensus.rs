use deployments::Deployment;
use network::Network;
use schedule::RetargetSchedule;
use uint::U256;

/// Fork id used when none is configured. The id salts post-fork signature
/// hashing on the host node and tags the activation marker here.
pub const DEFAULT_FORK_ID: u32 = 0x00f0f0;

/// Fork ids are carried in 3 bytes of the signature hash type.
pub const MAX_FORK_ID: u32 = 0x00ffffff;

/// Parameters that influence chain consensus.
#[derive(Debug, Clone)]
pub struct ConsensusParams {
	/// Network.
	pub network: Network,
	/// Expected seconds between blocks.
	pub pow_target_spacing: u32,
	/// Seconds covered by one standard retarget window (14 days).
	pub pow_target_timespan: u32,
	/// Difficulty is left untouched at retarget boundaries (regtest default).
	pub pow_no_retargeting: bool,
	/// Hard-fork trigger configuration and post-fork retarget tuning.
	pub fork: ForkParams,
}

/// Hard-fork trigger configuration and retarget tuning constants.
///
/// The tuning constants are deliberately plain fields: the exact clamp-ratio
/// thresholds are operator configuration, not consensus law.
#[derive(Debug, Clone)]
pub struct ForkParams {
	/// Height trigger: the fork activates when this exact height connects.
	pub fork_height: Option<u32>,
	/// Stable identifier of the trigger configuration, persisted in the
	/// activation marker to detect configuration drift across restarts.
	pub fork_id: u32,
	/// Optional version-bits signal trigger.
	pub signal: Option<Deployment>,
	/// Block height recorded for the one-time wallet backup; defaults to
	/// the block before activation.
	pub auto_backup_block: Option<u32>,
	/// Divisor applied to the accumulated pre-fork timespan by the one-time
	/// difficulty reset at the activation boundary.
	pub drop_factor: u32,
	/// A phase timespan below `short_timespan_multiple * spacing` counts as
	/// "short" and uses the wide clamp ratio.
	pub short_timespan_multiple: u32,
	/// Allowed actual/target timespan ratio right after activation.
	pub wide_clamp_ratio: u32,
	/// Allowed actual/target timespan ratio once timespans stretch out.
	pub narrow_clamp_ratio: u32,
	/// Post-fork retargeting phase table.
	pub schedule: RetargetSchedule,
}

impl ConsensusParams {
	pub fn new(network: Network) -> Self {
		let pow_target_spacing = 10 * 60;
		let pow_target_timespan = 14 * 24 * 60 * 60;

		ConsensusParams {
			network: network,
			pow_target_spacing: pow_target_spacing,
			pow_target_timespan: pow_target_timespan,
			pow_no_retargeting: match network {
				Network::Mainnet | Network::Testnet => false,
				Network::Regtest | Network::Unitest => true,
			},
			fork: ForkParams {
				fork_height: Some(network.default_fork_height()),
				fork_id: DEFAULT_FORK_ID,
				signal: None,
				auto_backup_block: None,
				drop_factor: 4,
				short_timespan_multiple: 3,
				wide_clamp_ratio: 10,
				narrow_clamp_ratio: 4,
				schedule: RetargetSchedule::post_fork(pow_target_spacing, pow_target_timespan),
			},
		}
	}

	/// Standard (pre-fork) retarget interval in blocks.
	pub fn retarget_interval(&self) -> u32 {
		self.pow_target_timespan / self.pow_target_spacing
	}

	pub fn max_bits(&self) -> U256 {
		self.network.max_bits()
	}
}
