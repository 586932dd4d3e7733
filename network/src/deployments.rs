const VERSIONBITS_TOP_MASK: u32 = 0xe0000000;
const VERSIONBITS_TOP_BITS: u32 = 0x20000000;

/// Version-bits signal trigger configuration.
#[derive(Debug, Clone, Copy)]
pub struct Deployment {
	/// Deployment's name
	pub name: &'static str,
	/// Version bits a block sets to signal readiness
	pub bit_mask: u32,
	/// Signalling period length in blocks; every block of a period must
	/// signal for the deployment to lock in
	pub window: u32,
}

impl Deployment {
	pub fn matches(&self, version: u32) -> bool {
		(version & VERSIONBITS_TOP_MASK) == VERSIONBITS_TOP_BITS && (version & self.bit_mask) == self.bit_mask
	}
}

#[cfg(test)]
mod tests {
	use super::Deployment;

	#[test]
	fn test_deployment_matches() {
		let deployment = Deployment {
			name: "test",
			bit_mask: 0x02,
			window: 144,
		};

		assert!(deployment.matches(0x20000002));
		assert!(deployment.matches(0x20000003));
		// bits without the version-bits top prefix do not count
		assert!(!deployment.matches(0x00000002));
		assert!(!deployment.matches(0x40000002));
		// signal bit missing
		assert!(!deployment.matches(0x20000001));
	}
}
