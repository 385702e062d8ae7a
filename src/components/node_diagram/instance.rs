/// Rough CPU/memory figures for an EC2 instance type, for display only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceSizing {
	pub cpu: &'static str,
	pub memory: &'static str,
}

const UNKNOWN: InstanceSizing = InstanceSizing {
	cpu: "Unknown",
	memory: "Unknown",
};

const XLARGE_SIZES: &[(&str, InstanceSizing)] = &[
	(".2xlarge", InstanceSizing { cpu: "8 vCPU", memory: "16 GiB" }),
	(".4xlarge", InstanceSizing { cpu: "16 vCPU", memory: "32 GiB" }),
	(".8xlarge", InstanceSizing { cpu: "32 vCPU", memory: "64 GiB" }),
	(".16xlarge", InstanceSizing { cpu: "64 vCPU", memory: "128 GiB" }),
	(".12xlarge", InstanceSizing { cpu: "48 vCPU", memory: "96 GiB" }),
];

/// Estimate sizing from the instance size suffix. The family is ignored.
pub fn sizing(instance_type: &str) -> InstanceSizing {
	if instance_type.contains("xlarge") {
		return XLARGE_SIZES
			.iter()
			.find(|(suffix, _)| instance_type.contains(suffix))
			.map_or(
				InstanceSizing {
					cpu: "4 vCPU",
					memory: "8 GiB",
				},
				|(_, s)| *s,
			);
	}
	if instance_type.contains("large") || instance_type.contains("medium") {
		return InstanceSizing {
			cpu: "2 vCPU",
			memory: "4 GiB",
		};
	}
	UNKNOWN
}
