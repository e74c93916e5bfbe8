pub const NAMESPACE: &str = "evm";

pub const ADAPTER_PACKAGE_NAME: &str = "@formtx/adapter-evm";
pub const ADAPTER_CLASS_NAME: &str = "EvmAdapter";

pub const VIEM_REQUIREMENT: &str = "^2.21.0";
pub const WAGMI_REQUIREMENT: &str = "^2.12.0";
pub const TANSTACK_QUERY_REQUIREMENT: &str = "^5.50.0";
