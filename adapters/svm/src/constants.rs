pub const NAMESPACE: &str = "svm";

pub const ADAPTER_PACKAGE_NAME: &str = "@formtx/adapter-svm";
pub const ADAPTER_CLASS_NAME: &str = "SvmAdapter";

pub const WEB3JS_REQUIREMENT: &str = "^1.95.0";
pub const ANCHOR_REQUIREMENT: &str = "^0.30.0";
pub const WALLET_ADAPTER_REACT_REQUIREMENT: &str = "^0.15.35";

/// Length of an ed25519 public key, the payload of a base58 address.
pub const PUBKEY_BYTES: usize = 32;

/// Length of an Anchor instruction discriminator.
pub const DISCRIMINATOR_BYTES: usize = 8;
