use formtx_adapter_kit::types::ui_kits::UiKitDescriptor;

use crate::constants::{WALLET_ADAPTER_REACT_REQUIREMENT, WEB3JS_REQUIREMENT};

lazy_static! {
    pub static ref UI_KITS: Vec<UiKitDescriptor> = vec![
        define_ui_kit!({
            id: "wallet-adapter",
            name: "Solana Wallet Adapter",
            documentation: "The standard wallet modal and connect button for Solana apps.",
            dependencies: [
                "@solana/wallet-adapter-react" => WALLET_ADAPTER_REACT_REQUIREMENT,
                "@solana/wallet-adapter-react-ui" => "^0.9.35",
                "@solana/wallet-adapter-wallets" => "^0.19.32",
                "@solana/web3.js" => WEB3JS_REQUIREMENT,
            ],
        }),
    ];
}
