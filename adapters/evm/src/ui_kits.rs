use formtx_adapter_kit::types::ui_kits::UiKitDescriptor;

use crate::constants::{TANSTACK_QUERY_REQUIREMENT, VIEM_REQUIREMENT, WAGMI_REQUIREMENT};

lazy_static! {
    pub static ref UI_KITS: Vec<UiKitDescriptor> = vec![
        define_ui_kit!({
            id: "rainbowkit",
            name: "RainbowKit",
            documentation: "Themed connect button and account modal on top of wagmi.",
            dependencies: [
                "@rainbow-me/rainbowkit" => "^2.1.0",
                "wagmi" => WAGMI_REQUIREMENT,
                "@tanstack/react-query" => TANSTACK_QUERY_REQUIREMENT,
            ],
        }),
        define_ui_kit!({
            id: "connectkit",
            name: "ConnectKit",
            documentation: "Family's wallet connection flow, wagmi-based.",
            dependencies: [
                "connectkit" => "^1.8.0",
                "wagmi" => WAGMI_REQUIREMENT,
                "@tanstack/react-query" => TANSTACK_QUERY_REQUIREMENT,
            ],
        }),
        define_ui_kit!({
            id: "custom",
            name: "Custom connect button",
            documentation: "Bare viem wiring with an unstyled connect button.",
            dependencies: [
                "viem" => VIEM_REQUIREMENT,
            ],
        }),
    ];
}
