use formtx_adapter_evm::EvmAdapter;
use formtx_adapter_stellar::StellarAdapter;
use formtx_adapter_svm::SvmAdapter;
use formtx_core::kit::types::Ecosystem;
use formtx_core::kit::Adapter;

#[macro_use]
mod macros;

#[macro_use]
extern crate serde_derive;

pub mod cli;

pub fn get_available_adapters() -> Vec<Box<dyn Adapter>> {
    vec![
        Box::new(EvmAdapter::new()),
        Box::new(SvmAdapter::new()),
        Box::new(StellarAdapter::new()),
    ]
}

pub fn get_adapter_by_ecosystem(ecosystem: Ecosystem) -> Option<Box<dyn Adapter>> {
    get_available_adapters().into_iter().find(|adapter| adapter.get_ecosystem() == ecosystem)
}

fn main() {
    cli::main();
}
