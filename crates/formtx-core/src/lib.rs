#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_derive;

#[macro_use]
pub extern crate formtx_adapter_kit as kit;

pub mod errors;
pub mod export;
pub mod manifest;
pub mod persistence;
pub mod store;
pub mod templates;
pub mod templating;
pub mod wizard;

#[cfg(test)]
mod tests;
