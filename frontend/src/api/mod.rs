mod auth;
pub mod client;
mod contractors;
mod customers;
mod invoices;
mod products;
pub mod session;
mod settings;
pub mod types;

pub use client::ApiClient;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
