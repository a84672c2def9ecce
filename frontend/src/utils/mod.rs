pub mod format;
pub mod message;
#[cfg(target_arch = "wasm32")]
pub mod storage;
