#![forbid(unsafe_code)]

//! Browser shell for the Folio page controller.
//!
//! [`folio_core::PageController`] decides; this crate finds the page
//! elements, wires DOM listeners, intersection observers and the frame loop
//! to it, and applies the effects it returns.
//!
//! The selector contract and options parsing are plain Rust and compile on
//! every target.

pub mod options;
pub mod selectors;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{FolioWeb, boot};

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct FolioWeb;

#[cfg(not(target_arch = "wasm32"))]
impl FolioWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
