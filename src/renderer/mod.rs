//! 2D rendering module
//!
//! Scene building is platform independent; drawing uses the Canvas 2D API.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use shapes::{Arrow, Scene, Shape, scene};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
