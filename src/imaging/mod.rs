//! Image handling: the resize decision and the codec that carries it out.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` |
//! | **Resize** | `resize_exact` + Lanczos3 |
//! | **Encode** | `save_with_format`, format from extension |
//!
//! The module is split into:
//! - **Calculations**: [`plan_resize`], the pure "does it fit, and if not, how big" decision
//! - **Backend**: [`ImageCodec`] trait + [`RustCodec`]

pub mod backend;
mod calculations;
pub mod rust_backend;

pub use backend::{CodecError, Dimensions, ImageCodec};
pub use calculations::{ResizePlan, plan_resize};
pub use rust_backend::RustCodec;
