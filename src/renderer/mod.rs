//! Rendering module
//!
//! Frames are built as plain draw lists first ([`frame`]), then handed to
//! the instanced-quad WebGPU backend ([`pipeline`]).

pub mod error;
pub mod frame;
pub mod pipeline;
pub mod vertex;

pub use error::RenderInitError;
pub use frame::{DrawCommand, Frame, Gradient, build_frame};
pub use pipeline::{MAX_INSTANCES, QuadRenderer};
pub use vertex::{QuadInstance, Vertex};
