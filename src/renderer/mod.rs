//! wgpu rendering module
//!
//! The scene is built on the CPU in canvas units each frame and drawn with two
//! pipelines: flat-colored triangles for dots and text, and a textured pipeline
//! for the agent sprites.

pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::{Scene, build_scene};
pub use sprites::{AssetError, SpriteSheet};
