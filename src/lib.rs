//! sidi-arena
//!
//! Procedural Sidi Bou Said neighborhoods for browser 3D arenas. The crate
//! emits plain geometry descriptors (white walls, blue doors and windows,
//! terracotta roofs, Tunisian flags) for a host renderer, and runs a
//! frame-rate monitor that lowers rendering quality when the arena gets slow.
//! Rendering itself, asset loading and the scene graph stay with the host.
//!
//! High-level modules
//! - `arena`: the controller that configures the renderer, generates the neighborhood and monitors fps
//! - `config`: typed arena configuration with defaults and JSON overrides
//! - `context`: scene handle and the optional capabilities (render backend, generator)
//! - `data_structures`: house/flag descriptors and GPU instance data
//! - `flow`: logger setup and the browser animation-frame loop
//! - `generator`: grid layout and random house/flag generation
//! - `lighting`: packed light and fog parameters
//! - `monitor`: frame sampling and the monitor stop handle
//! - `render`: wgpu renderer settings driven by the arena
//!

pub mod arena;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod generator;
pub mod lighting;
pub mod monitor;
pub mod render;

// Re-exports commonly used types for convenience in downstream code.
pub use arena::{Arena, init_arena};
pub use cgmath::Vector3;
pub use config::ArenaConfig;
pub use context::{NeighborhoodSource, RenderBackend, SceneHandle};
pub use generator::Generator;
pub use instant::{Duration, Instant};
