//! Room-based procedural cave generation.
//!
//! A cave is described by a string of room symbols. The traversal engine in
//! [`module_generator`] walks a cursor (position + heading) through the
//! string; every room emits [`Centroid`]s and moves the cursor. Once the whole
//! string has been walked, every emitted centroid is carved into the world as
//! a hollow sphere.
//!
//! ```no_run
//! use delve_gen::{CaveGenerator, CaveRequest, CaveStyle};
//! use delve_world::VoxelWorld;
//!
//! let generator = CaveGenerator::new(CaveStyle::builtin()?);
//! let mut world = VoxelWorld::stone();
//! let report = generator.generate(&mut world, 42, &CaveRequest::default())?;
//! println!("{} centroids", report.centroids.len());
//! # Ok::<(), delve_core::Error>(())
//! ```

pub mod branch;
pub mod carve;
pub mod centroid;
pub mod context;
pub mod generator;
pub mod layout;
pub mod module_generator;
pub mod registry;
pub mod rooms;
pub mod style;

pub use centroid::{CaveOutput, Centroid, Tags};
pub use context::{Cursor, GenerationContext};
pub use generator::{CaveGenerator, CaveReport, CaveRequest};
pub use layout::{Layout, LayoutEntry};
pub use registry::RoomRegistry;
pub use rooms::{Room, RoomGeometry, RoomKind, RoomType};
pub use style::{CaveStyle, OreConfig};
