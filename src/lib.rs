//! Walking on the surface of a cube drawn as a flat net.
//!
//! The pipeline is [`NetLayout`] -> [`Embedding`] (with a [`Topology`]) ->
//! [`CoordinateBridge`] -> [`SurfaceWalker`] -> [`password`]. Folding and the crossing table
//! are computed once; walking only does table lookups.

pub mod bridge;
pub mod error;
pub mod fold;
pub mod geom;
pub mod input;
pub mod net;
pub mod password;
pub mod topology;
pub mod walk;

pub use bridge::{CoordinateBridge, CrossingRule, Link};
pub use error::Error;
pub use fold::{Embedding, Placement};
pub use geom::{Facing, Point2, Point3, Rotate};
pub use input::Puzzle;
pub use net::{FaceId, Material, NetLayout};
pub use password::password;
pub use topology::{Gluing, Topology};
pub use walk::{parse_instructions, Instruction, SurfaceWalker, Trail, WalkState};
