//! Scene hierarchy with lazily propagated world and skin matrices, plus the
//! `Matrix3` helper used for normal matrices.

pub mod config;
pub mod error;
pub mod math;
pub mod scene_graph;

pub use config::SceneConfig;
pub use error::{Result, TransformError};
pub use math::{InversePolicy, Matrix3};
pub use scene_graph::{Bone, Object3D, ObjectId, Scene, Skin, SkinId, Transform};
