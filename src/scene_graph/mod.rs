pub mod object3d;
pub mod scene;
pub mod skin;
pub mod transform;

// Re-export main types for convenience
pub use object3d::{Bone, Object3D, ObjectId};
pub use scene::Scene;
pub use skin::{Skin, SkinId};
pub use transform::Transform;
