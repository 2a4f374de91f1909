//! Error types for transform math and hierarchy edits.

use thiserror::Error;

use crate::scene_graph::{ObjectId, SkinId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The upper-left 3x3 block has a determinant of exactly zero.
    #[error("can't invert matrix, determinant is 0")]
    SingularMatrix,

    #[error("object {0:?} does not exist")]
    UnknownObject(ObjectId),

    #[error("skin {0:?} does not exist")]
    UnknownSkin(SkinId),

    /// Parenting would make an object its own ancestor.
    #[error("object {child:?} can't be parented under its descendant {parent:?}")]
    CyclicParent { child: ObjectId, parent: ObjectId },

    /// Bones may only have other bones as children.
    #[error("non-bone object {child:?} can't be parented under bone {parent:?}")]
    NonBoneUnderBone { child: ObjectId, parent: ObjectId },

    #[error("bone {child:?} belongs to a different skin than bone {parent:?}")]
    SkinMismatch { child: ObjectId, parent: ObjectId },
}

pub type Result<T> = std::result::Result<T, TransformError>;
