use glam::{Mat4, Vec3};
use id_arena::Id;

use crate::scene_graph::scene::Scene;
use crate::scene_graph::skin::SkinId;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

/// Skin-specific state carried by bone objects.
#[derive(Debug, Clone)]
pub struct Bone {
    skin_id: SkinId,
    skin_matrix: Mat4,
}

impl Bone {
    pub(crate) fn new(skin_id: SkinId) -> Self {
        Self {
            skin_id,
            skin_matrix: Mat4::IDENTITY,
        }
    }

    pub fn skin_id(&self) -> SkinId {
        self.skin_id
    }

    /// Transform relative to the skin's root space.
    pub fn skin_matrix(&self) -> &Mat4 {
        &self.skin_matrix
    }
}

pub struct Object3D {
    pub name: String,
    pub transform: Transform,
    pub(crate) parent_id: Option<ObjectId>,
    pub(crate) child_ids: Vec<ObjectId>,
    pub(crate) bone: Option<Bone>,
    pub(crate) removed: bool,
}

impl Object3D {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_transform(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            ..Default::default()
        }
    }

    pub fn parent_id(&self) -> Option<ObjectId> {
        self.parent_id
    }

    pub fn child_ids(&self) -> &[ObjectId] {
        &self.child_ids
    }

    pub fn bone(&self) -> Option<&Bone> {
        self.bone.as_ref()
    }

    pub fn is_bone(&self) -> bool {
        self.bone.is_some()
    }

    pub fn parent<'a>(&self, scene: &'a Scene) -> Option<&'a Object3D> {
        self.parent_id.and_then(|id| scene.get_object(id))
    }

    pub fn children<'a, 'b>(&'a self, scene: &'b Scene) -> impl Iterator<Item = &'b Object3D> + 'b
    where
        'a: 'b,
    {
        self.child_ids
            .iter()
            .filter_map(move |id| scene.get_object(*id))
    }

    /// World matrix for plain objects, skin matrix for bones.
    pub fn resolved_matrix(&self) -> Mat4 {
        match &self.bone {
            Some(bone) => bone.skin_matrix,
            None => *self.transform.world_matrix(),
        }
    }

    /// Writes `parent * local` (or `local` without a parent) into the derived
    /// matrix and clears the dirty flag.
    pub(crate) fn resolve(&mut self, parent_matrix: Option<Mat4>) {
        let local_matrix = *self.transform.local_matrix();
        let resolved = match parent_matrix {
            Some(parent_matrix) => parent_matrix * local_matrix,
            None => local_matrix,
        };

        match &mut self.bone {
            Some(bone) => {
                bone.skin_matrix = resolved;
                self.transform.mark_updated();
            }
            None => self.transform.set_world_matrix(resolved),
        }
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Transform::from_translation(Vec3::ZERO),
            parent_id: None,
            child_ids: Vec::new(),
            bone: None,
            removed: false,
        }
    }
}
