use glam::Mat4;
use id_arena::{Arena, Id};

use crate::scene_graph::object3d::{Object3D, ObjectId};

pub type SkinId = Id<Skin>;

/// A skeleton: its bones in palette order, their inverse bind matrices and the
/// resulting bone palette consumed by skinning.
pub struct Skin {
    pub name: String,
    bones: Vec<ObjectId>,
    inverse_bind_matrices: Vec<Mat4>,
    bone_matrices: Vec<Mat4>,
}

impl Skin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bones: Vec::new(),
            inverse_bind_matrices: Vec::new(),
            bone_matrices: Vec::new(),
        }
    }

    pub fn bones(&self) -> &[ObjectId] {
        &self.bones
    }

    pub fn bone_index(&self, bone_id: ObjectId) -> Option<usize> {
        self.bones.iter().position(|&id| id == bone_id)
    }

    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind_matrices
    }

    pub fn set_inverse_bind_matrix(&mut self, bone_id: ObjectId, inverse_bind: Mat4) -> bool {
        match self.bone_index(bone_id) {
            Some(index) => {
                self.inverse_bind_matrices[index] = inverse_bind;
                true
            }
            None => false,
        }
    }

    /// `skin_matrix * inverse_bind` per bone, as of the last palette refresh.
    pub fn bone_matrices(&self) -> &[Mat4] {
        &self.bone_matrices
    }

    /// The bone palette as 16 column-major floats per bone.
    pub fn bone_matrices_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.bone_matrices)
    }

    pub(crate) fn push_bone(&mut self, bone_id: ObjectId, inverse_bind: Mat4) {
        self.bones.push(bone_id);
        self.inverse_bind_matrices.push(inverse_bind);
        self.bone_matrices.push(Mat4::IDENTITY);
    }

    pub(crate) fn remove_bone(&mut self, bone_id: ObjectId) {
        if let Some(index) = self.bone_index(bone_id) {
            self.bones.remove(index);
            self.inverse_bind_matrices.remove(index);
            self.bone_matrices.remove(index);
        }
    }

    pub(crate) fn update_bone_matrices(&mut self, objects: &Arena<Object3D>) {
        for ((bone_id, inverse_bind), bone_matrix) in self
            .bones
            .iter()
            .zip(&self.inverse_bind_matrices)
            .zip(&mut self.bone_matrices)
        {
            if let Some(bone) = objects.get(*bone_id).and_then(Object3D::bone) {
                *bone_matrix = *bone.skin_matrix() * *inverse_bind;
            }
        }
    }

    pub(crate) fn set_inverse_bind_matrices(&mut self, inverse_bind_matrices: Vec<Mat4>) {
        debug_assert_eq!(inverse_bind_matrices.len(), self.bones.len());
        self.inverse_bind_matrices = inverse_bind_matrices;
    }
}
