use glam::{Mat4, Quat, Vec3};
use id_arena::Arena;

use crate::config::SceneConfig;
use crate::error::{Result, TransformError};
use crate::math::{InversePolicy, Matrix3};
use crate::scene_graph::object3d::{Bone, Object3D, ObjectId};
use crate::scene_graph::skin::{Skin, SkinId};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    objects: Arena<Object3D>,
    skins: Arena<Skin>,
    config: SceneConfig,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            objects: Arena::new(),
            skins: Arena::new(),
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id).filter(|object| !object.removed)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id).filter(|object| !object.removed)
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object3D)> {
        self.objects.iter().filter(|(_, object)| !object.removed)
    }

    pub fn root_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects().filter_map(|(id, object)| {
            if object.parent_id.is_none() {
                Some(id)
            } else {
                None
            }
        })
    }

    pub fn add_skin(&mut self, skin: Skin) -> SkinId {
        self.skins.alloc(skin)
    }

    pub fn get_skin(&self, id: SkinId) -> Option<&Skin> {
        self.skins.get(id)
    }

    pub fn get_skin_mut(&mut self, id: SkinId) -> Option<&mut Skin> {
        self.skins.get_mut(id)
    }

    /// Adds `object` as a bone of `skin_id`, appended to the skin's palette.
    /// The bone starts unparented.
    pub fn add_bone(
        &mut self,
        skin_id: SkinId,
        mut object: Object3D,
        inverse_bind: Mat4,
    ) -> Result<ObjectId> {
        if self.skins.get(skin_id).is_none() {
            return Err(TransformError::UnknownSkin(skin_id));
        }

        object.bone = Some(Bone::new(skin_id));
        let bone_id = self.add_object(object);

        if let Some(skin) = self.skins.get_mut(skin_id) {
            skin.push_bone(bone_id, inverse_bind);
        }

        Ok(bone_id)
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(
        &mut self,
        child_id: ObjectId,
        new_parent_id: Option<ObjectId>,
    ) -> Result<()> {
        let child = self
            .get_object(child_id)
            .ok_or(TransformError::UnknownObject(child_id))?;

        if let Some(parent_id) = new_parent_id {
            let parent = self
                .get_object(parent_id)
                .ok_or(TransformError::UnknownObject(parent_id))?;

            if self.is_descendant_or_self(parent_id, child_id) {
                return Err(TransformError::CyclicParent {
                    child: child_id,
                    parent: parent_id,
                });
            }

            if let Some(parent_bone) = parent.bone() {
                match child.bone() {
                    None => {
                        return Err(TransformError::NonBoneUnderBone {
                            child: child_id,
                            parent: parent_id,
                        })
                    }
                    Some(child_bone) if child_bone.skin_id() != parent_bone.skin_id() => {
                        return Err(TransformError::SkinMismatch {
                            child: child_id,
                            parent: parent_id,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        // Remove from old parent's children list
        let old_parent_id = child.parent_id;
        if let Some(old_parent) = old_parent_id.and_then(|id| self.objects.get_mut(id)) {
            old_parent.child_ids.retain(|&id| id != child_id);
        }

        // Set new parent and add to new parent's children list
        if let Some(new_parent) = new_parent_id.and_then(|id| self.objects.get_mut(id)) {
            new_parent.child_ids.push(child_id);
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;
            child.transform.invalidate_world();
        }

        log::debug!(
            "Reparented {:?}: {:?} -> {:?}",
            child_id,
            old_parent_id,
            new_parent_id
        );

        Ok(())
    }

    /// Whether `id` is `ancestor_id` or lies somewhere below it.
    fn is_descendant_or_self(&self, id: ObjectId, ancestor_id: ObjectId) -> bool {
        let mut current = Some(id);

        while let Some(current_id) = current {
            if current_id == ancestor_id {
                return true;
            }
            current = self
                .get_object(current_id)
                .and_then(|object| object.parent_id);
        }

        false
    }

    /// Removes an object together with its whole subtree. Ids of removed
    /// objects stay invalid forever.
    ///
    /// The arena never shrinks, so removed objects still cost a skipped slot
    /// in every [`update`](Self::update) scan.
    pub fn remove_object(&mut self, object_id: ObjectId) -> Result<()> {
        let parent_id = self
            .get_object(object_id)
            .ok_or(TransformError::UnknownObject(object_id))?
            .parent_id;

        if let Some(parent) = parent_id.and_then(|id| self.objects.get_mut(id)) {
            parent.child_ids.retain(|&id| id != object_id);
        }

        let mut pending = vec![object_id];
        let mut removed_count = 0;

        while let Some(id) = pending.pop() {
            let Some(object) = self.get_object_mut(id) else {
                continue;
            };

            object.removed = true;
            object.parent_id = None;
            pending.append(&mut object.child_ids);
            let skin_id = object.bone.as_ref().map(Bone::skin_id);

            if let Some(skin) = skin_id.and_then(|skin_id| self.skins.get_mut(skin_id)) {
                skin.remove_bone(id);
            }

            removed_count += 1;
        }

        log::debug!(
            "Removed {:?} and {} descendants",
            object_id,
            removed_count - 1
        );

        Ok(())
    }

    pub fn set_object_translation(&mut self, object_id: ObjectId, translation: Vec3) {
        if let Some(object) = self.get_object_mut(object_id) {
            object.transform.set_translation(translation);
        }
    }

    pub fn set_object_rotation(&mut self, object_id: ObjectId, rotation: Quat) {
        if let Some(object) = self.get_object_mut(object_id) {
            object.transform.set_rotation(rotation);
        }
    }

    pub fn set_object_scale(&mut self, object_id: ObjectId, scale: Vec3) {
        if let Some(object) = self.get_object_mut(object_id) {
            object.transform.set_scale(scale);
        }
    }

    pub fn set_object_transform(
        &mut self,
        object_id: ObjectId,
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) {
        if let Some(object) = self.get_object_mut(object_id) {
            object.transform.set_transform(translation, rotation, scale);
        }
    }

    pub fn set_object_local_matrix(&mut self, object_id: ObjectId, local_matrix: Mat4) {
        if let Some(object) = self.get_object_mut(object_id) {
            object.transform.set_local_matrix(local_matrix);
        }
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.get_object(object_id).map(|object| &object.transform)
    }

    /// Refreshes `object_id` and its subtree.
    ///
    /// With auto-update on, the local matrix is rebuilt from the pose first and
    /// a changed matrix forces the update. The derived matrix (world, or skin
    /// for bones) is rewritten when forced or dirty, and children are then
    /// forced exactly when this object was rewritten. Bones below a non-bone
    /// start a new skin chain from their own local matrix.
    pub fn update_object(
        &mut self,
        object_id: ObjectId,
        parent_matrix: Option<Mat4>,
        mut force_update: bool,
    ) {
        let Some(object) = self.get_object_mut(object_id) else {
            return;
        };

        if object.transform.matrix_auto_update() {
            force_update |= object.transform.update_matrix();
        }

        if force_update || object.transform.needs_world_update() {
            object.resolve(parent_matrix);
            force_update = true;
            log::trace!("Updated {:?} ({})", object_id, object.name);
        }

        let resolved_matrix = object.resolved_matrix();
        let is_bone = object.is_bone();
        let child_count = object.child_ids.len();

        for index in 0..child_count {
            let Some(child_id) = self.objects[object_id].child_ids.get(index).copied() else {
                break;
            };

            let starts_skin_chain = !is_bone && self.objects[child_id].is_bone();

            if starts_skin_chain {
                self.update_object(child_id, None, false);
            } else {
                self.update_object(child_id, Some(resolved_matrix), force_update);
            }
        }
    }

    /// Updates all object transforms in hierarchical order
    pub fn update(&mut self) {
        let root_ids: Vec<ObjectId> = self.root_ids().collect();

        for root_id in root_ids {
            self.update_object(root_id, None, false);
        }

        if self.config.compute_bone_matrices {
            self.update_bone_matrices();
        }
    }

    pub fn update_bone_matrices(&mut self) {
        for (_, skin) in self.skins.iter_mut() {
            skin.update_bone_matrices(&self.objects);
        }
    }

    /// Clears per-frame change flags. Call before posing objects for the frame.
    pub fn early_update(&mut self) {
        for (_, object) in self.objects.iter_mut() {
            object.transform.reset_flags();
        }
    }

    /// Recomputes the inverse bind matrices of a skin from the current skin
    /// matrices, making the current pose the bind pose.
    pub fn bind_skin_pose(&mut self, skin_id: SkinId) -> Result<()> {
        let skin = self
            .skins
            .get(skin_id)
            .ok_or(TransformError::UnknownSkin(skin_id))?;

        let inverse_bind_matrices = skin
            .bones()
            .iter()
            .map(|&bone_id| {
                let skin_matrix = self
                    .get_object(bone_id)
                    .and_then(Object3D::bone)
                    .map(|bone| *bone.skin_matrix())
                    .ok_or(TransformError::UnknownObject(bone_id))?;

                self.invert(&skin_matrix)
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(skin) = self.skins.get_mut(skin_id) {
            skin.set_inverse_bind_matrices(inverse_bind_matrices);
        }

        Ok(())
    }

    fn invert(&self, matrix: &Mat4) -> Result<Mat4> {
        if matrix.determinant() != 0.0 {
            return Ok(matrix.inverse());
        }

        match self.config.inverse_policy {
            InversePolicy::Strict => Err(TransformError::SingularMatrix),
            InversePolicy::Lenient => {
                log::warn!("Singular skin matrix, using identity inverse bind matrix");
                Ok(Mat4::IDENTITY)
            }
        }
    }

    /// World matrix of a bone: the world matrix of the closest non-bone
    /// ancestor times the bone's skin matrix. Plain objects return their
    /// world matrix.
    pub fn bone_world_matrix(&self, object_id: ObjectId) -> Option<Mat4> {
        let object = self.get_object(object_id)?;
        let Some(bone) = object.bone() else {
            return Some(*object.transform.world_matrix());
        };

        let mut host = object.parent(self);
        while let Some(candidate) = host {
            if !candidate.is_bone() {
                break;
            }
            host = candidate.parent(self);
        }

        Some(match host {
            Some(host) => *host.transform.world_matrix() * *bone.skin_matrix(),
            None => *bone.skin_matrix(),
        })
    }

    /// Normal matrix of the object's world matrix, using the configured
    /// inverse policy.
    pub fn normal_matrix(&self, object_id: ObjectId) -> Result<Matrix3> {
        let world_matrix = self
            .bone_world_matrix(object_id)
            .ok_or(TransformError::UnknownObject(object_id))?;

        let mut normal_matrix = Matrix3::default();
        normal_matrix
            .get_inverse(&world_matrix, self.config.inverse_policy)?
            .transpose();

        Ok(normal_matrix)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_at(scene: &mut Scene, name: &str, translation: Vec3) -> ObjectId {
        scene.add_object(Object3D::with_transform(
            name,
            Transform::from_translation(translation),
        ))
    }

    fn world(scene: &Scene, id: ObjectId) -> Mat4 {
        *scene.get_object_transform(id).unwrap().world_matrix()
    }

    fn local(scene: &Scene, id: ObjectId) -> Mat4 {
        *scene.get_object_transform(id).unwrap().local_matrix()
    }

    #[test]
    fn world_matrix_is_product_of_ancestors() {
        let mut scene = Scene::new();
        let root = object_at(&mut scene, "root", Vec3::X);
        let child = object_at(&mut scene, "child", Vec3::Y);
        let grandchild = object_at(&mut scene, "grandchild", Vec3::Z);
        scene.set_object_parent(child, Some(root)).unwrap();
        scene.set_object_parent(grandchild, Some(child)).unwrap();
        scene.set_object_rotation(child, Quat::from_rotation_z(0.5));

        scene.update();

        let expected = local(&scene, root) * local(&scene, child) * local(&scene, grandchild);
        assert!(world(&scene, grandchild).abs_diff_eq(expected, 1e-6));

        let transform = scene.get_object_transform(grandchild).unwrap();
        assert!(!transform.needs_world_update());
    }

    #[test]
    fn parent_change_forces_children() {
        let mut scene = Scene::new();
        let root = object_at(&mut scene, "root", Vec3::ZERO);
        let child = object_at(&mut scene, "child", Vec3::Y);
        scene.set_object_parent(child, Some(root)).unwrap();
        scene.update();

        scene.set_object_translation(root, Vec3::new(5.0, 0.0, 0.0));
        let transform = scene.get_object_transform(child).unwrap();
        assert!(!transform.needs_world_update());
        scene.update();

        assert_eq!(
            world(&scene, child).w_axis.truncate(),
            Vec3::new(5.0, 1.0, 0.0)
        );
    }

    #[test]
    fn explicit_local_matrix_is_kept() {
        let mut scene = Scene::new();
        let root = object_at(&mut scene, "root", Vec3::ZERO);
        let matrix = Mat4::from_scale(Vec3::new(1.0, 2.0, 3.0));
        scene.set_object_local_matrix(root, matrix);

        scene.update();
        scene.update();

        assert_eq!(world(&scene, root), matrix);
    }

    #[test]
    fn reparenting_rejects_cycles() {
        let mut scene = Scene::new();
        let a = object_at(&mut scene, "a", Vec3::ZERO);
        let b = object_at(&mut scene, "b", Vec3::ZERO);
        scene.set_object_parent(b, Some(a)).unwrap();

        assert_eq!(
            scene.set_object_parent(a, Some(b)),
            Err(TransformError::CyclicParent {
                child: a,
                parent: b
            })
        );
        assert_eq!(
            scene.set_object_parent(a, Some(a)),
            Err(TransformError::CyclicParent {
                child: a,
                parent: a
            })
        );
    }

    #[test]
    fn reparenting_moves_child_between_parents() {
        let mut scene = Scene::new();
        let a = object_at(&mut scene, "a", Vec3::X);
        let b = object_at(&mut scene, "b", Vec3::Y);
        let child = object_at(&mut scene, "child", Vec3::ZERO);
        scene.set_object_parent(child, Some(a)).unwrap();
        scene.update();

        scene.set_object_parent(child, Some(b)).unwrap();
        scene.update();

        assert!(scene.get_object(a).unwrap().child_ids().is_empty());
        assert_eq!(scene.get_object(b).unwrap().child_ids(), &[child]);
        assert_eq!(world(&scene, child), Mat4::from_translation(Vec3::Y));

        let b_object = scene.get_object(b).unwrap();
        let children: Vec<&Object3D> = b_object.children(&scene).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "child");

        let parent = children[0].parent(&scene).unwrap();
        assert_eq!(parent.name, "b");
    }

    #[test]
    fn removing_object_removes_subtree() {
        let mut scene = Scene::new();
        let root = object_at(&mut scene, "root", Vec3::ZERO);
        let a = object_at(&mut scene, "a", Vec3::ZERO);
        let b = object_at(&mut scene, "b", Vec3::ZERO);
        let c = object_at(&mut scene, "c", Vec3::ZERO);
        scene.set_object_parent(a, Some(root)).unwrap();
        scene.set_object_parent(b, Some(root)).unwrap();
        scene.set_object_parent(c, Some(a)).unwrap();

        scene.remove_object(a).unwrap();

        assert!(scene.get_object(a).is_none());
        assert!(scene.get_object(c).is_none());
        assert_eq!(scene.get_object(root).unwrap().child_ids(), &[b]);
        assert_eq!(scene.get_object_by_name("c"), None);
        assert_eq!(scene.root_ids().collect::<Vec<_>>(), vec![root]);
        assert_eq!(
            scene.set_object_parent(c, Some(root)),
            Err(TransformError::UnknownObject(c))
        );
        assert_eq!(
            scene.remove_object(a),
            Err(TransformError::UnknownObject(a))
        );
    }

    #[test]
    fn early_update_resets_change_flags() {
        let mut scene = Scene::new();
        let a = object_at(&mut scene, "a", Vec3::ZERO);
        let b = object_at(&mut scene, "b", Vec3::ZERO);
        scene.update();

        scene.early_update();
        scene.set_object_translation(b, Vec3::ONE);
        scene.update();

        assert!(!scene.get_object_transform(a).unwrap().has_changed());
        assert!(scene.get_object_transform(b).unwrap().has_changed());
    }

    #[test]
    fn bones_only_accept_bones_of_the_same_skin() {
        let mut scene = Scene::new();
        let skin = scene.add_skin(Skin::new("arm"));
        let other_skin = scene.add_skin(Skin::new("leg"));
        let bone = scene
            .add_bone(skin, Object3D::new("upper"), Mat4::IDENTITY)
            .unwrap();
        let foreign = scene
            .add_bone(other_skin, Object3D::new("thigh"), Mat4::IDENTITY)
            .unwrap();
        let plain = object_at(&mut scene, "plain", Vec3::ZERO);

        assert_eq!(
            scene.set_object_parent(plain, Some(bone)),
            Err(TransformError::NonBoneUnderBone {
                child: plain,
                parent: bone
            })
        );
        assert_eq!(
            scene.set_object_parent(foreign, Some(bone)),
            Err(TransformError::SkinMismatch {
                child: foreign,
                parent: bone
            })
        );
        assert!(scene.set_object_parent(bone, Some(plain)).is_ok());
    }

    #[test]
    fn skin_matrix_ignores_host_world_matrix() {
        let mut scene = Scene::new();
        let host = object_at(&mut scene, "host", Vec3::new(10.0, 0.0, 0.0));
        let skin = scene.add_skin(Skin::new("skin"));
        let bone = scene
            .add_bone(
                skin,
                Object3D::with_transform("bone", Transform::from_translation(Vec3::Y)),
                Mat4::IDENTITY,
            )
            .unwrap();
        scene.set_object_parent(bone, Some(host)).unwrap();

        scene.update();

        let bone_object = scene.get_object(bone).unwrap();
        assert_eq!(
            *bone_object.bone().unwrap().skin_matrix(),
            Mat4::from_translation(Vec3::Y)
        );
        assert_eq!(
            scene.bone_world_matrix(bone).unwrap(),
            Mat4::from_translation(Vec3::new(10.0, 1.0, 0.0))
        );

        scene.set_object_translation(host, Vec3::ZERO);
        scene.early_update();
        scene.update();
        assert!(!scene.get_object_transform(bone).unwrap().has_changed());
    }

    #[test]
    fn bind_pose_makes_palette_identity() {
        let mut scene = Scene::new();
        let skin = scene.add_skin(Skin::new("skin"));
        let root = scene
            .add_bone(
                skin,
                Object3D::with_transform("root", Transform::from_translation(Vec3::X)),
                Mat4::IDENTITY,
            )
            .unwrap();
        let tip = scene
            .add_bone(
                skin,
                Object3D::with_transform("tip", Transform::from_translation(Vec3::Y)),
                Mat4::IDENTITY,
            )
            .unwrap();
        scene.set_object_parent(tip, Some(root)).unwrap();
        scene.update();

        scene.bind_skin_pose(skin).unwrap();
        scene.update();

        let palette = scene.get_skin(skin).unwrap().bone_matrices();
        assert_eq!(palette.len(), 2);
        for matrix in palette {
            assert!(matrix.abs_diff_eq(Mat4::IDENTITY, 1e-6));
        }

        scene.set_object_rotation(root, Quat::from_rotation_z(1.0));
        scene.update();
        let tip_palette = scene.get_skin(skin).unwrap().bone_matrices()[1];
        let expected = Mat4::from_translation(Vec3::X)
            * Mat4::from_rotation_z(1.0)
            * Mat4::from_translation(-Vec3::X);
        assert!(tip_palette.abs_diff_eq(expected, 1e-5));
        assert_eq!(scene.get_skin(skin).unwrap().bone_matrices_flat().len(), 32);
    }

    #[test]
    fn inverse_bind_matrix_changes_palette() {
        let mut scene = Scene::new();
        let skin = scene.add_skin(Skin::new("skin"));
        let bone = Object3D::with_transform("bone", Transform::from_translation(Vec3::X));
        let bone = scene.add_bone(skin, bone, Mat4::IDENTITY).unwrap();
        let stray = object_at(&mut scene, "stray", Vec3::ZERO);
        scene.update();

        let palette = scene.get_skin(skin).unwrap().bone_matrices();
        assert_eq!(palette, &[Mat4::from_translation(Vec3::X)]);

        let inverse_bind = Mat4::from_translation(-Vec3::X);
        let skin_mut = scene.get_skin_mut(skin).unwrap();
        assert!(skin_mut.set_inverse_bind_matrix(bone, inverse_bind));
        assert!(!skin_mut.set_inverse_bind_matrix(stray, inverse_bind));
        scene.update();

        let palette = scene.get_skin(skin).unwrap().bone_matrices();
        assert_eq!(palette.len(), 1);
        assert!(palette[0].abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn bind_pose_with_singular_bone_follows_policy() {
        let config = SceneConfig {
            inverse_policy: InversePolicy::Strict,
            ..Default::default()
        };
        let mut scene = Scene::with_config(config);
        let skin = scene.add_skin(Skin::new("skin"));
        let bind = Mat4::from_translation(Vec3::new(0.0, -2.0, 0.0));
        let root = scene.add_bone(skin, Object3D::new("root"), bind).unwrap();
        let tip = scene.add_bone(skin, Object3D::new("tip"), bind).unwrap();
        scene.set_object_parent(tip, Some(root)).unwrap();
        scene.set_object_scale(tip, Vec3::ZERO);
        scene.update();

        assert_eq!(
            scene.bind_skin_pose(skin),
            Err(TransformError::SingularMatrix)
        );
        let binds = scene.get_skin(skin).unwrap().inverse_bind_matrices();
        assert_eq!(binds, &[bind, bind]);

        scene.config_mut().inverse_policy = InversePolicy::Lenient;
        scene.bind_skin_pose(skin).unwrap();

        let binds = scene.get_skin(skin).unwrap().inverse_bind_matrices();
        assert_eq!(binds.len(), 2);
        assert!(binds[0].abs_diff_eq(Mat4::IDENTITY, 1e-6));
        assert_eq!(binds[1], Mat4::IDENTITY);
    }

    #[test]
    fn removing_bone_updates_skin() {
        let mut scene = Scene::new();
        let skin = scene.add_skin(Skin::new("skin"));
        let root = scene
            .add_bone(skin, Object3D::new("root"), Mat4::IDENTITY)
            .unwrap();
        let tip = scene
            .add_bone(skin, Object3D::new("tip"), Mat4::IDENTITY)
            .unwrap();
        scene.set_object_parent(tip, Some(root)).unwrap();

        scene.remove_object(tip).unwrap();

        let skin = scene.get_skin(skin).unwrap();
        assert_eq!(skin.bones(), &[root]);
        assert_eq!(skin.inverse_bind_matrices().len(), 1);
        assert_eq!(skin.bone_matrices().len(), 1);
    }

    #[test]
    fn normal_matrix_follows_policy() {
        let mut scene = Scene::new();
        let flat = object_at(&mut scene, "flat", Vec3::ZERO);
        scene.set_object_scale(flat, Vec3::new(1.0, 0.0, 1.0));
        let stretched = object_at(&mut scene, "stretched", Vec3::ONE);
        scene.set_object_scale(stretched, Vec3::new(2.0, 1.0, 1.0));
        scene.update();

        assert_eq!(scene.normal_matrix(flat).unwrap(), Matrix3::IDENTITY);
        assert_eq!(
            scene.normal_matrix(stretched).unwrap(),
            Matrix3::new(0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0)
        );

        scene.config_mut().inverse_policy = InversePolicy::Strict;
        assert_eq!(
            scene.normal_matrix(flat),
            Err(TransformError::SingularMatrix)
        );
    }
}
