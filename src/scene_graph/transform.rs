use glam::{Mat4, Quat, Vec3};

/// Local pose of an object plus the matrices derived from it.
///
/// Pose setters only mark this transform as needing a world update. The
/// derived matrices are written by [`Scene::update_object`](super::Scene::update_object).
#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,

    local_matrix: Mat4,
    world_matrix: Mat4,
    matrix_auto_update: bool,
    world_needs_update: bool,
    has_changed_since_last_update: bool,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            matrix_auto_update: true,
            world_needs_update: true,
            has_changed_since_last_update: true,
        }
    }

    pub fn from_translation_rotation_scale(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        let mut transform = Self::from_translation(translation);
        transform.rotation = rotation;
        transform.scale = scale;
        transform
    }

    /// A transform driven by an explicit local matrix instead of a pose.
    pub fn from_local_matrix(local_matrix: Mat4) -> Self {
        let mut transform = Self::default();
        transform.set_local_matrix(local_matrix);
        transform
    }

    pub fn local_matrix(&self) -> &Mat4 {
        &self.local_matrix
    }

    /// Only maintained for non-bone objects. Bones keep a skin matrix instead,
    /// use [`Scene::bone_world_matrix`](super::Scene::bone_world_matrix) for
    /// their world placement.
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub(crate) fn set_world_matrix(&mut self, world_matrix: Mat4) {
        self.world_matrix = world_matrix;
        self.mark_updated();
    }

    /// Clears the dirty flag after the derived matrix has been rewritten.
    pub(crate) fn mark_updated(&mut self) {
        self.world_needs_update = false;
        self.has_changed_since_last_update = true;
    }

    /// Recomputes the local matrix from the pose. Returns whether it changed.
    pub fn update_matrix(&mut self) -> bool {
        let matrix =
            Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation);
        debug_assert!(
            matrix.is_finite(),
            "non-finite local matrix from pose t={:?} r={:?} s={:?}",
            self.translation,
            self.rotation,
            self.scale
        );

        let changed = matrix != self.local_matrix;
        self.local_matrix = matrix;
        changed
    }

    pub fn invalidate_world(&mut self) {
        self.world_needs_update = true;
    }

    pub fn needs_world_update(&self) -> bool {
        self.world_needs_update
    }

    pub fn matrix_auto_update(&self) -> bool {
        self.matrix_auto_update
    }

    pub fn set_matrix_auto_update(&mut self, enabled: bool) {
        self.matrix_auto_update = enabled;
    }

    /// Overrides the local matrix and turns off auto-update so the pose no
    /// longer replaces it.
    pub fn set_local_matrix(&mut self, local_matrix: Mat4) {
        self.local_matrix = local_matrix;
        self.matrix_auto_update = false;
        self.invalidate_world();
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.invalidate_world();
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.invalidate_world();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.invalidate_world();
    }

    pub fn set_transform(&mut self, translation: Vec3, rotation: Quat, scale: Vec3) {
        self.translation = translation;
        self.rotation = rotation;
        self.scale = scale;
        self.invalidate_world();
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn reset_flags(&mut self) {
        self.has_changed_since_last_update = false;
    }

    /// Whether the world (or skin) matrix was rewritten since the last
    /// [`reset_flags`](Self::reset_flags).
    pub fn has_changed(&self) -> bool {
        self.has_changed_since_last_update
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}
