use crate::math::InversePolicy;

#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Used by [`Scene::normal_matrix`](crate::scene_graph::Scene::normal_matrix).
    pub inverse_policy: InversePolicy,
    /// Refresh every skin's bone palette at the end of
    /// [`Scene::update`](crate::scene_graph::Scene::update).
    pub compute_bone_matrices: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            inverse_policy: InversePolicy::Lenient,
            compute_bone_matrices: true,
        }
    }
}
