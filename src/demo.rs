use anyhow::Context;
use glam::{Mat4, Quat, Vec3};

use hierarchy::{InversePolicy, Object3D, ObjectId, Scene, SceneConfig, Skin, SkinId, Transform};

pub struct DemoState {
    pub scene: Scene,
    body: ObjectId,
    skin: SkinId,
    shoulder: ObjectId,
    elbow: ObjectId,
}

impl DemoState {
    pub fn new() -> anyhow::Result<Self> {
        let mut scene = Scene::with_config(SceneConfig {
            inverse_policy: InversePolicy::Strict,
            ..Default::default()
        });

        let body = scene.add_object(offset_object("Body", Vec3::new(0.0, 1.0, 0.0)));

        let skin = scene.add_skin(Skin::new("Arm"));
        let shoulder = offset_object("Shoulder", Vec3::new(0.3, 0.5, 0.0));
        let shoulder = scene.add_bone(skin, shoulder, Mat4::IDENTITY)?;
        let elbow = offset_object("Elbow", Vec3::new(0.4, 0.0, 0.0));
        let elbow = scene.add_bone(skin, elbow, Mat4::IDENTITY)?;

        scene
            .set_object_parent(shoulder, Some(body))
            .context("Failed to attach shoulder to body")?;
        scene
            .set_object_parent(elbow, Some(shoulder))
            .context("Failed to attach elbow to shoulder")?;

        scene.update();
        scene
            .bind_skin_pose(skin)
            .context("Failed to bind arm rest pose")?;

        Ok(Self {
            scene,
            body,
            skin,
            shoulder,
            elbow,
        })
    }

    pub fn update(&mut self, time: f32) {
        let rotation = Quat::from_axis_angle(Vec3::Y, time * 0.5);
        let translation = Vec3::new(0.0, 1.0 + (time * 2.0).sin() * 0.05, 0.0);

        self.scene
            .set_object_transform(self.body, translation, rotation, Vec3::ONE);
        self.scene
            .set_object_rotation(self.shoulder, Quat::from_rotation_z(time.sin() * 0.8));
        self.scene
            .set_object_rotation(self.elbow, Quat::from_rotation_z(time * 1.5));
    }

    pub fn report(&self) -> anyhow::Result<()> {
        let body_world = self
            .scene
            .get_object_transform(self.body)
            .context("Body object missing")?
            .world_matrix();
        let hand = self
            .scene
            .bone_world_matrix(self.elbow)
            .context("Elbow bone missing")?
            .transform_point3(Vec3::new(0.3, 0.0, 0.0));
        let normal_matrix = self
            .scene
            .normal_matrix(self.body)
            .context("Body normal matrix")?;
        let skin = self.scene.get_skin(self.skin).context("Arm skin missing")?;

        log::info!(
            "body at {:?}, hand at {:?}, {} bone floats",
            body_world.w_axis.truncate(),
            hand,
            skin.bone_matrices_flat().len()
        );
        log::debug!("body normal matrix {:?}", normal_matrix.elements());

        Ok(())
    }
}

fn offset_object(name: &str, translation: Vec3) -> Object3D {
    Object3D::with_transform(name, Transform::from_translation(translation))
}
