use crate::demo::DemoState;

pub fn update(state: &mut DemoState, time: f32) -> anyhow::Result<()> {
    state.scene.early_update();
    state.update(time);
    state.scene.update();
    state.report()?;

    Ok(())
}
