use anyhow::Result;

mod demo;
mod engine;

const FRAME_COUNT: u32 = 8;
const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let mut state = demo::DemoState::new()?;

    for frame in 0..FRAME_COUNT {
        engine::update(&mut state, frame as f32 * FRAME_TIME)?;
    }

    Ok(())
}
