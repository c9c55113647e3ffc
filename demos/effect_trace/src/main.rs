//! Replays a scripted sequence of value changes against a manual clock and
//! prints the resulting layer transforms, one line per frame.
//!
//! `RUST_LOG=flair_core=debug cargo run -p effect_trace` also shows firings
//! and suppressions.

use flair_core::*;
use flair_ui::*;
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(50);

/// (frame index, new value) pairs; the value holds between entries.
const SCRIPT: &[(u32, u32)] = &[(0, 0), (4, 1), (6, 2), (30, 3), (32, 3), (70, 4)];

fn value_at(frame: u32) -> u32 {
    SCRIPT
        .iter()
        .take_while(|(f, _)| *f <= frame)
        .last()
        .map(|(_, v)| *v)
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let clock = ManualClock::default();
    let env = EffectEnv::new(&clock);
    let size = Size::new(120.0, 44.0);

    let jump = Effect::jump(12.0)?.try_with_cooldown_secs(1.0)?;
    let shake = Effect::shake_with(6.0, 3)?;
    let press = ConditionalEffect::push_down();

    println!("frame  value  pressed  tx      ty      scale   shimmer");
    for frame in 0..100u32 {
        let value = value_at(frame);
        let pressed = (40..48).contains(&frame);

        let _pass = ComposeGuard::begin();
        let layer = Layer::new(size);
        let layer = change_effect("jump", layer, jump, value, true, None, &env);
        let layer = change_effect("shake", layer, shake, value % 2 == 0, true, None, &env);
        let layer = change_effect("shimmer", layer, Effect::shimmer(), value, true, None, &env);
        let layer = conditional_effect("press", layer, press, pressed, true, None, &env);

        let shimmer = layer
            .masks
            .first()
            .map(|m| format!("{:.2}", m.center))
            .unwrap_or_else(|| "-".into());
        println!(
            "{frame:>5}  {value:>5}  {pressed:>7}  {:>6.2}  {:>6.2}  {:>6.3}  {shimmer}",
            layer.transform.translate_x, layer.transform.translate_y, layer.transform.scale_x,
        );

        if !layer.animating && frame > SCRIPT.last().map(|(f, _)| *f).unwrap_or(0) {
            log::info!("settled after frame {frame}");
            break;
        }
        clock.advance(FRAME);
    }
    Ok(())
}
