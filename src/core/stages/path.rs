use crate::core::controller::{Stage, StageContext, Step, Transition};
use crate::io::device::Button;

pub fn step(substage: u16) -> Option<Step> {
    match substage {
        0 => Some(Step::now(select_path)),
        1 => Some(Step::after(4.0, finish_path)),
        _ => None,
    }
}

fn select_path(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    Transition::Advance
}

fn finish_path(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::Digit(0));
    log::info!("Detecting where the path led...");
    Transition::Enter(Stage::Detect)
}
