use crate::core::controller::{Stage, StageContext, Step, Transition};
use crate::io::device::Button;

pub fn step(substage: u16) -> Option<Step> {
    match substage {
        0 => Some(Step::after(3.0, decline)),
        1 => Some(Step::after(4.0, leave)),
        _ => None,
    }
}

fn decline(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::B);
    Transition::Advance
}

fn leave(_ctx: &mut StageContext<'_>) -> Transition {
    log::info!("Detecting where the path led...");
    Transition::Enter(Stage::Detect)
}
