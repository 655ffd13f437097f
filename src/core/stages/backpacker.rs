use crate::core::controller::{Stage, StageContext, Step, Transition};
use crate::io::device::Button;

pub fn step(substage: u16) -> Option<Step> {
    match substage {
        0 => Some(Step::after(5.0, take_item)),
        1 => Some(Step::after(10.0, leave)),
        _ => None,
    }
}

fn take_item(ctx: &mut StageContext<'_>) -> Transition {
    // Whatever item is offered first.
    ctx.press(Button::A);
    Transition::Advance
}

fn leave(_ctx: &mut StageContext<'_>) -> Transition {
    log::info!("Detecting where the path led...");
    Transition::Enter(Stage::Detect)
}
