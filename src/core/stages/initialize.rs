use crate::core::controller::{Stage, StageContext, Step, Transition};
use crate::io::device::Button;

pub fn step(substage: u16) -> Option<Step> {
    match substage {
        0 => Some(Step::now(start_run)),
        1 => Some(Step::after(1.0, begin_join)),
        _ => None,
    }
}

fn start_run(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::B);
    log::info!("Run #{} started!", ctx.session.runs + 1);
    ctx.restart_clock();
    Transition::Advance
}

fn begin_join(_ctx: &mut StageContext<'_>) -> Transition {
    Transition::Enter(Stage::Join)
}
