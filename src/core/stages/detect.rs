use crate::core::controller::{Stage, StageContext, Step, Transition};
use crate::io::vision::BOTTOM_TEXT;

pub fn step(substage: u16) -> Option<Step> {
    match substage {
        0 => Some(Step::now(detect)),
        _ => None,
    }
}

/// Works out whether the path led to a battle, an NPC or another fork.
fn detect(ctx: &mut StageContext<'_>) -> Transition {
    let text = ctx.read_text(&BOTTOM_TEXT);
    if text.contains("Fight") || text.contains("appeared") {
        log::info!("Battle starting...");
        Transition::Enter(Stage::Battle)
    } else if text.contains("backpacker") {
        log::info!("Backpacker encountered...");
        Transition::Enter(Stage::Backpacker)
    } else if text.contains("swapping") {
        log::info!("Scientist encountered...");
        Transition::Enter(Stage::Scientist)
    } else if text.contains("path") {
        log::info!("Choosing a path...");
        Transition::Enter(Stage::Path)
    } else {
        Transition::Stay
    }
}
