use crate::core::controller::{Stage, StageContext, Step, Transition};
use crate::core::stages::{scripted_button, scripted_wait, Scripted};
use crate::core::state::{Mode, MAX_CATCHES};
use crate::io::device::Button;

const SUMMARY: u16 = 3;
/// Substages 4..=7 check the caught Pokemon, legendary first.
const CHECK_LEGENDARY: u16 = 4;
const CHECK_LAST: u16 = 7;
const DECLINE: u16 = 8;
const FINAL_DIALOGUE: u16 = 13;
const SETTLE_RUN: u16 = 14;
const FULL_CLEAR_DIALOGUE: u16 = 16;
const LAST_DIALOGUE: u16 = 18;
const KEEP_POKEMON: u16 = 50;
const KEEP_DONE: u16 = 57;
const WRAP_UP: u16 = 100;
const RESET_GAME: u16 = 420;
const RESET_DONE: u16 = 432;

/// Plain presses. Waits count from the last clock restart, not from the previous press.
const SCRIPT: &[Scripted] = &[
    (1, 6.0, Button::A),
    (2, 7.0, Button::Down),
    (9, 4.0, Button::B),
    (10, 5.0, Button::A),
    (11, 7.0, Button::A),
    (12, 9.0, Button::A),
    (FINAL_DIALOGUE, 21.0, Button::A),
    (FULL_CLEAR_DIALOGUE, 4.0, Button::A),
    (17, 6.0, Button::A),
    (KEEP_POKEMON, 1.0, Button::B),
    (52, 5.0, Button::A),
    (53, 6.0, Button::A),
    (54, 7.0, Button::A),
    (55, 8.0, Button::A),
    (56, 12.0, Button::A),
    // Close the game, relaunch and replay the scientist's opening dialogue.
    (421, 3.0, Button::X),
    (422, 5.0, Button::A),
    (423, 8.0, Button::A),
    (424, 10.0, Button::A),
    (425, 30.0, Button::A),
    (426, 40.0, Button::A),
    (427, 43.0, Button::B),
    (428, 46.0, Button::B),
    (429, 49.0, Button::B),
    (430, 52.0, Button::B),
    (431, 55.0, Button::A),
];

pub fn step(substage: u16) -> Option<Step> {
    if let Some(wait) = scripted_wait(SCRIPT, substage) {
        return Some(Step::after(wait, press_scripted));
    }
    match substage {
        0 => Some(Step::after(5.0, open_party)),
        SUMMARY => Some(Step::after(8.0, open_summary)),
        CHECK_LEGENDARY..=CHECK_LAST => Some(Step::after(2.0, check_shiny)),
        DECLINE => Some(Step::after(1.0, decline_or_reset)),
        SETTLE_RUN => Some(Step::after(22.0, settle_run)),
        LAST_DIALOGUE => Some(Step::after(8.0, last_dialogue)),
        51 => Some(Step::after(4.0, confirm_keep)),
        KEEP_DONE => Some(Step::after(22.0, keep_done)),
        WRAP_UP => Some(Step::after(2.0, wrap_up)),
        RESET_GAME => Some(Step::after(1.0, reset_game)),
        RESET_DONE => Some(Step::after(58.0, reset_done)),
        _ => None,
    }
}

fn press_scripted(ctx: &mut StageContext<'_>) -> Transition {
    if let Some(button) = scripted_button(SCRIPT, ctx.substage()) {
        ctx.press(button);
    }
    Transition::Advance
}

fn open_party(ctx: &mut StageContext<'_>) -> Transition {
    log::info!("Checking caught Pokemon...");
    // Cursor onto the last Pokemon.
    ctx.press(Button::Up);
    Transition::Advance
}

fn open_summary(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    ctx.restart_clock();
    // Skip the slots that were never filled.
    let caught = ctx.session.run.num_caught.min(MAX_CATCHES) as u16;
    Transition::Goto(SUMMARY + 5 - caught)
}

fn check_shiny(ctx: &mut StageContext<'_>) -> Transition {
    if ctx.screen.shiny_star_visible() {
        ctx.restart_clock();
        log::info!("******************************");
        log::info!("Shiny found!");
        log::info!("******************************");
        ctx.session.shinies_found += 1;
        ctx.overlay().log();
        if ctx.substage() == CHECK_LEGENDARY {
            return Transition::Finish("Shiny legendary found".to_string());
        }
        return Transition::Goto(KEEP_POKEMON);
    }
    if ctx.elapsed().as_secs_f64() <= 3.0 {
        return Transition::Stay;
    }

    let session = &*ctx.session;
    if session.mode == Mode::BallSaver && session.run.num_caught == MAX_CATCHES {
        if session.check_sufficient_ore(session.consecutive_resets + 2) {
            ctx.restart_clock();
            return Transition::Goto(RESET_GAME);
        }
        return Transition::Finish("Insufficient Dynite Ore to reset again. Quitting...".to_string());
    }
    if ctx.substage() < CHECK_LAST {
        ctx.press(Button::Up);
    }
    ctx.restart_clock();
    Transition::Advance
}

fn decline_or_reset(ctx: &mut StageContext<'_>) -> Transition {
    let session = &*ctx.session;
    if session.mode == Mode::StrongBoss
        && session.run.num_caught == MAX_CATCHES
        && session.check_sufficient_ore(session.consecutive_resets + 1)
    {
        ctx.restart_clock();
        return Transition::Goto(RESET_GAME);
    }
    ctx.press(Button::B);
    Transition::Advance
}

/// Pays out Dynite Ore and skips the dialogue that depends on how far the run got.
fn settle_run(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    let session = &mut *ctx.session;
    let caught = session.run.num_caught;
    session.consecutive_resets = 0;
    session.dynite_ore += caught + if caught == MAX_CATCHES { 2 } else { 0 };
    if caught < 1 {
        // The dialogue after a run without a win is not handled.
        return Transition::Finish("Run ended without a win; stopping".to_string());
    }
    ctx.restart_clock();
    if caught < 3 {
        Transition::Goto(WRAP_UP)
    } else if caught < MAX_CATCHES {
        Transition::Goto(LAST_DIALOGUE)
    } else {
        Transition::Goto(FULL_CLEAR_DIALOGUE)
    }
}

fn last_dialogue(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    ctx.restart_clock();
    Transition::Goto(WRAP_UP)
}

fn confirm_keep(ctx: &mut StageContext<'_>) -> Transition {
    ctx.overlay().log();
    ctx.press(Button::A);
    Transition::Advance
}

fn keep_done(ctx: &mut StageContext<'_>) -> Transition {
    ctx.restart_clock();
    Transition::Goto(FINAL_DIALOGUE)
}

/// Counts the run and starts the next one if there are balls left.
fn wrap_up(ctx: &mut StageContext<'_>) -> Transition {
    let session = &mut *ctx.session;
    if session.run.num_caught == MAX_CATCHES {
        session.wins += 1;
    }
    session.runs += 1;
    session.reset_run();
    if session.check_sufficient_balls() {
        log::info!("Preparing for another run...");
        Transition::Enter(Stage::Initialize)
    } else {
        Transition::Finish("Out of balls. Quitting...".to_string())
    }
}

fn reset_game(ctx: &mut StageContext<'_>) -> Transition {
    log::info!("Resetting game...");
    ctx.press(Button::Home);
    ctx.session.refund_run_balls();
    ctx.session.pay_for_reset();
    Transition::Advance
}

fn reset_done(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::B);
    ctx.restart_clock();
    Transition::Goto(WRAP_UP)
}
