use crate::ai::eval::evaluate_matchup;
use crate::core::controller::{Stage, StageContext, Step, Transition};
use crate::core::stages::identify;
use crate::core::state::{DEFAULT_BALL, MAX_CATCHES};
use crate::io::device::Button;
use crate::io::vision::{BALL_TEXT, CATCH_ABILITY, CATCH_NAME};

const BOSS_WEIGHT: f64 = 2.0;

const SELECT_BALL: u16 = 10;
const THROW: u16 = 20;
const CONSIDER_SWAP: u16 = 30;
const RUN_COMPLETE: u16 = 100;

pub fn step(substage: u16) -> Option<Step> {
    match substage {
        0 => Some(Step::now(start)),
        SELECT_BALL => Some(Step::after(1.0, select_ball)),
        THROW => Some(Step::after(1.0, throw_ball)),
        CONSIDER_SWAP => Some(Step::after(30.0, consider_swap)),
        RUN_COMPLETE => Some(Step::after(35.0, finish_run)),
        _ => None,
    }
}

fn start(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    ctx.restart_clock_with_delay(0.5);
    if ctx.session.target_ball() == DEFAULT_BALL {
        Transition::Goto(THROW)
    } else {
        Transition::Goto(SELECT_BALL)
    }
}

/// Cycles through the ball list until the wanted kind is highlighted.
fn select_ball(ctx: &mut StageContext<'_>) -> Transition {
    let shown = ctx.read_text(&BALL_TEXT);
    if shown.contains(ctx.session.target_ball()) {
        Transition::Goto(THROW)
    } else {
        ctx.press(Button::Left);
        ctx.restart_clock();
        Transition::Stay
    }
}

fn throw_ball(ctx: &mut StageContext<'_>) -> Transition {
    ctx.restart_clock();
    ctx.press(Button::A);
    ctx.session.record_ball_use();
    if ctx.session.run.num_caught < MAX_CATCHES {
        Transition::Goto(CONSIDER_SWAP)
    } else {
        Transition::Goto(RUN_COMPLETE)
    }
}

/// Decides whether to trade the current Pokemon for the one just caught,
/// weighing the rest of the path against the boss.
fn consider_swap(ctx: &mut StageContext<'_>) -> Transition {
    let name = ctx.read_text(&CATCH_NAME);
    let name = name.trim().lines().last().unwrap_or("").to_string();
    let ability = ctx.read_text(&CATCH_ABILITY);
    let caught = identify(ctx, &name, &ability, "");

    let session = &*ctx.session;
    let tables = &ctx.data.tables;
    let team = ctx.data.rental_team();
    let rental_weight = 3.0 - session.run.num_caught.min(3) as f64;
    let weights = rental_weight + BOSS_WEIGHT;

    let take = match (&caught, &session.run.pokemon) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(new), Some(current)) => {
            let score = (rental_weight * tables.rental_score(&new.name)
                + BOSS_WEIGHT * tables.boss_matchup(&new.name, &session.boss))
                / weights;
            let boss_score = match ctx.data.boss(&session.boss) {
                Ok(boss) => evaluate_matchup(current, boss, &team),
                Err(e) => {
                    log::warn!("{}", e);
                    0.0
                }
            };
            let existing = session.run.hp_fraction
                * (rental_weight * tables.rental_score(&current.name) + BOSS_WEIGHT * boss_score)
                / weights;
            log::info!("Score for {}:\t{:.2}", new.name, score);
            log::info!("Score for {}:\t{:.2}", current.name, existing);
            score > existing
        }
    };

    if take {
        ctx.press(Button::A);
        ctx.session.run.pokemon = caught;
    } else {
        ctx.press(Button::B);
    }
    log::info!("Detecting where the path led...");
    Transition::Enter(Stage::Detect)
}

fn finish_run(_ctx: &mut StageContext<'_>) -> Transition {
    log::info!("Congratulations! Checking the haul from this run...");
    Transition::Enter(Stage::SelectPokemon)
}
