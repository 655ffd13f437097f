use crate::core::controller::{Stage, StageContext, Step, Transition};
use crate::core::stages::{identify, scripted_button, scripted_wait, Scripted};
use crate::io::device::Button;
use crate::io::vision::{JOIN_ABILITIES, JOIN_NAMES};

const RENTAL_WEIGHT: f64 = 3.0;
const BOSS_WEIGHT: f64 = 2.0;

const CHOOSE_RENTAL: u16 = 12;

/// Talk to the scientist, start an adventure and decline to invite others.
const JOIN_SEQUENCE: [Scripted; 12] = [
    (0, 0.0, Button::A),
    // Again, in case the first press only woke the controller.
    (1, 0.5, Button::A),
    (2, 1.5, Button::A),
    (3, 3.0, Button::A),
    (4, 4.5, Button::A),
    (5, 6.0, Button::A),
    (6, 7.5, Button::A),
    (7, 8.5, Button::A),
    (8, 10.0, Button::A),
    (9, 14.0, Button::Down),
    (10, 15.0, Button::A),
    (11, 20.0, Button::Digit(0)),
];

pub fn step(substage: u16) -> Option<Step> {
    if let Some(wait) = scripted_wait(&JOIN_SEQUENCE, substage) {
        return Some(Step::after(wait, press_scripted));
    }
    match substage {
        CHOOSE_RENTAL => Some(Step::after(20.0, choose_rental)),
        97 | 98 => Some(Step::after(1.0, cursor_down)),
        99 => Some(Step::after(1.0, confirm_rental)),
        100 => Some(Step::after(30.0, finish_join)),
        _ => None,
    }
}

fn press_scripted(ctx: &mut StageContext<'_>) -> Transition {
    if let Some(button) = scripted_button(&JOIN_SEQUENCE, ctx.substage()) {
        ctx.press(button);
    }
    Transition::Advance
}

/// Scores the three offered rentals and moves the cursor to the best one.
fn choose_rental(ctx: &mut StageContext<'_>) -> Transition {
    let mut best: Option<(usize, f64)> = None;
    let mut candidates = Vec::with_capacity(JOIN_NAMES.len());
    for (slot, (name_region, ability_region)) in JOIN_NAMES.iter().zip(JOIN_ABILITIES.iter()).enumerate() {
        let name = ctx.read_text(name_region);
        let ability = ctx.read_text(ability_region);
        let Some(pokemon) = identify(ctx, &name, &ability, "") else {
            continue;
        };
        let tables = &ctx.data.tables;
        let score = (RENTAL_WEIGHT * tables.rental_score(&pokemon.name)
            + BOSS_WEIGHT * tables.boss_matchup(&pokemon.name, &ctx.session.boss))
            / (RENTAL_WEIGHT + BOSS_WEIGHT);
        log::info!("Score for {}:\t{:.2}", pokemon.name, score);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((slot, score));
        }
        candidates.push((slot, pokemon));
    }

    let Some((slot, _)) = best else {
        return Transition::Stay;
    };
    ctx.session.run.pokemon = candidates
        .into_iter()
        .find(|(s, _)| *s == slot)
        .map(|(_, p)| p);
    ctx.restart_clock();
    Transition::Goto(99 - slot as u16)
}

fn cursor_down(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::Down);
    ctx.restart_clock();
    Transition::Advance
}

fn confirm_rental(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    ctx.restart_clock();
    Transition::Advance
}

fn finish_join(_ctx: &mut StageContext<'_>) -> Transition {
    log::info!("Choosing a path...");
    Transition::Enter(Stage::Path)
}
