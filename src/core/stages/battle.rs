use crate::ai::damage::Combatant;
use crate::ai::eval::{move_score, select_best_move};
use crate::core::controller::{Stage, StageContext, Step, Transition};
use crate::core::stages::{identify, title_case};
use crate::io::device::Button;
use crate::io::vision::{BATTLE_NAME, BATTLE_TYPES, BOTTOM_TEXT};

const MOVE_SLOTS: usize = 4;
/// Turns left after the one it is activated on.
const DYNAMAX_TURNS: u32 = 2;

const CLASSIFY: u16 = 1;
const CHOOSE_MOVE: u16 = 2;
const SELECT_MOVE: u16 = 6;
const FINISH_TURN: u16 = 8;
const DYNAMAX: u16 = 15;
const SCOUT_OPPONENT: u16 = 30;

pub fn step(substage: u16) -> Option<Step> {
    match substage {
        0 => Some(Step::now(start)),
        CLASSIFY => Some(Step::now(classify)),
        CHOOSE_MOVE => Some(Step::after(1.0, choose_move)),
        3..=5 => Some(Step::after(0.75, cursor_down)),
        SELECT_MOVE => Some(Step::after(1.5, press_a_restart)),
        7 => Some(Step::after(1.5, use_move)),
        FINISH_TURN => Some(Step::after(2.5, press_a)),
        // Back out to the Fight screen in case something went wrong (no PP, choice lock).
        9 => Some(Step::after(3.5, press_b)),
        10 => Some(Step::after(4.5, back_to_classify)),
        12..=15 => Some(Step::after(3.0, dynamax_left)),
        16..=19 => Some(Step::after(4.0, dynamax_confirm)),
        20..=23 => Some(Step::after(5.0, dynamax_activate)),
        SCOUT_OPPONENT => Some(Step::after(1.0, scout_open)),
        31 => Some(Step::after(2.0, press_a)),
        32 => Some(Step::after(3.0, scout_cycle)),
        33 => Some(Step::after(4.0, scout_read)),
        34 => Some(Step::after(1.5, press_b)),
        35 => Some(Step::after(2.0, back_to_classify)),
        _ => None,
    }
}

fn start(ctx: &mut StageContext<'_>) -> Transition {
    ctx.restart_clock();
    Transition::Advance
}

/// Reads the bottom of the screen to find out what the battle wants next.
fn classify(ctx: &mut StageContext<'_>) -> Transition {
    let text = ctx.read_text(&BOTTOM_TEXT);
    ctx.restart_clock();
    let encounter = &mut ctx.session.run.encounter;
    if text.contains("Fight") {
        Transition::Goto(CHOOSE_MOVE)
    } else if text.contains("Cheer On") {
        encounter.dmax_timer = None;
        encounter.dynamax_available = false;
        if encounter.dynamaxed {
            encounter.dynamaxed = false;
            encounter.move_index = 0;
        }
        Transition::Goto(FINISH_TURN)
    } else if text.contains("Catch") {
        log::info!("Catching boss...");
        Transition::Enter(Stage::Catch)
    } else if text.contains("blown") {
        log::info!("You lose :(. Quitting...");
        Transition::Enter(Stage::SelectPokemon)
    } else if text.contains("gathered around") {
        encounter.dynamax_available = true;
        encounter.dynamaxed = false;
        encounter.dmax_timer = None;
        Transition::Stay
    } else if text.to_lowercase().contains("can dynamax now") {
        encounter.dynamax_available = false;
        encounter.dynamaxed = false;
        encounter.dmax_timer = None;
        Transition::Stay
    } else {
        Transition::Stay
    }
}

/// Cursor steps needed to go from `from` to `to` on the wrapping move list.
pub fn cursor_delta(from: usize, to: usize) -> usize {
    (to % MOVE_SLOTS + MOVE_SLOTS - from % MOVE_SLOTS) % MOVE_SLOTS
}

fn choose_move(ctx: &mut StageContext<'_>) -> Transition {
    if ctx.session.run.encounter.opponent.is_none() {
        if ctx.session.run.num_caught < 3 {
            ctx.restart_clock();
            return Transition::Goto(SCOUT_OPPONENT);
        }
        match ctx.data.boss(&ctx.session.boss) {
            Ok(boss) => ctx.session.run.encounter.opponent = Some(boss.clone()),
            Err(e) => return Transition::Finish(format!("Cannot fight the boss: {}", e)),
        }
    }
    ctx.press(Button::A);

    let team = ctx.team();
    let run = &mut ctx.session.run;
    let encounter = &mut run.encounter;
    match encounter.dmax_timer {
        Some(0) => {
            encounter.dmax_timer = None;
            encounter.move_index = 0;
            encounter.dynamaxed = false;
        }
        Some(turns) => encounter.dmax_timer = Some(turns - 1),
        None => {}
    }

    let (Some(pokemon), Some(opponent)) = (run.pokemon.as_ref(), encounter.opponent.as_ref()) else {
        return Transition::Finish("No active Pokemon to fight with".to_string());
    };
    let current = Combatant::with_dynamax(pokemon, encounter.dynamaxed);
    let mut best = select_best_move(current, opponent, &team);
    let mut chosen = current.move_at(best);
    if encounter.dynamax_available {
        let normal = Combatant::new(pokemon);
        let dmax = Combatant::dynamaxed(pokemon);
        let default_score = move_score(normal, best, opponent, &team);
        let best_max = select_best_move(dmax, opponent, &team);
        if move_score(dmax, best_max, opponent, &team) > default_score {
            best = best_max;
            chosen = dmax.move_at(best_max);
        } else {
            // Save the dynamax for a later turn.
            encounter.dynamax_available = false;
            chosen = normal.move_at(best);
        }
    }
    log::info!(
        "Best move against {}: {} (index {})",
        opponent.name,
        chosen.map_or("?", |m| m.name.as_str()),
        best
    );

    encounter.move_index %= MOVE_SLOTS;
    let delta = cursor_delta(encounter.move_index, best) as u16;
    let next = if encounter.dynamax_available {
        DYNAMAX - delta
    } else {
        SELECT_MOVE - delta
    };
    ctx.restart_clock_with_delay(0.5);
    Transition::Goto(next)
}

fn cursor_down(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::Down);
    ctx.session.run.encounter.move_index += 1;
    ctx.restart_clock();
    Transition::Advance
}

fn press_a_restart(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    ctx.restart_clock();
    Transition::Advance
}

fn use_move(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    let run = &mut ctx.session.run;
    run.encounter.move_index %= MOVE_SLOTS;
    let pressure = run
        .encounter
        .opponent
        .as_ref()
        .map_or(false, |o| o.ability == "Pressure");
    if let Some(pokemon) = run.pokemon.as_mut() {
        pokemon.spend_pp(run.encounter.move_index, if pressure { 2 } else { 1 });
    }
    Transition::Advance
}

fn press_a(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    Transition::Advance
}

fn press_b(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::B);
    Transition::Advance
}

fn back_to_classify(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::B);
    Transition::Goto(CLASSIFY)
}

fn dynamax_left(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::Left);
    Transition::Goto(ctx.substage() + 4)
}

fn dynamax_confirm(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::A);
    Transition::Goto(ctx.substage() + 4)
}

fn dynamax_activate(ctx: &mut StageContext<'_>) -> Transition {
    let encounter = &mut ctx.session.run.encounter;
    encounter.dmax_timer = Some(DYNAMAX_TURNS);
    encounter.dynamaxed = true;
    encounter.dynamax_available = false;
    let delta = 23 - ctx.substage();
    ctx.restart_clock_with_delay(0.5);
    Transition::Goto(SELECT_MOVE - delta)
}

/// Opens the opponent's status screen so its name and types can be read.
fn scout_open(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::Y);
    Transition::Advance
}

fn scout_cycle(ctx: &mut StageContext<'_>) -> Transition {
    ctx.press(Button::L);
    Transition::Advance
}

fn scout_read(ctx: &mut StageContext<'_>) -> Transition {
    let name = ctx.read_text(&BATTLE_NAME);
    let types: String = BATTLE_TYPES
        .iter()
        .map(|region| title_case(&ctx.read_text(region)))
        .collect();
    if let Some(opponent) = identify(ctx, &name, "", &types) {
        ctx.session.run.encounter.opponent = Some(opponent);
    }
    ctx.press(Button::B);
    ctx.restart_clock();
    Transition::Advance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_through_the_bottom() {
        assert_eq!(cursor_delta(0, 0), 0);
        assert_eq!(cursor_delta(0, 3), 3);
        assert_eq!(cursor_delta(3, 0), 1);
        assert_eq!(cursor_delta(2, 1), 3);
        assert_eq!(cursor_delta(5, 2), 1);
    }
}
