pub mod backpacker;
pub mod battle;
pub mod catch;
pub mod detect;
pub mod initialize;
pub mod join;
pub mod path;
pub mod scientist;
pub mod select_pokemon;

use crate::core::controller::{Stage, StageContext, Step};
use crate::data::species::Pokemon;
use crate::io::device::Button;
use crate::tools::identify::identify_pokemon;

/// A substage that only presses a button at a fixed time: (substage, wait, button).
pub type Scripted = (u16, f64, Button);

pub fn step(stage: Stage, substage: u16) -> Option<Step> {
    match stage {
        Stage::Initialize => initialize::step(substage),
        Stage::Join => join::step(substage),
        Stage::Path => path::step(substage),
        Stage::Detect => detect::step(substage),
        Stage::Battle => battle::step(substage),
        Stage::Catch => catch::step(substage),
        Stage::Backpacker => backpacker::step(substage),
        Stage::Scientist => scientist::step(substage),
        Stage::SelectPokemon => select_pokemon::step(substage),
        Stage::Done => None,
    }
}

pub(crate) fn scripted_wait(script: &[Scripted], substage: u16) -> Option<f64> {
    script.iter().find(|(s, _, _)| *s == substage).map(|(_, wait, _)| *wait)
}

pub(crate) fn scripted_button(script: &[Scripted], substage: u16) -> Option<Button> {
    script.iter().find(|(s, _, _)| *s == substage).map(|(_, _, b)| *b)
}

/// Matches OCR text to a rental and returns an owned copy of it.
pub(crate) fn identify(ctx: &StageContext<'_>, name: &str, ability: &str, types: &str) -> Option<Pokemon> {
    let found = identify_pokemon(&ctx.data.rentals, name.trim(), ability.trim(), types.trim()).cloned();
    if found.is_none() {
        log::warn!("No rental Pokemon to match \"{}\" against", name.trim());
    }
    found
}

/// "FIRE" -> "Fire", as type labels are shown in capitals.
pub(crate) fn title_case(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case(" GROUND\n"), "Ground");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn every_stage_but_done_starts_somewhere() {
        for stage in [
            Stage::Initialize,
            Stage::Join,
            Stage::Path,
            Stage::Detect,
            Stage::Battle,
            Stage::Catch,
            Stage::Backpacker,
            Stage::Scientist,
            Stage::SelectPokemon,
        ] {
            assert!(step(stage, 0).is_some(), "{} has no substage 0", stage);
        }
        assert!(step(Stage::Done, 0).is_none());
    }
}
