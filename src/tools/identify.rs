use crate::data::species::{Pokemon, Roster};
use strsim::levenshtein;

fn strip_newlines(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Matches OCR output to the nearest rental by edit distance.
///
/// The ability and type strings join the comparison only when non-empty. A
/// poor match is logged but still returned; `None` only for an empty roster.
pub fn identify_pokemon<'a>(rentals: &'a Roster, name: &str, ability: &str, types: &str) -> Option<&'a Pokemon> {
    let text = format!(
        "{}{}{}",
        strip_newlines(name),
        strip_newlines(ability),
        strip_newlines(types)
    );
    let mut best: Option<(&Pokemon, usize, String)> = None;
    for pokemon in rentals.values() {
        let mut candidate = pokemon.species_name().to_string();
        if !ability.is_empty() {
            candidate.push_str(&pokemon.ability);
        }
        if !types.is_empty() {
            candidate.push_str(pokemon.types.0.name());
            if let Some(second) = pokemon.types.1 {
                candidate.push_str(second.name());
            }
        }
        let distance = levenshtein(&text, &candidate);
        if best.as_ref().map_or(true, |(_, d, _)| distance < *d) {
            best = Some((pokemon, distance, candidate));
        }
    }
    let (pokemon, distance, matched) = best?;
    if distance as f64 > text.chars().count() as f64 / 3.0 {
        log::warn!("Could not find a good match for Pokemon: \"{}\"", text);
    }
    log::debug!(
        "OCRed Pokemon {} matched to rental Pokemon {} with distance of {}",
        text,
        matched,
        distance
    );
    Some(pokemon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::species::BaseStats;
    use crate::data::type_chart::PokemonType;

    fn rental(name: &str, ability: &str, types: (PokemonType, Option<PokemonType>)) -> Pokemon {
        Pokemon::new(name, ability, types, BaseStats::default(), Vec::new(), Vec::new(), 65)
    }

    fn roster() -> Roster {
        [
            rental("Swampert", "Torrent", (PokemonType::Water, Some(PokemonType::Ground))),
            rental("Lycanroc (Midnight)", "Keen Eye", (PokemonType::Rock, None)),
            rental("Lycanroc (Midday)", "Sand Rush", (PokemonType::Rock, None)),
        ]
        .into_iter()
        .map(|p| (p.name.clone(), p))
        .collect()
    }

    #[test]
    fn picks_nearest_name() {
        let roster = roster();
        let found = identify_pokemon(&roster, "Swampcrt\n", "", "").expect("match");
        assert_eq!(found.name, "Swampert");
    }

    #[test]
    fn ability_separates_forms() {
        let roster = roster();
        let found = identify_pokemon(&roster, "Lycanroc", "Sand Rush", "").expect("match");
        assert_eq!(found.name, "Lycanroc (Midday)");
    }

    #[test]
    fn empty_roster_has_no_match() {
        assert!(identify_pokemon(&Roster::new(), "Swampert", "", "").is_none());
    }
}
