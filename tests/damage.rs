use max_lair::ai::damage::{
    ability_modifier, average_team_damage, expected_damage, max_move_power, type_effectiveness,
};
use max_lair::data::species::StatusCondition;
use max_lair::data::type_chart::ALL_TYPES;
use max_lair::{BaseStats, Combatant, Move, MoveCategory, Pokemon, PokemonType};

const STATS: BaseStats = BaseStats {
    hp: 90,
    atk: 100,
    def: 85,
    spa: 100,
    spd: 85,
    spe: 80,
};

fn physical(name: &str, move_type: PokemonType, base_power: u32) -> Move {
    Move::new(name, move_type, MoveCategory::Physical, base_power, 1.0, 10)
}

fn special(name: &str, move_type: PokemonType, base_power: u32) -> Move {
    Move::new(name, move_type, MoveCategory::Special, base_power, 1.0, 10)
}

fn make_pokemon(
    name: &str,
    ability: &str,
    types: (PokemonType, Option<PokemonType>),
    moves: Vec<Move>,
) -> Pokemon {
    let max_moves = moves
        .iter()
        .map(|m| Move::new(format!("Max {}", m.name), m.move_type, m.category, max_move_power(m), 1.0, m.pp))
        .collect();
    Pokemon::new(name, ability, types, STATS, moves, max_moves, 65)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn type_chart_multipliers() {
    assert_eq!(type_effectiveness(PokemonType::Fire, Some(PokemonType::Grass)), 2.0);
    assert_eq!(type_effectiveness(PokemonType::Water, Some(PokemonType::Fire)), 2.0);
    assert_eq!(type_effectiveness(PokemonType::Electric, Some(PokemonType::Ground)), 0.0);
    for attack in ALL_TYPES {
        assert_eq!(type_effectiveness(attack, None), 1.0);
    }
}

#[test]
fn both_defending_types_apply() {
    let attacker = make_pokemon(
        "Heatran",
        "Flash Fire",
        (PokemonType::Steel, None),
        vec![special("Flamethrower", PokemonType::Fire, 90)],
    );
    let grass = make_pokemon("Tangela", "Chlorophyll", (PokemonType::Grass, None), Vec::new());
    let grass_bug = make_pokemon("Parasect", "Dry Skin", (PokemonType::Bug, Some(PokemonType::Grass)), Vec::new());
    let single = expected_damage(Combatant::new(&attacker), 0, &grass, false);
    let double = expected_damage(Combatant::new(&attacker), 0, &grass_bug, false);
    // Dry Skin doubles fire on top of the 4x weakness.
    assert!(close(double, single * 4.0));
}

#[test]
fn same_type_bonus_and_adaptability() {
    let moves = vec![
        physical("Waterfall", PokemonType::Water, 80),
        physical("Body Slam", PokemonType::Normal, 80),
    ];
    let defender = make_pokemon("Snorlax", "Thick Fat", (PokemonType::Normal, None), Vec::new());
    let target = make_pokemon("Dummy", "", (PokemonType::Psychic, None), Vec::new());

    let plain = make_pokemon("Vaporeon", "Water Absorb", (PokemonType::Water, None), moves.clone());
    let stab = expected_damage(Combatant::new(&plain), 0, &target, false);
    let neutral = expected_damage(Combatant::new(&plain), 1, &target, false);
    assert!(close(stab, neutral * 1.5));

    let adapt = make_pokemon("Crawdaunt", "Adaptability", (PokemonType::Water, None), moves);
    let boosted = expected_damage(Combatant::new(&adapt), 0, &target, false);
    assert!(close(boosted, neutral * 2.0));
    assert!(expected_damage(Combatant::new(&adapt), 0, &defender, false) > 0.0);
}

#[test]
fn levitate_blocks_ground_unless_broken() {
    let levitating = make_pokemon("Bronzong", "Levitate", (PokemonType::Steel, Some(PokemonType::Psychic)), Vec::new());
    let digger = make_pokemon(
        "Dugtrio",
        "Arena Trap",
        (PokemonType::Ground, None),
        vec![physical("Earthquake", PokemonType::Ground, 100)],
    );
    assert_eq!(ability_modifier(&digger, 0, &levitating), 0.0);
    assert_eq!(expected_damage(Combatant::new(&digger), 0, &levitating, false), 0.0);

    let breaker = make_pokemon(
        "Excadrill",
        "Mold Breaker",
        (PokemonType::Ground, Some(PokemonType::Steel)),
        vec![physical("Earthquake", PokemonType::Ground, 100)],
    );
    assert_eq!(ability_modifier(&breaker, 0, &levitating), 1.0);
    assert!(expected_damage(Combatant::new(&breaker), 0, &levitating, false) > 0.0);
}

#[test]
fn thousand_arrows_hits_flying_and_levitating_targets() {
    let zygarde = make_pokemon(
        "Zygarde",
        "Aura Break",
        (PokemonType::Dragon, Some(PokemonType::Ground)),
        vec![
            physical("Thousand Arrows", PokemonType::Ground, 90),
            physical("Earthquake", PokemonType::Ground, 90),
        ],
    );
    let bird = make_pokemon("Corviknight", "Pressure", (PokemonType::Flying, Some(PokemonType::Steel)), Vec::new());
    assert_eq!(expected_damage(Combatant::new(&zygarde), 1, &bird, false), 0.0);
    let arrows = expected_damage(Combatant::new(&zygarde), 0, &bird, false);
    assert!(arrows > 0.0);

    let levitating = make_pokemon("Gengar", "Levitate", (PokemonType::Ghost, Some(PokemonType::Poison)), Vec::new());
    assert_eq!(ability_modifier(&zygarde, 0, &levitating), 1.0);
    assert_eq!(ability_modifier(&zygarde, 1, &levitating), 0.0);
}

#[test]
fn burn_halves_physical_damage_only() {
    let moves = vec![
        physical("Crunch", PokemonType::Dark, 80),
        special("Dark Pulse", PokemonType::Dark, 80),
    ];
    let healthy = make_pokemon("Tyranitar", "Sand Stream", (PokemonType::Rock, None), moves.clone());
    let mut burned = healthy.clone();
    burned.status = Some(StatusCondition::Burn);
    let target = make_pokemon("Dummy", "", (PokemonType::Normal, None), Vec::new());

    let physical_ratio = expected_damage(Combatant::new(&burned), 0, &target, false)
        / expected_damage(Combatant::new(&healthy), 0, &target, false);
    assert!(close(physical_ratio, 0.5));
    assert!(close(
        expected_damage(Combatant::new(&burned), 1, &target, false),
        expected_damage(Combatant::new(&healthy), 1, &target, false)
    ));
}

#[test]
fn spread_moves_lose_power_against_several_targets() {
    let user = make_pokemon(
        "Mamoswine",
        "Oblivious",
        (PokemonType::Ice, None),
        vec![physical("Rock Slide", PokemonType::Rock, 75).spread(true)],
    );
    let target = make_pokemon("Dummy", "", (PokemonType::Normal, None), Vec::new());
    let single = expected_damage(Combatant::new(&user), 0, &target, false);
    let spread = expected_damage(Combatant::new(&user), 0, &target, true);
    assert!(close(spread, single * 0.75));
}

#[test]
fn damage_grows_with_power() {
    let user = make_pokemon(
        "Machamp",
        "No Guard",
        (PokemonType::Fighting, None),
        vec![
            physical("Low Kick", PokemonType::Fighting, 40),
            physical("Cross Chop", PokemonType::Fighting, 100),
            physical("Focus Punch", PokemonType::Fighting, 150),
        ],
    );
    let target = make_pokemon("Dummy", "", (PokemonType::Normal, None), Vec::new());
    let damage: Vec<f64> = (0..3)
        .map(|i| expected_damage(Combatant::new(&user), i, &target, false))
        .collect();
    assert!(damage[0] < damage[1]);
    assert!(damage[1] < damage[2]);
}

#[test]
fn damage_grows_with_the_offense_stat() {
    let moves = vec![
        physical("Body Slam", PokemonType::Normal, 85),
        special("Hyper Voice", PokemonType::Normal, 90),
    ];
    let target = make_pokemon("Dummy", "", (PokemonType::Water, None), Vec::new());
    let weak = make_pokemon("Weak", "", (PokemonType::Normal, None), moves.clone());
    let mut strong = weak.clone();
    strong.stats.atk += 40;
    strong.stats.spa += 40;
    for i in 0..2 {
        assert!(
            expected_damage(Combatant::new(&strong), i, &target, false)
                > expected_damage(Combatant::new(&weak), i, &target, false)
        );
    }
}

#[test]
fn dynamaxed_attacker_uses_max_moves() {
    let user = make_pokemon(
        "Charizard",
        "Blaze",
        (PokemonType::Fire, Some(PokemonType::Flying)),
        vec![special("Ember", PokemonType::Fire, 40)],
    );
    let target = make_pokemon("Dummy", "", (PokemonType::Normal, None), Vec::new());
    assert_eq!(Combatant::dynamaxed(&user).move_at(0).map(|m| m.base_power), Some(90));
    assert!(
        expected_damage(Combatant::dynamaxed(&user), 0, &target, false)
            > expected_damage(Combatant::new(&user), 0, &target, false)
    );
}

#[test]
fn max_move_power_steps() {
    let fighting = |bp| max_move_power(&physical("", PokemonType::Fighting, bp));
    let fire = |bp| max_move_power(&special("", PokemonType::Fire, bp));
    assert_eq!(fire(5), 0);
    assert_eq!(fire(40), 90);
    assert_eq!(fire(60), 110);
    assert_eq!(fire(100), 130);
    assert_eq!(fire(141), 150);
    assert_eq!(fighting(40), 70);
    assert_eq!(fighting(75), 90);
    assert_eq!(fighting(150), 100);
    assert_eq!(max_move_power(&physical("", PokemonType::Poison, 50)), 75);
}

#[test]
fn missing_move_or_empty_side_scores_zero() {
    let user = make_pokemon("Dummy", "", (PokemonType::Normal, None), Vec::new());
    let target = make_pokemon("Target", "", (PokemonType::Normal, None), Vec::new());
    assert_eq!(expected_damage(Combatant::new(&user), 0, &target, false), 0.0);
    assert_eq!(average_team_damage(&[&user], &[&target], false), 0.0);
    assert_eq!(average_team_damage(&[], &[&target], false), 0.0);
}

#[test]
fn team_damage_is_the_mean_move_damage() {
    let user = make_pokemon(
        "Lapras",
        "Shell Armor",
        (PokemonType::Water, Some(PokemonType::Ice)),
        vec![
            special("Surf", PokemonType::Water, 90).spread(true),
            special("Ice Beam", PokemonType::Ice, 90),
        ],
    );
    let target = make_pokemon("Dummy", "", (PokemonType::Normal, None), Vec::new());
    let combatant = Combatant::new(&user);
    let expected = (expected_damage(combatant, 0, &target, true) + expected_damage(combatant, 1, &target, true)) / 2.0;
    assert!(close(average_team_damage(&[&user], &[&target], true), expected));
}
