//! Direct activation tests.
//!
//! Every refused activation must leave the grid snapshot unchanged.

use terra_futura::actions::{DirectActionProcessor, Rejection, Transaction};
use terra_futura::cards::{Card, CardId};
use terra_futura::core::{PlayerId, Position, Resource::*, ResourceBag};
use terra_futura::effects::Effect;
use terra_futura::grid::Grid;

const X: Position = Position::ORIGIN;
const SOURCE: Position = Position::new(1, 0);
const X_ID: CardId = CardId::new(1);

/// Card X at the origin with secondary `Fixed([RED],[CAR],0)` and an input
/// card below it holding `source`.
fn scenario_grid(source: &[terra_futura::core::Resource]) -> Grid {
    let mut grid = Grid::new(PlayerId::new(0));
    grid.put_card(
        X,
        Card::new(X_ID, 1).with_secondary(Effect::fixed([Red], [Car], 0)),
    )
    .unwrap();
    grid.put_card(
        SOURCE,
        Card::new(CardId::new(2), 1).with_resources(ResourceBag::from(source)),
    )
    .unwrap();
    grid.set_activatable(X);
    grid.set_activatable(SOURCE);
    grid
}

fn red_for_car() -> Transaction {
    Transaction::new(X_ID).input(Red, SOURCE).output(Car, X)
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn test_scenario_a_secondary_effect_succeeds() {
    let mut grid = scenario_grid(&[Red]);

    assert!(DirectActionProcessor::activate(&mut grid, &red_for_car()).unwrap());

    assert_eq!(grid.card_at(X).unwrap().resources(), &ResourceBag::from([Car]));
    assert!(grid.card_at(SOURCE).unwrap().resources().is_empty());
}

#[test]
fn test_scenario_b_missing_input_changes_nothing() {
    let mut grid = scenario_grid(&[]);
    let before = grid.snapshot();

    assert_eq!(
        DirectActionProcessor::check(&grid, &red_for_car()),
        Err(Rejection::InsufficientSource(SOURCE))
    );
    assert!(!DirectActionProcessor::activate(&mut grid, &red_for_car()).unwrap());
    assert_eq!(grid.snapshot(), before);
}

// =============================================================================
// Validation steps
// =============================================================================

#[test]
fn test_card_must_be_activatable() {
    let mut grid = scenario_grid(&[Red]);
    grid.mark_activated(X);
    let before = grid.snapshot();

    assert_eq!(
        DirectActionProcessor::check(&grid, &red_for_car()),
        Err(Rejection::NotActivatable(X))
    );
    assert!(!DirectActionProcessor::activate(&mut grid, &red_for_car()).unwrap());
    assert_eq!(grid.snapshot(), before);
}

#[test]
fn test_unknown_input_source() {
    let grid = scenario_grid(&[Red]);
    let tx = Transaction::new(X_ID)
        .input(Red, Position::new(-1, 0))
        .output(Car, X);

    assert_eq!(
        DirectActionProcessor::check(&grid, &tx),
        Err(Rejection::MissingSource(Position::new(-1, 0)))
    );
}

#[test]
fn test_inputs_grouped_per_source() {
    let mut grid = Grid::new(PlayerId::new(0));
    grid.put_card(
        X,
        Card::new(X_ID, 0).with_primary(Effect::fixed([Red, Red], [Gear], 0)),
    )
    .unwrap();
    grid.put_card(SOURCE, Card::new(CardId::new(2), 0).with_resources([Red]))
        .unwrap();
    grid.set_activatable(X);
    grid.set_activatable(SOURCE);

    // Two REDs from a card holding one: the grouped check catches it.
    let tx = Transaction::new(X_ID)
        .input(Red, SOURCE)
        .input(Red, SOURCE)
        .output(Gear, X);
    assert_eq!(
        DirectActionProcessor::check(&grid, &tx),
        Err(Rejection::InsufficientSource(SOURCE))
    );
}

#[test]
fn test_pollution_target_must_be_activatable() {
    let mut grid = Grid::new(PlayerId::new(0));
    grid.put_card(
        X,
        Card::new(X_ID, 1).with_primary(Effect::fixed(ResourceBag::new(), [Bulb], 1)),
    )
    .unwrap();
    grid.put_card(SOURCE, Card::new(CardId::new(2), 1)).unwrap();
    grid.set_activatable(X);

    let tx = Transaction::new(X_ID).output(Bulb, X).pollute(SOURCE);
    assert_eq!(
        DirectActionProcessor::check(&grid, &tx),
        Err(Rejection::PollutionTargetNotActivatable(SOURCE))
    );

    grid.set_activatable(SOURCE);
    assert!(DirectActionProcessor::activate(&mut grid, &tx).unwrap());
    assert_eq!(grid.card_at(SOURCE).unwrap().pollution(), 1);
    assert_eq!(grid.card_at(X).unwrap().resources(), &ResourceBag::from([Bulb]));
}

#[test]
fn test_one_pollution_unit_per_target_entry() {
    let mut grid = Grid::new(PlayerId::new(0));
    grid.put_card(
        X,
        Card::new(X_ID, 3).with_primary(Effect::fixed(ResourceBag::new(), [Car], 2)),
    )
    .unwrap();
    grid.set_activatable(X);

    let tx = Transaction::new(X_ID).output(Car, X).pollute(X).pollute(X);
    assert!(DirectActionProcessor::activate(&mut grid, &tx).unwrap());
    assert_eq!(grid.card_at(X).unwrap().pollution(), 2);
}

#[test]
fn test_capacity_rejection_is_atomic() {
    let mut grid = Grid::new(PlayerId::new(0));
    grid.put_card(
        X,
        Card::new(X_ID, 1).with_primary(Effect::fixed([Red], [Car], 2)),
    )
    .unwrap();
    grid.put_card(SOURCE, Card::new(CardId::new(2), 0).with_resources([Red]))
        .unwrap();
    grid.set_activatable(X);
    grid.set_activatable(SOURCE);
    let before = grid.snapshot();

    // Two units onto a card with room for one: the input must stay put.
    let tx = Transaction::new(X_ID)
        .input(Red, SOURCE)
        .output(Car, X)
        .pollute(X)
        .pollute(X);
    assert!(!DirectActionProcessor::activate(&mut grid, &tx).unwrap());
    assert_eq!(grid.snapshot(), before);
}

#[test]
fn test_or_effect_alternatives() {
    let mut grid = Grid::new(PlayerId::new(0));
    grid.put_card(
        X,
        Card::new(X_ID, 0)
            .with_resources([Green, Yellow])
            .with_primary(Effect::or([
                Effect::fixed([Green], [Bulb], 0),
                Effect::arbitrary(1, [Gear], 0),
            ])),
    )
    .unwrap();
    grid.set_activatable(X);

    let tx = Transaction::new(X_ID).input(Yellow, X).output(Gear, X);
    assert!(DirectActionProcessor::activate(&mut grid, &tx).unwrap());
    assert_eq!(
        grid.card_at(X).unwrap().resources(),
        &ResourceBag::from([Green, Gear])
    );
}
