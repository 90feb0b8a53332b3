//! Setup constants and the era lifecycle end to end.

use brass_engine::{
    Action, ActionError, BuildingKind, Era, EraError, Game, PlayerId, RuleViolation, TownId,
};

/// Move every card (hands included) into the discard pile.
fn exhaust(game: &mut Game) {
    for player in game.players.player_ids().collect::<Vec<_>>() {
        let held: Vec<_> = game.players[player].hand().iter().map(|c| c.id).collect();
        for id in held {
            game.discard_card(player, id).unwrap();
        }
    }
    while let Some(card) = game.deck.draw() {
        game.deck.discard(card);
    }
}

#[test]
fn test_setup_by_player_count() {
    for (players, undrawn) in [(2, 24), (3, 30), (4, 32)] {
        let game = Game::new(players, 1);

        assert_eq!(game.players.player_count(), players);
        assert_eq!(game.deck.remaining(), undrawn);
        assert_eq!(game.board.era, Era::Canal);
        assert_eq!(game.board.coal_market.remaining(), 13);
        assert_eq!(game.board.iron_market.remaining(), 8);
        assert_eq!(game.board.coal_market.unit_price(), 1);
        assert_eq!(game.board.iron_market.unit_price(), 2);

        for (_, state) in game.players.iter() {
            assert_eq!(state.money, 17);
            assert_eq!(state.income, 10);
            assert_eq!(state.income_level(), 0);
            assert_eq!(state.link_tokens, 14);
            assert_eq!(state.hand().len(), 8);
            assert_eq!(state.tile_count(), 44);
        }
    }
}

#[test]
fn test_era_cannot_end_early() {
    let mut game = Game::new(2, 2);
    assert!(matches!(
        game.end_canal_era(),
        Err(EraError::DeckNotExhausted(24))
    ));

    while game.deck.draw().is_some() {}
    assert!(matches!(game.end_canal_era(), Err(EraError::HandsNotEmpty(_))));
    assert!(matches!(game.end_rail_era(), Err(EraError::NotRailEra)));
}

#[test]
fn test_full_era_cycle() {
    let mut game = Game::new(2, 2);
    game.players[PlayerId::new(0)].money = 4;

    exhaust(&mut game);
    game.end_canal_era().unwrap();

    assert_eq!(game.board.era, Era::Rail);
    assert_eq!(game.deck.remaining(), 24);
    // Cash carries into the rail era.
    assert_eq!(game.players[PlayerId::new(0)].money, 4);
    for (_, state) in game.players.iter() {
        assert_eq!(state.hand().len(), 8);
        assert_eq!(state.link_tokens, 14);
    }

    exhaust(&mut game);
    let winner = game.end_rail_era().unwrap();
    assert!(winner.index() < 2);
}

#[test]
fn test_era_gates_flip_between_eras() {
    let mut game = Game::new(2, 2);
    let player = game.active_player();
    let goods = game.players[player].lowest_unplaced(BuildingKind::Goods).unwrap();
    let pottery5 = game.players[player]
        .tiles()
        .find(|(_, b)| b.kind == BuildingKind::Pottery && b.rail_only)
        .map(|(id, _)| id)
        .unwrap();

    // The rail-only tier-5 pottery cannot be built in the canal era; the
    // canal-only tier-1 goods factory dies with it.
    let slot = game.board.town(TownId::new(1)).locations()[1];
    let build_pottery = Action::Build { building: pottery5, location: slot };
    assert!(!game.is_legal(&build_pottery));

    exhaust(&mut game);
    game.end_canal_era().unwrap();

    let build_goods = Action::Build {
        building: goods,
        location: game.board.town(TownId::new(0)).locations()[0],
    };
    assert!(matches!(
        game.check(&build_goods),
        Err(ActionError::Illegal(RuleViolation::WrongEra))
    ));
}

#[test]
fn test_rail_era_keeps_committed_points() {
    let mut game = Game::new(2, 2);
    let p0 = PlayerId::new(0);
    game.players[p0].victory_points = 9;

    exhaust(&mut game);
    game.end_canal_era().unwrap();
    assert_eq!(game.players[p0].victory_points, 9);

    exhaust(&mut game);
    game.players[p0].money += 100;
    let winner = game.end_rail_era().unwrap();
    assert_eq!(winner, p0);
    assert_eq!(game.players[p0].victory_points, 9);
}
