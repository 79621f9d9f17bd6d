//! End-to-end rule scenarios against the public engine API.

use gambit_engine::{
    Abilities, Candidate, Color, GambitInvariants, Game, GameStatus, InvariantSet, Piece, PieceId,
    PieceKind, RuleSet, Square, SquareOutcome, UpgradeError, UpgradeResponse, generate_moves,
};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

fn id_at(game: &Game, row: u8, col: u8) -> PieceId {
    game.state().pieces().at(sq(row, col)).unwrap().id()
}

fn piece(id: u16, kind: PieceKind, color: Color, row: u8, col: u8) -> Piece {
    Piece::new(PieceId::new(id), kind, color, sq(row, col))
}

fn kings() -> Vec<Piece> {
    vec![
        piece(100, PieceKind::King, Color::White, 7, 7),
        piece(101, PieceKind::King, Color::Black, 0, 7),
    ]
}

fn custom(mut pieces: Vec<Piece>) -> Game {
    pieces.extend(kings());
    let mut game = Game::from_pieces(pieces, RuleSet::default()).expect("valid layout");
    assert!(game.start_game());
    game
}

#[test]
fn test_pawn_double_advance_from_start() {
    let mut game = Game::new();
    game.start_game();
    let pawn = id_at(&game, 6, 0);

    assert_eq!(game.select_square(sq(6, 0)), SquareOutcome::Selected(pawn));
    let outcome = game.select_square(sq(4, 0));

    assert!(matches!(outcome, SquareOutcome::Moved(report) if report.to == sq(4, 0)));
    assert_eq!(game.state().pieces().get(pawn).unwrap().square(), sq(4, 0));
    assert_eq!(game.state().turn(), Color::Black);
}

#[test]
fn test_black_knight_opening_moves() {
    let game = Game::new();
    let knight = game.state().pieces().at(sq(0, 1)).unwrap();
    let mut moves = generate_moves(knight, game.state().pieces());
    moves.sort_by_key(|c| c.to.col());
    assert_eq!(
        moves,
        vec![
            Candidate {
                to: sq(2, 0),
                capture: false
            },
            Candidate {
                to: sq(2, 2),
                capture: false
            },
        ]
    );
}

#[test]
fn test_jumper_queen_passes_friendly_pawn() {
    let queen = piece(0, PieceKind::Queen, Color::White, 4, 0).with_abilities(Abilities {
        jumper: true,
        ..Abilities::default()
    });
    let pawn = piece(1, PieceKind::Pawn, Color::White, 4, 1);
    let rook = piece(2, PieceKind::Rook, Color::Black, 4, 3);
    let mut game = custom(vec![queen, pawn, rook]);

    game.select_square(sq(4, 0));
    let moves = game.state().legal_moves();
    assert!(moves.contains(&Candidate {
        to: sq(4, 2),
        capture: false
    }));
    assert!(moves.contains(&Candidate {
        to: sq(4, 3),
        capture: true
    }));
    assert!(!moves.iter().any(|c| c.to == sq(4, 1)));

    let outcome = game.select_square(sq(4, 3));
    assert!(matches!(outcome, SquareOutcome::Moved(report) if report.captured.is_some()));
    assert_eq!(game.state().points().get(Color::White), 25);
}

#[test]
fn test_plain_queen_is_blocked_by_friendly_pawn() {
    let queen = piece(0, PieceKind::Queen, Color::White, 4, 0);
    let pawn = piece(1, PieceKind::Pawn, Color::White, 4, 1);
    let rook = piece(2, PieceKind::Rook, Color::Black, 4, 3);
    let mut game = custom(vec![queen, pawn, rook]);

    game.select_square(sq(4, 0));
    assert!(!game.state().legal_moves().iter().any(|c| c.to.row() == 4));
}

#[test]
fn test_shield_absorbs_first_capture_only() {
    let rook = piece(0, PieceKind::Rook, Color::White, 4, 0);
    let pawn = piece(1, PieceKind::Pawn, Color::Black, 4, 5).with_abilities(Abilities {
        shield: true,
        ..Abilities::default()
    });
    let mut game = custom(vec![rook, pawn]);

    game.select_square(sq(4, 0));
    let outcome = game.select_square(sq(4, 5));

    assert_eq!(
        outcome,
        SquareOutcome::Shielded {
            attacker: PieceId::new(0),
            defender: PieceId::new(1)
        }
    );
    let state = game.state();
    assert!(!state.pieces().get(PieceId::new(1)).unwrap().abilities().shield);
    assert_eq!(state.pieces().get(PieceId::new(1)).unwrap().square(), sq(4, 5));
    assert_eq!(state.pieces().get(PieceId::new(0)).unwrap().square(), sq(4, 0));
    assert_eq!(state.turn(), Color::White);
    assert_eq!(state.selection(), Some(PieceId::new(0)));
    assert!(state.legal_moves().contains(&Candidate {
        to: sq(4, 5),
        capture: true
    }));
    assert_eq!(state.points().get(Color::White), 20);

    let outcome = game.select_square(sq(4, 5));
    assert!(matches!(outcome, SquareOutcome::Moved(report) if report.awarded == 1));
    assert!(game.state().pieces().get(PieceId::new(1)).is_none());
    assert_eq!(game.state().points().get(Color::White), 21);
    assert_eq!(game.state().turn(), Color::Black);
}

#[test]
fn test_promotion_refused_without_points() {
    let rules = RuleSet {
        starting_points: 5,
        ..RuleSet::default()
    };
    let mut game = Game::with_rules(rules);
    let pawn = id_at(&game, 6, 0);
    let before = game.state().clone();

    let result = game.apply_upgrade(pawn, "promotePawn");

    assert_eq!(result, Err(UpgradeError::InsufficientFunds));
    assert_eq!(
        UpgradeResponse::from(result),
        UpgradeResponse {
            ok: false,
            message: Some("Not enough points".to_string())
        }
    );
    assert_eq!(game.state(), &before);
}

#[test]
fn test_upgrade_debits_exact_cost() {
    let mut game = Game::new();
    let pawn = id_at(&game, 6, 3);

    game.apply_upgrade(pawn, "shield").unwrap();

    let state = game.state();
    assert_eq!(state.points().get(Color::White), 10);
    assert_eq!(state.points().get(Color::Black), 20);
    assert_eq!(
        *state.pieces().get(pawn).unwrap().abilities(),
        Abilities {
            shield: true,
            ..Abilities::default()
        }
    );
}

#[test]
fn test_promotion_keeps_earlier_abilities() {
    let mut game = Game::new();
    let pawn = id_at(&game, 1, 2);

    game.apply_upgrade(pawn, "shield").unwrap();
    game.apply_upgrade(pawn, "promotePawn").unwrap();

    let promoted = game.state().pieces().get(pawn).unwrap();
    assert_eq!(promoted.kind(), PieceKind::Knight);
    assert!(promoted.abilities().shield);
    assert_eq!(game.state().points().get(Color::Black), 2);
}

#[test]
fn test_upgrade_failures_change_nothing() {
    let mut game = Game::new();
    game.start_game();
    let black_pawn = id_at(&game, 1, 0);
    let white_rook = id_at(&game, 7, 0);
    let before = game.state().clone();

    assert_eq!(
        game.apply_upgrade(white_rook, "fireball"),
        Err(UpgradeError::InvalidUpgrade("fireball".to_string()))
    );
    assert_eq!(
        game.apply_upgrade(PieceId::new(999), "shield"),
        Err(UpgradeError::PieceNotFound(PieceId::new(999)))
    );
    assert_eq!(
        game.apply_upgrade(black_pawn, "shield"),
        Err(UpgradeError::NotYourTurn)
    );
    assert_eq!(
        game.apply_upgrade(white_rook, "promotePawn"),
        Err(UpgradeError::UpgradeNotApplicable)
    );
    assert_eq!(game.state(), &before);
}

#[test]
fn test_pregame_upgrades_ignore_turn() {
    let mut game = Game::new();
    let black_knight = id_at(&game, 0, 1);
    assert!(game.apply_upgrade(black_knight, "addKnightMove").is_ok());
    assert_eq!(game.state().points().get(Color::Black), 8);
}

#[test]
fn test_upgrade_refreshes_selected_moves() {
    let mut game = Game::new();
    game.start_game();
    let rook = id_at(&game, 7, 0);

    game.select_square(sq(7, 0));
    assert!(game.state().legal_moves().is_empty());

    game.apply_upgrade(rook, "addKnightMove").unwrap();
    assert_eq!(
        game.state().legal_moves(),
        &[Candidate {
            to: sq(5, 1),
            capture: false
        }]
    );
}

#[test]
fn test_teleport_is_one_shot() {
    let mut game = Game::new();
    let bishop = id_at(&game, 7, 2);
    game.apply_upgrade(bishop, "teleportOnce").unwrap();
    assert_eq!(game.state().points().get(Color::White), 0);
    game.start_game();

    game.select_square(sq(7, 2));
    assert!(game.can_teleport());
    let report = game.teleport(sq(4, 4)).expect("teleport allowed");
    assert_eq!(report.from, sq(7, 2));
    assert_eq!(game.state().turn(), Color::Black);
    assert_eq!(game.state().selection(), None);

    let moved = game.state().pieces().get(bishop).unwrap();
    assert_eq!(moved.square(), sq(4, 4));
    assert!(moved.has_moved());
    assert!(moved.abilities().teleport_used);

    game.select_square(sq(1, 0));
    game.select_square(sq(2, 0));

    game.select_square(sq(4, 4));
    assert!(!game.can_teleport());
    let before = game.state().clone();
    assert_eq!(game.teleport(sq(3, 3)), None);
    assert_eq!(game.state(), &before);
}

#[test]
fn test_teleport_rejects_occupied_and_unstarted() {
    let mut game = Game::new();
    let queen = id_at(&game, 7, 3);
    game.apply_upgrade(queen, "teleportOnce").unwrap();

    assert_eq!(game.teleport(sq(4, 4)), None);

    game.start_game();
    game.select_square(sq(7, 3));
    let before = game.state().clone();
    assert_eq!(game.teleport(sq(1, 1)), None);
    assert_eq!(game.state(), &before);
}

#[test]
fn test_king_capture_ends_game_with_bonus() {
    let queen = piece(0, PieceKind::Queen, Color::White, 4, 4);
    let rook = piece(1, PieceKind::Rook, Color::Black, 3, 0);
    let mut pieces = vec![queen, rook];
    pieces.push(piece(100, PieceKind::King, Color::White, 7, 7));
    pieces.push(piece(101, PieceKind::King, Color::Black, 0, 4));
    let mut game = Game::from_pieces(pieces, RuleSet::default()).unwrap();
    game.start_game();

    game.select_square(sq(4, 4));
    let outcome = game.select_square(sq(0, 4));

    let SquareOutcome::Moved(report) = outcome else {
        panic!("expected a move, got {:?}", outcome);
    };
    assert_eq!(report.winner, Some(Color::White));
    assert_eq!(report.awarded, 30);
    assert_eq!(game.state().points().get(Color::White), 50);
    assert_eq!(game.state().status(), GameStatus::GameOver { winner: Color::White });
    assert_eq!(game.state().turn(), Color::White);

    let before = game.state().clone();
    assert_eq!(game.select_square(sq(3, 0)), SquareOutcome::Ignored);
    assert_eq!(
        game.apply_upgrade(PieceId::new(1), "shield"),
        Err(UpgradeError::GameOver)
    );
    assert!(!game.start_game());
    assert_eq!(game.state(), &before);

    game.reset_game();
    assert_eq!(game.state().status(), GameStatus::PreGame);
    assert_eq!(game.state().pieces().len(), 32);
    assert_eq!(game.state().points().get(Color::White), 20);
}

#[test]
fn test_capture_awards_material_value() {
    let rook = piece(0, PieceKind::Rook, Color::White, 4, 0);
    let queen = piece(1, PieceKind::Queen, Color::Black, 4, 6);
    let mut game = custom(vec![rook, queen]);

    game.select_square(sq(4, 0));
    game.select_square(sq(4, 6));

    assert_eq!(game.state().points().get(Color::White), 29);
    assert_eq!(game.state().points().get(Color::Black), 20);
}

#[test]
fn test_every_legal_move_lands_and_keeps_invariants() {
    let mut game = Game::new();
    game.start_game();

    for ply in 0..80 {
        if game.state().winner().is_some() {
            break;
        }
        let turn = game.state().turn();
        let mut ids: Vec<_> = game.state().pieces().of_color(turn).map(|p| p.id()).collect();
        ids.sort();

        let mut moved = false;
        for id in ids {
            let from = game.state().pieces().get(id).unwrap().square();
            game.select_square(from);
            let moves = game.state().legal_moves().to_vec();
            if moves.is_empty() {
                continue;
            }
            let target = moves[ply % moves.len()].to;
            match game.select_square(target) {
                SquareOutcome::Moved(report) => {
                    assert_eq!(report.piece, id);
                    assert_eq!(game.state().pieces().get(id).unwrap().square(), target);
                }
                other => panic!("legal move did not execute: {:?}", other),
            }
            assert!(GambitInvariants::check_all(game.state()).is_ok());
            moved = true;
            break;
        }
        if !moved {
            break;
        }
    }
}

#[test]
fn test_snapshot_survives_serialization() {
    let mut game = Game::new();
    game.start_game();
    game.select_square(sq(6, 4));

    let json = serde_json::to_string(game.state()).unwrap();
    let restored: gambit_engine::GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(&restored, game.state());
    assert_eq!(restored.selection(), Some(id_at(&game, 6, 4)));
}
