use super::*;

fn find_move(board: &Board, from: &str, to: &str) -> Move {
    let from = Square::from_name(from).unwrap();
    let to = Square::from_name(to).unwrap();
    MoveGenerator::new(board)
        .generate_legal_moves(board.side_to_move())
        .into_iter()
        .find(|m| m.from == from && m.to == to)
        .unwrap_or_else(|| panic!("expected move {from}{to} not found"))
}

mod perft_tests {
    use super::*;

    struct TestPosition {
        name: &'static str,
        fen: &'static str,
        depths: &'static [(u32, u64)],
    }

    const TEST_POSITIONS: &[TestPosition] = &[
        TestPosition {
            name: "initial position",
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            depths: &[(1, 20), (2, 400), (3, 8902), (4, 197_281)],
        },
        TestPosition {
            name: "kiwipete",
            fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            depths: &[(1, 48), (2, 2039), (3, 97_862)],
        },
        TestPosition {
            name: "rook endgame with en passant",
            fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            depths: &[(1, 14), (2, 191), (3, 2812)],
        },
        TestPosition {
            name: "promotion and underpromotion",
            fen: "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
            depths: &[(1, 24), (2, 496), (3, 9483)],
        },
        TestPosition {
            name: "mutual castling",
            fen: "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            depths: &[(1, 26), (2, 568), (3, 13_744)],
        },
        TestPosition {
            name: "en passant capture available",
            fen: "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            depths: &[(1, 31), (2, 707), (3, 21_637)],
        },
        TestPosition {
            name: "promotion with captures",
            fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            depths: &[(1, 44), (2, 1486), (3, 62_379)],
        },
    ];

    #[test]
    fn known_perft_values() {
        for position in TEST_POSITIONS {
            let mut board = Board::from_fen(position.fen);
            for &(depth, expected) in position.depths {
                let nodes = board.perft(depth);
                assert_eq!(
                    nodes, expected,
                    "perft mismatch for '{}' at depth {}",
                    position.name, depth
                );
            }
        }
    }
}

mod movegen_tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_moves() {
        let board = Board::new();
        let moves = MoveGenerator::new(&board).generate_legal_moves(Color::White);
        assert_eq!(moves.len(), 20);

        let pawn_moves = moves
            .iter()
            .filter(|m| board.piece_at(m.from).unwrap().kind == PieceKind::Pawn)
            .count();
        let knight_moves = moves
            .iter()
            .filter(|m| board.piece_at(m.from).unwrap().kind == PieceKind::Knight)
            .count();
        assert_eq!(pawn_moves, 16);
        assert_eq!(knight_moves, 4);

        // Black mirrors exactly.
        let black = MoveGenerator::new(&board).generate_legal_moves(Color::Black);
        assert_eq!(black.len(), 20);
    }

    #[test]
    fn legal_moves_never_leave_own_king_in_check() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            // White king pinned against a battery.
            "4k3/8/8/8/4r3/8/4N3/4K3 w - - 0 1",
        ];
        for fen in fens {
            let mut board = Board::from_fen(fen);
            let color = board.side_to_move();
            for m in MoveGenerator::new(&board).generate_legal_moves(color) {
                board.make_move(m);
                assert!(!board.is_check(color), "move {m} leaves the king in check ({fen})");
                board.unmake_move(m);
            }
        }
    }

    #[test]
    fn pinned_knight_cannot_move() {
        // Knight on e2 shields the king from the e4 rook.
        let board = Board::from_fen("4k3/8/8/8/4r3/8/4N3/4K3 w - - 0 1");
        let moves = MoveGenerator::new(&board).generate_legal_moves(Color::White);
        assert!(moves
            .iter()
            .all(|m| board.piece_at(m.from).unwrap().kind != PieceKind::Knight));
    }

    #[test]
    fn both_castling_moves_generated_when_preconditions_hold() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let moves = MoveGenerator::new(&board).generate_legal_moves(Color::White);
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castling()).collect();
        assert_eq!(castles.len(), 2);
        assert!(castles.iter().any(|m| m.to == Square::from_name("g1").unwrap()));
        assert!(castles.iter().any(|m| m.to == Square::from_name("c1").unwrap()));
    }

    #[test]
    fn castling_requires_the_rook() {
        // Kingside rook missing even though the right is still claimed.
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w KQ - 0 1");
        let moves = MoveGenerator::new(&board).generate_legal_moves(Color::White);
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castling()).collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to, Square::from_name("c1").unwrap());
    }

    #[test]
    fn castling_blocked_by_attacked_transit_square() {
        // The f3 rook covers f8, barring Black's kingside castle; queenside
        // stays available.
        let board = Board::from_fen("r3k2r/8/8/8/8/5R2/8/4K3 b kq - 0 1");
        let moves = MoveGenerator::new(&board).generate_legal_moves(Color::Black);
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castling()).collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to, Square::from_name("c8").unwrap());
    }

    #[test]
    fn castling_forbidden_while_in_check() {
        let board = Board::from_fen("r3k2r/8/8/8/8/4R3/8/4K3 b kq - 0 1");
        assert!(board.is_check(Color::Black));
        let moves = MoveGenerator::new(&board).generate_legal_moves(Color::Black);
        assert!(moves.iter().all(|m| !m.is_castling()));
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut board = Board::new();
        let m = find_move(&board, "e2", "e4");
        assert_eq!(m.flag, MoveFlag::DoublePawnPush);
        board.make_move(m);
        assert_eq!(board.position().en_passant, Square::from_name("e3"));

        // Any non-double-push reply clears it.
        let reply = find_move(&board, "g8", "f6");
        board.make_move(reply);
        assert_eq!(board.position().en_passant, None);
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/8/3p4/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        board.make_move(find_move(&board, "e2", "e4"));
        assert_eq!(board.position().en_passant, Square::from_name("e3"));

        let fen_before = board.to_fen();
        let capture = find_move(&board, "d4", "e3");
        assert_eq!(capture.flag, MoveFlag::EnPassant);

        board.make_move(capture);
        // The captured pawn stood beside the capturer, not on the target.
        assert_eq!(board.piece_at(Square::from_name("e4").unwrap()), None);
        assert_eq!(
            board.piece_at(Square::from_name("e3").unwrap()),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );

        board.unmake_move(capture);
        assert_eq!(board.to_fen(), fen_before);
    }

    #[test]
    fn promotions_fan_out_to_four_moves() {
        let board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let moves = MoveGenerator::new(&board).generate_legal_moves(Color::White);
        let promotions: Vec<_> = moves.iter().filter(|m| m.is_promotion()).collect();
        assert_eq!(promotions.len(), 4);
        for kind in [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            assert!(promotions.iter().any(|m| m.promotion == Some(kind)));
        }
    }

    #[test]
    fn captures_subset_matches_capture_flags() {
        let board =
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let generator = MoveGenerator::new(&board);
        let all = generator.generate_legal_moves(Color::White);
        let captures = generator.generate_captures(Color::White);
        assert!(!captures.is_empty());
        assert!(captures.iter().all(|m| m.is_capture()));
        assert_eq!(
            captures.len(),
            all.iter().filter(|m| m.is_capture()).count()
        );
    }
}

mod make_unmake_tests {
    use super::*;

    #[test]
    fn every_legal_move_round_trips_the_fen() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        for fen in fens {
            let mut board = Board::from_fen(fen);
            let before = board.to_fen();
            let color = board.side_to_move();
            for m in MoveGenerator::new(&board).generate_legal_moves(color) {
                board.make_move(m);
                board.unmake_move(m);
                assert_eq!(board.to_fen(), before, "make/unmake of {m} broke {fen}");
            }
        }
    }

    #[test]
    fn random_playout_unwinds_exactly() {
        use rand::prelude::*;

        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut trail: Vec<(Move, String)> = Vec::new();

        for _ in 0..60 {
            let moves =
                MoveGenerator::new(&board).generate_legal_moves(board.side_to_move());
            if moves.is_empty() {
                break;
            }
            let m = moves[rng.gen_range(0..moves.len())];
            trail.push((m, board.to_fen()));
            board.make_move(m);
        }

        while let Some((m, fen_before)) = trail.pop() {
            board.unmake_move(m);
            assert_eq!(board.to_fen(), fen_before);
        }
        assert_eq!(board.to_fen(), Board::new().to_fen());
    }

    #[test]
    fn unmake_with_no_history_is_a_no_op() {
        let mut board = Board::new();
        let before = board.to_fen();
        board.unmake_move(Move::new(
            Square::from_name("e2").unwrap(),
            Square::from_name("e4").unwrap(),
        ));
        assert_eq!(board.to_fen(), before);
    }

    #[test]
    fn halfmove_clock_resets_on_pawn_moves_and_captures() {
        let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/R3K3 w - - 12 30");

        let rook_move = find_move(&board, "a1", "a2");
        board.make_move(rook_move);
        assert_eq!(board.halfmove_clock(), 13);
        board.unmake_move(rook_move);

        let capture = find_move(&board, "e4", "d5");
        board.make_move(capture);
        assert_eq!(board.halfmove_clock(), 0);
        board.unmake_move(capture);

        let push = find_move(&board, "e4", "e5");
        board.make_move(push);
        assert_eq!(board.halfmove_clock(), 0);
    }

    #[test]
    fn fullmove_number_increments_after_black_moves() {
        let mut board = Board::new();
        assert_eq!(board.fullmove_number(), 1);
        board.make_move(find_move(&board, "e2", "e4"));
        assert_eq!(board.fullmove_number(), 1);
        board.make_move(find_move(&board, "e7", "e5"));
        assert_eq!(board.fullmove_number(), 2);
    }

    #[test]
    fn king_move_forfeits_both_castling_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let m = find_move(&board, "e1", "e2");
        board.make_move(m);
        assert!(!board.position().castling.kingside(Color::White));
        assert!(!board.position().castling.queenside(Color::White));
        assert!(board.position().castling.kingside(Color::Black));

        board.unmake_move(m);
        assert!(board.position().castling.kingside(Color::White));
    }

    #[test]
    fn rook_move_forfeits_one_side() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        board.make_move(find_move(&board, "h1", "g1"));
        assert!(!board.position().castling.kingside(Color::White));
        assert!(board.position().castling.queenside(Color::White));
    }

    #[test]
    fn capturing_a_rook_on_its_corner_clears_the_right() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/5n2/R3K2R b KQkq - 0 1");
        let capture = find_move(&board, "f2", "h1");
        board.make_move(capture);
        assert!(!board.position().castling.kingside(Color::White));
        assert!(board.position().castling.queenside(Color::White));
    }

    #[test]
    fn castling_relocates_the_rook_and_back() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let before = board.to_fen();

        let kingside = find_move(&board, "e1", "g1");
        assert!(kingside.is_castling());
        board.make_move(kingside);
        assert_eq!(
            board.piece_at(Square::from_name("f1").unwrap()),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(board.piece_at(Square::from_name("h1").unwrap()), None);
        assert!(!board.position().castling.kingside(Color::White));

        board.unmake_move(kingside);
        assert_eq!(board.to_fen(), before);
    }

    #[test]
    fn promotion_replaces_the_pawn_and_unwinds() {
        let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let before = board.to_fen();
        let promo = MoveGenerator::new(&board)
            .generate_legal_moves(Color::White)
            .into_iter()
            .find(|m| m.promotion == Some(PieceKind::Queen))
            .unwrap();

        board.make_move(promo);
        assert_eq!(
            board.piece_at(Square::from_name("a8").unwrap()),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );

        board.unmake_move(promo);
        assert_eq!(board.to_fen(), before);
    }
}

mod state_tests {
    use super::*;

    #[test]
    fn fools_mate_is_checkmate() {
        let board =
            Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3");
        assert!(board.is_check(Color::White));
        assert!(board.is_checkmate(Color::White));
        assert!(!board.is_stalemate(Color::White));
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
        assert!(!board.is_check(Color::Black));
        assert!(board.is_stalemate(Color::Black));
        assert!(!board.is_checkmate(Color::Black));
    }

    #[test]
    fn fifty_move_rule_from_fen() {
        assert!(Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 100 1").is_draw());
        assert!(!Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 99 1").is_draw());
    }

    #[test]
    fn fifty_move_rule_from_a_played_sequence() {
        let mut board = Board::from_fen("r6k/8/8/8/8/8/8/R6K w - - 0 1");
        let shuffle = [
            ("a1", "a2"),
            ("a8", "a7"),
            ("a2", "a1"),
            ("a7", "a8"),
        ];
        for halfmove in 0..100 {
            assert!(!board.is_draw(), "premature draw at halfmove {halfmove}");
            let (from, to) = shuffle[halfmove % 4];
            board.make_move(Move::new(
                Square::from_name(from).unwrap(),
                Square::from_name(to).unwrap(),
            ));
        }
        assert_eq!(board.halfmove_clock(), 100);
        assert!(board.is_draw());
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let board = Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(board.find_king(Color::White), None);
        assert!(!board.is_check(Color::White));
        assert!(!board.is_check(Color::Black));
    }

    #[test]
    fn find_king_locates_both_kings() {
        let board = Board::new();
        assert_eq!(board.find_king(Color::White), Square::from_name("e1"));
        assert_eq!(board.find_king(Color::Black), Square::from_name("e8"));
    }

    #[test]
    fn attack_queries_respect_blockers() {
        // The d4 pawn blocks the a1 bishop's diagonal beyond it.
        let board = Board::from_fen("8/8/8/8/3P4/8/8/B3K2k w - - 0 1");
        assert!(board.is_square_attacked(Square::from_name("c3").unwrap(), Color::White));
        assert!(!board.is_square_attacked(Square::from_name("f6").unwrap(), Color::White));
    }

    #[test]
    fn display_renders_a_diagram() {
        let text = Board::new().to_string();
        assert!(text.contains('♔'));
        assert!(text.contains('♟'));
        assert!(text.contains("a b c d e f g h"));
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Making then unmaking a random move sequence restores the exact
        /// exchange-format string.
        #[test]
        fn make_unmake_restores_fen(seed in any::<u64>(), length in 1..30usize) {
            use rand::prelude::*;

            let mut board = Board::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let initial = board.to_fen();
            let mut played = Vec::new();

            for _ in 0..length {
                let moves =
                    MoveGenerator::new(&board).generate_legal_moves(board.side_to_move());
                if moves.is_empty() {
                    break;
                }
                let m = moves[rng.gen_range(0..moves.len())];
                board.make_move(m);
                played.push(m);
            }

            while let Some(m) = played.pop() {
                board.unmake_move(m);
            }
            prop_assert_eq!(board.to_fen(), initial);
        }

        /// Any reachable position round-trips through FEN.
        #[test]
        fn reachable_positions_round_trip_fen(seed in any::<u64>(), length in 0..30usize) {
            use rand::prelude::*;

            let mut board = Board::new();
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..length {
                let moves =
                    MoveGenerator::new(&board).generate_legal_moves(board.side_to_move());
                if moves.is_empty() {
                    break;
                }
                board.make_move(moves[rng.gen_range(0..moves.len())]);
            }

            let fen = board.to_fen();
            prop_assert_eq!(Board::from_fen(&fen).to_fen(), fen);
        }

        /// Generated moves never leave the mover's king attacked.
        #[test]
        fn legal_moves_keep_the_king_safe(seed in any::<u64>()) {
            use rand::prelude::*;

            let mut board = Board::new();
            let mut rng = StdRng::seed_from_u64(seed);

            for _ in 0..10 {
                let color = board.side_to_move();
                let moves = MoveGenerator::new(&board).generate_legal_moves(color);
                if moves.is_empty() {
                    break;
                }
                for &m in &moves {
                    board.make_move(m);
                    prop_assert!(!board.is_check(color));
                    board.unmake_move(m);
                }
                board.make_move(moves[rng.gen_range(0..moves.len())]);
            }
        }
    }
}
