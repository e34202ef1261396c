use hotseat_rules::{Board, CastleSide, Color, IllegalCastle, IllegalMove, Piece, PieceKind, Square};

/// Builds a board from whitespace-separated placements such as `"Ke1 Rh1 ke8"`.
///
/// Uppercase letters are White pieces, lowercase letters are Black pieces.
fn setup_board(placements: &str) -> Board {
    let mut board = Board::new();

    for placement in placements.split_ascii_whitespace() {
        let (piece, square) = placement.split_at(1);
        let letter = piece.chars().next().unwrap();
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = PieceKind::from_char(letter).unwrap();
        let square = square.parse().unwrap();

        board.place(Piece::new(color, kind, square));
    }

    board
}

#[test]
fn queen_and_rook_mate_king_in_corner() {
    let board = setup_board("Kh1 qg2 rh8 kf3");

    assert!(board.in_check(Color::White));
    assert!(board.is_checkmate(Color::White));
    assert!(!board.has_legal_moves(Color::White));
    assert!(!board.is_checkmate(Color::Black));
}

#[test]
fn unprotected_queen_can_be_captured() {
    let board = setup_board("Kh1 qg2 rh8 ka8");

    assert!(board.in_check(Color::White));
    assert!(!board.is_checkmate(Color::White));
    assert_eq!(board.legal_moves_from(Square::H1).as_slice(), &[Square::G2]);
}

#[test]
fn stalemate_is_reported_as_checkmate() {
    let board = setup_board("Ka1 qb3 kh8");

    assert!(!board.in_check(Color::White));
    assert!(board.is_checkmate(Color::White));
}

#[test]
fn fools_mate() {
    let mut board = Board::new_game();
    let moves = [
        (Square::F2, Square::F3, Color::White),
        (Square::E7, Square::E5, Color::Black),
        (Square::G2, Square::G4, Color::White),
        (Square::D8, Square::H4, Color::Black),
    ];

    for (from, to, player) in moves {
        board.validate_and_move(from, to, player).unwrap();
    }

    assert!(board.in_check(Color::White));
    assert!(board.is_checkmate(Color::White));
}

#[test]
fn queen_on_open_diagonal_gives_check_immediately() {
    let mut board = Board::new_game();
    board
        .validate_and_move(Square::F2, Square::F3, Color::White)
        .unwrap();
    board
        .validate_and_move(Square::E7, Square::E5, Color::Black)
        .unwrap();
    assert!(!board.in_check(Color::White));

    // No white move in between: the check is visible as soon as the queen lands
    board
        .validate_and_move(Square::D8, Square::H4, Color::Black)
        .unwrap();
    assert!(board.in_check(Color::White));
    assert!(!board.in_check(Color::Black));
}

#[test]
fn castle_kingside() {
    let mut board = setup_board("Ke1 Rh1 ke8");

    board.castle(Color::White, CastleSide::Kingside).unwrap();

    let king = board.occupant_at(Square::G1).unwrap();
    let rook = board.occupant_at(Square::F1).unwrap();
    assert_eq!(king.parts(), (Color::White, PieceKind::King));
    assert_eq!(rook.parts(), (Color::White, PieceKind::Rook));
    assert_eq!(king.square(), Square::G1);
    assert_eq!(rook.square(), Square::F1);
    assert!(king.has_moved() && rook.has_moved());
    assert!(board.is_empty(Square::E1));
    assert!(board.is_empty(Square::H1));
}

#[test]
fn castle_queenside_black() {
    let mut board = setup_board("ke8 ra8 Ke1");

    board.castle(Color::Black, CastleSide::Queenside).unwrap();

    assert_eq!(
        board.piece_at(Square::C8),
        Some((Color::Black, PieceKind::King))
    );
    assert_eq!(
        board.piece_at(Square::D8),
        Some((Color::Black, PieceKind::Rook))
    );
    assert!(board.is_empty(Square::A8));
    assert!(board.is_empty(Square::E8));
}

/// Asserts that castling fails with `expected` and leaves `board` untouched.
fn assert_castle_fails(board: &mut Board, player: Color, side: CastleSide, expected: IllegalCastle) {
    let before = board.clone();
    assert_eq!(board.castle(player, side), Err(expected));
    assert_eq!(*board, before);
}

#[test]
fn castle_after_king_moved() {
    let mut board = setup_board("Ke1 Rh1 ke8");
    board.apply_move(Square::E1, Square::E2);
    board.apply_move(Square::E2, Square::E1);

    assert_castle_fails(&mut board, Color::White, CastleSide::Kingside, IllegalCastle::KingMoved);
}

#[test]
fn castle_after_rook_moved() {
    let mut board = setup_board("Ke1 Ra1 ke8");
    board.apply_move(Square::A1, Square::A2);
    board.apply_move(Square::A2, Square::A1);

    assert_castle_fails(
        &mut board,
        Color::White,
        CastleSide::Queenside,
        IllegalCastle::RookMoved { square: Square::A1 },
    );
}

#[test]
fn castle_without_rook() {
    let mut board = setup_board("Ke1 Nh1 ke8");

    assert_castle_fails(
        &mut board,
        Color::White,
        CastleSide::Kingside,
        IllegalCastle::RookMissing { square: Square::H1 },
    );
}

#[test]
fn castle_through_blocker() {
    let mut board = setup_board("Ke1 Ra1 Nb1 ke8");

    assert_castle_fails(
        &mut board,
        Color::White,
        CastleSide::Queenside,
        IllegalCastle::Blocked { square: Square::B1 },
    );
}

#[test]
fn castle_through_attacked_square() {
    let mut board = setup_board("Ke1 Rh1 ke8 rf8");

    assert_castle_fails(
        &mut board,
        Color::White,
        CastleSide::Kingside,
        IllegalCastle::Attacked { square: Square::F1 },
    );
}

#[test]
fn castle_out_of_check() {
    let mut board = setup_board("Ke1 Rh1 ka8 re7");

    assert_castle_fails(
        &mut board,
        Color::White,
        CastleSide::Kingside,
        IllegalCastle::Attacked { square: Square::E1 },
    );
}

#[test]
fn castle_queenside_allows_attacked_b_file() {
    let mut board = setup_board("Ke1 Ra1 ke8 rb8");

    assert!(board.castle(Color::White, CastleSide::Queenside).is_ok());
}

/// Asserts that the move fails with `expected` and leaves `board` untouched.
fn assert_move_fails(board: &mut Board, from: Square, to: Square, player: Color, expected: IllegalMove) {
    let before = board.clone();
    assert_eq!(board.validate_and_move(from, to, player), Err(expected));
    assert_eq!(*board, before);
}

#[test]
fn rejected_moves_leave_board_unchanged() {
    let mut board = Board::new_game();

    assert_move_fails(
        &mut board,
        Square::E4,
        Square::E5,
        Color::White,
        IllegalMove::NoPiece { square: Square::E4 },
    );
    assert_move_fails(
        &mut board,
        Square::E7,
        Square::E5,
        Color::White,
        IllegalMove::NotYourPiece {
            square: Square::E7,
            color: Color::White,
        },
    );
    assert_move_fails(
        &mut board,
        Square::E2,
        Square::E5,
        Color::White,
        IllegalMove::Unreachable {
            from: Square::E2,
            to: Square::E5,
        },
    );
    assert_move_fails(
        &mut board,
        Square::A1,
        Square::A2,
        Color::White,
        IllegalMove::Unreachable {
            from: Square::A1,
            to: Square::A2,
        },
    );
}

#[test]
fn pinned_rook_cannot_leave_the_file() {
    let mut board = setup_board("Ke1 Re4 re8 ka8");

    assert_move_fails(
        &mut board,
        Square::E4,
        Square::A4,
        Color::White,
        IllegalMove::SelfCheck {
            from: Square::E4,
            to: Square::A4,
        },
    );

    // Along the pin is fine, including capturing the pinning rook
    let rook = board.occupant_at(Square::E4).unwrap();
    let mut legal = rook.legal_moves(&board).into_iter().collect::<Vec<_>>();
    legal.sort();
    let mut expected = vec![Square::E2, Square::E3, Square::E5, Square::E6, Square::E7, Square::E8];
    expected.sort();
    assert_eq!(legal, expected);

    let captured = board
        .validate_and_move(Square::E4, Square::E8, Color::White)
        .unwrap();
    assert_eq!(captured.map(|piece| piece.kind()), Some(PieceKind::Rook));
}

#[test]
fn king_cannot_step_into_check() {
    let mut board = setup_board("Ke1 rd8 ka8");

    assert_move_fails(
        &mut board,
        Square::E1,
        Square::D1,
        Color::White,
        IllegalMove::SelfCheck {
            from: Square::E1,
            to: Square::D1,
        },
    );
    assert!(board
        .validate_and_move(Square::E1, Square::F1, Color::White)
        .is_ok());
}

#[test]
fn clone_shares_nothing_with_original() {
    let original = Board::new_game();
    let mut clone = original.clone();

    clone.apply_move(Square::E2, Square::E4);
    clone.take(Square::D8);

    assert_eq!(original, Board::new_game());
    let pawn = original.occupant_at(Square::E2).unwrap();
    assert_eq!(pawn.square(), Square::E2);
    assert!(pawn.first_move());
    assert!(original.has(Square::D8));

    let mut original = original;
    original.apply_move(Square::G1, Square::F3);
    assert!(clone.has(Square::G1));
    assert!(clone.is_empty(Square::F3));
}

#[test]
fn legality_checks_do_not_mutate_the_board() {
    let board = setup_board("Kh1 qg2 rh8 kf3");
    let before = board.clone();

    let _ = board.is_checkmate(Color::White);
    let _ = board.in_check(Color::White);
    let _ = board.legal_moves_from(Square::H1);

    assert_eq!(board, before);
}
