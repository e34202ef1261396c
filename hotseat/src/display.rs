use colored::Colorize;
use hotseat_rules::{Board, Color, Square};

/// Background of light squares, as RGB.
const LIGHT_SQUARE: (u8, u8, u8) = (175, 135, 0);

/// Background of dark squares, as RGB.
const DARK_SQUARE: (u8, u8, u8) = (135, 95, 0);

/// Renders `board` with White at the bottom.
///
/// With `plain` set this is just the board's own ASCII diagram.
/// Otherwise each piece is drawn as its Unicode glyph on a two-tone board, White pieces in white and Black pieces in black.
pub fn render(board: &Board, plain: bool) -> String {
    if plain {
        return board.to_string();
    }

    let mut drawn = String::new();

    for row in Square::MIN..=Square::MAX {
        drawn += &format!("{} ", 8 - row);

        for col in Square::MIN..=Square::MAX {
            let square = Square::new_unchecked(row, col);
            let (r, g, b) = if square.is_light() {
                LIGHT_SQUARE
            } else {
                DARK_SQUARE
            };

            let cell = match board.occupant_at(square) {
                Some(piece) => {
                    let glyph = format!(" {} ", piece.kind().symbol());
                    match piece.color() {
                        Color::White => glyph.as_str().bright_white().bold(),
                        Color::Black => glyph.as_str().black(),
                    }
                }
                None => "   ".normal(),
            };

            drawn += &cell.on_truecolor(r, g, b).to_string();
        }

        drawn.push('\n');
    }

    drawn += "  ";
    for file in 'a'..='h' {
        drawn += &format!(" {file} ");
    }

    drawn
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plain_render_is_the_ascii_diagram() {
        let board = Board::new_game();
        assert_eq!(render(&board, true), board.to_string());
    }

    #[test]
    fn styled_render_draws_glyphs_and_labels() {
        let drawn = render(&Board::new_game(), false);

        assert!(drawn.contains('♚'));
        assert!(drawn.contains('♛'));
        assert_eq!(drawn.matches('♟').count(), 16);
        assert!(drawn.lines().next().unwrap().starts_with("8 "));
        assert!(drawn.ends_with(" h "));
    }

    #[test]
    fn styled_render_of_empty_board_has_no_glyphs() {
        let drawn = render(&Board::new(), false);
        assert!(!drawn.contains('♚'));
        assert_eq!(drawn.lines().count(), 9);
    }
}
