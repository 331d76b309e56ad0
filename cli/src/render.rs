use minefield_core as game;

/// One character per cell, one string per row.
///
/// Mines are shown only after a loss, `X` marking the one that was hit.
pub(crate) fn rows(board: &game::Board) -> Vec<String> {
    let show_mines = board.state() == game::EngineState::Lost;
    let width = usize::from(board.width());

    let glyphs: Vec<char> = board
        .cells()
        .map(|cell| glyph(cell, show_mines, board.triggered_mine()))
        .collect();

    glyphs
        .chunks(width)
        .map(|row| row.iter().collect())
        .collect()
}

fn glyph(cell: &game::Cell, show_mines: bool, triggered: Option<game::CellIndex>) -> char {
    use game::Visibility::*;

    if show_mines && cell.has_mine {
        return if triggered == Some(cell.index) {
            'X'
        } else {
            '*'
        };
    }

    match cell.visibility {
        Hidden => '#',
        Flagged => 'F',
        Questioned => '?',
        Revealed => match cell.adjacent_mines {
            Some(0) | None => '.',
            Some(count) => char::from(b'0' + count),
        },
    }
}

pub(crate) fn summary(snapshot: &game::Snapshot, seed: u64) -> String {
    let status = match snapshot.outcome {
        game::Outcome::InProgress => "in progress",
        game::Outcome::Won => "won",
        game::Outcome::Lost => "lost",
    };
    format!(
        "{}x{}, {} mines, {} left, {status} (seed {seed})",
        snapshot.width, snapshot.height, snapshot.total_mines, snapshot.remaining_mines
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: game::Coord, height: game::Coord, mines: &[game::CellIndex]) -> game::Board {
        game::Board::from_layout(game::MineLayout::from_mine_indices(width, height, mines).unwrap())
    }

    #[test]
    fn renders_numbers_and_marks() {
        // 0 1 * 1 0
        let mut board = board(5, 1, &[2]);
        board.reveal(0).unwrap();
        board.cycle_flag(2).unwrap();
        board.cycle_flag(3).unwrap();
        board.cycle_flag(3).unwrap();

        assert_eq!(rows(&board), [".1F?#"]);
    }

    #[test]
    fn loss_shows_every_mine() {
        let mut board = board(3, 2, &[0, 5]);
        board.reveal(5).unwrap();

        assert_eq!(rows(&board), ["*##", "##X"]);
        assert_eq!(
            summary(&board.snapshot(), 4),
            "3x2, 2 mines, 2 left, lost (seed 4)"
        );
    }

    #[test]
    fn won_board_reports_over() {
        let mut board = board(2, 1, &[1]);
        board.reveal(0).unwrap();

        let snapshot = board.snapshot();
        assert!(snapshot.is_over);
        assert_eq!(rows(&board), ["1#"]);
        assert_eq!(summary(&snapshot, 0), "2x1, 1 mines, 1 left, won (seed 0)");
    }
}
