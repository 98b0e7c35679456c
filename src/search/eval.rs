use cozy_chess::{Board, Color, Piece};

const PAWN: i32 = 100;
const KNIGHT: i32 = 320;
const BISHOP: i32 = 330;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;
const KING: i32 = 20_000;

// Index 0 is a8, index 63 is h1. Black reads a square's board index directly,
// White reads the reflected index (`63 - idx`).
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
    50, 50,  50,  50,  50,  50, 50, 50,
    10, 10,  20,  30,  30,  20, 10, 10,
     5,  5,  10,  25,  25,  10,  5,  5,
     0,  0,   0,  20,  20,   0,  0,  0,
     5, -5, -10,   0,   0, -10, -5,  5,
     5, 10,  10, -20, -20,  10, 10,  5,
     0,  0,   0,   0,   0,   0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => KING,
    }
}

fn table_index(color: Color, sq: cozy_chess::Square) -> usize {
    let idx = (7 - sq.rank() as usize) * 8 + sq.file() as usize;
    match color {
        Color::White => 63 - idx,
        Color::Black => idx,
    }
}

fn side_score(board: &Board, color: Color) -> i32 {
    let mine = board.colors(color);
    let mut score = 0;
    for &piece in &Piece::ALL {
        let bb = mine & board.pieces(piece);
        let table = match piece {
            Piece::Pawn => Some(&PAWN_TABLE),
            Piece::Knight => Some(&KNIGHT_TABLE),
            _ => None,
        };
        for sq in bb {
            score += piece_value(piece);
            if let Some(t) = table { score += t[table_index(color, sq)]; }
        }
    }
    score
}

/// Static score in centipawns; positive favours White (the human side).
/// Material plus pawn/knight placement, no mobility term.
pub fn evaluate(board: &Board) -> i32 {
    side_score(board, Color::White) - side_score(board, Color::Black)
}

/// Material only, White minus Black.
pub fn material(board: &Board) -> i32 {
    let w = Color::White;
    let b = Color::Black;
    Piece::ALL
        .iter()
        .map(|&p| {
            let n_w = (board.colors(w) & board.pieces(p)).into_iter().count() as i32;
            let n_b = (board.colors(b) & board.pieces(p)).into_iter().count() as i32;
            (n_w - n_b) * piece_value(p)
        })
        .sum()
}

/// Human (White) winning chances in percent: 5 points per pawn, clamped to [5, 95].
pub fn win_prob(score: i32) -> f64 {
    let pawns = score as f64 / 100.0;
    (50.0 + pawns * 5.0).clamp(5.0, 95.0)
}
