use cozy_chess::{Board, Color, File, Move, Piece, Square};
use std::ops::{Deref, DerefMut};

use crate::error::{EngineError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

/// A legal move together with what the UI and history need to know about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveInfo {
    pub mv: Move,
    /// UCI text with castling written as the king's two-square step (`e1g1`).
    pub notation: String,
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
}

impl MoveInfo {
    pub fn is_capture(&self) -> bool { self.captured.is_some() }
}

pub fn piece_char(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    }
}

pub fn parse_square(s: &str) -> Result<Square> {
    s.trim().parse::<Square>().map_err(|_| EngineError::InvalidSquare(s.to_string()))
}

/// Rules-oracle handle: a cozy board plus the boards it came from, so moves can be undone.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    undo: Vec<Board>,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: Board::default(), undo: Vec::with_capacity(128) }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        Board::from_fen(fen, false)
            .map(|b| Self { board: b, undo: Vec::with_capacity(128) })
            .map_err(|e| EngineError::InvalidFen(format!("{e:?}")))
    }

    pub fn board(&self) -> &Board { &self.board }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    /// Plies played on this handle since it was created.
    pub fn plies_played(&self) -> usize { self.undo.len() }

    pub fn fen(&self) -> String { self.board.to_string() }

    /// FEN without the halfmove/fullmove counters.
    pub fn cache_key(&self) -> String {
        let fen = self.fen();
        fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }

    /// Piece placement only.
    pub fn placement_key(&self) -> String {
        let fen = self.fen();
        fen.split_whitespace().next().unwrap_or_default().to_string()
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        Some((self.board.color_on(sq)?, self.board.piece_on(sq)?))
    }

    fn describe(&self, mv: Move, piece: Piece) -> MoveInfo {
        let stm = self.board.side_to_move();
        // cozy encodes castling as king-takes-own-rook
        let castles = piece == Piece::King && self.board.color_on(mv.to) == Some(stm);
        let to = if castles {
            let file = if (mv.to.file() as u8) > (mv.from.file() as u8) { File::G } else { File::C };
            Square::new(file, mv.from.rank())
        } else {
            mv.to
        };
        let captured = if castles {
            None
        } else if let Some(p) = self.board.piece_on(mv.to) {
            Some(p)
        } else if piece == Piece::Pawn && mv.from.file() != mv.to.file() {
            Some(Piece::Pawn)
        } else {
            None
        };
        let mut notation = format!("{}{}", mv.from, to);
        if let Some(p) = mv.promotion { notation.push(piece_char(p)); }
        MoveInfo { mv, notation, from: mv.from, to, piece, captured, promotion: mv.promotion }
    }

    /// Standard notation of a legal move in this position.
    pub fn notation(&self, mv: Move) -> String {
        let piece = self.board.piece_on(mv.from).unwrap_or(Piece::Pawn);
        self.describe(mv, piece).notation
    }

    pub fn is_capture(&self, mv: Move) -> bool {
        let them = !self.board.side_to_move();
        if self.board.colors(them).has(mv.to) { return true; }
        self.board.piece_on(mv.from) == Some(Piece::Pawn) && mv.from.file() != mv.to.file()
    }

    pub fn moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.board.generate_moves(|moves| { out.extend(moves); false });
        out
    }

    pub fn legal_moves(&self) -> Vec<MoveInfo> {
        let mut out = Vec::with_capacity(64);
        self.board.generate_moves(|moves| {
            let piece = moves.piece;
            for m in moves { out.push(self.describe(m, piece)); }
            false
        });
        out
    }

    pub fn legal_moves_from(&self, from: Square) -> Vec<MoveInfo> {
        let mut out = Vec::new();
        self.board.generate_moves_for(from.bitboard(), |moves| {
            let piece = moves.piece;
            for m in moves { out.push(self.describe(m, piece)); }
            false
        });
        out
    }

    pub fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    /// Looks up a legal move by squares; a missing promotion piece means queen.
    pub fn find_move(&self, from: Square, to: Square, promotion: Option<Piece>) -> Option<MoveInfo> {
        let wanted = promotion.unwrap_or(Piece::Queen);
        self.legal_moves_from(from)
            .into_iter()
            .filter(|m| m.to == to)
            .find(|m| m.promotion.map_or(true, |p| p == wanted))
    }

    /// Accepts both standard castling (`e1g1`) and cozy's king-takes-rook form (`e1h1`).
    pub fn find_notation(&self, notation: &str) -> Option<MoveInfo> {
        let notation = notation.trim();
        self.legal_moves()
            .into_iter()
            .find(|m| m.notation == notation || m.mv.to_string() == notation)
    }

    pub fn make_move_notation(&mut self, notation: &str) -> Result<MoveInfo> {
        let info = self.find_notation(notation).ok_or_else(|| EngineError::UnknownMove(notation.to_string()))?;
        self.play(info.mv);
        Ok(info)
    }

    /// Plays a move known to be legal in this position.
    pub fn play(&mut self, mv: Move) {
        self.undo.push(self.board.clone());
        self.board.play(mv);
    }

    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(prev) => { self.board = prev; true }
            None => false,
        }
    }

    /// Plays `mv` for the lifetime of the returned guard; the move is undone when it drops.
    pub fn apply(&mut self, mv: Move) -> MoveGuard<'_> {
        self.play(mv);
        MoveGuard { pos: self }
    }

    pub fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    pub fn is_checkmate(&self) -> bool { self.in_check() && !self.has_legal_moves() }

    pub fn is_stalemate(&self) -> bool { !self.in_check() && !self.has_legal_moves() }

    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() { return false; }
        let minors = (b.pieces(Piece::Knight) | b.pieces(Piece::Bishop)).into_iter().count();
        if minors <= 1 { return true; }
        if !b.pieces(Piece::Knight).is_empty() { return false; }
        // bishops only: dead when they all stand on one square colour
        let mut shades = b.pieces(Piece::Bishop).into_iter().map(|sq| (sq.file() as u8 + sq.rank() as u8) % 2);
        let first = shades.next();
        shades.all(|s| Some(s) == first)
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let h = self.board.hash();
        let window = self.board.halfmove_clock() as usize;
        let seen = self.undo.iter().rev().take(window).filter(|b| b.hash() == h).count();
        seen + 1 >= 3
    }

    /// Fifty-move rule, dead material or threefold repetition.
    pub fn is_rule_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100 || self.is_insufficient_material() || self.is_threefold_repetition()
    }

    pub fn is_draw(&self) -> bool { self.is_stalemate() || self.is_rule_draw() }

    pub fn is_game_over(&self) -> bool { !self.has_legal_moves() || self.is_rule_draw() }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_checkmate() {
            return Some(match self.side_to_move() {
                Color::White => Outcome::BlackWins,
                Color::Black => Outcome::WhiteWins,
            });
        }
        if self.is_draw() { Some(Outcome::Draw) } else { None }
    }

    /// Knights, bishops, rooks and queens of both colours.
    pub fn officer_count(&self) -> usize {
        let b = &self.board;
        (b.pieces(Piece::Knight) | b.pieces(Piece::Bishop) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen))
            .into_iter()
            .count()
    }
}

pub struct MoveGuard<'a> {
    pos: &'a mut Position,
}

impl Deref for MoveGuard<'_> {
    type Target = Position;
    fn deref(&self) -> &Position { self.pos }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position { self.pos }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) { self.pos.undo(); }
}
