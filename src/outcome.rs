use crate::color::PieceColor;

/// Classification of a game position. Everything but `Ongoing` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    Ongoing,
    RedWin,
    BlueWin,
    Draw,
}

impl GameState {
    pub fn win_for(color: PieceColor) -> Self {
        match color {
            PieceColor::Red => GameState::RedWin,
            PieceColor::Blue => GameState::BlueWin,
        }
    }

    pub fn winner(&self) -> Option<PieceColor> {
        match self {
            GameState::RedWin => Some(PieceColor::Red),
            GameState::BlueWin => Some(PieceColor::Blue),
            GameState::Ongoing | GameState::Draw => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::Ongoing)
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, GameState::Draw)
    }

    /// +1 if `perspective` won, -1 if it lost, 0 for a draw or an unfinished
    /// game.
    pub fn score_for(&self, perspective: PieceColor) -> f64 {
        match self.winner() {
            Some(winner) if winner == perspective => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Ongoing => write!(f, "Ongoing"),
            GameState::RedWin => write!(f, "Red wins"),
            GameState::BlueWin => write!(f, "Blue wins"),
            GameState::Draw => write!(f, "Draw"),
        }
    }
}
