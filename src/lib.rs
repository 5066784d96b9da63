pub mod bitboard;
pub mod board;
pub mod color;
pub mod config;
pub mod error;
pub mod game;
pub mod r#move;
pub mod movegen;
pub mod outcome;
pub mod piece;
pub mod position;
pub mod search;
pub mod templates;

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn bitcheckers(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use color::PieceColor;
    use python_bindings::*;
    m.add_class::<PyGame>()?;
    m.add_class::<PyMove>()?;
    m.add_class::<PyMonteCarloPlayer>()?;
    m.add_class::<PyMctsPlayer>()?;
    m.add_class::<PyRavePlayer>()?;
    m.add("RED", PieceColor::Red as i8)?;
    m.add("BLUE", PieceColor::Blue as i8)?;
    m.add("ONGOING", STATE_ONGOING)?;
    m.add("RED_WIN", STATE_RED_WIN)?;
    m.add("BLUE_WIN", STATE_BLUE_WIN)?;
    m.add("DRAW", STATE_DRAW)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use crate::config::{ChildSelection, MctsConfig, MonteCarloConfig, RaveConfig};
    use crate::error::ConfigError;
    use crate::game::Game;
    use crate::outcome::GameState;
    use crate::position::Position;
    use crate::r#move::Move;
    use crate::search::{MctsPlayer, MonteCarloPlayer, Player, RavePlayer};
    use pyo3::exceptions::PyValueError;

    pub const STATE_ONGOING: u8 = 0;
    pub const STATE_RED_WIN: u8 = 1;
    pub const STATE_BLUE_WIN: u8 = 2;
    pub const STATE_DRAW: u8 = 3;

    fn state_code(state: GameState) -> u8 {
        match state {
            GameState::Ongoing => STATE_ONGOING,
            GameState::RedWin => STATE_RED_WIN,
            GameState::BlueWin => STATE_BLUE_WIN,
            GameState::Draw => STATE_DRAW,
        }
    }

    fn config_err(e: ConfigError) -> PyErr {
        PyErr::new::<PyValueError, _>(e.to_string())
    }

    fn position(row: i32, col: i32) -> PyResult<Position> {
        Position::new(row, col)
            .ok_or_else(|| PyErr::new::<PyValueError, _>(format!("({row},{col}) is off the board")))
    }

    fn coords(pos: Position) -> (u8, u8) {
        (pos.row(), pos.col())
    }

    #[pyclass(name = "Game")]
    pub struct PyGame {
        game: Game,
    }

    #[pymethods]
    impl PyGame {
        #[new]
        pub fn new() -> Self {
            PyGame { game: Game::new() }
        }

        pub fn width(&self) -> usize {
            self.game.width() as usize
        }

        pub fn height(&self) -> usize {
            self.game.height() as usize
        }

        /// `(color, is_king)` of the piece on `(row, col)`.
        pub fn get_piece(&self, row: i32, col: i32) -> PyResult<Option<(i8, bool)>> {
            let pos = position(row, col)?;
            Ok(self
                .game
                .get_piece(pos)
                .map(|p| (p.color() as i8, p.is_king())))
        }

        pub fn next_turn(&self) -> i8 {
            self.game.next_turn() as i8
        }

        pub fn move_count(&self) -> u32 {
            self.game.move_count()
        }

        pub fn quiet_plies(&self) -> u32 {
            self.game.quiet_plies()
        }

        pub fn state(&self) -> u8 {
            state_code(self.game.state())
        }

        pub fn is_over(&self) -> bool {
            self.game.is_over()
        }

        pub fn winner(&self) -> Option<i8> {
            self.game.winner().map(|c| c as i8)
        }

        pub fn legal_moves(&self) -> Vec<PyMove> {
            self.game
                .legal_moves()
                .iter()
                .map(|m| PyMove { move_: m.clone() })
                .collect()
        }

        pub fn run_move(&mut self, move_: &PyMove) -> bool {
            self.game.run_move(&move_.move_)
        }

        pub fn last_move_endpoints(&self) -> Option<((u8, u8), (u8, u8))> {
            self.game
                .last_move_endpoints()
                .map(|(start, end)| (coords(start), coords(end)))
        }

        pub fn clone(&self) -> PyGame {
            PyGame {
                game: self.game.clone(),
            }
        }

        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            self.game.board().hash(&mut hasher);
            (self.game.next_turn() as i8).hash(&mut hasher);
            hasher.finish()
        }

        pub fn __str__(&self) -> String {
            self.game.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Game(turn={}, moves={}, state={})",
                self.game.next_turn(),
                self.game.move_count(),
                self.game.state()
            )
        }
    }

    #[pyclass(name = "Move")]
    #[derive(Clone, Debug)]
    pub struct PyMove {
        move_: Move,
    }

    #[pymethods]
    impl PyMove {
        #[staticmethod]
        pub fn plain(start_row: i32, start_col: i32, end_row: i32, end_col: i32) -> PyResult<Self> {
            Move::plain(start_row, start_col, end_row, end_col)
                .map(|move_| PyMove { move_ })
                .ok_or_else(|| PyErr::new::<PyValueError, _>("square off the board"))
        }

        #[staticmethod]
        pub fn jump(
            start_row: i32,
            start_col: i32,
            over_row: i32,
            over_col: i32,
            end_row: i32,
            end_col: i32,
        ) -> PyResult<Self> {
            Move::jump(start_row, start_col, over_row, over_col, end_row, end_col)
                .map(|move_| PyMove { move_ })
                .ok_or_else(|| PyErr::new::<PyValueError, _>("square off the board"))
        }

        pub fn start(&self) -> (u8, u8) {
            coords(self.move_.start())
        }

        pub fn end(&self) -> (u8, u8) {
            coords(self.move_.end())
        }

        pub fn is_capture(&self) -> bool {
            self.move_.is_capture()
        }

        pub fn captured(&self) -> Vec<(u8, u8)> {
            self.move_.captured().into_iter().map(coords).collect()
        }

        pub fn __str__(&self) -> String {
            self.move_.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!("Move({})", self.move_)
        }

        pub fn __eq__(&self, other: &PyMove) -> bool {
            self.move_ == other.move_
        }

        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            self.move_.hash(&mut hasher);
            hasher.finish()
        }
    }

    #[pyclass(name = "MonteCarloPlayer")]
    pub struct PyMonteCarloPlayer {
        player: MonteCarloPlayer,
    }

    #[pymethods]
    impl PyMonteCarloPlayer {
        #[new]
        #[pyo3(signature = (playouts=10_000, workers=1, seed=None))]
        pub fn new(playouts: u32, workers: usize, seed: Option<u64>) -> PyResult<Self> {
            let config = MonteCarloConfig {
                playouts,
                workers,
                seed,
            };
            Ok(PyMonteCarloPlayer {
                player: MonteCarloPlayer::new(config).map_err(config_err)?,
            })
        }

        pub fn get_move(&mut self, game: &PyGame) -> Option<PyMove> {
            self.player.get_move(&game.game).map(|move_| PyMove { move_ })
        }
    }

    #[pyclass(name = "MctsPlayer")]
    pub struct PyMctsPlayer {
        player: MctsPlayer,
    }

    #[pymethods]
    impl PyMctsPlayer {
        /// Either `iterations` or `seconds` bounds the search; `seconds` wins
        /// when both are given.
        #[new]
        #[pyo3(signature = (iterations=50_000, seconds=None, exploration=1.0, win_rate=false, seed=None))]
        pub fn new(
            iterations: u32,
            seconds: Option<f64>,
            exploration: f64,
            win_rate: bool,
            seed: Option<u64>,
        ) -> PyResult<Self> {
            let mut config = MctsConfig::default()
                .with_iterations(iterations)
                .with_exploration(exploration);
            if let Some(secs) = seconds {
                config = config.with_duration(duration(secs)?);
            }
            if win_rate {
                config = config.with_selection(ChildSelection::WinRate);
            }
            config.seed = seed;
            Ok(PyMctsPlayer {
                player: MctsPlayer::new(config).map_err(config_err)?,
            })
        }

        pub fn get_move(&mut self, game: &PyGame) -> Option<PyMove> {
            self.player.get_move(&game.game).map(|move_| PyMove { move_ })
        }
    }

    #[pyclass(name = "RavePlayer")]
    pub struct PyRavePlayer {
        player: RavePlayer,
    }

    #[pymethods]
    impl PyRavePlayer {
        #[new]
        #[pyo3(signature = (iterations=3_000, seconds=None, exploration=1.0, rave_k=1.0, seed=None))]
        pub fn new(
            iterations: u32,
            seconds: Option<f64>,
            exploration: f64,
            rave_k: f64,
            seed: Option<u64>,
        ) -> PyResult<Self> {
            let mut config = RaveConfig::default()
                .with_iterations(iterations)
                .with_exploration(exploration)
                .with_rave_k(rave_k);
            if let Some(secs) = seconds {
                config = config.with_duration(duration(secs)?);
            }
            config.seed = seed;
            Ok(PyRavePlayer {
                player: RavePlayer::new(config).map_err(config_err)?,
            })
        }

        pub fn get_move(&mut self, game: &PyGame) -> Option<PyMove> {
            self.player.get_move(&game.game).map(|move_| PyMove { move_ })
        }
    }

    fn duration(secs: f64) -> PyResult<std::time::Duration> {
        std::time::Duration::try_from_secs_f64(secs)
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))
    }
}
