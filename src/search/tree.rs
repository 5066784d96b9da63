//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by `NodeId`.
//! The root is always `NodeId(0)`.

use crate::color::PieceColor;
use crate::config::ChildSelection;
use crate::game::Game;
use crate::outcome::GameState;
use crate::r#move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One game state reached by playing `mv` from the parent.
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,

    /// Move that led here; `None` only at the root.
    pub mv: Option<Move>,

    pub game: Game,

    pub visits: u32,

    /// Playouts won by the color that moved into this node.
    pub wins: f64,

    /// All-moves-as-first statistics, only maintained by RAVE.
    pub rave_visits: u32,
    pub rave_wins: f64,

    /// Empty until expanded.
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(parent: Option<NodeId>, mv: Option<Move>, game: Game) -> Self {
        Node {
            parent,
            mv,
            game,
            visits: 0,
            wins: 0.0,
            rave_visits: 0,
            rave_wins: 0.0,
            children: Vec::new(),
        }
    }

    /// Color that played the move into this node.
    #[inline]
    pub fn mover(&self) -> PieceColor {
        self.game.next_turn().opposite()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.game.is_over()
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Wins over visits; 0 for an unvisited node.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCB1 with exploration multiplier `c`. Unvisited nodes score infinity.
    pub fn ucb1(&self, parent_visits: u32, c: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = self.visits as f64;
        self.wins / n + c * (2.0 * (parent_visits.max(1) as f64).ln() / n).sqrt()
    }
}

/// Arena-backed search tree.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn new(game: &Game) -> Self {
        SearchTree {
            nodes: vec![Node::new(None, None, game.clone())],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add one child per legal move of a childless node. Terminal and already
    /// expanded nodes are left alone.
    ///
    /// # Panics
    ///
    /// If a non-terminal node has no legal moves or a generated move is
    /// rejected by the game. Both mean move generation is broken.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn expand(&mut self, id: NodeId) {
        let node = self.get(id);
        if node.is_terminal() || node.is_expanded() {
            return;
        }

        let parent_game = node.game.clone();
        let moves = parent_game.legal_moves();
        assert!(
            !moves.is_empty(),
            "ongoing position has no legal moves:\n{parent_game}"
        );

        let mut children = Vec::with_capacity(moves.len());
        for mv in moves {
            let mut game = parent_game.clone();
            assert!(game.run_move(mv), "generated move {mv} was rejected");
            let child = NodeId(self.nodes.len() as u32);
            self.nodes.push(Node::new(Some(id), Some(mv.clone()), game));
            children.push(child);
        }
        self.get_mut(id).children = children;
    }

    /// Child of `id` with the highest `score(child, parent_visits)`. Ties go
    /// to the earlier child.
    pub fn best_child_by<F>(&self, id: NodeId, score: F) -> Option<NodeId>
    where
        F: Fn(&Node, u32) -> f64,
    {
        let parent = self.get(id);
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for &child in &parent.children {
            let s = score(self.get(child), parent.visits);
            if best.is_none() || s > best_score {
                best = Some(child);
                best_score = s;
            }
        }
        best
    }

    /// Walk from the root to the node the next playout should start from,
    /// expanding on the way. Returns the path, root first.
    ///
    /// The descent stops at a terminal node or at a node that has never been
    /// visited. A visited leaf is expanded and its best child (always an
    /// unvisited one) ends the path.
    pub fn select_path<F>(&mut self, score: F) -> Vec<NodeId>
    where
        F: Fn(&Node, u32) -> f64,
    {
        let mut current = self.root();
        let mut path = vec![current];

        loop {
            let node = self.get(current);
            if node.is_terminal() {
                break;
            }
            if !node.is_expanded() {
                if node.visits == 0 && current != self.root() {
                    break;
                }
                self.expand(current);
            }
            match self.best_child_by(current, &score) {
                Some(child) => {
                    current = child;
                    path.push(child);
                }
                None => break,
            }
        }

        path
    }

    /// Count a visit on every node of `path` and credit a win to each node
    /// whose mover won `result`.
    pub fn backpropagate(&mut self, path: &[NodeId], result: GameState) {
        let winner = result.winner();
        for &id in path {
            let node = self.get_mut(id);
            node.visits += 1;
            if winner == Some(node.mover()) {
                node.wins += 1.0;
            }
        }
    }

    /// Root child to play once the search is done.
    pub fn best_root_child(&self, selection: ChildSelection) -> Option<NodeId> {
        match selection {
            ChildSelection::MostVisits => {
                self.best_child_by(self.root(), |child, _| child.visits as f64)
            }
            ChildSelection::WinRate => self.best_child_by(self.root(), |child, _| child.win_rate()),
        }
    }
}
