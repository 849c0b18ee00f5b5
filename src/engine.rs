use alloc::vec;
use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use rand::prelude::*;

use crate::*;

/// Owns all mutable state of one puzzle session: mine layout, per-cell
/// reveal/flag state, the ability book, and the terminal flag. A session is
/// single-use; restarting means constructing a new engine.
#[derive(Clone, Debug, PartialEq)]
pub struct GameEngine {
    mask: ShapeMask,
    board: Array2<CellContent>,
    visible: Array2<bool>,
    flags: Array2<bool>,
    abilities: AbilityBook,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    mine_count: CellCount,
    playable_count: CellCount,
    game_over: bool,
    triggered_mine: Option<Coord2>,
    rng: SmallRng,
}

impl GameEngine {
    /// Builds a session with `mine_count` mines sampled uniformly without
    /// replacement from the playable set. A request beyond the playable
    /// capacity is clamped, not rejected.
    pub fn new(mask: ShapeMask, mine_count: CellCount, seed: u64) -> Self {
        let playable: Vec<Coord2> = mask.iter_open().collect();

        let placed = usize::from(mine_count).min(playable.len());
        if placed < usize::from(mine_count) {
            log::warn!(
                "requested {} mines but only {} playable cells, clamped",
                mine_count,
                playable.len()
            );
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let mine_coords: Vec<Coord2> = rand::seq::index::sample(&mut rng, playable.len(), placed)
            .iter()
            .map(|i| playable[i])
            .collect();

        Self::build(mask, &mine_coords, rng)
    }

    /// Explicit mine placement, for drivers and tests that need a known
    /// layout. Every coordinate must belong to the playable set.
    pub fn with_mines(mask: ShapeMask, mine_coords: &[Coord2], seed: u64) -> Result<Self> {
        for &coords in mine_coords {
            if !mask.is_open(coords) {
                return Err(GameError::InvalidCoords);
            }
        }
        Ok(Self::build(mask, mine_coords, SmallRng::seed_from_u64(seed)))
    }

    fn build(mask: ShapeMask, mine_coords: &[Coord2], rng: SmallRng) -> Self {
        let (rows, cols) = mask.size();
        let dim = [usize::from(rows), usize::from(cols)];

        let mut board: Array2<CellContent> = Array2::default(dim);
        for &coords in mine_coords {
            board[coords.to_nd_index()] = CellContent::Mine;
        }
        // Duplicates collapse into one mine, so count cells rather than input.
        let mine_count = board.iter().filter(|content| content.is_mine()).count() as CellCount;

        for coords in mask.iter_open() {
            if board[coords.to_nd_index()].is_mine() {
                continue;
            }
            let adjacent = mask
                .open_neighbors(coords)
                .filter(|&pos| board[pos.to_nd_index()].is_mine())
                .count() as u8;
            board[coords.to_nd_index()] = CellContent::Clear(adjacent);
        }

        let playable_count = mask.playable_count();
        Self {
            mask,
            board,
            visible: Array2::default(dim),
            flags: Array2::default(dim),
            abilities: AbilityBook::default(),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            mine_count,
            playable_count,
            game_over: false,
            triggered_mine: None,
            rng,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.mask.size()
    }

    pub fn mask(&self) -> &ShapeMask {
        &self.mask
    }

    /// Mines currently on the board. Drops by one whenever a mine is
    /// neutralized by `revive` or `eliminate`.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn playable_count(&self) -> CellCount {
        self.playable_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count.0 as isize)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.visible[coords.to_nd_index()]
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.flags[coords.to_nd_index()]
    }

    /// Ground truth for end-of-game rendering; not for live play.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.board[coords.to_nd_index()].is_mine()
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        if self.triggered_mine == Some(coords) {
            return CellView::Detonated;
        }
        let nd = coords.to_nd_index();
        if self.flags[nd] {
            CellView::Flagged
        } else if self.visible[nd] {
            match self.board[nd] {
                CellContent::Clear(adjacent) => CellView::Revealed(adjacent),
                CellContent::Mine => CellView::Detonated,
            }
        } else {
            CellView::Hidden
        }
    }

    pub fn abilities(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter()
    }

    pub fn ability_remaining(&self, name: &str) -> Option<u8> {
        self.abilities.remaining(name)
    }

    /// Reveals a cell, cascading through zero-count regions. Hitting a mine
    /// ends the session unless a `revive` use absorbs it.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;
        let nd = coords.to_nd_index();
        if self.game_over || self.flags[nd] || self.visible[nd] {
            return Ok(NoChange);
        }

        if self.board[nd].is_mine() {
            if self.abilities.try_consume(REVIVE) {
                self.neutralize_mine(coords);
                self.flood_fill(coords);
                return Ok(if self.check_win() { Won } else { Revived });
            }
            self.triggered_mine = Some(coords);
            self.game_over = true;
            return Ok(HitMine);
        }

        self.flood_fill(coords);
        Ok(if self.check_win() { Won } else { Revealed })
    }

    /// Flips the flag on a hidden cell. Revealed cells and finished sessions
    /// are left untouched.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let nd = coords.to_nd_index();
        if self.game_over || self.visible[nd] {
            return Ok(MarkOutcome::NoChange);
        }

        self.flags[nd] = !self.flags[nd];
        if self.flags[nd] {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// True once every safe cell is revealed, or once the flagged mines
    /// exactly match the mines on the board. Pure query; never mutates.
    pub fn check_win(&self) -> bool {
        if self.revealed_count.0 == self.playable_count - self.mine_count {
            return true;
        }

        let flagged_mines = self
            .mask
            .iter_open()
            .filter(|&coords| {
                let nd = coords.to_nd_index();
                self.board[nd].is_mine() && self.flags[nd]
            })
            .count() as CellCount;
        flagged_mines == self.mine_count
    }

    /// Spends one use of the named ability and applies its effect. False when
    /// the name is unknown, the ability is depleted, the session is finished,
    /// or `eliminate` finds no target (the use is still spent in that last
    /// case).
    pub fn use_ability(&mut self, name: &str) -> bool {
        if self.game_over {
            return false;
        }
        if !self.abilities.try_consume(name) {
            return false;
        }

        match name {
            ELIMINATE => {
                let candidates: Vec<Coord2> = self
                    .mask
                    .iter_open()
                    .filter(|&coords| {
                        let nd = coords.to_nd_index();
                        !self.visible[nd] && !self.flags[nd]
                    })
                    .collect();
                if candidates.is_empty() {
                    return false;
                }

                let target = candidates[self.rng.random_range(0..candidates.len())];
                if self.board[target.to_nd_index()].is_mine() {
                    self.neutralize_mine(target);
                }
                self.flood_fill(target);
                true
            }
            // Registered abilities without an active effect (`revive` fires
            // inside `reveal`) just consume the use.
            _ => true,
        }
    }

    /// Turns a mine into a regular cell and restores the adjacency invariant:
    /// the cell gets its true remaining-mine count and every non-mine
    /// neighbor's count drops by one.
    fn neutralize_mine(&mut self, coords: Coord2) {
        let adjacent = self
            .mask
            .open_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()].is_mine())
            .count() as u8;
        self.board[coords.to_nd_index()] = CellContent::Clear(adjacent);
        self.mine_count -= 1;

        for pos in self.mask.open_neighbors(coords) {
            let nd = pos.to_nd_index();
            if let CellContent::Clear(count) = self.board[nd] {
                self.board[nd] = CellContent::Clear(count.saturating_sub(1));
            }
        }
    }

    /// Iterative reveal: an explicit work stack instead of recursion, so
    /// arbitrarily large boards cannot overflow the call stack. Expansion
    /// only happens from zero-count cells and never crosses flags.
    fn flood_fill(&mut self, start: Coord2) {
        let mut stack = vec![start];
        while let Some(coords) = stack.pop() {
            let nd = coords.to_nd_index();
            if self.visible[nd] {
                continue;
            }
            self.visible[nd] = true;
            self.revealed_count += 1;

            if self.board[nd].is_zero() {
                for pos in self.mask.open_neighbors(coords) {
                    let pos_nd = pos.to_nd_index();
                    if !self.visible[pos_nd] && !self.flags[pos_nd] {
                        stack.push(pos);
                    }
                }
            }
        }
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.mask.is_open(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}
