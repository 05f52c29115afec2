// A* search over an `OccupancyGrid`.
//
// 4-connected, uniform edge cost 1, Manhattan heuristic (admissible and
// consistent here, so returned paths are shortest). All bookkeeping lives in
// `Vec`s indexed by row-major cell index and is dropped when `plan` returns.
//
// The open set is a `BinaryHeap` with lazy deletion. Entries are ordered by
// (f_score, first-insertion sequence): among equal f the cell that entered
// the open set earliest wins, and a cell whose score improves while still
// open keeps its original sequence number. Selection is therefore identical
// to scanning an insertion-ordered list for the first strictly-smallest f.

use super::grid::OccupancyGrid;
use super::path::Path;
use super::types::Point;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Entry in the open set (min-heap via reversed ordering).
#[derive(Debug, PartialEq, Eq)]
struct OpenEntry {
    cell: usize,
    f_score: u32,
    seq: u64,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: smallest f, then smallest seq, is "greatest".
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Per-call search bookkeeping.
struct SearchState {
    came_from: Vec<Option<usize>>,
    g_score: Vec<u32>,
    f_score: Vec<u32>,
    /// `Some(seq)` while the cell is in the open set.
    open_seq: Vec<Option<u64>>,
    next_seq: u64,
}

impl SearchState {
    fn new(cells: usize) -> Self {
        Self {
            came_from: vec![None; cells],
            g_score: vec![u32::MAX; cells],
            f_score: vec![u32::MAX; cells],
            open_seq: vec![None; cells],
            next_seq: 0,
        }
    }

    fn open_sequence(&mut self, cell: usize) -> u64 {
        match self.open_seq[cell] {
            Some(seq) => seq,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.open_seq[cell] = Some(seq);
                seq
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl AStarPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Shortest 4-connected path from `start` to `goal`, or an empty path if
    /// none exists. Blocked cells are never entered, but a blocked `start` is
    /// still expanded; a blocked `goal` is unreachable unless it equals `start`.
    pub fn plan(&self, grid: &OccupancyGrid, start: Point, goal: Point) -> Path {
        let (Some(start_idx), Some(goal_idx)) = (grid.index(start), grid.index(goal)) else {
            return Path::empty();
        };

        let mut state = SearchState::new(grid.cell_count());
        let mut open = BinaryHeap::new();

        state.g_score[start_idx] = 0;
        state.f_score[start_idx] = heuristic(start, goal);
        let seq = state.open_sequence(start_idx);
        open.push(OpenEntry {
            cell: start_idx,
            f_score: state.f_score[start_idx],
            seq,
        });

        while let Some(entry) = open.pop() {
            let ci = entry.cell;
            if state.open_seq[ci] != Some(entry.seq) || state.f_score[ci] != entry.f_score {
                continue; // stale
            }
            state.open_seq[ci] = None;

            if ci == goal_idx {
                return reconstruct_path(grid, &state.came_from, goal_idx);
            }

            let current = cell_point(grid, ci);
            let tentative_g = state.g_score[ci] + 1;

            for neighbor in current.neighbors() {
                if !grid.is_traversable(neighbor) {
                    continue;
                }
                let Some(ni) = grid.index(neighbor) else {
                    continue;
                };

                if tentative_g < state.g_score[ni] {
                    state.came_from[ni] = Some(ci);
                    state.g_score[ni] = tentative_g;
                    state.f_score[ni] = tentative_g + heuristic(neighbor, goal);
                    let seq = state.open_sequence(ni);
                    open.push(OpenEntry {
                        cell: ni,
                        f_score: state.f_score[ni],
                        seq,
                    });
                }
            }
        }

        Path::empty()
    }
}

/// Convenience wrapper around [`AStarPlanner::plan`].
pub fn plan(grid: &OccupancyGrid, start: Point, goal: Point) -> Path {
    AStarPlanner::new().plan(grid, start, goal)
}

/// Manhattan distance.
fn heuristic(from: Point, to: Point) -> u32 {
    from.manhattan_distance(to)
}

fn cell_point(grid: &OccupancyGrid, index: usize) -> Point {
    Point::new((index % grid.width()) as i32, (index / grid.width()) as i32)
}

fn reconstruct_path(grid: &OccupancyGrid, came_from: &[Option<usize>], goal: usize) -> Path {
    let mut cells = vec![cell_point(grid, goal)];
    let mut current = goal;
    while let Some(prev) = came_from[current] {
        cells.push(cell_point(grid, prev));
        current = prev;
    }
    cells.reverse();
    Path::new(cells)
}
