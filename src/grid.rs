//! Karnaugh map layout and group geometry.
//!
//! Classic shapes are used: 1×2, 2×2, 2×4, 4×4 and, for five variables, a
//! 4×8 map made of two 4×4 panels side by side. The leading variables pick the
//! row, the trailing ones the column, and for five variables the first
//! variable picks the panel. Inside a panel both axes run in reflected Gray
//! order, so neighbouring cells (wrapping around the edges) differ in exactly
//! one variable; cells at the same spot of the two panels differ in the panel
//! variable only.

use log::debug;
use serde::Serialize;

use crate::cover::Cover;
use crate::implicant::Implicant;
use crate::sop::{term, Notation};
use crate::truth_table::{TermKind, TruthTable};
use crate::variables::{VariableSet, MAX_VARIABLES};

/// Reflected binary code of `i`.
pub fn gray(i: usize) -> usize {
    i ^ (i >> 1)
}

fn from_gray(code: usize) -> usize {
    let mut value = code;
    let mut shift = code >> 1;
    while shift != 0 {
        value ^= shift;
        shift >>= 1;
    }
    value
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    pub panels: usize,
    pub row_bits: usize,
    /// Column bits inside one panel
    pub col_bits: usize,
}

impl Layout {
    pub fn for_variables(n_variables: usize) -> Layout {
        debug_assert!((1..=MAX_VARIABLES).contains(&n_variables));
        let panel_bits = n_variables.saturating_sub(4);
        let rest = n_variables - panel_bits;
        let row_bits = rest / 2;
        let col_bits = rest - row_bits;
        Layout {
            rows: 1 << row_bits,
            cols: (1 << col_bits) << panel_bits,
            panels: 1 << panel_bits,
            row_bits,
            col_bits,
        }
    }

    pub fn panel_cols(&self) -> usize {
        self.cols / self.panels
    }

    /// Assignment index shown at `(row, col)`.
    pub fn index_at(&self, row: usize, col: usize) -> u32 {
        let panel = col / self.panel_cols();
        let col = col % self.panel_cols();
        let index = (panel << (self.row_bits + self.col_bits)) | (gray(row) << self.col_bits) | gray(col);
        index as u32
    }

    /// Position of an assignment index, inverse of [`Layout::index_at`].
    pub fn cell_of(&self, index: u32) -> (usize, usize) {
        let index = index as usize;
        let col = from_gray(index & ((1 << self.col_bits) - 1));
        let row = from_gray((index >> self.col_bits) & ((1 << self.row_bits) - 1));
        let panel = index >> (self.row_bits + self.col_bits);
        (row, panel * self.panel_cols() + col)
    }

    /// Whether two cells are neighbours on the map: torus neighbours inside a
    /// panel, or the same spot in different panels.
    pub fn adjacent(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        let pc = self.panel_cols();
        let (panel_a, col_a) = (a.1 / pc, a.1 % pc);
        let (panel_b, col_b) = (b.1 / pc, b.1 % pc);

        if panel_a != panel_b {
            return a.0 == b.0 && col_a == col_b;
        }
        (a.0 == b.0 && ring_neighbours(col_a, col_b, pc))
            || (col_a == col_b && ring_neighbours(a.0, b.0, self.rows))
    }
}

fn ring_neighbours(a: usize, b: usize, len: usize) -> bool {
    a != b && ((a + 1) % len == b || (b + 1) % len == a)
}

/// Start and length of a cyclic run of `true` in `members`.
fn cyclic_run(members: &[bool]) -> (usize, usize) {
    let len = members.iter().filter(|&&m| m).count();
    let total = members.len();
    if len == total {
        return (0, len);
    }
    let start = (0..total)
        .find(|&i| members[i] && !members[(i + total - 1) % total])
        .unwrap_or(0);
    debug_assert!(
        (0..len).all(|k| members[(start + k) % total]),
        "members do not form one cyclic run: {:?}",
        members
    );
    (start, len)
}

/// Splits a run that may wrap past `total` into non-wrapping `(start, len)` pieces.
fn unwrap_run(start: usize, len: usize, total: usize) -> Vec<(usize, usize)> {
    if start + len <= total {
        vec![(start, len)]
    } else {
        vec![(start, total - start), (0, start + len - total)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
}

/// The part of a group inside one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// May extend past the panel's bottom or right edge, wrapping to the top or left
    pub bounds: Rect,
    /// `bounds` cut into 1, 2 or 4 rectangles that do not wrap, for drawing
    pub segments: Vec<Rect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Prime implicant id
    pub implicant: usize,
    pub term: String,
    /// Covered `(row, col)` coordinates in row-major order
    pub cells: Vec<(usize, usize)>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub index: u32,
    pub kind: TermKind,
    /// Ids of the selected prime implicants covering this cell
    pub groups: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    #[serde(flatten)]
    pub layout: Layout,
    pub cells: Vec<Vec<GridCell>>,
    pub groups: Vec<Group>,
}

impl Grid {
    /// Lays out `table` and one group per selected implicant of `cover`.
    pub fn new(
        table: &TruthTable,
        primes: &[Implicant],
        cover: &Cover,
        variables: &VariableSet,
        notation: Notation,
    ) -> Grid {
        let layout = Layout::for_variables(table.n_variables());

        let cells: Vec<Vec<GridCell>> = (0..layout.rows)
            .map(|row| {
                (0..layout.cols)
                    .map(|col| {
                        let index = layout.index_at(row, col);
                        GridCell {
                            row,
                            col,
                            index,
                            kind: table.kind(index),
                            groups: cover
                                .selected
                                .iter()
                                .copied()
                                .filter(|&id| primes[id].contains(index))
                                .collect(),
                        }
                    })
                    .collect()
            })
            .collect();

        let groups: Vec<Group> = cover
            .selected
            .iter()
            .map(|&id| group(&layout, &cells, id, &primes[id], variables, notation))
            .collect();

        debug!(
            "{}x{} map ({} panel(s)) with {} groups",
            layout.rows,
            layout.cols,
            layout.panels,
            groups.len()
        );
        Grid {
            layout,
            cells,
            groups,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> &GridCell {
        &self.cells[row][col]
    }

    /// The cell showing assignment `index`.
    pub fn cell_of(&self, index: u32) -> &GridCell {
        let (row, col) = self.layout.cell_of(index);
        self.cell(row, col)
    }

    pub fn index_at(&self, row: usize, col: usize) -> u32 {
        self.layout.index_at(row, col)
    }

    pub fn adjacent(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        self.layout.adjacent(a, b)
    }
}

fn group(
    layout: &Layout,
    cells: &[Vec<GridCell>],
    id: usize,
    implicant: &Implicant,
    variables: &VariableSet,
    notation: Notation,
) -> Group {
    let covered: Vec<(usize, usize)> = cells
        .iter()
        .flatten()
        .filter(|c| implicant.contains(c.index))
        .map(|c| (c.row, c.col))
        .collect();
    debug_assert_eq!(covered.len() as u32, implicant.span());

    let pc = layout.panel_cols();
    let mut blocks = Vec::new();
    for panel in 0..layout.panels {
        let mut rows = vec![false; layout.rows];
        let mut cols = vec![false; pc];
        for &(r, c) in covered.iter().filter(|(_, c)| c / pc == panel) {
            rows[r] = true;
            cols[c % pc] = true;
        }
        if !rows.iter().any(|&r| r) {
            continue;
        }

        let (row, height) = cyclic_run(&rows);
        let (col, width) = cyclic_run(&cols);
        let offset = panel * pc;

        let mut segments = Vec::new();
        for (seg_row, seg_height) in unwrap_run(row, height, layout.rows) {
            for (seg_col, seg_width) in unwrap_run(col, width, pc) {
                segments.push(Rect {
                    row: seg_row,
                    col: offset + seg_col,
                    height: seg_height,
                    width: seg_width,
                });
            }
        }

        blocks.push(Block {
            bounds: Rect {
                row,
                col: offset + col,
                height,
                width,
            },
            segments,
        });
    }

    Group {
        implicant: id,
        term: term(implicant, variables, notation),
        cells: covered,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::minimal_cover;
    use crate::primes::prime_implicants;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn grid_for(n: usize, minterms: &[u32], dont_cares: &[u32]) -> Grid {
        let table = TruthTable::from_terms(n, minterms, dont_cares).unwrap();
        let primes = prime_implicants(&table);
        let cover = minimal_cover(&primes, &table);
        let vars = VariableSet::alphabetic(n).unwrap();
        Grid::new(&table, &primes, &cover, &vars, Notation::Canonical)
    }

    #[rstest]
    #[case(1, 1, 2, 1)]
    #[case(2, 2, 2, 1)]
    #[case(3, 2, 4, 1)]
    #[case(4, 4, 4, 1)]
    #[case(5, 4, 8, 2)]
    fn classic_shapes(
        #[case] n: usize,
        #[case] rows: usize,
        #[case] cols: usize,
        #[case] panels: usize,
    ) {
        let layout = Layout::for_variables(n);
        assert_eq!((layout.rows, layout.cols, layout.panels), (rows, cols, panels));
        assert_eq!(layout.rows * layout.cols, 1 << n);
    }

    #[test_log::test]
    fn axes_run_in_gray_order() {
        let layout = Layout::for_variables(4);
        let first_row: Vec<u32> = (0..4).map(|c| layout.index_at(0, c)).collect();
        let first_col: Vec<u32> = (0..4).map(|r| layout.index_at(r, 0)).collect();
        assert_eq!(first_row, [0, 1, 3, 2]);
        assert_eq!(first_col, [0, 4, 12, 8]);
    }

    #[test_log::test]
    fn second_panel_holds_the_upper_half() {
        let layout = Layout::for_variables(5);
        assert_eq!(layout.index_at(0, 4), 16);
        assert_eq!(layout.index_at(3, 7), 16 | 0b1000 | 0b10);
    }

    #[test_log::test]
    fn index_and_cell_are_inverse() {
        for n in 1..=MAX_VARIABLES {
            let layout = Layout::for_variables(n);
            let mut seen = vec![false; 1 << n];
            for row in 0..layout.rows {
                for col in 0..layout.cols {
                    let index = layout.index_at(row, col);
                    assert_eq!(layout.cell_of(index), (row, col));
                    seen[index as usize] = true;
                }
            }
            assert!(seen.iter().all(|&s| s), "n = {}", n);
        }
    }

    #[test_log::test]
    fn adjacency_matches_single_bit_flips() {
        for n in 1..=MAX_VARIABLES {
            let layout = Layout::for_variables(n);
            for a in 0..1u32 << n {
                for b in 0..1u32 << n {
                    let hamming_one = (a ^ b).count_ones() == 1;
                    assert_eq!(
                        layout.adjacent(layout.cell_of(a), layout.cell_of(b)),
                        hamming_one,
                        "n = {}, {} vs {}",
                        n,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test_log::test]
    fn corners_form_one_wrapped_block() {
        // !B.!D over four variables
        let grid = grid_for(4, &[0, 2, 8, 10], &[]);
        assert_eq!(grid.groups.len(), 1);
        let group = &grid.groups[0];
        assert_eq!(group.term, "!B.!D");
        assert_eq!(group.cells, [(0, 0), (0, 3), (3, 0), (3, 3)]);
        assert_eq!(
            group.blocks[0].bounds,
            Rect {
                row: 3,
                col: 3,
                height: 2,
                width: 2
            }
        );
        assert_eq!(group.blocks[0].segments.len(), 4);
    }

    #[test_log::test]
    fn column_wrap_splits_in_two() {
        // !C over three variables: first and last column
        let grid = grid_for(3, &[0, 2, 4, 6], &[]);
        let block = &grid.groups[0].blocks[0];
        assert_eq!(
            block.bounds,
            Rect {
                row: 0,
                col: 3,
                height: 2,
                width: 2
            }
        );
        assert_eq!(
            block.segments,
            [
                Rect {
                    row: 0,
                    col: 3,
                    height: 2,
                    width: 1
                },
                Rect {
                    row: 0,
                    col: 0,
                    height: 2,
                    width: 1
                },
            ]
        );
    }

    #[test_log::test]
    fn group_spanning_both_panels() {
        // !C.!E + C.E with A free: every group has a block in each panel
        let minterms = [0, 2, 5, 7, 8, 10, 13, 15, 16, 18, 21, 23, 24, 26, 29, 31];
        let grid = grid_for(5, &minterms, &[]);
        assert_eq!(grid.groups.len(), 2);
        for group in &grid.groups {
            assert_eq!(group.cells.len(), 8);
            assert_eq!(group.blocks.len(), 2);
            assert!(group.blocks[1].bounds.col >= 4);
            assert_eq!(group.blocks[0].bounds.row, group.blocks[1].bounds.row);
        }
    }

    #[test_log::test]
    fn cells_know_their_groups() {
        let grid = grid_for(2, &[1, 2, 3], &[]);
        // A + B: assignment 3 sits in both groups
        assert_eq!(grid.cell_of(3).groups.len(), 2);
        assert_eq!(grid.cell_of(1).groups.len(), 1);
        assert!(grid.cell_of(0).groups.is_empty());
        assert_eq!(grid.cell_of(0).kind, TermKind::Zero);
        assert_eq!(grid.index_at(1, 1), 3);
        assert!(grid.adjacent((0, 1), (1, 1)));
        assert!(!grid.adjacent((0, 0), (1, 1)));
    }

    #[test_log::test]
    fn dont_cares_show_on_the_map() {
        let grid = grid_for(3, &[1], &[3]);
        assert_eq!(grid.cell_of(3).kind, TermKind::DontCare);
        assert_eq!(grid.groups[0].cells.len(), 2);
    }
}
