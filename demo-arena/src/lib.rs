//! Reference arena state and snapshot layout for the bomber demo.
//!
//! [`ArenaState`] is the whole match: the board, five bomber slots and
//! sixteen bomb slots. Its snapshot layout is struct-of-arrays, listed by
//! [`arena_schema`] in the exact order `write_fields` walks it.

mod cell;

use codec::{CodecError, CodecResult, Handle, SnapshotBuffer, SnapshotState, ValueReason};
use schema::{FieldDef, FieldKind, Schema};

pub use cell::{Cell, ItemKind};

pub const BOARD_COLS: usize = 15;
pub const BOARD_ROWS: usize = 13;
pub const CELL_COUNT: usize = BOARD_COLS * BOARD_ROWS;
pub const MAX_BOMBERS: usize = 5;
pub const MAX_BOMBS: usize = 16;

/// Seconds between placing a bomb and its explosion.
pub const BOMB_FUSE: f32 = 2.5;

/// Cell-space spawn points, one per bomber slot.
pub const SPAWNS: [(usize, usize); MAX_BOMBERS] = [(1, 1), (13, 1), (1, 11), (13, 11), (7, 6)];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bomber {
    pub alive: bool,
    /// Position in cell units; cell centres sit at `n + 0.5`.
    pub x: f32,
    pub y: f32,
    pub bombs_left: i32,
    pub flame: i32,
    /// Handle of the input device or peer driving this bomber.
    pub controller: Handle,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bomb {
    pub active: bool,
    pub col: i32,
    pub row: i32,
    pub fuse: f32,
    pub owner: Handle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArenaState {
    pub tick: i32,
    /// Row-major, `BOARD_COLS` cells per row.
    pub cells: [Cell; CELL_COUNT],
    pub bombers: [Bomber; MAX_BOMBERS],
    pub bombs: [Bomb; MAX_BOMBS],
}

impl Default for ArenaState {
    fn default() -> Self {
        Self {
            tick: 0,
            cells: [Cell::Floor; CELL_COUNT],
            bombers: [Bomber::default(); MAX_BOMBERS],
            bombs: [Bomb::default(); MAX_BOMBS],
        }
    }
}

impl ArenaState {
    /// Builds the standard board with every bomber alive at its spawn.
    ///
    /// The border and every even interior intersection are walls. Bricks
    /// fill a fixed pattern, keeping the cells next to each spawn clear.
    #[must_use]
    pub fn new() -> Self {
        let mut state = Self::default();
        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                let border = col == 0 || row == 0 || col == BOARD_COLS - 1 || row == BOARD_ROWS - 1;
                let pillar = col % 2 == 0 && row % 2 == 0;
                let cell = if border || pillar {
                    Cell::Wall
                } else if (col * 7 + row * 3) % 4 == 0 && !near_spawn(col, row) {
                    Cell::Brick
                } else {
                    Cell::Floor
                };
                state.cells[row * BOARD_COLS + col] = cell;
            }
        }
        for (slot, (bomber, &(col, row))) in state.bombers.iter_mut().zip(&SPAWNS).enumerate() {
            *bomber = Bomber {
                alive: true,
                x: col as f32 + 0.5,
                y: row as f32 + 0.5,
                bombs_left: 1,
                flame: 2,
                controller: Handle::new(slot as u64 + 1),
            };
        }
        state
    }

    /// Index into `cells`, or `None` off the board.
    #[must_use]
    pub const fn cell_index(col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= BOARD_COLS || row as usize >= BOARD_ROWS {
            return None;
        }
        Some(row as usize * BOARD_COLS + col as usize)
    }

    /// Cell at `(col, row)`; off-board reads as a wall.
    #[must_use]
    pub fn cell(&self, col: i32, row: i32) -> Cell {
        Self::cell_index(col, row).map_or(Cell::Wall, |index| self.cells[index])
    }

    /// Sets a cell; off-board writes are ignored.
    pub fn set_cell(&mut self, col: i32, row: i32, cell: Cell) {
        if let Some(index) = Self::cell_index(col, row) {
            self.cells[index] = cell;
        }
    }

    /// Number of bombers still alive.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.bombers.iter().filter(|bomber| bomber.alive).count()
    }

    /// Number of bombs currently on the board.
    #[must_use]
    pub fn active_bombs(&self) -> usize {
        self.bombs.iter().filter(|bomb| bomb.active).count()
    }
}

fn near_spawn(col: usize, row: usize) -> bool {
    SPAWNS
        .iter()
        .any(|&(sc, sr)| sc.abs_diff(col) + sr.abs_diff(row) <= 1)
}

/// The arena snapshot layout, in write order.
#[must_use]
pub fn arena_schema() -> Schema {
    let bombers = MAX_BOMBERS as u32;
    let bombs = MAX_BOMBS as u32;
    Schema {
        fields: vec![
            FieldDef::integer("tick"),
            FieldDef::array("cells", FieldKind::Integer, CELL_COUNT as u32),
            FieldDef::array("bomber_alive", FieldKind::Boolean, bombers),
            FieldDef::array("bomber_x", FieldKind::Float, bombers),
            FieldDef::array("bomber_y", FieldKind::Float, bombers),
            FieldDef::array("bomber_bombs_left", FieldKind::Integer, bombers),
            FieldDef::array("bomber_flame", FieldKind::Integer, bombers),
            FieldDef::array("bomber_controller", FieldKind::Pointer, bombers),
            FieldDef::array("bomb_active", FieldKind::Boolean, bombs),
            FieldDef::array("bomb_col", FieldKind::Integer, bombs),
            FieldDef::array("bomb_row", FieldKind::Integer, bombs),
            FieldDef::array("bomb_fuse", FieldKind::Float, bombs),
            FieldDef::array("bomb_owner", FieldKind::Pointer, bombs),
        ],
    }
}

/// Encoded size of one arena snapshot.
pub const ARENA_SNAPSHOT_BYTES: usize = 4
    + CELL_COUNT * 4
    + MAX_BOMBERS * (1 + 4 + 4 + 4 + 4 + 8)
    + MAX_BOMBS * (1 + 4 + 4 + 4 + 8);

impl SnapshotState for ArenaState {
    fn schema() -> Schema {
        arena_schema()
    }

    fn encoded_size() -> usize {
        ARENA_SNAPSHOT_BYTES
    }

    fn write_fields<const N: usize>(&self, buf: &mut SnapshotBuffer<N>) -> CodecResult<()> {
        buf.write_integer(self.tick)?;
        for cell in &self.cells {
            buf.write_integer(cell.code())?;
        }

        for bomber in &self.bombers {
            buf.write_boolean(bomber.alive)?;
        }
        for bomber in &self.bombers {
            buf.write_float(bomber.x)?;
        }
        for bomber in &self.bombers {
            buf.write_float(bomber.y)?;
        }
        for bomber in &self.bombers {
            buf.write_integer(bomber.bombs_left)?;
        }
        for bomber in &self.bombers {
            buf.write_integer(bomber.flame)?;
        }
        for bomber in &self.bombers {
            buf.write_pointer(bomber.controller)?;
        }

        for bomb in &self.bombs {
            buf.write_boolean(bomb.active)?;
        }
        for bomb in &self.bombs {
            buf.write_integer(bomb.col)?;
        }
        for bomb in &self.bombs {
            buf.write_integer(bomb.row)?;
        }
        for bomb in &self.bombs {
            buf.write_float(bomb.fuse)?;
        }
        for bomb in &self.bombs {
            buf.write_pointer(bomb.owner)?;
        }
        Ok(())
    }

    fn read_fields<const N: usize>(buf: &mut SnapshotBuffer<N>) -> CodecResult<Self> {
        let mut state = Self {
            tick: buf.read_integer()?,
            ..Self::default()
        };
        for (index, cell) in state.cells.iter_mut().enumerate() {
            let code = buf.read_integer()?;
            *cell = Cell::from_code(code).ok_or(CodecError::InvalidValue {
                field: "cells",
                index,
                reason: ValueReason::UnknownCode { code },
            })?;
        }

        for bomber in &mut state.bombers {
            bomber.alive = buf.read_boolean()?;
        }
        for bomber in &mut state.bombers {
            bomber.x = buf.read_float()?;
        }
        for bomber in &mut state.bombers {
            bomber.y = buf.read_float()?;
        }
        for bomber in &mut state.bombers {
            bomber.bombs_left = buf.read_integer()?;
        }
        for bomber in &mut state.bombers {
            bomber.flame = buf.read_integer()?;
        }
        for bomber in &mut state.bombers {
            bomber.controller = buf.read_pointer()?;
        }

        for bomb in &mut state.bombs {
            bomb.active = buf.read_boolean()?;
        }
        for (index, bomb) in state.bombs.iter_mut().enumerate() {
            bomb.col = read_in_range(buf, "bomb_col", index, BOARD_COLS)?;
        }
        for (index, bomb) in state.bombs.iter_mut().enumerate() {
            bomb.row = read_in_range(buf, "bomb_row", index, BOARD_ROWS)?;
        }
        for bomb in &mut state.bombs {
            bomb.fuse = buf.read_float()?;
        }
        for bomb in &mut state.bombs {
            bomb.owner = buf.read_pointer()?;
        }
        Ok(state)
    }
}

fn read_in_range<const N: usize>(
    buf: &mut SnapshotBuffer<N>,
    field: &'static str,
    index: usize,
    bound: usize,
) -> CodecResult<i32> {
    let value = buf.read_integer()?;
    if value < 0 || value as usize >= bound {
        return Err(CodecError::InvalidValue {
            field,
            index,
            reason: ValueReason::OutOfRange {
                value: i64::from(value),
                min: 0,
                max: bound as i64 - 1,
            },
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{capture, restore, DEFAULT_CAPACITY};

    #[test]
    fn schema_is_valid_and_sized() {
        let schema = arena_schema();
        schema.validate().unwrap();
        assert_eq!(schema.encoded_size(), ARENA_SNAPSHOT_BYTES);
        assert_eq!(ARENA_SNAPSHOT_BYTES, 1245);
        assert_eq!(
            schema.value_count(),
            1 + CELL_COUNT + MAX_BOMBERS * 6 + MAX_BOMBS * 5
        );
    }

    #[test]
    fn standard_board_layout() {
        let state = ArenaState::new();
        assert_eq!(state.cell(0, 0), Cell::Wall);
        assert_eq!(state.cell(2, 2), Cell::Wall);
        assert_eq!(state.cell(-1, 3), Cell::Wall);
        for &(col, row) in &SPAWNS {
            assert_eq!(state.cell(col as i32, row as i32), Cell::Floor);
            assert_ne!(state.cell(col as i32 + 1, row as i32), Cell::Brick);
            assert_ne!(state.cell(col as i32, row as i32 + 1), Cell::Brick);
        }
        assert!(state.cells.contains(&Cell::Brick));
        assert_eq!(state.alive_count(), MAX_BOMBERS);
        assert_eq!(state.active_bombs(), 0);
        assert_eq!(state.bombers[4].x, 7.5);
        assert_eq!(state.bombers[4].controller, Handle::new(5));
    }

    #[test]
    fn set_cell_ignores_off_board() {
        let mut state = ArenaState::default();
        state.set_cell(3, 3, Cell::Item(ItemKind::Flame));
        state.set_cell(BOARD_COLS as i32, 0, Cell::Brick);
        assert_eq!(state.cell(3, 3), Cell::Item(ItemKind::Flame));
        assert_eq!(
            state.cells.iter().filter(|cell| **cell != Cell::Floor).count(),
            1
        );
    }

    #[test]
    fn capture_restore_standard_board() {
        let state = ArenaState::new();
        let mut buf = SnapshotBuffer::<DEFAULT_CAPACITY>::new();
        assert_eq!(capture(&state, &mut buf).unwrap(), ARENA_SNAPSHOT_BYTES);
        let restored: ArenaState = restore(&mut buf).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn capture_into_small_buffer_overflows() {
        let mut buf = SnapshotBuffer::<1024>::new();
        let err = capture(&ArenaState::new(), &mut buf).unwrap_err();
        assert!(matches!(err, CodecError::Buffer(_)));
    }
}
