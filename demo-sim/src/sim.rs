//! Arena rules advanced once per idle frame.

use codec::Handle;
use demo_arena::{ArenaState, Bomb, Cell, ItemKind, BOMB_FUSE, MAX_BOMBERS};

use crate::rng::Rng;

/// Seconds per simulation tick.
pub const DT: f32 = 0.05;
/// Cells a bomber moves per tick.
pub const SPEED: f32 = 0.125;
/// Flame range cap reachable through pickups.
pub const MAX_FLAME: i32 = 6;

/// What a controller asked its bomber to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    pub dx: i32,
    pub dy: i32,
    pub drop_bomb: bool,
}

/// Per-match counters reported in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct MatchStats {
    pub bombs_placed: u32,
    pub explosions: u32,
    pub bricks_destroyed: u32,
    pub items_collected: u32,
    pub bombers_lost: u32,
}

/// Advances `state` by one tick.
///
/// `intents[i]` drives bomber slot `i`; `drop_bomb` is consumed.
pub fn step(
    state: &mut ArenaState,
    intents: &mut [Intent; MAX_BOMBERS],
    rng: &mut Rng,
    stats: &mut MatchStats,
) {
    state.tick = state.tick.wrapping_add(1);

    for slot in 0..MAX_BOMBERS {
        if !state.bombers[slot].alive {
            continue;
        }
        move_bomber(state, slot, intents[slot], stats);
        if std::mem::take(&mut intents[slot].drop_bomb) && place_bomb(state, slot) {
            stats.bombs_placed += 1;
        }
    }

    for index in 0..state.bombs.len() {
        let bomb = &mut state.bombs[index];
        if !bomb.active {
            continue;
        }
        bomb.fuse -= DT;
        if bomb.fuse <= 0.0 {
            explode(state, index, rng, stats);
        }
    }
}

fn bomber_cell(x: f32, y: f32) -> (i32, i32) {
    (x.floor() as i32, y.floor() as i32)
}

fn move_bomber(state: &mut ArenaState, slot: usize, intent: Intent, stats: &mut MatchStats) {
    let bomber = state.bombers[slot];
    let nx = bomber.x + intent.dx.signum() as f32 * SPEED;
    let ny = bomber.y + intent.dy.signum() as f32 * SPEED;
    let (col, row) = bomber_cell(nx, ny);
    let target = state.cell(col, row);
    if !target.is_walkable() {
        return;
    }

    let bomber = &mut state.bombers[slot];
    bomber.x = nx;
    bomber.y = ny;
    if let Cell::Item(item) = target {
        match item {
            ItemKind::ExtraBomb => bomber.bombs_left += 1,
            ItemKind::Flame => bomber.flame = (bomber.flame + 1).min(MAX_FLAME),
            ItemKind::Speed => {}
        }
        state.set_cell(col, row, Cell::Floor);
        stats.items_collected += 1;
    }
}

fn place_bomb(state: &mut ArenaState, slot: usize) -> bool {
    let bomber = state.bombers[slot];
    if bomber.bombs_left <= 0 {
        return false;
    }
    let (col, row) = bomber_cell(bomber.x, bomber.y);
    if state
        .bombs
        .iter()
        .any(|bomb| bomb.active && bomb.col == col && bomb.row == row)
    {
        return false;
    }
    let Some(free) = state.bombs.iter_mut().find(|bomb| !bomb.active) else {
        return false;
    };
    *free = Bomb {
        active: true,
        col,
        row,
        fuse: BOMB_FUSE,
        owner: bomber.controller,
    };
    state.bombers[slot].bombs_left -= 1;
    true
}

fn explode(state: &mut ArenaState, index: usize, rng: &mut Rng, stats: &mut MatchStats) {
    let bomb = state.bombs[index];
    state.bombs[index] = Bomb::default();
    stats.explosions += 1;

    let range = owner_slot(state, bomb.owner).map_or(1, |slot| state.bombers[slot].flame);
    if let Some(slot) = owner_slot(state, bomb.owner) {
        state.bombers[slot].bombs_left += 1;
    }

    let mut flames = vec![(bomb.col, bomb.row)];
    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        for reach in 1..=range {
            let (col, row) = (bomb.col + dx * reach, bomb.row + dy * reach);
            match state.cell(col, row) {
                Cell::Wall => break,
                Cell::Brick => {
                    state.set_cell(col, row, drop_item(rng));
                    stats.bricks_destroyed += 1;
                    break;
                }
                Cell::Floor | Cell::Item(_) => flames.push((col, row)),
            }
        }
    }

    for bomber in state.bombers.iter_mut().filter(|bomber| bomber.alive) {
        if flames.contains(&bomber_cell(bomber.x, bomber.y)) {
            bomber.alive = false;
            stats.bombers_lost += 1;
        }
    }
    for other in state.bombs.iter_mut().filter(|other| other.active) {
        if flames.contains(&(other.col, other.row)) {
            other.fuse = other.fuse.min(DT);
        }
    }
}

fn owner_slot(state: &ArenaState, owner: Handle) -> Option<usize> {
    if owner.is_null() {
        return None;
    }
    state
        .bombers
        .iter()
        .position(|bomber| bomber.controller == owner)
}

fn drop_item(rng: &mut Rng) -> Cell {
    match rng.next_u32() % 6 {
        0 => Cell::Item(ItemKind::ExtraBomb),
        1 => Cell::Item(ItemKind::Flame),
        2 => Cell::Item(ItemKind::Speed),
        _ => Cell::Floor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_arena() -> ArenaState {
        let mut state = ArenaState::new();
        for cell in &mut state.cells {
            if *cell == Cell::Brick {
                *cell = Cell::Floor;
            }
        }
        state
    }

    fn run(state: &mut ArenaState, intents: &mut [Intent; MAX_BOMBERS], ticks: u32) -> MatchStats {
        let mut rng = Rng::new(3);
        let mut stats = MatchStats::default();
        for _ in 0..ticks {
            step(state, intents, &mut rng, &mut stats);
        }
        stats
    }

    #[test]
    fn walls_block_movement() {
        let mut state = open_arena();
        let mut intents = [Intent::default(); MAX_BOMBERS];
        intents[0].dx = -1;
        run(&mut state, &mut intents, 20);
        assert!(state.bombers[0].x >= 1.0);
        assert_eq!(state.tick, 20);
    }

    #[test]
    fn bomb_returns_to_owner_after_fuse() {
        let mut state = open_arena();
        let mut intents = [Intent::default(); MAX_BOMBERS];
        intents[4].drop_bomb = true;
        let stats = run(&mut state, &mut intents, 1);
        assert_eq!(stats.bombs_placed, 1);
        assert_eq!(state.bombers[4].bombs_left, 0);
        assert_eq!(state.active_bombs(), 1);

        let stats = run(&mut state, &mut intents, 60);
        assert_eq!(stats.explosions, 1);
        assert_eq!(state.active_bombs(), 0);
        assert_eq!(state.bombers[4].bombs_left, 1);
        assert!(!state.bombers[4].alive);
    }

    #[test]
    fn flame_destroys_first_brick_only() {
        let mut state = open_arena();
        state.set_cell(7, 8, Cell::Brick);
        state.set_cell(7, 9, Cell::Brick);
        state.bombs[0] = Bomb {
            active: true,
            col: 7,
            row: 6,
            fuse: DT,
            owner: state.bombers[4].controller,
        };
        state.bombers[4].flame = 4;
        state.bombers[4].bombs_left = 0;

        let mut intents = [Intent::default(); MAX_BOMBERS];
        let stats = run(&mut state, &mut intents, 1);
        assert_eq!(stats.bricks_destroyed, 1);
        assert_ne!(state.cell(7, 8), Cell::Brick);
        assert_eq!(state.cell(7, 9), Cell::Brick);
        assert!(!state.bombers[4].alive);
        assert_eq!(state.bombers[4].bombs_left, 1);
    }

    #[test]
    fn pickups_apply_and_clear() {
        let mut state = open_arena();
        state.set_cell(2, 1, Cell::Item(ItemKind::Flame));
        let mut intents = [Intent::default(); MAX_BOMBERS];
        intents[0].dx = 1;
        let stats = run(&mut state, &mut intents, 8);
        assert_eq!(stats.items_collected, 1);
        assert_eq!(state.bombers[0].flame, 3);
        assert_eq!(state.cell(2, 1), Cell::Floor);
    }
}
