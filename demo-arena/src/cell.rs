//! Board cells and their integer codes.

/// Pickup left behind by a destroyed brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    ExtraBomb,
    Flame,
    Speed,
}

/// Contents of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Floor,
    Wall,
    Brick,
    Item(ItemKind),
}

impl Cell {
    /// Every cell variant, in code order.
    pub const ALL: [Self; 6] = [
        Self::Floor,
        Self::Wall,
        Self::Brick,
        Self::Item(ItemKind::ExtraBomb),
        Self::Item(ItemKind::Flame),
        Self::Item(ItemKind::Speed),
    ];

    /// Integer code written to the snapshot.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Floor => 0,
            Self::Wall => 1,
            Self::Brick => 2,
            Self::Item(ItemKind::ExtraBomb) => 3,
            Self::Item(ItemKind::Flame) => 4,
            Self::Item(ItemKind::Speed) => 5,
        }
    }

    /// Maps a snapshot code back to a cell.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Floor),
            1 => Some(Self::Wall),
            2 => Some(Self::Brick),
            3 => Some(Self::Item(ItemKind::ExtraBomb)),
            4 => Some(Self::Item(ItemKind::Flame)),
            5 => Some(Self::Item(ItemKind::Speed)),
            _ => None,
        }
    }

    /// Bombers can stand on floor and items.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::Item(_))
    }
}
