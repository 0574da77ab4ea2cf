//! Tile kinds and per-cell exploration state.

/// What occupies a map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
    Water,
    Lava,
    Door,
    StairsDown,
    StairsUp,
}

impl TileKind {
    /// Whether an agent may stand on this kind of tile.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        matches!(
            self,
            Self::Floor | Self::Door | Self::StairsDown | Self::StairsUp
        )
    }

    /// Whether light passes through. Only walls block sight.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// One map cell.
///
/// `explored` only ever goes from `false` to `true` during a floor's
/// lifetime; `visible` is rewritten by every visibility pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    /// Cosmetic detail index for renderers; 0 means plain.
    pub variant: u8,
    pub explored: bool,
    pub visible: bool,
}

impl Tile {
    /// A fresh, unexplored tile of the given kind.
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            variant: 0,
            explored: false,
            visible: false,
        }
    }

    #[inline]
    pub const fn is_walkable(&self) -> bool {
        self.kind.is_walkable()
    }

    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.kind.is_transparent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TileKind; 7] = [
        TileKind::Wall,
        TileKind::Floor,
        TileKind::Water,
        TileKind::Lava,
        TileKind::Door,
        TileKind::StairsDown,
        TileKind::StairsUp,
    ];

    #[test]
    fn walkable_kinds() {
        let walkable: Vec<_> = ALL.into_iter().filter(|k| k.is_walkable()).collect();
        assert_eq!(
            walkable,
            vec![
                TileKind::Floor,
                TileKind::Door,
                TileKind::StairsDown,
                TileKind::StairsUp
            ]
        );
    }

    #[test]
    fn only_walls_are_opaque() {
        for k in ALL {
            assert_eq!(k.is_transparent(), k != TileKind::Wall, "{k:?}");
        }
    }

    #[test]
    fn default_tile_is_unexplored_wall() {
        let t = Tile::default();
        assert_eq!(t, Tile::new(TileKind::Wall));
        assert!(!t.explored && !t.visible);
    }
}
