//! Biome themes keyed by floor depth.
//!
//! The table is plain configuration: the generator never consults it, it
//! only feeds spawn reservation and the floor's sight radius.

use std::fmt;

use crate::fov::VISIBILITY_RADIUS;

/// Visual and population theme of a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Biome {
    #[default]
    Cavern,
    Forest,
    Ice,
    Lava,
    Shadow,
    Crystal,
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cavern => "cavern",
            Self::Forest => "forest",
            Self::Ice => "ice",
            Self::Lava => "lava",
            Self::Shadow => "shadow",
            Self::Crystal => "crystal",
        };
        f.write_str(name)
    }
}

/// Parameters for one biome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiomeEntry {
    pub biome: Biome,
    /// Shallowest depth at which this biome appears.
    pub min_depth: u32,
    /// Added to [`VISIBILITY_RADIUS`].
    pub light_radius_mod: i32,
    /// Enemy kinds, most common first.
    pub enemy_types: [String; 3],
    pub item_rarity_bonus: u32,
}

impl BiomeEntry {
    fn new(
        biome: Biome,
        min_depth: u32,
        light_radius_mod: i32,
        enemy_types: [&str; 3],
        item_rarity_bonus: u32,
    ) -> Self {
        Self {
            biome,
            min_depth,
            light_radius_mod,
            enemy_types: enemy_types.map(String::from),
            item_rarity_bonus,
        }
    }

    /// Sight radius on floors of this biome, never below 3.
    pub fn visibility_radius(&self) -> i32 {
        (VISIBILITY_RADIUS + self.light_radius_mod).max(3)
    }
}

/// Biome entries sorted by `min_depth`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<BiomeEntry>", into = "Vec<BiomeEntry>")
)]
pub struct BiomeTable {
    entries: Vec<BiomeEntry>,
}

impl BiomeTable {
    /// Build a table from arbitrary entries. Returns `None` when `entries`
    /// is empty.
    pub fn new(mut entries: Vec<BiomeEntry>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        entries.sort_by_key(|e| e.min_depth);
        Some(Self { entries })
    }

    pub fn entries(&self) -> &[BiomeEntry] {
        &self.entries
    }

    /// The deepest entry whose `min_depth` is at most `depth`. Depths
    /// shallower than every entry get the first one.
    pub fn for_depth(&self, depth: u32) -> &BiomeEntry {
        self.entries
            .iter()
            .rev()
            .find(|e| e.min_depth <= depth)
            .unwrap_or(&self.entries[0])
    }
}

impl TryFrom<Vec<BiomeEntry>> for BiomeTable {
    type Error = &'static str;

    fn try_from(entries: Vec<BiomeEntry>) -> Result<Self, Self::Error> {
        Self::new(entries).ok_or("biome table needs at least one entry")
    }
}

impl From<BiomeTable> for Vec<BiomeEntry> {
    fn from(t: BiomeTable) -> Self {
        t.entries
    }
}

impl Default for BiomeTable {
    fn default() -> Self {
        Self {
            entries: vec![
                BiomeEntry::new(Biome::Cavern, 1, 0, ["goblin", "skeleton", "orc"], 0),
                BiomeEntry::new(Biome::Forest, 5, 2, ["lynx", "goblin", "spider"], 1),
                BiomeEntry::new(Biome::Ice, 10, 3, ["frost_troll", "ice_elemental", "wolf"], 2),
                BiomeEntry::new(
                    Biome::Lava,
                    15,
                    4,
                    ["magma_elemental", "fire_demon", "salamander"],
                    3,
                ),
                BiomeEntry::new(
                    Biome::Shadow,
                    20,
                    -2,
                    ["shadow_wraith", "void_beast", "corrupted_one"],
                    4,
                ),
                BiomeEntry::new(
                    Biome::Crystal,
                    25,
                    5,
                    ["crystal_golem", "light_elemental", "crystal_spider"],
                    5,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_thresholds() {
        let t = BiomeTable::default();
        let cases = [
            (0, Biome::Cavern),
            (1, Biome::Cavern),
            (4, Biome::Cavern),
            (5, Biome::Forest),
            (14, Biome::Ice),
            (15, Biome::Lava),
            (24, Biome::Shadow),
            (99, Biome::Crystal),
        ];
        for (depth, want) in cases {
            assert_eq!(t.for_depth(depth).biome, want, "depth {depth}");
        }
    }

    #[test]
    fn visibility_radius_has_floor() {
        let t = BiomeTable::default();
        assert_eq!(t.for_depth(1).visibility_radius(), 8);
        assert_eq!(t.for_depth(20).visibility_radius(), 6);
        assert_eq!(t.for_depth(25).visibility_radius(), 13);

        let mut dark = t.for_depth(1).clone();
        dark.light_radius_mod = -20;
        assert_eq!(dark.visibility_radius(), 3);
    }

    #[test]
    fn custom_table_is_sorted() {
        let t = BiomeTable::new(vec![
            BiomeEntry::new(Biome::Ice, 3, 0, ["a", "b", "c"], 0),
            BiomeEntry::new(Biome::Lava, 1, 0, ["d", "e", "f"], 0),
        ])
        .unwrap();
        assert_eq!(t.entries()[0].biome, Biome::Lava);
        assert_eq!(t.for_depth(2).biome, Biome::Lava);
        assert!(BiomeTable::new(Vec::new()).is_none());
    }
}
