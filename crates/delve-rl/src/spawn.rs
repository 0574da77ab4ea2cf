//! Reserving cells for enemies and items on a fresh floor.
//!
//! Only positions and categories are chosen here; turning a spot into an
//! actual monster or item is up to the caller.

use delve_core::Point;
use rand::{Rng, RngExt};

use crate::biome::BiomeEntry;
use crate::mapgen::Level;
use crate::room::RoomKind;

/// What a reserved spot is for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnKind {
    Enemy(String),
    HealthPotion,
    Weapon,
    Armor,
    Gold,
    /// Floor artifact, only on depths that are a multiple of 5.
    QuestItem,
}

/// A reserved cell inside room `room`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnSpot {
    pub pos: Point,
    pub room: usize,
    pub kind: SpawnKind,
}

const ENEMY_WEIGHTS: [f64; 3] = [0.6, 0.3, 0.1];

fn pick_enemy<R: Rng>(rng: &mut R, biome: &BiomeEntry) -> String {
    let roll: f64 = rng.random();
    let mut acc = 0.0;
    for (name, w) in biome.enemy_types.iter().zip(ENEMY_WEIGHTS) {
        acc += w;
        if roll < acc {
            return name.clone();
        }
    }
    biome.enemy_types[2].clone()
}

/// Choose spawn spots for a floor at `depth`.
///
/// Enemies go in every room but the entrance, and the exit room is left
/// empty half of the time. Items can go anywhere. Spots that would land on
/// a non-walkable tile are dropped.
pub fn reserve_spawns<R: Rng>(
    level: &Level,
    biome: &BiomeEntry,
    depth: u32,
    rng: &mut R,
) -> Vec<SpawnSpot> {
    let mut spots = Vec::new();
    let rooms = level.rooms();
    let mut push = |pos: Point, room: usize, kind: SpawnKind| {
        if level.grid.is_walkable(pos) {
            spots.push(SpawnSpot { pos, room, kind });
        }
    };

    let max_enemies = 3 + (depth / 2).min(3);
    for (i, room) in rooms.iter().enumerate().skip(1) {
        let mut n = rng.random_range(0..=max_enemies);
        if room.kind == RoomKind::Exit && rng.random_bool(0.5) {
            n = 0;
        }
        for _ in 0..n {
            let pos = room.random_position(rng, 1);
            let name = pick_enemy(rng, biome);
            push(pos, i, SpawnKind::Enemy(name));
        }
    }

    let gear_chance = (0.15 * f64::from(depth) / 5.0).min(1.0);
    for (i, room) in rooms.iter().enumerate() {
        if rng.random_bool(0.4) {
            push(room.random_position(rng, 1), i, SpawnKind::HealthPotion);
        }
        if rng.random_bool(gear_chance) {
            let kind = if rng.random_bool(0.5) {
                SpawnKind::Weapon
            } else {
                SpawnKind::Armor
            };
            push(room.random_position(rng, 1), i, kind);
        }
        if rng.random_bool(0.3) {
            push(room.random_position(rng, 1), i, SpawnKind::Gold);
        }
    }

    if depth > 0 && depth % 5 == 0 && rooms.len() > 2 {
        let i = rng.random_range(1..rooms.len() - 1);
        push(rooms[i].random_position(rng, 2), i, SpawnKind::QuestItem);
    }

    spots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::BiomeTable;
    use crate::mapgen::{LevelConfig, LevelGen};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup(seed: u64) -> (Level, StdRng) {
        let mut mg = LevelGen::new(LevelConfig::default(), StdRng::seed_from_u64(seed));
        let level = mg.generate().unwrap();
        (level, mg.rng)
    }

    #[test]
    fn spots_are_walkable_and_inside_their_room() {
        let table = BiomeTable::default();
        for seed in 0..10 {
            let (level, mut rng) = setup(seed);
            let spots = reserve_spawns(&level, table.for_depth(3), 3, &mut rng);
            for s in &spots {
                assert!(level.grid.is_walkable(s.pos));
                assert!(level.rooms()[s.room].range().contains(s.pos));
            }
        }
    }

    #[test]
    fn no_enemies_in_entrance() {
        let table = BiomeTable::default();
        for seed in 0..10 {
            let (level, mut rng) = setup(seed);
            let spots = reserve_spawns(&level, table.for_depth(8), 8, &mut rng);
            assert!(
                spots
                    .iter()
                    .filter(|s| matches!(s.kind, SpawnKind::Enemy(_)))
                    .all(|s| s.room != 0)
            );
        }
    }

    #[test]
    fn enemies_come_from_biome() {
        let table = BiomeTable::default();
        let biome = table.for_depth(6);
        let (level, mut rng) = setup(2);
        let spots = reserve_spawns(&level, biome, 6, &mut rng);
        for s in spots {
            if let SpawnKind::Enemy(name) = s.kind {
                assert!(biome.enemy_types.contains(&name), "{name}");
            }
        }
    }

    #[test]
    fn quest_item_on_fifth_floors_only() {
        let table = BiomeTable::default();
        let count = |depth: u32| {
            let (level, mut rng) = setup(7);
            let spots = reserve_spawns(&level, table.for_depth(depth), depth, &mut rng);
            let quests: Vec<_> = spots
                .into_iter()
                .filter(|s| s.kind == SpawnKind::QuestItem)
                .collect();
            for q in &quests {
                assert!(q.room != 0 && q.room != level.rooms().len() - 1);
            }
            quests.len()
        };
        assert_eq!(count(5), 1);
        assert_eq!(count(10), 1);
        assert_eq!(count(4), 0);
    }

    #[test]
    fn enemy_weights_favor_first_type() {
        let table = BiomeTable::default();
        let biome = table.for_depth(1);
        let mut rng = StdRng::seed_from_u64(0);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let name = pick_enemy(&mut rng, biome);
            let i = biome.enemy_types.iter().position(|n| *n == name).unwrap();
            counts[i] += 1;
        }
        assert!(counts[0] > counts[1] && counts[1] > counts[2]);
        assert!(counts[2] > 0);
    }
}
