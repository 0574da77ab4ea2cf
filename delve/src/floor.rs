//! One dungeon floor and everything living on it.

use delve_core::Point;
use delve_paths::PathRange;
use delve_rl::{
    BiomeEntry, BiomeTable, FOV, GenError, Level, LevelConfig, LevelGen, SpawnKind, SpawnSpot,
    TileKind, reserve_spawns,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::agent::Agent;

/// Per-turn chance that an agent out of range of the observer moves.
pub const WANDER_CHANCE: f64 = 0.1;

/// A floor: generated level, observer, field of view and agents.
pub struct Floor {
    depth: u32,
    level: Level,
    biome: BiomeEntry,
    spawns: Vec<SpawnSpot>,
    observer: Point,
    fov: FOV,
    pr: PathRange,
    agents: Vec<Agent>,
    config: LevelConfig,
    table: BiomeTable,
    rng: StdRng,
}

impl Floor {
    /// Generate floor `depth` with the default configuration.
    pub fn new(depth: u32, seed: u64) -> Result<Self, GenError> {
        Self::with_config(LevelConfig::default(), BiomeTable::default(), depth, seed)
    }

    pub fn with_config(
        config: LevelConfig,
        table: BiomeTable,
        depth: u32,
        seed: u64,
    ) -> Result<Self, GenError> {
        let (level, biome, spawns, rng) = build(&config, &table, depth, seed)?;
        let bounds = level.grid.bounds();
        let mut floor = Self {
            depth,
            observer: level.start(),
            level,
            biome,
            spawns,
            fov: FOV::new(bounds),
            pr: PathRange::new(bounds),
            agents: Vec::new(),
            config,
            table,
            rng,
        };
        floor.update_fov();
        Ok(floor)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn biome(&self) -> &BiomeEntry {
        &self.biome
    }

    pub fn spawns(&self) -> &[SpawnSpot] {
        &self.spawns
    }

    pub fn observer(&self) -> Point {
        self.observer
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn fov(&self) -> &FOV {
        &self.fov
    }

    /// Sight radius for this floor's biome.
    pub fn radius(&self) -> i32 {
        self.biome.visibility_radius()
    }

    fn update_fov(&mut self) {
        let radius = self.radius();
        let n = self
            .fov
            .compute(&mut self.level.grid, self.observer, radius)
            .len();
        debug!("{n} cells visible from {}", self.observer);
    }

    fn occupied(&self) -> Vec<Point> {
        self.agents.iter().map(|a| a.pos).collect()
    }

    /// Place up to `n` agents on the floor's enemy spots, at most one per
    /// cell and never on the observer. Returns how many were placed.
    pub fn spawn_agents(&mut self, n: usize) -> usize {
        let mut placed = 0;
        for spot in &self.spawns {
            if placed == n {
                break;
            }
            if !matches!(spot.kind, SpawnKind::Enemy(_))
                || spot.pos == self.observer
                || self.agents.iter().any(|a| a.pos == spot.pos)
            {
                continue;
            }
            self.agents.push(Agent::new(spot.pos));
            placed += 1;
        }
        placed
    }

    /// Step the observer by `dir`. The target must be walkable and free of
    /// agents. Visibility is recomputed after a successful move.
    pub fn move_observer(&mut self, dir: Point) -> bool {
        let to = self.observer + dir;
        if !self.level.grid.is_walkable(to) || self.agents.iter().any(|a| a.pos == to) {
            return false;
        }
        self.observer = to;
        self.update_fov();
        true
    }

    /// Next cell on the shortest route from the observer to `goal`, going
    /// around agents.
    pub fn observer_step_toward(&mut self, goal: Point) -> Option<Point> {
        let mask = self.level.grid.walk_mask(self.occupied(), self.observer);
        let path = self.pr.find_path(&mask, self.observer, goal);
        path.get(1).copied()
    }

    /// Advance every agent by one turn. Agents within aggro range of the
    /// observer follow their route, replanning when they have none. The
    /// rest wander one cell with probability [`WANDER_CHANCE`].
    pub fn tick(&mut self) {
        let goal = self.observer;
        for i in 0..self.agents.len() {
            let mut blocked: Vec<Point> = self
                .agents
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, a)| a.pos)
                .collect();
            let agent = &mut self.agents[i];
            if agent.in_range(goal) {
                if !agent.has_path() {
                    agent.plan(&mut self.pr, &self.level.grid, &blocked, goal);
                }
                blocked.push(goal);
                agent.advance(&self.level.grid, &blocked);
            } else if self.rng.random_bool(WANDER_CHANCE) {
                blocked.push(goal);
                agent.wander(&self.level.grid, &blocked, &mut self.rng);
            }
        }
    }

    /// Go down the stairs if the observer stands on them. The floor is
    /// replaced wholesale: new grid, no explored cells, no agents.
    pub fn descend(&mut self) -> Result<bool, GenError> {
        if self.level.grid.kind(self.observer) != TileKind::StairsDown {
            return Ok(false);
        }
        let depth = self.depth + 1;
        let seed = self.rng.random::<u64>();
        let (level, biome, spawns, rng) = build(&self.config, &self.table, depth, seed)?;
        info!("descending to depth {depth} ({})", biome.biome);

        let bounds = level.grid.bounds();
        if self.pr.range() != bounds {
            self.pr.set_range(bounds);
        }
        self.depth = depth;
        self.observer = level.start();
        self.level = level;
        self.biome = biome;
        self.spawns = spawns;
        self.agents.clear();
        self.rng = rng;
        self.update_fov();
        Ok(true)
    }
}

fn build(
    config: &LevelConfig,
    table: &BiomeTable,
    depth: u32,
    seed: u64,
) -> Result<(Level, BiomeEntry, Vec<SpawnSpot>, StdRng), GenError> {
    let mut mg = LevelGen::new(config.clone(), StdRng::seed_from_u64(seed));
    let level = mg.generate()?;
    let mut rng = mg.rng;
    let biome = table.for_depth(depth).clone();
    let spawns = reserve_spawns(&level, &biome, depth, &mut rng);
    info!(
        "depth {depth}: {} floor, {} rooms, {} spawn spots",
        biome.biome,
        level.rooms().len(),
        spawns.len()
    );
    Ok((level, biome, spawns, rng))
}
