//! Level layouts and generation
//!
//! A level is either generated from a seed and a set of spacing ranges, read
//! from a literal coordinate table, or streamed endlessly from a seed. All
//! randomness comes from a `Pcg32` owned by the generation call, so a seed
//! reproduces the same level on every machine.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::{Coin, Obstacle, ObstacleSprite, Platform, Viewport};
use crate::consts::*;

/// Ranges for seeded procedural placement. Pixel values are absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeededParams {
    pub seed: u64,
    pub gap_min: i32,
    pub gap_max: i32,
    pub vertical_offset_min: i32,
    pub vertical_offset_max: i32,
    pub platform_y_min: i32,
    pub platform_y_max: i32,
    /// Probability (0-1) that a platform carries obstacles
    pub obstacle_chance: f64,
    pub obstacle_max_per_platform: u32,
    /// Probability (0-1) that a platform carries a coin
    pub coin_chance: f64,
    /// Keep obstacles on one platform at least this far apart
    #[serde(default)]
    pub obstacle_min_spacing: Option<f32>,
}

impl Default for SeededParams {
    fn default() -> Self {
        Self {
            seed: 0,
            gap_min: 50,
            gap_max: 140,
            vertical_offset_min: -10,
            vertical_offset_max: 10,
            platform_y_min: 550,
            platform_y_max: 600,
            obstacle_chance: 0.3,
            obstacle_max_per_platform: 1,
            coin_chance: 0.3,
            obstacle_min_spacing: None,
        }
    }
}

impl SeededParams {
    /// Repair ranges that would stall or break placement. Gaps are never
    /// negative, so every new platform starts right of the last one.
    pub fn sanitized(mut self) -> Self {
        if self.gap_min < 0 || self.gap_max < 0 {
            log::warn!(
                "Seed {}: negative gap range {}..{}, clamping to 0",
                self.seed,
                self.gap_min,
                self.gap_max
            );
        }
        (self.gap_min, self.gap_max) = ordered(self.gap_min.max(0), self.gap_max.max(0));
        (self.vertical_offset_min, self.vertical_offset_max) =
            ordered(self.vertical_offset_min, self.vertical_offset_max);
        (self.platform_y_min, self.platform_y_max) =
            ordered(self.platform_y_min, self.platform_y_max);
        self.obstacle_chance = unit_chance(self.obstacle_chance);
        self.coin_chance = unit_chance(self.coin_chance);
        if let Some(min) = self.obstacle_min_spacing {
            if !(min.is_finite() && min >= 0.0) {
                log::warn!("Seed {}: ignoring obstacle spacing {}", self.seed, min);
                self.obstacle_min_spacing = None;
            }
        }
        self
    }
}

fn unit_chance(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Literal top-left coordinates for every entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedLayout {
    pub platforms: Vec<[f32; 2]>,
    #[serde(default)]
    pub obstacles: Vec<[f32; 2]>,
    #[serde(default)]
    pub coins: Vec<[f32; 2]>,
}

/// How a level's entities come into being
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LevelSpec {
    /// Whole level generated up front from a seed
    Seeded(SeededParams),
    /// Literal coordinate table, no randomness
    Fixed(FixedLayout),
    /// One screen generated up front, more platforms streamed in as it scrolls
    Endless(SeededParams),
}

/// One row of the level table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub name: String,
    /// Overrides the configured level duration
    #[serde(default)]
    pub duration_secs: Option<f32>,
    pub spec: LevelSpec,
}

impl LevelEntry {
    fn sanitized(mut self) -> Self {
        if self.duration_secs.is_some_and(|d| !(d > 0.0)) {
            log::warn!("Level {:?}: duration must be positive, using default", self.name);
            self.duration_secs = None;
        }
        self.spec = match self.spec {
            LevelSpec::Seeded(params) => LevelSpec::Seeded(params.sanitized()),
            LevelSpec::Endless(params) => LevelSpec::Endless(params.sanitized()),
            fixed @ LevelSpec::Fixed(_) => fixed,
        };
        self
    }
}

/// Ordered, never-empty list of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LevelEntry>", into = "Vec<LevelEntry>")]
pub struct LevelTable {
    entries: Vec<LevelEntry>,
}

impl From<Vec<LevelEntry>> for LevelTable {
    fn from(entries: Vec<LevelEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<LevelTable> for Vec<LevelEntry> {
    fn from(table: LevelTable) -> Self {
        table.entries
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            entries: default_levels(),
        }
    }
}

impl LevelTable {
    /// An empty list is replaced by the built-in levels. Generation ranges
    /// and duration overrides are repaired on the way in.
    pub fn new(entries: Vec<LevelEntry>) -> Self {
        if entries.is_empty() {
            log::warn!("Level table is empty, using built-in levels");
            return Self::default();
        }
        Self {
            entries: entries.into_iter().map(LevelEntry::sanitized).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LevelEntry] {
        &self.entries
    }

    /// Look up a level; an out-of-range index falls back to level 0
    pub fn select(&self, index: usize) -> (usize, &LevelEntry) {
        match self.entries.get(index) {
            Some(entry) => (index, entry),
            None => {
                log::warn!(
                    "Level index {} out of range (have {}), defaulting to 0",
                    index,
                    self.entries.len()
                );
                (0, &self.entries[0])
            }
        }
    }
}

/// Entities produced for the start of a level
#[derive(Debug, Clone, Default)]
pub struct GeneratedLevel {
    pub platforms: Vec<Platform>,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    /// Present only for endless levels
    pub stream: Option<EndlessStream>,
}

/// Build the initial entities for a level.
///
/// `duration_secs` sets the platform count of a seeded level: one platform
/// per second of level time.
pub fn generate(spec: &LevelSpec, viewport: &Viewport, duration_secs: f32) -> GeneratedLevel {
    match spec {
        LevelSpec::Seeded(params) => {
            let count = (duration_secs.max(1.0)) as usize;
            let mut builder = SeededBuilder::new(params.clone(), *viewport);
            let mut level = GeneratedLevel::default();
            builder.place_first(&mut level.platforms);
            for _ in 1..count {
                builder.place_next(&mut level.platforms, &mut level.obstacles, &mut level.coins);
            }
            log::info!(
                "Seeded level {}: {} platforms, {} obstacles, {} coins",
                params.seed,
                level.platforms.len(),
                level.obstacles.len(),
                level.coins.len()
            );
            level
        }
        LevelSpec::Fixed(layout) => {
            let level = GeneratedLevel {
                platforms: layout
                    .platforms
                    .iter()
                    .map(|&[x, y]| Platform::new(Vec2::new(x, y), viewport))
                    .collect(),
                obstacles: layout
                    .obstacles
                    .iter()
                    .enumerate()
                    .map(|(i, &[x, y])| {
                        Obstacle::new(Vec2::new(x, y), ObstacleSprite::cycle(i), viewport)
                    })
                    .collect(),
                coins: layout
                    .coins
                    .iter()
                    .map(|&[x, y]| Coin::new(Vec2::new(x, y), viewport))
                    .collect(),
                stream: None,
            };
            log::info!(
                "Fixed level: {} platforms, {} obstacles, {} coins",
                level.platforms.len(),
                level.obstacles.len(),
                level.coins.len()
            );
            level
        }
        LevelSpec::Endless(params) => {
            let mut stream = EndlessStream {
                builder: SeededBuilder::new(params.clone(), *viewport),
            };
            let mut level = GeneratedLevel::default();
            stream.builder.place_first(&mut level.platforms);
            stream.refill(&mut level.platforms, &mut level.obstacles, &mut level.coins);
            // One platform of lookahead past the right edge
            stream
                .builder
                .place_next(&mut level.platforms, &mut level.obstacles, &mut level.coins);
            log::info!(
                "Endless level {}: {} initial platforms",
                params.seed,
                level.platforms.len()
            );
            level.stream = Some(stream);
            level
        }
    }
}

/// Continues an endless level's PRNG stream as the world scrolls
#[derive(Debug, Clone)]
pub struct EndlessStream {
    builder: SeededBuilder,
}

impl EndlessStream {
    /// Append platforms until the rightmost one reaches past the viewport,
    /// at most `MAX_STREAM_REFILL` per call
    pub fn refill(
        &mut self,
        platforms: &mut Vec<Platform>,
        obstacles: &mut Vec<Obstacle>,
        coins: &mut Vec<Coin>,
    ) -> usize {
        let width = self.builder.viewport.width;
        let mut added = 0;
        while added < MAX_STREAM_REFILL {
            match platforms.last() {
                Some(last) if last.right() >= width => return added,
                Some(_) => self.builder.place_next(platforms, obstacles, coins),
                None => self.builder.place_at(width, platforms, obstacles, coins),
            }
            added += 1;
        }
        log::warn!("Endless stream still short of the right edge after {} platforms", added);
        added
    }
}

/// Placement state shared by seeded and endless levels
#[derive(Debug, Clone)]
struct SeededBuilder {
    params: SeededParams,
    viewport: Viewport,
    rng: Pcg32,
}

impl SeededBuilder {
    fn new(params: SeededParams, viewport: Viewport) -> Self {
        let params = params.sanitized();
        let rng = Pcg32::seed_from_u64(params.seed);
        Self {
            params,
            viewport,
            rng,
        }
    }

    fn draw(&mut self, a: i32, b: i32) -> i32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.rng.random_range(lo..=hi)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.random::<f64>() < p
    }

    fn clamp_y(&self, y: i32) -> i32 {
        let (lo, hi) = ordered(self.params.platform_y_min, self.params.platform_y_max);
        y.clamp(lo, hi)
    }

    /// Platform 0: fixed x, random y, nothing on it
    fn place_first(&mut self, platforms: &mut Vec<Platform>) {
        let y = self.draw(self.params.platform_y_min, self.params.platform_y_max);
        platforms.push(Platform::new(
            Vec2::new(FIRST_PLATFORM_X, y as f32),
            &self.viewport,
        ));
    }

    fn place_next(
        &mut self,
        platforms: &mut Vec<Platform>,
        obstacles: &mut Vec<Obstacle>,
        coins: &mut Vec<Coin>,
    ) {
        let (last_right, last_y) = match platforms.last() {
            Some(last) => (last.right(), last.pos.y as i32),
            None => {
                self.place_first(platforms);
                return;
            }
        };
        let gap = self.draw(self.params.gap_min, self.params.gap_max);
        let offset = self.draw(self.params.vertical_offset_min, self.params.vertical_offset_max);
        let y = self.clamp_y(last_y + offset);
        self.place_platform(last_right + gap as f32, y, platforms, obstacles, coins);
    }

    fn place_at(
        &mut self,
        x: f32,
        platforms: &mut Vec<Platform>,
        obstacles: &mut Vec<Obstacle>,
        coins: &mut Vec<Coin>,
    ) {
        let y = self.draw(self.params.platform_y_min, self.params.platform_y_max);
        self.place_platform(x, y, platforms, obstacles, coins);
    }

    fn place_platform(
        &mut self,
        x: f32,
        y: i32,
        platforms: &mut Vec<Platform>,
        obstacles: &mut Vec<Obstacle>,
        coins: &mut Vec<Coin>,
    ) {
        let platform = Platform::new(Vec2::new(x, y as f32), &self.viewport);

        let mut on_platform: Vec<Obstacle> = Vec::new();
        if self.params.obstacle_max_per_platform > 0 && self.chance(self.params.obstacle_chance) {
            let count = self.rng.random_range(1..=self.params.obstacle_max_per_platform);
            for _ in 0..count {
                if let Some(obstacle) = self.place_obstacle(&platform, &on_platform) {
                    on_platform.push(obstacle);
                }
            }
        }

        if self.chance(self.params.coin_chance) {
            if let Some(coin) = self.place_coin(&platform, &on_platform) {
                coins.push(coin);
            }
        }

        obstacles.extend(on_platform);
        platforms.push(platform);
    }

    /// Random x within the platform span, resting on its top
    fn place_obstacle(&mut self, platform: &Platform, existing: &[Obstacle]) -> Option<Obstacle> {
        let sprite = ObstacleSprite::ALL[self.rng.random_range(0..ObstacleSprite::ALL.len())];
        let size = self.viewport.obstacle_size(sprite);
        let slack = (platform.size.x - size.x).max(0.0) as i32;
        let attempts = match self.params.obstacle_min_spacing {
            Some(_) => OBSTACLE_SPAWN_ATTEMPTS,
            None => 1,
        };

        for _ in 0..attempts {
            let x = platform.pos.x + self.draw(0, slack) as f32;
            let spaced = match self.params.obstacle_min_spacing {
                Some(min) => existing.iter().all(|o| (o.pos.x - x).abs() >= min),
                None => true,
            };
            if spaced {
                let pos = Vec2::new(x, platform.pos.y - size.y);
                return Some(Obstacle::new(pos, sprite, &self.viewport));
            }
        }
        None
    }

    /// Up to `COIN_SPAWN_ATTEMPTS` tries at a spot clear of this platform's obstacles
    fn place_coin(&mut self, platform: &Platform, obstacles: &[Obstacle]) -> Option<Coin> {
        let size = self.viewport.coin_size();
        let slack = (platform.size.x - size.x).max(0.0) as i32;
        let y = platform.pos.y - size.y - COIN_LIFT;

        for _ in 0..COIN_SPAWN_ATTEMPTS {
            let x = platform.pos.x + self.draw(0, slack) as f32;
            let rect = Rect::new(x, y, size.x, size.y);
            // Horizontal span only
            if !obstacles.iter().any(|o| rect.overlaps_span(o.pos.x, o.pos.x + o.size.x)) {
                return Some(Coin::new(Vec2::new(x, y), &self.viewport));
            }
        }
        None
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Built-in level table: a hand-placed warm-up, two seeded levels, and an
/// endless finale. Coordinates assume the default 1200x800 viewport.
pub fn default_levels() -> Vec<LevelEntry> {
    vec![
        LevelEntry {
            name: "Warm-up".to_string(),
            duration_secs: Some(20.0),
            spec: LevelSpec::Fixed(FixedLayout {
                platforms: vec![
                    [100.0, 560.0],
                    [420.0, 540.0],
                    [740.0, 560.0],
                    [1060.0, 520.0],
                    [1380.0, 540.0],
                    [1700.0, 560.0],
                    [2020.0, 530.0],
                    [2340.0, 550.0],
                    [2660.0, 520.0],
                    [2980.0, 540.0],
                    [3300.0, 560.0],
                    [3620.0, 540.0],
                    [3940.0, 550.0],
                    [4260.0, 560.0],
                ],
                // Sprites cycle Spark (40 tall), Ember (44), Sprout (36)
                obstacles: vec![[1460.0, 500.0], [2420.0, 506.0], [3380.0, 524.0]],
                coins: vec![
                    [800.0, 520.0],
                    [1760.0, 520.0],
                    [2700.0, 480.0],
                    [3700.0, 500.0],
                ],
            }),
        },
        LevelEntry {
            name: "Meadow".to_string(),
            duration_secs: None,
            spec: LevelSpec::Seeded(SeededParams {
                seed: 101,
                ..SeededParams::default()
            }),
        },
        LevelEntry {
            name: "Canyon".to_string(),
            duration_secs: None,
            spec: LevelSpec::Seeded(SeededParams {
                seed: 202,
                gap_min: 60,
                gap_max: 160,
                vertical_offset_min: -60,
                vertical_offset_max: 60,
                platform_y_min: 420,
                platform_y_max: 620,
                obstacle_chance: 0.45,
                obstacle_max_per_platform: 2,
                coin_chance: 0.4,
                obstacle_min_spacing: Some(150.0),
            }),
        },
        LevelEntry {
            name: "Marathon".to_string(),
            duration_secs: None,
            spec: LevelSpec::Endless(SeededParams {
                seed: 303,
                gap_min: 70,
                gap_max: 170,
                vertical_offset_min: -80,
                vertical_offset_max: 80,
                platform_y_min: 380,
                platform_y_max: 640,
                obstacle_chance: 0.5,
                obstacle_max_per_platform: 2,
                coin_chance: 0.5,
                obstacle_min_spacing: Some(120.0),
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> LevelSpec {
        LevelSpec::Seeded(SeededParams {
            seed,
            obstacle_chance: 0.8,
            obstacle_max_per_platform: 3,
            coin_chance: 0.9,
            ..SeededParams::default()
        })
    }

    fn positions(level: &GeneratedLevel) -> Vec<(f32, f32)> {
        level.platforms.iter().map(|p| (p.pos.x, p.pos.y)).collect()
    }

    #[test]
    fn test_seed_reproduces_level() {
        let vp = Viewport::new(1200.0, 800.0);
        let a = generate(&seeded(101), &vp, 100.0);
        let b = generate(&seeded(101), &vp, 100.0);
        assert_eq!(positions(&a), positions(&b));
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.coins, b.coins);

        let c = generate(&seeded(102), &vp, 100.0);
        assert_ne!(positions(&a), positions(&c));
    }

    #[test]
    fn test_platform_count_follows_duration() {
        let vp = Viewport::default();
        assert_eq!(generate(&seeded(7), &vp, 100.0).platforms.len(), 100);
        assert_eq!(generate(&seeded(7), &vp, 12.9).platforms.len(), 12);
        // Always at least the spawn platform
        assert_eq!(generate(&seeded(7), &vp, 0.0).platforms.len(), 1);
    }

    #[test]
    fn test_seeded_spacing_and_bounds() {
        let vp = Viewport::default();
        let params = SeededParams {
            seed: 5,
            ..SeededParams::default()
        };
        let level = generate(&LevelSpec::Seeded(params.clone()), &vp, 60.0);

        assert_eq!(level.platforms[0].pos.x, FIRST_PLATFORM_X);
        for pair in level.platforms.windows(2) {
            let gap = pair[1].pos.x - pair[0].right();
            assert!(gap >= params.gap_min as f32 && gap <= params.gap_max as f32);
        }
        for p in &level.platforms {
            assert!(p.pos.y >= params.platform_y_min as f32);
            assert!(p.pos.y <= params.platform_y_max as f32);
        }
    }

    #[test]
    fn test_obstacles_rest_on_platforms() {
        let vp = Viewport::default();
        let level = generate(&seeded(33), &vp, 100.0);
        assert!(!level.obstacles.is_empty());
        for o in &level.obstacles {
            let host = level
                .platforms
                .iter()
                .find(|p| o.pos.x >= p.pos.x && o.pos.x + o.size.x <= p.right())
                .expect("obstacle should sit inside a platform span");
            assert_eq!(o.pos.y + o.size.y, host.pos.y);
        }
    }

    #[test]
    fn test_coins_avoid_obstacles() {
        let vp = Viewport::default();
        for seed in 0..20 {
            let level = generate(&seeded(seed), &vp, 100.0);
            for coin in &level.coins {
                for o in &level.obstacles {
                    assert!(!coin.rect().intersects(&o.rect()), "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn test_obstacle_min_spacing() {
        let vp = Viewport::default();
        let spec = LevelSpec::Seeded(SeededParams {
            seed: 9,
            obstacle_chance: 1.0,
            obstacle_max_per_platform: 3,
            obstacle_min_spacing: Some(90.0),
            ..SeededParams::default()
        });
        let level = generate(&spec, &vp, 100.0);
        for p in &level.platforms {
            let xs: Vec<f32> = level
                .obstacles
                .iter()
                .filter(|o| o.pos.x >= p.pos.x && o.pos.x <= p.right())
                .map(|o| o.pos.x)
                .collect();
            for (i, a) in xs.iter().enumerate() {
                for b in &xs[i + 1..] {
                    assert!((a - b).abs() >= 90.0);
                }
            }
        }
    }

    #[test]
    fn test_fixed_layout_is_literal() {
        let vp = Viewport::default();
        let spec = LevelSpec::Fixed(FixedLayout {
            platforms: vec![[100.0, 500.0], [400.0, 450.0]],
            obstacles: vec![[450.0, 410.0]],
            coins: vec![[150.0, 460.0]],
        });
        let level = generate(&spec, &vp, 100.0);
        assert_eq!(level.platforms.len(), 2);
        assert_eq!(level.platforms[1].pos, Vec2::new(400.0, 450.0));
        assert_eq!(level.obstacles[0].pos, Vec2::new(450.0, 410.0));
        assert_eq!(level.obstacles[0].sprite, ObstacleSprite::Spark);
        assert_eq!(level.coins[0].pos, Vec2::new(150.0, 460.0));
        assert!(level.stream.is_none());
    }

    #[test]
    fn test_endless_fills_screen_and_refills() {
        let vp = Viewport::default();
        let spec = LevelSpec::Endless(SeededParams {
            seed: 4,
            ..SeededParams::default()
        });
        let mut level = generate(&spec, &vp, 100.0);
        assert!(level.platforms.last().unwrap().pos.x >= vp.width);
        let mut stream = level.stream.take().unwrap();

        // Nothing to add while the lookahead platform is still off-screen
        let added = stream.refill(&mut level.platforms, &mut level.obstacles, &mut level.coins);
        assert_eq!(added, 0);

        for p in &mut level.platforms {
            p.pos.x -= 2000.0;
        }
        let added = stream.refill(&mut level.platforms, &mut level.obstacles, &mut level.coins);
        assert!(added > 0);
        assert!(level.platforms.last().unwrap().right() >= vp.width);
    }

    #[test]
    fn test_negative_gaps_still_advance() {
        let vp = Viewport::default();
        let params = SeededParams {
            seed: 8,
            gap_min: -300,
            gap_max: -260,
            ..SeededParams::default()
        };
        let mut level = generate(&LevelSpec::Endless(params.clone()), &vp, 100.0);
        assert!(level.platforms.len() < MAX_STREAM_REFILL);
        assert!(level.platforms.windows(2).all(|w| w[1].pos.x >= w[0].right()));

        let seeded = generate(&LevelSpec::Seeded(params), &vp, 30.0);
        assert!(seeded.platforms.windows(2).all(|w| w[1].pos.x >= w[0].right()));

        let mut stream = level.stream.take().unwrap();
        for p in &mut level.platforms {
            p.pos.x -= 5000.0;
        }
        stream.refill(&mut level.platforms, &mut level.obstacles, &mut level.coins);
        assert!(level.platforms.last().unwrap().right() >= vp.width);
    }

    #[test]
    fn test_refill_is_bounded() {
        let vp = Viewport::default();
        let mut level = generate(&seeded(3), &vp, 10.0);
        let mut stream = EndlessStream {
            builder: SeededBuilder::new(SeededParams::default(), vp),
        };
        for p in &mut level.platforms {
            p.pos.x -= 1.0e9;
        }
        let added = stream.refill(&mut level.platforms, &mut level.obstacles, &mut level.coins);
        assert_eq!(added, MAX_STREAM_REFILL);
    }

    #[test]
    fn test_params_are_repaired() {
        let params = SeededParams {
            gap_min: 90,
            gap_max: -40,
            vertical_offset_min: 20,
            vertical_offset_max: -20,
            platform_y_min: 600,
            platform_y_max: 500,
            obstacle_chance: 3.0,
            coin_chance: f64::NAN,
            obstacle_min_spacing: Some(-5.0),
            ..SeededParams::default()
        }
        .sanitized();
        assert_eq!((params.gap_min, params.gap_max), (0, 90));
        assert_eq!((params.vertical_offset_min, params.vertical_offset_max), (-20, 20));
        assert_eq!((params.platform_y_min, params.platform_y_max), (500, 600));
        assert_eq!(params.obstacle_chance, 1.0);
        assert_eq!(params.coin_chance, 0.0);
        assert_eq!(params.obstacle_min_spacing, None);

        assert_eq!(SeededParams::default().sanitized(), SeededParams::default());
    }

    #[test]
    fn test_invalid_index_falls_back_to_first() {
        let table = LevelTable::default();
        let (index, entry) = table.select(99);
        assert_eq!(index, 0);
        assert_eq!(entry.name, "Warm-up");
        let (index, _) = table.select(2);
        assert_eq!(index, 2);
    }

    #[test]
    fn test_empty_table_uses_builtin_levels() {
        let table = LevelTable::new(Vec::new());
        assert_eq!(table.len(), default_levels().len());
    }

    #[test]
    fn test_level_spec_json_is_tagged() {
        let json = r#"{
            "name": "Custom",
            "spec": { "mode": "seeded", "seed": 1, "gap_min": 50, "gap_max": 60,
                      "vertical_offset_min": 0, "vertical_offset_max": 0,
                      "platform_y_min": 500, "platform_y_max": 500,
                      "obstacle_chance": 0.0, "obstacle_max_per_platform": 0,
                      "coin_chance": 0.0 }
        }"#;
        let entry: LevelEntry = serde_json::from_str(json).unwrap();
        assert!(matches!(entry.spec, LevelSpec::Seeded(ref p) if p.seed == 1));
        assert_eq!(entry.duration_secs, None);
    }
}
