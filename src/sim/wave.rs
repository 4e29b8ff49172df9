//! Stage / wave spawn plans and the scheduler that plays them back
//!
//! A stage is an ordered list of waves. Each wave lists spawn entries as frame
//! offsets from the wave's start plus a total duration; when the duration runs
//! out the next wave starts at frame 0.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found in stage data
#[derive(Debug, Error)]
pub enum StageError {
    #[error("failed to parse stage JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("stage has no waves")]
    Empty,
    #[error("wave {wave}: spawn at frame {frame} never fires (wave lasts {total} frames)")]
    SpawnOutOfRange { wave: usize, frame: u32, total: u32 },
}

/// Stats of a spawned enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySpec {
    pub hp: i32,
    /// Pixels per tick
    pub speed: f32,
    /// Money credited when destroyed
    pub reward: u32,
    /// Ticks between shots at the base
    pub fire_interval: u32,
}

impl Default for EnemySpec {
    fn default() -> Self {
        Self {
            hp: 3,
            speed: 2.0,
            reward: 10,
            fire_interval: 30,
        }
    }
}

/// One scheduled spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    /// Frame offset from the start of the wave
    pub frame: u32,
    #[serde(default)]
    pub enemy: EnemySpec,
}

impl SpawnEntry {
    pub fn at(frame: u32) -> Self {
        Self {
            frame,
            enemy: EnemySpec::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub spawns: Vec<SpawnEntry>,
    /// Frames until the next wave starts
    pub total_frames: u32,
}

impl Wave {
    pub fn new(frames: &[u32], total_frames: u32) -> Self {
        Self {
            spawns: frames.iter().copied().map(SpawnEntry::at).collect(),
            total_frames,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub waves: Vec<Wave>,
}

impl Stage {
    /// Three escalating waves (60 ticks = 1 second)
    pub fn sample() -> Self {
        Self {
            waves: vec![
                Wave::new(&[60, 120, 180], 300),
                Wave::new(&[60, 90, 150, 210], 360),
                Wave::new(&[60, 90, 120, 150, 180, 210], 360),
            ],
        }
    }

    /// A single enemy, for quick runs
    pub fn debug() -> Self {
        Self {
            waves: vec![Wave::new(&[60], 300)],
        }
    }

    /// Seeded procedural stage: later waves are longer, denser and tougher
    pub fn generate(seed: u64, wave_count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut waves = Vec::with_capacity(wave_count);

        for index in 0..wave_count {
            let level = index as u32;
            let total_frames = 300 + level * 60;
            let count = 3 + level + rng.random_range(0..=level.min(4));

            let mut spawns: Vec<SpawnEntry> = (0..count)
                .map(|_| SpawnEntry {
                    frame: rng.random_range(30..total_frames - 30),
                    enemy: EnemySpec {
                        hp: 3 + (level / 2) as i32,
                        speed: 2.0 + rng.random_range(0.0f32..0.5),
                        reward: 10 + level * 5,
                        fire_interval: 30u32.saturating_sub(level * 2).max(15),
                    },
                })
                .collect();
            spawns.sort_by_key(|s| s.frame);

            waves.push(Wave {
                spawns,
                total_frames,
            });
        }

        log::info!("Generated stage with {} waves (seed {})", wave_count, seed);
        Self { waves }
    }

    /// Parse and validate a stage from JSON
    pub fn from_json(json: &str) -> Result<Self, StageError> {
        let stage: Self = serde_json::from_str(json)?;
        stage.validate()?;
        Ok(stage)
    }

    /// Every spawn must land inside its wave's duration
    pub fn validate(&self) -> Result<(), StageError> {
        if self.waves.is_empty() {
            return Err(StageError::Empty);
        }
        for (wave_index, wave) in self.waves.iter().enumerate() {
            if let Some(entry) = wave.spawns.iter().find(|s| s.frame >= wave.total_frames) {
                return Err(StageError::SpawnOutOfRange {
                    wave: wave_index,
                    frame: entry.frame,
                    total: wave.total_frames,
                });
            }
        }
        Ok(())
    }

    pub fn total_spawns(&self) -> usize {
        self.waves.iter().map(|w| w.spawns.len()).sum()
    }
}

/// Playback position within a stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveScheduler {
    /// Current wave (0-based); past the end once the stage is done
    pub wave_index: usize,
    /// Frames elapsed in the current wave
    pub frame: u32,
}

impl WaveScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// All waves have run their full duration
    pub fn is_exhausted(&self, stage: &Stage) -> bool {
        self.wave_index >= stage.waves.len()
    }

    /// Advance one tick, returning the enemies due this frame
    pub fn step(&mut self, stage: &Stage) -> Vec<EnemySpec> {
        let Some(wave) = stage.waves.get(self.wave_index) else {
            return Vec::new();
        };

        let due: Vec<EnemySpec> = wave
            .spawns
            .iter()
            .filter(|s| s.frame == self.frame)
            .map(|s| s.enemy.clone())
            .collect();

        self.frame += 1;
        // A zero-length wave also ends here
        if self.frame >= wave.total_frames {
            self.wave_index += 1;
            self.frame = 0;
            log::info!("Wave {} finished", self.wave_index);
        }

        due
    }
}
