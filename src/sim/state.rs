//! Game state and core simulation types
//!
//! Everything the per-frame tick mutates lives in `GameState`. Randomness is
//! never stored here: callers pass a generator into the operations that need
//! one, so a seeded generator replays a run exactly.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{AsteroidSize, Entity, EntityKind};
use crate::consts::TURN_RATE_DEG;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start signal
    Idle,
    /// Active gameplay
    Running,
    /// Out of lives; final score has been reported
    GameOver,
}

/// Player controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    RotateLeft,
    RotateRight,
    Fire,
}

/// Discrete key transitions from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

/// Notifications for the host (HUD, audio, game-over handling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    ScoreChanged(u32),
    LivesChanged(u32),
    BonusLife,
    AsteroidDestroyed { size: AsteroidSize, position: Vec2 },
    PlayerHit,
    DifficultyRaised(u32),
    BulletEvicted { id: u32 },
    /// Safe placement was not found within the attempt ceiling
    SpawnFallback { attempts: u32 },
    GameOver { score: u32 },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Frames ticked since creation (including idle and stunned frames)
    pub time_ticks: u64,
    /// Simulation frozen through this tick (inclusive)
    pub stunned_until: Option<u64>,
    pub score: u32,
    pub lives: u32,
    /// Points toward the next bonus life
    pub bonus_progress: u32,
    /// Target number of concurrent asteroids
    pub difficulty: u32,
    /// Running ticks since the difficulty last rose
    pub ramp_ticks: u32,
    pub player: Entity,
    pub hud: Entity,
    pub wait_screen: Entity,
    /// Live bullets, oldest first
    pub bullets: Vec<Entity>,
    pub asteroids: Vec<Entity>,
    /// Pending notifications, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game using the given settings
    pub fn new(settings: Settings) -> Self {
        let bounds = settings.playfield;
        let mut state = Self {
            phase: GamePhase::Idle,
            time_ticks: 0,
            stunned_until: None,
            score: 0,
            lives: settings.initial_lives,
            bonus_progress: 0,
            difficulty: settings.initial_difficulty,
            ramp_ticks: 0,
            player: Entity::player(0, bounds.center()),
            hud: Entity::hud(0, Vec2::new(bounds.width / 20.0, bounds.height / 20.0), 0, 0),
            wait_screen: Entity::wait_screen(0, bounds.center()),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            settings,
        };
        state.player.id = state.next_entity_id();
        state.hud.id = state.next_entity_id();
        state.wait_screen.id = state.next_entity_id();
        state.sync_hud();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start signal from the menu. Restarting after game over begins a fresh run.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Running => return,
            GamePhase::GameOver => {
                let settings = self.settings.clone();
                let time_ticks = self.time_ticks;
                *self = Self::new(settings);
                self.time_ticks = time_ticks;
            }
            GamePhase::Idle => {}
        }
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!(
            "game started: lives={} difficulty={}",
            self.lives,
            self.difficulty
        );
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Frozen after a hit
    pub fn is_stunned(&self) -> bool {
        self.stunned_until.is_some_and(|until| self.time_ticks <= until)
    }

    /// Apply one key transition
    ///
    /// Turning is level-triggered (held key sets a constant spin, release
    /// stops it); fire is edge-triggered and only works while running.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Key::RotateRight) => self.player.rotation_delta = TURN_RATE_DEG,
            InputEvent::KeyDown(Key::RotateLeft) => self.player.rotation_delta = -TURN_RATE_DEG,
            InputEvent::KeyUp(Key::RotateLeft | Key::RotateRight) => {
                self.player.rotation_delta = 0.0
            }
            InputEvent::KeyDown(Key::Fire) => {
                if self.is_running() {
                    self.fire_bullet();
                }
            }
            InputEvent::KeyUp(Key::Fire) => {}
        }
    }

    /// Launch a bullet from the ship, evicting the oldest past the cap
    pub fn fire_bullet(&mut self) {
        let id = self.next_entity_id();
        self.bullets.push(Entity::bullet(id, &self.player));
        while self.bullets.len() > self.settings.max_bullets {
            let evicted = self.bullets.remove(0);
            self.events.push(GameEvent::BulletEvicted { id: evicted.id });
        }
    }

    /// Fragments and points for a destroyed asteroid
    ///
    /// Returns the fragments; the caller decides when they join the field.
    pub fn split_asteroid<R: Rng + ?Sized>(&mut self, asteroid: &Entity, rng: &mut R) -> Vec<Entity> {
        let Some(state) = asteroid.asteroid_state() else {
            return Vec::new();
        };
        let size = state.size;
        let position = asteroid.position;

        let mut fragments = Vec::new();
        if let Some((child, count)) = size.split() {
            for _ in 0..count {
                let id = self.next_entity_id();
                fragments.push(Entity::asteroid(id, position, child, rng));
            }
        }

        log::debug!(
            "asteroid {} ({:?}) destroyed at ({:.0}, {:.0}), {} fragments",
            asteroid.id,
            size,
            position.x,
            position.y,
            fragments.len()
        );
        self.events.push(GameEvent::AsteroidDestroyed { size, position });
        self.award_points(size.points());
        fragments
    }

    /// Add to score and bonus progress, granting lives past the threshold
    pub fn award_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.bonus_progress = self.bonus_progress.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged(self.score));

        let threshold = self.settings.bonus_life_threshold;
        while threshold > 0 && self.bonus_progress > threshold {
            self.bonus_progress -= threshold;
            self.lives += 1;
            log::info!("bonus life awarded, lives={}", self.lives);
            self.events.push(GameEvent::BonusLife);
            self.events.push(GameEvent::LivesChanged(self.lives));
        }
        self.sync_hud();
    }

    /// The player was struck: lose a life, freeze briefly, maybe end the run
    pub fn player_hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.stunned_until = Some(self.time_ticks + u64::from(self.settings.stun_ticks));
        self.events.push(GameEvent::PlayerHit);
        self.events.push(GameEvent::LivesChanged(self.lives));
        self.sync_hud();
        log::debug!("player hit, lives={}", self.lives);

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("game over, final score {}", self.score);
        }
    }

    /// Count one running tick toward the next difficulty step
    pub fn ramp_difficulty(&mut self) {
        self.ramp_ticks += 1;
        if self.ramp_ticks >= self.settings.difficulty_ramp_ticks {
            self.ramp_ticks = 0;
            self.difficulty += 1;
            log::debug!("difficulty raised to {}", self.difficulty);
            self.events.push(GameEvent::DifficultyRaised(self.difficulty));
        }
    }

    /// Push score and lives into the HUD overlay
    fn sync_hud(&mut self) {
        self.hud.kind = EntityKind::Hud {
            score: self.score,
            lives: self.lives,
        };
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
