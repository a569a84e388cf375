use std::time::Instant;

use glam::{Vec3, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{
    collision::{boundary::HemisphereBoundary, queries::Raycast},
    config::{GameConfig, MAX_CATCH_UP_STEPS},
    core::{
        fruit::Fruit,
        types::{Ray, RayHit},
    },
    dynamics::{parallel::Dispatcher, solver::PhysicsSolver},
    error::Result,
    utils::logging::{warn_if_frame_budget_exceeded, ScopedTimer},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Active,
    GameOver,
}

/// A placement waiting for the next fixed update.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingDrop {
    position: Vec4,
}

/// One play session: the solver plus the rules around it.
///
/// Placements go through [`Game::request_drop`] and only reach the solver at the
/// start of a fixed update, never while one is running.
pub struct Game {
    solver: PhysicsSolver,
    config: GameConfig,
    phase: GamePhase,
    high_score: u32,
    next_fruit: Fruit,
    rng: Pcg32,
    time_accumulated: f32,
    pending_drops: Vec<PendingDrop>,
}

impl Game {
    /// Session backed by the default thread pool.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let solver = PhysicsSolver::with_thread_pool(config.solver)?;
        Self::with_solver(config, solver)
    }

    /// Session whose solver runs on `dispatcher`.
    pub fn with_dispatcher<D>(config: GameConfig, dispatcher: D) -> Result<Self>
    where
        D: Dispatcher + 'static,
    {
        config.validate()?;
        let solver = PhysicsSolver::new(config.solver, Box::new(dispatcher))?;
        Self::with_solver(config, solver)
    }

    fn with_solver(config: GameConfig, mut solver: PhysicsSolver) -> Result<Self> {
        solver.add_boundary(HemisphereBoundary::from_config(&config.boundary)?);

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let next_fruit = roll_fruit(&mut rng);
        log::info!(
            "session started: seed {:#x}, capacity {}, dispatcher {}",
            config.seed,
            solver.capacity(),
            solver.dispatcher_name()
        );

        Ok(Self {
            solver,
            config,
            phase: GamePhase::Active,
            high_score: 0,
            next_fruit,
            rng,
            time_accumulated: 0.0,
            pending_drops: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn solver(&self) -> &PhysicsSolver {
        &self.solver
    }

    /// Direct solver access between fixed updates, for scripted setups.
    pub fn solver_mut(&mut self) -> &mut PhysicsSolver {
        &mut self.solver
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.solver.score()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.max(self.solver.score())
    }

    pub fn next_fruit(&self) -> Fruit {
        self.next_fruit
    }

    pub fn pending_drops(&self) -> usize {
        self.pending_drops.len()
    }

    /// Merges since the last call; the audio and UI layers poll this once per frame.
    pub fn take_just_merged(&mut self) -> u32 {
        self.solver.take_just_merged()
    }

    /// Queues the next fruit above `point` in slice `w`.
    ///
    /// Returns `false` once the session is over.
    pub fn request_drop(&mut self, point: Vec3, w: f32) -> bool {
        if self.phase != GamePhase::Active {
            return false;
        }
        let w = w.clamp(self.config.w_min, self.config.w_max);
        let position = Vec4::new(point.x, point.y + self.config.drop_height, point.z, w);
        self.pending_drops.push(PendingDrop { position });
        true
    }

    /// Nearest placement target under `ray`. Never mutates the session.
    pub fn preview(&self, ray: &Ray, w: f32) -> RayHit {
        Raycast::pick(&self.solver, w, ray)
    }

    /// Accumulates frame time and runs as many fixed updates as fit.
    ///
    /// At most [`MAX_CATCH_UP_STEPS`] run per call; time left over after a long
    /// frame is dropped rather than replayed.
    pub fn step(&mut self, frame_dt: f32) -> usize {
        if !(frame_dt > 0.0) || !frame_dt.is_finite() {
            return 0;
        }
        self.time_accumulated += frame_dt;

        let mut steps = 0;
        while self.time_accumulated >= self.config.time_step {
            if steps == MAX_CATCH_UP_STEPS {
                log::warn!(
                    "frame too long, dropping {:.1}ms of simulation time",
                    self.time_accumulated * 1000.0
                );
                self.time_accumulated = 0.0;
                break;
            }
            self.time_accumulated -= self.config.time_step;
            self.fixed_update();
            steps += 1;
        }
        steps
    }

    /// One fixed tick: flush drops, simulate, despawn, then check for game over.
    pub fn fixed_update(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        let _timer = ScopedTimer::new("game::fixed_update");
        let started = Instant::now();

        self.flush_drops();
        self.solver.update(self.config.time_step);
        self.despawn_fallen();
        self.check_game_over();

        warn_if_frame_budget_exceeded(started.elapsed(), self.config.frame_budget_ms);
    }

    /// Clears the bowl and starts a new round. The high score survives.
    pub fn restart(&mut self) {
        self.high_score = self.high_score();
        self.solver.reset();
        self.pending_drops.clear();
        self.time_accumulated = 0.0;
        self.phase = GamePhase::Active;
        self.next_fruit = roll_fruit(&mut self.rng);
        log::info!("session restarted, high score {}", self.high_score);
    }

    fn flush_drops(&mut self) {
        for pending in std::mem::take(&mut self.pending_drops) {
            match self.solver.spawn(pending.position, self.next_fruit, true, false) {
                Ok(index) => {
                    log::debug!(
                        "dropped {} into slot {index} at {:?}",
                        self.next_fruit.name(),
                        pending.position
                    );
                    self.next_fruit = roll_fruit(&mut self.rng);
                }
                Err(err) => log::warn!("drop discarded: {err}"),
            }
        }
    }

    fn despawn_fallen(&mut self) {
        let mut fallen = Vec::new();
        self.solver.for_each_object(|index, object| {
            if object.position.y < self.config.despawn_height {
                fallen.push(index);
            }
        });
        for index in fallen {
            self.solver.remove_object(index);
        }
    }

    fn check_game_over(&mut self) {
        let Some(lowest) = self.solver.lowest_object_height() else {
            return;
        };
        if lowest < self.config.game_over_height {
            self.phase = GamePhase::GameOver;
            self.high_score = self.high_score();
            log::info!(
                "game over: score {}, high score {}",
                self.solver.score(),
                self.high_score
            );
        }
    }
}

fn roll_fruit(rng: &mut Pcg32) -> Fruit {
    Fruit::DROPPABLE[rng.random_range(0..Fruit::DROPPABLE.len())]
}
