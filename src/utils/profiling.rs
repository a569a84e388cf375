use std::time::{Duration, Instant};

/// Per-update timing data for the solver phases.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolverProfile {
    pub collision_time: Duration,
    pub merge_time: Duration,
    pub integrate_time: Duration,
    pub boundary_time: Duration,
    pub total_time: Duration,

    pub object_count: usize,
    pub merge_count: usize,
    pub sub_steps: u32,
}

impl SolverProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "solver update: {} objects, {} merges, {} sub-steps, {:.2} ms",
            self.object_count,
            self.merge_count,
            self.sub_steps,
            self.total_time.as_secs_f32() * 1000.0
        );
        log::debug!(
            "  collisions {:.1}% | merges {:.1}% | integrate {:.1}% | boundary {:.1}%",
            Self::share(self.collision_time, total_us),
            Self::share(self.merge_time, total_us),
            Self::share(self.integrate_time, total_us),
            Self::share(self.boundary_time, total_us),
        );
    }

    fn share(phase: Duration, total_us: f32) -> f32 {
        (phase.as_micros() as f32 / total_us) * 100.0
    }
}

/// Adds the elapsed time of its scope to a phase counter.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
