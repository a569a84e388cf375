//! Sub-stepped Verlet solver over a fixed-capacity object pool.

use std::{sync::Arc, time::Duration};

use glam::Vec4;
use parking_lot::Mutex;

use crate::{
    collision::{
        boundary::Boundary,
        contact::{merge_point, merge_target, solve_contact},
        pairs::{pair_count, pair_from_index},
    },
    config::SolverConfig,
    core::{fruit::Fruit, object::PhysicsObject, types::ObjectSnapshot},
    dynamics::{
        parallel::{Dispatcher, ThreadPool},
        pool::{ObjectPool, Slot},
    },
    error::Result,
    utils::{
        logging::ScopedTimer,
        profiling::{PhaseTimer, SolverProfile},
    },
};

/// Two same-tier objects that touched during a collision pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    pub first: usize,
    pub second: usize,
    /// Tier of the replacement object.
    pub fruit: Fruit,
    pub position: Vec4,
}

/// Owns the object pool, boundaries and scoring, and advances the simulation.
///
/// Every mutating call takes `&mut self`, so placements can never race an
/// in-flight [`PhysicsSolver::update`].
pub struct PhysicsSolver {
    config: SolverConfig,
    pool: ObjectPool,
    boundaries: Vec<Arc<dyn Boundary>>,
    dispatcher: Box<dyn Dispatcher>,
    merges: Arc<Mutex<Vec<MergeEvent>>>,
    score: u32,
    just_merged: u32,
    profile: SolverProfile,
}

impl PhysicsSolver {
    pub fn new(config: SolverConfig, dispatcher: Box<dyn Dispatcher>) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "solver created: capacity {}, {} sub-steps, dispatcher {} ({} threads)",
            config.max_objects,
            config.sub_steps,
            dispatcher.name(),
            dispatcher.thread_count()
        );
        Ok(Self {
            pool: ObjectPool::with_capacity(config.max_objects),
            config,
            boundaries: Vec::new(),
            dispatcher,
            merges: Arc::new(Mutex::new(Vec::new())),
            score: 0,
            just_merged: 0,
            profile: SolverProfile::default(),
        })
    }

    /// Solver driven by a [`ThreadPool`] sized to the machine.
    pub fn with_thread_pool(config: SolverConfig) -> Result<Self> {
        Self::new(config, Box::new(ThreadPool::with_default_threads()?))
    }

    pub fn set_dispatcher<D>(&mut self, dispatcher: D)
    where
        D: Dispatcher + 'static,
    {
        self.dispatcher = Box::new(dispatcher);
    }

    pub fn dispatcher_name(&self) -> &str {
        self.dispatcher.name()
    }

    pub fn add_boundary<B>(&mut self, boundary: B)
    where
        B: Boundary + 'static,
    {
        self.boundaries.push(Arc::new(boundary));
    }

    pub fn boundaries(&self) -> &[Arc<dyn Boundary>] {
        &self.boundaries
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec4 {
        self.config.gravity()
    }

    pub fn set_gravity(&mut self, gravity: Vec4) {
        self.config.gravity = gravity.to_array();
    }

    pub fn set_sub_steps(&mut self, sub_steps: u32) {
        self.config.sub_steps = sub_steps.max(1);
    }

    /// Installs `object` in the lowest free slot and returns its index.
    ///
    /// A full pool rejects the object with [`crate::Error::PoolExhausted`] and
    /// leaves every slot untouched.
    pub fn add_object(&mut self, object: PhysicsObject) -> Result<usize> {
        self.pool
            .insert(object)
            .inspect_err(|err| log::warn!("placement rejected: {err}"))
    }

    /// Creates a growing object of tier `fruit` at `position`.
    pub fn spawn(
        &mut self,
        position: Vec4,
        fruit: Fruit,
        dynamic: bool,
        hidden: bool,
    ) -> Result<usize> {
        self.add_object(PhysicsObject::new(position, fruit, dynamic, hidden))
    }

    /// Frees a slot. Removing a free or out-of-range index does nothing.
    pub fn remove_object(&mut self, index: usize) -> bool {
        self.pool.remove(index)
    }

    /// Empties the pool and zeroes the score and merge counter.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.merges.lock().clear();
        self.score = 0;
        self.just_merged = 0;
        self.profile.reset();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Merges since the counter was last taken.
    pub fn just_merged(&self) -> u32 {
        self.just_merged
    }

    /// Returns the merge counter and clears it; meant to be called once per frame.
    pub fn take_just_merged(&mut self) -> u32 {
        std::mem::take(&mut self.just_merged)
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn object_count(&self) -> usize {
        self.pool.len()
    }

    pub fn free_count(&self) -> usize {
        self.pool.free_count()
    }

    pub fn has_object(&self, index: usize) -> bool {
        self.pool.is_occupied(index)
    }

    pub fn object(&self, index: usize) -> Option<PhysicsObject> {
        self.pool.get(index)
    }

    /// Mutates an occupied object between updates.
    pub fn with_object_mut<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut PhysicsObject) -> R,
    ) -> Option<R> {
        self.pool.with_mut(index, f)
    }

    pub fn occupied_indices(&self) -> Vec<usize> {
        self.pool.occupied_indices().collect()
    }

    /// Visits every occupied slot in index order.
    pub fn for_each_object<F>(&self, mut f: F)
    where
        F: FnMut(usize, &PhysicsObject),
    {
        for (index, slot) in self.pool.slots().iter().enumerate() {
            if slot.is_occupied() {
                f(index, &slot.lock());
            }
        }
    }

    /// Drawing data for every occupied slot.
    pub fn snapshot(&self) -> Vec<ObjectSnapshot> {
        let mut out = Vec::with_capacity(self.pool.len());
        self.for_each_object(|index, object| {
            out.push(ObjectSnapshot {
                index,
                position: object.position,
                radius: object.radius,
                fruit: object.fruit,
                hidden: object.hidden,
            })
        });
        out
    }

    /// Lowest y among visible objects, if there are any.
    pub fn lowest_object_height(&self) -> Option<f32> {
        let mut lowest: Option<f32> = None;
        self.for_each_object(|_, object| {
            if !object.hidden {
                lowest = Some(lowest.map_or(object.position.y, |y| y.min(object.position.y)));
            }
        });
        lowest
    }

    pub fn profile(&self) -> &SolverProfile {
        &self.profile
    }

    /// Advances the simulation by `dt`, split into `sub_steps` passes of
    /// collisions, merges, integration and boundary enforcement.
    pub fn update(&mut self, dt: f32) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        let _timer = ScopedTimer::new("solver::update");

        let sub_steps = self.config.sub_steps.max(1);
        let sub_dt = dt / sub_steps as f32;
        let mut profile = SolverProfile {
            sub_steps,
            ..SolverProfile::default()
        };
        let mut total = Duration::ZERO;
        {
            let _total = PhaseTimer::new(&mut total);
            for _ in 0..sub_steps {
                {
                    let _t = PhaseTimer::new(&mut profile.collision_time);
                    self.solve_collisions();
                }
                {
                    let _t = PhaseTimer::new(&mut profile.merge_time);
                    profile.merge_count += self.apply_merges();
                }
                {
                    let _t = PhaseTimer::new(&mut profile.integrate_time);
                    self.integrate(sub_dt);
                }
                {
                    let _t = PhaseTimer::new(&mut profile.boundary_time);
                    self.enforce_boundaries();
                }
            }
        }
        profile.total_time = total;
        profile.object_count = self.pool.len();
        self.profile = profile;
        self.profile.report();
    }

    /// Resolves every unordered slot pair, split evenly across the dispatcher.
    pub fn solve_collisions(&mut self) {
        let slots = self.pool.shared_slots();
        let n = slots.len();
        let total = pair_count(n) as usize;
        let merges = Arc::clone(&self.merges);
        let response_coef = self.config.response_coef;
        let eps = self.config.eps;

        self.dispatcher.dispatch(
            total,
            Arc::new(move |start: usize, end: usize| {
                for k in start..end {
                    let (i, j) = pair_from_index(k as u64, n);
                    solve_contact_safe(&slots, i, j, response_coef, eps, &merges);
                }
            }),
        );
        self.dispatcher.wait_for_completion();
    }

    /// Replaces every merged pair recorded by the last collision pass.
    fn apply_merges(&mut self) -> usize {
        let mut events = std::mem::take(&mut *self.merges.lock());
        events.sort_by_key(|event| (event.first, event.second));

        for event in &events {
            self.pool.remove(event.first);
            self.pool.remove(event.second);
            match self.pool.insert(PhysicsObject::new(event.position, event.fruit, true, false)) {
                Ok(index) => log::debug!(
                    "merged slots {} and {} into {} at slot {index}",
                    event.first,
                    event.second,
                    event.fruit.name()
                ),
                Err(err) => log::warn!("merge replacement dropped: {err}"),
            }
            self.score += event.fruit.points();
            self.just_merged += 1;
        }
        events.len()
    }

    /// Adds gravity and integrates every visible object.
    ///
    /// `dynamic` only governs contact response; statics still fall and grow.
    fn integrate(&mut self, dt: f32) {
        let slots = self.pool.shared_slots();
        let config = self.config;
        let gravity = config.gravity();

        self.dispatcher.dispatch(
            slots.len(),
            Arc::new(move |start: usize, end: usize| {
                for slot in &slots[start..end] {
                    if !slot.is_occupied() {
                        continue;
                    }
                    let mut object = slot.lock();
                    if object.hidden {
                        continue;
                    }
                    object.accelerate(gravity);
                    object.update(dt, &config);
                }
            }),
        );
        self.dispatcher.wait_for_completion();
    }

    fn enforce_boundaries(&mut self) {
        for boundary in &self.boundaries {
            let slots = self.pool.shared_slots();
            let boundary = Arc::clone(boundary);

            self.dispatcher.dispatch(
                slots.len(),
                Arc::new(move |start: usize, end: usize| {
                    for slot in &slots[start..end] {
                        if !slot.is_occupied() {
                            continue;
                        }
                        let mut object = slot.lock();
                        if object.hidden {
                            continue;
                        }
                        boundary.enforce(&mut object);
                    }
                }),
            );
            self.dispatcher.wait_for_completion();
        }
    }
}

/// Resolves one pair with both slot locks held, lower index first.
///
/// Two touching objects of the same tier are hidden together and queued for
/// merging instead of being pushed apart.
fn solve_contact_safe(
    slots: &[Slot],
    i: usize,
    j: usize,
    response_coef: f32,
    eps: f32,
    merges: &Mutex<Vec<MergeEvent>>,
) {
    if i == j {
        return;
    }
    if !slots[i].is_occupied() || !slots[j].is_occupied() {
        return;
    }

    let (first, second) = (i.min(j), i.max(j));
    let mut a = slots[first].lock();
    let mut b = slots[second].lock();

    if let Some(fruit) = merge_target(&a, &b) {
        let position = merge_point(&a, &b);
        a.disable();
        b.disable();
        merges.lock().push(MergeEvent {
            first,
            second,
            fruit,
            position,
        });
        return;
    }

    solve_contact(&mut a, &mut b, response_coef, eps);
}
