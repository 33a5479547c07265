use crate::ecs::{ComponentKind, World};
use crate::systems::{
    Access, CollisionSystem, FlowSystem, GravitySystem, LifetimeSystem, MovementSystem,
    PipelineError, System, SystemDescriptor,
};
use dust_metrics::{Counter, SystemProfiler};
use std::collections::HashSet;

/// Two systems that both write the same kinds; `later` sees what `earlier` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOverlap {
    pub earlier: String,
    pub later: String,
    pub kinds: Vec<ComponentKind>,
}

/// Ordered list of systems run once per tick.
///
/// Registration validates the descriptor of each system: names must be unique
/// and every system must declare at least one component it touches. Kinds
/// written by more than one system are recorded as overlaps, since their
/// final value depends on run order.
pub struct SystemPipeline {
    systems: Vec<Box<dyn System>>,
    descriptors: Vec<SystemDescriptor>,
    names: HashSet<String>,
    overlaps: Vec<WriteOverlap>,
    profiler: SystemProfiler,
    counters: Counter,
}

impl SystemPipeline {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            descriptors: Vec::new(),
            names: HashSet::new(),
            overlaps: Vec::new(),
            profiler: SystemProfiler::new(),
            counters: Counter::new(),
        }
    }

    /// Gravity → movement → collision → flow → lifetime, with handles cached
    /// against `world`.
    pub fn standard(world: &World, gravity: f64) -> Result<Self, PipelineError> {
        let mut pipeline = Self::new();
        pipeline.register(GravitySystem::new(world, gravity))?;
        pipeline.register(MovementSystem::new(world))?;
        pipeline.register(CollisionSystem::new(world))?;
        pipeline.register(FlowSystem::new(world))?;
        pipeline.register(LifetimeSystem::new(world))?;
        Ok(pipeline)
    }

    /// Append a system. It runs after every previously registered one.
    pub fn register<S>(&mut self, system: S) -> Result<usize, PipelineError>
    where
        S: System + 'static,
    {
        let descriptor = system.descriptor();
        if descriptor.is_empty() {
            return Err(PipelineError::EmptyAccess {
                name: descriptor.name().to_string(),
            });
        }
        if !self.names.insert(descriptor.name().to_string()) {
            return Err(PipelineError::DuplicateName {
                name: descriptor.name().to_string(),
            });
        }

        for earlier in &self.descriptors {
            let kinds = earlier.shared_writes(&descriptor);
            if kinds.is_empty() {
                continue;
            }
            tracing::debug!(
                earlier = earlier.name(),
                later = descriptor.name(),
                ?kinds,
                "systems write the same components"
            );
            self.overlaps.push(WriteOverlap {
                earlier: earlier.name().to_string(),
                later: descriptor.name().to_string(),
                kinds,
            });
        }

        tracing::debug!(system = %descriptor, "registered system");
        self.descriptors.push(descriptor);
        self.systems.push(Box::new(system));
        Ok(self.systems.len() - 1)
    }

    /// Run every system once, in registration order, then sweep dead particles.
    ///
    /// Returns how many destroyed particles were swept from the stores.
    pub fn run(&mut self, world: &World, dt: f64) -> usize {
        let profiler = &mut self.profiler;
        for (system, descriptor) in self.systems.iter_mut().zip(&self.descriptors) {
            let _span = tracing::trace_span!("system", name = descriptor.name()).entered();
            dust_metrics::time_scope!(profiler, descriptor.name(), { system.update(world, dt) });
            system.record_metrics(&mut self.counters);
        }

        let swept = world.collect_garbage();
        self.counters.increment("ticks", 1);
        self.counters.increment("particles_swept", swept);
        swept
    }

    /// Systems in run order, for driving `World::update` directly.
    pub fn systems_mut(&mut self) -> &mut [Box<dyn System>] {
        &mut self.systems
    }

    pub fn descriptors(&self) -> &[SystemDescriptor] {
        &self.descriptors
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name())
    }

    /// Every pair of systems writing a common kind, in registration order.
    pub fn write_overlaps(&self) -> &[WriteOverlap] {
        &self.overlaps
    }

    /// Names of the systems that write `kind`, in run order.
    pub fn writers_of(&self, kind: ComponentKind) -> Vec<&str> {
        self.descriptors
            .iter()
            .filter(|d| d.access(kind) == Some(Access::Write))
            .map(|d| d.name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Accumulated per-system timings (empty unless the `metrics` feature is on).
    pub fn profiler(&self) -> &SystemProfiler {
        &self.profiler
    }

    pub fn counters(&self) -> &Counter {
        &self.counters
    }
}

impl Default for SystemPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Velocity;
    use crate::ecs::ComponentKind;

    struct Named(&'static str, Vec<ComponentKind>);

    impl System for Named {
        fn descriptor(&self) -> SystemDescriptor {
            SystemDescriptor::new(self.0).writes(self.1.clone())
        }

        fn update(&mut self, _world: &World, _dt: f64) {}
    }

    #[test]
    fn standard_pipeline_order() {
        let world = World::new();
        let pipeline = SystemPipeline::standard(&world, 9.8).unwrap();
        let names: Vec<_> = pipeline.names().collect();
        assert_eq!(names, vec!["gravity", "movement", "collision", "flow", "lifetime"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut pipeline = SystemPipeline::new();
        pipeline
            .register(Named("wind", vec![ComponentKind::Velocity]))
            .unwrap();
        let err = pipeline
            .register(Named("wind", vec![ComponentKind::Position]))
            .unwrap_err();
        assert_eq!(err, PipelineError::DuplicateName { name: "wind".into() });
        assert_eq!(pipeline.len(), 1);
    }

    #[test]
    fn systems_without_access_are_rejected() {
        let mut pipeline = SystemPipeline::new();
        let err = pipeline.register(Named("noop", vec![])).unwrap_err();
        assert_eq!(err, PipelineError::EmptyAccess { name: "noop".into() });
        assert!(pipeline.is_empty());
    }

    #[test]
    fn run_sweeps_particles_destroyed_during_the_tick() {
        let world = World::new();
        let mut pipeline = SystemPipeline::standard(&world, 0.0).unwrap();
        let p = world.create_particle();
        world.insert(p, Velocity::new(0.0, 0.0));
        world.insert(p, crate::components::Lifetime::new(0.01));

        assert_eq!(pipeline.run(&world, 0.016), 1);
        assert!(!world.has_particle(p));
        assert!(!world.store::<Velocity>().has(p));
    }

    #[test]
    fn world_update_accepts_pipeline_systems() {
        let world = World::new();
        let mut pipeline = SystemPipeline::standard(&world, 10.0).unwrap();
        let p = world.create_particle();
        world.insert(p, Velocity::new(0.0, 0.0));

        world.update(pipeline.systems_mut(), 0.5);
        assert_eq!(world.get::<Velocity>(p), Some(Velocity::new(0.0, 5.0)));
    }

    #[test]
    fn standard_pipeline_records_write_overlaps() {
        let world = World::new();
        let pipeline = SystemPipeline::standard(&world, 9.8).unwrap();

        assert_eq!(
            pipeline.writers_of(ComponentKind::Position),
            vec!["movement", "collision"]
        );
        assert_eq!(
            pipeline.writers_of(ComponentKind::Velocity),
            vec!["gravity", "movement", "collision", "flow"]
        );
        assert_eq!(pipeline.writers_of(ComponentKind::Lifetime), vec!["lifetime"]);

        // Every pair among the four velocity writers, nothing involving lifetime.
        let overlaps = pipeline.write_overlaps();
        assert_eq!(overlaps.len(), 6);
        assert!(overlaps.iter().all(|o| o.later != "lifetime"));
        assert!(overlaps.contains(&WriteOverlap {
            earlier: "movement".into(),
            later: "collision".into(),
            kinds: vec![ComponentKind::Position, ComponentKind::Velocity],
        }));
    }

    #[test]
    fn disjoint_writers_do_not_overlap() {
        let mut pipeline = SystemPipeline::new();
        pipeline
            .register(Named("paint", vec![ComponentKind::Color]))
            .unwrap();
        pipeline
            .register(Named("grow", vec![ComponentKind::Size]))
            .unwrap();
        assert!(pipeline.write_overlaps().is_empty());
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn run_counts_pair_checks_and_expiries() {
        use crate::components::{Lifetime, Position, Size};

        let world = World::new();
        let mut pipeline = SystemPipeline::standard(&world, 0.0).unwrap();
        for i in 0..3 {
            let p = world.create_particle();
            world.insert(p, Position::new(f64::from(i) * 10.0, 0.0));
            world.insert(p, Size::new(0.3));
        }
        let brief = world.create_particle();
        world.insert(brief, Lifetime::new(0.01));

        pipeline.run(&world, 0.016);
        pipeline.run(&world, 0.016);

        let counters = pipeline.counters();
        assert_eq!(counters.get("ticks"), 2);
        assert_eq!(counters.get("pair_checks"), 6);
        assert_eq!(counters.get("separations"), 0);
        assert_eq!(counters.get("particles_expired"), 1);
        assert_eq!(counters.get("particles_swept"), 1);
    }
}
