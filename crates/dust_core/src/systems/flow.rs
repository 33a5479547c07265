use crate::components::{Behavior, Position, Velocity};
use crate::ecs::{ComponentKind, ComponentStore, Particle, World};
use crate::systems::{System, SystemDescriptor};
use std::sync::Arc;

/// Horizontal velocity exchanged by two stacked fluid particles.
pub const FLOW_PUSH: f64 = 0.5;
/// Vertical offset under which two fluid particles count as level.
pub const FLOW_LEVEL_BAND: f64 = 0.5;
/// Horizontal reach of the spreading push.
pub const FLOW_REACH: f64 = 1.5;
/// Squared horizontal offset under which particles are considered stacked exactly.
pub const FLOW_MIN_DX_SQ: f64 = 0.1;
pub const FLOW_DAMPING_X: f64 = 0.95;
pub const FLOW_DAMPING_Y: f64 = 0.98;

/// Spreads fluids sideways and lets them settle.
///
/// Each flowing particle scans every other flowing particle (ascending id
/// order, both directions of every pair), then has its velocity damped.
pub struct FlowSystem {
    behaviors: Arc<ComponentStore<Behavior>>,
    positions: Arc<ComponentStore<Position>>,
    velocities: Arc<ComponentStore<Velocity>>,
}

struct Fluid {
    particle: Particle,
    pos: Position,
    vel: Velocity,
}

impl FlowSystem {
    pub fn new(world: &World) -> Self {
        Self {
            behaviors: world.store::<Behavior>(),
            positions: world.store::<Position>(),
            velocities: world.store::<Velocity>(),
        }
    }

    fn collect_fluids(&self, world: &World) -> Vec<Fluid> {
        world
            .query()
            .with_store(&self.behaviors)
            .with_store(&self.positions)
            .with_store(&self.velocities)
            .execute()
            .into_iter()
            .filter(|&particle| {
                self.behaviors
                    .get(particle)
                    .is_some_and(|behavior| behavior.can_flow)
            })
            .filter_map(|particle| {
                Some(Fluid {
                    particle,
                    pos: self.positions.get(particle)?,
                    vel: self.velocities.get(particle)?,
                })
            })
            .collect()
    }
}

impl System for FlowSystem {
    fn descriptor(&self) -> SystemDescriptor {
        SystemDescriptor::new("flow")
            .reads([ComponentKind::Behavior, ComponentKind::Position])
            .writes([ComponentKind::Velocity])
    }

    fn update(&mut self, world: &World, _dt: f64) {
        let mut fluids = self.collect_fluids(world);

        for i in 0..fluids.len() {
            let origin = fluids[i].pos;
            for j in 0..fluids.len() {
                if i == j {
                    continue;
                }
                let dx = fluids[j].pos.x - origin.x;
                let dy = fluids[j].pos.y - origin.y;
                if dy.abs() < FLOW_LEVEL_BAND && dx.abs() < FLOW_REACH && dx * dx > FLOW_MIN_DX_SQ {
                    let push = if dx > 0.0 { FLOW_PUSH } else { -FLOW_PUSH };
                    fluids[i].vel.vx -= push;
                    fluids[j].vel.vx += push;
                }
            }

            let vel = &mut fluids[i].vel;
            vel.vx *= FLOW_DAMPING_X;
            vel.vy *= FLOW_DAMPING_Y;
        }

        for fluid in &fluids {
            self.velocities.set(fluid.particle, fluid.vel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{spawn_sand, spawn_water};

    fn spawn_fluid(world: &World, x: f64, y: f64, vel: Velocity) -> Particle {
        let p = spawn_water(world, x, y);
        world.insert(p, vel);
        p
    }

    #[test]
    fn isolated_fluid_is_only_damped() {
        let world = World::new();
        let mut flow = FlowSystem::new(&world);
        let p = spawn_fluid(&world, 5.0, 5.0, Velocity::new(10.0, 10.0));

        flow.update(&world, 0.016);

        let v = world.get::<Velocity>(p).unwrap();
        assert!((v.vx - 9.5).abs() < 1e-12);
        assert!((v.vy - 9.8).abs() < 1e-12);
    }

    #[test]
    fn level_neighbours_push_apart_both_ways() {
        let world = World::new();
        let mut flow = FlowSystem::new(&world);
        let left = spawn_fluid(&world, 5.0, 5.0, Velocity::new(0.0, 0.0));
        let right = spawn_fluid(&world, 6.0, 5.2, Velocity::new(0.0, 0.0));

        flow.update(&world, 0.016);

        // left pass: left -0.5, right +0.5, left damped
        // right pass: right +0.5, left -0.5, right damped
        let l = world.get::<Velocity>(left).unwrap();
        let r = world.get::<Velocity>(right).unwrap();
        assert!((l.vx - (-0.5 * 0.95 - 0.5)).abs() < 1e-12);
        assert!((r.vx - (1.0 * 0.95)).abs() < 1e-12);
    }

    #[test]
    fn stacked_or_distant_fluids_do_not_push() {
        let world = World::new();
        let mut flow = FlowSystem::new(&world);
        let a = spawn_fluid(&world, 5.0, 5.0, Velocity::new(1.0, 0.0));
        // Directly above: dx too small.
        let b = spawn_fluid(&world, 5.1, 5.3, Velocity::new(1.0, 0.0));
        // Level but beyond reach.
        let c = spawn_fluid(&world, 8.0, 5.0, Velocity::new(1.0, 0.0));

        flow.update(&world, 0.016);

        for p in [a, b, c] {
            let v = world.get::<Velocity>(p).unwrap();
            assert!((v.vx - 0.95).abs() < 1e-12);
        }
    }

    #[test]
    fn solids_are_ignored() {
        let world = World::new();
        let mut flow = FlowSystem::new(&world);
        let sand = spawn_sand(&world, 5.0, 5.0);
        world.insert(sand, Velocity::new(2.0, 2.0));
        let water = spawn_fluid(&world, 6.0, 5.0, Velocity::new(0.0, 0.0));

        flow.update(&world, 0.016);

        assert_eq!(world.get::<Velocity>(sand), Some(Velocity::new(2.0, 2.0)));
        assert_eq!(world.get::<Velocity>(water), Some(Velocity::new(0.0, 0.0)));
    }
}
