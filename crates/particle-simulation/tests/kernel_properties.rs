use glam::Vec2;
use particle_physics::{integrate, Bounds, CollisionSolver, Particle};
use particle_simulation::{
    FixedClock, FrameLimit, ParticleInstance, SimulationParams, Simulation, SpawnRequest,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

fn no_spawn(_: usize, _: &Bounds) -> Option<SpawnRequest> {
    None
}

fn manual(params: SimulationParams) -> particle_simulation::Result<Simulation> {
    Ok(Simulation::new(params)?.with_spawn_policy(no_spawn))
}

/// One particle launched up and to the right in the demo box.
#[test]
fn projectile_arcs_and_stays_in_box() -> particle_simulation::Result<()> {
    let params = SimulationParams::new(60, Vec2::new(350.0, 1000.0))
        .with_substeps(12)
        .with_gravity(Vec2::new(0.0, 1500.0))
        .with_max_particles(1);
    let mut sim = manual(params)?;
    sim.spawn(SpawnRequest::new(Vec2::new(175.0, 833.0), 5.0).with_velocity(Vec2::new(300.0, -200.0)))?;
    sim.start()?;

    let mut heights = Vec::new();
    for _ in 0..60 {
        sim.frame(params.frame_duration())?;
        let p = sim.particles()[0];
        let pos = p.position_current;
        assert!(pos.x >= 5.0 && pos.x <= 345.0, "x out of box: {pos:?}");
        assert!(pos.y <= 995.0, "below floor: {pos:?}");
        heights.push(pos.y);
    }

    let (lowest, min_y) = heights
        .iter()
        .copied()
        .enumerate()
        .fold((0, f32::INFINITY), |acc, (i, y)| if y < acc.1 { (i, y) } else { acc });

    assert!(min_y < 833.0, "never rose: {heights:?}");
    assert!(lowest < heights.len() - 1, "still rising at the end");
    assert!(heights[heights.len() - 1] > min_y);
    Ok(())
}

#[test]
fn free_flight_moves_at_constant_velocity() -> particle_simulation::Result<()> {
    // Power-of-two steps keep every position exactly representable.
    let params = SimulationParams::new(64, Vec2::new(1000.0, 1000.0))
        .with_substeps(4)
        .with_gravity(Vec2::ZERO);
    let mut sim = manual(params)?;
    let start = Vec2::new(500.0, 500.0);
    let v = Vec2::new(64.0, 32.0);
    sim.spawn(SpawnRequest::new(start, 5.0).with_velocity(v))?;
    sim.start()?;

    let frames = 10;
    for _ in 0..frames {
        sim.frame(Duration::ZERO)?;
    }

    let expected = start + v * (frames as f32 * params.frame_time());
    let got = sim.particles()[0].position_current;
    assert!((got - expected).length() < 1e-3, "got {got:?}, expected {expected:?}");
    Ok(())
}

#[test]
fn falling_from_rest_follows_verlet_parabola() -> particle_simulation::Result<()> {
    let g = 1024.0;
    let params = SimulationParams::new(64, Vec2::new(1000.0, 1.0e6))
        .with_substeps(4)
        .with_gravity(Vec2::new(0.0, g));
    let mut sim = manual(params)?;
    sim.spawn(SpawnRequest::new(Vec2::new(500.0, 0.0), 5.0))?;
    sim.start()?;

    let frames = 16;
    for _ in 0..frames {
        sim.frame(Duration::ZERO)?;
    }

    let dt = params.substep_time();
    let k = (frames * params.substep_count) as f32;
    let t = k * dt;
    let analytic = 0.5 * g * t * t;
    let error_bound = 0.5 * g * dt * dt * k;

    let y = sim.particles()[0].position_current.y;
    assert!(y > analytic);
    assert!((y - analytic).abs() <= error_bound * 1.05, "y = {y}, analytic = {analytic}");
    Ok(())
}

#[test]
fn top_of_the_box_is_open() -> particle_simulation::Result<()> {
    let params = SimulationParams::default().with_max_particles(1);
    let mut sim = manual(params)?;
    sim.spawn(SpawnRequest::new(Vec2::new(175.0, 50.0), 5.0).with_velocity(Vec2::new(0.0, -3000.0)))?;
    sim.start()?;

    for _ in 0..5 {
        sim.frame(Duration::ZERO)?;
    }
    assert!(sim.particles()[0].position_current.y < 0.0);
    Ok(())
}

#[test]
fn constraint_holds_after_every_clamp() -> particle_simulation::Result<()> {
    let params = SimulationParams::default().with_max_particles(40);
    let mut sim = Simulation::new(params)?;
    sim.run(
        &mut |_: &[ParticleInstance]| {},
        &mut FrameLimit::new(90),
        &mut FixedClock::new(params.frame_duration()),
    )?;

    let bounds = params.bounds();
    let solver = params.solver();
    let mut particles: Vec<Particle> = sim.particles().to_vec();
    for _ in 0..params.substep_count * 10 {
        integrate(&mut particles, params.substep_time());
        bounds.apply(&mut particles);
        for p in &particles {
            let pos = p.position_current;
            assert!(pos.x >= p.radius() && pos.x <= bounds.width - p.radius(), "{pos:?}");
            assert!(pos.y <= bounds.height - p.radius(), "{pos:?}");
        }
        solver.resolve(&mut particles);
    }
    Ok(())
}

#[test]
fn population_grows_monotonically_to_ceiling() -> particle_simulation::Result<()> {
    let params = SimulationParams::default().with_max_particles(30);
    let mut sim = Simulation::new(params)?;
    sim.start()?;

    let mut last = 0;
    for _ in 0..60 {
        sim.frame(params.frame_duration())?;
        let population = sim.population();
        assert!(population >= last);
        assert!(population <= 30);
        last = population;
    }
    assert_eq!(last, 30);
    assert!(sim.particles().iter().all(|p| p.position_current.is_finite()));
    Ok(())
}

#[test]
fn overlap_resolution_never_diverges() {
    let solver = CollisionSolver::default();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let ra = rng.random_range(5.0..25.0);
        let rb = rng.random_range(5.0..25.0);
        let min_dist: f32 = ra + rb;
        let angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
        let dist = rng.random_range(0.5..min_dist - 1.0);

        let centre = Vec2::new(rng.random_range(100.0..200.0), rng.random_range(100.0..200.0));
        let mut pair = [
            Particle::new(centre, ra),
            Particle::new(centre + Vec2::from_angle(angle) * dist, rb),
        ];

        let gap = |p: &[Particle; 2]| (p[0].position_current.distance(p[1].position_current) - min_dist).abs();
        let mut previous = gap(&pair);
        for _ in 0..20 {
            solver.resolve(&mut pair);
            let current = gap(&pair);
            assert!(current < previous, "gap grew from {previous} to {current}");
            previous = current;
        }
    }
}
