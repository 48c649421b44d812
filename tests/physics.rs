use disk_sim::collision::{self, ContactFrame};
use disk_sim::{Body, Error, Mass, Simulation, StepMode};
use ultraviolet::Vec2;

const MODES: [StepMode; 2] = [StepMode::PairResolved, StepMode::Sequential];

fn body(x: f32, y: f32, vx: f32, vy: f32, radius: f32, mass: f32) -> Body {
    Body::with_mass(Vec2::new(x, y), Vec2::new(vx, vy), radius, mass).unwrap()
}

fn world(bodies: Vec<Body>, dt: f32, g: f32, mode: StepMode) -> Simulation {
    let mut sim = Simulation::with_bodies(bodies, dt, g).unwrap();
    sim.set_mode(mode);
    sim
}

#[test]
fn derived_mass_is_half_radius() -> disk_sim::Result<()> {
    for radius in [0.25_f32, 1.0, 5.0, 64.0] {
        let b = Body::try_new(Vec2::zero(), Vec2::zero(), radius, Mass::Derived)?;
        assert_eq!(b.mass, radius / 2.0);
    }
    assert!(matches!(
        Body::try_new(Vec2::zero(), Vec2::zero(), 1.0, Mass::Explicit(0.0)),
        Err(Error::InvalidParameter(_))
    ));
    Ok(())
}

#[test]
fn head_on_equal_masses_swap() {
    let mut bodies = vec![
        body(0.0, 0.0, 1.0, 0.0, 1.0, 10.0),
        body(10.0, 0.0, -1.0, 0.0, 1.0, 10.0),
    ];
    collision::resolve_pair(&mut bodies, 0, 1).unwrap();
    assert_eq!(bodies[0].vel, Vec2::new(-1.0, 0.0));
    assert_eq!(bodies[1].vel, Vec2::new(1.0, 0.0));
}

#[test]
fn collision_conserves_normal_momentum() {
    let mut a = body(0.0, 0.0, 2.0, 1.0, 1.0, 3.0);
    let mut b = body(1.0, 1.0, -1.0, 0.5, 1.0, 7.0);
    let frame = ContactFrame::from_separation(b.pos - a.pos).unwrap();
    let normal_momentum =
        |a: &Body, b: &Body| a.mass * frame.decompose(a.vel).0 + b.mass * frame.decompose(b.vel).0;

    let before = normal_momentum(&a, &b);
    collision::resolve(&mut a, &mut b, &frame);
    let after = normal_momentum(&a, &b);

    assert!((before - after).abs() < 1e-4, "{before} -> {after}");
}

#[test]
fn lone_resting_body_stays_put() -> disk_sim::Result<()> {
    for mode in MODES {
        let mut sim = world(vec![body(3.0, 4.0, 0.0, 0.0, 1.0, 1.0)], 0.1, 10_000.0, mode);
        sim.step()?;
        assert_eq!(sim.bodies[0].pos, Vec2::new(3.0, 4.0));
        assert_eq!(sim.bodies[0].vel, Vec2::zero());
    }
    Ok(())
}

#[test]
fn isolated_pair_obeys_third_law() -> disk_sim::Result<()> {
    for mode in MODES {
        let (m_a, m_b, d, g) = (2.0_f32, 3.0_f32, 10.0_f32, 1.5_f32);
        let mut sim = world(
            vec![
                body(0.0, 0.0, 0.0, 0.0, 1.0, m_a),
                body(d, 0.0, 0.0, 0.0, 1.0, m_b),
            ],
            0.001,
            g,
            mode,
        );
        let report = sim.step()?;
        assert_eq!(report.contacts, 0);

        let acc_a = sim.bodies[0].acc.mag();
        let acc_b = sim.bodies[1].acc.mag();
        assert!((acc_a - g * m_b / (d * d)).abs() < 1e-6);
        assert!((acc_a * m_a - acc_b * m_b).abs() < 1e-6);
    }
    Ok(())
}

#[test]
fn contact_leaves_pair_exactly_touching() -> disk_sim::Result<()> {
    for mode in MODES {
        for depth in [0.01_f32, 0.5, 2.5] {
            // oblique contact normal, centers (3 - depth) apart
            let a = Vec2::new(10.0, 10.0);
            let b = a + Vec2::new(3.0, 0.3).normalized() * (3.0 - depth);
            let mut sim = world(
                vec![
                    body(a.x, a.y, 0.5, 0.0, 1.5, 2.0),
                    body(b.x, b.y, -0.5, 0.1, 1.5, 5.0),
                ],
                0.0,
                100.0,
                mode,
            );
            let report = sim.step()?;
            assert!(report.contacts > 0, "{mode:?} depth {depth}: no contact");
            let gap = (sim.bodies[1].pos - sim.bodies[0].pos).mag();
            assert!((gap - 3.0).abs() < 1e-4, "{mode:?} depth {depth}: gap {gap}");
        }
    }
    Ok(())
}

#[test]
fn free_collisions_conserve_momentum_and_energy() -> disk_sim::Result<()> {
    let mut sim = world(
        vec![
            body(0.0, 0.0, 3.0, 0.2, 2.0, 1.0),
            body(20.0, 1.0, -1.0, 0.0, 2.0, 4.0),
            body(40.0, -1.5, -2.0, 0.1, 2.0, 2.5),
        ],
        0.02,
        0.0,
        StepMode::PairResolved,
    );
    let p0 = sim.total_momentum();
    let e0 = sim.kinetic_energy();

    let mut contacts = 0;
    for _ in 0..1000 {
        contacts += sim.step()?.contacts;
    }
    assert!(contacts > 0);

    let p1 = sim.total_momentum();
    assert!((p1 - p0).mag() < 1e-3, "momentum drifted {p0:?} -> {p1:?}");
    assert!(((sim.kinetic_energy() - e0) / e0).abs() < 1e-4);
    Ok(())
}

#[test]
fn gravity_with_contacts_keeps_total_momentum() -> disk_sim::Result<()> {
    let mut sim = Simulation::with_params(30, disk_sim::Screen::default(), 17, 1.0 / 60.0, 10_000.0)?;
    let p0 = sim.total_momentum();
    for _ in 0..300 {
        sim.step()?;
    }
    let p1 = sim.total_momentum();
    let scale = sim.bodies.iter().map(|b| b.momentum().mag()).sum::<f32>().max(1.0);
    assert!((p1 - p0).mag() < 1e-3 * scale, "momentum drifted {p0:?} -> {p1:?}");
    Ok(())
}

#[test]
fn random_world_stays_finite_in_both_modes() -> disk_sim::Result<()> {
    for mode in MODES {
        let mut sim = Simulation::new()?;
        sim.set_mode(mode);
        for _ in 0..200 {
            sim.step()?;
        }
        assert!(sim.bodies.iter().all(Body::is_finite));
    }
    Ok(())
}

#[test]
fn same_seed_same_trajectory() -> disk_sim::Result<()> {
    let run = || -> disk_sim::Result<Vec<Body>> {
        let mut sim = Simulation::new()?;
        for _ in 0..50 {
            sim.step()?;
        }
        Ok(sim.bodies)
    };
    assert_eq!(run()?, run()?);
    Ok(())
}
