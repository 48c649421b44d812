use disk_sim::driver::{self, FixedFrames, NullRenderer, Pacing};
use disk_sim::{ScenarioConfig, StepMode};
use std::io::Write;

#[test]
fn loads_scenario_from_file() -> disk_sim::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        "screen: {{ width: 640, height: 480 }}\nseed: 3\nbodies: 25\ndt: 0.01\nmode: sequential"
    )?;

    let cfg = ScenarioConfig::from_path(file.path())?;
    let mut sim = cfg.build()?;
    assert_eq!(sim.bodies.len(), 25);
    assert_eq!(sim.mode, StepMode::Sequential);
    assert!(sim.disks().all(|d| d.x < 640.0 && d.y < 480.0));

    let summary = driver::run(&mut sim, &mut NullRenderer, &mut FixedFrames::new(20), Pacing::Unthrottled)?;
    assert_eq!(summary.frames, 20);
    assert_eq!(sim.frame, 20);
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let err = ScenarioConfig::from_path("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, disk_sim::Error::Io(_)));
}

#[test]
fn moon_stays_in_orbit() -> disk_sim::Result<()> {
    let mut sim = ScenarioConfig::earth_moon().build()?;
    let start = (sim.bodies[1].pos - sim.bodies[0].pos).mag();

    for _ in 0..600 {
        let report = sim.step()?;
        assert_eq!(report.contacts, 0);
        let d = (sim.bodies[1].pos - sim.bodies[0].pos).mag();
        assert!(((d - start) / start).abs() < 0.1, "orbit radius {start} -> {d}");
    }
    Ok(())
}
