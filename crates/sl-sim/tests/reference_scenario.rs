//! Integration test: reference collector loop.
//!
//! Panel: 300 W sun, 10 kJ/K, 15 W/K to air, 50 W/K to water, 0.5 L contact.
//! Tank: 150 L at 295 K. Pump: 0.25 L/s, 0.1 s sub-steps, 600 per tick.

use sl_sim::{NoDelay, Panel, SimOptions, SolarLoop, StatusLine, Tank, WriterSink, run_live};

fn reference_loop() -> SolarLoop {
    SolarLoop::with_options(SimOptions::default()).expect("reference options are valid")
}

#[test]
fn first_sub_step_values() {
    let mut panel = Panel::default();
    assert_eq!(panel.compute_air_loss(), 300.0);

    let outlet = panel.compute_water_outlet_temp(295.0, 0.25);
    assert_eq!(panel.heat_to_water_w, 1250.0);
    assert!((outlet - 296.1945).abs() < 1e-4);

    let mut tank = Tank::default();
    tank.advance(296.0, 0.25, 0.1);
    assert!((tank.temp_k - 295.000_166_666_7).abs() < 1e-9);
}

#[test]
fn first_sub_step_through_driver() {
    let mut sim = reference_loop();
    sim.advance_one_step();

    assert!((sim.panel().temp_k - 319.9875).abs() < 1e-12);
    assert!((sim.tank().temp_k - 295.000_166_666_7).abs() < 1e-9);
    assert!((sim.panel().water_out_temp_k - 296.194_457_716_2).abs() < 1e-9);
}

#[test]
fn first_three_status_lines() {
    let mut sim = reference_loop();
    let mut sink = WriterSink::new(Vec::new());
    run_live(&mut sim, &mut sink, &mut NoDelay, Some(3)).unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "0.0min Panel Temp: 320.0, Tank Temp: 295.0, Water to/from panel: 295.0/296.0",
            "1.0min Panel Temp: 313.8, Tank Temp: 295.1, Water to/from panel: 295.1/296.0",
            "2.0min Panel Temp: 309.63, Tank Temp: 295.18, Water to/from panel: 295.18/295.87",
        ]
    );
}

#[test]
fn status_after_three_ticks() {
    let mut sim = reference_loop();
    for _ in 0..3 {
        sim.run_tick();
    }
    let StatusLine {
        elapsed_min,
        panel_temp_k,
        tank_temp_k,
        ..
    } = sim.status();
    assert_eq!(elapsed_min, 3.0);
    assert!((panel_temp_k - 306.820_465_505).abs() < 1e-6);
    assert!((tank_temp_k - 295.243_732_840).abs() < 1e-6);
}
