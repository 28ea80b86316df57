//! Tests de integración del simulador de imprenta y encuadernación.
//!
//! Las corridas usan unidades de milisegundos y semilla fija para que los
//! conteos sean estables; las aserciones se hacen sobre el registro de
//! eventos en memoria, no sobre la salida de consola.

use std::time::Duration;

use print_binding_simulator::{
    config, EventKind, SimConfig, SimEvent, Simulation, SimulationSummary,
};

fn run_sim(config: SimConfig, seed: u64) -> SimulationSummary {
    Simulation::new(config)
        .with_tick(Duration::from_millis(5))
        .with_seed(seed)
        .with_echo(false)
        .run()
        .expect("la simulación falló")
}

#[test]
fn test_concrete_scenario_n8_m4() {
    let config = SimConfig::new(8, 4, 2, 2, 1).expect("configuración válida");
    let summary = run_sim(config, 7);

    assert_eq!(summary.count(EventKind::StationArrival), 8);
    assert_eq!(summary.count(EventKind::PrintStart), 8);
    assert_eq!(summary.count(EventKind::PrintDone), 8);
    // Exactamente un evento de impresión completa por grupo y una entrega
    // por líder; el libro termina en 2
    assert_eq!(summary.count(EventKind::GroupPrintDone), 2);
    assert_eq!(summary.count(EventKind::BindStart), 2);
    assert_eq!(summary.count(EventKind::BindDone), 2);
    assert_eq!(summary.count(EventKind::Submission), 2);
    assert_eq!(summary.total_submissions, 2);
    assert_eq!(summary.submission_totals(), vec![1, 2]);
}

#[test]
fn test_every_student_prints_exactly_once() {
    let config = SimConfig::new(8, 4, 1, 1, 1).expect("configuración válida");
    let summary = run_sim(config, 11);

    for student in 1..=8usize {
        let starts = summary
            .events
            .iter()
            .filter(|e| matches!(e.event, SimEvent::PrintStart { student: s, .. } if s == student))
            .count();
        let dones = summary
            .events
            .iter()
            .filter(|e| matches!(e.event, SimEvent::PrintDone { student: s } if s == student))
            .count();
        assert_eq!(starts, 1, "el estudiante {} imprimió {} veces", student, starts);
        assert_eq!(dones, 1);
    }
}

#[test]
fn test_station_mutual_exclusion() {
    // El inicio de impresión se registra con la concesión tomada y el fin
    // antes de liberar, así que en el registro los usos de cada estación
    // deben alternar estrictamente inicio/fin.
    let config = SimConfig::new(16, 4, 1, 1, 1).expect("configuración válida");
    let summary = run_sim(config, 3);

    for station in 1..=config::PRINTING_STATIONS {
        let mut occupied = false;
        for e in &summary.events {
            match e.event {
                SimEvent::PrintStart {
                    student, station: s, ..
                } if s == station => {
                    assert!(
                        !occupied,
                        "la estación {} fue concedida al estudiante {} estando ocupada",
                        station, student
                    );
                    // La designación por residuo debe respetarse
                    assert_eq!((student - 1) % config::PRINTING_STATIONS, station - 1);
                    occupied = true;
                }
                SimEvent::PrintDone { student } => {
                    if (student - 1) % config::PRINTING_STATIONS == station - 1 {
                        occupied = false;
                    }
                }
                _ => {}
            }
        }
    }
}

#[test]
fn test_group_barrier_never_opens_early() {
    let config = SimConfig::new(8, 4, 2, 1, 1).expect("configuración válida");
    let summary = run_sim(config, 19);

    for (pos, e) in summary.events.iter().enumerate() {
        if let SimEvent::GroupPrintDone { group } = e.event {
            let members = ((group - 1) * 4 + 1)..=(group * 4);
            for student in members {
                let done_pos = summary
                    .events
                    .iter()
                    .position(|p| p.event == SimEvent::PrintDone { student })
                    .expect("falta el fin de impresión de un miembro");
                assert!(
                    done_pos < pos,
                    "el grupo {} se reportó completo antes de que terminara el estudiante {}",
                    group,
                    student
                );
            }
        }
    }
}

#[test]
fn test_binding_pool_capacity_respected() {
    // 4 grupos compitiendo por 2 ranuras de encuadernado: los encuadernados
    // activos (inicios menos fines) nunca pueden superar la capacidad
    let config = SimConfig::new(8, 2, 1, 2, 1).expect("configuración válida");
    let summary = run_sim(config, 5);

    assert_eq!(summary.count(EventKind::BindStart), 4);
    assert_eq!(summary.count(EventKind::BindDone), 4);

    let mut active = 0usize;
    for e in &summary.events {
        match e.event.kind() {
            EventKind::BindStart => {
                active += 1;
                assert!(
                    active <= config::BINDING_STATIONS,
                    "hubo {} encuadernados simultáneos",
                    active
                );
            }
            EventKind::BindDone => active -= 1,
            _ => {}
        }
    }
    assert_eq!(summary.total_submissions, 4);
}

#[test]
fn test_readers_never_observe_a_write_in_progress() {
    // La entrega se registra con el pase de escritura tomado, por lo que
    // ningún evento de entrega puede aparecer entre el inicio y el fin de
    // una lectura del personal
    let config = SimConfig::new(8, 4, 1, 1, 2).expect("configuración válida");
    let summary = run_sim(config, 23);

    for staff in 1..=config::STAFF_COUNT {
        let mut reading = false;
        for e in &summary.events {
            match e.event {
                SimEvent::ReadStart { staff: s, .. } if s == staff => reading = true,
                SimEvent::ReadDone { staff: s, .. } if s == staff => reading = false,
                SimEvent::Submission { .. } => {
                    assert!(
                        !reading,
                        "se registró una entrega mientras el empleado {} leía",
                        staff
                    );
                }
                _ => {}
            }
        }
    }
}

#[test]
fn test_staff_read_until_all_groups_submitted() {
    let config = SimConfig::new(8, 4, 1, 1, 1).expect("configuración válida");
    let summary = run_sim(config, 13);

    for staff in 1..=config::STAFF_COUNT {
        let last_read = summary
            .events
            .iter()
            .rev()
            .find_map(|e| match e.event {
                SimEvent::ReadStart { staff: s, value } if s == staff => Some(value),
                _ => None,
            })
            .expect("el empleado nunca leyó el libro");
        assert_eq!(
            last_read,
            config.num_groups() as u32,
            "el empleado {} se retiró antes de ver todas las entregas",
            staff
        );
    }
}

#[test]
fn test_single_group_run() {
    // N = M: un único grupo cuyo líder es el último estudiante
    let config = SimConfig::new(4, 4, 1, 1, 1).expect("configuración válida");
    let summary = run_sim(config, 31);

    assert_eq!(summary.count(EventKind::GroupPrintDone), 1);
    assert_eq!(summary.count(EventKind::Submission), 1);
    assert_eq!(summary.total_submissions, 1);
}

#[test]
fn test_report_generation() {
    let config = SimConfig::new(8, 4, 1, 1, 1).expect("configuración válida");
    let summary = run_sim(config, 17);

    let report = summary.generate_report();
    assert!(report.contains("REPORTE DE LA SIMULACIÓN"));
    assert!(report.contains("Entregas registradas"));
    assert!(report.contains("Valor final del libro de entradas"));
}
