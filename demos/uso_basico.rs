//! Ejemplo básico de uso del simulador de imprenta y encuadernación

use std::time::Duration;

use print_binding_simulator::{SimConfig, Simulation};

fn main() {
    println!("=== Ejemplo: Uso Básico del Simulador ===\n");

    // Escenario clásico: 8 estudiantes en grupos de 4 (líderes: 4 y 8)
    println!("1. Escenario 8 estudiantes / grupos de 4...");
    let config = SimConfig::new(8, 4, 2, 2, 1).expect("configuración válida");
    let summary = Simulation::new(config)
        .with_tick(Duration::from_millis(100))
        .with_seed(7)
        .run()
        .expect("la simulación falló");
    println!("{}", summary.generate_report());

    // Más grupos que ranuras de encuadernado: se observa la contención
    println!("\n2. Escenario 12 estudiantes / grupos de 3 (4 grupos, 2 ranuras)...");
    let config = SimConfig::new(12, 3, 1, 2, 1).expect("configuración válida");
    let summary = Simulation::new(config)
        .with_tick(Duration::from_millis(100))
        .with_seed(21)
        .run()
        .expect("la simulación falló");
    println!("{}", summary.generate_report());

    println!("Ejemplo completado.");
}
