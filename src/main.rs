use std::env;
use std::io::{self, BufRead};
use std::process;

use print_binding_simulator::{SimConfig, Simulation};

/// Lee los cinco enteros de configuración: de los argumentos de línea de
/// comandos si se pasaron, o de una línea de la entrada estándar si no.
fn read_tokens() -> Result<Vec<String>, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args);
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| format!("No se pudo leer la entrada estándar: {}", e))?;
    Ok(line.split_whitespace().map(|s| s.to_string()).collect())
}

fn main() {
    let tokens = read_tokens().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let config = SimConfig::from_tokens(&tokens).unwrap_or_else(|e| {
        eprintln!(
            "Uso:\n  print-binding-simulator <N> <M> <t_impresión> <t_encuadernado> <t_lectura>\n\
             Donde N = estudiantes, M = tamaño de grupo (debe dividir a N) y los\n\
             tiempos son enteros positivos en segundos.\n\
             Ejemplo:\n  print-binding-simulator 8 4 2 2 1\nError: {}",
            e
        );
        process::exit(1);
    });

    println!("=== Simulación de imprenta y encuadernación ===");
    println!(
        "Estudiantes: {}, grupos de {}, impresión {}s, encuadernado {}s, lectura/escritura {}s",
        config.students, config.group_size, config.print_time, config.bind_time, config.rw_time
    );
    println!();

    let summary = Simulation::new(config).run().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!("{}", summary.generate_report());
}
