//! # Módulo de Simulación Principal
//!
//! Orquesta la corrida completa: valida la configuración, precalcula los
//! retrasos de llegada (Poisson acumulada), lanza un hilo por estudiante y
//! por empleado, y espera a que todos terminen antes de devolver el resumen.
//! La creación fallida de un hilo es un error fatal de arranque y se reporta
//! con su causa; ningún hilo queda sin join en una corrida exitosa.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

use crate::binding::BindingPool;
use crate::config;
use crate::events::{EventLog, SimEvent};
use crate::group::GroupCoordinator;
use crate::ledger::EntryBook;
use crate::metrics::SimulationSummary;
use crate::printing::StationAllocator;

/// Configuración de entrada de la simulación: cinco enteros positivos en
/// orden fijo. El número de estaciones de impresión (4), de encuadernado (2)
/// y de empleados lectores (2) son constantes, no entradas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Número de estudiantes (N)
    pub students: usize,
    /// Tamaño de grupo (M); debe dividir exactamente a N
    pub group_size: usize,
    /// Duración de la impresión, en unidades de tiempo
    pub print_time: u64,
    /// Duración del encuadernado, en unidades de tiempo
    pub bind_time: u64,
    /// Duración de la lectura/escritura del libro, en unidades de tiempo
    pub rw_time: u64,
}

impl SimConfig {
    /// Crea y valida una configuración. Falla antes de lanzar hilo alguno si
    /// algún valor no es positivo o si `group_size` no divide a `students`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use print_binding_simulator::SimConfig;
    ///
    /// let config = SimConfig::new(8, 4, 2, 2, 1).unwrap();
    /// assert_eq!(config.num_groups(), 2);
    ///
    /// assert!(SimConfig::new(8, 3, 2, 2, 1).is_err()); // 3 no divide a 8
    /// assert!(SimConfig::new(0, 1, 2, 2, 1).is_err());
    /// ```
    pub fn new(
        students: usize,
        group_size: usize,
        print_time: u64,
        bind_time: u64,
        rw_time: u64,
    ) -> Result<Self, String> {
        if students == 0 || group_size == 0 {
            return Err("El número de estudiantes y el tamaño de grupo deben ser > 0".to_string());
        }
        if print_time == 0 || bind_time == 0 || rw_time == 0 {
            return Err("Las duraciones de servicio deben ser > 0".to_string());
        }
        if students % group_size != 0 {
            return Err(format!(
                "El tamaño de grupo ({}) debe dividir exactamente al número de estudiantes ({})",
                group_size, students
            ));
        }
        Ok(Self {
            students,
            group_size,
            print_time,
            bind_time,
            rw_time,
        })
    }

    /// Parsea la configuración desde cinco tokens en orden fijo:
    /// `N M impresión encuadernado lectura/escritura`.
    pub fn from_tokens(tokens: &[String]) -> Result<Self, String> {
        if tokens.len() != 5 {
            return Err(format!(
                "Se esperaban 5 enteros positivos, se recibieron {}",
                tokens.len()
            ));
        }
        let parse_usize = |idx: usize, label: &str| -> Result<usize, String> {
            tokens[idx]
                .parse()
                .map_err(|_| format!("Valor inválido para {}: {}", label, tokens[idx]))
        };
        let parse_u64 = |idx: usize, label: &str| -> Result<u64, String> {
            tokens[idx]
                .parse()
                .map_err(|_| format!("Valor inválido para {}: {}", label, tokens[idx]))
        };

        Self::new(
            parse_usize(0, "número de estudiantes")?,
            parse_usize(1, "tamaño de grupo")?,
            parse_u64(2, "tiempo de impresión")?,
            parse_u64(3, "tiempo de encuadernado")?,
            parse_u64(4, "tiempo de lectura/escritura")?,
        )
    }

    /// Cantidad de grupos (`N / M`).
    pub fn num_groups(&self) -> usize {
        self.students / self.group_size
    }
}

/// Recursos compartidos entre todos los hilos de la corrida.
struct Shared {
    allocator: StationAllocator,
    coordinator: GroupCoordinator,
    pool: BindingPool,
    book: EntryBook,
    log: EventLog,
}

/// Orquestador de la simulación.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use print_binding_simulator::{SimConfig, Simulation};
///
/// let config = SimConfig::new(4, 2, 1, 1, 1).expect("configuración válida");
/// let summary = Simulation::new(config)
///     .with_tick(Duration::from_millis(2))
///     .with_seed(7)
///     .with_echo(false)
///     .run()
///     .expect("la simulación falló");
/// assert_eq!(summary.total_submissions, 2);
/// ```
pub struct Simulation {
    config: SimConfig,
    tick: Duration,
    seed: Option<u64>,
    echo: bool,
}

impl Simulation {
    /// Crea una simulación con la unidad de tiempo por defecto (1 segundo)
    /// y salida por consola habilitada.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            tick: config::DEFAULT_TICK,
            seed: None,
            echo: true,
        }
    }

    /// Cambia la duración real de una unidad de tiempo simulada.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Fija la semilla de los retrasos aleatorios (corridas repetibles).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Habilita o silencia la salida por consola.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Ejecuta la simulación completa: lanza los hilos de estudiantes y
    /// empleados, espera a todos y devuelve el resumen de la corrida.
    pub fn run(&self) -> Result<SimulationSummary, String> {
        let cfg = self.config;
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let arrivals = arrival_offsets(cfg.students, &mut rng);

        let start = Instant::now();
        let shared = Arc::new(Shared {
            allocator: StationAllocator::new(
                cfg.students,
                cfg.group_size,
                config::PRINTING_STATIONS,
            ),
            coordinator: GroupCoordinator::new(cfg.students, cfg.group_size),
            pool: BindingPool::new(config::BINDING_STATIONS),
            book: EntryBook::new(),
            log: EventLog::new(self.tick, self.echo),
        });

        let mut handles = Vec::with_capacity(cfg.students + config::STAFF_COUNT);

        for (student, &arrival) in arrivals.iter().enumerate() {
            let shared = Arc::clone(&shared);
            let tick = self.tick;
            let name = format!("estudiante-{}", student + 1);
            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || student_unit(student, arrival, cfg, tick, &shared))
                .map_err(|e| format!("No se pudo crear el hilo {}: {}", name, e))?;
            handles.push((name, handle));
        }

        for staff in 0..config::STAFF_COUNT {
            let shared = Arc::clone(&shared);
            let tick = self.tick;
            let staff_seed = rng.gen::<u64>();
            let name = format!("empleado-{}", staff + 1);
            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || staff_unit(staff, cfg, tick, staff_seed, &shared))
                .map_err(|e| format!("No se pudo crear el hilo {}: {}", name, e))?;
            handles.push((name, handle));
        }

        for (name, handle) in handles {
            handle
                .join()
                .map_err(|_| format!("El hilo {} terminó con pánico", name))?;
        }

        let total = shared.book.acquire_read().value();
        Ok(SimulationSummary::new(
            shared.log.snapshot(),
            total,
            start.elapsed(),
        ))
    }
}

/// Ciclo de vida de un estudiante.
///
/// Llega tras su retraso aleatorio, imprime en su estación designada y, si es
/// líder, espera la barrera de su grupo, encuaderna y registra la entrega en
/// el libro. Las ocupaciones se mantienen durante los retrasos de servicio:
/// la estación durante la impresión, la ranura durante el encuadernado y el
/// pase de escritura durante la actualización del libro.
fn student_unit(student: usize, arrival: u64, cfg: SimConfig, tick: Duration, shared: &Shared) {
    thread::sleep(tick * arrival as u32);
    shared.log.log(SimEvent::StationArrival {
        student: student + 1,
    });

    let guard = shared.allocator.request_station(student);
    shared.log.log(SimEvent::PrintStart {
        student: student + 1,
        station: guard.station() + 1,
    });
    thread::sleep(tick * cfg.print_time as u32);
    shared.log.log(SimEvent::PrintDone {
        student: student + 1,
    });
    drop(guard);
    shared.coordinator.mark_print_done(student);

    if !shared.coordinator.is_leader(student) {
        return;
    }

    shared.coordinator.await_group_print_done(student);
    let group = shared.coordinator.group_of(student) + 1;
    shared.log.log(SimEvent::GroupPrintDone { group });

    let permit = shared.pool.acquire();
    shared.log.log(SimEvent::BindStart { group });
    thread::sleep(tick * cfg.bind_time as u32);
    shared.log.log(SimEvent::BindDone { group });
    drop(permit);

    let pass = shared.book.acquire_write();
    let total = pass.record_submission();
    thread::sleep(tick * cfg.rw_time as u32);
    shared.log.log(SimEvent::Submission { group, total });
    drop(pass);
}

/// Ciclo de vida de un empleado lector.
///
/// Lee el libro de entradas a intervalos aleatorios, manteniendo el pase de
/// lectura durante el retraso simulado, hasta observar que todos los grupos
/// entregaron su informe.
fn staff_unit(staff: usize, cfg: SimConfig, tick: Duration, seed: u64, shared: &Shared) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let groups = cfg.num_groups() as u32;

    loop {
        let pause = rng.gen_range(1..=3u64);
        thread::sleep(tick * pause as u32);

        let pass = shared.book.acquire_read();
        let value = pass.value();
        shared.log.log(SimEvent::ReadStart {
            staff: staff + 1,
            value,
        });
        thread::sleep(tick * cfg.rw_time as u32);
        shared.log.log(SimEvent::ReadDone {
            staff: staff + 1,
            value: pass.value(),
        });
        drop(pass);

        if value >= groups {
            break;
        }
    }
}

/// Retrasos de llegada: offsets acumulados muestreados de una Poisson con la
/// tasa fija de la simulación, igual que el generador original de llegadas.
fn arrival_offsets(students: usize, rng: &mut SmallRng) -> Vec<u64> {
    let poisson = Poisson::new(config::ARRIVAL_RATE).expect("tasa de llegada válida");
    let mut next = 0u64;
    (0..students)
        .map(|_| {
            let sample: f64 = poisson.sample(rng);
            next += sample as u64;
            next
        })
        .collect()
}
