//! # Módulo de Eventos
//!
//! Flujo de salida de la simulación: un evento por transición de estado, con
//! marca de tiempo relativa al inicio (en unidades de tiempo enteras). La
//! salida por consola se serializa bajo su propio lock, independiente de los
//! locks del núcleo de sincronización, para evitar líneas intercaladas; los
//! eventos además quedan registrados en memoria para los tests y el reporte.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Evento observable de la simulación. Los actores van 1-indexados, como en
/// la salida por consola.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// Un estudiante llegó a la zona de impresión
    StationArrival { student: usize },
    /// Un estudiante obtuvo su estación designada y comenzó a imprimir
    PrintStart { student: usize, station: usize },
    /// Un estudiante terminó de imprimir y libera su estación
    PrintDone { student: usize },
    /// Todos los miembros del grupo terminaron de imprimir (lo emite el líder)
    GroupPrintDone { group: usize },
    /// El líder obtuvo una ranura de encuadernado
    BindStart { group: usize },
    /// El líder terminó de encuadernar y libera la ranura
    BindDone { group: usize },
    /// El líder registró la entrega; `total` es el valor resultante del libro
    Submission { group: usize, total: u32 },
    /// Un empleado comenzó a leer el libro, con el valor observado
    ReadStart { staff: usize, value: u32 },
    /// Un empleado terminó de leer el libro, con el valor observado
    ReadDone { staff: usize, value: u32 },
}

/// Clase de evento, para conteos y filtros en tests y reportes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    StationArrival,
    PrintStart,
    PrintDone,
    GroupPrintDone,
    BindStart,
    BindDone,
    Submission,
    ReadStart,
    ReadDone,
}

impl SimEvent {
    /// Clase del evento.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::StationArrival { .. } => EventKind::StationArrival,
            Self::PrintStart { .. } => EventKind::PrintStart,
            Self::PrintDone { .. } => EventKind::PrintDone,
            Self::GroupPrintDone { .. } => EventKind::GroupPrintDone,
            Self::BindStart { .. } => EventKind::BindStart,
            Self::BindDone { .. } => EventKind::BindDone,
            Self::Submission { .. } => EventKind::Submission,
            Self::ReadStart { .. } => EventKind::ReadStart,
            Self::ReadDone { .. } => EventKind::ReadDone,
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StationArrival { student } => {
                write!(f, "Estudiante {} llegó a la zona de impresión", student)
            }
            Self::PrintStart { student, station } => write!(
                f,
                "Estudiante {} comenzó a imprimir en la estación {}",
                student, station
            ),
            Self::PrintDone { student } => {
                write!(f, "Estudiante {} terminó de imprimir", student)
            }
            Self::GroupPrintDone { group } => {
                write!(f, "Grupo {} terminó la impresión completa", group)
            }
            Self::BindStart { group } => {
                write!(f, "Grupo {} comenzó el encuadernado", group)
            }
            Self::BindDone { group } => {
                write!(f, "Grupo {} terminó el encuadernado", group)
            }
            Self::Submission { group, total } => write!(
                f,
                "Grupo {} entregó su informe (libro de entradas: {})",
                group, total
            ),
            Self::ReadStart { staff, value } => write!(
                f,
                "Empleado {} comenzó a leer el libro de entradas (valor: {})",
                staff, value
            ),
            Self::ReadDone { staff, value } => write!(
                f,
                "Empleado {} terminó de leer el libro de entradas (valor: {})",
                staff, value
            ),
        }
    }
}

/// Evento con su marca de tiempo en unidades enteras desde el inicio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedEvent {
    pub at: u64,
    pub event: SimEvent,
}

/// Registro serializado de eventos.
///
/// Un único lock protege tanto el vector en memoria como la escritura a
/// consola, de modo que el orden impreso coincide con el orden registrado.
pub struct EventLog {
    start: Instant,
    tick: Duration,
    echo: bool,
    recorded: Mutex<Vec<TimedEvent>>,
}

impl EventLog {
    /// Crea el registro; `tick` define la unidad de tiempo de las marcas y
    /// `echo` controla la salida por consola.
    pub fn new(tick: Duration, echo: bool) -> Self {
        Self {
            start: Instant::now(),
            tick,
            echo,
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Unidades de tiempo enteras transcurridas desde el inicio.
    pub fn elapsed_units(&self) -> u64 {
        let tick_ms = self.tick.as_millis().max(1);
        (self.start.elapsed().as_millis() / tick_ms) as u64
    }

    /// Registra un evento y, si corresponde, lo imprime.
    pub fn log(&self, event: SimEvent) {
        let at = self.elapsed_units();
        let mut recorded = self
            .recorded
            .lock()
            .expect("mutex del registro de eventos envenenado");
        if self.echo {
            println!("{}s, {}", at, event);
        }
        recorded.push(TimedEvent { at, event });
    }

    /// Copia de los eventos registrados, en orden de emisión.
    pub fn snapshot(&self) -> Vec<TimedEvent> {
        self.recorded
            .lock()
            .expect("mutex del registro de eventos envenenado")
            .clone()
    }
}
