//! # Simulador de Imprenta y Encuadernación
//!
//! Esta biblioteca implementa un simulador de contención de recursos compartidos:
//! un grupo de estudiantes imprime sus informes en estaciones de impresión
//! designadas, se reagrupa bajo un líder por grupo, compite por las estaciones
//! de encuadernado y finalmente registra la entrega en un libro de entradas
//! compartido que el personal de la biblioteca lee de forma concurrente.
//!
//! ## Características principales
//!
//! - **Asignación de estaciones designadas**: variante del problema de los
//!   filósofos comensales donde cada estudiante solo puede usar la estación
//!   `indice mod 4`, con protocolo de notificación al liberar.
//! - **Semáforo contador**: las estaciones de encuadernado son un pool de
//!   ranuras intercambiables con capacidad fija.
//! - **Lock lector/escritor con preferencia a lectores**: protege el libro de
//!   entradas; los lectores concurrentes nunca se esperan entre sí.
//! - **Barrera por grupo**: el líder espera a que todos los miembros de su
//!   grupo terminen de imprimir antes de encuadernar.
//! - **Sincronización con `Mutex` y `Condvar`** de la biblioteca estándar;
//!   los permisos se devuelven mediante guardias RAII, de modo que liberar
//!   un recurso nunca adquirido es imposible por construcción.
//!
//! ## Estructura del proyecto
//!
//! - `semaphore`: semáforo contador y señal binaria por estudiante
//! - `printing`: asignador de estaciones de impresión designadas
//! - `binding`: pool de estaciones de encuadernado
//! - `rwlock`: lock lector/escritor con preferencia a lectores
//! - `ledger`: libro de entradas protegido por el lock anterior
//! - `group`: coordinador y barrera por grupo
//! - `events`: eventos con marca de tiempo y registro serializado
//! - `simulation`: configuración, hilos y ciclo de vida de la simulación
//! - `metrics`: resumen y reporte de la corrida

pub mod binding;
pub mod events;
pub mod group;
pub mod ledger;
pub mod metrics;
pub mod printing;
pub mod rwlock;
pub mod semaphore;
pub mod simulation;

// Re-exportar las estructuras principales para facilitar su uso
pub use binding::{BindingPermit, BindingPool};
pub use events::{EventKind, EventLog, SimEvent, TimedEvent};
pub use group::GroupCoordinator;
pub use ledger::EntryBook;
pub use metrics::SimulationSummary;
pub use printing::{StationAllocator, StationGuard, WorkerState};
pub use rwlock::{ReadPass, ReaderPreferenceLock, WritePass};
pub use semaphore::{Semaphore, Signal};
pub use simulation::{SimConfig, Simulation};

/// Constantes fijas de la simulación (no configurables por entrada).
pub mod config {
    use std::time::Duration;

    /// Número de estaciones de impresión; cada estudiante usa `indice mod 4`
    pub const PRINTING_STATIONS: usize = 4;

    /// Número de estaciones de encuadernado (intercambiables)
    pub const BINDING_STATIONS: usize = 2;

    /// Número de empleados lectores del libro de entradas
    pub const STAFF_COUNT: usize = 2;

    /// Tasa de la distribución de Poisson para los retrasos de llegada
    pub const ARRIVAL_RATE: f64 = 3.0;

    /// Duración de una unidad de tiempo simulada en el binario (1 segundo);
    /// los tests usan unidades de milisegundos vía `Simulation::with_tick`.
    pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
}
