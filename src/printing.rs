//! # Asignador de Estaciones de Impresión
//!
//! Variante del problema de los filósofos comensales con recurso *designado*:
//! cada estudiante solo puede imprimir en la estación `indice mod 4`, por lo
//! que la contención solo ocurre entre estudiantes de la misma clase de
//! residuo. Al liberar una estación se re-evalúa primero a los compañeros de
//! grupo del estudiante saliente y luego a todos los estudiantes de la clase
//! de residuo liberada, siempre bajo el mismo lock exclusivo, de modo que a lo
//! sumo un candidato por liberación puede obtener la estación.
//!
//! Nota sobre equidad: la designación por residuo (`indice mod 4`) se cruza de
//! forma asimétrica con la pertenencia a grupos cuando el tamaño de grupo no
//! guarda relación con el número de estaciones. Se preserva tal cual; es una
//! peculiaridad del protocolo, no un defecto a corregir aquí.

use std::sync::Mutex;

use crate::semaphore::Signal;

/// Estado de un estudiante dentro del ciclo de impresión.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    /// Aún no solicitó estación
    Idle,
    /// Solicitó su estación designada y espera a que se libere
    WaitingForStation,
    /// Ocupa su estación designada
    Printing,
    /// Liberó la estación; terminó su fase de impresión
    Done,
}

/// Estado protegido por el lock exclusivo del asignador.
struct AllocInner {
    /// Estado de cada estudiante, mutado solo bajo este lock
    states: Vec<WorkerState>,
    /// Ocupación de cada estación (`true` = ocupada)
    stations: Vec<bool>,
}

/// Asignador de estaciones de impresión designadas.
///
/// `request_station` bloquea al estudiante hasta que su estación designada
/// esté libre y se le conceda; la liberación ocurre al soltar el
/// [`StationGuard`] devuelto, lo que dispara el protocolo de notificación.
/// Liberar una estación nunca adquirida es imposible por construcción: no
/// existe otra vía para liberar que consumir la guardia.
pub struct StationAllocator {
    inner: Mutex<AllocInner>,
    /// Registro de espera: una señal binaria por estudiante
    signals: Vec<Signal>,
    group_size: usize,
    station_count: usize,
}

impl StationAllocator {
    /// Crea un asignador para `workers` estudiantes agrupados de a
    /// `group_size`, sobre `station_count` estaciones.
    pub fn new(workers: usize, group_size: usize, station_count: usize) -> Self {
        Self {
            inner: Mutex::new(AllocInner {
                states: vec![WorkerState::Idle; workers],
                stations: vec![false; station_count],
            }),
            signals: (0..workers).map(|_| Signal::new()).collect(),
            group_size,
            station_count,
        }
    }

    /// Estación designada de un estudiante: `worker mod station_count`.
    pub fn station_for(&self, worker: usize) -> usize {
        worker % self.station_count
    }

    /// Estado actual de un estudiante (para inspección y tests).
    pub fn state_of(&self, worker: usize) -> WorkerState {
        self.inner
            .lock()
            .expect("mutex del asignador envenenado")
            .states[worker]
    }

    /// Solicita la estación designada del estudiante y bloquea hasta obtenerla.
    ///
    /// Bajo el lock exclusivo se marca al estudiante como en espera y se
    /// intenta la concesión inmediata; si la estación ya estaba libre, la
    /// señal queda pendiente y la espera posterior retorna sin bloquear.
    /// En caso contrario, la señal llegará desde algún estudiante que libere.
    pub fn request_station(&self, worker: usize) -> StationGuard<'_> {
        {
            let mut inner = self
                .inner
                .lock()
                .expect("mutex del asignador envenenado");
            inner.states[worker] = WorkerState::WaitingForStation;
            self.try_grant(&mut inner, worker);
        }
        // Fuera del lock: la señal persiste, no hay despertar perdido
        self.signals[worker].wait();

        StationGuard {
            allocator: self,
            worker,
        }
    }

    /// Concesión inmediata: si el estudiante espera y su estación designada
    /// está libre, la ocupa y se le señaliza. Debe llamarse siempre con el
    /// lock exclusivo tomado; es la única vía de concesión.
    fn try_grant(&self, inner: &mut AllocInner, worker: usize) {
        let station = worker % self.station_count;
        if inner.states[worker] == WorkerState::WaitingForStation && !inner.stations[station] {
            inner.stations[station] = true;
            inner.states[worker] = WorkerState::Printing;
            self.signals[worker].signal();
        }
    }

    /// Libera la estación del estudiante y notifica a los candidatos.
    ///
    /// Orden de re-evaluación, bajo el lock exclusivo:
    /// 1. los demás miembros del grupo del estudiante saliente, en orden
    ///    ascendente (solo puede concretarse la concesión si su estación
    ///    designada está libre);
    /// 2. todos los estudiantes de la clase de residuo recién liberada,
    ///    en orden ascendente.
    ///
    /// Los compañeros de grupo van primero para que no queden postergados
    /// indefinidamente detrás de estudiantes de otros grupos.
    fn release(&self, worker: usize) {
        let mut inner = self
            .inner
            .lock()
            .expect("mutex del asignador envenenado");

        let station = worker % self.station_count;
        inner.stations[station] = false;
        inner.states[worker] = WorkerState::Done;

        let group_start = (worker / self.group_size) * self.group_size;
        let group_end = group_start + self.group_size;
        for candidate in group_start..group_end {
            if candidate != worker {
                self.try_grant(&mut inner, candidate);
            }
        }

        let total = inner.states.len();
        for candidate in (station..total).step_by(self.station_count) {
            self.try_grant(&mut inner, candidate);
        }
    }
}

/// Guardia RAII de una estación de impresión concedida.
///
/// Mientras viva, el estudiante ocupa su estación designada; al soltarla se
/// libera la estación y se ejecuta el protocolo de notificación.
pub struct StationGuard<'a> {
    allocator: &'a StationAllocator,
    worker: usize,
}

impl StationGuard<'_> {
    /// Estudiante titular de la concesión.
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// Índice de la estación ocupada.
    pub fn station(&self) -> usize {
        self.allocator.station_for(self.worker)
    }
}

impl Drop for StationGuard<'_> {
    fn drop(&mut self) {
        self.allocator.release(self.worker);
    }
}
