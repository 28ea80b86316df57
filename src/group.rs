use std::sync::{Condvar, Mutex};

/// Coordinador de grupos: membresía, detección del líder y barrera de
/// impresión por grupo.
///
/// Los grupos son rangos de índices consecutivos de tamaño fijo; el líder es
/// el último índice del grupo. La barrera es de un solo uso: cada miembro
/// marca su impresión terminada y el líder espera, sobre una condición por
/// grupo, a que el contador de su grupo llegue al tamaño completo. Solo el
/// líder la observa; no es una difusión general.
pub struct GroupCoordinator {
    group_size: usize,
    /// Cantidad de miembros con impresión terminada, por grupo
    printed: Mutex<Vec<usize>>,
    group_done: Condvar,
}

impl GroupCoordinator {
    /// Crea el coordinador para `workers` estudiantes en grupos de
    /// `group_size` consecutivos. `group_size` debe dividir a `workers`.
    pub fn new(workers: usize, group_size: usize) -> Self {
        Self {
            group_size,
            printed: Mutex::new(vec![0; workers / group_size]),
            group_done: Condvar::new(),
        }
    }

    /// Grupo (0-indexado) al que pertenece un estudiante.
    pub fn group_of(&self, worker: usize) -> usize {
        worker / self.group_size
    }

    /// `true` si el estudiante es el líder de su grupo (último índice).
    pub fn is_leader(&self, worker: usize) -> bool {
        (worker + 1) % self.group_size == 0
    }

    /// Registra que un estudiante terminó su fase de impresión.
    pub fn mark_print_done(&self, worker: usize) {
        let group = self.group_of(worker);
        let mut printed = self
            .printed
            .lock()
            .expect("mutex del coordinador envenenado");
        printed[group] += 1;
        self.group_done.notify_all();
    }

    /// Bloquea al líder hasta que todos los miembros de su grupo (él
    /// incluido) hayan marcado su impresión como terminada.
    ///
    /// El líder debe llamar a [`mark_print_done`](Self::mark_print_done)
    /// antes de esperar; de lo contrario la barrera nunca se completa.
    pub fn await_group_print_done(&self, leader: usize) {
        let group = self.group_of(leader);
        let mut printed = self
            .printed
            .lock()
            .expect("mutex del coordinador envenenado");
        while printed[group] < self.group_size {
            printed = self
                .group_done
                .wait(printed)
                .expect("mutex del coordinador envenenado");
        }
    }
}
