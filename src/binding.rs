use crate::semaphore::Semaphore;

/// Pool de estaciones de encuadernado.
///
/// A diferencia de las estaciones de impresión, las ranuras son
/// intercambiables: no hay designación, solo una cota de ocupantes
/// concurrentes. Semántica de semáforo contador: sin orden FIFO,
/// solo admisión eventual.
pub struct BindingPool {
    slots: Semaphore,
    capacity: usize,
}

impl BindingPool {
    /// Crea un pool con `capacity` ranuras de encuadernado.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Semaphore::new(capacity),
            capacity,
        }
    }

    /// Capacidad total del pool.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bloquea hasta obtener una ranura; la devuelve al soltar el permiso.
    pub fn acquire(&self) -> BindingPermit<'_> {
        self.slots.acquire();
        BindingPermit { pool: self }
    }
}

/// Permiso RAII de una ranura de encuadernado.
pub struct BindingPermit<'a> {
    pool: &'a BindingPool,
}

impl Drop for BindingPermit<'_> {
    fn drop(&mut self) {
        self.pool.slots.release();
    }
}
