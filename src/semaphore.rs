use std::sync::{Condvar, Mutex};

/// Semáforo contador clásico sobre `Mutex` + `Condvar`.
///
/// `acquire` bloquea mientras no haya permisos disponibles y `release`
/// despierta exactamente a un hilo en espera. No garantiza orden FIFO,
/// solo admisión eventual.
pub struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    /// Crea un semáforo con `initial` permisos disponibles.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use print_binding_simulator::Semaphore;
    ///
    /// let sem = Semaphore::new(2);
    /// sem.acquire();
    /// sem.acquire();
    /// sem.release();
    /// ```
    pub fn new(initial: usize) -> Self {
        Self {
            permits: Mutex::new(initial),
            available: Condvar::new(),
        }
    }

    /// Bloquea hasta obtener un permiso.
    pub fn acquire(&self) {
        let mut permits = self
            .permits
            .lock()
            .expect("mutex del semáforo envenenado");
        while *permits == 0 {
            permits = self
                .available
                .wait(permits)
                .expect("mutex del semáforo envenenado");
        }
        *permits -= 1;
    }

    /// Devuelve un permiso y despierta a un hilo en espera, si lo hay.
    pub fn release(&self) {
        let mut permits = self
            .permits
            .lock()
            .expect("mutex del semáforo envenenado");
        *permits += 1;
        self.available.notify_one();
    }
}

/// Señal binaria por estudiante (el "registro de espera" del asignador).
///
/// A diferencia de un `Condvar` desnudo, la señal persiste: si `signal`
/// ocurre antes de `wait`, el `wait` retorna de inmediato. Así se evita la
/// pérdida de despertares cuando la concesión de la estación sucede en el
/// mismo instante de la solicitud. Cada señal se consume al despertar.
pub struct Signal {
    pending: Mutex<bool>,
    fired: Condvar,
}

impl Signal {
    /// Crea una señal en estado "no señalizada".
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(false),
            fired: Condvar::new(),
        }
    }

    /// Marca la señal como pendiente y despierta al hilo en espera.
    pub fn signal(&self) {
        let mut pending = self.pending.lock().expect("mutex de la señal envenenado");
        *pending = true;
        self.fired.notify_one();
    }

    /// Bloquea hasta que la señal esté pendiente y la consume.
    pub fn wait(&self) {
        let mut pending = self.pending.lock().expect("mutex de la señal envenenado");
        while !*pending {
            pending = self
                .fired
                .wait(pending)
                .expect("mutex de la señal envenenado");
        }
        *pending = false;
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_semaphore_limits_concurrency() {
        let sem = Arc::new(Semaphore::new(2));
        let active = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let sem = Arc::clone(&sem);
            let active = Arc::clone(&active);
            let max_seen = Arc::clone(&max_seen);
            handles.push(thread::spawn(move || {
                sem.acquire();
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(10));
                active.fetch_sub(1, Ordering::SeqCst);
                sem.release();
            }));
        }
        for h in handles {
            h.join().expect("hilo falló");
        }

        assert!(max_seen.load(Ordering::SeqCst) <= 2);
        assert!(max_seen.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_signal_before_wait_returns_immediately() {
        let signal = Signal::new();
        signal.signal();
        // No debe bloquear: la señal quedó pendiente
        signal.wait();
    }

    #[test]
    fn test_signal_is_consumed_on_wake() {
        let signal = Arc::new(Signal::new());
        signal.signal();
        signal.wait();

        // Una segunda espera debe bloquear hasta una nueva señal
        let signal2 = Arc::clone(&signal);
        let h = thread::spawn(move || {
            signal2.wait();
        });
        thread::sleep(Duration::from_millis(20));
        signal.signal();
        h.join().expect("hilo falló");
    }
}
