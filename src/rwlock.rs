//! # Lock Lector/Escritor con Preferencia a Lectores
//!
//! Solución clásica al problema de lectores y escritores: el primer lector en
//! llegar adquiere el recurso (un semáforo binario) en nombre de todos los
//! lectores; los siguientes solo incrementan el contador de lectores bajo su
//! propio lock y pasan sin tocar el recurso; el último lector en salir lo
//! libera. Los escritores pasan por el mismo semáforo binario, de a uno.
//!
//! Riesgo asumido y documentado: con lectores llegando de forma continua, un
//! escritor puede postergarse de manera arbitraria (inanición del escritor).
//! Es la política elegida para este simulador; una variante justa o con
//! preferencia al escritor cambiaría el entrelazado observable y no se
//! implementa aquí.

use std::sync::Mutex;

use crate::semaphore::Semaphore;

/// Lock lector/escritor con preferencia a lectores.
///
/// El recurso está en exactamente uno de tres estados: libre, tomado
/// colectivamente por los lectores, o tomado por un único escritor.
/// El acceso se materializa en pases RAII ([`ReadPass`] / [`WritePass`]):
/// liberar sin haber adquirido es imposible por construcción.
pub struct ReaderPreferenceLock {
    /// Semáforo binario sobre el recurso compartido
    resource: Semaphore,
    /// Contador de lectores activos, bajo su propio lock exclusivo
    readers: Mutex<usize>,
}

impl ReaderPreferenceLock {
    /// Crea el lock con el recurso libre y cero lectores.
    pub fn new() -> Self {
        Self {
            resource: Semaphore::new(1),
            readers: Mutex::new(0),
        }
    }

    /// Cantidad de lectores activos en este instante (para inspección).
    pub fn reader_count(&self) -> usize {
        *self
            .readers
            .lock()
            .expect("mutex del contador de lectores envenenado")
    }

    /// Adquiere acceso de lectura.
    ///
    /// Solo el primer lector compite por el recurso; mientras haya al menos
    /// un lector dentro, los demás entran de inmediato.
    pub fn acquire_read(&self) -> ReadPass<'_> {
        let mut readers = self
            .readers
            .lock()
            .expect("mutex del contador de lectores envenenado");
        *readers += 1;
        if *readers == 1 {
            // El primer lector toma el recurso en nombre de todos; si un
            // escritor lo tiene, los lectores siguientes quedan encolados
            // detrás de este lock de contador
            self.resource.acquire();
        }
        drop(readers);

        ReadPass { lock: self }
    }

    /// Adquiere acceso exclusivo de escritura.
    pub fn acquire_write(&self) -> WritePass<'_> {
        self.resource.acquire();
        WritePass { lock: self }
    }

    fn release_read(&self) {
        let mut readers = self
            .readers
            .lock()
            .expect("mutex del contador de lectores envenenado");
        *readers -= 1;
        if *readers == 0 {
            // El último lector libera el recurso para escritores
            self.resource.release();
        }
    }
}

impl Default for ReaderPreferenceLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Pase RAII de lectura; al soltarse decrementa el contador de lectores y,
/// si era el último, libera el recurso.
pub struct ReadPass<'a> {
    lock: &'a ReaderPreferenceLock,
}

impl Drop for ReadPass<'_> {
    fn drop(&mut self) {
        self.lock.release_read();
    }
}

/// Pase RAII de escritura exclusiva; al soltarse libera el recurso.
pub struct WritePass<'a> {
    lock: &'a ReaderPreferenceLock,
}

impl Drop for WritePass<'_> {
    fn drop(&mut self) {
        self.lock.resource.release();
    }
}
