use std::sync::Mutex;

use crate::rwlock::{ReadPass, ReaderPreferenceLock, WritePass};

/// Libro de entradas de la biblioteca: el contador de informes entregados.
///
/// El valor solo es alcanzable a través de un pase vigente del lock con
/// preferencia a lectores: los empleados leen de forma concurrente y los
/// líderes de grupo escriben de a uno. El contador en sí vive en un `Mutex`
/// que se toma únicamente durante la carga o el incremento puntual; la
/// exclusión lectores/escritores la impone el lock exterior.
pub struct EntryBook {
    lock: ReaderPreferenceLock,
    entries: Mutex<u32>,
}

impl EntryBook {
    /// Crea el libro con cero entregas registradas.
    pub fn new() -> Self {
        Self {
            lock: ReaderPreferenceLock::new(),
            entries: Mutex::new(0),
        }
    }

    /// Adquiere acceso de lectura al libro.
    pub fn acquire_read(&self) -> LedgerReadPass<'_> {
        let pass = self.lock.acquire_read();
        LedgerReadPass {
            _pass: pass,
            entries: &self.entries,
        }
    }

    /// Adquiere acceso exclusivo de escritura al libro.
    pub fn acquire_write(&self) -> LedgerWritePass<'_> {
        let pass = self.lock.acquire_write();
        LedgerWritePass {
            _pass: pass,
            entries: &self.entries,
        }
    }
}

impl Default for EntryBook {
    fn default() -> Self {
        Self::new()
    }
}

/// Pase de lectura sobre el libro de entradas.
pub struct LedgerReadPass<'a> {
    _pass: ReadPass<'a>,
    entries: &'a Mutex<u32>,
}

impl LedgerReadPass<'_> {
    /// Valor actual del libro.
    pub fn value(&self) -> u32 {
        *self.entries.lock().expect("mutex del libro envenenado")
    }
}

/// Pase de escritura sobre el libro de entradas.
pub struct LedgerWritePass<'a> {
    _pass: WritePass<'a>,
    entries: &'a Mutex<u32>,
}

impl LedgerWritePass<'_> {
    /// Registra una entrega y devuelve el total resultante.
    pub fn record_submission(&self) -> u32 {
        let mut entries = self.entries.lock().expect("mutex del libro envenenado");
        *entries += 1;
        *entries
    }

    /// Valor actual del libro.
    pub fn value(&self) -> u32 {
        *self.entries.lock().expect("mutex del libro envenenado")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_submissions_accumulate() {
        let book = EntryBook::new();
        assert_eq!(book.acquire_read().value(), 0);
        assert_eq!(book.acquire_write().record_submission(), 1);
        assert_eq!(book.acquire_write().record_submission(), 2);
        assert_eq!(book.acquire_read().value(), 2);
    }

    #[test]
    fn test_concurrent_writers_never_lose_submissions() {
        let book = Arc::new(EntryBook::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let book = Arc::clone(&book);
            handles.push(thread::spawn(move || {
                let pass = book.acquire_write();
                pass.record_submission();
            }));
        }
        for h in handles {
            h.join().expect("hilo falló");
        }
        assert_eq!(book.acquire_read().value(), 8);
    }
}
