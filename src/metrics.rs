//! # Módulo de Resumen y Reportes
//!
//! Agrega los eventos registrados durante la corrida y genera el reporte
//! final: conteos por clase de evento, valor final del libro de entradas y
//! duración total de la simulación.

use std::time::Duration;

use crate::events::{EventKind, SimEvent, TimedEvent};

/// Resumen de una corrida completa de la simulación.
#[derive(Clone, Debug)]
pub struct SimulationSummary {
    /// Eventos registrados, en orden de emisión
    pub events: Vec<TimedEvent>,
    /// Valor final del libro de entradas (entregas registradas)
    pub total_submissions: u32,
    /// Duración real total de la corrida
    pub duration: Duration,
}

impl SimulationSummary {
    /// Construye el resumen a partir de los eventos registrados.
    pub fn new(events: Vec<TimedEvent>, total_submissions: u32, duration: Duration) -> Self {
        Self {
            events,
            total_submissions,
            duration,
        }
    }

    /// Cantidad de eventos de una clase dada.
    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .iter()
            .filter(|e| e.event.kind() == kind)
            .count()
    }

    /// Eventos de una clase dada, en orden de emisión.
    pub fn of_kind(&self, kind: EventKind) -> Vec<TimedEvent> {
        self.events
            .iter()
            .copied()
            .filter(|e| e.event.kind() == kind)
            .collect()
    }

    /// Totales del libro registrados en cada entrega, en orden de emisión.
    pub fn submission_totals(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e.event {
                SimEvent::Submission { total, .. } => Some(total),
                _ => None,
            })
            .collect()
    }

    /// Genera el reporte final en texto.
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("\n{:=^60}\n", "  REPORTE DE LA SIMULACIÓN  "));
        report.push_str(&format!(
            "{:<40} {:>8}\n",
            "Llegadas a la zona de impresión",
            self.count(EventKind::StationArrival)
        ));
        report.push_str(&format!(
            "{:<40} {:>8}\n",
            "Impresiones completadas",
            self.count(EventKind::PrintDone)
        ));
        report.push_str(&format!(
            "{:<40} {:>8}\n",
            "Grupos con impresión completa",
            self.count(EventKind::GroupPrintDone)
        ));
        report.push_str(&format!(
            "{:<40} {:>8}\n",
            "Encuadernados completados",
            self.count(EventKind::BindDone)
        ));
        report.push_str(&format!(
            "{:<40} {:>8}\n",
            "Entregas registradas",
            self.count(EventKind::Submission)
        ));
        report.push_str(&format!(
            "{:<40} {:>8}\n",
            "Lecturas del personal",
            self.count(EventKind::ReadDone)
        ));
        report.push_str(&format!("{:-<60}\n", ""));
        report.push_str(&format!(
            "{:<40} {:>8}\n",
            "Valor final del libro de entradas", self.total_submissions
        ));
        report.push_str(&format!(
            "{:<40} {:>7.2}s\n",
            "Duración total",
            self.duration.as_secs_f64()
        ));
        report.push_str(&format!("{:=<60}\n", ""));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> SimulationSummary {
        let events = vec![
            TimedEvent {
                at: 0,
                event: SimEvent::StationArrival { student: 1 },
            },
            TimedEvent {
                at: 1,
                event: SimEvent::PrintDone { student: 1 },
            },
            TimedEvent {
                at: 2,
                event: SimEvent::Submission { group: 1, total: 1 },
            },
            TimedEvent {
                at: 3,
                event: SimEvent::Submission { group: 2, total: 2 },
            },
        ];
        SimulationSummary::new(events, 2, Duration::from_secs(3))
    }

    #[test]
    fn test_counts_by_kind() {
        let summary = sample_summary();
        assert_eq!(summary.count(EventKind::Submission), 2);
        assert_eq!(summary.count(EventKind::PrintDone), 1);
        assert_eq!(summary.count(EventKind::BindStart), 0);
    }

    #[test]
    fn test_submission_totals_in_order() {
        let summary = sample_summary();
        assert_eq!(summary.submission_totals(), vec![1, 2]);
    }

    #[test]
    fn test_report_contains_final_value() {
        let summary = sample_summary();
        let report = summary.generate_report();
        assert!(report.contains("REPORTE DE LA SIMULACIÓN"));
        assert!(report.contains("Valor final del libro de entradas"));
    }
}
