//! Collecting diagnostics from concurrent workers.

use crate::diagnostic::Diagnostic;
use std::sync::Mutex;

/// Collects diagnostics emitted while a pass runs, possibly from several
/// rayon workers at once.
///
/// Emission order depends on scheduling, so [`take_all`](Self::take_all)
/// returns diagnostics sorted by origin, code and message. Sequential and
/// parallel passes therefore report identically.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.diagnostics.lock().unwrap().push(diag);
    }

    /// Number of diagnostics recorded so far.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().unwrap().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains the sink, returning its diagnostics in a stable order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut *self.diagnostics.lock().unwrap());
        diagnostics.sort_by(|a, b| {
            (&a.origin, a.code, &a.message).cmp(&(&b.origin, b.code, &b.message))
        });
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;

    fn skipped(origin: &str, name: &str) -> Diagnostic {
        Diagnostic::new(DiagnosticCode::UnresolvedCandidate, format!("skipped `{name}`"))
            .with_origin(origin)
    }

    #[test]
    fn take_all_drains() {
        let sink = DiagnosticSink::new();
        assert!(sink.is_empty());
        sink.emit(skipped("src/A.cs", "A"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.take_all().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn take_all_orders_by_origin_then_code() {
        let sink = DiagnosticSink::new();
        sink.emit(skipped("src/B.cs", "B"));
        sink.emit(Diagnostic::new(DiagnosticCode::OutputKeyConflict, "skipped `Other.A`").with_origin("src/A.cs"));
        sink.emit(skipped("src/A.cs", "A"));
        sink.emit(Diagnostic::new(DiagnosticCode::OutputKeyConflict, "no origin"));

        let order: Vec<(Option<String>, DiagnosticCode)> = sink
            .take_all()
            .into_iter()
            .map(|d| (d.origin, d.code))
            .collect();
        assert_eq!(
            order,
            vec![
                (None, DiagnosticCode::OutputKeyConflict),
                (Some("src/A.cs".to_string()), DiagnosticCode::UnresolvedCandidate),
                (Some("src/A.cs".to_string()), DiagnosticCode::OutputKeyConflict),
                (Some("src/B.cs".to_string()), DiagnosticCode::UnresolvedCandidate),
            ]
        );
    }

    #[test]
    fn concurrent_emitters_give_stable_output() {
        use std::sync::Arc;
        use std::thread;

        let collect = || {
            let sink = Arc::new(DiagnosticSink::new());
            let handles: Vec<_> = (0..8)
                .map(|t| {
                    let sink = Arc::clone(&sink);
                    thread::spawn(move || {
                        for i in 0..25 {
                            sink.emit(skipped(&format!("src/T{t}_{i:02}.cs"), "T"));
                        }
                    })
                })
                .collect();
            for h in handles {
                h.join().unwrap();
            }
            sink.take_all()
        };

        let first = collect();
        assert_eq!(first.len(), 200);
        assert_eq!(first, collect());
    }
}
