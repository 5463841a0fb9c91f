// grater-core/src/ports/reporter.rs

// Diagnostics sink handed to the validator, loader, renderer and scaffolder.
// The core never reaches for a process-wide logger on its own; the binary
// decides where messages go (see infrastructure::reporter::TracingReporter).

pub trait Reporter {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}
