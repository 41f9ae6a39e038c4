// ABOUTME: Output formatting for CLI feedback and the Reporter handle passed to the pipeline.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes, plus an in-memory recorder.

use parking_lot::Mutex;
use serde::Serialize;
use std::time::Instant;

/// Sink for progress events emitted by the pipeline and health checks.
///
/// Passed explicitly to every component so a run can be observed in
/// isolation. `Output` writes to the terminal, `Recorder` keeps events in
/// memory.
pub trait Reporter: Send + Sync {
    /// A numbered pipeline step is starting.
    fn step(&self, number: u8, title: &str);

    /// Informational progress line.
    fn progress(&self, message: &str);

    /// Non-fatal problem; execution continues.
    fn warning(&self, message: &str);

    /// Failure of a step or check.
    fn error(&self, message: &str);

    /// Final success line.
    fn success(&self, message: &str);
}

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a result line. Shown in every mode.
    pub fn result(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => self.emit_json("result", message, false),
        }
    }

    /// Print a structured value as one JSON line (JSON mode only).
    pub fn json<T: Serialize>(&self, value: &T) {
        if self.mode == OutputMode::Json
            && let Ok(json) = serde_json::to_string(value)
        {
            println!("{json}");
        }
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    fn emit_json(&self, event: &str, message: &str, to_stderr: bool) {
        let event = JsonEvent {
            event,
            message,
            duration_secs: self.duration(),
        };
        if let Ok(json) = serde_json::to_string(&event) {
            if to_stderr {
                eprintln!("{json}");
            } else {
                println!("{json}");
            }
        }
    }
}

impl Reporter for Output {
    fn step(&self, number: u8, title: &str) {
        match self.mode {
            OutputMode::Normal => println!("\n[{number}] {title}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_json("step", &format!("{number}: {title}"), false),
        }
    }

    /// Print a progress message (suppressed in quiet mode).
    fn progress(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("{message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_json("progress", message, false),
        }
    }

    fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => self.emit_json("warning", message, true),
        }
    }

    fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => self.emit_json("error", message, true),
        }
    }

    /// Print a success message with optional timing.
    fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            // Print only the essential result
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => self.emit_json("success", message, false),
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

/// Kind of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Step,
    Progress,
    Warning,
    Error,
    Success,
}

/// A single event captured by `Recorder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub message: String,
}

/// Reporter that keeps every event in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Messages of a given kind, in emission order.
    pub fn messages(&self, kind: EventKind) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Whether any event of `kind` contains `needle`.
    pub fn contains(&self, kind: EventKind, needle: &str) -> bool {
        self.events
            .lock()
            .iter()
            .any(|e| e.kind == kind && e.message.contains(needle))
    }

    fn push(&self, kind: EventKind, message: String) {
        self.events.lock().push(Event { kind, message });
    }
}

impl Reporter for Recorder {
    fn step(&self, number: u8, title: &str) {
        self.push(EventKind::Step, format!("{number}: {title}"));
    }

    fn progress(&self, message: &str) {
        self.push(EventKind::Progress, message.to_string());
    }

    fn warning(&self, message: &str) {
        self.push(EventKind::Warning, message.to_string());
    }

    fn error(&self, message: &str) {
        self.push(EventKind::Error, message.to_string());
    }

    fn success(&self, message: &str) {
        self.push(EventKind::Success, message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_events_in_order() {
        let recorder = Recorder::new();
        recorder.step(1, "Host health");
        recorder.warning("worker is down");
        recorder.success("done");

        let kinds: Vec<_> = recorder.events().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Step, EventKind::Warning, EventKind::Success]
        );
        assert_eq!(recorder.messages(EventKind::Step), vec!["1: Host health"]);
        assert!(recorder.contains(EventKind::Warning, "worker"));
        assert!(!recorder.contains(EventKind::Error, "worker"));
    }

    #[test]
    fn json_event_omits_missing_duration() {
        let event = JsonEvent {
            event: "success",
            message: "ok",
            duration_secs: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"success","message":"ok"}"#);
    }

    #[test]
    fn output_without_timer_reports_zero_elapsed() {
        let output = Output::new(OutputMode::Quiet);
        assert_eq!(output.elapsed_secs(), 0.0);
        assert_eq!(output.mode(), OutputMode::Quiet);
    }
}
