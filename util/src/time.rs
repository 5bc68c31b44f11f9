use std::time::Instant;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

struct TimerSpan {
    name: String,
    started_at: Instant,
    nested_time: f64,
}

/// Hierarchial timing of a batch job. Spans are logged when they start and stop; a summary of
/// every span and any warnings is logged when the Timer is dropped.
pub struct Timer {
    results: Vec<String>,
    stack: Vec<TimerSpan>,

    outermost_name: String,

    warnings: Vec<String>,
}

impl Timer {
    pub fn new<I: Into<String>>(name: I) -> Timer {
        let name = name.into();
        let mut t = Timer {
            results: Vec::new(),
            stack: Vec::new(),
            outermost_name: name.clone(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    pub fn start<I: Into<String>>(&mut self, name: I) {
        let name = name.into();
        info!("{}...", name);
        self.stack.push(TimerSpan {
            name,
            started_at: Instant::now(),
            nested_time: 0.0,
        });
    }

    pub fn stop<I: Into<String>>(&mut self, name: I) {
        let name = name.into();
        let span = match self.stack.pop() {
            Some(span) => span,
            None => panic!("Timer::stop({}) with nothing started", name),
        };
        assert_eq!(span.name, name);
        let elapsed = elapsed_seconds(span.started_at);
        let line = format!("{} took {}", name, prettyprint_time(elapsed));

        let padding = "  ".repeat(self.stack.len());
        self.results.push(format!("{}- {}", padding, line));
        if span.nested_time != 0.0 {
            self.results.push(format!(
                "  {}- ... plus {}",
                padding,
                prettyprint_time(elapsed - span.nested_time)
            ));
        }
        if let Some(parent) = self.stack.last_mut() {
            parent.nested_time += elapsed;
        }

        info!("{}", line);
    }

    /// Remembered and repeated at the end, so problems don't scroll away.
    pub fn warn(&mut self, line: String) {
        warn!("{}", line);
        self.warnings.push(line);
    }

    pub fn num_warnings(&self) -> usize {
        self.warnings.len()
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        let stop_name = self.outermost_name.clone();

        // If we're in the middle of unwinding a panic or an early return, don't further blow up.
        match self.stack.last() {
            Some(s) if s.name == stop_name && self.stack.len() == 1 => {}
            _ => {
                debug!("dropping Timer {} with unfinished spans", stop_name);
                return;
            }
        }

        self.stop(stop_name);
        for line in &self.results {
            debug!("{}", line);
        }

        if !self.warnings.is_empty() {
            warn!("{} warnings:", prettyprint_usize(self.warnings.len()));
            for line in &self.warnings {
                warn!("  {}", line);
            }
        }
    }
}

pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}
