//! Text exposition of observations.
//!
//! Renders an observation list to the line-oriented exposition format
//! scrapers consume: `name{label="value",...} value`. Output is canonical:
//! lines sorted by metric name then label set, label pairs in key order,
//! values in shortest-roundtrip form. Two permutations of the same
//! observations render byte-identically.

use std::fmt::Write;

use pmi_model::Observation;

/// Content type of the rendered exposition.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Render observations as sorted exposition text.
pub fn render(observations: &[Observation]) -> String {
    let mut lines: Vec<String> = observations.iter().map(render_line).collect();
    lines.sort_unstable();
    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn render_line(observation: &Observation) -> String {
    let mut line = String::new();
    line.push_str(&observation.metric);
    if !observation.labels.is_empty() {
        line.push('{');
        for (i, (name, value)) in observation.labels.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            let _ = write!(line, "{name}=\"{}\"", escape_label_value(value));
        }
        line.push('}');
    }
    let _ = write!(line, " {}", observation.value);
    line
}

/// Escape backslash, double quote, and newline per the exposition format.
fn escape_label_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
