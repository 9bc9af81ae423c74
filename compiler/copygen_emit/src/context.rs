//! Emission context.
//!
//! Holds the output buffer, the current indentation and the temp-name
//! counter for one generation run.

/// Output state for one generation run.
pub struct EmitContext {
    /// Current indentation level, in tabs.
    indent: usize,
    /// Generated code output.
    output: String,
    /// Last temp number handed out. Never reset during a run.
    temp_counter: u32,
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitContext {
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::with_capacity(4096),
            temp_counter: 0,
        }
    }

    /// Generate a unique scratch variable name: `v1`, `v2`, ...
    pub fn fresh_temp(&mut self) -> String {
        self.temp_counter += 1;
        format!("v{}", self.temp_counter)
    }

    /// Number of temp names handed out so far.
    pub fn temps_allocated(&self) -> u32 {
        self.temp_counter
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write an empty line.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
