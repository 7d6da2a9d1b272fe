//! crates/gate-sink/src/writer.rs
//! Writer-backed host console with groups, counters and timers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;

use crate::host::HostConsole;
use crate::line_mode::LineMode;
use crate::method::{ConsoleMethod, Stream};

const INDENT: &str = "  ";
const DEFAULT_LABEL: &str = "default";

/// Host console that renders output into a pair of [`io::Write`] targets.
///
/// Message methods write one line each to the stream selected by
/// [`ConsoleMethod::stream`]. `group`/`groupCollapsed` print their label and
/// indent subsequent lines, `groupEnd` closes the innermost group, `count`
/// prints `label: n`, and `time`/`timeEnd` print `label: 1.234ms`. `clear`
/// resets the group indentation. The remaining methods are reported as
/// unsupported so gates bind them to a no-op.
///
/// # Examples
///
/// ```
/// use gate_sink::{ConsoleMethod, HostConsole, SharedBuffer, WriterConsole};
///
/// let buffer = SharedBuffer::new();
/// let console = WriterConsole::new(buffer.clone(), buffer.clone());
///
/// console.call(ConsoleMethod::Group, format_args!("setup"));
/// console.call(ConsoleMethod::Log, format_args!("step {}", 1));
/// console.call(ConsoleMethod::GroupEnd, format_args!(""));
///
/// assert_eq!(buffer.contents(), "setup\n  step 1\n");
/// ```
pub struct WriterConsole<O, E> {
    out: RefCell<O>,
    err: RefCell<E>,
    state: RefCell<ConsoleState>,
    line_mode: LineMode,
}

/// Console writing to the process's stdout and stderr.
pub type StdConsole = WriterConsole<io::Stdout, io::Stderr>;

#[derive(Debug, Default)]
struct ConsoleState {
    depth: usize,
    counters: HashMap<String, u64>,
    timers: HashMap<String, Instant>,
}

impl StdConsole {
    /// Creates a console bound to the process's standard streams.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O, E> WriterConsole<O, E> {
    /// Creates a console that appends a newline after each line.
    #[must_use]
    pub fn new(out: O, err: E) -> Self {
        Self::with_line_mode(out, err, LineMode::WithNewline)
    }

    /// Creates a console with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(out: O, err: E, line_mode: LineMode) -> Self {
        Self {
            out: RefCell::new(out),
            err: RefCell::new(err),
            state: RefCell::new(ConsoleState::default()),
            line_mode,
        }
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Number of currently open groups.
    #[must_use]
    pub fn group_depth(&self) -> usize {
        self.state.borrow().depth
    }

    /// Consumes the console and returns the stdout and stderr writers.
    #[must_use]
    pub fn into_inner(self) -> (O, E) {
        (self.out.into_inner(), self.err.into_inner())
    }
}

impl<O, E> WriterConsole<O, E>
where
    O: Write,
    E: Write,
{
    fn emit(&self, stream: Stream, text: &str) {
        let depth = self.state.borrow().depth;
        let result = match stream {
            Stream::Out => write_line(&mut *self.out.borrow_mut(), depth, text, self.line_mode),
            Stream::Err => write_line(&mut *self.err.borrow_mut(), depth, text, self.line_mode),
        };

        if let Err(error) = result {
            tracing::warn!(target: "condcon::sink", %error, "console write failed");
        }
    }

    fn count(&self, label: String) {
        let value = {
            let mut state = self.state.borrow_mut();
            let counter = state.counters.entry(label.clone()).or_insert(0);
            *counter += 1;
            *counter
        };
        self.emit(Stream::Out, &format!("{label}: {value}"));
    }

    fn start_timer(&self, label: String) {
        let mut state = self.state.borrow_mut();
        if state.timers.contains_key(&label) {
            tracing::warn!(target: "condcon::sink", %label, "timer already exists");
            return;
        }
        state.timers.insert(label, Instant::now());
    }

    fn stop_timer(&self, label: &str) {
        let started = self.state.borrow_mut().timers.remove(label);
        match started {
            Some(started) => {
                let millis = started.elapsed().as_secs_f64() * 1000.0;
                self.emit(Stream::Out, &format!("{label}: {millis:.3}ms"));
            }
            None => tracing::warn!(target: "condcon::sink", %label, "no such timer"),
        }
    }
}

impl<O, E> HostConsole for WriterConsole<O, E>
where
    O: Write,
    E: Write,
{
    fn supports(&self, method: ConsoleMethod) -> bool {
        method.is_message()
            || matches!(
                method,
                ConsoleMethod::Group
                    | ConsoleMethod::GroupCollapsed
                    | ConsoleMethod::GroupEnd
                    | ConsoleMethod::Count
                    | ConsoleMethod::Time
                    | ConsoleMethod::TimeEnd
                    | ConsoleMethod::Clear
            )
    }

    fn call(&self, method: ConsoleMethod, args: fmt::Arguments<'_>) {
        match method {
            method if method.is_message() => self.emit(method.stream(), &args.to_string()),
            ConsoleMethod::Group | ConsoleMethod::GroupCollapsed => {
                let label = args.to_string();
                if !label.is_empty() {
                    self.emit(Stream::Out, &label);
                }
                self.state.borrow_mut().depth += 1;
            }
            ConsoleMethod::GroupEnd => {
                let mut state = self.state.borrow_mut();
                state.depth = state.depth.saturating_sub(1);
            }
            ConsoleMethod::Clear => self.state.borrow_mut().depth = 0,
            ConsoleMethod::Count => self.count(label_or_default(args)),
            ConsoleMethod::Time => self.start_timer(label_or_default(args)),
            ConsoleMethod::TimeEnd => self.stop_timer(&label_or_default(args)),
            _ => {}
        }
    }
}

impl<O, E> fmt::Debug for WriterConsole<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterConsole")
            .field("line_mode", &self.line_mode)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn label_or_default(args: fmt::Arguments<'_>) -> String {
    let label = args.to_string();
    if label.is_empty() {
        DEFAULT_LABEL.to_owned()
    } else {
        label
    }
}

fn write_line<W: Write>(writer: &mut W, depth: usize, text: &str, line_mode: LineMode) -> io::Result<()> {
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            writer.write_all(b"\n")?;
        }
        for _ in 0..depth {
            writer.write_all(INDENT.as_bytes())?;
        }
        writer.write_all(line.as_bytes())?;
    }
    if line_mode.append_newline() {
        writer.write_all(b"\n")?;
    }
    Ok(())
}
