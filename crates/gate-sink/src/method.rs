//! crates/gate-sink/src/method.rs
//! The fixed list of console output methods a gate binds at construction.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Output operation exposed by a host console.
///
/// The list is fixed: a gate binds every entry once, using a no-op for the
/// entries the host does not support. Canonical names follow the browser
/// console (`groupCollapsed`, `timeEnd`, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsoleMethod {
    /// Debug-level message.
    Debug,
    /// Error message.
    Error,
    /// Informational message.
    Info,
    /// Plain message.
    Log,
    /// Warning message.
    Warn,
    /// Object listing.
    Dir,
    /// Markup listing.
    Dirxml,
    /// Tabular output.
    Table,
    /// Message with a stack trace.
    Trace,
    /// Opens an indented group.
    Group,
    /// Opens a collapsed indented group.
    GroupCollapsed,
    /// Closes the innermost group.
    GroupEnd,
    /// Clears the console.
    Clear,
    /// Increments and prints a named counter.
    Count,
    /// Prints when an assertion fails.
    Assert,
    /// Adds a timeline marker.
    MarkTimeline,
    /// Starts a profile.
    Profile,
    /// Stops a profile.
    ProfileEnd,
    /// Starts a timeline recording.
    Timeline,
    /// Stops a timeline recording.
    TimelineEnd,
    /// Starts a named timer.
    Time,
    /// Stops a named timer and prints the elapsed time.
    TimeEnd,
    /// Adds a timestamp marker.
    TimeStamp,
    /// Memory usage report.
    Memory,
}

/// Output stream a method writes to on a two-stream host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stream {
    /// Standard output.
    Out,
    /// Standard error.
    Err,
}

impl ConsoleMethod {
    /// Every method in binding order.
    pub const ALL: [Self; 24] = [
        Self::Debug,
        Self::Error,
        Self::Info,
        Self::Log,
        Self::Warn,
        Self::Dir,
        Self::Dirxml,
        Self::Table,
        Self::Trace,
        Self::Group,
        Self::GroupCollapsed,
        Self::GroupEnd,
        Self::Clear,
        Self::Count,
        Self::Assert,
        Self::MarkTimeline,
        Self::Profile,
        Self::ProfileEnd,
        Self::Timeline,
        Self::TimelineEnd,
        Self::Time,
        Self::TimeEnd,
        Self::TimeStamp,
        Self::Memory,
    ];

    /// Canonical method name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Error => "error",
            Self::Info => "info",
            Self::Log => "log",
            Self::Warn => "warn",
            Self::Dir => "dir",
            Self::Dirxml => "dirxml",
            Self::Table => "table",
            Self::Trace => "trace",
            Self::Group => "group",
            Self::GroupCollapsed => "groupCollapsed",
            Self::GroupEnd => "groupEnd",
            Self::Clear => "clear",
            Self::Count => "count",
            Self::Assert => "assert",
            Self::MarkTimeline => "markTimeline",
            Self::Profile => "profile",
            Self::ProfileEnd => "profileEnd",
            Self::Timeline => "timeline",
            Self::TimelineEnd => "timelineEnd",
            Self::Time => "time",
            Self::TimeEnd => "timeEnd",
            Self::TimeStamp => "timeStamp",
            Self::Memory => "memory",
        }
    }

    /// Stream the method writes to when a host separates stdout and stderr.
    ///
    /// Warnings, errors and traces go to stderr; everything else to stdout.
    #[must_use]
    pub const fn stream(self) -> Stream {
        match self {
            Self::Warn | Self::Error | Self::Trace => Stream::Err,
            _ => Stream::Out,
        }
    }

    /// Reports whether the method writes its arguments as a message line.
    #[must_use]
    pub const fn is_message(self) -> bool {
        matches!(
            self,
            Self::Debug
                | Self::Error
                | Self::Info
                | Self::Log
                | Self::Warn
                | Self::Dir
                | Self::Dirxml
                | Self::Table
                | Self::Trace
        )
    }
}

impl fmt::Display for ConsoleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known console method.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown console method: {0}")]
pub struct ParseMethodError(pub String);

impl FromStr for ConsoleMethod {
    type Err = ParseMethodError;

    /// Accepts the canonical name or its snake_case spelling (`group_end`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| {
                let name = method.name();
                name == s || snake_case(name) == s
            })
            .ok_or_else(|| ParseMethodError(s.to_owned()))
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
