// ircview - Styled IRC scrollback for the terminal
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Optional timing log for the draw and append paths.
//!
//! Built only with `--features perf`; otherwise [`Profiler::open`] returns
//! `None` and spans cost nothing. Each record is one JSON object per line:
//!
//! ```text
//! {"event":"run_start","frame":0,"pid":4711,"run":"…","ts_ms":1739599900000,"version":"0.1.0"}
//! {"fn":"ui::scrollback","frame":12,"lines":4211,"ms":0.812,"run":"…","ts_ms":1739599900793}
//! ```

#[cfg(feature = "perf")]
mod active {
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::fs::{File, OpenOptions};
    use std::io::{BufWriter, Write};
    use std::path::Path;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};
    use uuid::Uuid;

    /// Drawn frames between forced flushes.
    const FLUSH_EVERY: u64 = 120;

    struct Sink {
        out: BufWriter<File>,
        run: Uuid,
        frame: u64,
    }

    impl Sink {
        fn emit(&mut self, mut record: Value) {
            if let Value::Object(fields) = &mut record {
                fields.insert("run".to_owned(), json!(self.run.to_string()));
                fields.insert("frame".to_owned(), json!(self.frame));
                fields.insert("ts_ms".to_owned(), json!(wall_ms()));
            }
            if serde_json::to_writer(&mut self.out, &record).is_ok() {
                let _ = self.out.write_all(b"\n");
            }
        }
    }

    thread_local! {
        static SINK: RefCell<Option<Sink>> = const { RefCell::new(None) };
    }

    fn wall_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    fn with_sink(f: impl FnOnce(&mut Sink)) {
        SINK.with(|slot| {
            if let Some(sink) = slot.borrow_mut().as_mut() {
                f(sink);
            }
        });
    }

    pub(super) fn is_open() -> bool {
        SINK.with(|slot| slot.borrow().is_some())
    }

    pub(super) fn sample(name: &'static str, ms: f64, counter: Option<(&'static str, usize)>) {
        with_sink(|sink| {
            let mut record = json!({ "fn": name, "ms": (ms * 1000.0).round() / 1000.0 });
            if let (Some((key, value)), Value::Object(fields)) = (counter, &mut record) {
                fields.insert(key.to_owned(), json!(value));
            }
            sink.emit(record);
        });
    }

    /// Handle to the open timing log of this thread.
    pub struct Profiler(());

    impl Profiler {
        /// Opens `path` and writes the run header. `None` if the file
        /// cannot be opened.
        pub fn open(path: &Path, append: bool) -> Option<Self> {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(append)
                .truncate(!append)
                .open(path)
                .ok()?;
            let mut sink = Sink { out: BufWriter::new(file), run: Uuid::new_v4(), frame: 0 };
            sink.emit(json!({
                "event": "run_start",
                "pid": std::process::id(),
                "version": env!("CARGO_PKG_VERSION"),
            }));
            let _ = sink.out.flush();
            SINK.with(|slot| *slot.borrow_mut() = Some(sink));
            Some(Self(()))
        }

        /// Counts one drawn frame.
        #[allow(clippy::unused_self)]
        pub fn end_frame(&mut self) {
            with_sink(|sink| {
                sink.frame += 1;
                if sink.frame % FLUSH_EVERY == 0 {
                    let _ = sink.out.flush();
                }
            });
        }

        #[must_use]
        #[allow(clippy::unused_self)]
        pub fn span(&self, name: &'static str) -> Span {
            Span::begin(name, None)
        }
    }

    impl Drop for Profiler {
        fn drop(&mut self) {
            SINK.with(|slot| {
                if let Some(mut sink) = slot.borrow_mut().take() {
                    let _ = sink.out.flush();
                }
            });
        }
    }

    /// Records its own lifetime when dropped.
    pub struct Span {
        name: &'static str,
        started: Instant,
        counter: Option<(&'static str, usize)>,
    }

    impl Span {
        pub(super) fn begin(name: &'static str, counter: Option<(&'static str, usize)>) -> Self {
            Self { name, started: Instant::now(), counter }
        }
    }

    impl Drop for Span {
        fn drop(&mut self) {
            sample(self.name, self.started.elapsed().as_secs_f64() * 1000.0, self.counter);
        }
    }
}

#[cfg(not(feature = "perf"))]
mod inert {
    use std::path::Path;

    pub struct Profiler;
    pub struct Span;

    #[allow(clippy::unused_self)]
    impl Profiler {
        #[inline]
        pub fn open(_path: &Path, _append: bool) -> Option<Self> {
            None
        }

        #[inline]
        pub fn end_frame(&mut self) {}

        #[inline]
        #[must_use]
        pub fn span(&self, _name: &'static str) -> Span {
            Span
        }
    }
}

#[cfg(feature = "perf")]
pub use active::{Profiler, Span};
#[cfg(not(feature = "perf"))]
pub use inert::{Profiler, Span};

/// Starts a span that also records `counter = value`. `None` unless a log
/// is open.
#[must_use]
#[inline]
pub fn span(name: &'static str, counter: &'static str, value: usize) -> Option<Span> {
    #[cfg(feature = "perf")]
    {
        active::is_open().then(|| Span::begin(name, Some((counter, value))))
    }
    #[cfg(not(feature = "perf"))]
    {
        let _ = (name, counter, value);
        None
    }
}

/// Records a zero-length event with `counter = value`.
#[inline]
pub fn mark(name: &'static str, counter: &'static str, value: usize) {
    #[cfg(feature = "perf")]
    active::sample(name, 0.0, Some((counter, value)));
    #[cfg(not(feature = "perf"))]
    let _ = (name, counter, value);
}
