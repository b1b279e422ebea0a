//! The environment handed to dynamic builtins.
//!
//! A [`DynamicEnv`] is an ordered list of trace sinks. [`DynamicEnv::new`]
//! holds none and is the identity of [`DynamicEnv::combine`], which appends
//! the sinks of its right operand after its own; combining is therefore
//! associative. Every emitted message reaches every sink, in list order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type TraceSink = Box<dyn FnMut(&str)>;

#[derive(Default)]
pub struct DynamicEnv {
    sinks: Vec<TraceSink>,
}

impl DynamicEnv {
    /// The neutral environment: emitting is a no-op.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sink(sink: impl FnMut(&str) + 'static) -> Self {
        Self {
            sinks: vec![Box::new(sink)],
        }
    }

    /// Forward every message to `tracing` under the `plinth::trace` target.
    pub fn tracing() -> Self {
        Self::from_sink(|message| tracing::info!(target: "plinth::trace", "{}", message))
    }

    /// An environment that records messages into the returned [`TraceLog`].
    pub fn buffered() -> (Self, TraceLog) {
        let log = TraceLog::default();
        let sink_log = log.clone();
        let env = Self::from_sink(move |message| sink_log.push(message));
        (env, log)
    }

    /// Run `self`'s sinks first, then `other`'s.
    pub fn combine(mut self, other: DynamicEnv) -> Self {
        self.sinks.extend(other.sinks);
        self
    }

    pub fn emit(&mut self, message: &str) {
        for sink in &mut self.sinks {
            sink(message);
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl FromIterator<DynamicEnv> for DynamicEnv {
    fn from_iter<I: IntoIterator<Item = DynamicEnv>>(iter: I) -> Self {
        iter.into_iter().fold(DynamicEnv::new(), DynamicEnv::combine)
    }
}

impl fmt::Debug for DynamicEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicEnv")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// Shared, append-only record of trace messages.
#[derive(Debug, Clone, Default)]
pub struct TraceLog(Rc<RefCell<Vec<String>>>);

impl TraceLog {
    fn push(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}
