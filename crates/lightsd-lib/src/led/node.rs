//! LED attribute nodes: trait + sysfs backend.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// ── Error type ──

/// Attribute write errors.
///
/// String payloads follow the convention **"context: details"** where
/// *context* names the attribute node and *details* the underlying failure.
#[derive(Debug)]
pub enum NodeError {
    /// The node directory does not exist.
    NotFound(String),
    /// The write was rejected or only partially performed.
    WriteFailed(String),
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::NotFound(e) => write!(f, "LED node not found: {e}"),
            NodeError::WriteFailed(e) => write!(f, "Attribute write failed: {e}"),
        }
    }
}

impl std::error::Error for NodeError {}

pub type Result<T> = std::result::Result<T, NodeError>;

// ── Attributes ──

/// Control attribute of an LED class device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Brightness,
    DelayOn,
    DelayOff,
    Trigger,
}

impl Attribute {
    /// File name of the attribute under the LED directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Attribute::Brightness => "brightness",
            Attribute::DelayOn => "delay_on",
            Attribute::DelayOff => "delay_off",
            Attribute::Trigger => "trigger",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.file_name())
    }
}

// ── Trait ──

/// A physical LED exposing textual control attributes.
///
/// Either the whole value is written or the call fails.
pub trait LedNode {
    fn write_attribute(&self, attr: Attribute, value: &str) -> Result<()>;
}

impl<T: LedNode + ?Sized> LedNode for &T {
    fn write_attribute(&self, attr: Attribute, value: &str) -> Result<()> {
        (**self).write_attribute(attr, value)
    }
}

// ── sysfs backend ──

/// LED class device under `/sys/class/leds/<name>`.
#[derive(Debug, Clone)]
pub struct SysfsNode {
    dir: PathBuf,
}

impl SysfsNode {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SysfsNode { dir: dir.into() }
    }

    /// Full path of one attribute file.
    pub fn attribute_path(&self, attr: Attribute) -> PathBuf {
        self.dir.join(attr.file_name())
    }
}

impl LedNode for SysfsNode {
    fn write_attribute(&self, attr: Attribute, value: &str) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(NodeError::NotFound(self.dir.display().to_string()));
        }
        let path = self.attribute_path(attr);
        // The handle is dropped (closed) before returning on every path.
        std::fs::write(&path, value)
            .map_err(|e| NodeError::WriteFailed(format!("{}: {e}", path.display())))
    }
}

// ── Mock ──

pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    /// One attempted attribute write.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Write {
        pub attr: Attribute,
        pub value: String,
        pub ok: bool,
    }

    /// In-memory LED node for unit tests. Records every attempted write in
    /// order, including the ones it was told to fail.
    #[derive(Default)]
    pub struct MockNode {
        /// Every attempted write, in order.
        pub writes: RefCell<Vec<Write>>,
        /// Last successfully written value per attribute.
        pub values: RefCell<HashMap<Attribute, String>>,
        /// Remaining forced failures per attribute.
        fail_next: RefCell<HashMap<Attribute, usize>>,
        /// Attributes that always fail.
        fail_always: RefCell<HashSet<Attribute>>,
    }

    impl MockNode {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail the next `count` writes of `attr`.
        pub fn fail_next(&self, attr: Attribute, count: usize) {
            *self.fail_next.borrow_mut().entry(attr).or_default() += count;
        }

        /// Fail every write of `attr`.
        pub fn fail_always(&self, attr: Attribute) {
            self.fail_always.borrow_mut().insert(attr);
        }

        /// Attempted writes as `(attribute, value)` pairs.
        pub fn attempts(&self) -> Vec<(Attribute, String)> {
            self.writes
                .borrow()
                .iter()
                .map(|w| (w.attr, w.value.clone()))
                .collect()
        }

        /// Number of attempted writes of `attr`.
        pub fn count(&self, attr: Attribute) -> usize {
            self.writes.borrow().iter().filter(|w| w.attr == attr).count()
        }

        /// Last successfully written value of `attr`.
        pub fn value(&self, attr: Attribute) -> Option<String> {
            self.values.borrow().get(&attr).cloned()
        }

        pub fn clear(&self) {
            self.writes.borrow_mut().clear();
            self.values.borrow_mut().clear();
        }

        fn should_fail(&self, attr: Attribute) -> bool {
            if self.fail_always.borrow().contains(&attr) {
                return true;
            }
            let mut fail_next = self.fail_next.borrow_mut();
            match fail_next.get_mut(&attr) {
                Some(n) if *n > 0 => {
                    *n -= 1;
                    true
                }
                _ => false,
            }
        }
    }

    impl LedNode for MockNode {
        fn write_attribute(&self, attr: Attribute, value: &str) -> Result<()> {
            let ok = !self.should_fail(attr);
            self.writes.borrow_mut().push(Write {
                attr,
                value: value.to_string(),
                ok,
            });
            if !ok {
                return Err(NodeError::WriteFailed(format!(
                    "mock {attr}: failure injected"
                )));
            }
            self.values.borrow_mut().insert(attr, value.to_string());
            Ok(())
        }
    }
}
