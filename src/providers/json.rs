//! A [`Provider`] backed by a `serde_json::Value` tree, the Rust analogue
//! of the reference `mustach-json-c` adapter.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use crate::error::Error;
use crate::Provider;

enum Frame {
    ArrayIter { items: Vec<Value>, idx: usize },
    Single,
}

/// A `Provider` over a JSON context, with dotted-path lookup, ancestor-scope
/// fallback for single-segment names, array iteration, and file-backed
/// partial resolution.
pub struct JsonProvider {
    stack: Vec<Value>,
    frames: Vec<Frame>,
    partials_dir: Option<PathBuf>,
    partial_cache: Arc<DashMap<String, String>>,
}

impl JsonProvider {
    /// Build a provider rooted at `root`, with no partials directory.
    pub fn new(root: Value) -> Self {
        JsonProvider {
            stack: vec![root],
            frames: Vec::new(),
            partials_dir: None,
            partial_cache: Arc::new(DashMap::new()),
        }
    }

    /// Resolve `{{>name}}` partials against `<dir>/<name>.mustache` files.
    pub fn with_partials_dir(mut self, dir: PathBuf) -> Self {
        self.partials_dir = Some(dir);
        self
    }

    /// Share a partial-file cache with other providers (e.g. the CLI
    /// rendering several templates against the same JSON root and
    /// partials directory, without re-reading each partial file once per
    /// template).
    pub fn with_shared_cache(mut self, cache: Arc<DashMap<String, String>>) -> Self {
        self.partial_cache = cache;
        self
    }

    fn current(&self) -> &Value {
        self.stack.last().expect("root scope always present")
    }

    /// Resolve `name` against the current scope. A dotted name (`a.b.c`)
    /// walks down from the current scope only; `.` refers to the current
    /// scope itself (for iterating a list of scalars); a single, undotted
    /// segment searches up the enclosing scope stack, the common Mustache
    /// convention for referring to an ancestor context.
    fn resolve(&self, name: &str) -> Option<Value> {
        if name == "." {
            return Some(self.current().clone());
        }
        if name.contains('.') {
            let mut cur = self.current();
            for part in name.split('.') {
                cur = cur.get(part)?;
            }
            return Some(cur.clone());
        }
        for scope in self.stack.iter().rev() {
            if let Some(v) = scope.get(name) {
                return Some(v.clone());
            }
        }
        None
    }

    fn truthy(value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(_) => true,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        }
    }

    fn to_text(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }
}

impl Provider for JsonProvider {
    fn enter(&mut self, name: &str) -> Result<bool, Error> {
        let value = self.resolve(name).unwrap_or(Value::Null);
        match value {
            Value::Array(items) => {
                if items.is_empty() {
                    return Ok(false);
                }
                let first = items[0].clone();
                self.frames.push(Frame::ArrayIter { items, idx: 0 });
                self.stack.push(first);
                Ok(true)
            }
            other if Self::truthy(&other) => {
                self.frames.push(Frame::Single);
                self.stack.push(other);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn next(&mut self) -> Result<bool, Error> {
        match self.frames.last_mut() {
            Some(Frame::ArrayIter { items, idx }) => {
                *idx += 1;
                if *idx < items.len() {
                    let value = items[*idx].clone();
                    self.stack.pop();
                    self.stack.push(value);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Some(Frame::Single) => Ok(false),
            None => Err(Error::InvalidItf),
        }
    }

    fn leave(&mut self) {
        self.frames.pop();
        self.stack.pop();
    }

    fn get(&mut self, name: &str) -> Result<String, Error> {
        match self.resolve(name) {
            Some(Value::Null) | None => Err(Error::ItemNotFound),
            Some(v) => Ok(Self::to_text(&v)),
        }
    }

    fn partial(&mut self, name: &str) -> Result<String, Error> {
        // No directory configured at all: not implemented, let the
        // processor fall back to `get`. A configured directory missing the
        // requested file is a genuine `PartialNotFound`, below. Self- and
        // mutually-including partials are caught by the processor's own
        // active-partial tracking, not here.
        let dir = self.partials_dir.as_ref().ok_or(Error::InvalidItf)?;
        if let Some(cached) = self.partial_cache.get(name) {
            return Ok(cached.clone());
        }
        let path = dir.join(format!("{name}.mustache"));
        let content = std::fs::read_to_string(&path).map_err(|_| Error::PartialNotFound)?;
        self.partial_cache.insert(name.to_string(), content.clone());
        Ok(content)
    }
}
