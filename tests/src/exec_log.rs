use crate::DriverOp;

use std::sync::{Arc, Mutex};

/// A handle on the operations a [`MockDriver`](crate::MockDriver) executed.
#[derive(Debug, Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// SQL text of every operation, in execution order.
    pub fn sql(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.sql.clone())
            .collect()
    }

    /// Count operations whose SQL starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.sql()
            .iter()
            .filter(|sql| sql.starts_with(prefix))
            .count()
    }

    /// Position of the first operation whose SQL contains `pattern`.
    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.sql().iter().position(|sql| sql.contains(pattern))
    }

    /// SQL of the only operation containing `pattern`.
    #[track_caller]
    pub fn find(&self, pattern: &str) -> String {
        let matches: Vec<_> = self
            .sql()
            .into_iter()
            .filter(|sql| sql.contains(pattern))
            .collect();

        match &matches[..] {
            [sql] => sql.clone(),
            _ => panic!("expected one statement containing `{pattern}`; got {matches:#?}"),
        }
    }

    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first operation from the log.
    pub fn pop(&mut self) -> Option<DriverOp> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            Some(ops.remove(0))
        }
    }
}
