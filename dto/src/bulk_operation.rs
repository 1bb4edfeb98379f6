use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Members an administrative action applies to.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct BulkRequest {
    membership_numbers: Vec<String>,
}

impl BulkRequest {
    pub fn new(membership_numbers: Vec<String>) -> Self {
        Self { membership_numbers }
    }
}

/// How many members an administrative action succeeded for,
/// along with a message for each one it failed for.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
pub struct BulkResult {
    count: usize,
    errors: Vec<String>,
}

impl BulkResult {
    pub fn succeeded(&mut self) {
        self.count += 1;
    }

    pub fn failed(&mut self, message: String) {
        self.errors.push(message);
    }
}
