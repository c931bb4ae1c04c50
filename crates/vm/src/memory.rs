//! Demand-grown memory tape.

use std::collections::BTreeMap;

use log::trace;

/// Addresses below this live in the dense vector; anything higher is kept
/// sparsely.
pub const DENSE_LIMIT: usize = 1 << 20;

/// A logically infinite tape of `i64` cells.
///
/// Physically a vector that grows whenever an access targets an address past
/// its end, up to [`DENSE_LIMIT`]. Cells beyond that are stored in a sparse
/// map only once written. Untouched cells hold the fill value. Growth never
/// shrinks the tape or moves existing cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
    far: BTreeMap<usize, i64>,
    fill: i64,
}

impl Memory {
    pub fn new(cells: Vec<i64>, fill: i64) -> Self {
        Self {
            cells,
            far: BTreeMap::new(),
            fill,
        }
    }

    /// Grow the dense tape so that `address` is in bounds. Returns false for
    /// addresses handled sparsely.
    fn ensure(&mut self, address: usize) -> bool {
        if address < self.cells.len() {
            return true;
        }
        if address >= DENSE_LIMIT {
            return false;
        }
        trace!(
            "memory grows from {} to {} cells",
            self.cells.len(),
            address + 1
        );
        self.cells.resize(address + 1, self.fill);
        true
    }

    /// Read a cell, growing the dense tape first if needed.
    pub fn read(&mut self, address: usize) -> i64 {
        if self.ensure(address) {
            self.cells[address]
        } else {
            self.get(address)
        }
    }

    /// Write a cell, growing the dense tape first if needed.
    pub fn write(&mut self, address: usize, value: i64) {
        if self.ensure(address) {
            self.cells[address] = value;
        } else {
            trace!("sparse write at {address}");
            self.far.insert(address, value);
        }
    }

    /// Read a cell without growing the tape. Untouched cells hold the fill
    /// value.
    pub fn get(&self, address: usize) -> i64 {
        match self.cells.get(address) {
            Some(&value) => value,
            None => self.far.get(&address).copied().unwrap_or(self.fill),
        }
    }

    /// The dense part of the tape, starting at address 0.
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }
}
