//! Requests issued by a workload driver

use std::fmt;

use tierstore::Address;

/// Request kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Read a block
    Read,
    /// Write a block
    Write,
}

impl Op {
    /// Single-letter trace code
    pub fn code(self) -> char {
        match self {
            Op::Read => 'R',
            Op::Write => 'W',
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One entry of a request stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Read or write
    pub op: Op,
    /// Target block
    pub address: Address,
    /// Payload for writes; `None` lets the engine synthesize one
    pub data: Option<Vec<u8>>,
}

impl Request {
    /// Read of `address`
    pub fn read(address: Address) -> Self {
        Self {
            op: Op::Read,
            address,
            data: None,
        }
    }

    /// Write of `address` with an optional payload
    pub fn write(address: Address, data: Option<Vec<u8>>) -> Self {
        Self {
            op: Op::Write,
            address,
            data,
        }
    }
}
