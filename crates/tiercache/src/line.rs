//! Resident cache line

/// One block held in the fast tier
///
/// The address is the key the line is stored under. `data` is only unset
/// between a write-miss allocation and the write that fills it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheLine {
    pub(crate) data: Option<Vec<u8>>,
    pub(crate) dirty: bool,
}

impl CacheLine {
    pub(crate) fn clean(data: Vec<u8>) -> Self {
        Self {
            data: Some(data),
            dirty: false,
        }
    }

    /// Payload held by the line
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// True if the backing store has not seen this payload yet
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
