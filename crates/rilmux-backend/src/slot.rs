/// Identifier of one independent hardware radio slot.
///
/// Multi-SIM devices expose one hook channel per slot; each slot negotiates
/// its own backend and keeps its own correlation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

impl SlotId {
    /// The primary slot.
    pub const PRIMARY: SlotId = SlotId(0);
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot{}", self.0)
    }
}

impl From<u32> for SlotId {
    fn from(value: u32) -> Self {
        SlotId(value)
    }
}
