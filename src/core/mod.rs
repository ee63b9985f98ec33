pub mod world;
pub mod config;
pub mod storage;
pub mod events;

pub use self::world::CollisionWorld;
pub use self::config::CollisionConfig;
pub use self::storage::{BodyStorage, Storage};
pub use self::events::{EventQueue, CollisionEvent, CollisionEventType, BodyEvent, BodyEventType};

/// A unique identifier for a body: its slot index in a [`BodyStorage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Returns the slot index behind this handle
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
