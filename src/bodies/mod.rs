mod body;
mod body_type;

pub use self::body::Body;
pub use self::body_type::BodyType;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling how a body takes part in collision handling
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct BodyFlags: u32 {
            /// Body is a trigger volume (detects overlaps but is never pushed)
            const TRIGGER = 0x01;

            /// Body is excluded from detection entirely
            const DISABLED = 0x02;
        }
    }
}
