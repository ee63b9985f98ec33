/// Type of body, determining whether overlap resolution may move it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyType {
    /// Dynamic bodies move and are pushed out of overlaps
    #[default]
    Dynamic,

    /// Static bodies never move; the other body of a pair absorbs the full correction
    Static,
}
