#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("round-end record #{position} (round {round:?}) has no tick")]
    MissingTick { position: usize, round: Option<u32> },
    #[error("invalid tick rate {0}")]
    InvalidTickRate(f32),
    #[error("both teams declared {0:?} as their starting side")]
    ConflictingSides(crate::Side),
    #[error("decoding demo: {0}")]
    Decode(String),
}
