use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("buffer too short: needed {needed} bytes at offset {offset}, had {available}")]
    BufferTooShort {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("unknown compression record discriminator: {0:?}")]
    UnknownCompression([u8; 2]),

    #[error("bzip2 decompression failed for every stream ({0} attempted)")]
    DecompressionFailed(usize),

    #[error(transparent)]
    Model(#[from] nexrad_model::result::Error),
}
