/*!
Crate error type.

Only bring-up can fail: parsing a cartridge image, constructing a mapper for
it, or the host-side helpers (file I/O, screenshots). Once a `Console` exists,
stepping is infallible.
*/

use thiserror::Error;

/// Errors produced while bringing up a console or using host-side helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// The cartridge names a mapper this crate has no implementation for.
    #[error("unsupported mapper id: {0}")]
    UnsupportedMapper(u8),

    /// The iNES header is malformed.
    #[error("invalid iNES header: {0}")]
    InvalidHeader(&'static str),

    /// The image ends before the section its header promises.
    #[error("iNES image truncated: missing {section}")]
    Truncated { section: &'static str },

    /// The cartridge geometry cannot be mapped (e.g. no PRG bank at all).
    #[error("invalid cartridge geometry: {0}")]
    InvalidGeometry(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Save states are not implemented.
    #[error("save states are not supported")]
    SaveStateUnsupported,

    #[cfg(feature = "screenshot")]
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// A framebuffer handed to the screenshot writer has the wrong length.
    #[cfg(feature = "screenshot")]
    #[error("framebuffer is {0} bytes, expected 256x240 RGBA")]
    FrameSize(usize),

    /// Window or surface setup failed.
    #[cfg(feature = "display")]
    #[error("display error: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, Error>;
