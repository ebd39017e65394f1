//! Error type shared by the whole crate.

use std::path::PathBuf;

/// All errors `batch2d` can return.
#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    /// `pop_transform` was called with nothing pushed. Push/pop calls are
    /// unbalanced somewhere in the caller.
    #[error("transform stack underflow: pop_transform called on an empty stack")]
    TransformStackUnderflow,
    /// A configuration file could not be parsed.
    #[error("error parsing batch config: {0}")]
    Config(#[from] serde_json::Error),
    /// A file could not be read.
    #[error("error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An image could not be decoded.
    #[cfg(feature = "wgpu")]
    #[error("error reading image: {0}")]
    Image(#[from] image::ImageError),
    /// Pixel data does not match the texture size it was uploaded with.
    #[cfg(feature = "wgpu")]
    #[error("texture '{label}': {len} bytes is not {width}x{height} RGBA8")]
    TextureData {
        label: String,
        width: u32,
        height: u32,
        len: usize,
    },
    /// The window surface could not be created.
    #[cfg(feature = "wgpu")]
    #[error("error creating surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    #[cfg(feature = "wgpu")]
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    /// The adapter refused to create a device.
    #[cfg(feature = "wgpu")]
    #[error("error creating GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Shorthand for results carrying a [`BatchError`].
pub type Result<T, E = BatchError> = std::result::Result<T, E>;
