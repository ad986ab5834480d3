use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialError {
    #[error("failed to read font {path}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a usable font")]
    FontParse { path: PathBuf },
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixel surface error: {0}")]
    Surface(#[from] pixels::Error),
    #[error("pixel buffer resize failed: {0}")]
    Texture(#[from] pixels::TextureError),
}
