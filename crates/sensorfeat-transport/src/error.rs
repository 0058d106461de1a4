/// Errors that can occur while handing a frame to a link.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// An I/O error occurred on the underlying sink.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The link declined the write.
    #[error("write to {device} rejected")]
    Rejected { device: String },

    /// A writer panicked while holding the sink lock.
    #[error("transport lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, TransportError>;
