#[derive(Debug, thiserror::Error)]
pub enum OTSenderError {
    #[error("Sender IO Error")]
    IoError(std::io::Error),

    #[error("Sender has a transfer in flight")]
    InFlight,
}

#[derive(Debug, thiserror::Error)]
pub enum OTReceiverError {
    #[error("Receiver IO Error")]
    IoError(std::io::Error),
}

impl From<std::io::Error> for OTSenderError {
    fn from(e: std::io::Error) -> OTSenderError {
        OTSenderError::IoError(e)
    }
}

impl From<std::io::Error> for OTReceiverError {
    fn from(e: std::io::Error) -> OTReceiverError {
        OTReceiverError::IoError(e)
    }
}
