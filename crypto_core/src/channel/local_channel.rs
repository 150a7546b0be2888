use std::{
    io::{BufReader, BufWriter},
    os::unix::net::UnixStream,
};

use crate::StdChannel;

pub type LocalChannel = StdChannel<BufReader<UnixStream>, BufWriter<UnixStream>>;

/// A connected pair of in-process channels, for tests and local runs.
///
/// Panics if the socket pair cannot be created.
pub fn local_channel_pair() -> (LocalChannel, LocalChannel) {
    let (tx, rx) = UnixStream::pair().expect("failed to create unix socket pair");
    let sender = StdChannel::new(
        BufReader::new(tx.try_clone().expect("failed to clone unix socket")),
        BufWriter::new(tx),
    );
    let receiver = StdChannel::new(
        BufReader::new(rx.try_clone().expect("failed to clone unix socket")),
        BufWriter::new(rx),
    );
    (sender, receiver)
}
