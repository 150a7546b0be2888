use crate::AbstractChannel;
use std::io::Result;
use std::{
    io::{BufReader, BufWriter, Read, Write},
    net::{TcpListener, TcpStream, ToSocketAddrs},
};
use structopt::StructOpt;

/// TCP channel between the two parties.
pub struct NetChannel<R: Read, W: Write> {
    is_server: bool,
    reader: BufReader<R>,
    writer: BufWriter<W>,
    read_bytes_size: usize,
    write_bytes_size: usize,
    flush_num: usize,
}

impl NetChannel<TcpStream, TcpStream> {
    /// Bind `addr` and block until the peer connects.
    pub fn listen<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        let (socket, peer) = listener.accept()?;
        tracing::debug!(%peer, "accepted connection");
        Self::from_stream(true, socket)
    }

    /// Connect to a peer listening on `addr`.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let socket = TcpStream::connect(addr)?;
        tracing::debug!(peer = ?socket.peer_addr().ok(), "connected");
        Self::from_stream(false, socket)
    }

    /// Listen when `is_server`, connect otherwise.
    pub fn new<A: ToSocketAddrs>(is_server: bool, addr: A) -> Result<Self> {
        if is_server {
            Self::listen(addr)
        } else {
            Self::connect(addr)
        }
    }

    fn from_stream(is_server: bool, socket: TcpStream) -> Result<Self> {
        socket.set_nodelay(true)?;
        Ok(Self {
            is_server,
            reader: BufReader::new(socket.try_clone()?),
            writer: BufWriter::new(socket),
            read_bytes_size: 0,
            write_bytes_size: 0,
            flush_num: 0,
        })
    }
}

impl<R: Read, W: Write> NetChannel<R, W> {
    pub fn is_server(&self) -> bool {
        self.is_server
    }

    pub fn bytes_written(&self) -> usize {
        self.write_bytes_size
    }

    pub fn bytes_read(&self) -> usize {
        self.read_bytes_size
    }

    pub fn flush_count(&self) -> usize {
        self.flush_num
    }
}

impl<R: Read, W: Write> AbstractChannel for NetChannel<R, W> {
    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.write_bytes_size += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn read_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.reader.read_exact(bytes)?;
        self.read_bytes_size += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.flush_num += 1;
        Ok(())
    }
}

#[derive(StructOpt, Debug)]
pub struct CommandLineOpt {
    #[structopt(short, long, default_value = "0")]
    pub is_server: u32,
    #[structopt(short, long, default_value = "127.0.0.1:12345")]
    pub addr: String,
}
