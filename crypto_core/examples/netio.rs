use curve25519_dalek::{constants, scalar::Scalar};
use std::net::TcpStream;
use structopt::StructOpt;

use crypto_core::{AbstractChannel, Block, CommandLineOpt, NetChannel};
use rand::random;

fn send_all(netio: &mut NetChannel<TcpStream, TcpStream>) -> std::io::Result<()> {
    let send_bytes = random::<[u8; 10]>();
    let send_bool = random::<bool>();
    let send_bools = random::<[bool; 10]>();
    let send_block = random::<Block>();
    let x = Scalar::from(random::<u64>());
    let send_point = &x * &constants::RISTRETTO_BASEPOINT_TABLE;

    println!("send_bytes: {:?}", send_bytes);
    println!("send_bool: {:?}", send_bool);
    println!("send_bools: {:?}", send_bools);
    println!("send_block: {:?}", send_block);
    println!("send_point: {:?}", send_point.compress().as_bytes());

    netio.write_bytes(&send_bytes)?;
    netio.write_bool(send_bool)?;
    netio.write_bools(&send_bools)?;
    netio.write_block(&send_block)?;
    netio.write_point(&send_point)?;
    netio.flush()
}

fn recv_all(netio: &mut NetChannel<TcpStream, TcpStream>) -> std::io::Result<()> {
    let mut recv_bytes = [0u8; 10];
    netio.read_bytes(&mut recv_bytes)?;
    let recv_bool = netio.read_bool()?;
    let recv_bools = netio.read_bools(10)?;
    let recv_block = netio.read_block()?;
    let recv_point = netio.read_point()?;

    println!("recv_bytes: {:?}", recv_bytes);
    println!("recv_bool: {:?}", recv_bool);
    println!("recv_bools: {:?}", recv_bools);
    println!("recv_block: {:?}", recv_block);
    println!("recv_point: {:?}", recv_point.compress().as_bytes());
    Ok(())
}

// run the main function in two terminals
// cargo run --example netio -- --is-server 1
// cargo run --example netio -- --is-server 0
pub fn main() -> std::io::Result<()> {
    let opt = CommandLineOpt::from_args();
    let is_server = opt.is_server != 0;
    let mut netio = NetChannel::new(is_server, opt.addr.as_str())?;
    if netio.is_server() {
        send_all(&mut netio)?;
        recv_all(&mut netio)
    } else {
        recv_all(&mut netio)?;
        send_all(&mut netio)
    }
}
