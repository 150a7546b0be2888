use std::net::TcpStream;

use crypto_core::CommandLineOpt;
use crypto_core::{AesRng, Block, NetChannel};
use structopt::StructOpt;
use twopc::ot::{OtReceiver, OtSender, PkOtReceiver, PkOtSender};

fn rand_block_vec(size: usize) -> Vec<Block> {
    (0..size).map(|_| rand::random::<Block>()).collect()
}

fn rand_bool_vec(size: usize) -> Vec<bool> {
    (0..size).map(|_| rand::random::<bool>()).collect()
}

fn pk_ot_test(netio: &mut NetChannel<TcpStream, TcpStream>) -> anyhow::Result<()> {
    if netio.is_server() {
        let m0 = rand_block_vec(8);
        let m1 = rand_block_vec(8);
        let m: Vec<(Block, Block)> = m0.into_iter().zip(m1.into_iter()).collect();
        let mut rng = AesRng::new();
        let mut ot = PkOtSender::new();
        ot.send(netio, &m, &mut rng)?;
        println!("send blocks: {:?}", m);
    } else {
        let select = rand_bool_vec(8);
        let mut rng = AesRng::new();
        let mut ot = PkOtReceiver::new();
        let result = ot.receive(netio, &select, &mut rng)?;
        println!("select bits: {:?}", select);
        println!("received blocks: {:?}", result);
    }
    println!(
        "bytes written: {}, bytes read: {}",
        netio.bytes_written(),
        netio.bytes_read()
    );
    Ok(())
}

// run the main function in two terminals
// cargo run --example ot -- --is-server 1
// cargo run --example ot -- --is-server 0
pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = CommandLineOpt::from_args();
    let is_server = opt.is_server != 0;
    let mut netio = NetChannel::new(is_server, opt.addr.as_str())?;
    pk_ot_test(&mut netio)
}
