use anyhow::{anyhow, Context};
use circuit::{BitInt, Circuit};
use crypto_core::AesRng;
use structopt::StructOpt;
use twopc::twopc_prot::*;

#[derive(StructOpt, Debug)]
#[structopt(name = "demo", about = "Evaluate a Bristol circuit between two parties")]
struct Opt {
    /// garbler or evaluator
    #[structopt(short, long)]
    role: Role,
    #[structopt(short, long, default_value = "127.0.0.1:12345")]
    addr: String,
    #[structopt(long, default_value = "127.0.0.1:12346")]
    ot_addr: String,
    #[structopt(short, long, default_value = "circuit/circuit_files/bristol/adder64.txt")]
    circuit: String,
    #[structopt(long, default_value = "20")]
    connect_attempts: usize,
    /// One value per input segment, `_` for the segments of the peer
    inputs: Vec<String>,
}

fn parse_input(s: &str) -> anyhow::Result<Option<BitInt>> {
    if s == "_" {
        return Ok(None);
    }
    let value = s
        .parse::<u64>()
        .with_context(|| format!("invalid input {s}"))?;
    Ok(Some(BitInt::from(value)))
}

// run the main function in two terminals
// cargo run --example demo -- --role evaluator _ 26
// cargo run --example demo -- --role garbler 15 _
pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = Opt::from_args();

    let circ = Circuit::load(&opt.circuit)
        .with_context(|| format!("failed to load {}", opt.circuit))?;
    let inputs = opt
        .inputs
        .iter()
        .map(|s| parse_input(s))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if inputs.len() != circ.ninputs() {
        return Err(anyhow!(
            "{} takes {} inputs, got {}",
            opt.circuit,
            circ.ninputs(),
            inputs.len()
        ));
    }

    let mut config = PartyConfig::new(opt.role, &opt.addr, &opt.ot_addr);
    config.connect_attempts = opt.connect_attempts;
    let (channel, ot_channel) = config.connect()?;

    let mut rng = AesRng::new();
    let outputs = match opt.role {
        Role::Garbler => Garbler::new(channel, ot_channel).run(&circ, &inputs, &mut rng)?,
        Role::Evaluator => Evaluator::new(channel, ot_channel).run(&circ, &inputs, &mut rng)?,
    };

    println!("=============================");
    println!("Compute {} with 2PC Protocol\n", opt.circuit);
    for (i, output) in outputs.iter().enumerate() {
        println!("output {i}: {}", output.value());
    }
    Ok(())
}
