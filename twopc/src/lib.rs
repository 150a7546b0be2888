pub mod garble;
pub mod ot;
pub mod twopc_prot;

pub use garble::*;
pub use ot::*;
pub use twopc_prot::*;

use circuit::Circuit;
use crypto_core::{AbstractChannel, Block};
use std::io::Result;

/// Send the garbled rows of every gate followed by the decoding rows.
pub fn send_tables<C: AbstractChannel>(
    channel: &mut C,
    table: &GarbledTable,
    decoding: &DecodingTable,
) -> Result<()> {
    for gate in table.gates.iter() {
        for row in gate.rows() {
            channel.write_block(row)?;
        }
    }
    for [x, y] in decoding.rows.iter() {
        channel.write_block(x)?;
        channel.write_block(y)?;
    }
    Ok(())
}

/// Receive the tables sent by `send_tables`; their shape follows `circ`.
pub fn receive_tables<C: AbstractChannel>(
    channel: &mut C,
    circ: &Circuit,
) -> Result<(GarbledTable, DecodingTable)> {
    let mut gates = Vec::with_capacity(circ.ngates());
    for gate in circ.gates() {
        let mut garbled = match gate.inputs().len() {
            1 => GarbledGate::Unary([Block::zero(); 2]),
            _ => GarbledGate::Binary([Block::zero(); 4]),
        };
        for row in garbled.rows_mut() {
            *row = channel.read_block()?;
        }
        gates.push(garbled);
    }

    let mut rows = vec![[Block::zero(); 2]; circ.noutput_wires()];
    for [x, y] in rows.iter_mut() {
        *x = channel.read_block()?;
        *y = channel.read_block()?;
    }

    Ok((
        GarbledTable::new(gates),
        DecodingTable::new(circ.output_offset(), rows),
    ))
}

pub fn send_label<C: AbstractChannel>(channel: &mut C, label: &WireLabel) -> Result<()> {
    channel.write_block(&label.pack())
}

pub fn receive_label<C: AbstractChannel>(channel: &mut C) -> Result<WireLabel> {
    Ok(WireLabel::unpack(channel.read_block()?))
}
