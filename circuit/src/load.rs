//! Load Bristol format circuit from files.

use crate::errors::CircuitLoadError;
use crate::gate::{Circuit, Gate, Operation};
use anyhow::{anyhow, Context};
use regex::Regex;
use std::fs;

/// Split a line into its whitespace separated fields.
fn parse_to_vec<'a>(re: &Regex, line: &'a str) -> Vec<&'a str> {
    re.captures_iter(line)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn parse_usize(field: &str, what: &str) -> Result<usize, CircuitLoadError> {
    let n = field
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {what}: {field}"))?;
    Ok(n)
}

/// Parse `count size_0 size_1 ...` and check that `count` sizes follow.
fn parse_segments(re: &Regex, line: &str, what: &str) -> Result<Vec<usize>, CircuitLoadError> {
    let fields = parse_to_vec(re, line);
    let (count, sizes) = fields
        .split_first()
        .ok_or_else(|| anyhow!("Expecting {what} count: {line}"))?;
    let count = parse_usize(count, what)?;
    let sizes = sizes
        .iter()
        .map(|s| parse_usize(s, what))
        .collect::<Result<Vec<usize>, _>>()?;

    // Check nwires is specified for every segment
    if sizes.len() != count {
        return Err(CircuitLoadError::ParsingError(anyhow!(
            "Expecting wire count to be specified for every {what}: {line}"
        )));
    }
    Ok(sizes)
}

fn parse_gate(re: &Regex, gate_id: usize, line: &str) -> Result<Gate, CircuitLoadError> {
    let gate_info = parse_to_vec(re, line);
    if gate_info.len() < 3 {
        return Err(CircuitLoadError::ParsingError(anyhow!(
            "Expecting gate line: {line}"
        )));
    }
    let (gate_type, wires) = gate_info.split_last().ok_or_else(|| anyhow!("Empty gate line"))?;
    let op = Operation::from_name(gate_type)
        .ok_or_else(|| anyhow!("Encountered unsupported gate type: {gate_type}"))?;

    let wires = wires
        .iter()
        .map(|w| parse_usize(w, "gate"))
        .collect::<Result<Vec<usize>, _>>()?;
    let (nin, nout) = (wires[0], wires[1]);

    match op {
        Operation::Mand => {
            tracing::debug!("Extended Bristol Fashion circuit found");
            if nout.checked_mul(2) != Some(nin) {
                return Err(CircuitLoadError::ParsingError(anyhow!(
                    "MAND gate expects twice as many inputs as outputs: {line}"
                )));
            }
        }
        _ => {
            if !(nin == 1 || nin == 2) || nout != 1 {
                return Err(CircuitLoadError::ParsingError(anyhow!(
                    "Gate expects 1 or 2 inputs and 1 output: {line}"
                )));
            }
        }
    }

    let nwire_ids = nin
        .checked_add(nout)
        .ok_or_else(|| anyhow!("Wire counts overflow: {line}"))?;
    if wires.len() - 2 != nwire_ids {
        return Err(CircuitLoadError::ParsingError(anyhow!(
            "Expecting {nwire_ids} wire ids: {line}"
        )));
    }

    Ok(Gate::new(
        gate_id,
        op,
        wires[2..2 + nin].to_vec(),
        wires[2 + nin..].to_vec(),
    ))
}

impl Circuit {
    /// Parse a circuit in Bristol Fashion format as specified here:
    /// `https://homes.esat.kuleuven.be/~nsmart/MPC/`
    pub fn parse(s: &str) -> Result<Self, CircuitLoadError> {
        let re = Regex::new(r"(\S+)\s*").context("Failed to compile regex")?;
        let mut lines = s.lines().map(str::trim).filter(|l| !l.is_empty());

        // Parse first line: ngates nwires\n
        let line = lines.next().ok_or_else(|| anyhow!("Missing header line"))?;
        let line_1 = parse_to_vec(&re, line);
        // Check fisrt line has 2 values: ngates, nwires
        if line_1.len() != 2 {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "Expecting line to be ngates, nwires: {line}"
            )));
        }
        let ngates = parse_usize(line_1[0], "ngates")?;
        let nwires = parse_usize(line_1[1], "nwires")?;

        // Parse second line: ninputs input_0_nwires input_1_nwires...
        let line = lines.next().ok_or_else(|| anyhow!("Missing input line"))?;
        let input_sizes = parse_segments(&re, line, "input")?;

        // Parse third line: noutputs output_0_nwires output_1_nwires...
        let line = lines.next().ok_or_else(|| anyhow!("Missing output line"))?;
        let output_sizes = parse_segments(&re, line, "output")?;

        let gates = lines
            .enumerate()
            .map(|(gate_id, line)| parse_gate(&re, gate_id, line))
            .collect::<Result<Vec<Gate>, _>>()?;

        if gates.len() != ngates {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "Expecting {ngates} gates, parsed {}",
                gates.len()
            )));
        }

        Circuit::new(gates, nwires, input_sizes, output_sizes)
    }

    /// Load and parse a circuit file in Bristol Fashion format.
    pub fn load(filename: &str) -> Result<Self, CircuitLoadError> {
        let s = fs::read_to_string(filename)?;
        Self::parse(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitint::BitInt;

    #[test]
    fn test_parse_full_adder() {
        let circ = Circuit::load("circuit_files/bristol/full_adder.txt").unwrap();
        assert_eq!(circ.ngates(), 2);
        assert_eq!(circ.nwires(), 4);
        assert_eq!(circ.input_sizes(), vec![1, 1]);
        assert_eq!(circ.output_sizes(), vec![2]);

        let output = circ.eval(&[BitInt::from(1u64), BitInt::from(1u64)]).unwrap();
        assert_eq!(output[0].value(), 2);
    }

    #[test]
    fn test_parse_adder64() {
        let circ = Circuit::load("circuit_files/bristol/adder64.txt").unwrap();

        assert_eq!(circ.ninput_wires(), 128);
        assert_eq!(circ.noutput_wires(), 64);
        assert_eq!(circ.nxor(), 189);
        assert_eq!(circ.nand(), 125);
        assert_eq!(circ.ninv(), 0);

        let cases = [(0u64, 0u64), (1, 0), (0, 1), (1, 1), (15, 26), (u64::MAX, 1)];
        for (a, b) in cases {
            let output = circ.eval(&[BitInt::from(a), BitInt::from(b)]).unwrap();
            assert_eq!(output, vec![BitInt::from(a.wrapping_add(b))]);
        }
    }

    #[test]
    fn test_parse_mult64() {
        let circ = Circuit::load("circuit_files/bristol/mult64.txt").unwrap();
        assert_eq!(circ.ninput_wires(), 128);
        assert_eq!(circ.noutput_wires(), 64);

        let cases = [(7u64, 201u64), (0, 5), (u64::MAX, u64::MAX), (1 << 32, 1 << 32)];
        for (a, b) in cases {
            let output = circ.eval(&[BitInt::from(a), BitInt::from(b)]).unwrap();
            assert_eq!(output, vec![BitInt::from(a.wrapping_mul(b))]);
        }
    }

    #[test]
    fn test_parse_neg8() {
        let circ = Circuit::load("circuit_files/bristol/neg8.txt").unwrap();
        assert_eq!(circ.ninv(), 9);
        for x in 0..=255u8 {
            let output = circ.eval(&[BitInt::from(x)]).unwrap();
            assert_eq!(output[0].value(), x.wrapping_neg() as u64);
        }
    }

    #[test]
    fn test_parse_extended_gates() {
        let s = "2 7\n1 4\n1 2\n\n4 2 0 1 2 3 4 5 MAND\n1 1 4 6 INV\n";
        let circ = Circuit::parse(s).unwrap();
        assert_eq!(circ.gates()[0].op(), Operation::Mand);
        assert_eq!(circ.gates()[0].inputs(), &[0, 1, 2, 3]);
        assert_eq!(circ.gates()[0].outputs(), &[4, 5]);
        assert_eq!(circ.gates()[1].op(), Operation::Not);

        let s = "1 3\n1 2\n1 1\n2 1 0 1 2 EQW\n";
        assert_eq!(Circuit::parse(s).unwrap().gates()[0].op(), Operation::Eqw);
    }

    #[test]
    fn test_reject_malformed() {
        let cases = [
            // Header with three values.
            "1 3 4\n1 2\n1 1\n2 1 0 1 2 XOR\n",
            // Input count disagrees with the listed sizes.
            "1 3\n2 2\n1 1\n2 1 0 1 2 XOR\n",
            // Output count disagrees with the listed sizes.
            "1 3\n1 2\n2 1\n2 1 0 1 2 XOR\n",
            // Gate count disagrees with the gate lines.
            "2 3\n1 2\n1 1\n2 1 0 1 2 XOR\n",
            // Unknown operation.
            "1 3\n1 2\n1 1\n2 1 0 1 2 OR\n",
            // Missing a wire id.
            "1 3\n1 2\n1 1\n2 1 0 1 XOR\n",
            // Too many inputs for a plain gate.
            "1 4\n1 3\n1 1\n3 1 0 1 2 3 AND\n",
            // MAND arity.
            "1 5\n1 3\n1 2\n3 2 0 1 2 3 4 MAND\n",
            // Non numeric field.
            "1 3\n1 2\n1 1\n2 1 0 x 2 XOR\n",
            // MAND output count too large to double.
            "1 3\n1 2\n1 1\n0 9223372036854775808 0 MAND\n",
            // MAND wire counts too large to add.
            "1 3\n1 2\n1 1\n18446744073709551614 9223372036854775807 0 MAND\n",
            // Missing output line.
            "1 3\n1 2\n",
        ];
        for s in cases {
            assert!(
                matches!(Circuit::parse(s), Err(CircuitLoadError::ParsingError(_))),
                "accepted {s:?}"
            );
        }

        // Wire id past nwires, and input sizes whose sum overflows.
        for s in [
            "1 3\n1 2\n1 1\n2 1 0 1 7 XOR\n",
            "0 3\n2 18446744073709551615 1\n1 1\n",
        ] {
            assert!(
                matches!(Circuit::parse(s), Err(CircuitLoadError::InvalidCircuit(_))),
                "accepted {s:?}"
            );
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Circuit::load("circuit_files/bristol/does_not_exist.txt"),
            Err(CircuitLoadError::IoError(_))
        ));
    }
}
