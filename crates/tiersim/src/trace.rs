//! Request trace files, parsed with nom
//!
//! Format, one request per line:
//! ```text
//! # comment
//! R 12
//! W 7
//! W 7 some payload text
//! W 7 "  padded\x00\xff"
//! ```
//!
//! Ops are case-insensitive. A write without payload lets the engine
//! synthesize one. Blank lines and `#` comment lines are skipped. Lines are
//! trimmed, so a bare payload cannot keep leading or trailing whitespace; a
//! double-quoted payload keeps its exact bytes and understands `\\`, `\"`,
//! `\n`, `\r`, `\t` and `\xHH` escapes.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag_no_case, take_while_m_n},
    character::complete::{char, space1, u64 as address},
    combinator::{all_consuming, map, map_res, opt, rest, value},
    multi::fold_many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use tiercache::{Error, Op, Request, Result};

fn read_request(input: &str) -> IResult<&str, Request> {
    map(preceded(pair(tag_no_case("R"), space1), address), Request::read)(input)
}

fn escape(input: &str) -> IResult<&str, Vec<u8>> {
    preceded(
        char('\\'),
        alt((
            value(vec![b'\\'], char('\\')),
            value(vec![b'"'], char('"')),
            value(vec![b'\n'], char('n')),
            value(vec![b'\r'], char('r')),
            value(vec![b'\t'], char('t')),
            map_res(
                preceded(char('x'), take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit())),
                |hex: &str| u8::from_str_radix(hex, 16).map(|b| vec![b]),
            ),
        )),
    )(input)
}

fn quoted(input: &str) -> IResult<&str, Vec<u8>> {
    delimited(
        char('"'),
        fold_many0(
            alt((map(is_not("\\\""), |s: &str| s.as_bytes().to_vec()), escape)),
            Vec::new,
            |mut acc: Vec<u8>, chunk| {
                acc.extend_from_slice(&chunk);
                acc
            },
        ),
        char('"'),
    )(input)
}

fn payload(input: &str) -> IResult<&str, Vec<u8>> {
    alt((quoted, map(rest, |s: &str| s.as_bytes().to_vec())))(input)
}

fn write_request(input: &str) -> IResult<&str, Request> {
    map(
        tuple((tag_no_case("W"), space1, address, opt(preceded(space1, payload)))),
        |(_, _, addr, data)| Request::write(addr, data),
    )(input)
}

/// Parse a single trace line (already trimmed, not a comment)
pub fn parse_request(input: &str) -> IResult<&str, Request> {
    all_consuming(alt((read_request, write_request)))(input)
}

/// Parse a whole trace
pub fn parse_trace(text: &str) -> Result<Vec<Request>> {
    let mut requests = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (_, request) = parse_request(line).map_err(|_| Error::Parse {
            line: idx + 1,
            msg: format!("expected 'R <addr>' or 'W <addr> [payload]', got '{}'", line),
        })?;
        requests.push(request);
    }

    Ok(requests)
}

/// Read and parse a trace file
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<Request>> {
    let text = fs::read_to_string(path)?;
    parse_trace(&text)
}

/// True if a bare payload would not read back byte for byte
fn needs_quoting(data: &[u8]) -> bool {
    match std::str::from_utf8(data) {
        Ok(text) => {
            text.is_empty()
                || text.starts_with('"')
                || text.trim() != text
                || text.chars().any(char::is_control)
        }
        Err(_) => true,
    }
}

fn quote(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() + 2);
    out.push('"');
    for &byte in data {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out.push('"');
    out
}

/// Render one request as a trace line
pub fn format_request(request: &Request) -> String {
    match (request.op, &request.data) {
        (Op::Write, Some(data)) if needs_quoting(data) => {
            format!("{} {} {}", request.op, request.address, quote(data))
        }
        (Op::Write, Some(data)) => format!(
            "{} {} {}",
            request.op,
            request.address,
            String::from_utf8_lossy(data)
        ),
        _ => format!("{} {}", request.op, request.address),
    }
}

/// Write requests as a trace file that [`read_trace`] can replay
pub fn write_trace<P: AsRef<Path>>(path: P, requests: &[Request]) -> Result<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    for request in requests {
        writeln!(out, "{}", format_request(request))?;
    }
    out.flush()?;
    Ok(())
}
