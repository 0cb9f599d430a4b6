use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use crate::protocol::{respond_bytes, ServiceConfig};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeStats {
    pub served: usize,
    pub rejected: usize,
}

fn trim_line(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Answers one JSON request per input line with one JSON response line.
///
/// Rejected requests, including lines that are not UTF-8, get an error
/// response and the loop carries on; only I/O failures on `reader` or
/// `writer` end it early.
pub fn serve<R: BufRead, W: Write>(mut reader: R, mut writer: W, config: &ServiceConfig) -> io::Result<ServeStats> {
    let mut stats = ServeStats::default();
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = trim_line(&buf);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let (body, error) = respond_bytes(line, config);
        match error {
            Some(err) => {
                stats.rejected += 1;
                warn!(line = line_no, code = err.code(), "{err}");
            }
            None => {
                stats.served += 1;
                debug!(line = line_no, bytes = body.len(), "served");
            }
        }
        writeln!(writer, "{body}")?;
        writer.flush()?;
    }
    info!(served = stats.served, rejected = stats.rejected, "input closed");
    Ok(stats)
}
