use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::Path;
use crate::core::error::{Error, ErrorKind, Result};

pub fn open_lines(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::Io, format!("cannot open {}: {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

/// Raw lines without their `\n` or `\r\n` terminator. Lines are not decoded
/// here, so invalid UTF-8 is left for the caller to count, not to abort on.
pub fn byte_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            bytes
        })
    })
}

/// Read every line of `path` up front so workers can share the list.
pub fn read_lines(path: &Path) -> Result<Vec<Vec<u8>>> {
    let mut lines = Vec::new();
    for line in byte_lines(open_lines(path)?) {
        lines.push(line?);
    }
    Ok(lines)
}

/// Truncating, buffered result sink.
pub fn create_sink(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        Error::new(ErrorKind::Io, format!("cannot create {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
