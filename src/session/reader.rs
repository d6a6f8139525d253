//! Background pumps for the child's output pipes

use std::io::{self, Read};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Read `reader` in chunks of at most `chunk_size` bytes on a named thread,
/// handing each chunk to `sink` until EOF, a read error, or `sink` returns
/// `false`.
pub fn spawn_pump<R, F>(name: &str, mut reader: R, chunk_size: usize, mut sink: F) -> io::Result<()>
where
    R: Read + Send + 'static,
    F: FnMut(Vec<u8>) -> bool + Send + 'static,
{
    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            let mut chunk = vec![0u8; chunk_size];
            loop {
                match reader.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => {
                        if !sink(chunk[..n].to_vec()) {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
        })?;

    Ok(())
}

/// Pump `reader` into a channel. The channel disconnects at EOF.
pub fn spawn_reader<R>(name: &str, reader: R, chunk_size: usize) -> io::Result<Receiver<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = channel();
    spawn_pump(name, reader, chunk_size, move |chunk| tx.send(chunk).is_ok())?;
    Ok(rx)
}
