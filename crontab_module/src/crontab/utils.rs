use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::errors::CrontabError;

pub(super) fn tail_string(input: &str, max_len: usize) -> String {
    let trimmed = input.trim();
    if trimmed.len() <= max_len {
        return trimmed.to_string();
    }
    let mut start = trimmed.len().saturating_sub(max_len);
    while start < trimmed.len() && !trimmed.is_char_boundary(start) {
        start += 1;
    }
    trimmed[start..].to_string()
}

pub(super) fn combined_output(output: &Output) -> String {
    let mut combined = String::new();
    combined.push_str(&String::from_utf8_lossy(&output.stdout));
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    tail_string(&combined, 2000)
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_drain(handle: JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("output reader thread panicked")))
}

fn collect_output(
    status: ExitStatus,
    stdout: JoinHandle<io::Result<Vec<u8>>>,
    stderr: JoinHandle<io::Result<Vec<u8>>>,
) -> io::Result<Output> {
    Ok(Output {
        status,
        stdout: join_drain(stdout)?,
        stderr: join_drain(stderr)?,
    })
}

fn feed_stdin(child: &mut Child, input: &str) -> io::Result<()> {
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(input.as_bytes()) {
            // The child may exit without reading; its exit status reports why.
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
            other => other?,
        }
    }
    Ok(())
}

/// Runs `cmd`, optionally feeding `input` on stdin, and kills it once `timeout` elapses.
///
/// stdout and stderr are drained on their own threads while the child runs, so output
/// larger than the pipe buffer cannot stall it.
pub(super) fn run_command_with_timeout(
    mut cmd: Command,
    input: Option<&str>,
    timeout: Duration,
    label: &str,
) -> Result<Output, CrontabError> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    if input.is_some() {
        cmd.stdin(Stdio::piped());
    } else {
        cmd.stdin(Stdio::null());
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(CrontabError::CommandNotFound {
                command: label.to_string(),
            })
        }
        Err(err) => return Err(CrontabError::Io(err)),
    };

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    if let Some(input) = input {
        if let Err(err) = feed_stdin(&mut child, input) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CrontabError::Io(err));
        }
    }

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return collect_output(status, stdout, stderr).map_err(CrontabError::Io);
        }

        if start.elapsed() >= timeout {
            let _ = child.kill();
            let status = child.wait()?;
            let output = collect_output(status, stdout, stderr)?;
            return Err(CrontabError::CommandTimeout {
                command: label.to_string(),
                timeout_secs: timeout.as_secs(),
                output: combined_output(&output),
            });
        }

        thread::sleep(Duration::from_millis(20));
    }
}
