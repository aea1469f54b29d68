use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command as Process, Stdio};

use gtp::{Command, CommandKind, Response};
use serde::Deserialize;
use tracing::{debug, trace, warn};

/// How to launch an engine, loaded from a JSON file.
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerConfig {
    /// Short name used in logs and results.
    pub nick: String,
    /// Path of the executable.
    pub cmd: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Something that answers commands, usually an engine process.
pub trait Connection {
    fn name(&self) -> &str;

    /// Sends one command and waits for the complete reply.
    fn send(&mut self, cmd: &Command) -> anyhow::Result<Response>;
}

/// An engine running as a child process, talking through its stdin/stdout.
pub struct Player {
    pub name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after send().
    buf: String,
}

impl Player {
    pub fn new(name: &str, executable_path: &str, args: &[String]) -> anyhow::Result<Self> {
        let mut child = Process::new(executable_path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            anyhow::bail!("Could not access stdin/stdout of '{}'", executable_path);
        };

        Ok(Self {
            name: String::from(name),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        let mut player = Self::new(&config.nick, &config.cmd, &config.args)?;
        check_identity(&mut player)?;
        Ok(player)
    }
}

/// Asks for the engine's name and version, failing unless both are answered successfully.
pub fn check_identity<C: Connection>(player: &mut C) -> anyhow::Result<()> {
    for kind in [CommandKind::Name, CommandKind::Version] {
        let cmd = Command::new(kind, Vec::<String>::new());
        let response = player.send(&cmd)?;
        if !response.is_success() {
            anyhow::bail!("{} did not answer {}: {}", player.name(), cmd, response.body);
        }
        debug!(player = player.name(), command = ?kind, reply = %response.body, "Engine identity");
    }
    Ok(())
}

impl Connection for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&mut self, cmd: &Command) -> anyhow::Result<Response> {
        let line = format!("{}\n", cmd);
        trace!(name: "Sending command", player = &self.name, command = %cmd);
        self.stdin.write_all(line.as_bytes())?;
        self.stdin.flush()?;
        let response = read_response(&mut self.stdout, &mut self.buf)?;
        trace!(name: "Received response", player = &self.name, response = %response);
        Ok(response)
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        let quit = Command::new(CommandKind::Quit, Vec::<String>::new());
        if let Err(err) = self.send(&quit) {
            warn!(player = &self.name, %err, "Engine did not acknowledge quit");
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

/// Reads one reply block, i.e. everything up to the next blank line.
pub fn read_response<R: BufRead>(reader: &mut R, buf: &mut String) -> anyhow::Result<Response> {
    buf.clear();
    loop {
        let len_before = buf.len();
        let num_bytes_read = reader.read_line(buf)?;
        if num_bytes_read == 0 {
            anyhow::bail!("Engine closed its output before finishing a reply");
        }
        let line = buf[len_before..].trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            if buf[..len_before].trim().is_empty() {
                // Blank lines before a reply carry no meaning
                buf.clear();
                continue;
            }
            break;
        }
    }
    let response = Response::parse(buf)?;
    buf.clear();
    Ok(response)
}
