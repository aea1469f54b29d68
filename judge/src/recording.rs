use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Collects the commands sent during a game and writes them to one JSON file per game.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    exchanges: Vec<Exchange>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            exchanges: Vec::new(),
        })
    }

    pub fn store_exchange(&mut self, player: &str, command: String, response: String) {
        self.exchanges.push(Exchange {
            player: String::from(player),
            command,
            response,
        });
    }

    pub fn write_game_recording(&mut self) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(filepath)?);
        serde_json::to_writer_pretty(&mut writer, &std::mem::take(&mut self.exchanges))?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(())
    }
}

/// One command and the reply to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub player: String,
    pub command: String,
    pub response: String,
}
