use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::{generate_message_id, Category, Message, StoreError};

/// One persisted line. Field names and order match the historical
/// `messages.json` format; `messageID` is an extension appended last so
/// older four-field lines still decode (absent fields fall back to empty).
#[derive(serde::Deserialize, serde::Serialize)]
struct StoredMessage {
    #[serde(rename = "messageHash", default)]
    message_hash: String,
    #[serde(default)]
    recipient: String,
    #[serde(default)]
    message: String,
    #[serde(rename = "messageType", default)]
    message_type: Category,
    #[serde(rename = "messageID", default)]
    message_id: String,
}

impl StoredMessage {
    fn from_message(message: &Message) -> Self {
        Self {
            message_hash: message.get_message_hash().to_string(),
            recipient: message.get_recipient().to_string(),
            message: message.get_message().to_string(),
            message_type: message.get_message_type(),
            message_id: message.get_message_id().to_string(),
        }
    }

    fn into_message(self) -> Message {
        // Lines written before messageID was persisted get a fresh id; the
        // hash is always preserved verbatim.
        let message_id = if self.message_id.is_empty() {
            generate_message_id()
        } else {
            self.message_id
        };
        Message::from_stored(
            message_id,
            self.message_hash,
            self.recipient,
            self.message,
            self.message_type,
        )
    }
}

/// Append-friendly, line-oriented JSON message store: one object per line,
/// each line independently parseable.
pub struct MessageStore {
    path: PathBuf,
}

impl MessageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize one message as a single JSON line and append it, creating
    /// the file on first use. Callers treat failure as a non-fatal warning.
    pub fn append(&self, message: &Message) -> Result<(), StoreError> {
        let line = serde_json::to_string(&StoredMessage::from_message(message))?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Read every line back into messages. A missing file reads as empty;
    /// malformed lines are skipped with a warning, never a crash.
    pub fn read_all(&self) -> Result<Vec<Message>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let mut messages = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StoredMessage>(&line) {
                Ok(record) => messages.push(record.into_message()),
                Err(err) => log::warn!(
                    "skipping malformed line {} in {}: {err}",
                    index + 1,
                    self.path.display()
                ),
            }
        }
        Ok(messages)
    }
}
