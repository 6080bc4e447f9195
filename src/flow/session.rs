use super::definition::FlowData;
use crate::error::SessionError;
use crate::history::History;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// Everything needed to resume an editing session: the live flow, its undo history and
/// the id counter that keeps node ids from being reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub flow: FlowData,
    pub history: History,
    pub next_ordinal: u64,
}

impl Session {
    pub fn new(flow: FlowData, history: History, next_ordinal: u64) -> Self {
        Self {
            flow,
            history,
            next_ordinal,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        encode_to_vec(self, standard()).map_err(|e| SessionError::Encode(e.to_string()))
    }

    /// Saves the session to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), SessionError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path)
            .map_err(|e| SessionError::Io(format!("Could not create file '{}': {}", path, e)))?;
        file.write_all(&bytes)
            .map_err(|e| SessionError::Io(format!("Could not write to file '{}': {}", path, e)))?;
        Ok(())
    }

    /// Loads a session from a file.
    pub fn from_file(path: &str) -> Result<Self, SessionError> {
        let mut file = fs::File::open(path)
            .map_err(|e| SessionError::Io(format!("Could not open file '{}': {}", path, e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| SessionError::Io(format!("Could not read from file '{}': {}", path, e)))?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes a session. Rejects histories whose cursor does not address an entry,
    /// and histories whose current entry is not the saved flow.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SessionError> {
        let (session, _): (Session, usize) =
            decode_from_slice(bytes, standard()).map_err(|e| SessionError::Decode(e.to_string()))?;
        if !session.history.is_consistent() {
            return Err(SessionError::Decode(
                "history cursor is out of range".to_string(),
            ));
        }
        if session.history.current() != Some(&session.flow) {
            return Err(SessionError::Decode(
                "history does not match the saved flow".to_string(),
            ));
        }
        Ok(session)
    }
}
