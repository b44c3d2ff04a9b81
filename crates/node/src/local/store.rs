//! Transaction storage of the built-in node.

use crate::Transaction;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

const TX_TREE: &[u8] = b"tx";

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid txid '{0}': expected 64 hex characters")]
    InvalidTxid(String),

    #[error("invalid raw transaction: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("raw transaction is empty")]
    EmptyTransaction,

    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),
}

/// Transaction hash in internal byte order.
///
/// Displayed and parsed byte-reversed, the way block explorers show txids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Txid([u8; 32]);

impl Txid {
    /// Double SHA-256 of the raw transaction.
    pub fn from_raw_tx(raw: &[u8]) -> Self {
        let first = Sha256::digest(raw);
        Self(Sha256::digest(first).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl FromStr for Txid {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidTxid(s.to_string());
        if s.len() != 64 {
            return Err(invalid());
        }

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| invalid())?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

/// Raw transactions keyed by [`Txid`]
#[derive(Clone)]
pub struct TxStore {
    db: sled::Db,
    txs: sled::Tree,
}

impl TxStore {
    /// Opens (or creates) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::from_db(sled::open(path)?)
    }

    /// Opens a store that is discarded on drop.
    pub fn temporary() -> Result<Self, StoreError> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: sled::Db) -> Result<Self, StoreError> {
        let txs = db.open_tree(TX_TREE)?;
        Ok(Self { db, txs })
    }

    /// Stores a raw transaction and returns its txid.
    pub fn insert_raw(&self, raw: &[u8]) -> Result<Txid, StoreError> {
        if raw.is_empty() {
            return Err(StoreError::EmptyTransaction);
        }

        let txid = Txid::from_raw_tx(raw);
        self.txs.insert(txid.as_bytes(), raw)?;
        Ok(txid)
    }

    pub fn insert_hex(&self, raw_hex: &str) -> Result<Txid, StoreError> {
        let raw = hex::decode(raw_hex.trim())?;
        self.insert_raw(&raw)
    }

    pub fn get(&self, txid: &Txid) -> Result<Option<Transaction>, StoreError> {
        Ok(self.txs.get(txid.as_bytes())?.map(|raw| Transaction {
            txid: txid.to_string(),
            hex: hex::encode(raw),
        }))
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    /// Flushes dirty data to disk, returning the number of bytes written.
    pub async fn flush(&self) -> Result<usize, StoreError> {
        Ok(self.db.flush_async().await?)
    }
}
