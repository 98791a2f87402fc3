use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::RwLock;

/// A price, kept at 32-bit float precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dollars(f32);

impl Dollars {
    pub fn new(amount: f32) -> Dollars {
        Dollars(amount)
    }

    pub fn amount(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid price: {0:?}")]
pub struct InvalidPrice(pub String);

impl FromStr for Dollars {
    type Err = InvalidPrice;

    // Anything that overflows f32 comes back as infinity, so the finiteness
    // check also rejects out-of-range text.
    fn from_str(text: &str) -> Result<Dollars, InvalidPrice> {
        match text.parse::<f32>() {
            Ok(amount) if amount.is_finite() => Ok(Dollars(amount)),
            _ => Err(InvalidPrice(text.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub price: Dollars,
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("no such item: {0:?}")]
    NotFound(String),
    #[error("Item {name} already exists with price {existing}")]
    Conflict { name: String, existing: Dollars },
    #[error("Provided price {0:?} is invalid")]
    InvalidValue(String),
}

impl From<InvalidPrice> for StoreError {
    fn from(err: InvalidPrice) -> StoreError {
        StoreError::InvalidValue(err.0)
    }
}

/// Item name to price mapping behind a single reader/writer lock.
///
/// `list` and `read` share the lock, every mutation takes it exclusively.
/// Guards never outlive the method that acquired them, so a failed operation
/// leaves the mapping exactly as it found it.
pub struct Store {
    inner: RwLock<HashMap<String, Dollars>>,
}

impl Store {
    pub fn new() -> Store {
        Store {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_records<I>(records: I) -> Store
    where
        I: IntoIterator<Item = (String, Dollars)>,
    {
        Store {
            inner: RwLock::new(records.into_iter().collect()),
        }
    }

    /// Snapshot of every entry, in no particular order.
    pub async fn list(&self) -> Vec<Record> {
        let inner = self.inner.read().await;
        inner
            .iter()
            .map(|(name, price)| Record {
                name: name.clone(),
                price: *price,
            })
            .collect()
    }

    pub async fn read(&self, name: &str) -> Result<Dollars, StoreError> {
        let inner = self.inner.read().await;
        inner
            .get(name)
            .copied()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Inserts a new item. An existing item is reported as a conflict before
    /// the price text is looked at.
    pub async fn create(&self, name: &str, price: &str) -> Result<Record, StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.get(name) {
            return Err(StoreError::Conflict {
                name: name.to_string(),
                existing: *existing,
            });
        }
        let price = price.parse::<Dollars>()?;
        inner.insert(name.to_string(), price);
        Ok(Record {
            name: name.to_string(),
            price,
        })
    }

    pub async fn update(&self, name: &str, price: &str) -> Result<Record, StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let price = price.parse::<Dollars>()?;
        *slot = price;
        Ok(Record {
            name: name.to_string(),
            price,
        })
    }

    pub async fn delete(&self, name: &str) -> Result<String, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.remove_entry(name) {
            Some((name, _)) => Ok(name),
            None => Err(StoreError::NotFound(name.to_string())),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
