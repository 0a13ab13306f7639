use std::sync::atomic::{AtomicUsize, Ordering};

use crate::utils::ProducerError;

/// Splits a `host:port;host:port` list into broker base URLs.
///
/// Entries may already carry an `http://` or `https://` scheme; bare
/// entries get `http://`. Trailing slashes are dropped.
pub fn parse_addresses(raw: &str) -> Result<Vec<String>, ProducerError> {
    let addresses: Vec<String> = raw
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let entry = entry.trim_end_matches('/');
            if entry.starts_with("http://") || entry.starts_with("https://") {
                entry.to_string()
            } else {
                format!("http://{}", entry)
            }
        })
        .collect();

    if addresses.is_empty() {
        return Err(ProducerError::invalid_argument(format!(
            "no EventMesh address in {:?}",
            raw
        )));
    }
    Ok(addresses)
}

/// Round-robin choice among the configured brokers.
///
/// The cursor is the only state a producer mutates after construction and is
/// a plain atomic, so concurrent calls never block each other.
#[derive(Debug)]
pub struct AddressSelector {
    addresses: Vec<String>,
    cursor: AtomicUsize,
}

impl AddressSelector {
    /// `addresses` must not be empty; [`parse_addresses`] guarantees that.
    pub fn new(addresses: Vec<String>) -> Self {
        Self {
            addresses,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn pick(&self) -> Option<&str> {
        if self.addresses.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.addresses.len();
        Some(&self.addresses[index])
    }
}
