//! Local Hardware Address
//!
//! Derives a default uid from the first network interface that has a real
//! hardware address.

use mac_address::MacAddressIterator;
use tracing::{debug, warn};

use crate::error::{SdkError, SdkResult};

/// First non-empty hardware address on this host, or `""`.
///
/// Enumeration failures are logged, never raised.
pub fn local_mac() -> String {
    match try_local_mac() {
        Ok(Some(mac)) => mac,
        Ok(None) => {
            warn!("No network interface with a hardware address found");
            String::new()
        }
        Err(e) => {
            warn!("Get local mac failed: {}", e);
            String::new()
        }
    }
}

/// Structured form of [`local_mac`]
pub fn try_local_mac() -> SdkResult<Option<String>> {
    let interfaces = MacAddressIterator::new().map_err(|e| SdkError::Interfaces(e.to_string()))?;
    let mac = first_hardware_address(interfaces.map(|addr| addr.bytes()));
    if let Some(ref mac) = mac {
        debug!("Using hardware address {} as uid", mac);
    }
    Ok(mac)
}

/// Pick the first address that renders to something non-empty.
///
/// Loopback and virtual interfaces report an all-zero address, which is
/// treated as having none.
pub fn first_hardware_address<I>(addresses: I) -> Option<String>
where
    I: IntoIterator<Item = [u8; 6]>,
{
    addresses.into_iter().find_map(|bytes| {
        let rendered = render_mac(&bytes);
        (!rendered.is_empty()).then_some(rendered)
    })
}

/// Lowercase colon-separated hex, empty for an all-zero address
pub fn render_mac(bytes: &[u8]) -> String {
    if bytes.iter().all(|b| *b == 0) {
        return String::new();
    }
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}
