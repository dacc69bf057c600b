//! Access to a running hostapd through its control interface.
//!
//! hostapd exposes one control socket per managed interface below a control
//! directory (usually `/run/hostapd`). This module discovers which interface to
//! monitor and queries it through `hostapd_cli`.
mod client;
mod error;
mod resolver;

pub use client::{ControlClient, ControlInterface, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use resolver::{
    InterfaceResolver, ManagedInterface, RESOLVE_INTERVAL, list_interfaces, resolve,
};
