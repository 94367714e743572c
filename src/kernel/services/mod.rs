//! Services: `ports` hold the contracts the kernel and session speak in,
//! `adapters` implement them against the OS (processes, browser, files).

pub mod adapters;
pub mod ports;
