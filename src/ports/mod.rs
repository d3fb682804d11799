/// Ports module defining interfaces for hexagonal architecture
///
/// This module contains the outbound ports (driven ports) through which
/// the application core talks to the console and the reporting platform.
pub mod outbound;
