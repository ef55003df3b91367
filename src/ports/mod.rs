/// Ports module defining interfaces for hexagonal architecture
///
/// The application core talks to the classification service, the session
/// store and the console only through these outbound (driven) ports.
pub mod outbound;
