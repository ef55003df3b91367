/// Scan submission domain layer
///
/// Pure business logic for the document scanning workflow: value objects,
/// the file/failure/retry policies and result normalization. Nothing in
/// this module performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
