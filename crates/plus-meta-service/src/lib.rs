//! Component metadata service.
//!
//! Wraps manifest loading, the component index, snippet generation, the
//! example catalog and usage validation behind one handle. The manifest is
//! loaded lazily on first use, exactly once, and the resulting snapshot is
//! shared read-only by every query afterwards.

pub mod service;

pub use service::{ComponentService, LoadError, ServiceConfig, ServiceError, Snapshot};
