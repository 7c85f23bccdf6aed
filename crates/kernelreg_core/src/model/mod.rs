//! Domain records for discovered environments and kernel descriptors.

pub mod environment;
pub mod kernel_spec;
