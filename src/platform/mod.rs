// Platform-specific code module

pub mod gpu;
