//! Configuration system for Agora.
//! TOML-based; unset fields resolve to engine defaults.

pub mod engine_config;

pub use engine_config::EngineConfig;
