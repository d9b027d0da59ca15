//! Domain layer: the heartbeat cycle as plain data.

pub mod heartbeat;
