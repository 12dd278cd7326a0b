// historymidi services
// The mapping core (normalizer, stable hash, event mapper) plus the config
// loader and MIDI writer around it.

pub mod config_loader;
pub mod event_mapper;
pub mod midi_writer;
pub mod normalizer;
pub mod stable_hash;
