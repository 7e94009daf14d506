//! Default value functions for configuration

pub fn default_true() -> bool {
    true
}

pub fn default_max_rounds() -> u32 {
    32
}

pub fn default_initial_delay_ms() -> u64 {
    100
}

pub fn default_max_delay_ms() -> u64 {
    30_000
}

pub fn default_multiplier() -> f64 {
    2.0
}
