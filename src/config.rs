//! Application-level configuration constants.

// Distance slider (miles)
pub const DISTANCE_MIN: u32 = 0;
pub const DISTANCE_MAX: u32 = 600;
pub const DISTANCE_STEP: u32 = 10;
pub const DISTANCE_PRESETS: [u32; 4] = [50, 100, 250, 600];

// Reviews slider
pub const REVIEWS_MIN: u32 = 0;
pub const REVIEWS_MAX: u32 = 50;
pub const REVIEWS_STEP: u32 = 1;

// Tier badges: (data value, caption)
pub const TIER_BADGES: [(&str, &str); 4] = [
    ("all", "All Tiers"),
    ("1", "Tier 1"),
    ("2", "Tier 2"),
    ("3", "Tier 3"),
];

// UI constants
pub const THUMB_WIDTH_PX: f64 = 20.0;
pub const PAGE_TITLE: &str = "600-Mile Contractors";
