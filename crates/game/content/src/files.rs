//! File names inside a content data directory.

pub const CONFIG: &str = "config.toml";
pub const JOBS: &str = "jobs.ron";
pub const SKILLS: &str = "skills.ron";
pub const BIOMES: &str = "biomes.ron";

/// Every file a complete data directory must contain.
pub const REQUIRED: [&str; 4] = [CONFIG, JOBS, SKILLS, BIOMES];
