pub mod files;
pub mod settings;

pub use files::{atomic_write, config_file, find_local_dir, get_config_dir, init_local_dir, read_optional};
pub use settings::{load_config, save_config, Config};
