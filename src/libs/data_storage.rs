use std::env::var;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::{fs, str};

/// Dot-directory under the user's home holding the config file and any
/// exported artifacts the operator asks to drop there.
pub const APP_DIR: &str = ".paymo";

#[derive(Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        // USERPROFILE covers Windows; HOME everything else.
        let home = var("HOME").or_else(|_| var("USERPROFILE")).unwrap_or_else(|_| ".".into());
        let base_path = Path::new(&home).join(APP_DIR);

        Self { base_path }
    }

    pub fn get_path(&self, file_name: &str) -> Result<PathBuf, Box<dyn Error>> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
