use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// `<home>/<name>`, created when missing. Safe to call repeatedly.
pub fn ensure(home: &Path, name: &str) -> io::Result<PathBuf> {
    let workspace = home.join(name);
    fs::create_dir_all(&workspace)?;
    Ok(workspace)
}
