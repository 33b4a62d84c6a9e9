//! `eqsynth clean`: remove the persisted generation cache.

use crate::project::Project;
use crate::GlobalArgs;

/// Runs the `eqsynth clean` command.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::open(global)?;
    let store = project.cache_store();
    let removed = store.clear()?;
    if !global.quiet {
        if removed {
            eprintln!("   Removed {}", store.dir().display());
        } else {
            eprintln!("   Nothing to clean");
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn removes_cache_directory_only() {
        let tmp = TempDir::new().unwrap();
        let cache_dir = tmp.path().join(".eqsynth");
        fs::create_dir_all(&cache_dir).unwrap();
        fs::write(cache_dir.join("manifest.json"), "{}").unwrap();
        fs::create_dir_all(tmp.path().join("generated")).unwrap();

        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(tmp.path().to_str().unwrap().to_string()),
        };
        assert_eq!(run(&global).unwrap(), 0);
        assert!(!cache_dir.exists());
        assert!(tmp.path().join("generated").exists());
        // A second clean has nothing to do.
        assert_eq!(run(&global).unwrap(), 0);
    }
}
