use std::path::Path;

use explainbot_core::sample::sample_files;

use crate::prelude::{println, *};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SamplesOptions {
    /// Directory the sample corpus is written to
    #[arg(default_value = "data/error_codes")]
    pub dir: String,
}

pub async fn run(options: SamplesOptions, global: crate::Global) -> Result<()> {
    let written = ensure_samples(Path::new(&options.dir))?;

    if written == 0 {
        println!("Sample corpus already present in {}", options.dir);
    } else {
        println!("Created {written} sample files in {}", options.dir);
    }

    if global.verbose {
        for sample in sample_files() {
            println!("  {}", Path::new(&options.dir).join(sample.name).display());
        }
    }

    Ok(())
}

/// Write the bundled corpus into `dir`, creating the directory when
/// absent. Files that already exist are left untouched, so a second run
/// changes nothing on disk. Returns the number of files actually written.
pub fn ensure_samples(dir: &Path) -> Result<usize, Error> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::FileSystem(f!("cannot create {}: {e}", dir.display())))?;

    let mut written = 0;
    for sample in sample_files() {
        let path = dir.join(sample.name);
        if path.exists() {
            continue;
        }
        std::fs::write(&path, sample.body)
            .map_err(|e| Error::FileSystem(f!("cannot write {}: {e}", path.display())))?;
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| {
                let entry = entry.unwrap();
                (
                    entry.file_name().to_string_lossy().into_owned(),
                    std::fs::read(entry.path()).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_ensure_samples_populates_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("error_codes");

        let written = ensure_samples(&target).unwrap();

        assert_eq!(written, sample_files().len());
        assert!(target.join("syntax_error.py").is_file());
        assert!(target.join("logic_error.py").is_file());
    }

    #[test]
    fn test_ensure_samples_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();

        let first = ensure_samples(dir.path()).unwrap();
        let after_first = snapshot(dir.path());

        let second = ensure_samples(dir.path()).unwrap();
        let after_second = snapshot(dir.path());

        assert_eq!(first, sample_files().len());
        assert_eq!(second, 0);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_ensure_samples_never_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let edited = dir.path().join("syntax_error.py");
        std::fs::write(&edited, "# my own notes").unwrap();

        ensure_samples(dir.path()).unwrap();

        assert_eq!(std::fs::read_to_string(&edited).unwrap(), "# my own notes");
        // The rest of the corpus is still filled in around it.
        assert!(dir.path().join("index_error.py").is_file());
    }
}
