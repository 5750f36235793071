use assert_cmd::Command;
use std::fs::{self, File};
use std::io::Read;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::ZipArchive;

/// Isolated project layout for one test: a frontend tree, an android tree,
/// and a staging directory, all inside a private temp dir.
pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self::bare();
        fs::create_dir_all(env.frontend()).expect("create frontend tree");
        fs::create_dir_all(env.root.join("android")).expect("create android tree");
        env
    }

    /// A project root with no frontend or android tree at all.
    pub fn bare() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("project");
        fs::create_dir_all(&root).expect("create project root");
        Self { _tmp: tmp, root }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("assetpack").unwrap();
        cmd.arg("--path")
            .arg(&self.root)
            .arg("--staging")
            .arg(self.staging());
        cmd
    }

    pub fn frontend(&self) -> PathBuf {
        self.root.join("frontend")
    }

    pub fn staging(&self) -> PathBuf {
        self.root.join("staging")
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root
            .join("android")
            .join("app")
            .join("src")
            .join("main")
            .join("assets")
            .join("app.zip")
    }

    /// Write a file under the frontend tree, creating parent directories.
    pub fn write_resource(&self, relative: &str, contents: &[u8]) {
        let path = self.frontend().join(relative);
        fs::create_dir_all(path.parent().unwrap()).expect("create resource dir");
        fs::write(path, contents).expect("write resource file");
    }

    /// Entry names of the produced archive, sorted.
    pub fn archive_entries(&self) -> Vec<String> {
        let mut archive =
            ZipArchive::new(File::open(self.archive_path()).expect("open archive")).expect("read archive");
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Contents of one archive entry.
    pub fn archive_entry(&self, name: &str) -> Vec<u8> {
        let mut archive =
            ZipArchive::new(File::open(self.archive_path()).expect("open archive")).expect("read archive");
        let mut buffer = Vec::new();
        archive
            .by_name(name)
            .expect("entry present")
            .read_to_end(&mut buffer)
            .expect("read entry");
        buffer
    }
}
