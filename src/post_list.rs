use std::{fs, io};
use std::path::{Path, PathBuf};

pub const POST_EXTENSION: &str = "md";

/// Markdown post files below a root directory.
pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: &Path) -> Self {
        PostList { root_dir: root_dir.to_path_buf() }
    }

    /// All `.md` files below the root, recursively, in path order.
    /// Entries whose name starts with `_` or `.` are skipped, directories
    /// included.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        Self::collect_files(&self.root_dir, &mut posts)?;
        posts.sort();
        Ok(posts)
    }

    fn collect_files(dir: &Path, posts: &mut Vec<PathBuf>) -> io::Result<()> {
        let entries = fs::read_dir(dir)?;
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if Self::is_hidden(&file_name) {
                continue;
            }

            let file_type = entry.file_type()?;
            let path = entry.path();
            if file_type.is_dir() {
                Self::collect_files(&path, posts)?;
            } else if file_type.is_file() && Self::is_post_file(&path) {
                posts.push(path);
            }
        }
        Ok(())
    }

    fn is_hidden(file_name: &str) -> bool {
        file_name.starts_with('_') || file_name.starts_with('.')
    }

    fn is_post_file(path: &Path) -> bool {
        path.extension().map_or(false, |ext| ext == POST_EXTENSION)
    }
}
