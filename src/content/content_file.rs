use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::content::PostId;

pub struct ContentFile {
    pub link: PostId,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(root_dir: &Path, file_path: PathBuf) -> io::Result<ContentFile> {
        let link = Self::link_from_path(root_dir, &file_path)?;
        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ContentFile {
            link,
            file_path,
            raw_content,
        })
    }

    /// `posts/2024/hello-world.md` below `posts` becomes `2024/hello-world`.
    pub fn link_from_path(root_dir: &Path, file_path: &Path) -> io::Result<PostId> {
        let relative = file_path.strip_prefix(root_dir).unwrap_or(file_path);
        let relative = relative.with_extension("");

        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();

        if parts.is_empty() {
            return Err(io::Error::new(ErrorKind::InvalidInput, format!("Invalid post path {}", file_path.display())));
        }

        Ok(PostId(parts.join("/")))
    }
}
