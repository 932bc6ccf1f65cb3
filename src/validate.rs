//! SEO checks of post descriptions.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use spdlog::{error, info, warn};

use crate::config::Validation;
use crate::content::front_matter::parse_front_matter;
use crate::post_list::PostList;

/// The fields the checks need. Everything is optional so that a post with
/// gaps is reported instead of rejected.
#[derive(Debug, Default, Deserialize)]
struct MetaFrontMatter {
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    draft: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Path relative to the posts directory.
    pub file: PathBuf,
    pub errors: Vec<String>,
    pub skipped: bool,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub files: Vec<FileReport>,
    /// Descriptions shared by more than one post, with the posts using them.
    pub duplicates: Vec<(String, Vec<PathBuf>)>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| !f.errors.is_empty())
    }

    pub fn validated_count(&self) -> usize {
        self.files.iter().filter(|f| !f.skipped).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.iter().filter(|f| f.skipped).count()
    }

    /// Duplicate descriptions worth a warning. Errors take precedence: a
    /// failing run reports only its errors.
    pub fn reported_duplicates(&self) -> &[(String, Vec<PathBuf>)] {
        if self.has_errors() {
            &[]
        } else {
            &self.duplicates
        }
    }

    /// Errors, or duplicate warnings when there are none, then a summary line.
    pub fn log(&self) {
        for report in self.files.iter().filter(|f| !f.errors.is_empty()) {
            error!("{}: {}", report.file.display(), report.errors.join("; "));
        }

        for (description, files) in self.reported_duplicates() {
            let files: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
            warn!("Duplicate description in {} files ({}): \"{}\"", files.len(), files.join(", "), description);
        }

        let skipped = match self.skipped_count() {
            0 => String::new(),
            n => format!(", {} drafts skipped", n),
        };
        if self.has_errors() {
            error!("Validated {} blog posts with errors{}", self.validated_count(), skipped);
        } else if self.duplicates.is_empty() {
            info!("Validated {} blog posts - all descriptions OK{}", self.validated_count(), skipped);
        } else {
            info!("Validated {} blog posts{}", self.validated_count(), skipped);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_description(title: Option<&str>, description: &str, limits: &Validation) -> Vec<String> {
    let mut errors = vec![];
    let length = description.chars().count();

    if length < limits.min_description_len {
        errors.push(format!("Too short ({} chars, minimum {})", length, limits.min_description_len));
    }
    if length > limits.max_description_len {
        errors.push(format!("Too long ({} chars, maximum {})", length, limits.max_description_len));
    }
    if let Some(title) = title {
        if description.to_lowercase() == title.to_lowercase() {
            errors.push("Description should not repeat the title".to_string());
        }
    }

    errors
}

/// Checks the description of every non-draft post below `posts_dir`.
///
/// Fails when the directory is missing, is not a directory or holds no
/// Markdown files. Problems in individual posts end up in the report.
pub fn validate_posts(posts_dir: &Path, limits: &Validation) -> Result<ValidationReport> {
    let metadata = fs::metadata(posts_dir)
        .with_context(|| format!("Blog directory not found: {}", posts_dir.display()))?;
    if !metadata.is_dir() {
        bail!("Not a directory: {}", posts_dir.display());
    }

    let files = PostList::new(posts_dir).retrieve_files()?;
    if files.is_empty() {
        bail!("No markdown files found in {}", posts_dir.display());
    }

    let mut report = ValidationReport::default();
    let mut descriptions: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for path in files {
        let file = path.strip_prefix(posts_dir).unwrap_or(&path).to_path_buf();
        let raw = fs::read_to_string(&path).with_context(|| format!("could not read {}", path.display()))?;

        let front_matter = match parse_front_matter::<MetaFrontMatter>(&raw) {
            Ok(Some((front_matter, _))) => front_matter,
            Ok(None) => MetaFrontMatter::default(),
            Err(e) => {
                report.files.push(FileReport {
                    file,
                    errors: vec![format!("Failed to parse frontmatter: {}", e)],
                    skipped: false,
                });
                continue;
            }
        };

        if front_matter.draft {
            report.files.push(FileReport { file, errors: vec![], skipped: true });
            continue;
        }

        let title = non_blank(front_matter.title);
        let errors = match non_blank(front_matter.description) {
            None => vec!["Missing or empty description".to_string()],
            Some(description) => {
                let errors = check_description(title.as_deref(), &description, limits);
                descriptions.entry(description).or_default().push(file.clone());
                errors
            }
        };

        report.files.push(FileReport { file, errors, skipped: false });
    }

    report.duplicates = descriptions
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .collect();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use crate::test_data::{write_files, DRAFT_POST_MD, ORACLE_POST_MD, POST_DATA_MD};

    use super::*;

    fn errors_of<'a>(report: &'a ValidationReport, file: &str) -> &'a [String] {
        &report.files.iter().find(|f| f.file == Path::new(file)).unwrap().errors
    }

    #[test]
    fn test_valid_posts() {
        let dir = tempfile::tempdir().unwrap();
        write_files(dir.path(), &[
            ("aws.md", POST_DATA_MD),
            ("oracle.md", ORACLE_POST_MD),
            ("draft.md", DRAFT_POST_MD),
        ]);

        let report = validate_posts(dir.path(), &Validation::default()).unwrap();
        assert!(!report.has_errors());
        assert_eq!(report.validated_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert!(report.duplicates.is_empty());
        report.log();
    }

    #[test]
    fn test_description_errors() {
        let dir = tempfile::tempdir().unwrap();
        let long = "x".repeat(161);
        write_files(dir.path(), &[
            ("short.md", "---\ntitle: Short\ndescription: Too brief\n---\n"),
            ("long.md", &format!("---\ntitle: Long\ndescription: {}\n---\n", long)),
            ("missing.md", "---\ntitle: Missing\ndescription: \"   \"\n---\n"),
            ("no-frontmatter.md", "Just text\n"),
            ("broken.md", "---\ntitle: [oops\n---\n"),
            (
                "repeat.md",
                "---\ntitle: A title that is long enough to pass the minimum length check\n\
                 description: a TITLE that is long enough to pass the minimum length check\n---\n",
            ),
        ]);

        let report = validate_posts(dir.path(), &Validation::default()).unwrap();
        assert!(report.has_errors());
        assert_eq!(errors_of(&report, "short.md"), ["Too short (9 chars, minimum 50)"]);
        assert_eq!(errors_of(&report, "long.md"), ["Too long (161 chars, maximum 160)"]);
        assert_eq!(errors_of(&report, "missing.md"), ["Missing or empty description"]);
        assert_eq!(errors_of(&report, "no-frontmatter.md"), ["Missing or empty description"]);
        assert!(errors_of(&report, "broken.md")[0].starts_with("Failed to parse frontmatter"));
        assert_eq!(errors_of(&report, "repeat.md"), ["Description should not repeat the title"]);
        report.log();
    }

    #[test]
    fn test_duplicates_are_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let post = "---\ntitle: T\ndescription: The very same description used in two different blog posts\n---\n";
        write_files(dir.path(), &[("a.md", post), ("b.md", post)]);

        let report = validate_posts(dir.path(), &Validation::default()).unwrap();
        assert!(!report.has_errors());
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.reported_duplicates().len(), 1);
        assert_eq!(report.duplicates[0].1, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
    }

    #[test]
    fn test_errors_hide_duplicate_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let post = "---\ntitle: T\ndescription: The very same description used in two different blog posts\n---\n";
        write_files(dir.path(), &[("a.md", post), ("b.md", post), ("c.md", "---\ntitle: C\n---\n")]);

        let report = validate_posts(dir.path(), &Validation::default()).unwrap();
        assert!(report.has_errors());
        assert_eq!(report.duplicates.len(), 1);
        assert!(report.reported_duplicates().is_empty());
        report.log();
    }

    #[test]
    fn test_custom_limits() {
        let dir = tempfile::tempdir().unwrap();
        write_files(dir.path(), &[("a.md", "---\ntitle: T\ndescription: Twelve chars\n---\n")]);

        let limits = Validation { min_description_len: 10, max_description_len: 12 };
        assert!(!validate_posts(dir.path(), &limits).unwrap().has_errors());
    }

    #[test]
    fn test_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_posts(&dir.path().join("missing"), &Validation::default()).is_err());

        write_files(dir.path(), &[("file.md", "x"), ("empty/readme.txt", "x")]);
        assert!(validate_posts(&dir.path().join("file.md"), &Validation::default()).is_err());
        let err = validate_posts(&dir.path().join("empty"), &Validation::default()).err().unwrap();
        assert!(err.to_string().contains("No markdown files"));
    }
}
