//! Template discovery, parsing and sampling.
//!
//! Templates live in `<root>/<category>/*.txt`. A file may hold several
//! templates separated by a line containing only `---`; lines whose first
//! non-blank character is `#` are comments.

use include_dir::{include_dir, Dir, File};
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::error::{Error, Result};

static SAMPLES_DIR: Dir = include_dir!("src/samples");

const SEPARATOR: &str = "---";

/// Category listing shown in the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub category: Category,
    pub name: &'static str,
    pub count: usize,
}

/// Supplies template bodies to sessions
pub trait TemplateProvider {
    /// Up to `count` distinct bodies for `category`, never empty
    fn random_templates(&mut self, category: Category, count: usize) -> Vec<String>;

    fn category_info(&mut self) -> Vec<CategoryInfo>;
}

/// Split a template file into template bodies
pub fn parse_template_file(content: &str) -> Vec<String> {
    let lines = content.lines().collect::<Vec<_>>();

    lines
        .split(|line| line.trim() == SEPARATOR)
        .filter_map(|part| {
            let kept = part
                .iter()
                .filter(|line| !line.trim_start().starts_with('#'))
                .map(|line| line.trim_end())
                .collect::<Vec<_>>();
            let body = trim_blank_lines(&kept).join("\n");
            (!body.is_empty()).then_some(body)
        })
        .collect()
}

fn trim_blank_lines<'a>(lines: &'a [&'a str]) -> &'a [&'a str] {
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    &lines[start..end]
}

fn is_template_file(path: &Path) -> bool {
    let is_txt = path.extension().is_some_and(|ext| ext == "txt");
    let is_readme = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("README"));
    is_txt && !is_readme
}

/// Read every template in one category directory, in file-name order.
/// Unreadable files are logged and skipped.
pub fn read_category_dir(dir: &Path) -> Result<Vec<String>> {
    let paths = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_template_file(p))
        .sorted()
        .collect::<Vec<_>>();

    let mut templates = Vec::new();
    for path in paths {
        match read_template_file(&path) {
            Ok(found) => templates.extend(found),
            Err(err) => tracing::warn!(%err, "skipping template file"),
        }
    }
    Ok(templates)
}

fn read_template_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Template {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_template_file(&content))
}

fn embedded_samples<'a>(dir: &'a Dir<'a>, out: &mut Vec<&'a File<'a>>) {
    out.extend(dir.files());
    for sub in dir.dirs() {
        embedded_samples(sub, out);
    }
}

/// Write the bundled sample files under `root`. Existing files are left
/// alone. Returns the files that were created.
pub fn install_samples(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    embedded_samples(&SAMPLES_DIR, &mut files);

    let mut created = Vec::new();
    for file in files {
        let target = root.join(file.path());
        if target.exists() {
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, file.contents())?;
        tracing::info!(path = %target.display(), "created sample template");
        created.push(target);
    }
    Ok(created)
}

/// File-backed provider. Each category is read once and cached for the
/// lifetime of the store.
#[derive(Debug)]
pub struct TemplateStore {
    root: PathBuf,
    cache: HashMap<Category, Vec<String>>,
}

impl TemplateStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cache: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// All templates of a category, or its built-in sample when none exist
    pub fn load(&mut self, category: Category) -> &[String] {
        let dir = self.category_dir(category);
        self.cache.entry(category).or_insert_with(|| {
            let found = if dir.is_dir() {
                read_category_dir(&dir).unwrap_or_else(|err| {
                    tracing::warn!(%err, dir = %dir.display(), "cannot list templates");
                    Vec::new()
                })
            } else {
                Vec::new()
            };
            tracing::debug!(%category, count = found.len(), "loaded templates");

            if found.is_empty() {
                vec![category.sample_template().to_string()]
            } else {
                found
            }
        })
    }

    pub fn random_templates_with<R: Rng + ?Sized>(
        &mut self,
        category: Category,
        count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let templates = self.load(category);
        let picked = templates
            .choose_multiple(rng, count.min(templates.len()))
            .cloned()
            .collect::<Vec<_>>();
        if picked.is_empty() {
            vec![category.sample_template().to_string()]
        } else {
            picked
        }
    }
}

impl TemplateProvider for TemplateStore {
    fn random_templates(&mut self, category: Category, count: usize) -> Vec<String> {
        self.random_templates_with(category, count, &mut rand::thread_rng())
    }

    fn category_info(&mut self) -> Vec<CategoryInfo> {
        Category::ALL
            .iter()
            .map(|&category| CategoryInfo {
                category,
                name: category.display_name(),
                count: self.load(category).len(),
            })
            .collect()
    }
}

/// In-memory provider with fixed bodies, handed out in order
#[derive(Debug, Clone, Default)]
pub struct StaticTemplates {
    templates: HashMap<Category, Vec<String>>,
}

impl StaticTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<I, S>(mut self, category: Category, bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.templates
            .insert(category, bodies.into_iter().map(Into::into).collect());
        self
    }
}

impl TemplateProvider for StaticTemplates {
    fn random_templates(&mut self, category: Category, count: usize) -> Vec<String> {
        match self.templates.get(&category) {
            Some(bodies) if !bodies.is_empty() => {
                bodies.iter().take(count.max(1)).cloned().collect()
            }
            _ => vec![category.sample_template().to_string()],
        }
    }

    fn category_info(&mut self) -> Vec<CategoryInfo> {
        Category::ALL
            .iter()
            .map(|&category| CategoryInfo {
                category,
                name: category.display_name(),
                count: self.templates.get(&category).map_or(0, Vec::len),
            })
            .collect()
    }
}
