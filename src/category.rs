use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Named grouping of templates. The `Display` form is the directory name
/// under the templates root.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Easy,
    Medium,
    Hard,
    Python,
    #[value(name = "c_style")]
    CStyle,
    Practice,
    Custom,
}

impl Category {
    /// All categories in menu order
    pub const ALL: [Category; 7] = [
        Category::Easy,
        Category::Medium,
        Category::Hard,
        Category::Python,
        Category::CStyle,
        Category::Practice,
        Category::Custom,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Easy => "Easy Sentences",
            Category::Medium => "Medium (with numbers)",
            Category::Hard => "Hard (complex punctuation)",
            Category::Python => "Python Code",
            Category::CStyle => "C/Java/JavaScript",
            Category::Practice => "Practice (common mistakes)",
            Category::Custom => "Custom Templates",
        }
    }

    pub fn dir_name(&self) -> String {
        self.to_string()
    }

    /// Built-in body used when a category has no template files
    pub fn sample_template(&self) -> &'static str {
        match self {
            Category::Easy => "The quick brown fox jumps over the lazy dog.",
            Category::Medium => "Python 3.12 was released in 2024 with 42 new features.",
            Category::Hard => "Email: user@example.com, Phone: 555-123-4567, Date: 2024-03-15",
            Category::Python => "def hello():\n    print('Hello, World!')",
            Category::CStyle => {
                "#include <stdio.h>\n\nint main() {\n    printf('Hello');\n    return 0;\n}"
            }
            Category::Practice => "teh (should be: the)\nrecieve (should be: receive)",
            Category::Custom => "Add your own templates in templates/custom/",
        }
    }

    /// Category bound to the 1-based menu key, if any
    pub fn from_menu_key(key: char) -> Option<Category> {
        let idx = key.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn menu_key(&self) -> char {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        char::from_digit(idx as u32 + 1, 10).unwrap_or('?')
    }
}
