//! File name to content-type classification.

use serde::{Deserialize, Serialize};

macro_rules! language_ids {
    ($($variant:ident => $tag:literal,)+) => {
        /// Content-type tag of a file, named after the editor widget's language ids.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "&'static str")]
        pub enum LanguageId {
            #[default]
            Plaintext,
            $($variant,)+
        }

        impl LanguageId {
            pub fn as_str(self) -> &'static str {
                match self {
                    Self::Plaintext => "plaintext",
                    $(Self::$variant => $tag,)+
                }
            }

            /// Unknown tags map to [`LanguageId::Plaintext`].
            pub fn from_tag(tag: &str) -> Self {
                match tag {
                    $($tag => Self::$variant,)+
                    _ => Self::Plaintext,
                }
            }
        }
    };
}

language_ids! {
    JavaScript => "javascript",
    TypeScript => "typescript",
    Html => "html",
    Css => "css",
    Scss => "scss",
    Less => "less",
    Json => "json",
    Xml => "xml",
    Yaml => "yaml",
    Ini => "ini",
    Python => "python",
    Ruby => "ruby",
    Php => "php",
    Java => "java",
    C => "c",
    Cpp => "cpp",
    CSharp => "csharp",
    Go => "go",
    Rust => "rust",
    Swift => "swift",
    Kotlin => "kotlin",
    Scala => "scala",
    R => "r",
    Lua => "lua",
    Perl => "perl",
    Shell => "shell",
    PowerShell => "powershell",
    Bat => "bat",
    Dockerfile => "dockerfile",
    Makefile => "makefile",
    CMake => "cmake",
    Markdown => "markdown",
    RestructuredText => "restructuredtext",
    Latex => "latex",
    Sql => "sql",
    PgSql => "pgsql",
    GraphQl => "graphql",
    Vue => "vue",
    Svelte => "svelte",
    Astro => "astro",
    Ignore => "ignore",
}

impl LanguageId {
    /// Exact (lowercased) file names win over extensions; anything unmatched is
    /// plaintext.
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if let Some(lang) = Self::from_exact_name(&lower) {
            return lang;
        }
        match lower.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext).unwrap_or_default(),
            None => Self::Plaintext,
        }
    }

    fn from_exact_name(lower: &str) -> Option<Self> {
        Some(match lower {
            "dockerfile" => Self::Dockerfile,
            "makefile" => Self::Makefile,
            "cmakelists" => Self::CMake,
            ".gitignore" | ".dockerignore" => Self::Ignore,
            ".env" | ".env.local" | ".env.development" | ".env.production" => Self::Ini,
            _ => return None,
        })
    }

    fn from_extension(ext: &str) -> Option<Self> {
        Some(match ext {
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "scss" | "sass" => Self::Scss,
            "less" => Self::Less,
            "json" => Self::Json,
            "xml" => Self::Xml,
            "yaml" | "yml" => Self::Yaml,
            "toml" | "ini" | "conf" | "cfg" | "env" => Self::Ini,
            "py" => Self::Python,
            "rb" => Self::Ruby,
            "php" => Self::Php,
            "java" => Self::Java,
            "c" | "h" => Self::C,
            "cpp" | "cc" | "cxx" | "hpp" => Self::Cpp,
            "cs" => Self::CSharp,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "swift" => Self::Swift,
            "kt" => Self::Kotlin,
            "scala" => Self::Scala,
            "r" => Self::R,
            "lua" => Self::Lua,
            "perl" | "pl" => Self::Perl,
            "sh" | "bash" | "zsh" | "fish" => Self::Shell,
            "ps1" => Self::PowerShell,
            "bat" | "cmd" => Self::Bat,
            "dockerfile" => Self::Dockerfile,
            "makefile" => Self::Makefile,
            "cmake" => Self::CMake,
            "md" | "markdown" => Self::Markdown,
            "rst" => Self::RestructuredText,
            "tex" => Self::Latex,
            "sql" | "mysql" => Self::Sql,
            "pgsql" => Self::PgSql,
            "graphql" | "gql" => Self::GraphQl,
            "vue" => Self::Vue,
            "svelte" => Self::Svelte,
            "astro" => Self::Astro,
            "gitignore" | "dockerignore" => Self::Ignore,
            _ => return None,
        })
    }
}

impl From<String> for LanguageId {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<LanguageId> for &'static str {
    fn from(lang: LanguageId) -> Self {
        lang.as_str()
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIcon {
    Folder,
    File,
    FileCode,
    FileJson,
    FileText,
}

impl FileIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
            Self::FileCode => "file-code",
            Self::FileJson => "file-json",
            Self::FileText => "file-text",
        }
    }
}

pub fn file_icon(name: &str, is_folder: bool) -> FileIcon {
    if is_folder {
        return FileIcon::Folder;
    }
    match LanguageId::from_file_name(name) {
        LanguageId::Json => FileIcon::FileJson,
        LanguageId::Markdown => FileIcon::FileText,
        LanguageId::Plaintext => FileIcon::File,
        _ => FileIcon::FileCode,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
