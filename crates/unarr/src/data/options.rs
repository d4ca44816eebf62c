use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Callback receiving each file name as soon as the tool reports it extracted.
pub type ProgressFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Where extraction goes when no target directory is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DefaultTarget {
    /// The process working directory.
    #[default]
    CurrentDir,
    /// `<temp>/tmp`.
    TempDir,
}

/// Shape of a successful extract result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResponseShape {
    /// Archive type, extracted files and destination directory.
    #[default]
    Detailed,
    /// Only the destination directory.
    DirectoryOnly,
}

/// Options for extracting an archive with `unar`.
///
/// # Examples
///
/// ```
/// use unarr::ExtractOptions;
///
/// let options = ExtractOptions::default()
///     .target_dir("tmp")
///     .indexes([0, 2])
///     .password("secret");
/// assert!(options.force_overwrite);
/// ```
#[derive(Clone)]
pub struct ExtractOptions {
    /// Archive used when the operation itself is given none.
    pub archive: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub default_target: DefaultTarget,

    /// Names or wildcard patterns to extract. Ignored when `indexes` is set.
    pub files: Vec<String>,
    /// Entry indexes as printed by `lsar`. Every token must be an integer.
    pub indexes: Option<Vec<String>>,

    pub force_overwrite: bool,
    pub force_rename: bool,
    pub force_skip: bool,
    pub force_directory: bool,
    pub no_directory: bool,
    pub no_recursion: bool,
    pub copy_time: bool,
    pub quiet: bool,

    pub password: Option<String>,
    pub password_encoding: Option<String>,
    pub encoding: Option<String>,

    pub response: ResponseShape,

    /// Target directory and a file selection are mandatory.
    /// Set by [`ExtractOptions::only`].
    pub selection_required: bool,

    /// Invoked synchronously, in output order, once per extracted file.
    pub on_progress: Option<ProgressFn>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            archive: None,
            target_dir: None,
            default_target: DefaultTarget::default(),
            files: Vec::new(),
            indexes: None,
            force_overwrite: true,
            force_rename: false,
            force_skip: false,
            force_directory: false,
            no_directory: true,
            no_recursion: false,
            copy_time: false,
            quiet: false,
            password: None,
            password_encoding: None,
            encoding: None,
            response: ResponseShape::default(),
            selection_required: false,
            on_progress: None,
        }
    }
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("archive", &self.archive)
            .field("target_dir", &self.target_dir)
            .field("default_target", &self.default_target)
            .field("files", &self.files)
            .field("indexes", &self.indexes)
            .field("force_overwrite", &self.force_overwrite)
            .field("force_rename", &self.force_rename)
            .field("force_skip", &self.force_skip)
            .field("force_directory", &self.force_directory)
            .field("no_directory", &self.no_directory)
            .field("no_recursion", &self.no_recursion)
            .field("copy_time", &self.copy_time)
            .field("quiet", &self.quiet)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("password_encoding", &self.password_encoding)
            .field("encoding", &self.encoding)
            .field("response", &self.response)
            .field("selection_required", &self.selection_required)
            .field("on_progress", &self.on_progress.as_ref().map(|_| "Fn(&str)"))
            .finish()
    }
}

impl ExtractOptions {
    /// Extract exactly `files` into `target_dir`, overwriting, without a
    /// containing directory and copying the archive time.
    ///
    /// Both arguments are required; an empty value fails the operation
    /// before the tool is started.
    pub fn only<I, S>(target_dir: impl Into<PathBuf>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_dir: Some(target_dir.into()),
            files: files.into_iter().map(Into::into).collect(),
            force_overwrite: true,
            no_directory: true,
            copy_time: true,
            selection_required: true,
            ..Self::default()
        }
    }

    pub fn archive(mut self, archive: impl Into<PathBuf>) -> Self {
        self.archive = Some(archive.into());
        self
    }

    pub fn target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_dir = Some(dir.into());
        self
    }

    pub fn default_target(mut self, target: DefaultTarget) -> Self {
        self.default_target = target;
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    pub fn files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Select entries by index. Tokens are validated when the command is built.
    pub fn indexes<I, T>(mut self, indexes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.indexes = Some(indexes.into_iter().map(|i| i.to_string()).collect());
        self
    }

    pub fn force_overwrite(mut self, yes: bool) -> Self {
        self.force_overwrite = yes;
        self
    }

    pub fn force_rename(mut self, yes: bool) -> Self {
        self.force_rename = yes;
        self
    }

    pub fn force_skip(mut self, yes: bool) -> Self {
        self.force_skip = yes;
        self
    }

    pub fn force_directory(mut self, yes: bool) -> Self {
        self.force_directory = yes;
        self
    }

    pub fn no_directory(mut self, yes: bool) -> Self {
        self.no_directory = yes;
        self
    }

    pub fn no_recursion(mut self, yes: bool) -> Self {
        self.no_recursion = yes;
        self
    }

    pub fn copy_time(mut self, yes: bool) -> Self {
        self.copy_time = yes;
        self
    }

    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn password_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.password_encoding = Some(encoding.into());
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn response(mut self, shape: ResponseShape) -> Self {
        self.response = shape;
        self
    }

    pub fn on_progress(mut self, callback: ProgressFn) -> Self {
        self.on_progress = Some(callback);
        self
    }
}

/// Options for listing an archive with `lsar`.
#[derive(Clone, Default)]
pub struct ListOptions {
    /// Archive used when the operation itself is given none.
    pub archive: Option<PathBuf>,
    pub no_recursion: bool,
    pub password: Option<String>,
    pub password_encoding: Option<String>,
    pub encoding: Option<String>,
    /// Passed through to `-pe`.
    pub print_encoding: Option<String>,
    /// Ask `lsar` for JSON; names are then read from the JSON document.
    pub json: bool,
    pub json_ascii: bool,
    /// Do not log the command line at info level.
    pub quiet: bool,
}

impl fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListOptions")
            .field("archive", &self.archive)
            .field("no_recursion", &self.no_recursion)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("password_encoding", &self.password_encoding)
            .field("encoding", &self.encoding)
            .field("print_encoding", &self.print_encoding)
            .field("json", &self.json)
            .field("json_ascii", &self.json_ascii)
            .field("quiet", &self.quiet)
            .finish()
    }
}

impl ListOptions {
    pub fn archive(mut self, archive: impl Into<PathBuf>) -> Self {
        self.archive = Some(archive.into());
        self
    }

    pub fn no_recursion(mut self, yes: bool) -> Self {
        self.no_recursion = yes;
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn password_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.password_encoding = Some(encoding.into());
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn print_encoding(mut self, value: impl Into<String>) -> Self {
        self.print_encoding = Some(value.into());
        self
    }

    pub fn json(mut self, yes: bool) -> Self {
        self.json = yes;
        self
    }

    pub fn json_ascii(mut self, yes: bool) -> Self {
        self.json_ascii = yes;
        self
    }

    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }

    pub(crate) fn wants_json(&self) -> bool {
        self.json || self.json_ascii
    }
}
