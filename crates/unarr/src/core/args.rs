//! Command line construction for `unar` and `lsar`.
//!
//! Request resolution (fallbacks, default target) happens once in
//! [`ExtractRequest::resolve`] / [`ListRequest::resolve`]; turning a resolved
//! request into an [`ArgumentVector`] is pure.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use unarr_platform::dir;

use crate::data::{DefaultTarget, ExtractOptions, ListOptions};
use crate::error::{Error, Result};

const PASSWORD_FLAG: &str = "-p";

/// `[tool, archive, flags...]`, fixed once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentVector {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ArgumentVector {
    fn new(program: &Path, archive: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            args: vec![archive.as_os_str().to_os_string()],
        }
    }

    fn push(&mut self, arg: impl AsRef<OsStr>) {
        self.args.push(arg.as_ref().to_os_string());
    }

    fn push_flag(&mut self, enabled: bool, flag: &str) {
        if enabled {
            self.push(flag);
        }
    }

    fn push_value(&mut self, flag: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.push(flag);
            self.push(value);
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Everything after the program, archive first.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Render for logs, password masked. The tool is never run through a shell.
    pub fn display(&self) -> String {
        let mut rendered = vec![self.program.to_string_lossy().into_owned()];
        let mut secret = false;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            rendered.push(if secret {
                "***".to_string()
            } else if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("\"{arg}\"")
            } else {
                arg.to_string()
            });
            secret = arg == PASSWORD_FLAG;
        }
        rendered.join(" ")
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

fn resolve_archive(archive: Option<&Path>, fallback: Option<&Path>) -> Result<PathBuf> {
    non_empty(archive)
        .or_else(|| non_empty(fallback))
        .map(Path::to_path_buf)
        .ok_or_else(Error::missing_archive)
}

/// A validated extraction request.
#[derive(Clone, Debug)]
pub struct ExtractRequest {
    pub archive: PathBuf,
    pub target_dir: PathBuf,
    pub options: ExtractOptions,
}

impl ExtractRequest {
    pub fn resolve(archive: Option<&Path>, options: ExtractOptions) -> Result<Self> {
        let archive = resolve_archive(archive, options.archive.as_deref())?;

        let target_dir = match non_empty(options.target_dir.as_deref()) {
            Some(dir) => dir.to_path_buf(),
            None if options.selection_required => {
                return Err(Error::InvalidRequest("target Directory missing.".to_string()));
            }
            None => match options.default_target {
                DefaultTarget::CurrentDir => dir::current().map_err(|e| {
                    Error::InvalidRequest(format!("cannot resolve current directory: {e}"))
                })?,
                DefaultTarget::TempDir => dir::temp_target(),
            },
        };

        if options.selection_required && options.files.is_empty() && options.indexes.is_none() {
            return Err(Error::InvalidRequest(
                "files or directory to extract from archive missing.".to_string(),
            ));
        }

        Ok(Self {
            archive,
            target_dir,
            options,
        })
    }
}

/// A validated listing request.
#[derive(Clone, Debug)]
pub struct ListRequest {
    pub archive: PathBuf,
    pub options: ListOptions,
}

impl ListRequest {
    pub fn resolve(archive: Option<&Path>, options: ListOptions) -> Result<Self> {
        let archive = resolve_archive(archive, options.archive.as_deref())?;
        Ok(Self { archive, options })
    }
}

fn validate_indexes(indexes: &[String]) -> Result<Vec<u64>> {
    indexes
        .iter()
        .map(|token| token.trim().parse::<u64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| {
            Error::InvalidIndexList(
                serde_json::to_string(indexes).unwrap_or_else(|_| format!("{indexes:?}")),
            )
        })
}

/// `unar <archive> -o <dir> [flags] [-p pw] [-E enc] [-e enc] [-i n ... | files ...]`
pub fn build_extract(unar: &Path, request: &ExtractRequest) -> Result<ArgumentVector> {
    let options = &request.options;
    let mut argv = ArgumentVector::new(unar, &request.archive);

    argv.push("-o");
    argv.push(&request.target_dir);

    argv.push_flag(options.force_overwrite, "-f");
    argv.push_flag(options.force_rename, "-r");
    argv.push_flag(options.force_skip, "-s");
    argv.push_flag(options.force_directory, "-d");
    argv.push_flag(options.no_directory, "-D");
    argv.push_flag(options.no_recursion, "-nr");
    argv.push_flag(options.copy_time, "-t");
    argv.push_flag(options.quiet, "-q");

    argv.push_value(PASSWORD_FLAG, options.password.as_deref());
    argv.push_value("-E", options.password_encoding.as_deref());
    argv.push_value("-e", options.encoding.as_deref());

    match options.indexes.as_deref() {
        Some(indexes) if !indexes.is_empty() => {
            for index in validate_indexes(indexes)? {
                argv.push("-i");
                argv.push(index.to_string());
            }
        }
        _ => {
            for file in &options.files {
                argv.push(file);
            }
        }
    }

    Ok(argv)
}

/// `lsar <archive> [-nr] [-p pw] [-E enc] [-e enc] [-pe v] [-j] [-ja]`
pub fn build_list(lsar: &Path, request: &ListRequest) -> ArgumentVector {
    let options = &request.options;
    let mut argv = ArgumentVector::new(lsar, &request.archive);

    argv.push_flag(options.no_recursion, "-nr");
    argv.push_value(PASSWORD_FLAG, options.password.as_deref());
    argv.push_value("-E", options.password_encoding.as_deref());
    argv.push_value("-e", options.encoding.as_deref());
    argv.push_value("-pe", options.print_encoding.as_deref());
    argv.push_flag(options.json, "-j");
    argv.push_flag(options.json_ascii, "-ja");

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(argv: &ArgumentVector) -> Vec<String> {
        argv.args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn request(options: ExtractOptions) -> ExtractRequest {
        ExtractRequest::resolve(Some(Path::new("attr.7z")), options).unwrap()
    }

    #[test]
    fn missing_archive_is_invalid_request() {
        let err = ExtractRequest::resolve(None, ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));

        let err = ExtractRequest::resolve(Some(Path::new("")), ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));

        let err = ListRequest::resolve(None, ListOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Error: archiveFile or options.archiveFile missing.");
    }

    #[test]
    fn archive_falls_back_to_options() {
        let req = ExtractRequest::resolve(None, ExtractOptions::default().archive("from-options.zip"))
            .unwrap();
        assert_eq!(req.archive, PathBuf::from("from-options.zip"));

        let req = ExtractRequest::resolve(
            Some(Path::new("explicit.zip")),
            ExtractOptions::default().archive("from-options.zip"),
        )
        .unwrap();
        assert_eq!(req.archive, PathBuf::from("explicit.zip"));
    }

    #[test]
    fn target_defaults() {
        let req = request(ExtractOptions::default());
        assert_eq!(req.target_dir, std::env::current_dir().unwrap());

        let req = request(ExtractOptions::default().default_target(DefaultTarget::TempDir));
        assert_eq!(req.target_dir, dir::temp_target());

        let req = request(ExtractOptions::default().target_dir(""));
        assert_eq!(req.target_dir, std::env::current_dir().unwrap());
    }

    #[test]
    fn only_preset_requires_target_and_selection() {
        let mut options = ExtractOptions::only("out", Vec::<String>::new());
        let err = ExtractRequest::resolve(Some(Path::new("a.zip")), options.clone()).unwrap_err();
        assert!(err.to_string().contains("files or directory"));

        options.files.push("a.txt".into());
        options.target_dir = None;
        let err = ExtractRequest::resolve(Some(Path::new("a.zip")), options).unwrap_err();
        assert_eq!(err.to_string(), "Error: target Directory missing.");
    }

    #[test]
    fn extract_default_flags() {
        let argv = build_extract(Path::new("unar"), &request(ExtractOptions::default().target_dir("tmp")))
            .unwrap();
        assert_eq!(argv.program(), Path::new("unar"));
        assert_eq!(strings(&argv), ["attr.7z", "-o", "tmp", "-f", "-D"]);
    }

    #[test]
    fn extract_all_flags_in_fixed_order() {
        let options = ExtractOptions::default()
            .target_dir("tmp")
            .force_rename(true)
            .force_skip(true)
            .force_directory(true)
            .no_recursion(true)
            .copy_time(true)
            .quiet(true)
            .password("pw")
            .password_encoding("latin1")
            .encoding("utf-8");
        let argv = build_extract(Path::new("/opt/unar"), &request(options)).unwrap();
        assert_eq!(
            strings(&argv),
            [
                "attr.7z", "-o", "tmp", "-f", "-r", "-s", "-d", "-D", "-nr", "-t", "-q", "-p", "pw",
                "-E", "latin1", "-e", "utf-8"
            ]
        );
        assert_eq!(argv.args().len(), 17);
    }

    #[test]
    fn contradictory_flags_are_passed_through() {
        let options = ExtractOptions::default()
            .target_dir("tmp")
            .force_directory(true)
            .no_directory(true);
        let argv = build_extract(Path::new("unar"), &request(options)).unwrap();
        let args = strings(&argv);
        assert!(args.contains(&"-d".to_string()));
        assert!(args.contains(&"-D".to_string()));
    }

    #[test]
    fn empty_strings_are_not_emitted() {
        let options = ExtractOptions::default()
            .target_dir("tmp")
            .password("")
            .encoding("");
        let argv = build_extract(Path::new("unar"), &request(options)).unwrap();
        assert!(!strings(&argv).contains(&"-p".to_string()));
        assert!(!strings(&argv).contains(&"-e".to_string()));
    }

    #[test]
    fn indexes_become_separate_pairs() {
        let options = ExtractOptions::default().target_dir("tmp").indexes([0, 2]);
        let argv = build_extract(Path::new("unar"), &request(options)).unwrap();
        assert_eq!(
            strings(&argv),
            ["attr.7z", "-o", "tmp", "-f", "-D", "-i", "0", "-i", "2"]
        );
    }

    #[test]
    fn indexes_take_precedence_over_files() {
        let options = ExtractOptions::default()
            .target_dir("tmp")
            .files(["attr/normal file.txt"])
            .indexes(["1"]);
        let argv = build_extract(Path::new("unar"), &request(options)).unwrap();
        let args = strings(&argv);
        assert!(!args.contains(&"attr/normal file.txt".to_string()));
        assert_eq!(&args[args.len() - 2..], ["-i", "1"]);
    }

    #[test]
    fn empty_index_list_falls_back_to_files() {
        let options = ExtractOptions::default()
            .target_dir("tmp")
            .files(["a.txt"])
            .indexes(Vec::<u32>::new());
        let argv = build_extract(Path::new("unar"), &request(options)).unwrap();
        assert_eq!(strings(&argv).last().unwrap(), "a.txt");
    }

    #[test]
    fn non_integer_index_is_rejected() {
        let options = ExtractOptions::default().target_dir("tmp").indexes(["0", "two"]);
        let err = build_extract(Path::new("unar"), &request(options)).unwrap_err();
        match err {
            Error::InvalidIndexList(list) => assert_eq!(list, r#"["0","two"]"#),
            other => panic!("unexpected error: {other:?}"),
        }

        let options = ExtractOptions::default().target_dir("tmp").indexes(["-1"]);
        assert!(build_extract(Path::new("unar"), &request(options)).is_err());
    }

    #[test]
    fn files_are_literal_arguments() {
        let options = ExtractOptions::default()
            .target_dir("tmp")
            .files(["attr/normal file.txt", "attr/read-only file.txt"]);
        let argv = build_extract(Path::new("unar"), &request(options)).unwrap();
        let args = strings(&argv);
        assert_eq!(
            &args[args.len() - 2..],
            ["attr/normal file.txt", "attr/read-only file.txt"]
        );
    }

    #[test]
    fn list_flags_in_fixed_order() {
        let options = ListOptions::default()
            .no_recursion(true)
            .password("pw")
            .password_encoding("latin1")
            .encoding("utf-8")
            .print_encoding("1")
            .json(true)
            .json_ascii(true);
        let req = ListRequest::resolve(Some(Path::new("attr.7z")), options).unwrap();
        let argv = build_list(Path::new("lsar"), &req);
        assert_eq!(
            strings(&argv),
            ["attr.7z", "-nr", "-p", "pw", "-E", "latin1", "-e", "utf-8", "-pe", "1", "-j", "-ja"]
        );
    }

    #[test]
    fn list_minimal() {
        let req = ListRequest::resolve(Some(Path::new("blank.zip")), ListOptions::default()).unwrap();
        assert_eq!(strings(&build_list(Path::new("lsar"), &req)), ["blank.zip"]);
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let options = ExtractOptions::default()
            .target_dir("my dir")
            .no_directory(false)
            .force_overwrite(false);
        let argv = build_extract(Path::new("unar"), &request(options)).unwrap();
        assert_eq!(argv.display(), "unar attr.7z -o \"my dir\"");
    }

    #[test]
    fn display_masks_password() {
        let req = ListRequest::resolve(
            Some(Path::new("secret.rar")),
            ListOptions::default().password("hunter2"),
        )
        .unwrap();
        let rendered = build_list(Path::new("lsar"), &req).display();
        assert_eq!(rendered, "lsar secret.rar -p ***");
        assert!(!rendered.contains("hunter2"));
    }
}
