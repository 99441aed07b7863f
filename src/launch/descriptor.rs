// src/launch/descriptor.rs

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::errors::Result;
use crate::resolve::join_classpath;

/// Answer sent to sbt on stdin. If sbt stops at its interactive error
/// prompt ("(r)etry, (q)uit, (l)ast, or (i)gnore?") it quits instead of
/// waiting forever.
pub const CANNED_INPUT: &str = "q";

/// Value of a `-Dkey=value` system property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemPropertyValue {
    Text(String),
    /// An absolute file location.
    File(PathBuf),
}

impl fmt::Display for SystemPropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemPropertyValue::Text(s) => f.write_str(s),
            SystemPropertyValue::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Everything needed to start the external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDescriptor {
    pub working_dir: PathBuf,
    /// Java executable used to start the JVM.
    pub java: PathBuf,
    pub main_class: String,
    pub classpath: Vec<PathBuf>,
    /// Arguments passed to the main class.
    pub args: Vec<String>,
    /// Arguments passed to the JVM, before the classpath.
    pub jvm_args: Vec<String>,
    pub system_properties: BTreeMap<String, SystemPropertyValue>,
    /// Written to the child's stdin (followed by a newline), then stdin is
    /// closed.
    pub input: String,
    pub fork: bool,
    /// Non-zero exit is reported as a failure rather than a completed run.
    pub fail_on_error: bool,
}

impl LaunchDescriptor {
    /// Full argument vector for `java`:
    /// `<jvm args> <-Dprops> -classpath <cp> <main class> <args>`.
    pub fn command_args(&self) -> Result<Vec<OsString>> {
        let mut out: Vec<OsString> = Vec::new();
        out.extend(self.jvm_args.iter().map(OsString::from));

        for (key, value) in &self.system_properties {
            let mut prop = OsString::from(format!("-D{key}="));
            match value {
                SystemPropertyValue::Text(s) => prop.push(s),
                SystemPropertyValue::File(p) => prop.push(p.as_os_str()),
            }
            out.push(prop);
        }

        if !self.classpath.is_empty() {
            out.push(OsString::from("-classpath"));
            out.push(join_classpath(&self.classpath)?);
        }

        out.push(OsString::from(&self.main_class));
        out.extend(self.args.iter().map(OsString::from));
        Ok(out)
    }

    /// Human-readable command line, for logs and dry runs.
    pub fn display_command(&self) -> String {
        let args = match self.command_args() {
            Ok(args) => args,
            Err(_) => return format!("{} <invalid classpath>", self.java.display()),
        };
        let mut line = self.java.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Split an argument line on runs of whitespace.
///
/// No quoting or escaping is interpreted; a blank line yields no arguments.
pub fn split_arguments(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> LaunchDescriptor {
        LaunchDescriptor {
            working_dir: PathBuf::from("."),
            java: PathBuf::from("java"),
            main_class: "xsbt.boot.Boot".to_string(),
            classpath: vec![PathBuf::from("/repo/launcher.jar"), PathBuf::from("/repo/boot.jar")],
            args: vec!["compile".to_string()],
            jvm_args: vec!["-Xmx1g".to_string()],
            system_properties: BTreeMap::from([
                ("b.file".to_string(), SystemPropertyValue::File(PathBuf::from("/tmp/b"))),
                ("a.text".to_string(), SystemPropertyValue::Text("x y".to_string())),
            ]),
            input: CANNED_INPUT.to_string(),
            fork: true,
            fail_on_error: true,
        }
    }

    #[test]
    fn split_drops_empty_tokens() {
        assert!(split_arguments("").is_empty());
        assert!(split_arguments("   \t\n ").is_empty());
        assert_eq!(
            split_arguments("  clean   compile\ttest "),
            vec!["clean", "compile", "test"]
        );
    }

    #[test]
    fn split_ignores_quotes() {
        assert_eq!(
            split_arguments(r#""set name := x""#),
            vec![r#""set"#, "name", ":=", r#"x""#]
        );
    }

    #[cfg(unix)]
    #[test]
    fn command_args_order() {
        let args: Vec<String> = descriptor()
            .command_args()
            .unwrap()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "-Xmx1g",
                "-Da.text=x y",
                "-Db.file=/tmp/b",
                "-classpath",
                "/repo/launcher.jar:/repo/boot.jar",
                "xsbt.boot.Boot",
                "compile",
            ]
        );
    }
}
