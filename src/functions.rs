//! Built-in functions available to interpolations.

use std::{
    env,
    path::{Component, Path, PathBuf},
};
use tfvars_runtime::{args, prelude::*};

/// What the functions know about the file being evaluated.
#[derive(Clone, Debug)]
pub struct Context {
    /// Path of the file being evaluated.
    pub path: PathBuf,

    /// Path of the configuration that includes it, if any.
    pub include: Option<PathBuf>,
}

impl Context {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            include: None,
        }
    }

    pub fn with_include(mut self, include: impl Into<PathBuf>) -> Self {
        self.include = Some(include.into());
        self
    }

    /// Absolute directory containing the evaluated file.
    fn dir(&self) -> Result<PathBuf, Exception> {
        parent_dir(&self.path)
    }

    /// Absolute directory containing the include, or the file's own directory
    /// when there is no include.
    fn include_dir(&self) -> Result<PathBuf, Exception> {
        match &self.include {
            Some(include) => parent_dir(include),
            None => self.dir(),
        }
    }
}

pub fn get() -> Functions<Context> {
    Functions::new()
        .with("get_env", get_env)
        .with("get_parent_tfvars_dir", get_parent_tfvars_dir)
        .with("get_tfvars_dir", get_tfvars_dir)
        .with("path_relative_to_include", path_relative_to_include)
}

/// Value of an environment variable, or a default when it is not set.
fn get_env(_: &Context, args: Vec<Value>) -> Result<Value, Exception> {
    args::expect_arity("get_env", &args, 1, 2)?;

    let name = args::string_arg("get_env", &args, 0)?;
    let default = args::optional_string_arg("get_env", &args, 1)?;

    match env::var(name) {
        Ok(value) => Ok(Value::from(value)),
        Err(env::VarError::NotPresent) => {
            log::debug!("environment variable '{}' is not set", name);
            Ok(Value::from(default.unwrap_or_default()))
        }
        Err(e) => Err(Exception::with_cause(
            format!("environment variable '{}' is not valid unicode", name),
            Exception::from(e.to_string()),
        )),
    }
}

fn get_tfvars_dir(context: &Context, args: Vec<Value>) -> Result<Value, Exception> {
    args::expect_arity("get_tfvars_dir", &args, 0, 0)?;

    path_value(context.dir()?)
}

fn get_parent_tfvars_dir(context: &Context, args: Vec<Value>) -> Result<Value, Exception> {
    args::expect_arity("get_parent_tfvars_dir", &args, 0, 0)?;

    path_value(context.include_dir()?)
}

/// Path from the include's directory to the evaluated file's directory.
fn path_relative_to_include(context: &Context, args: Vec<Value>) -> Result<Value, Exception> {
    args::expect_arity("path_relative_to_include", &args, 0, 0)?;

    path_value(relative_path(&context.include_dir()?, &context.dir()?))
}

fn parent_dir(path: &Path) -> Result<PathBuf, Exception> {
    let path = if path.is_absolute() {
        path.to_owned()
    } else {
        env::current_dir()?.join(path)
    };

    Ok(normalize(path.parent().unwrap_or(&path)))
}

/// Lexically remove `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut normal = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            component => normal.push(component),
        }
    }

    normal
}

fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = from.components().collect::<Vec<_>>();
    let to = to.components().collect::<Vec<_>>();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();

    for _ in common..from.len() {
        relative.push("..");
    }

    for component in &to[common..] {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }

    relative
}

fn path_value(path: PathBuf) -> Result<Value, Exception> {
    match path.into_os_string().into_string() {
        Ok(string) => Ok(Value::from(string)),
        Err(path) => Err(Exception::from(format!("path {:?} is not valid unicode", path))),
    }
}
