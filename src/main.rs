use clap::{ArgAction, Parser};
use std::{
    io::{self, Read},
    path::PathBuf,
    process,
};
use tfvars_runtime::{
    resolve,
    syntax::{self, source::SourceFile},
};

mod functions;
mod logger;

/// Parse a tfvars value and resolve its interpolations.
#[derive(Debug, Parser)]
#[command(name = "tfvars", version, about, long_about = None)]
struct Options {
    /// File to evaluate (reads stdin if not provided or '-')
    file: Option<PathBuf>,

    /// Print the parsed syntax tree instead of resolving it
    #[arg(long, conflicts_with = "canonical")]
    ast: bool,

    /// Print the canonical source form instead of resolving it
    #[arg(long)]
    canonical: bool,

    /// Path of the configuration that includes the evaluated file
    #[arg(long, value_name = "PATH")]
    include: Option<PathBuf>,

    /// Enable verbose logging, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Disable all logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    if let Err(e) = logger::init() {
        eprintln!("error: failed to initialize logging: {}", e);
    }

    log_panics::init();

    let options = Options::parse();

    if options.quiet {
        logger::quiet();
    } else {
        logger::verbose(options.verbose);
    }

    log::trace!("{:?}", options);

    process::exit(run(options));
}

fn run(options: Options) -> i32 {
    let (file, path) = match read_source(options.file.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            log::error!("could not read input: {}", e);
            return exitcode::NOINPUT;
        }
    };

    let value = match syntax::parse(file) {
        Ok(value) => value,
        Err(e) => {
            log::error!("{}", e);
            return exitcode::DATAERR;
        }
    };

    if options.ast {
        println!("{:?}", value);
        return exitcode::OK;
    }

    if options.canonical {
        println!("{}", value);
        return exitcode::OK;
    }

    let context = match options.include {
        Some(include) => functions::Context::new(path).with_include(include),
        None => functions::Context::new(path),
    };

    match resolve(&value, &context, &functions::get()) {
        Ok(resolved) => {
            println!("{}", resolved);
            exitcode::OK
        }
        Err(e) => {
            log::error!("{}", e);
            exitcode::SOFTWARE
        }
    }
}

/// Read the input, returning it along with the path functions should see as
/// the evaluated file.
fn read_source(file: Option<&std::path::Path>) -> io::Result<(SourceFile, PathBuf)> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            log::debug!("reading {}", path.display());
            Ok((SourceFile::open(path)?, path.to_owned()))
        }
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;

            Ok((SourceFile::named("<stdin>", source), PathBuf::from("terraform.tfvars")))
        }
    }
}
