//! Dump roles and MathML for a structure tree
//!
//! Reads a structure tree saved as JSON and prints every element with its
//! accessibility role, plus the MathML of each Formula element.
//!
//! Usage:
//!   cargo run --bin dump_structure -- tree.json
//!   cargo run --bin dump_structure -- tree.json --max-depth 64 --verbose

use pdf_a11y::config::MathMlConfig;
use pdf_a11y::structure::{MathReconstructor, SemanticRole, StructElem, StructNode};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: dump_structure <tree.json> [--max-depth N] [--verbose]";

#[derive(Debug)]
struct DumpConfig {
    input: Option<PathBuf>,
    max_depth: Option<u32>,
    verbose: bool,
}

impl DumpConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::parse(&args)
    }

    fn parse(args: &[String]) -> Result<Self, String> {
        let mut input = None;
        let mut max_depth = None;
        let mut verbose = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--max-depth" => {
                    i += 1;
                    let value = args.get(i).ok_or("--max-depth needs a value")?;
                    let depth = value
                        .parse()
                        .map_err(|_| format!("invalid --max-depth value: {}", value))?;
                    max_depth = Some(depth);
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other => {
                    input = Some(PathBuf::from(other));
                },
            }
            i += 1;
        }

        Ok(Self {
            input,
            max_depth,
            verbose,
        })
    }
}

fn dump(tree: &StructElem, reconstructor: &MathReconstructor) {
    tree.walk(&mut |depth, elem| {
        let node = StructNode::new(Some(elem.as_element()));
        let indent = "  ".repeat(depth);
        let tag = elem.struct_type.as_str();

        match node.classification() {
            Some(c) => match c.level {
                Some(level) => println!("{}{} [{:?} {}]", indent, tag, c.role, level),
                None => println!("{}{} [{:?}]", indent, tag, c.role),
            },
            None => println!("{}{}", indent, tag),
        }

        if node.classification().map(|c| c.role) == Some(SemanticRole::Math) {
            match node.math_ml(reconstructor) {
                Ok(math) => println!("{}  {}", indent, math),
                Err(e) => println!("{}  (no MathML: {})", indent, e),
            }
        }
    });
}

fn main() -> ExitCode {
    let config = match DumpConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        },
    };

    let level = if config.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let Some(input) = config.input else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let math_config = MathMlConfig::new().with_max_depth(config.max_depth);
    if let Err(e) = math_config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let tree = match StructElem::from_path(&input) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Error loading {}: {}", input.display(), e);
            return ExitCode::FAILURE;
        },
    };

    log::debug!("Loaded structure tree from {}", input.display());
    dump(&tree, &MathReconstructor::new(math_config));
    ExitCode::SUCCESS
}
