//! stylum - resolve intent props into CSS

use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;

use stylum::{PropsBag, StyleDesc, StyleSink, SyntheticStyleSheet, panel_rules, sink};

#[derive(Parser)]
#[command(name = "stylum")]
#[command(version, about = "Resolve intent props into CSS declarations", long_about = None)]
#[command(after_help = "EXAMPLES:
    stylum props.json                    Resolve a props-bag file
    stylum -e '{\"center\": true}'         Resolve inline JSON
    stylum -e '{\"color\": \"red\"}' -r 12   Show class promotion after repeats")]
struct Cli {
    /// Props-bag JSON file
    #[arg(value_name = "INPUT", required_unless_present = "eval")]
    input: Option<String>,

    /// Inline props-bag JSON
    #[arg(short, long, value_name = "JSON")]
    eval: Option<String>,

    /// Resolve the same bag this many times through the dedup sink
    #[arg(short, long, default_value_t = 1)]
    repeat: usize,

    /// Occurrences allowed before a declaration is promoted to a class
    #[arg(short, long, default_value_t = sink::DEFAULT_MAX_NON_OPTIMIZED)]
    threshold: usize,

    /// Only print the final class/style result
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let source = match (&cli.eval, &cli.input) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| e.to_string())?,
        (None, None) => return Err("no input given".to_string()),
    };
    let value: serde_json::Value = serde_json::from_str(&source).map_err(|e| e.to_string())?;
    let props = stylum::json::props_from_json(&value)?;

    let sheet = Rc::new(RefCell::new(SyntheticStyleSheet::new()));
    let mut sink = StyleSink::with_threshold(Box::new(sheet.clone()), cli.threshold);
    let desc = resolve_repeatedly(&mut sink, &props, cli.repeat)?;

    if !cli.quiet && !sheet.borrow().rules().is_empty() {
        println!("inserted rules:");
        for rule in sheet.borrow().rules() {
            println!("  {rule}");
        }
    }

    if desc.class_name.is_empty() {
        println!("class: (none)");
    } else {
        println!("class: {}", desc.class_name);
    }
    if desc.style.is_empty() {
        println!("style: (none)");
    } else {
        println!("style:");
        for (property, value) in desc.style.kebabbed().iter() {
            println!("  {property}: {value}");
        }
    }
    Ok(())
}

fn resolve_repeatedly(
    sink: &mut StyleSink,
    props: &PropsBag,
    repeat: usize,
) -> Result<StyleDesc, String> {
    let styles = panel_rules().exec(props).map_err(|e| e.to_string())?;
    let mut desc = sink.get_desc(&styles);
    for _ in 1..repeat.max(1) {
        desc = sink.get_desc(&styles);
    }
    Ok(desc)
}
