//! Floor Editor CLI
//!
//! Usage:
//!   floor-editor [OPTIONS] [SCRIPT]
//!
//! Options:
//!   -l, --layout <FILE>   Floor document to edit (JSON)
//!   -c, --config <FILE>   Editor configuration (TOML format)
//!   --sequential-ids      Number new elements el-1, el-2, ...
//!   --lint                Report layout problems on stderr
//!   --history             Print a history summary on stderr
//!   -g, --grammar         Show edit-script reference
//!   -d, --debug           Log every editor transition
//!   -h, --help            Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use floor_editor::document::lint;
use floor_editor::{
    apply_script_with_config, EditorConfig, EditorState, FloorDocument, SequentialIds,
    TimestampIds,
};

#[derive(Parser)]
#[command(name = "floor-editor")]
#[command(about = "Replay edit scripts against venue floor plans")]
struct Cli {
    /// Edit script (reads from stdin if not provided)
    script: Option<PathBuf>,

    /// Floor document to edit (JSON); a blank floor is used otherwise
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Venue id for a blank floor
    #[arg(long, default_value = "venue")]
    venue: String,

    /// Name for a blank floor
    #[arg(long, default_value = "Floor")]
    name: String,

    /// Width of a blank floor
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Height of a blank floor
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Editor configuration (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Deterministic element ids (el-1, el-2, ...)
    #[arg(long)]
    sequential_ids: bool,

    /// Report layout problems on stderr
    #[arg(long)]
    lint: bool,

    /// Print a history summary on stderr
    #[arg(long)]
    history: bool,

    /// Show edit-script reference
    #[arg(short, long)]
    grammar: bool,

    /// Log every editor transition
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if cli.grammar {
        print_grammar();
        return;
    }

    if cli.script.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let config = match &cli.config {
        Some(path) => match EditorConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => EditorConfig::default(),
    };

    let layout = match &cli.layout {
        Some(path) => match FloorDocument::from_file(path).and_then(|doc| {
            doc.validate()?;
            Ok(doc)
        }) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("Error loading layout '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FloorDocument::new(cli.venue.as_str(), cli.name.as_str(), cli.width, cli.height),
    };

    let (source, filename) = match &cli.script {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let result = if cli.sequential_ids {
        apply_script_with_config(layout, &source, &config, SequentialIds::default())
    } else {
        apply_script_with_config(layout, &source, &config, TimestampIds::new())
    };
    let state = match result {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    if cli.history {
        print_history(&state);
    }

    if cli.lint {
        for warning in lint::check(state.layout()) {
            eprintln!("warning: {}", warning);
        }
    }

    match state.layout().to_json_pretty() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// `FLOOR_EDITOR_LOG` wins over `RUST_LOG`; `--debug` overrides both
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("floor_editor=debug")
    } else {
        EnvFilter::try_from_env("FLOOR_EDITOR_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| "floor_editor=warn".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn print_history(state: &EditorState) {
    let history = state.history();
    eprintln!(
        "history: {} of {} snapshots kept, at {} (undo: {}, redo: {})",
        history.len(),
        history.capacity(),
        history.index(),
        if state.can_undo() { "yes" } else { "no" },
        if state.can_redo() { "yes" } else { "no" },
    );
    for (i, snapshot) in history.iter().enumerate() {
        let marker = if i == history.index() { '>' } else { ' ' };
        eprintln!("{} {:>2}: {} elements", marker, i, snapshot.elements.len());
    }
}

fn print_intro() {
    println!(
        r#"Floor Editor - replay edit scripts against venue floor plans

USAGE:
    floor-editor [OPTIONS] [SCRIPT]
    echo '<script>' | floor-editor

OPTIONS:
    -l, --layout <FILE>    Floor document to edit (JSON)
    --venue/--name/--width/--height
                           Blank floor settings when no layout is given
    -c, --config <FILE>    Editor configuration (TOML)
    --sequential-ids       Deterministic ids (el-1, el-2, ...)
    --lint                 Report layout problems on stderr
    --history              Print a history summary on stderr
    -g, --grammar          Show edit-script reference
    -d, --debug            Log every editor transition
    -h, --help             Print help

QUICK START:
    echo 'add table t1 [number: "1", seats: 4] at 100, 100' | floor-editor --sequential-ids
"#
    );
}

fn print_grammar() {
    println!(
        r##"EDIT SCRIPT REFERENCE

STATEMENTS
    add <kind> [name] [fields] [at X, Y]
    update <target> [fields]
    move <target> to X, Y          absolute position
    move <target> by DX, DY        relative offset
    resize <target> to W, H        never below [resize] min_width/min_height
    duplicate <target> [as name] [at X, Y]
    remove <target>
    undo
    redo

TARGETS
    t1                a name bound by an earlier add/duplicate
    "el-17"           an element id already in the layout

KINDS AND FIELDS
    table      number: "12"  seats: 4              (both required)
    group      numbers: ["1", "2"]  seats: 8      (both required)
    bar        label: "Main"
    zone       name: "Patio"  color: #88cc88       (name required)
    wall
    entrance   label: "Front"

    Every kind also takes x, y, w, h, rotation. On add, zone: <target>
    assigns the element to a zone and z: N sets its paint order.
    Other kinds become walls, or fail with [factory] unknown_kind = "reject".

COMMENTS
    // line comment
    /* block comment */

EXAMPLE
    add zone patio [name: "Patio", color: #88cc88] at 0, 400
    add table t1 [number: "12", seats: 4, zone: patio] at 100, 100
    move t1 by 40, 0
    duplicate t1 as t2 at 300, 300
    update t2 [number: "13"]
    undo
"##
    );
}
