//! Interactive soft keyboard demo.
//!
//! Each input line is a sequence of key tokens separated by spaces. Special
//! key names (`shift`, `delete`, `space`, `dot`, `enter`, `numbers`,
//! `symbols`, `letters`, `globe`, `emoji`) press that key; any other token
//! types its characters one by one. Lines starting with `:` are commands:
//!
//!   :text <content>   overwrite the buffer
//!   :pick <n>         apply suggestion n (1-based)
//!   :width <px>       resize the keyboard container
//!   :keys             print key rectangles for the current mode
//!   :reset            start a new session

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;
use softkey::{
    create_keyboard, KeyDispatcher, KeyEvent, KeyboardConfig, Notification, SpecialKey,
    SystemClock,
};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(name = "softkey")]
#[command(about = "Type on a simulated soft keyboard")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Letter layout (overrides the config file)
    #[arg(short, long)]
    layout: Option<String>,

    /// JSON replacement table (overrides the config file)
    #[arg(short, long)]
    shortcuts: Option<PathBuf>,

    /// Container width in points
    #[arg(short, long, default_value_t = 390.0)]
    width: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => KeyboardConfig::load_toml(path)?,
        None => KeyboardConfig::default(),
    };
    if let Some(layout) = args.layout {
        config.letter_layout = layout;
    }
    if let Some(shortcuts) = args.shortcuts {
        config.shortcuts_path = Some(shortcuts);
    }

    let mut keyboard = create_keyboard(config)?;
    keyboard.set_container_width(args.width);

    println!("softkey - type key tokens, ':' for commands, Ctrl+D to exit");
    print_context(&keyboard);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let notes = match input.strip_prefix(':') {
            Some(command) => match run_command(&mut keyboard, command) {
                Ok(notes) => notes,
                Err(e) => {
                    eprintln!("error: {e:#}");
                    continue;
                }
            },
            None => type_tokens(&mut keyboard, input),
        };

        for note in &notes {
            print_notification(note);
        }
        print_context(&keyboard);
    }

    Ok(())
}

fn type_tokens(keyboard: &mut KeyDispatcher<SystemClock>, input: &str) -> Vec<Notification> {
    let mut notes = Vec::new();
    for token in input.split_whitespace() {
        match SpecialKey::from_id(token) {
            Some(special) => notes.extend(keyboard.process_key(KeyEvent::special(special))),
            None => {
                for c in token.chars() {
                    notes.extend(keyboard.process_key(KeyEvent::character(c.to_string())));
                }
            }
        }
    }
    notes
}

fn run_command(
    keyboard: &mut KeyDispatcher<SystemClock>,
    command: &str,
) -> anyhow::Result<Vec<Notification>> {
    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "text" => Ok(keyboard.set_text(rest.replace("\\n", "\n"))),
        "pick" => {
            let n: usize = rest.trim().parse()?;
            if n == 0 || n > keyboard.context().suggestions.len() {
                anyhow::bail!("no suggestion {n}");
            }
            Ok(keyboard.apply_suggestion(n - 1))
        }
        "width" => {
            let width: f32 = rest.trim().parse()?;
            Ok(keyboard.set_container_width(width))
        }
        "keys" => {
            let geometry = keyboard.geometry();
            println!(
                "  {:?} at {:.1}pt: unit {:.1}, height {:.1}",
                geometry.mode, geometry.container_width, geometry.unit_width, geometry.height
            );
            for key in &geometry.keys {
                println!(
                    "  [{}:{}] {:<8} x={:>6.1} y={:>5.1} w={:>5.1}",
                    key.row, key.column, key.id, key.rect.x, key.rect.y, key.rect.width
                );
            }
            Ok(Vec::new())
        }
        "reset" => Ok(keyboard.reset()),
        _ => anyhow::bail!("unknown command: {name}"),
    }
}

fn print_notification(note: &Notification) {
    match note {
        Notification::BufferChanged(m) => println!("  ~ {} -> {:?}", m.key, m.resulting_text),
        Notification::ShiftChanged(state) => println!("  ~ shift {:?}", state),
        Notification::ModeChanged(mode) => println!("  ~ mode {:?}", mode),
        Notification::InputSwitch(key) => println!("  ~ switch input ({})", key.id()),
        Notification::GeometryChanged => println!("  ~ geometry"),
    }
}

fn print_context(keyboard: &KeyDispatcher<SystemClock>) {
    let ctx = keyboard.context();
    println!(
        "[{:?} | shift {:?}{}] {:?}",
        ctx.layout_mode,
        ctx.shift_state,
        if ctx.uppercase_next { " | Aa" } else { "" },
        ctx.buffer_text
    );
    for (i, entry) in ctx.suggestions.iter().enumerate() {
        println!("  {}. {} -> {}", i + 1, entry.shortcut, entry.replacement);
    }
}
