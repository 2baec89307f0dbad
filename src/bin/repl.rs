use dmxm_dice::{MarkdownStringifier, RollContext, Stringify, DEFAULT_MAX_DICE};
use std::env;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Reads the dice budget from `DICE_MAX_DICE`, falling back to the default
/// when unset, zero, or not a number.
fn max_dice() -> usize {
    env::var("DICE_MAX_DICE")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_DICE)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let max_dice = max_dice();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut buf = String::new();
    let mut stringifier = MarkdownStringifier;
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        if line.is_empty() {
            let mut ctx = RollContext::from_entropy(Some(max_dice));
            match ctx.process_detailed(buf.trim_end()) {
                Ok((text, rolls)) => {
                    println!("{}", text);
                    for roll in &rolls {
                        println!("  {}", stringifier.str_roll(roll));
                    }
                }
                Err(why) => eprintln!("Error: {}", why),
            }
            print!("> ");
            io::stdout().flush()?;
            buf.clear();
        } else {
            buf.push_str(&line);
            buf.push('\n');
            print!("... ");
            io::stdout().flush()?;
        }
    }
    Ok(())
}
