mod artwork;
mod config;
mod extractor;
mod locator;
mod metadata;
mod pipeline;
mod tags;

use extractor::YtDlp;
use pipeline::Pipeline;
use std::io::{self, BufRead, Write};

/// What one line of console input means.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Blank,
    Unsupported,
    Url(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Blank;
    }
    if matches!(trimmed.to_lowercase().as_str(), "quit" | "q" | "exit") {
        return Input::Quit;
    }
    if !extractor::is_supported_url(trimmed) {
        return Input::Unsupported;
    }
    Input::Url(trimmed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::get_config()?;
    std::fs::create_dir_all(&config.download_dir)?;

    // Fail here, with an actionable message, rather than on the first URL
    let backend = match YtDlp::locate() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let pipeline = Pipeline::new(config, backend);

    println!("YouTube to MP3 converter");
    println!("Paste a YouTube URL or type 'quit' / 'q' / 'exit'");
    println!("{}", "-".repeat(60));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("\nPaste YouTube URL: ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF behaves like quit
            break;
        }

        match classify(&line) {
            Input::Blank => continue,
            Input::Quit => break,
            Input::Unsupported => {
                println!("Not a valid YouTube URL.");
                continue;
            }
            Input::Url(url) => {
                match pipeline.process(url).await {
                    Ok(target) => {
                        println!("\nSuccess! File moved to:");
                        println!("  {}", target.display());
                    }
                    Err(e) => println!("{}", e),
                }
                println!("{}", "-".repeat(60));
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}
