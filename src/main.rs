mod debug_report;

use std::io::{self, IsTerminal, Read};

use blipspeak::{Sound, Voice, parse_verbose, rules};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let report = parse_verbose(&config.input);
    debug_report::print_run(&report, config.color);

    if report.error.is_some() {
        std::process::exit(1);
    }

    if config.speak {
        let mut voice = console_voice();
        voice.bank_mut().load_all(false);
        voice.cue(report.tokens, config.speed, config.pitch);
        if !voice.play_all(false) {
            std::process::exit(1);
        }
    }
}

/// Clip that "plays" by printing its name; stands in for an audio backend.
struct ConsoleSound {
    name: &'static str,
    loaded: bool,
}

impl Sound for ConsoleSound {
    fn name(&self) -> &str {
        self.name
    }

    fn play(&self, speed: f32, pitch: f32) -> bool {
        println!("♪ {}  (speed {speed}, pitch {pitch})", self.name);
        true
    }

    fn load(&mut self) -> bool {
        self.loaded = true;
        true
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }
}

fn console_voice() -> Voice {
    rules::english::clips()
        .iter()
        .copied()
        .map(|name| Box::new(ConsoleSound { name, loaded: false }) as Box<dyn Sound>)
        .collect()
}

struct CliConfig {
    input: String,
    speed: f32,
    pitch: f32,
    speak: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut speed = 1.0;
    let mut pitch = 1.0;
    let mut speak = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("blipspeak {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--speak" => speak = true,
            "--speed" => {
                let value = args.next().ok_or_else(|| "error: --speed expects a value".to_string())?;
                speed = parse_factor("--speed", &value)?;
            }
            "--pitch" => {
                let value = args.next().ok_or_else(|| "error: --pitch expects a value".to_string())?;
                pitch = parse_factor("--pitch", &value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--speed=") => {
                speed = parse_factor("--speed", arg.trim_start_matches("--speed="))?;
            }
            _ if arg.starts_with("--pitch=") => {
                pitch = parse_factor("--pitch", arg.trim_start_matches("--pitch="))?;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, speed, pitch, speak, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    // Shells append a final newline; do not voice it as a pause.
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}

fn parse_factor(flag: &str, value: &str) -> Result<f32, String> {
    let parsed: f32 = value
        .parse()
        .map_err(|_| format!("error: invalid {flag} '{value}' (expected a number)"))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(format!("error: invalid {flag} '{value}' (must be a positive number)"));
    }
    Ok(parsed)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "blipspeak {version}

Rule-based phonetic tokenizer CLI.

Usage:
  blipspeak [OPTIONS] [--] <input...>
  blipspeak [OPTIONS] --input <text>

Options:
  -i, --input <text>   Input text to tokenize. If omitted, reads remaining args
                       or stdin when no args are provided.
  --speak              Play the tokenized clips through the console voice.
  --speed <factor>     Playback speed for --speak, 1.0 is natural. Default: 1.0
  --pitch <factor>     Playback pitch for --speak, 1.0 is natural. Default: 1.0
  --color              Force ANSI color output.
  --no-color           Disable ANSI color output.
  -h, --help           Show this help message.
  -V, --version        Print version information.

Exit codes:
  0  Success.
  1  Tokenization or playback failure.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
