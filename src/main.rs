use std::env;
use std::process;

use filelog::{FileLogHandler, Level, LogError, LogHandler, Replayer};

const USAGE: &str =
    "Usage: filelog <records.csv> <log-file> [--label NAME] [--min-level LEVEL]";

struct Options {
    input: String,
    log_path: String,
    label: String,
    min_level: Level,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, LogError> {
        let mut positional = Vec::new();
        let mut label = String::from("filelog");
        let mut min_level = Level::default();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--label" => label = flag_value(&mut iter, "--label")?.to_string(),
                "--min-level" => min_level = flag_value(&mut iter, "--min-level")?.parse()?,
                _ if arg.starts_with("--") => {
                    return Err(LogError::InvalidArguments(format!("unknown flag {}\n{}", arg, USAGE)))
                }
                _ => positional.push(arg.clone()),
            }
        }

        let [input, log_path]: [String; 2] = positional
            .try_into()
            .map_err(|_| LogError::InvalidArguments(USAGE.to_string()))?;

        Ok(Options {
            input,
            log_path,
            label,
            min_level,
        })
    }
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, LogError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| LogError::InvalidArguments(format!("{} needs a value\n{}", flag, USAGE)))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), LogError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = Options::parse(&args)?;

    let mut handler = FileLogHandler::new(options.label, &options.log_path)?;
    handler.set_log_level(options.min_level);

    let replayer = Replayer::new(handler);
    let written = replayer.replay_file(&options.input)?;
    println!("{}", written);

    Ok(())
}
