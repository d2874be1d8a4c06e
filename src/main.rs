use anyhow::{bail, Context};
use keywheel::{compute_wheel_rotation, resolve_interval, AuditReport, Key, WheelMode};
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "Usage: keywheel interval <key> <note>
       keywheel rotate <current-degrees> <key> [rotating|fixed]
       keywheel audit [--json] [catalog.yaml]";

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keywheel=info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    match run(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> anyhow::Result<i32> {
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        return Ok(1);
    };

    match command.as_str() {
        "interval" => {
            let [key, note] = &args[1..] else {
                bail!("interval takes <key> <note>\n{}", USAGE);
            };
            println!("{}", resolve_interval(key, note)?);
            Ok(0)
        }
        "rotate" => {
            if args.len() < 3 || args.len() > 4 {
                bail!("rotate takes <current-degrees> <key> [mode]\n{}", USAGE);
            }
            let current: f64 = args[1]
                .parse()
                .with_context(|| format!("'{}' is not a rotation in degrees", args[1]))?;
            let key: Key = args[2].parse()?;
            let mode = match args.get(3) {
                Some(m) => WheelMode::from_str(m).with_context(|| format!("unknown wheel mode '{}'", m))?,
                None => WheelMode::Rotating,
            };
            println!("{}", compute_wheel_rotation(current, &key, mode));
            Ok(0)
        }
        "audit" => audit(&args[1..]),
        "-h" | "--help" | "help" => {
            println!("{}", USAGE);
            Ok(0)
        }
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }
}

fn audit(args: &[String]) -> anyhow::Result<i32> {
    let mut json = false;
    let mut path: Option<&String> = None;

    for arg in args {
        if arg == "--json" {
            json = true;
        } else if path.is_none() {
            path = Some(arg);
        } else {
            bail!("audit takes at most one catalog path\n{}", USAGE);
        }
    }

    let report = match path {
        Some(path) => {
            let source = fs::read_to_string(path).with_context(|| format!("reading catalog '{}'", path))?;
            keywheel::audit_yaml(&source).with_context(|| format!("loading catalog '{}'", path))?
        }
        None => keywheel::audit_embedded()?,
    };

    print_report(&report, json)?;
    Ok(if report.is_clean() { 0 } else { 1 })
}

fn print_report(report: &AuditReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for issue in &report.issues {
        println!("{}", issue);
    }
    println!(
        "Checked {} voicings, found {} issue(s)",
        report.voicings_checked,
        report.issues.len()
    );
    Ok(())
}
