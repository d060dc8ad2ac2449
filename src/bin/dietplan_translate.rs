//! dietplan-translate: 翻译文本、JSON 记录与示例饮食计划的命令行工具
//!
//! Usage:
//!   dietplan-translate text <TEXT> --to <lang>                 Translate one string
//!   dietplan-translate objects --fields <a,b> --to <lang>      Translate a JSON array (file or stdin)
//!   dietplan-translate plans --to <lang> [--kind diet|meal]    Translate the built-in sample content

use anyhow::{bail, Context};
use dietplan_translate::catalog::{
    diet_plans, sample_meal_plans, DIET_PLAN_FIELDS, MEAL_PLAN_FIELDS,
};
use dietplan_translate::{ObjectTranslator, TranslationConfig, TranslationService};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dietplan_translate=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "text" => cmd_text(&CliArgs::parse(&args[2..])?).await,
        "objects" => cmd_objects(&CliArgs::parse(&args[2..])?).await,
        "plans" => cmd_plans(&CliArgs::parse(&args[2..])?).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"dietplan-translate: 饮食计划内容翻译工具

USAGE:
    dietplan-translate <COMMAND> [OPTIONS]

COMMANDS:
    text <TEXT> --to <lang>             Translate a single string
    objects --fields <a,b> --to <lang>  Translate fields of a JSON array
                                        (--file <path>, or stdin when omitted)
    plans --to <lang>                   Translate the built-in sample content
                                        (--kind diet|meal, --calories <n>)
    version                             Show version information
    help                                Show this help message

COMMON OPTIONS:
    --from <lang>                       Source language (default from config, "en")
    --config <path>                     YAML configuration file

ENVIRONMENT:
    DIETPLAN_TRANSLATE_ENDPOINT         Translate endpoint URL
    DIETPLAN_TRANSLATE_API_KEY          API key sent with each request
    DIETPLAN_TRANSLATE_TIMEOUT_MS       Per-request timeout (0 disables)
    RUST_LOG                            Log filter (default dietplan_translate=info)"#
    );
}

fn cmd_version() {
    println!("dietplan-translate {}", env!("CARGO_PKG_VERSION"));
}

/// Positional arguments plus `--flag value` pairs.
struct CliArgs {
    positional: Vec<String>,
    flags: HashMap<String, String>,
}

impl CliArgs {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut positional = Vec::new();
        let mut flags = HashMap::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if let Some(name) = arg.strip_prefix("--") {
                let value = iter
                    .next()
                    .with_context(|| format!("--{name} expects a value"))?;
                flags.insert(name.to_string(), value.clone());
            } else {
                positional.push(arg.clone());
            }
        }

        Ok(Self { positional, flags })
    }

    fn flag(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    fn target(&self) -> anyhow::Result<&str> {
        self.flag("to").context("missing --to <lang>")
    }

    fn config(&self) -> anyhow::Result<TranslationConfig> {
        let mut config = match self.flag("config") {
            Some(path) => TranslationConfig::from_yaml_file(path)?,
            None => TranslationConfig::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn source(&self, config: &TranslationConfig) -> String {
        self.flag("from")
            .map(str::to_string)
            .unwrap_or_else(|| config.source_lang.clone())
    }
}

async fn cmd_text(args: &CliArgs) -> anyhow::Result<()> {
    if args.positional.is_empty() {
        bail!("missing <TEXT>");
    }
    let text = args.positional.join(" ");
    let config = args.config()?;
    let service = TranslationService::from_config(&config)?;

    let translated = service
        .translate_text(&text, &args.source(&config), args.target()?)
        .await;
    println!("{translated}");
    Ok(())
}

async fn cmd_objects(args: &CliArgs) -> anyhow::Result<()> {
    let fields: Vec<&str> = args
        .flag("fields")
        .context("missing --fields <a,b>")?
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    let input = match args.flag("file").filter(|f| *f != "-") {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            buf
        }
    };
    let objects: Vec<Value> =
        serde_json::from_str(&input).context("input must be a JSON array of objects")?;

    let config = args.config()?;
    let translator = ObjectTranslator::new(TranslationService::from_config(&config)?);
    let translated = translator
        .translate_object_array(&objects, &fields, args.target()?, &args.source(&config))
        .await;

    println!("{}", serde_json::to_string_pretty(&translated)?);
    report(translator.service());
    Ok(())
}

async fn cmd_plans(args: &CliArgs) -> anyhow::Result<()> {
    let config = args.config()?;
    let source = args.source(&config);
    let target = args.target()?;
    let translator = ObjectTranslator::new(TranslationService::from_config(&config)?);

    let output = match args.flag("kind").unwrap_or("diet") {
        "diet" => {
            let plans = translator
                .translate_records(&diet_plans(), DIET_PLAN_FIELDS, target, &source)
                .await?;
            serde_json::to_string_pretty(&plans)?
        }
        "meal" => {
            let calories = args
                .flag("calories")
                .map(|c| c.parse::<u32>())
                .transpose()
                .context("--calories must be a positive integer")?;
            let plans = translator
                .translate_records(&sample_meal_plans(calories), MEAL_PLAN_FIELDS, target, &source)
                .await?;
            serde_json::to_string_pretty(&plans)?
        }
        other => bail!("unknown --kind '{other}' (expected diet or meal)"),
    };

    println!("{output}");
    report(translator.service());
    Ok(())
}

fn report(service: &TranslationService) {
    let stats = service.stats();
    info!(
        backend = service.backend_name(),
        network_calls = stats.network_calls,
        cache_hits = stats.cache_hits,
        coalesced = stats.coalesced,
        failures = stats.failures,
        "translation finished"
    );
}
