use anyhow::{bail, Context};
use blackbox_chat_model::credentials::{credential_type, BlackboxApiCredential};
use blackbox_chat_model::{
    init_logging, supply_config, BlackboxChatModel, ChatMessage, GenerationOptions, ModelClient,
    DEFAULT_MODEL, MODEL_CATALOGUE,
};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use futures::StreamExt;
use std::io::{self, Write};

const API_KEY_VAR: &str = "BLACKBOX_API_KEY";

fn cli() -> Command {
    Command::new("blackbox-chat-model")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Blackbox AI gateway chat-model provider")
        .subcommand_required(true)
        .subcommand(
            Command::new("models")
                .about("List the model catalogue")
                .arg(
                    Arg::new("vendor")
                        .long("vendor")
                        .value_name("VENDOR")
                        .help("Only show models from this vendor (e.g. openai, deepseek)")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(Command::new("describe").about("Print the node and credential descriptors as JSON"))
        .subcommand(Command::new("test-credential").about(format!("Check the key in {}", API_KEY_VAR)))
        .subcommand(
            Command::new("chat")
                .about("Send one prompt to the gateway")
                .arg(Arg::new("prompt").required(true).action(ArgAction::Set))
                .arg(
                    Arg::new("model")
                        .long("model")
                        .default_value(DEFAULT_MODEL)
                        .action(ArgAction::Set),
                )
                .arg(float_arg("temperature"))
                .arg(
                    Arg::new("max-tokens")
                        .long("max-tokens")
                        .value_parser(value_parser!(i64))
                        .allow_negative_numbers(true)
                        .action(ArgAction::Set),
                )
                .arg(float_arg("top-p"))
                .arg(float_arg("frequency-penalty"))
                .arg(float_arg("presence-penalty"))
                .arg(
                    Arg::new("stream")
                        .long("stream")
                        .help("Enable streaming output")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn float_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
        .action(ArgAction::Set)
}

fn credential() -> anyhow::Result<BlackboxApiCredential> {
    let key = std::env::var(API_KEY_VAR).with_context(|| format!("{} is not set", API_KEY_VAR))?;
    Ok(BlackboxApiCredential::new(key))
}

fn options(matches: &ArgMatches) -> GenerationOptions {
    GenerationOptions {
        temperature: matches.get_one::<f64>("temperature").copied(),
        max_tokens: matches.get_one::<i64>("max-tokens").map(|&n| n.into()),
        top_p: matches.get_one::<f64>("top-p").copied(),
        frequency_penalty: matches.get_one::<f64>("frequency-penalty").copied(),
        presence_penalty: matches.get_one::<f64>("presence-penalty").copied(),
    }
}

async fn chat(matches: &ArgMatches) -> anyhow::Result<()> {
    let model = matches.get_one::<String>("model").map(String::as_str).unwrap_or(DEFAULT_MODEL);
    let prompt = matches.get_one::<String>("prompt").context("prompt is required")?;
    let config = supply_config(&credential()?, model, &options(matches));
    let client = ModelClient::new(&config)?;
    let messages = vec![ChatMessage::user(prompt.as_str())];

    if matches.get_flag("stream") {
        let mut stream = client.chat_stream(messages).await?;
        let mut stdout = io::stdout();
        while let Some(chunk) = stream.next().await {
            if let Some(content) = chunk?.content() {
                write!(stdout, "{}", content)?;
                stdout.flush()?;
            }
        }
        writeln!(stdout)?;
    } else {
        let response = client.chat(messages).await?;
        println!("{}", response.get_content().unwrap_or_default());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("models", sub)) => {
            let vendor = sub.get_one::<String>("vendor");
            for model in MODEL_CATALOGUE
                .iter()
                .filter(|m| vendor.map_or(true, |v| m.vendor() == Some(v.as_str())))
            {
                println!("{:<50} {}", model.identifier, model.label);
            }
        }
        Some(("describe", _)) => {
            let descriptors = serde_json::json!({
                "node": BlackboxChatModel.description(),
                "credential": credential_type(),
            });
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }
        Some(("test-credential", _)) => {
            let result = credential()?.test(&reqwest::Client::new()).await?;
            println!("{}", serde_json::to_string(&result)?);
            if !result.success {
                bail!("credential test failed with status {}", result.status);
            }
        }
        Some(("chat", sub)) => chat(sub).await?,
        _ => unreachable!("subcommand_required is set"),
    }
    Ok(())
}
