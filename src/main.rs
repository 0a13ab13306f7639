//! CLI for the EventMesh HTTP producer
//!
//! Subcommands:
//! - `publish`: publish one message and wait for the broker's acceptance
//! - `request`: send one message and print the reply

use std::time::Duration;

use clap::{Args, Parser};
use eventmesh_producer::config::load_config;
use eventmesh_producer::message::EventMeshMessage;
use eventmesh_producer::producer::{EventMeshHttpProducer, ProducerConfig};
use eventmesh_producer::utils::logging;
use tracing::info;

#[derive(Parser)]
#[command(name = "eventmesh-producer")]
enum Command {
    /// Publish a message (fire-and-forget)
    Publish(MessageArgs),
    /// Send a message and wait for the reply
    Request {
        #[command(flatten)]
        message: MessageArgs,
        /// How long to wait for the reply, in milliseconds
        #[arg(long, default_value_t = 3000)]
        timeout_ms: u64,
    },
}

#[derive(Args)]
struct MessageArgs {
    /// Destination topic
    #[arg(long)]
    topic: String,
    /// Message content
    #[arg(long, default_value = "")]
    content: String,
    /// Business sequence number (generated when omitted)
    #[arg(long)]
    biz_seq_no: Option<String>,
    /// Unique id (generated when omitted)
    #[arg(long)]
    unique_id: Option<String>,
    /// Message property as key=value, repeatable
    #[arg(long = "prop", value_parser = parse_property)]
    properties: Vec<(String, String)>,
    /// Override the configured broker address list
    #[arg(long)]
    addr: Option<String>,
}

impl MessageArgs {
    fn to_message(&self) -> EventMeshMessage {
        let mut message = EventMeshMessage::new(&self.topic, &self.content)
            .with_biz_seq_no(
                self.biz_seq_no
                    .clone()
                    .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string()),
            )
            .with_unique_id(
                self.unique_id
                    .clone()
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            );
        for (key, value) in &self.properties {
            message = message.with_property(key, value);
        }
        message
    }
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cmd = Command::parse();

    if let Err(e) = run(cmd).await {
        eprintln!("Producer failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(cmd: Command) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = load_config()?;
    logging::init(&settings.logging.level);

    let args = match &cmd {
        Command::Publish(args) => args,
        Command::Request { message, .. } => message,
    };
    if let Some(addr) = &args.addr {
        settings.producer.lite_eventmesh_addr = addr.clone();
    }

    let producer = EventMeshHttpProducer::new(ProducerConfig::from_settings(&settings)?);
    let message = args.to_message();

    match cmd {
        Command::Publish(_) => {
            producer.publish(&message).await?;
            info!(topic = %message.topic, biz_seq_no = %message.biz_seq_no, "Message published");
        }
        Command::Request { timeout_ms, .. } => {
            let reply = producer
                .request(&message, Duration::from_millis(timeout_ms))
                .await?;
            info!(topic = %reply.topic, "Reply received");
            println!("{}", reply.content);
        }
    }

    Ok(())
}
