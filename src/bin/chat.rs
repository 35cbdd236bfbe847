//! MathWise terminal chat client
//!
//! Line-oriented front end for a tutoring session. Talks to a running
//! `mathwise-tutor` server (`MATHWISE_SERVER_URL`, default
//! `http://127.0.0.1:5020`).

use mathwise_tutor::client::HttpRelayClient;
use mathwise_tutor::session::{ChatMessage, Role, Session, TransitionError};
use mathwise_tutor::topics::{all_topics, find_topic};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5020";

const HELP: &str = "\
Commands:
  /topics        list topics
  /topic <name>  pick a topic (id or name)
  /help          show this help
  /quit          exit
Anything else is sent to the tutor.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let server_url =
        std::env::var("MATHWISE_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    let client = HttpRelayClient::new(&server_url)?;
    tracing::info!(endpoint = %client.endpoint(), "Relay client ready");

    let mut session = Session::new();
    let mut printed = 0;
    printed = render(&session, printed);
    println!("{HELP}");
    print_topics();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&session)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim_end_matches(['\r', '\n']);

        match line.split_once(' ').unwrap_or((line, "")) {
            ("/quit" | "/exit", _) => break,
            ("/help", _) => println!("{HELP}"),
            ("/topics", _) => print_topics(),
            ("/topic", name) => match find_topic(name) {
                Some(topic) => {
                    session.select_topic(topic);
                    printed = render(&session, 0);
                }
                None => println!("Unknown topic {name:?}. Try /topics."),
            },
            _ => {
                if session.selected_topic().is_none() {
                    println!("Please select a topic first (/topic <name>).");
                    continue;
                }
                println!("(thinking...)");
                match session.send_message(&client, line).await {
                    Ok(()) => printed = render(&session, printed),
                    Err(TransitionError::EmptyMessage) => {}
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    Ok(())
}

/// Print transcript entries from `from` onwards; returns the new high-water mark
fn render(session: &Session, from: usize) -> usize {
    for message in session.transcript().iter().skip(from) {
        print_message(message);
    }
    session.transcript().len()
}

fn print_message(message: &ChatMessage) {
    match message.role {
        Role::Assistant => println!("tutor> {}", message.text),
        // Already visible as typed input
        Role::User => {}
    }
}

fn print_topics() {
    for topic in all_topics() {
        println!("  {:<12} {} - {}", topic.id, topic.display_name, topic.description);
    }
}

fn prompt(session: &Session) -> std::io::Result<()> {
    let label = session
        .selected_topic()
        .map_or("no topic", |t| t.display_name);
    print!("[{label}] you> ");
    std::io::stdout().flush()
}
