use clap::Parser;
use colored::*;
use std::process;
use tokio::io::BufReader;

use docask::api::{DocsApi, DocsClient};
use docask::cli::Args;
use docask::config::Config;
use docask::mcp::McpServer;
use docask::session::MemoryConversationStore;
use docask::tools::DocTools;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    let client = DocsClient::new(
        &config.api_base_url,
        &config.sse_base_url,
        config.timeout_secs,
        config.verbose,
    )?;

    if args.serve {
        let tools = DocTools::new(client, MemoryConversationStore::new());
        let server = McpServer::new(tools, config.verbose);
        server
            .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
        return Ok(());
    }

    if let Some(page_url) = &args.recommend {
        let questions = client.get_recommended_questions(page_url, None).await;
        if questions.is_empty() {
            println!("{}", "No recommended questions for this page.".dimmed());
        } else {
            for (index, question) in questions.iter().enumerate() {
                println!("{}", format!("{}. {}", index + 1, question).cyan());
            }
        }
        return Ok(());
    }

    if let Some(conversation_id) = &args.history {
        let detail = match client.get_history(conversation_id).await {
            Ok(detail) => detail,
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                process::exit(1);
            }
        };

        for entry in &detail.dialog {
            if let Some(question) = &entry.question {
                println!("{} {}", "Q:".cyan(), question);
            }
            if let Some(answer) = entry.answer.as_ref().and_then(|a| a.answer.as_ref()) {
                println!("{} {}", "A:".green(), answer);
            }
            println!();
        }
        return Ok(());
    }

    // Quick ask: the whole trailing argument list is the question.
    let question = args.question.join(" ");
    let question = question.trim();
    if question.is_empty() {
        print_usage();
        process::exit(1);
    }

    let outcome = match client.query(question).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    println!("{}", outcome.answer);

    if !outcome.follow_ups.is_empty() {
        println!("{}", "\nFollow-up questions:".dimmed());
        for (index, follow_up) in outcome.follow_ups.iter().enumerate() {
            println!("{}", format!("{}. {}", index + 1, follow_up).cyan());
        }
    }

    if config.verbose {
        eprintln!(
            "{}",
            format!("[docask] conversation id: {}", outcome.conversation_id).dimmed()
        );
    }

    Ok(())
}

fn print_usage() {
    eprintln!("{}", "Usage: docask [OPTIONS] <question>".red());
    eprintln!(
        "{}",
        "      --serve                Run as an MCP stdio server".dimmed()
    );
    eprintln!(
        "{}",
        "      --recommend <URL>      Print recommended questions for a page".dimmed()
    );
    eprintln!(
        "{}",
        "      --history <ID>         Print the dialog history of a conversation".dimmed()
    );
    eprintln!(
        "{}",
        "      --api-base-url <URL>   Override the API base URL".dimmed()
    );
    eprintln!(
        "{}",
        "      --sse-base-url <URL>   Override the streaming base URL".dimmed()
    );
    eprintln!(
        "{}",
        "  -v, --verbose              Log outbound requests to stderr".dimmed()
    );
}
