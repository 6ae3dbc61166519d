use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "docask")]
#[command(about = "Ask a conversational documentation assistant from the command line", long_about = None)]
pub struct Args {
    #[arg(
        long = "serve",
        help = "Run as an MCP stdio server exposing the ask/followup/history/recommend tools"
    )]
    pub serve: bool,

    #[arg(
        long = "recommend",
        value_name = "PAGE_URL",
        help = "Print recommended questions for a documentation page and exit"
    )]
    pub recommend: Option<String>,

    #[arg(
        long = "history",
        value_name = "CONVERSATION_ID",
        help = "Print the dialog history of a conversation and exit"
    )]
    pub history: Option<String>,

    #[arg(
        long = "api-base-url",
        help = "Base URL for the conversation/history/recommend endpoints"
    )]
    pub api_base_url: Option<String>,

    #[arg(
        long = "sse-base-url",
        help = "Base URL for the streaming completions endpoint (defaults to the API base URL)"
    )]
    pub sse_base_url: Option<String>,

    #[arg(short = 'v', long = "verbose", help = "Log outbound requests to stderr")]
    pub verbose: bool,

    #[arg(help = "Question to ask the documentation assistant")]
    pub question: Vec<String>,
}
