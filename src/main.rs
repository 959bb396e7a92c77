use anyhow::Result;
use policy_chat::ui::TerminalUI;
use policy_chat::PolicyClient;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let base_url =
        env::var("POLICY_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

    let client = PolicyClient::new(base_url);
    let mut ui = TerminalUI::new(client)?;
    ui.run().await?;

    Ok(())
}
