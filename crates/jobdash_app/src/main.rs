mod platform;

use platform::logging::{self, LogDestination};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::initialize(LogDestination::Both);
    let settings = platform::settings_from_env();
    platform::run(settings).await
}
