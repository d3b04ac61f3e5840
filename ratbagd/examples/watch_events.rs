use futures::StreamExt;
use ratbagd::{Manager, Result};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let manager = Manager::new().await?;

    // Watch profile switches on every device present at startup
    for device in manager.devices().await? {
        for profile in device.profiles().await? {
            let mut events = profile.receive_events().await?;
            let name = device.name().unwrap_or_default();
            tokio::spawn(async move {
                while let Some(event) = events.next().await {
                    println!("{name}: {event:?}");
                }
            });
        }
    }

    println!("Watching for device changes, press Ctrl-C to stop...");
    manager
        .monitor_devices(|event| println!("Device list changed: {event:?}"))
        .await
}
